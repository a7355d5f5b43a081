//! Per-folder manifest fragments.
//!
//! Every non-empty folder group is written as its own JSON array at the top of the
//! register root, named after the folder's relative path with `/` replaced by `_`.

use crate::config::Config;
use crate::output::{OutputError, write_atomically};
use crate::register::FolderGroups;
use std::path::{Path, PathBuf};
use tracing::debug;

const FRAGMENT_EXTENSION: &str = "json";

/// File name of the fragment for folder `key` (`""` is the root folder).
pub fn fragment_file_name(key: &str, config: &Config) -> String {
    let stem = if key.is_empty() {
        config.root_fragment_name.clone()
    } else {
        key.replace('/', "_")
    };
    format!("{stem}.{FRAGMENT_EXTENSION}")
}

/// Write one fragment into `dir` for every folder that has at least one asset.
///
/// Returns the written paths in folder order. Folders are written in key order, so
/// when two keys sanitize to the same name (`a_b` and `a/b`) the later key wins.
pub fn write_fragments(
    dir: &Path,
    groups: &FolderGroups,
    config: &Config,
) -> Result<Vec<PathBuf>, OutputError> {
    let mut written = Vec::new();

    for (key, items) in groups {
        if items.is_empty() {
            continue;
        }

        let path = dir.join(fragment_file_name(key, config));
        let content = serde_json::to_string_pretty(items)?;
        write_atomically(&path, &content)?;
        debug!("Wrote {} ({} assets)", path.display(), items.len());

        if !written.contains(&path) {
            written.push(path);
        }
    }

    Ok(written)
}
