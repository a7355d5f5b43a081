use crate::config::Config;
use crate::dir_list::{DirListError, list_directory};
use std::path::Path;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const CONTINUATION: &str = "│   ";
const LAST_CONTINUATION: &str = "    ";

/// Render `dir` as box-drawing tree lines, depth first, siblings sorted by name.
///
/// Every line starts with `prefix`. Directories get a trailing `/` and are
/// descended; symlinks are listed as leaves. Ignored folders are left out entirely.
pub fn render_tree(
    dir: &Path,
    prefix: &str,
    config: &Config,
) -> Result<Vec<String>, DirListError> {
    let entries: Vec<_> = list_directory(dir)?
        .into_iter()
        .filter(|e| !(e.is_dir() && config.is_ignored_folder(&e.name)))
        .collect();

    let mut lines = Vec::new();
    let count = entries.len();

    for (i, entry) in entries.into_iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { LAST_BRANCH } else { BRANCH };

        if entry.is_dir() {
            lines.push(format!("{prefix}{connector}{}/", entry.name));
            let child_prefix = format!(
                "{prefix}{}",
                if is_last { LAST_CONTINUATION } else { CONTINUATION }
            );
            lines.extend(render_tree(&dir.join(&entry.name), &child_prefix, config)?);
        } else {
            lines.push(format!("{prefix}{connector}{}", entry.name));
        }
    }

    Ok(lines)
}

/// The full tree listing: the root label line followed by the rendered tree,
/// newline-joined without a trailing newline.
pub fn render_tree_document(root: &Path, config: &Config) -> Result<String, DirListError> {
    let mut lines = vec![config.tree_label.clone()];
    lines.extend(render_tree(root, "", config)?);
    Ok(lines.join("\n"))
}
