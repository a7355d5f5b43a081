use crate::config::Config;
use crate::dir_list::{DirListError, EntryKind, list_directory};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Directory listing error: {0}")]
    DirList(#[from] DirListError),
    #[error("Not a directory: {0}")]
    RootNotDirectory(PathBuf),
}

/// One file tracked by the register.
///
/// Field names on the wire are fixed (`name`, `ext`, `path`, `url`); downstream
/// consumers read the JSON directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRecord {
    pub name: String,
    #[serde(rename = "ext")]
    pub extension: String,
    /// Relative to the register root, always `/`-separated.
    #[serde(rename = "path")]
    pub relative_path: String,
    pub url: String,
}

/// Folder relative path (`""` for the root) to the records directly inside it.
///
/// Every visited folder has a key, including folders with no qualifying files.
pub type FolderGroups = BTreeMap<String, Vec<AssetRecord>>;

/// Extension of `name`: the text after the last dot, or `""` when there is none.
///
/// Leading dots do not start an extension, so `.env` has no extension while
/// `a.b.c` has `c`.
pub fn file_extension(name: &str) -> &str {
    name.trim_start_matches('.')
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or("")
}

fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Walk `root` and group an [`AssetRecord`] for every non-hidden file by the folder
/// that directly contains it.
///
/// Ignored folders are pruned before descent. Symlinks are never descended; a
/// symlink is recorded only when it resolves to a regular file. Nothing is written
/// to disk here, see [`crate::fragment::write_fragments`] for that.
pub fn build_register(root: &Path, config: &Config) -> Result<FolderGroups, RegisterError> {
    if !root.is_dir() {
        return Err(RegisterError::RootNotDirectory(root.to_path_buf()));
    }

    let mut groups = FolderGroups::new();
    walk_directory(root, String::new(), config, &mut groups)?;
    Ok(groups)
}

fn walk_directory(
    current_dir: &Path,
    relative_dir: String,
    config: &Config,
    groups: &mut FolderGroups,
) -> Result<(), RegisterError> {
    debug!("Scanning {}", current_dir.display());

    let entries = list_directory(current_dir)?;

    let mut items = Vec::new();
    let mut subdirs = Vec::new();

    for entry in entries {
        match &entry.kind {
            EntryKind::Dir => {
                if config.is_ignored_folder(&entry.name) {
                    debug!(
                        "Pruning ignored folder {}",
                        current_dir.join(&entry.name).display()
                    );
                    continue;
                }
                subdirs.push(entry.name);
            }
            EntryKind::Symlink { target } if !current_dir.join(&entry.name).is_file() => {
                debug!(
                    "Skipping symlink {} -> {}",
                    current_dir.join(&entry.name).display(),
                    target.display()
                );
            }
            EntryKind::File | EntryKind::Symlink { .. } => {
                if config.is_hidden_file(&entry.name) {
                    continue;
                }
                let relative_path = join_relative(&relative_dir, &entry.name);
                items.push(AssetRecord {
                    extension: file_extension(&entry.name).to_string(),
                    url: config.asset_url(&relative_path),
                    name: entry.name,
                    relative_path,
                });
            }
        }
    }

    groups.insert(relative_dir.clone(), items);

    for name in subdirs {
        let child_relative = join_relative(&relative_dir, &name);
        walk_directory(&current_dir.join(&name), child_relative, config, groups)?;
    }

    Ok(())
}

/// Total number of assets across all folders.
pub fn asset_count(groups: &FolderGroups) -> usize {
    groups.values().map(Vec::len).sum()
}

/// Serialize the whole register as pretty JSON (two-space indent, no trailing newline).
pub fn register_to_json(groups: &FolderGroups) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(groups)
}
