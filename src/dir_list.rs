//! Non-recursive directory listing shared by the register builder and the tree renderer.
//!
//! Each call lists the immediate children of one directory, classified by type and
//! sorted by name. Recursion (and pruning of ignored folders) is left to the callers,
//! so an ignored subtree is never opened at all.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DirListError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("File name is not valid UTF-8: {0}")]
    NonUtf8Name(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink { target: PathBuf },
}

impl DirEntry {
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Dir)
    }
}

fn map_io_error(e: std::io::Error, path: &Path) -> DirListError {
    if e.kind() == std::io::ErrorKind::PermissionDenied {
        DirListError::PermissionDenied(path.to_path_buf())
    } else {
        DirListError::Io(e)
    }
}

/// Lists the immediate children of `dir`, sorted by name (byte order, so the
/// ordering is case-sensitive and stable across platforms).
///
/// Symlinks are reported as [`EntryKind::Symlink`] and never followed here.
pub fn list_directory(dir: &Path) -> Result<Vec<DirEntry>, DirListError> {
    let read_dir = std::fs::read_dir(dir).map_err(|e| map_io_error(e, dir))?;

    let mut entries = Vec::new();

    for entry in read_dir {
        let entry = entry.map_err(DirListError::Io)?;
        let path = entry.path();

        let name = entry
            .file_name()
            .into_string()
            .map_err(|_| DirListError::NonUtf8Name(path.clone()))?;

        let file_type = entry.file_type().map_err(|e| map_io_error(e, &path))?;

        let kind = if file_type.is_symlink() {
            let target = std::fs::read_link(&path).map_err(|e| map_io_error(e, &path))?;
            EntryKind::Symlink { target }
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };

        entries.push(DirEntry { name, kind });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_simple_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("file1.txt"), "content1").unwrap();
        fs::write(root.join("file2.txt"), "content2").unwrap();
        fs::create_dir(root.join("dir1")).unwrap();
        fs::write(root.join("dir1/file3.txt"), "content3").unwrap();

        let entries = list_directory(root).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "dir1");
        assert_eq!(entries[0].kind, EntryKind::Dir);
        assert_eq!(entries[1].name, "file1.txt");
        assert_eq!(entries[1].kind, EntryKind::File);
        assert_eq!(entries[2].name, "file2.txt");
        assert_eq!(entries[2].kind, EntryKind::File);

        let subdir_entries = list_directory(&root.join("dir1")).unwrap();
        assert_eq!(subdir_entries.len(), 1);
        assert_eq!(subdir_entries[0].name, "file3.txt");
    }

    #[test]
    fn test_list_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let entries = list_directory(temp_dir.path()).unwrap();

        assert!(entries.is_empty());
    }

    #[test]
    fn test_list_ordering_is_case_sensitive() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("banana.txt"), "b").unwrap();
        fs::write(root.join("Zebra.txt"), "z").unwrap();
        fs::write(root.join("apple.txt"), "a").unwrap();

        let names: Vec<String> = list_directory(root)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();

        assert_eq!(names, vec!["Zebra.txt", "apple.txt", "banana.txt"]);
    }

    #[test]
    fn test_list_missing_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();

        let result = list_directory(&temp_dir.path().join("missing"));

        match result {
            Err(DirListError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_list_reports_symlinks_without_following() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("real")).unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();
        std::os::unix::fs::symlink("/nonexistent/target", root.join("broken")).unwrap();

        let entries = list_directory(root).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "broken");
        assert_eq!(
            entries[0].kind,
            EntryKind::Symlink {
                target: PathBuf::from("/nonexistent/target")
            }
        );
        assert_eq!(entries[1].name, "link");
        assert!(matches!(entries[1].kind, EntryKind::Symlink { .. }));
        assert!(!entries[1].is_dir());
        assert_eq!(entries[2].name, "real");
        assert!(entries[2].is_dir());
    }

    #[test]
    #[cfg(unix)]
    fn test_list_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let restricted_dir = temp_dir.path().join("restricted");
        fs::create_dir(&restricted_dir).unwrap();

        let mut perms = fs::metadata(&restricted_dir).unwrap().permissions();
        perms.set_mode(0o000);
        fs::set_permissions(&restricted_dir, perms.clone()).unwrap();

        let result = list_directory(&restricted_dir);

        perms.set_mode(0o755);
        fs::set_permissions(&restricted_dir, perms).unwrap();

        // Running as root bypasses permission checks entirely.
        if result.is_ok() {
            return;
        }
        match result {
            Err(DirListError::PermissionDenied(path)) => assert_eq!(path, restricted_dir),
            other => panic!("Expected PermissionDenied error, got {other:?}"),
        }
    }
}
