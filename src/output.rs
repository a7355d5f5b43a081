use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

fn map_io_error(e: std::io::Error, path: &Path) -> OutputError {
    if e.kind() == std::io::ErrorKind::PermissionDenied {
        OutputError::PermissionDenied(path.to_path_buf())
    } else {
        OutputError::Io(e)
    }
}

/// Replace the file at `path` with `content` atomically.
///
/// Writes to a temporary file next to the target, fsyncs it, then renames it into
/// place, so a consumer never observes a half-written register.
pub fn write_atomically(path: &Path, content: &str) -> Result<(), OutputError> {
    let parent = path.parent().unwrap_or(Path::new("."));

    let mut temp_file =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| map_io_error(e, parent))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| map_io_error(e, path))?;

    temp_file.as_file().sync_all().map_err(OutputError::Io)?;

    temp_file
        .persist(path)
        .map_err(|e| map_io_error(e.error, path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.json");

        write_atomically(&path, "[]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.tree");
        fs::write(&path, "old content that is longer").unwrap();

        write_atomically(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        // No temporary files are left behind.
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing/out.json");

        let result = write_atomically(&path, "{}");

        assert!(matches!(result, Err(OutputError::Io(_))));
    }
}
