use crate::common::error::{RemoveFile, Result};
use snafu::ResultExt;
use std::{fs, io::ErrorKind, path::Path};
use tracing::debug;

/// Removes a file, treating a file which is already gone as removed. Every other
/// filesystem error is returned.
pub(crate) fn remove_file_if_exists<P>(path: P) -> Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Removed file");
            Ok(())
        }
        Err(error) if error.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "File already removed");
            Ok(())
        }
        Err(error) => Err(error).context(RemoveFile {
            filepath: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::remove_file_if_exists;
    use std::fs;

    #[test]
    fn removes_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart-0.0.0.tgz");
        fs::write(&path, b"archive").unwrap();

        remove_file_if_exists(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(remove_file_if_exists(dir.path().join("gone.tgz")).is_ok());
    }

    #[test]
    fn directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(remove_file_if_exists(dir.path()).is_err());
    }
}
