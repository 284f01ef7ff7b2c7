//! Command line path checks
//!
//! Run before anything is loaded; a failure names the offending path.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("{} is not a valid file", .0.display())]
    NotAFile(PathBuf),

    #[error("{} is not a valid directory", .0.display())]
    NotADirectory(PathBuf),
}

/// Absolute path of an existing regular file
pub fn validate_file(path: &Path) -> Result<PathBuf, PathError> {
    if !path.is_file() {
        return Err(PathError::NotAFile(path.to_path_buf()));
    }
    fs::canonicalize(path).map_err(|_| PathError::NotAFile(path.to_path_buf()))
}

/// Absolute path of an existing directory
pub fn validate_dir(path: &Path) -> Result<PathBuf, PathError> {
    if !path.is_dir() {
        return Err(PathError::NotADirectory(path.to_path_buf()));
    }
    fs::canonicalize(path).map_err(|_| PathError::NotADirectory(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("prog.json");
        fs::write(&file, "{}").unwrap();

        assert!(validate_file(&file).unwrap().is_absolute());
        assert_eq!(
            validate_file(dir.path()),
            Err(PathError::NotAFile(dir.path().to_path_buf()))
        );
    }

    #[test]
    fn test_validate_dir() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("prog.json");
        fs::write(&file, "{}").unwrap();

        assert!(validate_dir(dir.path()).is_ok());
        assert!(validate_dir(&file).is_err());

        let missing = dir.path().join("gen");
        let err = validate_dir(&missing).unwrap_err();
        assert_eq!(err.to_string(), format!("{} is not a valid directory", missing.display()));
    }
}
