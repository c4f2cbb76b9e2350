//! Artifact persistence

use std::path::{Path, PathBuf};

use cde_core::domain::artifact::ArtifactKey;

use crate::error::FetchError;

/// Write one artifact under `root`, creating directories as needed
///
/// An existing file at the same location is overwritten.
///
/// # Returns
/// The path the artifact was written to
pub async fn write_artifact(
    root: &Path,
    key: &ArtifactKey,
    contents: &str,
) -> Result<PathBuf, FetchError> {
    let dir = key.directory(root);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|source| FetchError::Io {
            path: dir.clone(),
            source,
        })?;

    let path = key.path(root);
    tokio::fs::write(&path, contents)
        .await
        .map_err(|source| FetchError::Io {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_layout() {
        let root = tempfile::tempdir().unwrap();
        let key = ArtifactKey::new("a_example_com", "7", "driver/stdout");

        let path = write_artifact(root.path(), &key, "hello\n").await.unwrap();

        assert_eq!(
            path,
            root.path()
                .join("a_example_com/7/driver-stdout/a_example_com.log")
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let root = tempfile::tempdir().unwrap();
        let key = ArtifactKey::new("c", "1", "driver/stderr");

        write_artifact(root.path(), &key, "old contents that are longer\n")
            .await
            .unwrap();
        let path = write_artifact(root.path(), &key, "new\n").await.unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "new\n");
    }

    #[tokio::test]
    async fn test_write_reports_io_failure() {
        let root = tempfile::tempdir().unwrap();
        // A regular file where the cluster directory should go
        std::fs::write(root.path().join("c"), "not a directory").unwrap();
        let key = ArtifactKey::new("c", "1", "driver/stdout");

        let err = write_artifact(root.path(), &key, "x").await.unwrap_err();

        assert!(matches!(err, FetchError::Io { .. }));
    }
}
