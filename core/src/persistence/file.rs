//! File-based persistence adapter
//!
//! Each storage key maps to one JSON file inside a data directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::adapter::PersistenceAdapter;
use crate::{Error, Result};

/// Check that `key` can be used as a file name inside the data directory.
pub fn validate_storage_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(Error::Config(format!("Invalid storage key '{}'", key)))
    }
}

/// Stores the blob for one key at `<dir>/<key>.json`
pub struct FileAdapter {
    path: PathBuf,
}

impl FileAdapter {
    /// Create an adapter for `key` under `dir`.
    ///
    /// The directory is created on first write.
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Result<Self> {
        validate_storage_key(key)?;
        Ok(Self {
            path: dir.as_ref().join(format!("{}.json", key)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PersistenceAdapter for FileAdapter {
    async fn load(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::StorageRead(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn save(&self, blob: &[u8]) -> Result<()> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::StorageWrite(format!("Failed to create directory: {}", e)))?;

        let temp_path = parent.join(format!(".{}.tmp", Uuid::new_v4().as_hyphenated()));

        if let Err(err) = tokio::fs::write(&temp_path, blob).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(Error::StorageWrite(format!(
                "Failed to write temp file: {}",
                err
            )));
        }

        if let Err(err) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(Error::StorageWrite(format!(
                "Failed to finalize atomic write: {}",
                err
            )));
        }

        debug!("Saved {} bytes to {}", blob.len(), self.path.display());
        Ok(())
    }
}
