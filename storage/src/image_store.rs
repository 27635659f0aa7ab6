use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::error::StorageError;
use crate::file_name::image_file_name;

/// Persists generated images and reports where they landed.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores `bytes` generated for `prompt` and returns the file path.
    async fn save(&self, prompt: &str, bytes: &[u8]) -> Result<PathBuf, StorageError>;
}

/// Writes images into one directory, created on first use.
///
/// Names carry second resolution: the same prompt generated twice within one second
/// overwrites the earlier file.
#[derive(Debug, Clone)]
pub struct FileImageStore {
    dir: PathBuf,
}

impl FileImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the image under the name derived from `prompt` and `unix_seconds`.
    pub async fn save_at(
        &self,
        prompt: &str,
        bytes: &[u8],
        unix_seconds: i64,
    ) -> Result<PathBuf, StorageError> {
        if bytes.is_empty() {
            return Err(StorageError::Empty);
        }
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.dir.join(image_file_name(prompt, unix_seconds));
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), bytes = bytes.len(), "image saved");
        Ok(path)
    }
}

#[async_trait]
impl ImageStore for FileImageStore {
    #[instrument(skip(self, prompt, bytes), fields(dir = %self.dir.display()))]
    async fn save(&self, prompt: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        self.save_at(prompt, bytes, chrono::Utc::now().timestamp())
            .await
    }
}
