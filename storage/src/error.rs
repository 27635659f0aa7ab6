//! Storage error types.
//!
//! Used by image store implementations and callers of storage APIs.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when persisting an image.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create image directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write image {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Refusing to store an empty image")]
    Empty,
}
