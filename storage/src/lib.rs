//! Storage crate: persistence of generated images on the local file system.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`file_name`] – Deterministic image file names
//! - [`image_store`] – ImageStore trait and FileImageStore

mod error;
mod file_name;
mod image_store;

pub use error::StorageError;
pub use file_name::{image_file_name, prompt_slug, SLUG_MAX_CHARS};
pub use image_store::{FileImageStore, ImageStore};
