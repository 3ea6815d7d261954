// src/infrastructure/asset_store.rs
//
// Asset Store contract
//
// The abstract filesystem the index builder browses and the extraction
// pipeline writes into. Every call is a suspension point.
//
// RULES:
// - Paths are `/`-delimited and relative to the store root ("" is the root)
// - Listings return full relative paths, not bare names
// - create_directory treats an existing directory as success

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Direct children of a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryListing {
    pub files: Vec<String>,
    pub dirs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The file existed and overwrite was off; nothing changed
    Kept,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// List the direct children of `path`. Fails with `AppError::Browse`
    /// when the directory cannot be read.
    async fn list(&self, path: &str) -> AppResult<DirectoryListing>;

    /// Create one directory level. Its parent must exist.
    async fn create_directory(&self, path: &str) -> AppResult<CreateOutcome>;

    /// Write a file whose parent directory exists.
    async fn write_file(
        &self,
        path: &str,
        bytes: &[u8],
        mime: &str,
        overwrite: bool,
    ) -> AppResult<WriteOutcome>;
}
