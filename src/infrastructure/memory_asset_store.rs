// src/infrastructure/memory_asset_store.rs
//
// In-memory AssetStore.
// Behaves like a strict filesystem: directories must exist before children
// are created in them.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use super::asset_path::{ancestors, normalize_relative_path, parent};
use super::asset_store::{AssetStore, CreateOutcome, DirectoryListing, WriteOutcome};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub bytes: Vec<u8>,
    pub mime: String,
}

#[derive(Default)]
struct State {
    dirs: BTreeSet<String>,
    files: BTreeMap<String, StoredFile>,
}

#[derive(Default)]
pub struct InMemoryAssetStore {
    state: RwLock<State>,
}

impl InMemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed files, creating their directories on the way.
    pub fn with_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, Vec<u8>)>,
        P: AsRef<str>,
    {
        let store = Self::new();
        {
            let mut state = store.state.write().unwrap_or_else(|p| p.into_inner());
            for (path, bytes) in files {
                let path = normalize_relative_path(path.as_ref());
                if let Some(dir) = parent(&path) {
                    state.dirs.extend(ancestors(dir));
                }
                state.files.insert(
                    path,
                    StoredFile {
                        bytes,
                        mime: "application/octet-stream".to_string(),
                    },
                );
            }
        }
        store
    }

    pub fn read(&self, path: &str) -> Option<StoredFile> {
        let state = self.state.read().unwrap_or_else(|p| p.into_inner());
        state.files.get(path).cloned()
    }

    pub fn file_paths(&self) -> Vec<String> {
        let state = self.state.read().unwrap_or_else(|p| p.into_inner());
        state.files.keys().cloned().collect()
    }

    pub fn has_directory(&self, path: &str) -> bool {
        let state = self.state.read().unwrap_or_else(|p| p.into_inner());
        path.is_empty() || state.dirs.contains(path)
    }
}

fn dir_exists(state: &State, path: &str) -> bool {
    path.is_empty() || state.dirs.contains(path)
}

#[async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn list(&self, path: &str) -> AppResult<DirectoryListing> {
        let path = normalize_relative_path(path);
        let state = self.state.read().unwrap_or_else(|p| p.into_inner());
        if !dir_exists(&state, &path) {
            return Err(AppError::browse(path, "directory does not exist"));
        }

        let is_child = |candidate: &str| parent(candidate).unwrap_or("") == path;

        Ok(DirectoryListing {
            files: state.files.keys().filter(|f| is_child(f)).cloned().collect(),
            dirs: state.dirs.iter().filter(|d| is_child(d)).cloned().collect(),
        })
    }

    async fn create_directory(&self, path: &str) -> AppResult<CreateOutcome> {
        let path = normalize_relative_path(path);
        let mut state = self.state.write().unwrap_or_else(|p| p.into_inner());
        if dir_exists(&state, &path) {
            return Ok(CreateOutcome::AlreadyExists);
        }
        if state.files.contains_key(&path) {
            return Err(AppError::Other(format!("A file exists at {}", path)));
        }
        if !dir_exists(&state, parent(&path).unwrap_or("")) {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Parent directory missing for {}", path),
            )));
        }
        state.dirs.insert(path);
        Ok(CreateOutcome::Created)
    }

    async fn write_file(
        &self,
        path: &str,
        bytes: &[u8],
        mime: &str,
        overwrite: bool,
    ) -> AppResult<WriteOutcome> {
        let path = normalize_relative_path(path);
        let mut state = self.state.write().unwrap_or_else(|p| p.into_inner());
        if !dir_exists(&state, parent(&path).unwrap_or("")) {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Parent directory missing for {}", path),
            )));
        }
        if !overwrite && state.files.contains_key(&path) {
            return Ok(WriteOutcome::Kept);
        }
        state.files.insert(
            path,
            StoredFile {
                bytes: bytes.to_vec(),
                mime: mime.to_string(),
            },
        );
        Ok(WriteOutcome::Written)
    }
}
