// src/infrastructure/local_asset_store.rs
//
// AssetStore backed by a directory on the local disk.

use async_trait::async_trait;
use log::{debug, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::asset_path::{join, normalize_relative_path};
use super::asset_store::{AssetStore, CreateOutcome, DirectoryListing, WriteOutcome};
use crate::error::{AppError, AppResult};

pub struct LocalAssetStore {
    root: PathBuf,
}

impl LocalAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a relative asset path onto the disk. Paths that would leave the
    /// root are refused rather than silently rewritten.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let normalized = normalize_relative_path(path);
        let climbs = path
            .replace('\\', "/")
            .split('/')
            .any(|segment| segment.trim() == "..");
        if climbs {
            return Err(AppError::Other(format!(
                "Path escapes the asset root: {}",
                path
            )));
        }
        Ok(if normalized.is_empty() {
            self.root.clone()
        } else {
            self.root.join(normalized)
        })
    }
}

/// A directory link whose target contains the folder being listed would
/// make a recursive walk revisit it forever.
fn links_back(link: &Path, canonical_dir: &Path) -> bool {
    match std::fs::canonicalize(link) {
        Ok(target) => canonical_dir.starts_with(&target),
        Err(_) => true,
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn list(&self, path: &str) -> AppResult<DirectoryListing> {
        let dir = self.resolve(path).map_err(|e| AppError::browse(path, e))?;
        let metadata = tokio::fs::metadata(&dir)
            .await
            .map_err(|e| AppError::browse(path, e))?;
        if !metadata.is_dir() {
            return Err(AppError::browse(path, "not a directory"));
        }

        let base = normalize_relative_path(path);
        let display = path.to_string();

        tokio::task::spawn_blocking(move || {
            let mut listing = DirectoryListing::default();
            let canonical_dir = std::fs::canonicalize(&dir).unwrap_or_else(|_| dir.clone());

            for entry in walkdir::WalkDir::new(&dir)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
            {
                // One unreadable child never hides its siblings
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!("Skipping unreadable entry in '{}': {}", display, e);
                        continue;
                    }
                };
                let name = entry.file_name().to_string_lossy().to_string();
                let relative = join(&base, &name);
                let file_type = entry.file_type();

                if file_type.is_symlink() {
                    match std::fs::metadata(entry.path()) {
                        Ok(target) if target.is_file() => listing.files.push(relative),
                        Ok(target) if target.is_dir() => {
                            if links_back(entry.path(), &canonical_dir) {
                                warn!("Skipping '{}': link points back into its own folder", relative);
                            } else {
                                listing.dirs.push(relative);
                            }
                        }
                        Ok(_) => {}
                        Err(e) => warn!("Skipping broken link '{}': {}", relative, e),
                    }
                } else if file_type.is_dir() {
                    listing.dirs.push(relative);
                } else if file_type.is_file() {
                    listing.files.push(relative);
                }
            }

            Ok(listing)
        })
        .await?
    }

    async fn create_directory(&self, path: &str) -> AppResult<CreateOutcome> {
        let dir = self.resolve(path)?;
        match tokio::fs::create_dir(&dir).await {
            Ok(()) => Ok(CreateOutcome::Created),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if tokio::fs::metadata(&dir).await?.is_dir() {
                    Ok(CreateOutcome::AlreadyExists)
                } else {
                    Err(AppError::Other(format!(
                        "A file already exists where a directory is expected: {}",
                        path
                    )))
                }
            }
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn write_file(
        &self,
        path: &str,
        bytes: &[u8],
        mime: &str,
        overwrite: bool,
    ) -> AppResult<WriteOutcome> {
        let target = self.resolve(path)?;
        if !overwrite && tokio::fs::try_exists(&target).await? {
            return Ok(WriteOutcome::Kept);
        }

        tokio::fs::write(&target, bytes).await?;
        debug!("Wrote {} ({} bytes, {})", path, bytes.len(), mime);
        Ok(WriteOutcome::Written)
    }
}
