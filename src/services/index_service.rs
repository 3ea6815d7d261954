// src/services/index_service.rs
//
// Candidate Index Builder
//
// Walks an asset-store subtree once and builds the three lookup tables the
// resolver reads.
//
// CRITICAL RULES:
// - The root listing failing is fatal; no partial index is returned
// - Nested directories that cannot be listed are skipped with a warning
// - Traversal is depth-first in listing order (first-wins tables depend on it)
// - Only files passing the extension filter are indexed; never directories

use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::{CandidateIndex, CandidatePath, ExtensionFilter};
use crate::error::AppResult;
use crate::events::{CandidatePoolIndexed, EventBus};
use crate::infrastructure::{normalize_relative_path, AssetStore, DirectoryListing};

pub struct CandidateIndexBuilder {
    store: Arc<dyn AssetStore>,
    event_bus: Arc<EventBus>,
}

impl CandidateIndexBuilder {
    pub fn new(store: Arc<dyn AssetStore>, event_bus: Arc<EventBus>) -> Self {
        Self { store, event_bus }
    }

    /// Index every allowed file under `root`.
    ///
    /// With `recursive = false` only the immediate children of `root` are
    /// considered.
    pub async fn build(
        &self,
        root: &str,
        recursive: bool,
        filter: &ExtensionFilter,
    ) -> AppResult<CandidateIndex> {
        let root = normalize_relative_path(root);
        let files = self.collect_files(&root, recursive).await?;
        let files_seen = files.len();

        let index: CandidateIndex = files
            .into_iter()
            .filter(|path| filter.allows(path))
            .map(CandidatePath::new)
            .collect();

        info!(
            "Indexed {} of {} files under '{}' (recursive: {}, extensions: {})",
            index.len(),
            files_seen,
            root,
            recursive,
            filter
        );

        self.event_bus.emit(CandidatePoolIndexed::new(
            root,
            recursive,
            files_seen,
            index.len(),
        ));

        Ok(index)
    }

    async fn collect_files(&self, root: &str, recursive: bool) -> AppResult<Vec<String>> {
        let mut files = Vec::new();
        let mut pending: Vec<String> = Vec::new();

        let listing = self.store.list(root).await?;
        Self::absorb(listing, recursive, &mut files, &mut pending);

        while let Some(dir) = pending.pop() {
            match self.store.list(&dir).await {
                Ok(listing) => Self::absorb(listing, recursive, &mut files, &mut pending),
                Err(e) => warn!("Skipping unreadable folder '{}': {}", dir, e),
            }
        }

        Ok(files)
    }

    /// Take a directory's files, and queue its subdirectories so that the
    /// first listed one is visited next.
    fn absorb(
        listing: DirectoryListing,
        recursive: bool,
        files: &mut Vec<String>,
        pending: &mut Vec<String>,
    ) {
        debug!(
            "Listed {} files, {} folders",
            listing.files.len(),
            listing.dirs.len()
        );
        files.extend(listing.files);
        if recursive {
            pending.extend(listing.dirs.into_iter().rev());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::infrastructure::{InMemoryAssetStore, MockAssetStore};

    fn builder(store: impl AssetStore + 'static) -> (CandidateIndexBuilder, Arc<EventBus>) {
        let bus = Arc::new(EventBus::new());
        (CandidateIndexBuilder::new(Arc::new(store), bus.clone()), bus)
    }

    fn pool() -> InMemoryAssetStore {
        InMemoryAssetStore::with_files([
            ("art/goblin-warrior.webp", vec![]),
            ("art/readme.txt", vec![]),
            ("art/Shadow Hound.PNG", vec![]),
            ("art/deep/goblin_warrior.png", vec![]),
            ("art/deep/thewitch.png", vec![]),
        ])
    }

    #[tokio::test]
    async fn test_recursive_build_filters_extensions() {
        let (builder, bus) = builder(pool());
        let index = builder
            .build("art", true, &ExtensionFilter::default())
            .await
            .unwrap();

        assert_eq!(index.len(), 4);
        assert!(index.by_slug("shadow-hound").is_some());
        assert!(index.by_condensed_slug("thewitch").is_some());
        assert_eq!(bus.get_event_log()[0].event_type, "CandidatePoolIndexed");
    }

    #[tokio::test]
    async fn test_non_recursive_only_reads_immediate_children() {
        let (builder, _) = builder(pool());
        let index = builder
            .build("art", false, &ExtensionFilter::default())
            .await
            .unwrap();

        assert_eq!(index.len(), 2);
        assert!(index.by_condensed_slug("thewitch").is_none());
    }

    #[tokio::test]
    async fn test_first_listed_file_wins_slug_tables() {
        let (builder, _) = builder(pool());
        let index = builder
            .build("art", true, &ExtensionFilter::default())
            .await
            .unwrap();

        // Parent folder files are listed before nested ones.
        assert_eq!(
            index.by_slug("goblin-warrior").unwrap().as_str(),
            "art/goblin-warrior.webp"
        );
        assert_eq!(
            index.by_condensed_slug("goblinwarrior").unwrap().as_str(),
            "art/goblin-warrior.webp"
        );
    }

    #[tokio::test]
    async fn test_missing_root_is_fatal() {
        let (builder, _) = builder(pool());
        let err = builder
            .build("nowhere", true, &ExtensionFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Browse { .. }));
    }

    #[tokio::test]
    async fn test_unreadable_subfolder_is_skipped() {
        let mut store = MockAssetStore::new();
        store.expect_list().returning(|path| match path {
            "art" => Ok(DirectoryListing {
                files: vec!["art/goblin.webp".into()],
                dirs: vec!["art/locked".into(), "art/open".into()],
            }),
            "art/open" => Ok(DirectoryListing {
                files: vec!["art/open/witch.png".into()],
                dirs: vec![],
            }),
            other => Err(AppError::browse(other, "permission denied")),
        });

        let (builder, _) = builder(store);
        let index = builder
            .build("art", true, &ExtensionFilter::default())
            .await
            .unwrap();

        assert_eq!(index.len(), 2);
        assert!(index.by_slug("witch").is_some());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_linked_folders_do_not_hide_images_on_disk() {
        use crate::infrastructure::LocalAssetStore;
        use std::os::unix::fs::symlink;

        let dir = tempfile::TempDir::new().unwrap();
        let art = dir.path().join("art");
        std::fs::create_dir_all(art.join("deep")).unwrap();
        std::fs::write(art.join("goblin.png"), b"g").unwrap();
        std::fs::write(art.join("deep/witch.webp"), b"w").unwrap();
        symlink(art.join("missing.png"), art.join("stale.png")).unwrap();
        symlink(&art, art.join("loop1")).unwrap();
        symlink(&art, art.join("deep/up")).unwrap();

        let (builder, _) = builder(LocalAssetStore::new(dir.path()));
        let index = builder
            .build("art", true, &ExtensionFilter::default())
            .await
            .unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.by_slug("goblin").unwrap().as_str(), "art/goblin.png");
        assert_eq!(index.by_slug("witch").unwrap().as_str(), "art/deep/witch.webp");
    }
}
