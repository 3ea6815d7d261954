// src/services/extraction_service.rs
//
// Archive Extraction Pipeline
//
// Unpacks an in-memory zip archive into an asset-store subtree.
//
// CRITICAL RULES:
// - A malformed archive fails before anything is written
// - Entries are processed sequentially, in archive order
// - One bad entry never stops the others (continue-on-error)
// - Partial writes are not rolled back
// - Progress is reported after every non-directory entry
// - Quiet mode silences per-entry notices only; the summary event is always emitted

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Read};
use std::sync::Arc;
use zip::ZipArchive;

use crate::domain::keys::extension_of;
use crate::error::{AppError, AppResult};
use crate::events::{ArchiveEntryFailed, ArchiveEntryWritten, ArchiveExtracted, EventBus};
use crate::infrastructure::asset_path::{ancestors, join, parent};
use crate::infrastructure::{normalize_relative_path, AssetStore, WriteOutcome};

/// Upper bound on the buffer reserved up front for one entry.
const MAX_PREALLOCATION: u64 = 16 << 20;

// ============================================================================
// JOB & SUMMARY
// ============================================================================

/// One extraction request. The archive bytes are never modified.
#[derive(Debug, Clone)]
pub struct ExtractionJob {
    pub archive: Arc<[u8]>,
    pub destination: String,
    pub overwrite: bool,
    pub quiet: bool,
}

impl ExtractionJob {
    pub fn new(archive: impl Into<Arc<[u8]>>, destination: impl Into<String>) -> Self {
        Self {
            archive: archive.into(),
            destination: destination.into(),
            overwrite: true,
            quiet: false,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

/// Counters of a finished extraction. `written + skipped + failed == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
}

/// MIME type for a file name, by extension.
pub fn guess_mime_type(file_name: &str) -> &'static str {
    match extension_of(file_name).as_deref() {
        Some("webp") => "image/webp",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webm") => "video/webm",
        Some("mp4") => "video/mp4",
        Some("ogg") => "audio/ogg",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

enum EntryOutcome {
    Written(String),
    Kept(String),
    Skipped,
}

// ============================================================================
// EXTRACTOR
// ============================================================================

pub struct ArchiveExtractor {
    store: Arc<dyn AssetStore>,
    event_bus: Arc<EventBus>,
}

impl ArchiveExtractor {
    pub fn new(store: Arc<dyn AssetStore>, event_bus: Arc<EventBus>) -> Self {
        Self { store, event_bus }
    }

    /// Unpack `job.archive` under `job.destination`.
    ///
    /// `on_progress(done, total)` is called after every file entry.
    pub async fn extract<F>(
        &self,
        job: &ExtractionJob,
        mut on_progress: F,
    ) -> AppResult<ExtractionSummary>
    where
        F: FnMut(usize, usize),
    {
        let mut archive = ZipArchive::new(Cursor::new(&job.archive[..]))?;

        let file_indices: Vec<usize> = (0..archive.len())
            .filter(|&i| archive.by_index_raw(i).map(|e| !e.is_dir()).unwrap_or(true))
            .collect();

        let destination = normalize_relative_path(&job.destination);
        let mut summary = ExtractionSummary {
            total: file_indices.len(),
            ..Default::default()
        };

        info!(
            "Extracting {} entries into '{}' (overwrite: {})",
            summary.total, destination, job.overwrite
        );

        self.ensure_directory(&destination).await?;

        for (done, idx) in file_indices.into_iter().enumerate() {
            let done = done + 1;
            let (entry_name, bytes) = match Self::read_entry(&mut archive, idx) {
                Ok(entry) => entry,
                Err(e) => {
                    self.record_failure(job, &mut summary, format!("#{}", idx), done, e);
                    on_progress(done, summary.total);
                    continue;
                }
            };

            match self
                .write_entry(&destination, &entry_name, &bytes, job.overwrite)
                .await
            {
                Ok(EntryOutcome::Written(path)) => {
                    summary.written += 1;
                    if !job.quiet {
                        debug!("Wrote {}", path);
                        self.event_bus
                            .emit(ArchiveEntryWritten::new(path, done, summary.total, true));
                    }
                }
                Ok(EntryOutcome::Kept(path)) => {
                    summary.skipped += 1;
                    if !job.quiet {
                        debug!("Kept existing {}", path);
                        self.event_bus
                            .emit(ArchiveEntryWritten::new(path, done, summary.total, false));
                    }
                }
                Ok(EntryOutcome::Skipped) => {
                    summary.skipped += 1;
                    if !job.quiet {
                        debug!("Skipped entry '{}' (empty path)", entry_name);
                    }
                }
                Err(e) => self.record_failure(job, &mut summary, entry_name, done, e),
            }

            on_progress(done, summary.total);
        }

        info!(
            "Extracted into '{}': {} written, {} skipped, {} failed",
            destination, summary.written, summary.skipped, summary.failed
        );

        self.event_bus.emit(ArchiveExtracted::new(
            destination,
            summary.total,
            summary.written,
            summary.skipped,
            summary.failed,
        ));

        Ok(summary)
    }

    /// Create `path` and every ancestor under the store root.
    /// Existing directories count as success.
    pub async fn ensure_directory(&self, path: &str) -> AppResult<()> {
        for dir in ancestors(&normalize_relative_path(path)) {
            self.store.create_directory(&dir).await?;
        }
        Ok(())
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    fn read_entry(
        archive: &mut ZipArchive<Cursor<&[u8]>>,
        idx: usize,
    ) -> AppResult<(String, Vec<u8>)> {
        let mut entry = archive.by_index(idx)?;
        let name = entry.name().to_string();
        let mut bytes = Vec::with_capacity(allocation_hint(entry.size()));
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| AppError::Extraction(format!("{}: {}", name, e)))?;
        Ok((name, bytes))
    }

    async fn write_entry(
        &self,
        destination: &str,
        entry_name: &str,
        bytes: &[u8],
        overwrite: bool,
    ) -> AppResult<EntryOutcome> {
        let relative = normalize_relative_path(entry_name);
        if relative.is_empty() {
            return Ok(EntryOutcome::Skipped);
        }

        let path = join(destination, &relative);
        if let Some(dir) = parent(&path) {
            self.ensure_directory(dir).await?;
        }

        let outcome = self
            .store
            .write_file(&path, bytes, guess_mime_type(&path), overwrite)
            .await?;

        Ok(match outcome {
            WriteOutcome::Written => EntryOutcome::Written(path),
            WriteOutcome::Kept => EntryOutcome::Kept(path),
        })
    }

    fn record_failure(
        &self,
        job: &ExtractionJob,
        summary: &mut ExtractionSummary,
        entry_name: String,
        done: usize,
        error: AppError,
    ) {
        summary.failed += 1;
        warn!("Failed to extract '{}': {}", entry_name, error);
        if !job.quiet {
            self.event_bus.emit(ArchiveEntryFailed::new(
                entry_name,
                done,
                summary.total,
                error.to_string(),
            ));
        }
    }
}

/// Declared entry sizes come from the archive header and are not trusted.
fn allocation_hint(declared: u64) -> usize {
    declared.min(MAX_PREALLOCATION) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{
        CreateOutcome, InMemoryAssetStore, LocalAssetStore, MockAssetStore,
    };
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        for (name, bytes) in entries {
            if name.ends_with('/') {
                writer.add_directory(*name, options).unwrap();
            } else {
                writer.start_file(*name, options).unwrap();
                writer.write_all(bytes).unwrap();
            }
        }
        writer.finish().unwrap().into_inner()
    }

    fn extractor(store: Arc<dyn AssetStore>) -> (ArchiveExtractor, Arc<EventBus>) {
        let bus = Arc::new(EventBus::new());
        (ArchiveExtractor::new(store, bus.clone()), bus)
    }

    #[tokio::test]
    async fn test_extracts_all_entries_at_normalized_paths() {
        let store = Arc::new(InMemoryAssetStore::new());
        let (extractor, _) = extractor(store.clone());
        let archive = build_zip(&[
            ("monsters/", b""),
            ("monsters/goblin.webp", b"gob"),
            ("monsters\\orc.png", b"orc"),
            ("../escape.txt", b"nope"),
        ]);

        let mut progress = Vec::new();
        let summary = extractor
            .extract(&ExtractionJob::new(archive, "assets/art"), |done, total| {
                progress.push((done, total))
            })
            .await
            .unwrap();

        assert_eq!(
            summary,
            ExtractionSummary { written: 3, skipped: 0, failed: 0, total: 3 }
        );
        assert_eq!(progress, vec![(1, 3), (2, 3), (3, 3)]);
        assert_eq!(
            store.file_paths(),
            vec![
                "assets/art/escape.txt",
                "assets/art/monsters/goblin.webp",
                "assets/art/monsters/orc.png",
            ]
        );
        let goblin = store.read("assets/art/monsters/goblin.webp").unwrap();
        assert_eq!(goblin.bytes, b"gob");
        assert_eq!(goblin.mime, "image/webp");
    }

    #[tokio::test]
    async fn test_no_overwrite_keeps_existing_bytes() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = Arc::new(LocalAssetStore::new(dir.path()));
        let (extractor, _) = extractor(store);

        let first = build_zip(&[("a.png", b"one"), ("b.png", b"two")]);
        extractor
            .extract(&ExtractionJob::new(first, "dest"), |_, _| {})
            .await
            .unwrap();

        let second = build_zip(&[("a.png", b"changed"), ("b.png", b"changed")]);
        let summary = extractor
            .extract(&ExtractionJob::new(second, "dest").overwrite(false), |_, _| {})
            .await
            .unwrap();

        assert_eq!(summary.written, 0);
        assert_eq!(summary.skipped, 2);
        assert_eq!(std::fs::read(dir.path().join("dest/a.png")).unwrap(), b"one");
        assert_eq!(std::fs::read(dir.path().join("dest/b.png")).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_malformed_archive_writes_nothing() {
        let store = Arc::new(InMemoryAssetStore::new());
        let (extractor, bus) = extractor(store.clone());

        let err = extractor
            .extract(&ExtractionJob::new(b"not a zip".to_vec(), "dest"), |_, _| {})
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Extraction(_)));
        assert!(!store.has_directory("dest"));
        assert!(bus.get_event_log().is_empty());
    }

    #[tokio::test]
    async fn test_empty_archive_still_creates_destination() {
        let store = Arc::new(InMemoryAssetStore::new());
        let (extractor, _) = extractor(store.clone());

        let summary = extractor
            .extract(&ExtractionJob::new(build_zip(&[]), "a/b"), |_, _| {})
            .await
            .unwrap();

        assert_eq!(summary.total, 0);
        assert!(store.has_directory("a/b"));
    }

    #[tokio::test]
    async fn test_write_failure_continues_with_remaining_entries() {
        let mut store = MockAssetStore::new();
        store
            .expect_create_directory()
            .returning(|_| Ok(CreateOutcome::AlreadyExists));
        store
            .expect_write_file()
            .returning(|path, _, _, _| {
                if path.ends_with("bad.png") {
                    Err(AppError::Other("disk full".into()))
                } else {
                    Ok(WriteOutcome::Written)
                }
            });

        let (extractor, bus) = extractor(Arc::new(store));
        let archive = build_zip(&[("good.png", b"1"), ("bad.png", b"2"), ("also-good.png", b"3")]);

        let mut last = (0, 0);
        let summary = extractor
            .extract(&ExtractionJob::new(archive, "dest"), |d, t| last = (d, t))
            .await
            .unwrap();

        assert_eq!(summary.written, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(last, (3, 3));
        let failures = bus
            .get_event_log()
            .into_iter()
            .filter(|e| e.event_type == "ArchiveEntryFailed")
            .count();
        assert_eq!(failures, 1);
    }

    #[tokio::test]
    async fn test_quiet_emits_only_summary_event() {
        let store = Arc::new(InMemoryAssetStore::new());
        let (extractor, bus) = extractor(store);
        let archive = build_zip(&[("a.png", b"1"), ("b.png", b"2")]);

        extractor
            .extract(&ExtractionJob::new(archive, "dest").quiet(true), |_, _| {})
            .await
            .unwrap();

        let types: Vec<String> = bus.get_event_log().into_iter().map(|e| e.event_type).collect();
        assert_eq!(types, vec!["ArchiveExtracted"]);
    }

    #[test]
    fn test_declared_entry_size_is_capped() {
        assert_eq!(allocation_hint(1024), 1024);
        assert_eq!(allocation_hint(u64::MAX), MAX_PREALLOCATION as usize);
    }

    #[tokio::test]
    async fn test_inflated_size_header_still_extracts() {
        let mut archive = {
            let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
            let options =
                FileOptions::default().compression_method(zip::CompressionMethod::Stored);
            writer.start_file("goblin.webp", options).unwrap();
            writer.write_all(b"goblin").unwrap();
            writer.finish().unwrap().into_inner()
        };
        // Claim a 4 GiB uncompressed size in the central directory
        let central = archive
            .windows(4)
            .position(|w| w == [0x50, 0x4b, 0x01, 0x02])
            .unwrap();
        archive[central + 24..central + 28].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());

        let store = Arc::new(InMemoryAssetStore::new());
        let extractor = ArchiveExtractor::new(store.clone(), Arc::new(EventBus::new()));
        let summary = extractor
            .extract(&ExtractionJob::new(archive, "art"), |_, _| {})
            .await
            .unwrap();

        assert_eq!(summary.written, 1);
        assert_eq!(store.read("art/goblin.webp").unwrap().bytes, b"goblin");
    }

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type("art/Goblin.WEBP"), "image/webp");
        assert_eq!(guess_mime_type("a.jpeg"), "image/jpeg");
        assert_eq!(guess_mime_type("a.jpg"), "image/jpeg");
        assert_eq!(guess_mime_type("icon.svg"), "image/svg+xml");
        assert_eq!(guess_mime_type("theme.mp3"), "audio/mpeg");
        assert_eq!(guess_mime_type("data.json"), "application/json");
        assert_eq!(guess_mime_type("noext"), "application/octet-stream");
        assert_eq!(guess_mime_type("archive.tar.gz"), "application/octet-stream");
    }
}
