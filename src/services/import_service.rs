// src/services/import_service.rs
//
// Image Import Service - Orchestrator
//
// index build → fetch records → resolve all → optionally apply → report
//
// CRITICAL RULES:
// - Dry run (the default) never writes to the record store
// - Only MatchedNew results are applied
// - One failing record never aborts the batch
// - A collection unlocked for the apply phase is re-locked on every exit path
// - Each run produces a fresh RunReport

use log::{error, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use super::index_service::CandidateIndexBuilder;
use super::match_resolver::MatchResolver;
use crate::domain::candidate::DEFAULT_EXTENSIONS;
use crate::domain::{Collection, ExtensionFilter, MatchResult, Record, RunMode, RunReport};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, MatchRunCompleted, RecordUpdateFailed, RecordUpdated};
use crate::infrastructure::AssetStore;
use crate::repositories::{CollectionRepository, RecordRepository};

pub const DEFAULT_WORLD_FOLDER: &str = "Daggerheart Imports";

// ============================================================================
// REQUEST TYPES
// ============================================================================

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub collection_id: Uuid,
    pub folder: String,
    pub recursive: bool,
    pub extensions: ExtensionFilter,
    pub dry_run: bool,
    pub promote_first: bool,
    pub world_folder: String,
}

impl ImportOptions {
    /// Options with the defaults of an interactive run: recursive, common
    /// image extensions, dry run, update in place.
    pub fn new(collection_id: Uuid, folder: impl Into<String>) -> Self {
        Self {
            collection_id,
            folder: folder.into(),
            recursive: true,
            extensions: ExtensionFilter::new(DEFAULT_EXTENSIONS.iter().copied()),
            dry_run: true,
            promote_first: false,
            world_folder: DEFAULT_WORLD_FOLDER.to_string(),
        }
    }

    pub fn mode(&self) -> RunMode {
        if self.dry_run {
            RunMode::DryRun
        } else {
            RunMode::Applied
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ApplyOutcome {
    updated: usize,
    failed: usize,
}

// ============================================================================
// LOCK GUARD
// ============================================================================

/// Unlocks a locked collection for the lifetime of the guard.
struct CollectionUnlock<'a> {
    collections: &'a dyn CollectionRepository,
    collection_id: Uuid,
    relock: bool,
}

impl<'a> CollectionUnlock<'a> {
    fn acquire(collections: &'a dyn CollectionRepository, collection: &Collection) -> AppResult<Self> {
        if collection.locked {
            collections.set_locked(collection.id, false)?;
            info!("Unlocked collection {} for update", collection);
        }
        Ok(Self {
            collections,
            collection_id: collection.id,
            relock: collection.locked,
        })
    }
}

impl Drop for CollectionUnlock<'_> {
    fn drop(&mut self) {
        if !self.relock {
            return;
        }
        match self.collections.set_locked(self.collection_id, true) {
            Ok(()) => info!("Re-locked collection {}", self.collection_id),
            Err(e) => error!("Failed to re-lock collection {}: {}", self.collection_id, e),
        }
    }
}

// ============================================================================
// IMAGE IMPORT SERVICE
// ============================================================================

pub struct ImageImportService {
    collections: Arc<dyn CollectionRepository>,
    records: Arc<dyn RecordRepository>,
    index_builder: CandidateIndexBuilder,
    resolver: MatchResolver,
    event_bus: Arc<EventBus>,
}

impl ImageImportService {
    pub fn new(
        collections: Arc<dyn CollectionRepository>,
        records: Arc<dyn RecordRepository>,
        store: Arc<dyn AssetStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            collections,
            records,
            index_builder: CandidateIndexBuilder::new(store, event_bus.clone()),
            resolver: MatchResolver::new(event_bus.clone()),
            event_bus,
        }
    }

    /// Match every record of a collection against the image folder and,
    /// unless `dry_run`, write the new image paths.
    pub async fn run(&self, options: &ImportOptions) -> AppResult<RunReport> {
        let collection = self
            .collections
            .get_by_id(options.collection_id)?
            .ok_or_else(|| AppError::CollectionNotFound(options.collection_id.to_string()))?;

        let index = self
            .index_builder
            .build(&options.folder, options.recursive, &options.extensions)
            .await?;
        if index.is_empty() {
            return Err(AppError::NoCandidateFiles(options.folder.clone()));
        }

        let records = self.records.list_by_collection(collection.id)?;
        if records.is_empty() {
            return Err(AppError::EmptyCollection(collection.label.clone()));
        }

        let results = self.resolver.resolve_all(&records, &index);
        let mut report = RunReport::new(
            collection.id,
            collection.label.clone(),
            options.folder.clone(),
            options.mode(),
            options.promote_first,
            results,
        );

        info!(
            "{}: {} records scanned, {} to update ({})",
            collection, report.summary.scanned, report.summary.matched, report.mode
        );

        if !options.dry_run && report.summary.matched > 0 {
            let outcome = {
                let pending: Vec<(&Record, &MatchResult)> = records
                    .iter()
                    .zip(report.results.iter())
                    .filter(|(_, result)| result.needs_update())
                    .collect();

                if options.promote_first {
                    self.apply_promoted(&collection, &options.world_folder, &pending)
                } else {
                    self.apply_in_place(&collection, &pending)?
                }
            };

            report.summary.updated = outcome.updated;
            report.summary.failed_updates = outcome.failed;
        }

        self.event_bus.emit(MatchRunCompleted::new(
            collection.id,
            options.folder.clone(),
            report.mode,
            report.summary,
        ));

        Ok(report)
    }

    // ========================================================================
    // APPLY PHASE
    // ========================================================================

    fn apply_in_place(
        &self,
        collection: &Collection,
        pending: &[(&Record, &MatchResult)],
    ) -> AppResult<ApplyOutcome> {
        let _unlock = CollectionUnlock::acquire(self.collections.as_ref(), collection)?;
        let mut outcome = ApplyOutcome::default();

        for (record, result) in pending {
            let Some(path) = result.resolved_path.as_ref() else {
                continue;
            };
            match self.records.update_image(record.id, path.as_str()) {
                Ok(()) => {
                    outcome.updated += 1;
                    self.event_bus.emit(RecordUpdated::new(
                        record.id,
                        record.name.clone(),
                        path.to_string(),
                        None,
                    ));
                }
                Err(e) => self.record_failure(&mut outcome, record, e),
            }
        }

        Ok(outcome)
    }

    fn apply_promoted(
        &self,
        collection: &Collection,
        world_folder: &str,
        pending: &[(&Record, &MatchResult)],
    ) -> ApplyOutcome {
        let folder_name = match world_folder.trim() {
            "" => DEFAULT_WORLD_FOLDER,
            name => name,
        };
        let folder_id = match self
            .collections
            .ensure_folder(folder_name, &collection.document_kind)
        {
            Ok(folder) => Some(folder.id),
            Err(e) => {
                warn!("Failed to ensure world folder '{}': {}", folder_name, e);
                None
            }
        };

        let mut outcome = ApplyOutcome::default();
        for (record, result) in pending {
            let Some(path) = result.resolved_path.as_ref() else {
                continue;
            };
            let imported = self
                .records
                .import_into_world(record, folder_id)
                .and_then(|copy| {
                    self.records.update_image(copy.id, path.as_str())?;
                    Ok(copy)
                });
            match imported {
                Ok(copy) => {
                    outcome.updated += 1;
                    self.event_bus.emit(RecordUpdated::new(
                        record.id,
                        record.name.clone(),
                        path.to_string(),
                        Some(copy.id),
                    ));
                }
                Err(e) => self.record_failure(&mut outcome, record, e),
            }
        }
        outcome
    }

    fn record_failure(&self, outcome: &mut ApplyOutcome, record: &Record, cause: AppError) {
        outcome.failed += 1;
        let err = AppError::record_update(record.name.clone(), cause);
        error!("{}", err);
        self.event_bus.emit(RecordUpdateFailed::new(
            record.id,
            record.name.clone(),
            err.to_string(),
        ));
    }
}
