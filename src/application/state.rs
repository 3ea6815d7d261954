// src/application/state.rs
//
// Application state: every service wired once at startup.
// All fields are Arc-wrapped so commands can share them.

use log::info;
use std::sync::Arc;

use super::config::{AppConfig, JsonSettingsStore, SettingsStore};
use crate::db::{
    create_connection_pool, get_connection, initialize_database, verify_database_integrity,
};
use crate::error::AppResult;
use crate::events::{create_event_bus, EventBus};
use crate::infrastructure::{AssetStore, LocalAssetStore};
use crate::repositories::{
    CollectionRepository, RecordRepository, SqliteCollectionRepository, SqliteRecordRepository,
};
use crate::services::{ArchiveExtractor, ImageImportService};

pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub collections: Arc<dyn CollectionRepository>,
    pub records: Arc<dyn RecordRepository>,
    pub store: Arc<dyn AssetStore>,
    pub settings: Arc<dyn SettingsStore>,
    pub import_service: Arc<ImageImportService>,
    pub extractor: Arc<ArchiveExtractor>,
}

impl AppState {
    /// Open the database, apply the schema, check integrity and wire the
    /// services.
    pub fn initialize(config: &AppConfig) -> AppResult<Self> {
        let pool = Arc::new(create_connection_pool(&config.database_path)?);
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
            verify_database_integrity(&conn)?;
        }
        info!("Record store ready at {}", config.database_path.display());

        let collections: Arc<dyn CollectionRepository> =
            Arc::new(SqliteCollectionRepository::new(pool.clone()));
        let records: Arc<dyn RecordRepository> = Arc::new(SqliteRecordRepository::new(pool));
        let store: Arc<dyn AssetStore> = Arc::new(LocalAssetStore::new(&config.assets_root));
        let settings: Arc<dyn SettingsStore> =
            Arc::new(JsonSettingsStore::new(&config.settings_path));

        Ok(Self::from_parts(collections, records, store, settings))
    }

    /// Wire services over already-built collaborators.
    pub fn from_parts(
        collections: Arc<dyn CollectionRepository>,
        records: Arc<dyn RecordRepository>,
        store: Arc<dyn AssetStore>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        let event_bus = Arc::new(create_event_bus());

        let import_service = Arc::new(ImageImportService::new(
            collections.clone(),
            records.clone(),
            store.clone(),
            event_bus.clone(),
        ));
        let extractor = Arc::new(ArchiveExtractor::new(store.clone(), event_bus.clone()));

        Self {
            event_bus,
            collections,
            records,
            store,
            settings,
            import_service,
            extractor,
        }
    }
}
