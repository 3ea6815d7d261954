// src/application/commands/collection_commands.rs
//
// Collection Command Handlers

use log::info;

use crate::application::dto::{CollectionDto, LoadedCollectionDto, RecordSeedDto};
use crate::application::state::AppState;
use crate::domain::{validate_collection, validate_record, Collection, Record};
use crate::error::AppResult;

/// List all collections
pub fn list_collections(state: &AppState) -> AppResult<Vec<CollectionDto>> {
    let collections = state.collections.list_all()?;
    Ok(collections.into_iter().map(CollectionDto::from).collect())
}

/// Create a collection and fill it from a JSON array of record seeds.
///
/// Every record is validated before anything is written.
pub fn load_collection(
    state: &AppState,
    seeds_json: &str,
    label: &str,
    document_kind: &str,
) -> AppResult<LoadedCollectionDto> {
    let seeds: Vec<RecordSeedDto> = serde_json::from_str(seeds_json)?;

    let collection = Collection::new(label.trim().to_string(), document_kind.trim().to_string());
    validate_collection(&collection)?;

    let records: Vec<Record> = seeds
        .into_iter()
        .map(|seed| seed.into_record(collection.id))
        .collect();
    for record in &records {
        validate_record(record)?;
    }

    state.collections.save(&collection)?;
    for record in &records {
        state.records.save(record)?;
    }

    info!("Loaded {} records into {}", records.len(), collection);

    Ok(LoadedCollectionDto {
        collection: CollectionDto::from(collection),
        records_loaded: records.len(),
    })
}
