// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO event emission
// - NO cross-repository calls
// - Explicit SQL only

pub mod collection_repository;
pub mod record_repository;
mod sql;

pub use collection_repository::{CollectionRepository, SqliteCollectionRepository};
pub use record_repository::{RecordRepository, SqliteRecordRepository};

#[cfg(test)]
pub use collection_repository::MockCollectionRepository;
#[cfg(test)]
pub use record_repository::MockRecordRepository;
