// src/infrastructure/mod.rs
//
// Infrastructure Layer
//
// Contains implementation details that support the domain
// but are not part of the domain itself.
//
// RULES:
// - Infrastructure serves the domain
// - Infrastructure never dictates domain behavior
// - Infrastructure is replaceable

pub mod asset_path;
pub mod asset_store;
pub mod local_asset_store;
pub mod memory_asset_store;

pub use asset_path::normalize_relative_path;
pub use asset_store::{AssetStore, CreateOutcome, DirectoryListing, WriteOutcome};
pub use local_asset_store::LocalAssetStore;
pub use memory_asset_store::{InMemoryAssetStore, StoredFile};

#[cfg(test)]
pub use asset_store::MockAssetStore;
