//! Critical Collection Invariants:
//!
//! 1. Collections only group records; they never rename them
//! 2. A locked collection refuses record writes until unlocked
//! 3. Collection label cannot be empty
//! 4. Document kind cannot be empty (folders are matched by kind)

pub mod entity;

pub use entity::{Collection, Folder};

use crate::domain::{DomainError, DomainResult};

/// Validates Collection invariants
pub fn validate_collection(collection: &Collection) -> DomainResult<()> {
    if collection.label.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Collection label cannot be empty".to_string(),
        ));
    }
    if collection.document_kind.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Collection document kind cannot be empty".to_string(),
        ));
    }
    Ok(())
}
