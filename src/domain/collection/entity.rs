// src/domain/collection/entity.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named collection of records (a compendium).
/// Collections can be locked by their owner; writes require unlocking first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Display label
    pub label: String,

    /// Kind of document held (e.g. "Actor", "Item")
    pub document_kind: String,

    /// Whether writes are currently refused
    pub locked: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Collection {
    /// Create a new unlocked Collection
    pub fn new(label: String, document_kind: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            label,
            document_kind,
            locked: false,
            created_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.document_kind, self.label)
    }
}

/// A folder in the primary store that imported records are filed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: Uuid,
    pub name: String,
    pub document_kind: String,
    pub created_at: DateTime<Utc>,
}

impl Folder {
    pub fn new(name: String, document_kind: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            document_kind,
            created_at: Utc::now(),
        }
    }
}
