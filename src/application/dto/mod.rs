// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are front-end friendly representations
// - DTOs are simple, serializable structs
// - Seeds convert TO domain entities only through validated constructors

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Collection, ImageSlot, Record};

// ============================================================================
// COLLECTION DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDto {
    pub id: String,
    pub label: String,
    pub document_kind: String,
    pub locked: bool,
    pub created_at: String,
}

impl From<Collection> for CollectionDto {
    fn from(collection: Collection) -> Self {
        Self {
            id: collection.id.to_string(),
            label: collection.label,
            document_kind: collection.document_kind,
            locked: collection.locked,
            created_at: collection.created_at.to_rfc3339(),
        }
    }
}

/// Result of seeding a collection from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedCollectionDto {
    pub collection: CollectionDto,
    pub records_loaded: usize,
}

// ============================================================================
// RECORD DTOs
// ============================================================================

fn default_true() -> bool {
    true
}

/// One record of a seed file.
///
/// ```json
/// [{ "name": "Goblin Warrior", "img": "icons/svg/mystery-man.svg", "system_slug": "goblin" }]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSeedDto {
    pub name: String,

    #[serde(default, alias = "img")]
    pub image: Option<String>,

    /// Whether the record type has an image attribute at all
    #[serde(default = "default_true")]
    pub image_supported: bool,

    #[serde(default)]
    pub system_slug: Option<String>,

    #[serde(default)]
    pub module_slug: Option<String>,
}

impl RecordSeedDto {
    pub fn into_record(self, collection_id: Uuid) -> Record {
        Record::new(
            Some(collection_id),
            self.name,
            ImageSlot::from_parts(self.image_supported, self.image),
        )
        .with_aliases(self.system_slug, self.module_slug)
    }
}
