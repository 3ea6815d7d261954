// src/domain/record/entity.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named document held by the record store (a creature, an item, ...).
///
/// The matching engine only reads the names and proposes a new image path.
/// Persistence is the record store's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Owning collection; `None` means the record lives in the primary (world) store
    pub collection_id: Option<Uuid>,

    /// Primary display name
    pub name: String,

    /// The image attribute the resolver may propose a value for
    pub image: ImageSlot,

    /// Optional alias carried by the record's system data
    pub system_slug: Option<String>,

    /// Optional alias carried by module-specific flags
    pub module_slug: Option<String>,

    /// Folder the record is filed under, if any
    pub folder_id: Option<Uuid>,

    /// For imported copies: the record this one was imported from
    pub source_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// State of a record's image attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "path", rename_all = "snake_case")]
pub enum ImageSlot {
    /// The record's schema has no image attribute at all
    Unsupported,

    /// Supported but not set
    Empty,

    /// Currently pointing at a path
    Set(String),
}

impl ImageSlot {
    pub fn from_parts(supported: bool, path: Option<String>) -> Self {
        match (supported, path) {
            (false, _) => ImageSlot::Unsupported,
            (true, Some(p)) if !p.is_empty() => ImageSlot::Set(p),
            (true, _) => ImageSlot::Empty,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ImageSlot::Unsupported)
    }

    pub fn current(&self) -> Option<&str> {
        match self {
            ImageSlot::Set(p) => Some(p.as_str()),
            _ => None,
        }
    }
}

/// Read access to the names a record can be matched by.
///
/// Absent aliases yield nothing; reading them never fails.
pub trait AliasSource {
    fn primary_name(&self) -> &str;

    fn aliases(&self) -> Vec<&str>;
}

impl AliasSource for Record {
    fn primary_name(&self) -> &str {
        &self.name
    }

    fn aliases(&self) -> Vec<&str> {
        [self.system_slug.as_deref(), self.module_slug.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl Record {
    /// Create a new record owned by a collection
    pub fn new(collection_id: Option<Uuid>, name: String, image: ImageSlot) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            collection_id,
            name,
            image,
            system_slug: None,
            module_slug: None,
            folder_id: None,
            source_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_aliases(mut self, system_slug: Option<String>, module_slug: Option<String>) -> Self {
        self.system_slug = system_slug;
        self.module_slug = module_slug;
        self
    }

    /// Copy of this record placed in the primary store.
    pub fn imported_copy(&self) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            collection_id: None,
            source_id: Some(self.id),
            folder_id: None,
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }

    pub fn set_image(&mut self, path: String) {
        self.image = ImageSlot::Set(path);
        self.updated_at = Utc::now();
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
