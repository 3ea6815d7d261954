// src/repositories/record_repository.rs

use chrono::Utc;
use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use super::sql::{optional_uuid_column, timestamp_column, uuid_column};
use crate::db::ConnectionPool;
use crate::domain::{ImageSlot, Record};
use crate::error::{AppError, AppResult};

const RECORD_COLUMNS: &str = "id, collection_id, name, image_supported, image, system_slug, \
     module_slug, folder_id, source_id, created_at, updated_at";

// ---------------------------------------------------------------------
// Repository contract
// ---------------------------------------------------------------------
#[cfg_attr(test, mockall::automock)]
pub trait RecordRepository: Send + Sync {
    /// Records of a collection in insertion order.
    fn list_by_collection(&self, collection_id: Uuid) -> AppResult<Vec<Record>>;

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Record>>;

    fn save(&self, record: &Record) -> AppResult<()>;

    /// Point the record's image at `image_path`.
    /// Fails with `NotFound` for an unknown record.
    fn update_image(&self, id: Uuid, image_path: &str) -> AppResult<()>;

    /// Copy a record into the primary store, optionally filed under a folder.
    /// Returns the stored copy.
    fn import_into_world(&self, record: &Record, folder_id: Option<Uuid>) -> AppResult<Record>;
}

// ---------------------------------------------------------------------
// SQLite Implementation
// ---------------------------------------------------------------------
pub struct SqliteRecordRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteRecordRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &Row) -> Result<Record, rusqlite::Error> {
        let supported: bool = row.get("image_supported")?;
        let image: Option<String> = row.get("image")?;

        Ok(Record {
            id: uuid_column(row, "id")?,
            collection_id: optional_uuid_column(row, "collection_id")?,
            name: row.get("name")?,
            image: ImageSlot::from_parts(supported, image),
            system_slug: row.get("system_slug")?,
            module_slug: row.get("module_slug")?,
            folder_id: optional_uuid_column(row, "folder_id")?,
            source_id: optional_uuid_column(row, "source_id")?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }
}

impl RecordRepository for SqliteRecordRepository {
    fn list_by_collection(&self, collection_id: Uuid) -> AppResult<Vec<Record>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM records WHERE collection_id = ?1 ORDER BY rowid",
            RECORD_COLUMNS
        ))?;

        let records = stmt
            .query_map(params![collection_id.to_string()], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Record>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM records WHERE id = ?1",
            RECORD_COLUMNS
        ))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_record) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn save(&self, record: &Record) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO records ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                RECORD_COLUMNS
            ),
            params![
                record.id.to_string(),
                record.collection_id.map(|id| id.to_string()),
                record.name,
                record.image.is_supported(),
                record.image.current(),
                record.system_slug,
                record.module_slug,
                record.folder_id.map(|id| id.to_string()),
                record.source_id.map(|id| id.to_string()),
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn update_image(&self, id: Uuid, image_path: &str) -> AppResult<()> {
        let conn = self.pool.get()?;

        let changed = conn.execute(
            "UPDATE records SET image = ?1, updated_at = ?2 WHERE id = ?3 AND image_supported = 1",
            params![image_path, Utc::now().to_rfc3339(), id.to_string()],
        )?;

        if changed == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    fn import_into_world(&self, record: &Record, folder_id: Option<Uuid>) -> AppResult<Record> {
        let mut copy = record.imported_copy();
        copy.folder_id = folder_id;
        self.save(&copy)?;
        Ok(copy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::domain::Collection;
    use crate::repositories::{CollectionRepository, SqliteCollectionRepository};

    fn setup() -> (SqliteRecordRepository, SqliteCollectionRepository, Collection) {
        let pool = Arc::new(create_test_pool().unwrap());
        let collections = SqliteCollectionRepository::new(pool.clone());
        let collection = Collection::new("Adversaries".into(), "Actor".into());
        collections.save(&collection).unwrap();
        (SqliteRecordRepository::new(pool), collections, collection)
    }

    #[test]
    fn test_list_by_collection_keeps_insertion_order() {
        let (repo, _, collection) = setup();
        for name in ["Zombie", "Acid Burrower", "Goblin"] {
            repo.save(&Record::new(Some(collection.id), name.into(), ImageSlot::Empty))
                .unwrap();
        }

        let names: Vec<String> = repo
            .list_by_collection(collection.id)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Zombie", "Acid Burrower", "Goblin"]);
    }

    #[test]
    fn test_round_trip_preserves_image_slot_and_aliases() {
        let (repo, _, collection) = setup();
        let unsupported = Record::new(Some(collection.id), "Note".into(), ImageSlot::Unsupported);
        let set = Record::new(
            Some(collection.id),
            "Goblin".into(),
            ImageSlot::Set("art/goblin.webp".into()),
        )
        .with_aliases(Some("goblin-raider".into()), None);
        repo.save(&unsupported).unwrap();
        repo.save(&set).unwrap();

        assert_eq!(
            repo.get_by_id(unsupported.id).unwrap().unwrap().image,
            ImageSlot::Unsupported
        );
        let loaded = repo.get_by_id(set.id).unwrap().unwrap();
        assert_eq!(loaded.image, ImageSlot::Set("art/goblin.webp".into()));
        assert_eq!(loaded.system_slug.as_deref(), Some("goblin-raider"));
        assert_eq!(loaded.module_slug, None);
    }

    #[test]
    fn test_update_image() {
        let (repo, _, collection) = setup();
        let record = Record::new(Some(collection.id), "Goblin".into(), ImageSlot::Empty);
        repo.save(&record).unwrap();

        repo.update_image(record.id, "art/goblin.webp").unwrap();
        assert_eq!(
            repo.get_by_id(record.id).unwrap().unwrap().image.current(),
            Some("art/goblin.webp")
        );
        assert!(matches!(
            repo.update_image(Uuid::new_v4(), "x.png"),
            Err(AppError::NotFound)
        ));
    }

    #[test]
    fn test_update_image_refuses_unsupported_record() {
        let (repo, _, collection) = setup();
        let record = Record::new(Some(collection.id), "Note".into(), ImageSlot::Unsupported);
        repo.save(&record).unwrap();
        assert!(repo.update_image(record.id, "x.png").is_err());
    }

    #[test]
    fn test_import_into_world() {
        let (repo, collections, collection) = setup();
        let folder = collections.ensure_folder("Daggerheart Imports", "Actor").unwrap();
        let record = Record::new(Some(collection.id), "Goblin".into(), ImageSlot::Empty);
        repo.save(&record).unwrap();

        let copy = repo.import_into_world(&record, Some(folder.id)).unwrap();
        let stored = repo.get_by_id(copy.id).unwrap().unwrap();

        assert_ne!(copy.id, record.id);
        assert_eq!(stored.collection_id, None);
        assert_eq!(stored.source_id, Some(record.id));
        assert_eq!(stored.folder_id, Some(folder.id));
        // The original stays in its collection.
        assert_eq!(repo.list_by_collection(collection.id).unwrap().len(), 1);
    }
}
