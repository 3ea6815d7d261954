// src/repositories/collection_repository.rs

use rusqlite::{params, OptionalExtension, Row};
use std::sync::Arc;
use uuid::Uuid;

use super::sql::{timestamp_column, uuid_column};
use crate::db::ConnectionPool;
use crate::domain::{Collection, Folder};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait CollectionRepository: Send + Sync {
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Collection>>;
    fn list_all(&self) -> AppResult<Vec<Collection>>;
    fn save(&self, collection: &Collection) -> AppResult<()>;

    /// Flip the lock flag. Fails with `NotFound` for an unknown collection.
    fn set_locked(&self, id: Uuid, locked: bool) -> AppResult<()>;

    /// Return the primary-store folder with this name and document kind,
    /// creating it when absent.
    fn ensure_folder(&self, name: &str, document_kind: &str) -> AppResult<Folder>;
}

pub struct SqliteCollectionRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteCollectionRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_collection(row: &Row) -> Result<Collection, rusqlite::Error> {
        Ok(Collection {
            id: uuid_column(row, "id")?,
            label: row.get("label")?,
            document_kind: row.get("document_kind")?,
            locked: row.get("locked")?,
            created_at: timestamp_column(row, "created_at")?,
        })
    }

    fn row_to_folder(row: &Row) -> Result<Folder, rusqlite::Error> {
        Ok(Folder {
            id: uuid_column(row, "id")?,
            name: row.get("name")?,
            document_kind: row.get("document_kind")?,
            created_at: timestamp_column(row, "created_at")?,
        })
    }
}

impl CollectionRepository for SqliteCollectionRepository {
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Collection>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, label, document_kind, locked, created_at FROM collections WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::row_to_collection) {
            Ok(col) => Ok(Some(col)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Collection>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, label, document_kind, locked, created_at FROM collections ORDER BY label",
        )?;

        let collections: Vec<Collection> = stmt
            .query_map([], Self::row_to_collection)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(collections)
    }

    fn save(&self, collection: &Collection) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO collections (id, label, document_kind, locked, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                label = excluded.label,
                document_kind = excluded.document_kind,
                locked = excluded.locked",
            params![
                collection.id.to_string(),
                collection.label,
                collection.document_kind,
                collection.locked,
                collection.created_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    fn set_locked(&self, id: Uuid, locked: bool) -> AppResult<()> {
        let conn = self.pool.get()?;

        let changed = conn.execute(
            "UPDATE collections SET locked = ?1 WHERE id = ?2",
            params![locked, id.to_string()],
        )?;

        if changed == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    fn ensure_folder(&self, name: &str, document_kind: &str) -> AppResult<Folder> {
        let conn = self.pool.get()?;

        let existing = conn
            .query_row(
                "SELECT id, name, document_kind, created_at FROM folders
                 WHERE name = ?1 AND document_kind = ?2",
                params![name, document_kind],
                Self::row_to_folder,
            )
            .optional()?;

        if let Some(folder) = existing {
            return Ok(folder);
        }

        let folder = Folder::new(name.to_string(), document_kind.to_string());
        conn.execute(
            "INSERT INTO folders (id, name, document_kind, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                folder.id.to_string(),
                folder.name,
                folder.document_kind,
                folder.created_at.to_rfc3339(),
            ],
        )?;

        Ok(folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    fn repo() -> SqliteCollectionRepository {
        SqliteCollectionRepository::new(Arc::new(create_test_pool().unwrap()))
    }

    #[test]
    fn test_save_and_get_round_trip() {
        let repo = repo();
        let collection = Collection::new("Adversaries".to_string(), "Actor".to_string());
        repo.save(&collection).unwrap();

        let loaded = repo.get_by_id(collection.id).unwrap().unwrap();
        assert_eq!(loaded.label, "Adversaries");
        assert_eq!(loaded.document_kind, "Actor");
        assert!(!loaded.locked);
        assert!(repo.get_by_id(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_set_locked() {
        let repo = repo();
        let collection = Collection::new("Items".to_string(), "Item".to_string());
        repo.save(&collection).unwrap();

        repo.set_locked(collection.id, true).unwrap();
        assert!(repo.get_by_id(collection.id).unwrap().unwrap().locked);

        assert!(matches!(
            repo.set_locked(Uuid::new_v4(), true),
            Err(AppError::NotFound)
        ));
    }

    #[test]
    fn test_list_all_sorted_by_label() {
        let repo = repo();
        repo.save(&Collection::new("Zeta".into(), "Item".into())).unwrap();
        repo.save(&Collection::new("Alpha".into(), "Actor".into())).unwrap();

        let labels: Vec<String> = repo.list_all().unwrap().into_iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_ensure_folder_is_idempotent() {
        let repo = repo();
        let first = repo.ensure_folder("Daggerheart Imports", "Actor").unwrap();
        let second = repo.ensure_folder("Daggerheart Imports", "Actor").unwrap();
        let other_kind = repo.ensure_folder("Daggerheart Imports", "Item").unwrap();

        assert_eq!(first.id, second.id);
        assert_ne!(first.id, other_kind.id);
    }
}
