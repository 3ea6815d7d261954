// src/repositories/sql.rs
//
// Column decoding shared by the SQLite repositories.
// Malformed ids or timestamps surface as conversion errors, never as defaults.

use chrono::{DateTime, Utc};
use rusqlite::{types::Type, Row};
use uuid::Uuid;

fn conversion_error(
    row: &Row,
    column: &str,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    let idx = row.as_ref().column_index(column).unwrap_or(0);
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

pub(crate) fn uuid_column(row: &Row, column: &str) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(column)?;
    Uuid::parse_str(&raw).map_err(|e| conversion_error(row, column, e))
}

pub(crate) fn optional_uuid_column(row: &Row, column: &str) -> rusqlite::Result<Option<Uuid>> {
    let raw: Option<String> = row.get(column)?;
    raw.map(|s| Uuid::parse_str(&s).map_err(|e| conversion_error(row, column, e)))
        .transpose()
}

pub(crate) fn timestamp_column(row: &Row, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(row, column, e))
}
