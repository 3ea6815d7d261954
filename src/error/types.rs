// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// A source or destination path could not be listed.
    /// Fatal for the current operation; no partial results are used.
    #[error("Could not browse folder '{path}': {reason}")]
    Browse { path: String, reason: String },

    /// The archive bytes are not a readable zip structure.
    #[error("Archive could not be read: {0}")]
    Extraction(String),

    /// A single record failed to persist during the apply phase.
    #[error("Failed to update record '{record}': {reason}")]
    RecordUpdate { record: String, reason: String },

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("No documents in collection: {0}")]
    EmptyCollection(String),

    #[error("No candidate files found in: {0}")]
    NoCandidateFiles(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    pub fn browse(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        AppError::Browse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn record_update(record: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        AppError::RecordUpdate {
            record: record.into(),
            reason: reason.to_string(),
        }
    }

    /// Errors that stop a run before any matching work is done and are
    /// reported to the user as warnings rather than failures.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            AppError::CollectionNotFound(_)
                | AppError::EmptyCollection(_)
                | AppError::NoCandidateFiles(_)
        )
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Other(format!("UUID error: {}", err))
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<zip::result::ZipError> for AppError {
    fn from(err: zip::result::ZipError) -> Self {
        AppError::Extraction(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Other(format!("Background task failed: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
