// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-facing responses
// - Provides a consistent error format for text and JSON output
// - Never exposes internal implementation details in the message
// - Logs low-level detail separately

use log::error;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for the front end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub severity: Severity,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Collection or record not found
    NotFound,

    /// Invalid input or nothing to work on
    Validation,

    /// Domain invariant violation
    DomainError,

    /// Database/persistence error
    Database,

    /// Archive could not be read
    Archive,

    /// File system error
    FileSystem,

    /// Other/unknown error
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, severity: Severity, message: String, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            severity,
            message,
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        let severity = if error.is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        };

        match error {
            AppError::CollectionNotFound(id) => Self::new(
                ErrorType::NotFound,
                severity,
                format!("Collection not found: {}", id),
                None,
            ),

            AppError::EmptyCollection(label) => Self::new(
                ErrorType::Validation,
                severity,
                format!("No documents in collection: {}", label),
                None,
            ),

            AppError::NoCandidateFiles(folder) => Self::new(
                ErrorType::Validation,
                severity,
                format!("No image files found in: {}", folder),
                None,
            ),

            AppError::Browse { path, reason } => {
                error!("Browse failed for {}: {}", path, reason);
                Self::new(
                    ErrorType::FileSystem,
                    severity,
                    format!("Could not browse folder: {}", path),
                    Some(reason),
                )
            }

            AppError::Extraction(reason) => Self::new(
                ErrorType::Archive,
                severity,
                "Archive could not be read".to_string(),
                Some(reason),
            ),

            AppError::RecordUpdate { record, reason } => {
                error!("Record update failed for {}: {}", record, reason);
                Self::new(
                    ErrorType::Database,
                    severity,
                    format!("Failed to update record: {}", record),
                    None,
                )
            }

            AppError::NotFound => Self::new(
                ErrorType::NotFound,
                severity,
                "Resource not found".to_string(),
                None,
            ),

            AppError::Domain(domain_error) => Self::new(
                ErrorType::DomainError,
                severity,
                "Domain validation failed".to_string(),
                Some(domain_error.to_string()),
            ),

            AppError::Database(db_error) => {
                error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    severity,
                    "Database operation failed".to_string(),
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                error!("Connection pool error: {}", pool_error);
                Self::new(
                    ErrorType::Database,
                    severity,
                    "Database connection failed".to_string(),
                    None,
                )
            }

            AppError::Serialization(serde_error) => {
                error!("Serialization error: {:?}", serde_error);
                Self::new(
                    ErrorType::Internal,
                    severity,
                    "Data serialization failed".to_string(),
                    Some(serde_error.to_string()),
                )
            }

            AppError::Io(io_error) => {
                error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::FileSystem,
                    severity,
                    "File system operation failed".to_string(),
                    Some(io_error.to_string()),
                )
            }

            AppError::Other(message) => {
                error!("Other error: {}", message);
                Self::new(ErrorType::Internal, severity, message, None)
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, Severity::Warning, message, None)
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{} ({})", self.message, details),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, ErrorResponse>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, ErrorResponse> {
        self.map_err(ErrorResponse::from_app_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pre_matching_aborts_are_warnings() {
        let error = ErrorResponse::from_app_error(AppError::NoCandidateFiles("assets".into()));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert!(error.is_warning());
        assert_eq!(error.message, "No image files found in: assets");
    }

    #[test]
    fn test_browse_error_is_fatal_and_names_folder() {
        let error = ErrorResponse::from_app_error(AppError::browse("art", "denied"));
        assert_eq!(error.error_type, ErrorType::FileSystem);
        assert_eq!(error.severity, Severity::Error);
        assert_eq!(error.to_string(), "Could not browse folder: art (denied)");
    }

    #[test]
    fn test_database_detail_is_not_exposed() {
        let error = ErrorResponse::from_app_error(AppError::Database(
            rusqlite::Error::InvalidQuery,
        ));
        assert_eq!(error.message, "Database operation failed");
        assert_eq!(error.details.as_deref(), Some("Check logs for details"));
    }

    #[test]
    fn test_validation_error() {
        let error = ErrorResponse::validation("Destination folder required".to_string());
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.message, "Destination folder required");
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::from_app_error(AppError::CollectionNotFound("abc".into()));
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("not_found"));
        assert!(json.contains("\"severity\":\"warning\""));
    }
}
