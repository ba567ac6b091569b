//! Error types for the portal library.

use std::path::PathBuf;

use thiserror::Error;

use crate::client::SubmitError;
use crate::models::FormKind;
use crate::validation::ValidationResult;

/// Comprehensive error type for all portal operations.
#[derive(Error, Debug)]
pub enum PortalError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// No draft has been started for the given form
    #[error("No {kind} form in progress. Start one first.")]
    DraftNotFound { kind: FormKind },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG base directory errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// The current step has fields that failed validation
    #[error("{}", format_step_errors(errors))]
    Validation { errors: ValidationResult },
    /// Whole-record validation failed before submission
    #[error("{message}")]
    Incomplete { message: String },
    /// The server or transport rejected the submission
    #[error(transparent)]
    Submission(#[from] SubmitError),
    /// Update link could not be validated
    #[error("Invalid or expired link")]
    InvalidLink,
    /// Step navigation that the wizard does not allow
    #[error("{0}")]
    Navigation(String),
    /// A submission is in flight; edits and navigation are locked
    #[error("A submission is in progress. Please wait for it to finish.")]
    SubmissionInProgress,
    /// Admin operation attempted without a session
    #[error("Not signed in. Run `admin login` first.")]
    NotAuthenticated,
    /// Admin API failures
    #[error("{message}")]
    Admin { message: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// A blocking storage task panicked or was cancelled
    #[error("Background task failed: {source}")]
    Task {
        #[from]
        source: tokio::task::JoinError,
    },
}

fn format_step_errors(errors: &ValidationResult) -> String {
    let mut out = String::from("Please correct the highlighted fields:");
    for (field, message) in errors.iter() {
        out.push_str(&format!("\n{field}: {message}"));
    }
    out
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PortalError {
        PortalError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PortalError {
        PortalError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PortalError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a configuration error from a message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error is recoverable by correcting input and retrying.
    ///
    /// Configuration and storage failures are fatal for the affected view;
    /// everything else leaves the entered data intact for another attempt.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            PortalError::Configuration { .. }
                | PortalError::Database { .. }
                | PortalError::XdgDirectory(_)
                | PortalError::Task { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PortalError::database(message).with_source(e))
    }
}

/// Result type alias for portal operations
pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_fields() {
        let mut errors = ValidationResult::default();
        errors.insert("email", "Please enter a valid email address");
        errors.insert("phoneNumber", "Please enter a valid Nigerian phone number");

        let message = PortalError::Validation { errors }.to_string();
        assert!(message.starts_with("Please correct the highlighted fields:"));
        assert!(message.contains("email: Please enter a valid email address"));
        assert!(message.contains("phoneNumber: Please enter a valid Nigerian phone number"));
    }

    #[test]
    fn test_invalid_input_builder() {
        let err = PortalError::invalid_input("farm.size").with_reason("not a number");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'farm.size': not a number"
        );
    }

    #[test]
    fn test_configuration_is_fatal() {
        assert!(!PortalError::configuration("SUGRIA_API_URL is not set").is_recoverable());
        assert!(PortalError::InvalidLink.is_recoverable());
        assert!(PortalError::SubmissionInProgress.is_recoverable());
    }

    #[tokio::test]
    async fn test_panicked_task_is_not_a_configuration_error() {
        let join_error = tokio::task::spawn_blocking(|| -> u8 { panic!("storage task died") })
            .await
            .expect_err("Task should have panicked");

        let err = PortalError::from(join_error);
        assert!(matches!(err, PortalError::Task { .. }));
        assert!(err.to_string().starts_with("Background task failed"));
        assert!(!err.is_recoverable());
    }
}
