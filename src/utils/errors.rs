//! Error handling for Classbook
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use thiserror::Error;

/// Main error type for Classbook application
#[derive(Error, Debug)]
pub enum ClassbookError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("An account with email {email} already exists")]
    DuplicateEmail { email: String },

    #[error("An account with username {username} already exists")]
    DuplicateUsername { username: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Account not found: {account_id}")]
    AccountNotFound { account_id: i64 },

    #[error("Class not found: {class_id}")]
    ClassNotFound { class_id: i64 },

    #[error("Subject not found: {subject_id}")]
    SubjectNotFound { subject_id: i64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Classbook operations
pub type Result<T> = std::result::Result<T, ClassbookError>;

impl ClassbookError {
    /// Check if the error means a referenced entity is missing
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClassbookError::AccountNotFound { .. }
                | ClassbookError::ClassNotFound { .. }
                | ClassbookError::SubjectNotFound { .. }
        )
    }

    /// Check if the error is the caller's fault and should be shown back on the form
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            ClassbookError::DuplicateEmail { .. }
                | ClassbookError::DuplicateUsername { .. }
                | ClassbookError::InvalidCredentials
                | ClassbookError::Unauthenticated
                | ClassbookError::Forbidden(_)
                | ClassbookError::InvalidInput(_)
        ) || self.is_not_found()
    }

    /// HTTP status used when the error is reported to a client
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClassbookError::DuplicateEmail { .. } | ClassbookError::DuplicateUsername { .. } => {
                StatusCode::CONFLICT
            }
            ClassbookError::InvalidCredentials | ClassbookError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            ClassbookError::Forbidden(_) => StatusCode::FORBIDDEN,
            ClassbookError::AccountNotFound { .. }
            | ClassbookError::ClassNotFound { .. }
            | ClassbookError::SubjectNotFound { .. } => StatusCode::NOT_FOUND,
            ClassbookError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ClassbookError::Database(_) => ErrorSeverity::Critical,
            ClassbookError::Migration(_) => ErrorSeverity::Critical,
            ClassbookError::Config(_) => ErrorSeverity::Critical,
            ClassbookError::ConfigLoad(_) => ErrorSeverity::Critical,
            ClassbookError::Forbidden(_) => ErrorSeverity::Warning,
            ClassbookError::InvalidCredentials => ErrorSeverity::Warning,
            ClassbookError::Unauthenticated => ErrorSeverity::Info,
            ClassbookError::DuplicateEmail { .. } => ErrorSeverity::Info,
            ClassbookError::DuplicateUsername { .. } => ErrorSeverity::Info,
            ClassbookError::InvalidInput(_) => ErrorSeverity::Info,
            e if e.is_not_found() => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

impl IntoResponse for ClassbookError {
    fn into_response(self) -> Response {
        if let ClassbookError::Unauthenticated = self {
            return Redirect::to(crate::middleware::LOGIN_PATH).into_response();
        }

        let status = self.status_code();
        match self.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                tracing::error!(error = %self, severity = %self.severity(), "Request failed");
            }
            _ => {
                tracing::debug!(error = %self, "Request rejected");
            }
        }

        // Internal details never leave the process.
        let message = if self.is_user_facing() {
            self.to_string()
        } else {
            "Something went wrong on our end.".to_string()
        };

        (status, Html(crate::views::fallback_error_page(status, &message))).into_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
