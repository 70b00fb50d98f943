//! Custom error types and handling
//!
//! This module defines the judging core's error type. The surrounding
//! HTTP layer maps `error_code()` values onto its own response format.

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    // External collaborator errors
    #[error("Execution backend error: {0}")]
    Backend(String),

    #[error("Storage error: {0}")]
    Storage(String),

    // Judging pipeline errors
    #[error("Judge queue is closed")]
    QueueClosed,

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Get the stable error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UnsupportedLanguage(_) => "UNSUPPORTED_LANGUAGE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Backend(_) => "EXECUTION_BACKEND_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::QueueClosed => "QUEUE_CLOSED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

// Implement From for common error types
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Backend(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
