//! Error types for inkwell-core: Railway Programming
//!
//! All operations return `Result<T, InkwellError>`.
//! No panics, no unwraps in production code paths.

use thiserror::Error;

/// Unified error type for all inkwell operations
#[derive(Error, Debug)]
pub enum InkwellError {
    // ─── Startup Errors ───

    #[error("Configuration error: {0}")]
    Config(String),

    // ─── Auth Errors ───

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Unknown identity")]
    UnknownIdentity,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Identity already exists")]
    DuplicateIdentity,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // ─── Request Errors ───

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ─── Infrastructure Errors ───

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl InkwellError {
    /// Stable machine-readable code, one per taxonomy entry
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration",
            Self::AuthenticationRequired => "authentication_required",
            Self::InvalidToken => "invalid_token",
            Self::UnknownIdentity => "unknown_identity",
            Self::Forbidden => "forbidden",
            Self::DuplicateIdentity => "duplicate_identity",
            Self::InvalidCredentials => "invalid_credentials",
            Self::InvalidInput(_) => "invalid_input",
            Self::Database(_) | Self::Internal(_) => "internal",
        }
    }
}

impl From<sqlx::Error> for InkwellError {
    fn from(err: sqlx::Error) -> Self {
        InkwellError::Database(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for InkwellError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        InkwellError::Internal(format!("token encoding failed: {err}"))
    }
}

impl From<tokio::task::JoinError> for InkwellError {
    fn from(err: tokio::task::JoinError) -> Self {
        InkwellError::Internal(format!("blocking task failed: {err}"))
    }
}

/// Result type alias for inkwell operations
pub type Result<T> = std::result::Result<T, InkwellError>;
