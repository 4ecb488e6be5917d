use thiserror::Error;
use validator::ValidationErrors;

/// Failure reported by a backend implementation, never classified further by callers
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected backend response: {0}")]
    UnexpectedResponse(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Read error: {0}")]
    Read(#[source] BackendError),

    #[error("Write error: {0}")]
    Write(#[source] BackendError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;
pub type BackendResult<T> = std::result::Result<T, BackendError>;

impl StorageError {
    pub fn is_read(&self) -> bool {
        matches!(self, StorageError::Read(_))
    }

    pub fn is_write(&self) -> bool {
        matches!(self, StorageError::Write(_))
    }
}
