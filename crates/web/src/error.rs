use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::ValidationErrors;

const REGISTRATION_FAILED: &str = "Terjadi kesalahan saat mendaftar. Silakan coba lagi.";
const READ_FAILED: &str = "Gagal memuat data. Silakan coba lagi.";

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    /// A registration that failed after validation passed
    Registration(StorageError),
    Validation(ValidationErrors),
}

impl WebError {
    /// Maps storage errors from the registration path, keeping validation apart
    pub fn registration(error: StorageError) -> Self {
        match error {
            StorageError::Validation(errors) => Self::Validation(errors),
            other => Self::Registration(other),
        }
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Registration(e) => write!(f, "Registration failed: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
        }
    }
}

fn validation_details(errors: &ValidationErrors) -> Vec<String> {
    let mut details: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                format!(
                    "{}: {}",
                    field,
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                )
            })
        })
        .collect();
    details.sort();
    details
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            Self::Storage(StorageError::Validation(errors)) | Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Validation failed",
                    "details": validation_details(&errors)
                }),
            ),
            Self::Registration(e) => {
                tracing::error!("Registration error: {:?}", e);
                (StatusCode::BAD_GATEWAY, json!({ "error": REGISTRATION_FAILED }))
            }
            Self::Storage(e @ (StorageError::Read(_) | StorageError::Write(_))) => {
                tracing::error!("Storage error: {:?}", e);
                (StatusCode::BAD_GATEWAY, json!({ "error": READ_FAILED }))
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal error occurred" }),
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;
