use std::error::Error;
use std::fmt::Display;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

/// Error type for service operations
#[derive(Debug)]
pub enum ServiceError {
    /// Request failed validation (bad field, bad filename, oversize upload)
    ValidationError(String),
    /// Requested record does not exist
    NotFoundError(String),
    /// Missing or invalid bearer token
    AuthError(String),
    /// Error talking to the database
    DatabaseError(String),
    /// Error writing the uploaded file to disk
    StorageError(String),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ServiceError::NotFoundError(msg) => write!(f, "Not found: {}", msg),
            ServiceError::AuthError(msg) => write!(f, "Unauthorized: {}", msg),
            ServiceError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ServiceError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl Error for ServiceError {}

impl From<rusqlite::Error> for ServiceError {
    fn from(err: rusqlite::Error) -> Self {
        ServiceError::DatabaseError(err.to_string())
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::StorageError(err.to_string())
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFoundError(_) => StatusCode::NOT_FOUND,
            ServiceError::AuthError(_) => StatusCode::UNAUTHORIZED,
            ServiceError::DatabaseError(_) | ServiceError::StorageError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Client errors report under "message", server errors under "error"
        match self {
            ServiceError::ValidationError(msg)
            | ServiceError::NotFoundError(msg)
            | ServiceError::AuthError(msg) => {
                HttpResponse::build(self.status_code()).json(json!({ "message": msg }))
            }
            ServiceError::DatabaseError(msg) | ServiceError::StorageError(msg) => {
                HttpResponse::build(self.status_code()).json(json!({ "error": msg }))
            }
        }
    }
}
