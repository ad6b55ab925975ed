//! Error types for the todo backend

use thiserror::Error;

/// Result type alias using the todo Error
pub type Result<T> = std::result::Result<T, Error>;

/// Todo backend error types
#[derive(Error, Debug)]
pub enum Error {
    /// No record carries the requested todo ID
    #[error("Todo not found: {0}")]
    TodoNotFound(String),

    /// The todo ID index returned more than one record
    #[error("Integrity violation: {0}")]
    Integrity(String),

    /// Caller does not own the todo
    #[error("Not allowed to modify todo: {0}")]
    Forbidden(String),

    /// Caller identity could not be established
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// DynamoDB error
    #[error("Database error: {0}")]
    Database(String),

    /// S3 / presigning error
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// DynamoDB serialization error
    #[error("DynamoDB serialization error: {0}")]
    DynamoSerialization(String),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Error::TodoNotFound(_) => "todo_not_found",
            Error::Integrity(_) => "integrity_error",
            Error::Forbidden(_) => "forbidden",
            Error::Unauthorized(_) => "unauthorized",
            Error::Validation(_) => "validation_error",
            Error::Database(_) => "database_error",
            Error::Storage(_) => "storage_error",
            Error::Serialization(_) => "serialization_error",
            Error::DynamoSerialization(_) => "serialization_error",
            Error::Config(_) => "configuration_error",
        }
    }

    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::TodoNotFound(_) => 404,
            Error::Integrity(_) => 500,
            Error::Forbidden(_) => 403,
            Error::Unauthorized(_) => 401,
            Error::Validation(_) => 400,
            Error::Database(_) => 500,
            Error::Storage(_) => 500,
            Error::Serialization(_) => 400,
            Error::DynamoSerialization(_) => 500,
            Error::Config(_) => 500,
        }
    }
}
