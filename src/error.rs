//! Error types for usergraph.

use thiserror::Error;

/// Everything that can go wrong inside the store, schema, or server.
#[derive(Debug, Error)]
pub enum UserGraphError {
    /// Referenced User does not exist.
    #[error("No User found for id {0:?}")]
    NotFound(String),

    /// A User with this id already exists.
    #[error("Unique constraint failed on the field `id`: {0:?}")]
    Conflict(String),

    /// Input had the right GraphQL type but an unusable shape.
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Store lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializeError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A store call on the blocking pool panicked or was cancelled.
    #[error("Store task failed: {0}")]
    TaskFailed(String),
}

impl UserGraphError {
    /// Stable machine-readable code, surfaced as `extensions.code` in GraphQL errors.
    pub fn code(&self) -> &'static str {
        match self {
            UserGraphError::NotFound(_) => "NOT_FOUND",
            UserGraphError::Conflict(_) => "CONFLICT",
            UserGraphError::Validation(_) => "VALIDATION",
            _ => "INTERNAL",
        }
    }
}

pub type Result<T> = std::result::Result<T, UserGraphError>;
