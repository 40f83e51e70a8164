use thiserror::Error;

/// Failure kinds surfaced by the user operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Body missing, not JSON, or lacking a required string field.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("{0}")]
    NotFound(String),
    /// The backing store is unreachable or rejected the operation.
    #[error("store error: {0}")]
    Store(String),
}

impl ServiceError {
    pub fn store(e: impl std::fmt::Display) -> Self { Self::Store(e.to_string()) }
    pub fn malformed(e: impl std::fmt::Display) -> Self { Self::MalformedInput(e.to_string()) }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self { Self::MalformedInput(e.to_string()) }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Store(e.to_string()) }
}
