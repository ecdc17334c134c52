use thiserror::Error;

use common::pagination::PaginationError;
use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i32) -> Self { Self::NotFound { entity, id } }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::InvalidArgument(_) => 2001,
            ServiceError::Validation(_) => 2002,
            ServiceError::NotFound { .. } => 2003,
            ServiceError::Db(_) => 2100,
        }
    }
}

impl From<PaginationError> for ServiceError {
    fn from(e: PaginationError) -> Self { ServiceError::InvalidArgument(e.to_string()) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
            other => ServiceError::Db(other.to_string()),
        }
    }
}

/// Reject identifiers that cannot name a persisted row.
pub fn require_id(id: i32, what: &str) -> Result<i32, ServiceError> {
    if id <= 0 {
        return Err(ServiceError::InvalidArgument(format!("{what} can not be null")));
    }
    Ok(id)
}
