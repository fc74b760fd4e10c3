use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("store error: {0}")]
    Store(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: &str) -> Self { Self::NotFound(format!("{entity} {id} not found")) }

    pub fn store(err: impl std::fmt::Display) -> Self { Self::Store(err.to_string()) }

    pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Forbidden(_) => 1004,
            ServiceError::Store(_) => 1200,
        }
    }

    /// Short kind label, used as the GraphQL `errorType` / metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "ValidationError",
            ServiceError::NotFound(_) => "NotFoundError",
            ServiceError::Forbidden(_) => "AuthorizationError",
            ServiceError::Store(_) => "StoreError",
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(msg) => Self::Validation(msg),
            // A timestamp we cannot read back means the stored row is damaged.
            ModelError::InvalidTimestamp(_) => Self::Store(err.to_string()),
        }
    }
}
