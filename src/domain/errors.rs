use thiserror::Error;

use crate::domain::media::ordering::OrderingError;

/// Errors that can occur while querying the media catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid ordering: {0}")]
    Ordering(#[from] OrderingError),

    #[error("Invalid page request: page {page}, max {max} (both must be at least 1 and the offset must fit in i64)")]
    InvalidPage { page: u32, max: u32 },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Media not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
