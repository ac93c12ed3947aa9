pub mod blocks;
pub mod comments;
pub mod notifications;
pub mod posts;
pub mod reports;
pub mod users;

pub use notifications::ReadFilter;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    25
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// Turn a UNIQUE-constraint failure into `CoreError::Duplicate`; everything
/// else passes through as a plain SQLite error.
pub(crate) fn map_unique_violation(err: rusqlite::Error) -> CoreError {
    if let rusqlite::Error::SqliteFailure(e, ref message) = err {
        if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
            let detail = message
                .clone()
                .unwrap_or_else(|| "unique constraint violated".to_string());
            return CoreError::Duplicate(detail);
        }
    }
    CoreError::Sqlite(err)
}
