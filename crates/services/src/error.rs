use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Database error: {0}")]
    Db(#[from] crier_db::DbError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Duplicate: {0}")]
    Duplicate(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Validation: {0}")]
    Validation(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
