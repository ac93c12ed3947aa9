use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ts_col, uuid_col};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Maps a row selected as `id, post_id, author_id, content, created_at, updated_at`.
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: uuid_col(row, 0)?,
            post_id: uuid_col(row, 1)?,
            author_id: uuid_col(row, 2)?,
            content: row.get(3)?,
            created_at: ts_col(row, 4)?,
            updated_at: ts_col(row, 5)?,
        })
    }
}
