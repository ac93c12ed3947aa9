use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ts_col, uuid_col};

/// A post body is stored already rewritten (mention links normalized,
/// block-level breaks flattened), so reads never re-run the rewriter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Maps a row selected as `id, author_id, content, created_at, updated_at`.
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: uuid_col(row, 0)?,
            author_id: uuid_col(row, 1)?,
            content: row.get(2)?,
            created_at: ts_col(row, 3)?,
            updated_at: ts_col(row, 4)?,
        })
    }
}
