use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ts_col, uuid_col};

/// One directed edge per block action. Visibility checks query both
/// directions; the stored direction records who blocked whom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: Uuid,
    pub blocker_id: Uuid,
    pub blocked_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Block {
    /// Maps a row selected as `id, blocker_id, blocked_id, created_at`.
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: uuid_col(row, 0)?,
            blocker_id: uuid_col(row, 1)?,
            blocked_id: uuid_col(row, 2)?,
            created_at: ts_col(row, 3)?,
        })
    }
}
