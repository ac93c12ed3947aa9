use std::sync::Arc;

use crier_db::Database;
use crier_db::models::Block;
use uuid::Uuid;

use crate::dao;
use crate::error::{CoreError, CoreResult};

/// Directed block edges with mutual suppression semantics: one row per
/// block action, both directions consulted on every check.
#[derive(Clone)]
pub struct BlockService {
    db: Arc<Database>,
}

impl BlockService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn block(&self, blocker_id: Uuid, blocked_id: Uuid) -> CoreResult<Block> {
        if blocker_id == blocked_id {
            return Err(CoreError::Validation("cannot block yourself".to_string()));
        }
        self.db.with_tx(|tx| {
            dao::users::find_by_id(tx, blocker_id)?;
            dao::users::find_by_id(tx, blocked_id)?;
            dao::blocks::create(tx, blocker_id, blocked_id)
        })
    }

    pub fn unblock(&self, blocker_id: Uuid, blocked_id: Uuid) -> CoreResult<bool> {
        self.db
            .with_conn(|conn| dao::blocks::remove(conn, blocker_id, blocked_id))
    }

    /// True when either side blocks the other. Unknown ids have no edges
    /// and come back `false`.
    pub fn is_blocked(&self, viewer_id: Uuid, actor_id: Uuid) -> CoreResult<bool> {
        self.db
            .with_conn(|conn| dao::blocks::is_blocked(conn, viewer_id, actor_id))
    }

    pub fn list_blocked(&self, blocker_id: Uuid) -> CoreResult<Vec<Block>> {
        self.db
            .with_conn(|conn| dao::blocks::list_by_blocker(conn, blocker_id))
    }
}
