use crier_db::models::{self, Block};
use rusqlite::{Connection, params};
use uuid::Uuid;

use super::map_unique_violation;
use crate::error::CoreResult;

pub fn create(conn: &Connection, blocker_id: Uuid, blocked_id: Uuid) -> CoreResult<Block> {
    let block = Block {
        id: Uuid::new_v4(),
        blocker_id,
        blocked_id,
        created_at: models::now(),
    };

    conn.execute(
        "INSERT INTO blocks (id, blocker_id, blocked_id, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            block.id.to_string(),
            block.blocker_id.to_string(),
            block.blocked_id.to_string(),
            block.created_at.timestamp_millis()
        ],
    )
    .map_err(map_unique_violation)?;

    Ok(block)
}

pub fn remove(conn: &Connection, blocker_id: Uuid, blocked_id: Uuid) -> CoreResult<bool> {
    let deleted = conn.execute(
        "DELETE FROM blocks WHERE blocker_id = ?1 AND blocked_id = ?2",
        params![blocker_id.to_string(), blocked_id.to_string()],
    )?;
    Ok(deleted > 0)
}

pub fn directed_exists(conn: &Connection, blocker_id: Uuid, blocked_id: Uuid) -> CoreResult<bool> {
    let found: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM blocks WHERE blocker_id = ?1 AND blocked_id = ?2)",
        params![blocker_id.to_string(), blocked_id.to_string()],
        |row| row.get(0),
    )?;
    Ok(found)
}

/// Suppression is mutual regardless of which side created the edge, so
/// this is the OR of the two directed lookups. Unknown ids simply have
/// no edges and come back `false`.
pub fn is_blocked(conn: &Connection, a: Uuid, b: Uuid) -> CoreResult<bool> {
    Ok(directed_exists(conn, a, b)? || directed_exists(conn, b, a)?)
}

pub fn list_by_blocker(conn: &Connection, blocker_id: Uuid) -> CoreResult<Vec<Block>> {
    let mut stmt = conn.prepare(
        "SELECT id, blocker_id, blocked_id, created_at
         FROM blocks WHERE blocker_id = ?1 ORDER BY created_at",
    )?;
    let blocks = stmt
        .query_map([blocker_id.to_string()], Block::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(blocks)
}
