use crier_db::models::{self, Notification, NotificationReason, SourceKind};
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::map_unique_violation;
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadFilter {
    All,
    Unread,
    Read,
}

/// Create-or-refresh keyed on `(recipient_id, from_id, reason)`.
///
/// The first trigger inserts an unread row; any re-trigger of the same
/// cause resets `read` and bumps `updated_at` while leaving `created_at`
/// alone. The UNIQUE index backs this up if two writers ever race.
pub fn upsert(
    conn: &Connection,
    recipient_id: Uuid,
    from_kind: SourceKind,
    from_id: Uuid,
    reason: NotificationReason,
) -> CoreResult<Notification> {
    let ts = models::now();

    if let Some(mut existing) = find_by_key(conn, recipient_id, from_id, reason)? {
        conn.execute(
            "UPDATE notifications SET read = 0, updated_at = ?2 WHERE id = ?1",
            params![existing.id.to_string(), ts.timestamp_millis()],
        )?;
        existing.read = false;
        existing.updated_at = ts;
        return Ok(existing);
    }

    let notification = Notification {
        id: Uuid::new_v4(),
        recipient_id,
        reason,
        from_kind,
        from_id,
        read: false,
        created_at: ts,
        updated_at: ts,
    };

    conn.execute(
        "INSERT INTO notifications (id, recipient_id, reason, from_kind, from_id, read, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?7)",
        params![
            notification.id.to_string(),
            notification.recipient_id.to_string(),
            notification.reason.as_str(),
            notification.from_kind.as_str(),
            notification.from_id.to_string(),
            notification.created_at.timestamp_millis(),
            notification.updated_at.timestamp_millis()
        ],
    )
    .map_err(map_unique_violation)?;

    Ok(notification)
}

pub fn find_by_key(
    conn: &Connection,
    recipient_id: Uuid,
    from_id: Uuid,
    reason: NotificationReason,
) -> CoreResult<Option<Notification>> {
    let notification = conn
        .query_row(
            "SELECT id, recipient_id, reason, from_kind, from_id, read, created_at, updated_at
             FROM notifications
             WHERE recipient_id = ?1 AND from_id = ?2 AND reason = ?3",
            params![recipient_id.to_string(), from_id.to_string(), reason.as_str()],
            Notification::from_row,
        )
        .optional()?;
    Ok(notification)
}

pub fn count_for_key(
    conn: &Connection,
    recipient_id: Uuid,
    from_id: Uuid,
    reason: NotificationReason,
) -> CoreResult<u64> {
    let count: u64 = conn.query_row(
        "SELECT COUNT(*) FROM notifications
         WHERE recipient_id = ?1 AND from_id = ?2 AND reason = ?3",
        params![recipient_id.to_string(), from_id.to_string(), reason.as_str()],
        |row| row.get(0),
    )?;
    Ok(count)
}

pub fn list_for_recipient(
    conn: &Connection,
    recipient_id: Uuid,
    filter: ReadFilter,
    page: u64,
    per_page: u64,
) -> CoreResult<(Vec<Notification>, u64)> {
    let read_clause = match filter {
        ReadFilter::All => "",
        ReadFilter::Unread => " AND read = 0",
        ReadFilter::Read => " AND read = 1",
    };

    let total: u64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM notifications WHERE recipient_id = ?1{read_clause}"),
        [recipient_id.to_string()],
        |row| row.get(0),
    )?;

    // Clamp into i64 so pathological page numbers bind cleanly instead
    // of overflowing; an offset past the end just reads as empty.
    let offset = i64::try_from(page.saturating_sub(1).saturating_mul(per_page)).unwrap_or(i64::MAX);
    let limit = i64::try_from(per_page).unwrap_or(i64::MAX);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, recipient_id, reason, from_kind, from_id, read, created_at, updated_at
         FROM notifications WHERE recipient_id = ?1{read_clause}
         ORDER BY updated_at DESC, id LIMIT ?2 OFFSET ?3"
    ))?;
    let rows = stmt
        .query_map(
            params![recipient_id.to_string(), limit, offset],
            Notification::from_row,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok((rows, total))
}

/// Flips `read` only; `updated_at` moves on re-triggers, not on reads.
pub fn mark_as_read(conn: &Connection, id: Uuid) -> CoreResult<()> {
    let changed = conn.execute(
        "UPDATE notifications SET read = 1 WHERE id = ?1",
        [id.to_string()],
    )?;
    if changed == 0 {
        return Err(CoreError::NotFound("notification"));
    }
    Ok(())
}

pub fn mark_all_read(conn: &Connection, recipient_id: Uuid) -> CoreResult<u64> {
    let changed = conn.execute(
        "UPDATE notifications SET read = 1 WHERE recipient_id = ?1 AND read = 0",
        [recipient_id.to_string()],
    )?;
    Ok(changed as u64)
}

pub fn unread_count(conn: &Connection, recipient_id: Uuid) -> CoreResult<u64> {
    let count: u64 = conn.query_row(
        "SELECT COUNT(*) FROM notifications WHERE recipient_id = ?1 AND read = 0",
        [recipient_id.to_string()],
        |row| row.get(0),
    )?;
    Ok(count)
}
