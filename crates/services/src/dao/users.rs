use crier_db::models::{self, User};
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use super::map_unique_violation;
use crate::error::{CoreError, CoreResult};

pub fn create(conn: &Connection, name: &str, slug: &str) -> CoreResult<User> {
    let user = User {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        slug: slug.to_owned(),
        created_at: models::now(),
    };

    conn.execute(
        "INSERT INTO users (id, name, slug, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            user.id.to_string(),
            user.name,
            user.slug,
            user.created_at.timestamp_millis()
        ],
    )
    .map_err(map_unique_violation)?;

    Ok(user)
}

pub fn find_by_id(conn: &Connection, id: Uuid) -> CoreResult<User> {
    try_find_by_id(conn, id)?.ok_or(CoreError::NotFound("user"))
}

pub fn try_find_by_id(conn: &Connection, id: Uuid) -> CoreResult<Option<User>> {
    let user = conn
        .query_row(
            "SELECT id, name, slug, created_at FROM users WHERE id = ?1",
            [id.to_string()],
            User::from_row,
        )
        .optional()?;
    Ok(user)
}

pub fn exists(conn: &Connection, id: Uuid) -> CoreResult<bool> {
    let found: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(found)
}
