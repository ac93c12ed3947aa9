use chrono::{DateTime, Utc};
use crier_db::models::{self, Post};
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// `content` arrives already validated and rewritten.
pub fn create(conn: &Connection, author_id: Uuid, content: &str) -> CoreResult<Post> {
    let ts = models::now();
    let post = Post {
        id: Uuid::new_v4(),
        author_id,
        content: content.to_owned(),
        created_at: ts,
        updated_at: ts,
    };

    conn.execute(
        "INSERT INTO posts (id, author_id, content, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            post.id.to_string(),
            post.author_id.to_string(),
            post.content,
            post.created_at.timestamp_millis(),
            post.updated_at.timestamp_millis()
        ],
    )?;

    Ok(post)
}

pub fn update_content(
    conn: &Connection,
    id: Uuid,
    content: &str,
    updated_at: DateTime<Utc>,
) -> CoreResult<()> {
    let changed = conn.execute(
        "UPDATE posts SET content = ?2, updated_at = ?3 WHERE id = ?1",
        params![id.to_string(), content, updated_at.timestamp_millis()],
    )?;
    if changed == 0 {
        return Err(CoreError::NotFound("post"));
    }
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Uuid) -> CoreResult<Post> {
    try_find_by_id(conn, id)?.ok_or(CoreError::NotFound("post"))
}

pub fn try_find_by_id(conn: &Connection, id: Uuid) -> CoreResult<Option<Post>> {
    let post = conn
        .query_row(
            "SELECT id, author_id, content, created_at, updated_at FROM posts WHERE id = ?1",
            [id.to_string()],
            Post::from_row,
        )
        .optional()?;
    Ok(post)
}
