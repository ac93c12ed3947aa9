use crier_db::models::{self, Comment};
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// `content` arrives already validated and rewritten; the caller has
/// resolved `post_id` to an existing post.
pub fn create(conn: &Connection, post_id: Uuid, author_id: Uuid, content: &str) -> CoreResult<Comment> {
    let ts = models::now();
    let comment = Comment {
        id: Uuid::new_v4(),
        post_id,
        author_id,
        content: content.to_owned(),
        created_at: ts,
        updated_at: ts,
    };

    conn.execute(
        "INSERT INTO comments (id, post_id, author_id, content, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            comment.id.to_string(),
            comment.post_id.to_string(),
            comment.author_id.to_string(),
            comment.content,
            comment.created_at.timestamp_millis(),
            comment.updated_at.timestamp_millis()
        ],
    )?;

    Ok(comment)
}

pub fn find_by_id(conn: &Connection, id: Uuid) -> CoreResult<Comment> {
    try_find_by_id(conn, id)?.ok_or(CoreError::NotFound("comment"))
}

pub fn try_find_by_id(conn: &Connection, id: Uuid) -> CoreResult<Option<Comment>> {
    let comment = conn
        .query_row(
            "SELECT id, post_id, author_id, content, created_at, updated_at
             FROM comments WHERE id = ?1",
            [id.to_string()],
            Comment::from_row,
        )
        .optional()?;
    Ok(comment)
}

pub fn list_for_post(conn: &Connection, post_id: Uuid) -> CoreResult<Vec<Comment>> {
    let mut stmt = conn.prepare(
        "SELECT id, post_id, author_id, content, created_at, updated_at
         FROM comments WHERE post_id = ?1 ORDER BY created_at",
    )?;
    let comments = stmt
        .query_map([post_id.to_string()], Comment::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(comments)
}
