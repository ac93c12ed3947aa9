use crier_db::models::{self, Report, ReportCategory, ReportedResource, ResourceKind};
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

pub fn create(
    conn: &Connection,
    creator_id: Uuid,
    category: ReportCategory,
    reason: &str,
    reported_kind: ResourceKind,
    reported_id: Uuid,
) -> CoreResult<Report> {
    let report = Report {
        id: Uuid::new_v4(),
        creator_id,
        category,
        reason: reason.to_owned(),
        reported_kind,
        reported_id,
        created_at: models::now(),
    };

    conn.execute(
        "INSERT INTO reports (id, creator_id, category, reason, reported_kind, reported_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            report.id.to_string(),
            report.creator_id.to_string(),
            report.category.as_str(),
            report.reason,
            report.reported_kind.as_str(),
            report.reported_id.to_string(),
            report.created_at.timestamp_millis()
        ],
    )?;

    Ok(report)
}

pub fn find_by_id(conn: &Connection, id: Uuid) -> CoreResult<Report> {
    try_find_by_id(conn, id)?.ok_or(CoreError::NotFound("report"))
}

pub fn try_find_by_id(conn: &Connection, id: Uuid) -> CoreResult<Option<Report>> {
    let report = conn
        .query_row(
            "SELECT id, creator_id, category, reason, reported_kind, reported_id, created_at
             FROM reports WHERE id = ?1",
            [id.to_string()],
            Report::from_row,
        )
        .optional()?;
    Ok(report)
}

pub fn list_for_resource(
    conn: &Connection,
    reported_kind: ResourceKind,
    reported_id: Uuid,
) -> CoreResult<Vec<Report>> {
    let mut stmt = conn.prepare(
        "SELECT id, creator_id, category, reason, reported_kind, reported_id, created_at
         FROM reports WHERE reported_kind = ?1 AND reported_id = ?2 ORDER BY created_at",
    )?;
    let reports = stmt
        .query_map(
            params![reported_kind.as_str(), reported_id.to_string()],
            Report::from_row,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(reports)
}

pub fn list_by_creator(conn: &Connection, creator_id: Uuid) -> CoreResult<Vec<Report>> {
    let mut stmt = conn.prepare(
        "SELECT id, creator_id, category, reason, reported_kind, reported_id, created_at
         FROM reports WHERE creator_id = ?1 ORDER BY created_at",
    )?;
    let reports = stmt
        .query_map([creator_id.to_string()], Report::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(reports)
}

/// Project the reported resource onto its concrete kind and the fields a
/// consumer sees. `None` when the referenced row does not exist.
pub fn resolve_reported(
    conn: &Connection,
    reported_kind: ResourceKind,
    reported_id: Uuid,
) -> CoreResult<Option<ReportedResource>> {
    let resolved = match reported_kind {
        ResourceKind::User => super::users::try_find_by_id(conn, reported_id)?
            .map(|user| ReportedResource::User {
                id: user.id,
                name: user.name,
            }),
        ResourceKind::Post => super::posts::try_find_by_id(conn, reported_id)?
            .map(|post| ReportedResource::Post {
                id: post.id,
                content: post.content,
            }),
        ResourceKind::Comment => super::comments::try_find_by_id(conn, reported_id)?
            .map(|comment| ReportedResource::Comment {
                id: comment.id,
                content: comment.content,
            }),
    };
    Ok(resolved)
}
