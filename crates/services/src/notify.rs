//! Notification fan-out for content events, plus the read-side queries.
//!
//! Every event is one transaction: recipients are computed, block edges
//! consulted, and all resulting upserts land together or not at all.

use std::sync::Arc;

use crier_config::NotificationSettings;
use crier_db::Database;
use crier_db::models::{
    Comment, Notification, NotificationReason, NotificationSource, NotificationView, Post,
    Report, ReportFiling, SourceKind,
};
use rusqlite::Connection;
use tracing::debug;
use uuid::Uuid;

use crate::content::extract_mentions;
use crate::dao;
use crate::dao::{PaginatedResult, PaginationParams, ReadFilter};
use crate::error::{CoreError, CoreResult};

#[derive(Clone)]
pub struct NotifyService {
    db: Arc<Database>,
    settings: NotificationSettings,
}

impl NotifyService {
    pub fn new(db: Arc<Database>, settings: NotificationSettings) -> Self {
        Self { db, settings }
    }

    /// Fan out mention notifications for a post that is already persisted.
    pub fn on_post_created(&self, post: &Post, actor_id: Uuid) -> CoreResult<Vec<Notification>> {
        if post.author_id != actor_id {
            return Err(CoreError::Forbidden(
                "actor is not the post author".to_string(),
            ));
        }
        self.db.with_tx(|tx| {
            dao::posts::find_by_id(tx, post.id)?;
            self.dispatch_post_mentions(tx, post)
        })
    }

    /// Re-run mention fan-out over a post's new content. Users mentioned
    /// in the previous content but no longer in the new one keep whatever
    /// notifications they had.
    pub fn on_post_updated(
        &self,
        post: &Post,
        actor_id: Uuid,
        previous_content: &str,
    ) -> CoreResult<Vec<Notification>> {
        if post.author_id != actor_id {
            return Err(CoreError::Forbidden(
                "actor is not the post author".to_string(),
            ));
        }

        let dropped = dropped_mentions(previous_content, &post.content);
        if dropped > 0 {
            debug!(post_id = %post.id, dropped, "mentions removed by the edit are left untouched");
        }

        self.db.with_tx(|tx| {
            dao::posts::find_by_id(tx, post.id)?;
            self.dispatch_post_mentions(tx, post)
        })
    }

    /// Notify the post author and any mentioned users for a comment that
    /// is already persisted.
    pub fn on_comment_created(
        &self,
        comment: &Comment,
        actor_id: Uuid,
    ) -> CoreResult<Vec<Notification>> {
        if comment.author_id != actor_id {
            return Err(CoreError::Forbidden(
                "actor is not the comment author".to_string(),
            ));
        }
        self.db.with_tx(|tx| {
            dao::comments::find_by_id(tx, comment.id)?;
            let post = dao::posts::find_by_id(tx, comment.post_id)?;
            self.dispatch_comment(tx, comment, post.author_id)
        })
    }

    /// Mention fan-out shared by post creation and post update: every
    /// mentioned user except the author gets `mentioned_in_post`, unless
    /// a block edge in either direction suppresses it.
    pub(crate) fn dispatch_post_mentions(
        &self,
        conn: &Connection,
        post: &Post,
    ) -> CoreResult<Vec<Notification>> {
        let mut written = Vec::new();

        for user_id in extract_mentions(&post.content) {
            if user_id == post.author_id {
                continue;
            }
            if !dao::users::exists(conn, user_id)? {
                debug!(%user_id, post_id = %post.id, "mentioned user does not exist, skipping");
                continue;
            }
            if dao::blocks::is_blocked(conn, user_id, post.author_id)? {
                continue;
            }
            written.push(dao::notifications::upsert(
                conn,
                user_id,
                SourceKind::Post,
                post.id,
                NotificationReason::MentionedInPost,
            )?);
        }

        Ok(written)
    }

    /// Comment fan-out. The post author hears `commented_on_post` first;
    /// a mention of the post author in the same comment never produces a
    /// second notification. Remaining mentioned users get
    /// `mentioned_in_comment`, block edges permitting.
    pub(crate) fn dispatch_comment(
        &self,
        conn: &Connection,
        comment: &Comment,
        post_author_id: Uuid,
    ) -> CoreResult<Vec<Notification>> {
        let mut written = Vec::new();
        let mut author_notified = false;

        if post_author_id != comment.author_id
            && !dao::blocks::is_blocked(conn, post_author_id, comment.author_id)?
        {
            written.push(dao::notifications::upsert(
                conn,
                post_author_id,
                SourceKind::Comment,
                comment.id,
                NotificationReason::CommentedOnPost,
            )?);
            author_notified = true;
        }

        for user_id in extract_mentions(&comment.content) {
            if user_id == comment.author_id {
                continue;
            }
            if user_id == post_author_id && author_notified {
                continue;
            }
            if !dao::users::exists(conn, user_id)? {
                debug!(%user_id, comment_id = %comment.id, "mentioned user does not exist, skipping");
                continue;
            }
            if dao::blocks::is_blocked(conn, user_id, comment.author_id)? {
                continue;
            }
            written.push(dao::notifications::upsert(
                conn,
                user_id,
                SourceKind::Comment,
                comment.id,
                NotificationReason::MentionedInComment,
            )?);
        }

        Ok(written)
    }

    /// Report fan-out to an externally-decided recipient set. Roster
    /// recipients are still block-filtered against the report creator;
    /// the creator always hears about their own filing.
    pub(crate) fn dispatch_report(
        &self,
        conn: &Connection,
        report: &Report,
        recipients: &[Uuid],
    ) -> CoreResult<Vec<Notification>> {
        let mut written = Vec::new();
        let mut seen = Vec::new();

        for &recipient_id in recipients {
            if seen.contains(&recipient_id) {
                continue;
            }
            seen.push(recipient_id);

            if !dao::users::exists(conn, recipient_id)? {
                debug!(%recipient_id, report_id = %report.id, "report recipient does not exist, skipping");
                continue;
            }
            if recipient_id != report.creator_id
                && dao::blocks::is_blocked(conn, recipient_id, report.creator_id)?
            {
                continue;
            }
            written.push(dao::notifications::upsert(
                conn,
                recipient_id,
                SourceKind::Report,
                report.id,
                NotificationReason::FiledReportOnResource,
            )?);
        }

        Ok(written)
    }

    /// Notifications for one recipient, newest activity first, with the
    /// `from` resource resolved to its concrete projection.
    pub fn list_notifications(
        &self,
        recipient_id: Uuid,
        filter: ReadFilter,
        params: &PaginationParams,
    ) -> CoreResult<PaginatedResult<NotificationView>> {
        let requested = if params.per_page == 0 {
            self.settings.default_page_size
        } else {
            params.per_page
        };
        let per_page = requested.clamp(1, self.settings.max_page_size);
        let page = params.page.max(1);

        self.db.with_conn(|conn| {
            let (rows, total) =
                dao::notifications::list_for_recipient(conn, recipient_id, filter, page, per_page)?;

            let mut items = Vec::with_capacity(rows.len());
            for notification in rows {
                let from = self.resolve_source(conn, &notification)?;
                items.push(NotificationView {
                    id: notification.id,
                    recipient_id: notification.recipient_id,
                    reason: notification.reason,
                    from,
                    read: notification.read,
                    created_at: notification.created_at,
                    updated_at: notification.updated_at,
                });
            }

            let total_pages = (total + per_page - 1) / per_page;

            Ok(PaginatedResult {
                items,
                total,
                page,
                per_page,
                total_pages,
            })
        })
    }

    pub fn unread_count(&self, recipient_id: Uuid) -> CoreResult<u64> {
        self.db
            .with_conn(|conn| dao::notifications::unread_count(conn, recipient_id))
    }

    /// Flips `read` to true. `created_at` and `updated_at` stay as they
    /// are; only a re-triggering event moves them.
    pub fn mark_as_read(&self, id: Uuid) -> CoreResult<()> {
        self.db
            .with_conn(|conn| dao::notifications::mark_as_read(conn, id))
    }

    pub fn mark_all_read(&self, recipient_id: Uuid) -> CoreResult<u64> {
        self.db
            .with_conn(|conn| dao::notifications::mark_all_read(conn, recipient_id))
    }

    /// Resolve `from` to its concrete projection. A source row deleted
    /// out from under the notification surfaces as NotFound.
    fn resolve_source(
        &self,
        conn: &Connection,
        notification: &Notification,
    ) -> CoreResult<NotificationSource> {
        let source = match notification.from_kind {
            SourceKind::Post => dao::posts::try_find_by_id(conn, notification.from_id)?.map(
                |post| NotificationSource::Post {
                    id: post.id,
                    author_id: post.author_id,
                    content: post.content,
                },
            ),
            SourceKind::Comment => dao::comments::try_find_by_id(conn, notification.from_id)?
                .map(|comment| NotificationSource::Comment {
                    id: comment.id,
                    post_id: comment.post_id,
                    author_id: comment.author_id,
                    content: comment.content,
                }),
            SourceKind::Report => match dao::reports::try_find_by_id(conn, notification.from_id)? {
                None => None,
                Some(report) => {
                    dao::reports::resolve_reported(conn, report.reported_kind, report.reported_id)?
                        .map(|reported_resource| NotificationSource::Report {
                            id: report.id,
                            creator_id: report.creator_id,
                            filed: vec![ReportFiling {
                                category: report.category,
                                reason: report.reason,
                                reported_resource,
                            }],
                        })
                }
            },
        };
        source.ok_or(CoreError::NotFound("notification source"))
    }
}

fn dropped_mentions(previous: &str, current: &str) -> usize {
    let still_mentioned = extract_mentions(current);
    extract_mentions(previous)
        .into_iter()
        .filter(|id| !still_mentioned.contains(id))
        .count()
}
