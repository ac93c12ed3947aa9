use std::sync::Arc;

use crier_db::Database;
use crier_db::models::{Notification, Report, ReportCategory, ResourceKind};
use uuid::Uuid;

use crate::dao;
use crate::error::{CoreError, CoreResult};
use crate::notify::NotifyService;

/// Decides who hears about a filed report. Routing is a product policy,
/// so it sits behind a trait the embedding layer can swap out.
pub trait ModerationRoster: Send + Sync {
    fn recipients(&self, report: &Report) -> Vec<Uuid>;
}

/// Default roster: route the filing back to the user who filed it, as a
/// receipt that the report went through.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotifyFiler;

impl ModerationRoster for NotifyFiler {
    fn recipients(&self, report: &Report) -> Vec<Uuid> {
        vec![report.creator_id]
    }
}

#[derive(Clone)]
pub struct ReportService {
    db: Arc<Database>,
    notify: NotifyService,
    roster: Arc<dyn ModerationRoster>,
}

impl ReportService {
    pub fn new(
        db: Arc<Database>,
        notify: NotifyService,
        roster: Arc<dyn ModerationRoster>,
    ) -> Self {
        Self { db, notify, roster }
    }

    /// File a report against a user, post, or comment. The reported
    /// resource must exist at filing time; the report row and its
    /// notifications land in one transaction. Reports are immutable
    /// once filed.
    pub fn file(
        &self,
        actor_id: Uuid,
        category: ReportCategory,
        reason: &str,
        reported_kind: ResourceKind,
        reported_id: Uuid,
    ) -> CoreResult<Report> {
        if reason.trim().is_empty() {
            return Err(CoreError::Validation(
                "report reason must not be blank".to_string(),
            ));
        }
        self.db.with_tx(|tx| {
            dao::users::find_by_id(tx, actor_id)?;
            if dao::reports::resolve_reported(tx, reported_kind, reported_id)?.is_none() {
                return Err(CoreError::NotFound("reported resource"));
            }
            let report =
                dao::reports::create(tx, actor_id, category, reason, reported_kind, reported_id)?;
            let recipients = self.roster.recipients(&report);
            self.notify.dispatch_report(tx, &report, &recipients)?;
            Ok(report)
        })
    }

    /// Re-run notification routing for an already-persisted report.
    pub fn on_report_filed(
        &self,
        report: &Report,
        actor_id: Uuid,
    ) -> CoreResult<Vec<Notification>> {
        if report.creator_id != actor_id {
            return Err(CoreError::Forbidden(
                "actor did not file this report".to_string(),
            ));
        }
        self.db.with_tx(|tx| {
            dao::reports::find_by_id(tx, report.id)?;
            let recipients = self.roster.recipients(report);
            self.notify.dispatch_report(tx, report, &recipients)
        })
    }

    pub fn find(&self, id: Uuid) -> CoreResult<Report> {
        self.db.with_conn(|conn| dao::reports::find_by_id(conn, id))
    }

    pub fn list_by_creator(&self, creator_id: Uuid) -> CoreResult<Vec<Report>> {
        self.db
            .with_conn(|conn| dao::reports::list_by_creator(conn, creator_id))
    }

    pub fn list_for_resource(
        &self,
        reported_kind: ResourceKind,
        reported_id: Uuid,
    ) -> CoreResult<Vec<Report>> {
        self.db
            .with_conn(|conn| dao::reports::list_for_resource(conn, reported_kind, reported_id))
    }
}
