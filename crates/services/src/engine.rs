use std::sync::Arc;

use crier_config::Settings;
use crier_db::Database;

use crate::blocklist::BlockService;
use crate::comments::CommentService;
use crate::notify::NotifyService;
use crate::posts::PostService;
use crate::reports::{ModerationRoster, NotifyFiler, ReportService};

/// All services wired over one database handle.
#[derive(Clone)]
pub struct Engine {
    pub db: Arc<Database>,
    pub settings: Settings,
    pub blocks: BlockService,
    pub notify: NotifyService,
    pub posts: PostService,
    pub comments: CommentService,
    pub reports: ReportService,
}

impl Engine {
    pub fn new(db: Arc<Database>, settings: Settings) -> Self {
        Self::with_roster(db, settings, Arc::new(NotifyFiler))
    }

    pub fn with_roster(
        db: Arc<Database>,
        settings: Settings,
        roster: Arc<dyn ModerationRoster>,
    ) -> Self {
        let notify = NotifyService::new(db.clone(), settings.notifications.clone());
        let blocks = BlockService::new(db.clone());
        let posts = PostService::new(db.clone(), settings.content.clone(), notify.clone());
        let comments = CommentService::new(db.clone(), settings.content.clone(), notify.clone());
        let reports = ReportService::new(db.clone(), notify.clone(), roster);

        Self {
            db,
            settings,
            blocks,
            notify,
            posts,
            comments,
            reports,
        }
    }
}
