use std::sync::Arc;

use crier_config::ContentSettings;
use crier_db::Database;
use crier_db::models::Comment;
use uuid::Uuid;

use crate::content;
use crate::dao;
use crate::error::{CoreError, CoreResult};
use crate::notify::NotifyService;

#[derive(Clone)]
pub struct CommentService {
    db: Arc<Database>,
    content: ContentSettings,
    notify: NotifyService,
}

impl CommentService {
    pub fn new(db: Arc<Database>, content: ContentSettings, notify: NotifyService) -> Self {
        Self {
            db,
            content,
            notify,
        }
    }

    /// Create a comment and fan out its notifications in one transaction.
    ///
    /// The parent reference arrives as a raw string: blank or malformed
    /// ids fail validation, a well-formed id that matches no post is
    /// NotFound. A comment never exists without a resolvable parent.
    pub fn create(&self, actor_id: Uuid, post_id: &str, content: &str) -> CoreResult<Comment> {
        let post_id = parse_post_ref(post_id)?;
        let body = content::prepare(content, &self.content)?;
        self.db.with_tx(|tx| {
            dao::users::find_by_id(tx, actor_id)?;
            let post = dao::posts::find_by_id(tx, post_id)?;
            let comment = dao::comments::create(tx, post.id, actor_id, &body)?;
            self.notify.dispatch_comment(tx, &comment, post.author_id)?;
            Ok(comment)
        })
    }

    pub fn find(&self, id: Uuid) -> CoreResult<Comment> {
        self.db.with_conn(|conn| dao::comments::find_by_id(conn, id))
    }

    pub fn list_for_post(&self, post_id: Uuid) -> CoreResult<Vec<Comment>> {
        self.db
            .with_conn(|conn| dao::comments::list_for_post(conn, post_id))
    }
}

fn parse_post_ref(raw: &str) -> CoreResult<Uuid> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "comment requires a parent post".to_string(),
        ));
    }
    Uuid::parse_str(trimmed)
        .map_err(|_| CoreError::Validation(format!("malformed post reference: {raw:?}")))
}
