use std::sync::Arc;

use crier_config::ContentSettings;
use crier_db::Database;
use crier_db::models::{self, Post};
use uuid::Uuid;

use crate::content;
use crate::dao;
use crate::error::{CoreError, CoreResult};
use crate::notify::NotifyService;

#[derive(Clone)]
pub struct PostService {
    db: Arc<Database>,
    content: ContentSettings,
    notify: NotifyService,
}

impl PostService {
    pub fn new(db: Arc<Database>, content: ContentSettings, notify: NotifyService) -> Self {
        Self {
            db,
            content,
            notify,
        }
    }

    /// Create a post and fan out mention notifications in one transaction.
    /// The body is validated and rewritten to storage form first.
    pub fn create(&self, actor_id: Uuid, content: &str) -> CoreResult<Post> {
        let body = content::prepare(content, &self.content)?;
        self.db.with_tx(|tx| {
            dao::users::find_by_id(tx, actor_id)?;
            let post = dao::posts::create(tx, actor_id, &body)?;
            self.notify.dispatch_post_mentions(tx, &post)?;
            Ok(post)
        })
    }

    /// Replace a post's content. Users mentioned in the new content are
    /// re-notified through the usual upsert; users whose mention vanished
    /// keep the notifications they already have.
    pub fn update(&self, actor_id: Uuid, post_id: Uuid, content: &str) -> CoreResult<Post> {
        let body = content::prepare(content, &self.content)?;
        self.db.with_tx(|tx| {
            let mut post = dao::posts::find_by_id(tx, post_id)?;
            if post.author_id != actor_id {
                return Err(CoreError::Forbidden(
                    "only the author can edit a post".to_string(),
                ));
            }
            let ts = models::now();
            dao::posts::update_content(tx, post_id, &body, ts)?;
            post.content = body;
            post.updated_at = ts;
            self.notify.dispatch_post_mentions(tx, &post)?;
            Ok(post)
        })
    }

    pub fn find(&self, id: Uuid) -> CoreResult<Post> {
        self.db.with_conn(|conn| dao::posts::find_by_id(conn, id))
    }
}
