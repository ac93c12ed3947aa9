use crier_db::models::User;
use crier_services::dao;
use uuid::Uuid;

use super::test_engine::TestEngine;

/// The recurring cast of the notification scenarios: a post author and
/// someone who comments on their posts.
pub struct SeededPair {
    pub author: User,
    pub commenter: User,
}

impl TestEngine {
    /// Insert a user directly; user provisioning is outside the engine.
    pub fn seed_user(&self, name: &str, slug: &str) -> User {
        self.engine
            .db
            .with_conn(|conn| dao::users::create(conn, name, slug))
            .expect("seed user")
    }

    pub fn seed_pair(&self) -> SeededPair {
        SeededPair {
            author: self.seed_user("You", "you"),
            commenter: self.seed_user("Mrs Comment", "mrs-comment"),
        }
    }
}

/// Mention markup the way the rich-text editor emits it.
pub fn mention(user: &User) -> String {
    format!(
        "<a class=\"mention\" data-user-id=\"{}\" href=\"/u/{}\">@{}</a>",
        user.id, user.slug, user.name
    )
}

/// The same mention after the storage rewrite.
pub fn rewritten_mention(user: &User) -> String {
    format!(
        "<a class=\"mention\" data-user-id=\"{}\" href=\"/u/{}\" target=\"_blank\">@{}</a>",
        user.id, user.slug, user.name
    )
}

/// A mention of a user id no `users` row backs.
pub fn dangling_mention(id: Uuid) -> String {
    format!("<a class=\"mention\" data-user-id=\"{id}\" href=\"/u/ghost\">@ghost</a>")
}
