use crier_db::models::{NotificationReason, NotificationSource};
use crier_services::CoreError;
use uuid::Uuid;

use crate::fixtures::seed::mention;
use crate::fixtures::test_engine::TestEngine;

#[test]
fn comment_notifies_post_author() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    let post = app
        .engine
        .posts
        .create(pair.author.id, "<p>A post worth commenting on.</p>")
        .unwrap();
    let comment = app
        .engine
        .comments
        .create(pair.commenter.id, &post.id.to_string(), "Commenters comment.")
        .unwrap();

    let inbox = app.inbox(pair.author.id);
    assert_eq!(inbox.len(), 1);

    let n = &inbox[0];
    assert_eq!(n.reason, NotificationReason::CommentedOnPost);
    assert!(!n.read);
    match &n.from {
        NotificationSource::Comment { id, post_id, content, .. } => {
            assert_eq!(*id, comment.id);
            assert_eq!(*post_id, post.id);
            assert_eq!(content, "Commenters comment.");
        }
        other => panic!("expected comment source, got {other:?}"),
    }

    assert_eq!(
        app.rows_for_key(pair.author.id, comment.id, NotificationReason::CommentedOnPost),
        1
    );
}

#[test]
fn commenting_on_own_post_is_silent() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    let post = app
        .engine
        .posts
        .create(pair.author.id, "<p>Talking to myself.</p>")
        .unwrap();
    app.engine
        .comments
        .create(pair.author.id, &post.id.to_string(), "Still me.")
        .unwrap();

    assert_eq!(app.table_count("notifications"), 0);
}

#[test]
fn blocked_commenter_never_reaches_the_author() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    app.engine.blocks.block(pair.author.id, pair.commenter.id).unwrap();

    let post = app
        .engine
        .posts
        .create(pair.author.id, "<p>A post worth commenting on.</p>")
        .unwrap();
    app.engine
        .comments
        .create(pair.commenter.id, &post.id.to_string(), "Commenters comment.")
        .unwrap();

    assert_eq!(app.table_count("comments"), 1);
    assert_eq!(app.table_count("notifications"), 0);
}

#[test]
fn block_suppresses_regardless_of_direction() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    // The commenter is the one who created the edge this time.
    app.engine.blocks.block(pair.commenter.id, pair.author.id).unwrap();

    let post = app
        .engine
        .posts
        .create(pair.author.id, "<p>Anyone there?</p>")
        .unwrap();
    app.engine
        .comments
        .create(pair.commenter.id, &post.id.to_string(), "Commenters comment.")
        .unwrap();

    assert_eq!(app.table_count("notifications"), 0);
}

#[test]
fn blank_post_reference_fails_before_anything_is_written() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    for raw in ["", "   ", "\n\t "] {
        let result = app.engine.comments.create(pair.commenter.id, raw, "Hello?");
        assert!(matches!(result, Err(CoreError::Validation(_))), "for {raw:?}");
    }

    assert_eq!(app.table_count("comments"), 0);
    assert_eq!(app.table_count("notifications"), 0);
}

#[test]
fn unknown_post_reference_is_not_found() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    let result = app
        .engine
        .comments
        .create(pair.commenter.id, &Uuid::new_v4().to_string(), "Hello?");
    assert!(matches!(result, Err(CoreError::NotFound("post"))));

    assert_eq!(app.table_count("comments"), 0);
    assert_eq!(app.table_count("notifications"), 0);
}

#[test]
fn comment_body_must_survive_markup_stripping() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    let post = app
        .engine
        .posts
        .create(pair.author.id, "<p>A post.</p>")
        .unwrap();

    for body in ["", "   ", "<p>   </p>", "<br><br>"] {
        let result = app
            .engine
            .comments
            .create(pair.commenter.id, &post.id.to_string(), body);
        assert!(matches!(result, Err(CoreError::Validation(_))), "for {body:?}");
    }

    assert_eq!(app.table_count("comments"), 0);
    assert_eq!(app.table_count("notifications"), 0);
}

#[test]
fn mention_in_comment_notifies_the_mentioned_user() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();
    let bystander = app.seed_user("Bystander", "bystander");

    let post = app
        .engine
        .posts
        .create(pair.author.id, "<p>A post.</p>")
        .unwrap();
    let body = format!("<p>cc {}</p>", mention(&bystander));
    let comment = app
        .engine
        .comments
        .create(pair.commenter.id, &post.id.to_string(), &body)
        .unwrap();

    let inbox = app.inbox(bystander.id);
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].reason, NotificationReason::MentionedInComment);
    match &inbox[0].from {
        NotificationSource::Comment { id, .. } => assert_eq!(*id, comment.id),
        other => panic!("expected comment source, got {other:?}"),
    }
}

#[test]
fn post_author_mentioned_on_their_own_post_hears_once() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    let post = app
        .engine
        .posts
        .create(pair.author.id, "<p>A post.</p>")
        .unwrap();
    let body = format!("<p>great point {}</p>", mention(&pair.author));
    app.engine
        .comments
        .create(pair.commenter.id, &post.id.to_string(), &body)
        .unwrap();

    let inbox = app.inbox(pair.author.id);
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].reason, NotificationReason::CommentedOnPost);
}

#[test]
fn comment_author_mentioning_themself_is_silent() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    let post = app
        .engine
        .posts
        .create(pair.author.id, "<p>A post.</p>")
        .unwrap();
    let body = format!("<p>as I, {}, said</p>", mention(&pair.commenter));
    app.engine
        .comments
        .create(pair.commenter.id, &post.id.to_string(), &body)
        .unwrap();

    // Only the commented-on-post notification to the author remains.
    assert_eq!(app.inbox(pair.commenter.id).len(), 0);
    assert_eq!(app.inbox(pair.author.id).len(), 1);
}

#[test]
fn blocked_mention_in_comment_is_suppressed_but_others_hear() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();
    let blocked = app.seed_user("Blocked", "blocked");
    let bystander = app.seed_user("Bystander", "bystander");

    app.engine.blocks.block(blocked.id, pair.commenter.id).unwrap();

    let post = app
        .engine
        .posts
        .create(pair.author.id, "<p>A post.</p>")
        .unwrap();
    let body = format!("<p>{} {}</p>", mention(&blocked), mention(&bystander));
    app.engine
        .comments
        .create(pair.commenter.id, &post.id.to_string(), &body)
        .unwrap();

    assert_eq!(app.inbox(blocked.id).len(), 0);
    assert_eq!(app.inbox(bystander.id).len(), 1);
    assert_eq!(app.inbox(pair.author.id).len(), 1);
}

#[test]
fn on_comment_created_rejects_a_foreign_actor() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    let post = app
        .engine
        .posts
        .create(pair.author.id, "<p>A post.</p>")
        .unwrap();
    let comment = app
        .engine
        .comments
        .create(pair.commenter.id, &post.id.to_string(), "Mine.")
        .unwrap();

    let result = app.engine.notify.on_comment_created(&comment, pair.author.id);
    assert!(matches!(result, Err(CoreError::Forbidden(_))));
}

#[test]
fn re_running_comment_dispatch_does_not_duplicate() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    let post = app
        .engine
        .posts
        .create(pair.author.id, "<p>A post.</p>")
        .unwrap();
    let comment = app
        .engine
        .comments
        .create(pair.commenter.id, &post.id.to_string(), "Commenters comment.")
        .unwrap();

    // The surrounding layer may replay the event; the upsert absorbs it.
    app.engine
        .notify
        .on_comment_created(&comment, pair.commenter.id)
        .unwrap();
    app.engine
        .notify
        .on_comment_created(&comment, pair.commenter.id)
        .unwrap();

    assert_eq!(
        app.rows_for_key(pair.author.id, comment.id, NotificationReason::CommentedOnPost),
        1
    );
    assert_eq!(app.table_count("notifications"), 1);
}
