use std::thread::sleep;
use std::time::Duration;

use crier_db::models::{NotificationReason, NotificationSource};
use uuid::Uuid;

use crate::fixtures::seed::{dangling_mention, mention, rewritten_mention};
use crate::fixtures::test_engine::TestEngine;

/// Enough to land the next write on a different millisecond.
fn tick() {
    sleep(Duration::from_millis(5));
}

#[test]
fn mention_in_post_notifies_with_rewritten_content() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    let raw = format!("<p>hey {}, look at this</p>", mention(&pair.author));
    let post = app.engine.posts.create(pair.commenter.id, &raw).unwrap();

    let expected = format!("hey {}, look at this", rewritten_mention(&pair.author));
    assert_eq!(post.content, expected);

    let inbox = app.inbox(pair.author.id);
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].reason, NotificationReason::MentionedInPost);
    assert!(!inbox[0].read);
    match &inbox[0].from {
        NotificationSource::Post { id, author_id, content } => {
            assert_eq!(*id, post.id);
            assert_eq!(*author_id, pair.commenter.id);
            assert_eq!(content, &expected);
        }
        other => panic!("expected post source, got {other:?}"),
    }
}

#[test]
fn self_mention_is_silent() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    let raw = format!("<p>note to self: {}</p>", mention(&pair.author));
    app.engine.posts.create(pair.author.id, &raw).unwrap();

    assert_eq!(app.table_count("notifications"), 0);
}

#[test]
fn repeated_mentions_in_one_post_collapse() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    let m = mention(&pair.author);
    let raw = format!("<p>{m} {m} and once more {m}</p>");
    let post = app.engine.posts.create(pair.commenter.id, &raw).unwrap();

    assert_eq!(
        app.rows_for_key(pair.author.id, post.id, NotificationReason::MentionedInPost),
        1
    );
    assert_eq!(app.table_count("notifications"), 1);
}

#[test]
fn three_edits_keep_one_row_and_the_original_created_at() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    let m = mention(&pair.author);
    let post = app
        .engine
        .posts
        .create(pair.commenter.id, &format!("<p>{m}</p>"))
        .unwrap();

    let first = app.inbox(pair.author.id).remove(0);

    for edit in 1..=3 {
        tick();
        app.engine
            .posts
            .update(
                pair.commenter.id,
                post.id,
                &format!("<p>edit {edit}: {m} {m}</p>"),
            )
            .unwrap();
    }

    let inbox = app.inbox(pair.author.id);
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].created_at, first.created_at);
    assert!(inbox[0].updated_at > first.updated_at);
    assert_eq!(
        app.rows_for_key(pair.author.id, post.id, NotificationReason::MentionedInPost),
        1
    );
}

#[test]
fn re_mention_after_read_resets_read_and_keeps_created_at() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    let m = mention(&pair.author);
    let post = app
        .engine
        .posts
        .create(pair.commenter.id, &format!("<p>{m}</p>"))
        .unwrap();

    let original = app.inbox(pair.author.id).remove(0);
    app.engine.notify.mark_as_read(original.id).unwrap();
    assert!(app.inbox(pair.author.id)[0].read);

    tick();
    app.engine
        .posts
        .update(pair.commenter.id, post.id, &format!("<p>again: {m}</p>"))
        .unwrap();

    let refreshed = app.inbox(pair.author.id).remove(0);
    assert_eq!(refreshed.id, original.id);
    assert!(!refreshed.read);
    assert_eq!(refreshed.created_at, original.created_at);
    assert!(refreshed.updated_at > original.updated_at);
}

#[test]
fn removing_a_mention_retracts_nothing() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    let post = app
        .engine
        .posts
        .create(
            pair.commenter.id,
            &format!("<p>hi {}</p>", mention(&pair.author)),
        )
        .unwrap();
    let original = app.inbox(pair.author.id).remove(0);

    app.engine
        .posts
        .update(pair.commenter.id, post.id, "<p>nothing to see here</p>")
        .unwrap();

    let inbox = app.inbox(pair.author.id);
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].id, original.id);
    assert_eq!(inbox[0].updated_at, original.updated_at);
}

#[test]
fn mention_of_an_unknown_user_is_passed_over() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    let raw = format!("<p>{}</p>", dangling_mention(Uuid::new_v4()));
    app.engine.posts.create(pair.commenter.id, &raw).unwrap();

    assert_eq!(app.table_count("notifications"), 0);
}

#[test]
fn blocked_mention_in_post_is_suppressed() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();

    app.engine.blocks.block(pair.author.id, pair.commenter.id).unwrap();

    let raw = format!("<p>hi {}</p>", mention(&pair.author));
    app.engine.posts.create(pair.commenter.id, &raw).unwrap();

    assert_eq!(app.inbox(pair.author.id).len(), 0);

    // Lifting the block restores delivery on the next edit.
    app.engine.blocks.unblock(pair.author.id, pair.commenter.id).unwrap();
    let post = app
        .engine
        .posts
        .create(pair.commenter.id, &format!("<p>retry {}</p>", mention(&pair.author)))
        .unwrap();

    let inbox = app.inbox(pair.author.id);
    assert_eq!(inbox.len(), 1);
    match &inbox[0].from {
        NotificationSource::Post { id, .. } => assert_eq!(*id, post.id),
        other => panic!("expected post source, got {other:?}"),
    }
}

#[test]
fn several_mentioned_users_each_hear_once() {
    let app = TestEngine::spawn();
    let pair = app.seed_pair();
    let third = app.seed_user("Third", "third");

    let raw = format!(
        "<p>{} meet {}</p>",
        mention(&pair.author),
        mention(&third)
    );
    let post = app.engine.posts.create(pair.commenter.id, &raw).unwrap();

    for user in [&pair.author, &third] {
        assert_eq!(
            app.rows_for_key(user.id, post.id, NotificationReason::MentionedInPost),
            1,
            "for {}",
            user.slug
        );
    }
    assert_eq!(app.table_count("notifications"), 2);
}
