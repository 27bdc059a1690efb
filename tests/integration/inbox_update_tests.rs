//! Integration tests for the list update flow.
//!
//! Replies to the update address are routed by the `[id:...]` marker in
//! the subject and classified into add / done / reset / delete / comment.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use serde_json::Value;

use inbox_todo::persistence::{ListRepo, ParticipantRepo, TaskRepo};

use super::test_helpers::{
    body_json, inbound_json, post_inbox, test_router, CREATE_ADDRESS, SECURITY_KEY,
    UPDATE_ADDRESS,
};

/// Create a list with two tasks, returning its identifier.
async fn seed_list(router: &Router) -> String {
    let payload = inbound_json(
        CREATE_ADDRESS,
        "Jane <jane@doe.com>",
        "Groceries",
        "- milk\n- bread",
    );
    let response = post_inbox(router, Some(SECURITY_KEY), &payload).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    body["list_id"].as_str().expect("list id").to_owned()
}

/// POST an update email for the given list and return its parsed body.
async fn update(router: &Router, list_id: &str, from: &str, plain: &str) -> (StatusCode, Value) {
    let subject = format!("Re: Groceries [id:{list_id}]");
    let payload = inbound_json(UPDATE_ADDRESS, from, &subject, plain);
    let response = post_inbox(router, Some(SECURITY_KEY), &payload).await;
    let status = response.status();
    (status, body_json(response).await)
}

// ── Add ──────────────────────────────────────────────────────

#[tokio::test]
async fn add_appends_a_numbered_task() {
    let (router, database) = test_router().await;
    let list_id = seed_list(&router).await;

    let (status, body) = update(&router, &list_id, "jane@doe.com", "add: eggs [due: 2030-01-02]").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "updated");

    let tasks = TaskRepo::new(database).list_for(&list_id).await.expect("query");
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[2].num, 3);
    assert_eq!(tasks[2].text, "eggs [due: 2030-01-02]");
    assert_eq!(tasks[2].due, "2030-01-02 00:00:00");
}

// ── Done / reset / delete ────────────────────────────────────

#[tokio::test]
async fn done_marks_the_task() {
    let (router, database) = test_router().await;
    let list_id = seed_list(&router).await;

    let (status, body) = update(&router, &list_id, "jane@doe.com", "done 1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "updated");

    let task = TaskRepo::new(database)
        .get(&list_id, 1)
        .await
        .expect("query")
        .expect("task");
    assert!(task.done);
}

#[tokio::test]
async fn reset_reopens_a_done_task() {
    let (router, database) = test_router().await;
    let list_id = seed_list(&router).await;

    update(&router, &list_id, "jane@doe.com", "done 2").await;
    let (status, _) = update(&router, &list_id, "jane@doe.com", "reset 2").await;
    assert_eq!(status, StatusCode::OK);

    let task = TaskRepo::new(database)
        .get(&list_id, 2)
        .await
        .expect("query")
        .expect("task");
    assert!(!task.done);
}

#[tokio::test]
async fn delete_removes_the_task() {
    let (router, database) = test_router().await;
    let list_id = seed_list(&router).await;

    let (status, _) = update(&router, &list_id, "jane@doe.com", "delete 1").await;
    assert_eq!(status, StatusCode::OK);

    let repo = TaskRepo::new(database);
    assert!(repo.get(&list_id, 1).await.expect("query").is_none());
    // Deleted numbers are not reused.
    assert_eq!(repo.next_num(&list_id).await.expect("query"), 3);
}

#[tokio::test]
async fn unknown_task_number_is_a_no_op() {
    let (router, database) = test_router().await;
    let list_id = seed_list(&router).await;

    let (status, body) = update(&router, &list_id, "jane@doe.com", "done 99").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "no such task");
    assert_eq!(body["num"], 99);

    let tasks = TaskRepo::new(database).list_for(&list_id).await.expect("query");
    assert!(tasks.iter().all(|t| !t.done));
}

// ── Comment ──────────────────────────────────────────────────

#[tokio::test]
async fn plain_reply_is_a_comment_and_changes_nothing() {
    let (router, database) = test_router().await;
    let list_id = seed_list(&router).await;

    let (status, body) = update(
        &router,
        &list_id,
        "john@doe.com",
        "Sounds good!\n\n> quoted reply",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "updated");

    let tasks = TaskRepo::new(database).list_for(&list_id).await.expect("query");
    assert_eq!(tasks.len(), 2);
}

// ── Participant bookkeeping ──────────────────────────────────

#[tokio::test]
async fn replying_sender_becomes_a_participant() {
    let (router, database) = test_router().await;
    let list_id = seed_list(&router).await;

    update(&router, &list_id, "New Guy <new@doe.com>", "add: chips").await;

    let participants = ParticipantRepo::new(database)
        .list_for(&list_id)
        .await
        .expect("query");
    let emails: Vec<&str> = participants.iter().map(|p| p.email.as_str()).collect();
    assert!(emails.contains(&"new@doe.com"));
}

#[tokio::test]
async fn update_bumps_the_list_timestamp() {
    let (router, database) = test_router().await;
    let list_id = seed_list(&router).await;

    let repo = ListRepo::new(Arc::clone(&database));
    let before = repo
        .get_by_id(&list_id)
        .await
        .expect("query")
        .expect("list");

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    update(&router, &list_id, "jane@doe.com", "done 1").await;

    let after = repo
        .get_by_id(&list_id)
        .await
        .expect("query")
        .expect("list");
    assert!(after.updated_at > before.updated_at);
}

// ── Routing failures ─────────────────────────────────────────

#[tokio::test]
async fn subject_without_marker_is_rejected() {
    let (router, _database) = test_router().await;
    seed_list(&router).await;

    let payload = inbound_json(UPDATE_ADDRESS, "jane@doe.com", "Re: Groceries", "done 1");
    let response = post_inbox(&router, Some(SECURITY_KEY), &payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_list_id_is_rejected() {
    let (router, _database) = test_router().await;

    let payload = inbound_json(
        UPDATE_ADDRESS,
        "jane@doe.com",
        "Re: Ghost [id:deadbeef]",
        "done 1",
    );
    let response = post_inbox(&router, Some(SECURITY_KEY), &payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("unknown list"));
}
