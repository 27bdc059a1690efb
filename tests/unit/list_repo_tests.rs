//! Unit tests for the list repository.

use std::sync::Arc;

use inbox_todo::models::TodoList;
use inbox_todo::persistence::{db, ListRepo};

async fn repo() -> ListRepo {
    let database = Arc::new(db::connect_memory().await.expect("db connect"));
    ListRepo::new(database)
}

fn sample_list() -> TodoList {
    TodoList::new(
        "jane@doe.com".to_owned(),
        "Groceries".to_owned(),
        "Weekly run".to_owned(),
    )
}

// ── Create and fetch ─────────────────────────────────────────

#[tokio::test]
async fn create_then_get_round_trips() {
    let repo = repo().await;
    let list = sample_list();

    repo.create(&list).await.expect("create");
    let fetched = repo
        .get_by_id(&list.id)
        .await
        .expect("query")
        .expect("list exists");

    assert_eq!(fetched.id, list.id);
    assert_eq!(fetched.owner, "jane@doe.com");
    assert_eq!(fetched.title, "Groceries");
    assert_eq!(fetched.description, "Weekly run");
    assert_eq!(fetched.created_at, list.created_at);
}

#[tokio::test]
async fn get_unknown_id_returns_none() {
    let repo = repo().await;
    let fetched = repo.get_by_id("missing").await.expect("query");
    assert!(fetched.is_none());
}

#[tokio::test]
async fn duplicate_id_insert_fails() {
    let repo = repo().await;
    let list = sample_list();

    repo.create(&list).await.expect("create");
    assert!(repo.create(&list).await.is_err());
}

// ── Touch ────────────────────────────────────────────────────

#[tokio::test]
async fn touch_advances_updated_at() {
    let repo = repo().await;
    let list = sample_list();
    repo.create(&list).await.expect("create");

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    repo.touch(&list.id).await.expect("touch");

    let fetched = repo
        .get_by_id(&list.id)
        .await
        .expect("query")
        .expect("list exists");
    assert!(fetched.updated_at > list.updated_at);
    assert_eq!(fetched.created_at, list.created_at);
}
