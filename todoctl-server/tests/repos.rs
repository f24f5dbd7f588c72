//! Integration tests for the list/todo repositories
//!
//! Each test gets a fresh in-memory database with the full schema.

use sqlx::SqlitePool;

use todoctl_server::db::migrations;
use todoctl_server::db::repos::{DbError, ListRepo, TodoRepo};
use todoctl_server::db::create_memory_pool;
use todoctl_server::models::{ListName, TodoDescription};

async fn migrated_pool() -> SqlitePool {
    let pool = create_memory_pool().await.expect("pool creation failed");
    migrations::upgrade(&pool).await.expect("migrations failed");
    pool
}

fn name(s: &str) -> ListName {
    ListName::new(s).unwrap()
}

fn desc(s: &str) -> TodoDescription {
    TodoDescription::new(s).unwrap()
}

#[tokio::test]
async fn create_list_then_todo_is_retrievable() {
    let pool = migrated_pool().await;
    let lists = ListRepo::new(&pool);
    let todos = TodoRepo::new(&pool);

    let list = lists.create(name("Groceries")).await.unwrap();
    let todo = todos.create(desc("Milk"), list.id).await.unwrap();

    assert!(!todo.completed);

    let in_list = todos.list_for_list(list.id).await.unwrap();
    assert_eq!(in_list, vec![todo]);
}

#[tokio::test]
async fn create_todo_with_dangling_list_id_persists_nothing() {
    let pool = migrated_pool().await;
    let todos = TodoRepo::new(&pool);

    let err = todos.create(desc("Orphan"), 999).await.unwrap_err();
    assert!(matches!(err, DbError::Constraint(_)));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn delete_list_cascades_to_its_todos_only() {
    let pool = migrated_pool().await;
    let lists = ListRepo::new(&pool);
    let todos = TodoRepo::new(&pool);

    let groceries = lists.create(name("Groceries")).await.unwrap();
    let chores = lists.create(name("Chores")).await.unwrap();
    todos.create(desc("Milk"), groceries.id).await.unwrap();
    todos.create(desc("Eggs"), groceries.id).await.unwrap();
    let laundry = todos.create(desc("Laundry"), chores.id).await.unwrap();

    lists.delete(groceries.id).await.unwrap();

    // No orphans: every remaining todo belongs to a surviving list
    let orphans: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM todos
         WHERE list_id NOT IN (SELECT id FROM todo_lists)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(orphans, 0);

    let remaining = todos.list_for_list(chores.id).await.unwrap();
    assert_eq!(remaining, vec![laundry]);

    let err = lists.get(groceries.id).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "list", .. }));
}

#[tokio::test]
async fn set_completed_is_idempotent() {
    let pool = migrated_pool().await;
    let lists = ListRepo::new(&pool);
    let todos = TodoRepo::new(&pool);

    let list = lists.create(name("Groceries")).await.unwrap();
    let todo = todos.create(desc("Milk"), list.id).await.unwrap();

    todos.set_completed(todo.id, true).await.unwrap();
    todos.set_completed(todo.id, true).await.unwrap();

    let completed: Vec<i64> = sqlx::query_scalar("SELECT id FROM todos WHERE completed = 1")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(completed, vec![todo.id]);
}

#[tokio::test]
async fn set_completed_on_missing_todo_is_not_found() {
    let pool = migrated_pool().await;

    let err = TodoRepo::new(&pool).set_completed(42, true).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "todo", id: 42 }));
}

#[tokio::test]
async fn delete_missing_todo_is_not_found() {
    let pool = migrated_pool().await;

    let err = TodoRepo::new(&pool).delete(42).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "todo", id: 42 }));
}

#[tokio::test]
async fn complete_all_is_scoped_to_one_list() {
    let pool = migrated_pool().await;
    let lists = ListRepo::new(&pool);
    let todos = TodoRepo::new(&pool);

    let groceries = lists.create(name("Groceries")).await.unwrap();
    let chores = lists.create(name("Chores")).await.unwrap();
    todos.create(desc("Milk"), groceries.id).await.unwrap();
    todos.create(desc("Eggs"), groceries.id).await.unwrap();
    todos.create(desc("Laundry"), chores.id).await.unwrap();

    let updated = lists.complete_all(groceries.id).await.unwrap();
    assert_eq!(updated, 2);

    for todo in todos.list_for_list(groceries.id).await.unwrap() {
        assert!(todo.completed);
    }
    for todo in todos.list_for_list(chores.id).await.unwrap() {
        assert!(!todo.completed);
    }
}

#[tokio::test]
async fn complete_all_on_missing_list_is_not_found() {
    let pool = migrated_pool().await;

    let err = ListRepo::new(&pool).complete_all(42).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "list", id: 42 }));
}

#[tokio::test]
async fn todos_are_ordered_by_insertion() {
    let pool = migrated_pool().await;
    let lists = ListRepo::new(&pool);
    let todos = TodoRepo::new(&pool);

    let list = lists.create(name("Groceries")).await.unwrap();
    for item in ["Milk", "Eggs", "Bread"] {
        todos.create(desc(item), list.id).await.unwrap();
    }

    let descriptions: Vec<String> = todos
        .list_for_list(list.id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.description)
        .collect();
    assert_eq!(descriptions, vec!["Milk", "Eggs", "Bread"]);
}

#[tokio::test]
async fn first_list_is_lowest_id() {
    let pool = migrated_pool().await;
    let lists = ListRepo::new(&pool);

    // The migration seeded Uncategorized as id 1
    let seed = lists.first().await.unwrap().unwrap();
    assert_eq!(seed.name, "Uncategorized");

    lists.create(name("A")).await.unwrap();
    assert_eq!(lists.first().await.unwrap(), Some(seed.clone()));

    // With every list gone there is no first
    lists.delete(seed.id).await.unwrap();
    let a = lists.first().await.unwrap().unwrap();
    assert_eq!(a.name, "A");
    lists.delete(a.id).await.unwrap();
    assert!(lists.first().await.unwrap().is_none());
}

// The end-to-end scenario from the product brief: create a list, add a
// todo, complete it, delete the list, and the todo is gone with it.
#[tokio::test]
async fn groceries_scenario() {
    let pool = migrated_pool().await;
    let lists = ListRepo::new(&pool);
    let todos = TodoRepo::new(&pool);

    // The migration seeded Uncategorized as id 1
    let seed = lists.first().await.unwrap().unwrap();
    assert_eq!(seed.id, 1);
    assert_eq!(seed.name, "Uncategorized");

    let groceries = lists.create(name("Groceries")).await.unwrap();
    assert_eq!(groceries.id, 2);

    let milk = todos.create(desc("Milk"), groceries.id).await.unwrap();
    assert!(!milk.completed);

    todos.set_completed(milk.id, true).await.unwrap();
    assert!(todos.get(milk.id).await.unwrap().completed);

    lists.delete(groceries.id).await.unwrap();
    let err = todos.get(milk.id).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "todo", .. }));
}
