//! List repository
//!
//! Handles todo-list CRUD plus the two list-scoped bulk operations:
//! cascade delete and complete-all.

use sqlx::SqlitePool;

use crate::models::{ListName, TodoList};

use super::DbError;

/// List repository
pub struct ListRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ListRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a list with the given name.
    pub async fn create(&self, name: ListName) -> Result<TodoList, DbError> {
        let list: TodoList = sqlx::query_as(
            r#"
            INSERT INTO todo_lists (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(name.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(list)
    }

    /// Get a single list by id.
    pub async fn get(&self, id: i64) -> Result<TodoList, DbError> {
        let list: TodoList = sqlx::query_as(
            r#"
            SELECT id, name
            FROM todo_lists
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: "list",
            id,
        })?;

        Ok(list)
    }

    /// All lists ordered by id (insertion order, stable for display).
    pub async fn list_all(&self) -> Result<Vec<TodoList>, DbError> {
        let lists: Vec<TodoList> = sqlx::query_as(
            r#"
            SELECT id, name
            FROM todo_lists
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(lists)
    }

    /// The list with the lowest id, if any exists.
    pub async fn first(&self) -> Result<Option<TodoList>, DbError> {
        let list: Option<TodoList> = sqlx::query_as(
            r#"
            SELECT id, name
            FROM todo_lists
            ORDER BY id
            LIMIT 1
            "#,
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(list)
    }

    /// Delete a list; the declared FK cascade removes its todos.
    ///
    /// The DELETE and the cascade are one atomic statement, so either
    /// the list and all its todos disappear together or nothing does.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM todo_lists WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "list",
                id,
            });
        }

        Ok(())
    }

    /// Mark every todo in the list as completed.
    ///
    /// Runs in a transaction: the existence check and the bulk update
    /// see the same snapshot.
    pub async fn complete_all(&self, id: i64) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;

        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM todo_lists WHERE id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if !exists.0 {
            return Err(DbError::NotFound {
                resource: "list",
                id,
            });
        }

        let result = sqlx::query("UPDATE todos SET completed = 1 WHERE list_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }
}
