//! Todo repository

use sqlx::SqlitePool;

use crate::models::{Todo, TodoDescription};

use super::DbError;

/// Todo repository
pub struct TodoRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TodoRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a todo bound to a list.
    ///
    /// A dangling `list_id` trips the foreign key and surfaces as
    /// [`DbError::Constraint`]; nothing is persisted in that case.
    pub async fn create(
        &self,
        description: TodoDescription,
        list_id: i64,
    ) -> Result<Todo, DbError> {
        let todo: Todo = sqlx::query_as(
            r#"
            INSERT INTO todos (description, completed, list_id)
            VALUES ($1, 0, $2)
            RETURNING id, description, completed, list_id
            "#,
        )
        .bind(description.as_str())
        .bind(list_id)
        .fetch_one(self.pool)
        .await?;

        Ok(todo)
    }

    /// Get a single todo by id.
    pub async fn get(&self, id: i64) -> Result<Todo, DbError> {
        let todo: Todo = sqlx::query_as(
            r#"
            SELECT id, description, completed, list_id
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: "todo",
            id,
        })?;

        Ok(todo)
    }

    /// Todos in a list, ordered by id ascending (insertion order).
    pub async fn list_for_list(&self, list_id: i64) -> Result<Vec<Todo>, DbError> {
        let todos: Vec<Todo> = sqlx::query_as(
            r#"
            SELECT id, description, completed, list_id
            FROM todos
            WHERE list_id = $1
            ORDER BY id
            "#,
        )
        .bind(list_id)
        .fetch_all(self.pool)
        .await?;

        Ok(todos)
    }

    /// Set the completed flag on a todo.
    pub async fn set_completed(&self, id: i64, completed: bool) -> Result<(), DbError> {
        let result = sqlx::query("UPDATE todos SET completed = $1 WHERE id = $2")
            .bind(completed)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "todo",
                id,
            });
        }

        Ok(())
    }

    /// Delete a todo by id.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "todo",
                id,
            });
        }

        Ok(())
    }
}
