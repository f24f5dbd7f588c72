//! Todo endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::{delete, post},
    Form, Json, Router,
};
use serde::Deserialize;

use crate::db::repos::TodoRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::TodoDescription;

use super::SuccessResponse;

/// Create todo form body
///
/// `list_id` is optional at the extractor so an absent field reaches
/// the handler and fails the same way a dangling one does, instead of
/// being rejected during deserialization.
#[derive(Deserialize)]
pub struct CreateTodoForm {
    pub description: String,
    pub list_id: Option<i64>,
}

/// Edit todo JSON body
#[derive(Deserialize)]
pub struct EditTodoRequest {
    pub completed: bool,
}

/// POST /todos/create - create a todo, then back to its list's page
async fn create_todo(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CreateTodoForm>,
) -> Result<Redirect, ApiError> {
    let description = TodoDescription::new(&form.description)?;
    let list_id = form.list_id.ok_or_else(|| ApiError::Constraint {
        message: "list_id is required".to_owned(),
    })?;
    let todo = TodoRepo::new(&state.pool)
        .create(description, list_id)
        .await?;

    Ok(Redirect::to(&format!("/lists/{}", todo.list_id)))
}

/// POST /todos/{id}/edit - set the completed flag
async fn edit_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<EditTodoRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    TodoRepo::new(&state.pool)
        .set_completed(id, req.completed)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /todos/{id}
async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, ApiError> {
    TodoRepo::new(&state.pool).delete(id).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Todo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todos/create", post(create_todo))
        .route("/todos/{id}/edit", post(edit_todo))
        .route("/todos/{id}", delete(delete_todo))
}
