//! List endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;

use crate::db::repos::{ListRepo, TodoRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::ListName;
use crate::pages;

use super::SuccessResponse;

/// Create list form body
#[derive(Deserialize)]
pub struct CreateListForm {
    pub name: String,
}

/// POST /lists/create - create a list, then land on its page
async fn create_list(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CreateListForm>,
) -> Result<Redirect, ApiError> {
    let name = ListName::new(&form.name)?;
    let list = ListRepo::new(&state.pool).create(name).await?;

    Ok(Redirect::to(&format!("/lists/{}", list.id)))
}

/// GET /lists/{id} - rendered page: all lists, the active list, its todos
async fn get_list_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Html<String>, ApiError> {
    let list_repo = ListRepo::new(&state.pool);

    let active = list_repo.get(id).await?;
    let lists = list_repo.list_all().await?;
    let todos = TodoRepo::new(&state.pool).list_for_list(id).await?;

    Ok(Html(pages::render_list_page(&lists, &active, &todos)))
}

/// POST /lists/{id}/edit - mark every todo in the list completed
async fn complete_all(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let updated = ListRepo::new(&state.pool).complete_all(id).await?;
    tracing::debug!(list_id = id, updated, "completed all todos in list");

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /lists/{id} - delete a list and, via cascade, its todos
async fn delete_list(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, ApiError> {
    ListRepo::new(&state.pool).delete(id).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// List routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lists/create", post(create_list))
        .route("/lists/{id}", get(get_list_page).delete(delete_list))
        .route("/lists/{id}/edit", post(complete_all))
}
