//! Homepage endpoint

use std::sync::Arc;

use axum::{extract::State, response::Redirect, routing::get, Router};

use crate::db::repos::ListRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET / - redirect to the first list by id.
///
/// With no lists at all there is nowhere to land, so this is a 404
/// rather than a dangling redirect.
async fn homepage(State(state): State<Arc<AppState>>) -> Result<Redirect, ApiError> {
    let list = ListRepo::new(&state.pool)
        .first()
        .await?
        .ok_or(ApiError::NoneExist { resource: "list" })?;

    Ok(Redirect::to(&format!("/lists/{}", list.id)))
}

/// Homepage routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(homepage))
}
