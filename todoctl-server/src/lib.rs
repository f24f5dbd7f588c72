//! todoctl-server: HTTP server for a multi-list todo application
//!
//! Exposes list/todo CRUD over HTTP, backed by SQLite through sqlx.
//! Schema evolution lives in `db::migrations` as an ordered chain of
//! reversible steps.

pub mod db;
pub mod http;
pub mod models;
pub mod pages;

pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};
