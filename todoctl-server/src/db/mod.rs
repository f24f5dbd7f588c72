//! Database layer - connection pool, migrations, and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no Arc<Mutex<Connection>>
//! - Rely on DB constraints, handle violations - no check-then-insert
//! - Transactions for multi-step operations
//! - Foreign keys enforced on every pooled connection

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_memory_pool};
pub use repos::*;
