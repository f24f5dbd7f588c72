//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Relies on declared constraints (FK cascade) instead of check-then-delete
//! - Uses transactions for multi-step operations
//! - Maps storage errors to a typed [`DbError`]

pub mod error;
pub mod lists;
pub mod todos;

pub use error::DbError;
pub use lists::ListRepo;
pub use todos::TodoRepo;
