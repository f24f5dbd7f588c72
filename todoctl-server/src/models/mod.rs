//! Domain models with validation at construction
//!
//! User input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod list;
pub mod todo;

pub use validation::ValidationError;
pub use list::{ListName, TodoList};
pub use todo::{Todo, TodoDescription};
