//! Route handlers organized by resource

pub mod health;
pub mod home;
pub mod lists;
pub mod todos;

use serde::Serialize;

/// Acknowledgement body returned by mutating JSON endpoints.
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
