//! API handlers for the catalog REST endpoints

pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;

use serde::Serialize;
use utoipa::ToSchema;

/// Confirmation message body
#[derive(Serialize, ToSchema)]
pub struct Message {
    pub message: String,
}
