//! Author-Book junction model (N:M relationship)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Junction row linking an author to a book
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuthorBook {
    pub id: i32,
    pub author_id: i32,
    pub book_id: i32,
}
