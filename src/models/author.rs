//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub name: String,
}

/// Author with the ids of its associated books (detail responses)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorDetail {
    pub id: i32,
    pub name: String,
    pub books: Vec<i32>,
}

impl AuthorDetail {
    pub fn new(author: Author, books: Vec<i32>) -> Self {
        Self {
            id: author.id,
            name: author.name,
            books,
        }
    }
}

/// Query parameters for author listings.
///
/// `start` and `limit` stay raw strings here; the paginator owns their
/// coercion so malformed values produce a 400 rather than an extractor
/// rejection. Unrecognized query parameters are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct AuthorQuery {
    /// Case-insensitive substring match on the author name
    pub name: Option<String>,
    pub start: Option<String>,
    pub limit: Option<String>,
}
