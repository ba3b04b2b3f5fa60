//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Full book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub edition: String,
    pub publication_year: i32,
}

/// Book with the ids of its associated authors (detail responses)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetail {
    pub id: i32,
    pub name: String,
    pub edition: String,
    pub publication_year: i32,
    pub authors: Vec<i32>,
}

impl BookDetail {
    pub fn new(book: Book, authors: Vec<i32>) -> Self {
        Self {
            id: book.id,
            name: book.name,
            edition: book.edition,
            publication_year: book.publication_year,
            authors,
        }
    }
}

/// Query parameters for book listings. See [`crate::models::AuthorQuery`] for
/// why `start`/`limit` are raw strings.
#[derive(Debug, Default, Deserialize)]
pub struct BookQuery {
    /// Case-insensitive substring match on the book name
    pub name: Option<String>,
    /// Case-insensitive substring match on the edition
    pub edition: Option<String>,
    /// Exact publication year
    pub publication_year: Option<i32>,
    pub start: Option<String>,
    pub limit: Option<String>,
}
