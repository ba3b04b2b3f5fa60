//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{
    error::AppResult,
    models::{book::BookQuery, Author, Book, BookDetail},
    pagination::{paginate, Page},
};

use super::Message;

const BASE_URL: &str = "/api/v1/books";

/// List books with filtering and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("name" = Option<String>, Query, description = "Substring match on book name"),
        ("edition" = Option<String>, Query, description = "Substring match on edition"),
        ("publication_year" = Option<i32>, Query, description = "Exact publication year"),
        ("start" = Option<String>, Query, description = "1-based offset of the first item (default: 1)"),
        ("limit" = Option<String>, Query, description = "Maximum number of items (default: 20)")
    ),
    responses(
        (status = 200, description = "Page of books", body = inline(Page<Book>)),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 404, description = "No data to show")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Page<Book>>> {
    tracing::info!("Get the list of books from the database");
    let books = state.services.books.list(&query).await?;

    let page = paginate(
        books,
        BASE_URL,
        query.start.as_deref(),
        query.limit.as_deref(),
        state.config.pagination.default_limit,
    )?;
    Ok(Json(page))
}

/// Get book details with associated author ids
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetail),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetail>> {
    let book = state.services.books.detail(id).await?;
    Ok(Json(book))
}

/// List the authors of a book as full entities
#[utoipa::path(
    get,
    path = "/books/{id}/authors",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Authors of the book", body = Vec<Author>),
        (status = 404, description = "Book not found")
    )
)]
pub async fn list_book_authors(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.books.authors(id).await?;
    Ok(Json(authors))
}

/// Add a book, optionally linking it to existing authors
#[utoipa::path(
    post,
    path = "/books/add",
    tag = "books",
    responses(
        (status = 201, description = "Book created", body = BookDetail),
        (status = 400, description = "Missing or invalid fields"),
        (status = 403, description = "Persistence error")
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<BookDetail>)> {
    let created = state.services.books.create(&body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Edit a book (partial update; an `authors` list adds associations)
#[utoipa::path(
    put,
    path = "/books/edit/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book updated", body = BookDetail),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn edit_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    body: Option<Json<Value>>,
) -> AppResult<Json<BookDetail>> {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let updated = state.services.books.edit(id, &body).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/delete/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = Message),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Message>> {
    state.services.books.delete(id).await?;
    Ok(Json(Message {
        message: "The book has successfully been deleted.".to_string(),
    }))
}
