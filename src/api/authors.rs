//! Author endpoints

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{author::AuthorQuery, Author, AuthorDetail, Book},
    pagination::{paginate, Page},
};

use super::Message;

const BASE_URL: &str = "/api/v1/authors";

/// List authors with filtering and pagination
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    params(
        ("name" = Option<String>, Query, description = "Substring match on author name"),
        ("start" = Option<String>, Query, description = "1-based offset of the first item (default: 1)"),
        ("limit" = Option<String>, Query, description = "Maximum number of items (default: 20)")
    ),
    responses(
        (status = 200, description = "Page of authors", body = inline(Page<Author>)),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 404, description = "No data to show")
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
    Query(query): Query<AuthorQuery>,
) -> AppResult<Json<Page<Author>>> {
    tracing::info!("Get the list of authors from the database");
    let authors = state.services.authors.list(&query).await?;

    let page = paginate(
        authors,
        BASE_URL,
        query.start.as_deref(),
        query.limit.as_deref(),
        state.config.pagination.default_limit,
    )?;
    Ok(Json(page))
}

/// Get author details with associated book ids
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author details", body = AuthorDetail),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorDetail>> {
    let author = state.services.authors.detail(id).await?;
    Ok(Json(author))
}

/// List the books of an author as full entities
#[utoipa::path(
    get,
    path = "/authors/{id}/books",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Books of the author", body = Vec<Book>),
        (status = 404, description = "Author not found")
    )
)]
pub async fn list_author_books(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.authors.books(id).await?;
    Ok(Json(books))
}

/// Add an author
#[utoipa::path(
    post,
    path = "/authors/add",
    tag = "authors",
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Missing or empty name"),
        (status = 403, description = "Persistence error")
    )
)]
pub async fn add_author(
    State(state): State<crate::AppState>,
    Json(body): Json<Value>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let created = state.services.authors.create(&body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Edit an author (partial update)
#[utoipa::path(
    put,
    path = "/authors/edit/{id}",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 400, description = "Invalid name"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn edit_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    body: Option<Json<Value>>,
) -> AppResult<Json<Author>> {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let updated = state.services.authors.edit(id, &body).await?;
    Ok(Json(updated))
}

/// Delete an author
#[utoipa::path(
    delete,
    path = "/authors/delete/{id}",
    tag = "authors",
    params(
        ("id" = i32, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Author deleted", body = Message),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Message>> {
    state.services.authors.delete(id).await?;
    Ok(Json(Message {
        message: "The author has successfully been deleted.".to_string(),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct BulkImportParams {
    /// Server-local CSV file to import instead of an uploaded one
    pub path: Option<String>,
}

/// Bulk-import authors from a CSV file.
///
/// Accepts either a multipart upload (field `file`) or a `path` query
/// parameter naming a CSV readable by the server. One author name per
/// record; all rows are inserted in a single transaction.
#[utoipa::path(
    post,
    path = "/authors/add/bulk",
    tag = "authors",
    params(
        ("path" = Option<String>, Query, description = "Server-local CSV file path")
    ),
    responses(
        (status = 201, description = "Authors imported", body = Message),
        (status = 400, description = "Missing or unusable file"),
        (status = 403, description = "Persistence error")
    )
)]
pub async fn bulk_import_authors(
    State(state): State<crate::AppState>,
    Query(params): Query<BulkImportParams>,
    multipart: Option<Multipart>,
) -> AppResult<(StatusCode, Json<Message>)> {
    let content = match (multipart, params.path) {
        (Some(multipart), _) => uploaded_csv(multipart).await?,
        (None, Some(path)) => {
            tracing::info!("Import authors from server-local file {}", path);
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| AppError::Validation(format!("Could not read file {}: {}", path, e)))?
        }
        (None, None) => {
            return Err(AppError::Validation("No CSV file provided".to_string()));
        }
    };

    let imported = state.services.authors.bulk_import(&content).await?;
    Ok((
        StatusCode::CREATED,
        Json(Message {
            message: format!("{} authors imported", imported),
        }),
    ))
}

/// Pull the CSV content out of a multipart upload (field `file`)
async fn uploaded_csv(mut multipart: Multipart) -> AppResult<String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            return field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Could not read uploaded file: {}", e)));
        }
    }

    Err(AppError::Validation(
        "Multipart body has no 'file' field".to_string(),
    ))
}
