//! Author management service

use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{author::AuthorQuery, Author, AuthorDetail, Book},
    payload,
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

/// Extract and validate the author name from a request body.
/// Presence is checked first so a missing field reports as missing, not blank.
fn required_name(body: &Value) -> AppResult<String> {
    let missing = payload::missing_fields(body, &["name"]);
    if !missing.is_empty() {
        return Err(payload::missing_fields_error(&missing));
    }
    validated_name(body)
}

/// Validate the author name when present; `None` means the field was omitted.
fn validated_name(body: &Value) -> AppResult<String> {
    match payload::opt_str(body, "name") {
        Some(name) if !payload::is_blank(&name) => Ok(name),
        _ => Err(AppError::Validation(
            "Name cannot be empty or null".to_string(),
        )),
    }
}

/// Author names from CSV content: one name per record, first column only.
/// An optional `name` header line is skipped, as are empty lines.
fn names_from_csv(content: &str) -> AppResult<Vec<String>> {
    let mut names = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let field = line
            .split(',')
            .next()
            .unwrap_or("")
            .trim()
            .trim_matches('"')
            .trim();
        if field.is_empty() {
            continue;
        }
        if lineno == 0 && field.eq_ignore_ascii_case("name") {
            continue;
        }
        names.push(field.to_string());
    }

    if names.is_empty() {
        return Err(AppError::Validation(
            "The file contains no author names".to_string(),
        ));
    }
    Ok(names)
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List authors matching the filter. An empty result is reported as
    /// `NoData` rather than an empty page.
    pub async fn list(&self, query: &AuthorQuery) -> AppResult<Vec<Author>> {
        let authors = self.repository.authors.list(query.name.as_deref()).await?;
        if authors.is_empty() {
            tracing::info!("There is no author matching the request");
            return Err(AppError::NoData);
        }
        Ok(authors)
    }

    /// Get an author with the ids of its books
    pub async fn detail(&self, id: i32) -> AppResult<AuthorDetail> {
        let author = self.repository.authors.get(id).await?;
        let books = self.repository.authors.book_ids(id).await?;
        Ok(AuthorDetail::new(author, books))
    }

    /// Full book entities for an author, 404 when the author is unknown
    pub async fn books(&self, id: i32) -> AppResult<Vec<Book>> {
        self.repository.authors.get(id).await?;
        self.repository.authors.books(id).await
    }

    /// Create an author from a loosely-typed request body
    pub async fn create(&self, body: &Value) -> AppResult<Author> {
        let name = required_name(body)?;
        tracing::info!("Add author {} to the database", name);
        self.repository.authors.create(&name).await
    }

    /// Partial update: an omitted name keeps its current value
    pub async fn edit(&self, id: i32, body: &Value) -> AppResult<Author> {
        let current = self.repository.authors.get(id).await?;
        let name = match body.get("name") {
            None => current.name,
            Some(_) => validated_name(body)?,
        };

        tracing::info!("Edit author {} in the database", id);
        self.repository.authors.update(id, &name).await
    }

    /// Delete an author and, via cascade, its book associations
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        // 404 before attempting the delete
        let author = self.repository.authors.get(id).await?;
        tracing::info!("Delete author {} from the database", author.id);
        self.repository.authors.delete(id).await
    }

    /// Import authors from CSV content, all rows in one transaction
    pub async fn bulk_import(&self, content: &str) -> AppResult<usize> {
        let names = names_from_csv(content)?;
        tracing::info!("Import {} authors from file", names.len());
        self.repository.authors.create_many(&names).await
    }
}
