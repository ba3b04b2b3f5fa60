//! Book management service

use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{book::BookQuery, Author, Book, BookDetail},
    payload,
    repository::{books::BookChanges, Repository},
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

const REQUIRED_FIELDS: [&str; 3] = ["name", "edition", "publication_year"];

/// Validate the book name when present in the body
fn validated_name(body: &Value) -> AppResult<String> {
    match payload::opt_str(body, "name") {
        Some(name) if !payload::is_blank(&name) => Ok(name),
        _ => Err(AppError::Validation(
            "Name cannot be empty or null".to_string(),
        )),
    }
}

/// Field changes for an edit: every field is optional and defaults to its
/// stored value downstream. A supplied name must still be non-blank.
fn changes_from(body: &Value) -> AppResult<BookChanges> {
    let name = match body.get("name") {
        None => None,
        Some(_) => Some(validated_name(body)?),
    };

    Ok(BookChanges {
        name,
        edition: payload::opt_str(body, "edition"),
        publication_year: payload::opt_i32(body, "publication_year")?,
        authors: payload::opt_id_list(body, "authors")?,
    })
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books matching the filters. An empty result is reported as
    /// `NoData` rather than an empty page.
    pub async fn list(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let books = self.repository.books.list(query).await?;
        if books.is_empty() {
            tracing::info!("There is no book matching the request");
            return Err(AppError::NoData);
        }
        Ok(books)
    }

    /// Get a book with the ids of its authors
    pub async fn detail(&self, id: i32) -> AppResult<BookDetail> {
        let book = self.repository.books.get(id).await?;
        let authors = self.repository.books.author_ids(id).await?;
        Ok(BookDetail::new(book, authors))
    }

    /// Full author entities for a book, 404 when the book is unknown
    pub async fn authors(&self, id: i32) -> AppResult<Vec<Author>> {
        self.repository.books.get(id).await?;
        self.repository.books.authors(id).await
    }

    /// Create a book from a loosely-typed request body. All required fields
    /// are checked before any store mutation; the optional `authors` list
    /// becomes one junction row per id.
    pub async fn create(&self, body: &Value) -> AppResult<BookDetail> {
        let missing = payload::missing_fields(body, &REQUIRED_FIELDS);
        if !missing.is_empty() {
            return Err(payload::missing_fields_error(&missing));
        }

        let name = validated_name(body)?;
        let edition = payload::opt_str(body, "edition").ok_or_else(|| {
            AppError::Validation("edition must be a string".to_string())
        })?;
        let publication_year = payload::opt_i32(body, "publication_year")?
            .ok_or_else(|| AppError::Validation("publication_year must be an integer".to_string()))?;
        let authors = payload::opt_id_list(body, "authors")?.unwrap_or_default();

        tracing::info!("Add book {} to the database", name);
        let book = self
            .repository
            .books
            .create(&name, &edition, publication_year, &authors)
            .await?;
        let authors = self.repository.books.author_ids(book.id).await?;
        Ok(BookDetail::new(book, authors))
    }

    /// Partial update: omitted fields keep their current values and an
    /// `authors` list only adds associations.
    pub async fn edit(&self, id: i32, body: &Value) -> AppResult<BookDetail> {
        // 404 before touching the body
        self.repository.books.get(id).await?;
        let changes = changes_from(body)?;

        tracing::info!("Edit book {} in the database", id);
        let book = self.repository.books.update(id, &changes).await?;
        let authors = self.repository.books.author_ids(id).await?;
        Ok(BookDetail::new(book, authors))
    }

    /// Delete a book and, via cascade, its author associations
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let book = self.repository.books.get(id).await?;
        tracing::info!("Delete book {} from the database", book.id);
        self.repository.books.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_missing_fields_are_enumerated() {
        let missing = payload::missing_fields(&json!({"name": "The Hobbit"}), &REQUIRED_FIELDS);
        assert_eq!(
            payload::missing_fields_error(&missing).to_string(),
            "Validation error: edition and publication_year fields are missing."
        );
    }

    #[test]
    fn changes_keep_omitted_fields_unset() {
        let changes = changes_from(&json!({"authors": [2]})).unwrap();
        assert!(changes.name.is_none());
        assert!(changes.edition.is_none());
        assert!(changes.publication_year.is_none());
        assert_eq!(changes.authors, Some(vec![2]));
    }

    #[test]
    fn supplied_blank_name_is_rejected_on_edit() {
        let err = changes_from(&json!({"name": " "})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Name cannot be empty or null"
        );
    }

    #[test]
    fn publication_year_accepts_numeric_strings() {
        let changes = changes_from(&json!({"publication_year": "1937"})).unwrap();
        assert_eq!(changes.publication_year, Some(1937));
    }
}
