//! Authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorBook, Book},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List authors with an optional case-insensitive name filter,
    /// ordered by name. Filter input matches literally, not as a pattern.
    pub async fn list(&self, name: Option<&str>) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, name
            FROM authors
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' ESCAPE '\')
            ORDER BY name ASC
            "#,
        )
        .bind(name.map(super::escape_like))
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    /// Get author by ID
    pub async fn get(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT id, name FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Ids of all books associated with an author via the junction table
    pub async fn book_ids(&self, author_id: i32) -> AppResult<Vec<i32>> {
        let rows = sqlx::query_as::<_, AuthorBook>(
            "SELECT id, author_id, book_id FROM author_books WHERE author_id = $1 ORDER BY book_id",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| row.book_id).collect())
    }

    /// Full book entities associated with an author, ordered by name
    pub async fn books(&self, author_id: i32) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT b.id, b.name, b.edition, b.publication_year
            FROM author_books ab
            JOIN books b ON b.id = ab.book_id
            WHERE ab.author_id = $1
            ORDER BY b.name ASC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Insert a single author
    pub async fn create(&self, name: &str) -> AppResult<Author> {
        let mut tx = self.pool.begin().await?;

        let author =
            sqlx::query_as::<_, Author>("INSERT INTO authors (name) VALUES ($1) RETURNING id, name")
                .bind(name)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| AppError::Persistence(e.to_string()))?;

        tx.commit().await?;
        Ok(author)
    }

    /// Insert a batch of authors in a single transaction. Any failure rolls
    /// the whole batch back.
    pub async fn create_many(&self, names: &[String]) -> AppResult<usize> {
        let mut tx = self.pool.begin().await?;

        for name in names {
            sqlx::query("INSERT INTO authors (name) VALUES ($1)")
                .bind(name)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::Persistence(e.to_string()))?;
        }

        tx.commit().await?;
        Ok(names.len())
    }

    /// Update an author's name
    pub async fn update(&self, id: i32, name: &str) -> AppResult<Author> {
        let mut tx = self.pool.begin().await?;

        let author = sqlx::query_as::<_, Author>(
            "UPDATE authors SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::Persistence(e.to_string()))?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))?;

        tx.commit().await?;
        Ok(author)
    }

    /// Delete an author. Junction rows go with it via ON DELETE CASCADE.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Persistence(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Author with id {} not found",
                id
            )));
        }

        tx.commit().await?;
        Ok(())
    }
}
