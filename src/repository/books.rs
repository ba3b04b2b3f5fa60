//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{book::BookQuery, Author, AuthorBook, Book},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

/// Field values for a book write. `None` on update keeps the stored value.
#[derive(Debug)]
pub struct BookChanges {
    pub name: Option<String>,
    pub edition: Option<String>,
    pub publication_year: Option<i32>,
    pub authors: Option<Vec<i32>>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List books matching the optional filters (ANDed), ordered by name.
    /// Substring filters match literally, not as patterns.
    pub async fn list(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, name, edition, publication_year
            FROM books
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' ESCAPE '\')
              AND ($2::text IS NULL OR edition ILIKE '%' || $2 || '%' ESCAPE '\')
              AND ($3::int IS NULL OR publication_year = $3)
            ORDER BY name ASC
            "#,
        )
        .bind(query.name.as_deref().map(super::escape_like))
        .bind(query.edition.as_deref().map(super::escape_like))
        .bind(query.publication_year)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Get book by ID
    pub async fn get(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "SELECT id, name, edition, publication_year FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Ids of all authors associated with a book via the junction table
    pub async fn author_ids(&self, book_id: i32) -> AppResult<Vec<i32>> {
        let rows = sqlx::query_as::<_, AuthorBook>(
            "SELECT id, author_id, book_id FROM author_books WHERE book_id = $1 ORDER BY author_id",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| row.author_id).collect())
    }

    /// Full author entities associated with a book, ordered by name
    pub async fn authors(&self, book_id: i32) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT a.id, a.name
            FROM author_books ab
            JOIN authors a ON a.id = ab.author_id
            WHERE ab.book_id = $1
            ORDER BY a.name ASC
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    /// Insert a book and its author associations in one transaction
    pub async fn create(
        &self,
        name: &str,
        edition: &str,
        publication_year: i32,
        authors: &[i32],
    ) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (name, edition, publication_year)
            VALUES ($1, $2, $3)
            RETURNING id, name, edition, publication_year
            "#,
        )
        .bind(name)
        .bind(edition)
        .bind(publication_year)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::Persistence(e.to_string()))?;

        for author_id in authors {
            Self::link_author(&mut tx, book.id, *author_id).await?;
        }

        tx.commit().await?;
        Ok(book)
    }

    /// Partial update plus additive author associations, in one transaction.
    /// Omitted fields keep their stored values; associations are only ever
    /// added here, never removed.
    pub async fn update(&self, id: i32, changes: &BookChanges) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET name = COALESCE($1, name),
                edition = COALESCE($2, edition),
                publication_year = COALESCE($3, publication_year)
            WHERE id = $4
            RETURNING id, name, edition, publication_year
            "#,
        )
        .bind(changes.name.as_deref())
        .bind(changes.edition.as_deref())
        .bind(changes.publication_year)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::Persistence(e.to_string()))?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        if let Some(ref authors) = changes.authors {
            for author_id in authors {
                Self::link_author(&mut tx, id, *author_id).await?;
            }
        }

        tx.commit().await?;
        Ok(book)
    }

    /// Delete a book. Junction rows go with it via ON DELETE CASCADE.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Persistence(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Insert a junction row. The pair is unique, so re-linking an existing
    /// association is a no-op; an unknown author id trips the foreign key and
    /// rolls the transaction back.
    async fn link_author(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        book_id: i32,
        author_id: i32,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO author_books (author_id, book_id)
            VALUES ($1, $2)
            ON CONFLICT (author_id, book_id) DO NOTHING
            "#,
        )
        .bind(author_id)
        .bind(book_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::Persistence(e.to_string()))?;

        Ok(())
    }
}
