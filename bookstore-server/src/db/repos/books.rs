//! Book repository
//!
//! The `id` column is `SERIAL` (int4); it is read back as `id::BIGINT` so
//! tables created with either integer width decode into `Book`.
//!
//! One statement per operation:
//! - update: UPDATE ... RETURNING, no row means NotFound
//! - delete: rows_affected() == 0 means NotFound

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Book, BookDraft};
use crate::store::{BookError, BookStore, Operation};

/// Postgres-backed book store
#[derive(Debug, Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn list(&self) -> Result<Vec<Book>, BookError> {
        sqlx::query_as::<_, Book>(
            "SELECT id::BIGINT AS id, title, author, quantity FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BookError::from_sqlx(Operation::List, None, e))
    }

    async fn get(&self, id: i64) -> Result<Book, BookError> {
        sqlx::query_as::<_, Book>(
            "SELECT id::BIGINT AS id, title, author, quantity FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookError::from_sqlx(Operation::Get, Some(id), e))?
        .ok_or(BookError::NotFound { id })
    }

    async fn create(&self, draft: BookDraft) -> Result<Book, BookError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, quantity)
            VALUES ($1, $2, $3)
            RETURNING id::BIGINT AS id, title, author, quantity
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(draft.quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| BookError::from_sqlx(Operation::Create, None, e))?;

        tracing::debug!(id = book.id, "Book created");
        Ok(book)
    }

    async fn update(&self, id: i64, draft: BookDraft) -> Result<Book, BookError> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $1, author = $2, quantity = $3
            WHERE id = $4
            RETURNING id::BIGINT AS id, title, author, quantity
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(draft.quantity)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookError::from_sqlx(Operation::Update, Some(id), e))?
        .ok_or(BookError::NotFound { id })
    }

    async fn delete(&self, id: i64) -> Result<(), BookError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| BookError::from_sqlx(Operation::Delete, Some(id), e))?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound { id });
        }

        Ok(())
    }
}
