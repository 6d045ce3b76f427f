//! Book storage seam
//!
//! `BookStore` is what the HTTP layer talks to. Two implementations:
//! - `db::repos::PgBookStore`: pooled Postgres, one statement per call
//! - `MemoryBookStore`: in-process map behind a single RwLock

pub mod memory;

use std::fmt;

use async_trait::async_trait;

use crate::models::{Book, BookDraft, ValidationError};

pub use memory::MemoryBookStore;

/// Repository operation, carried on store failures for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list_books",
            Self::Get => "get_book",
            Self::Create => "create_book",
            Self::Update => "update_book",
            Self::Delete => "delete_book",
        }
    }

    /// Message shown to callers when the store fails
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::List => "database error",
            Self::Get => "failed to fetch book",
            Self::Create => "failed to add book",
            Self::Update => "failed to update book",
            Self::Delete => "failed to delete book",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository outcome error
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("book {id} not found")]
    NotFound { id: i64 },

    #[error("invalid book: {0}")]
    Invalid(#[from] ValidationError),

    #[error("{operation} failed: {source}")]
    Store {
        operation: Operation,
        id: Option<i64>,
        #[source]
        source: sqlx::Error,
    },
}

impl BookError {
    /// Classify a driver error raised while running `operation`.
    ///
    /// Data exceptions for over-long strings (22001) and check violations
    /// (23514) are the caller's fault; everything else is a store failure.
    pub fn from_sqlx(operation: Operation, id: Option<i64>, source: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &source {
            if matches!(db.code().as_deref(), Some("22001") | Some("23514")) {
                return Self::Invalid(ValidationError::Rejected);
            }
        }

        Self::Store {
            operation,
            id,
            source,
        }
    }
}

/// CRUD over books. Implementations hold no per-request state.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books, ascending by id. Empty is not an error.
    async fn list(&self) -> Result<Vec<Book>, BookError>;

    async fn get(&self, id: i64) -> Result<Book, BookError>;

    /// Insert and return the book with its generated id.
    async fn create(&self, draft: BookDraft) -> Result<Book, BookError>;

    /// Full replace of title, author and quantity.
    async fn update(&self, id: i64, draft: BookDraft) -> Result<Book, BookError>;

    async fn delete(&self, id: i64) -> Result<(), BookError>;
}
