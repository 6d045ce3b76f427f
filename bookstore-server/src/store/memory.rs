//! In-process book store
//!
//! A `BTreeMap` keyed by id behind one `tokio::sync::RwLock`: reads share
//! the lock, every mutation takes it exclusively. Ids come from a counter
//! that only moves forward, so deleted ids are never handed out again.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookError, BookStore};
use crate::db::bootstrap::SEED_BOOKS;
use crate::models::{Book, BookDraft};

#[derive(Debug, Default)]
pub struct MemoryBookStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    books: BTreeMap<i64, Book>,
    last_id: i64,
}

impl Inner {
    fn insert(&mut self, draft: BookDraft) -> Book {
        self.last_id += 1;
        let book = Book::from_draft(self.last_id, draft);
        self.books.insert(book.id, book.clone());
        book
    }
}

impl MemoryBookStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the same baseline rows the Postgres bootstrap seeds
    pub fn seeded() -> Self {
        let mut inner = Inner::default();
        for (title, author, quantity) in SEED_BOOKS {
            inner.insert(BookDraft::new(title, author, quantity));
        }

        Self {
            inner: RwLock::new(inner),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.books.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.books.is_empty()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list(&self) -> Result<Vec<Book>, BookError> {
        Ok(self.inner.read().await.books.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Book, BookError> {
        self.inner
            .read()
            .await
            .books
            .get(&id)
            .cloned()
            .ok_or(BookError::NotFound { id })
    }

    async fn create(&self, draft: BookDraft) -> Result<Book, BookError> {
        Ok(self.inner.write().await.insert(draft))
    }

    async fn update(&self, id: i64, draft: BookDraft) -> Result<Book, BookError> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .books
            .get_mut(&id)
            .ok_or(BookError::NotFound { id })?;

        *slot = Book::from_draft(id, draft);
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), BookError> {
        self.inner
            .write()
            .await
            .books
            .remove(&id)
            .map(|_| ())
            .ok_or(BookError::NotFound { id })
    }
}
