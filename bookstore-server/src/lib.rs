//! bookstore-server: HTTP CRUD service over a single `books` table
//!
//! Layers, leaves first:
//! - db: connection pool, schema bootstrap, Postgres repository
//! - store: the `BookStore` seam and an in-process implementation
//! - models: entity, request payloads and validation
//! - http: axum router, extractors and error rendering

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod store;

pub use config::{ConfigError, DbConfig};
pub use models::{Book, BookDraft, BookPayload, QuantityPolicy, ValidationError};
pub use store::{BookError, BookStore, MemoryBookStore, Operation};
