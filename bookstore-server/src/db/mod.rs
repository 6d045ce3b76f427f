//! Database layer - connection pool, schema bootstrap and repositories
//!
//! # Design Principles
//!
//! - One pool per process, owned by `DbPool` and closed exactly once
//! - Every repository call is a single statement (no transactions)
//! - Absent rows surface as `BookError::NotFound`, never as store failures

pub mod bootstrap;
pub mod pool;
pub mod repos;

pub use bootstrap::{bootstrap, SeedOutcome};
pub use pool::{DbPool, PoolError};
pub use repos::PgBookStore;
