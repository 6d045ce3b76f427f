//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Owns a cloned `PgPool`; checkout/return happens per statement
//! - Uses `RETURNING` instead of a follow-up SELECT
//! - Maps driver errors through `BookError::from_sqlx`

pub mod books;

pub use books::PgBookStore;
