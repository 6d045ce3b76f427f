//! HTTP layer
//!
//! Axum server with:
//! - Book CRUD routes over an injected `BookStore`
//! - Request tracing and CORS
//! - Graceful shutdown
//! - JSON message envelopes for every error

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
