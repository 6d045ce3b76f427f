//! HTTP server command
//!
//! Runs the bookstore HTTP server against Postgres (default) or an
//! in-process store.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use bookstore_server::db::PgBookStore;
use bookstore_server::http::{run_server, AppState, ServerConfig};
use bookstore_server::{MemoryBookStore, QuantityPolicy};

use super::init_db::open_database;

/// Backing store for the server
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// PostgreSQL via a connection pool (DB_* settings)
    Postgres,
    /// In-process map, seeded on start and lost on exit
    Memory,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Where books are stored
    #[arg(long, value_enum, default_value_t = StoreKind::Postgres)]
    pub store: StoreKind,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };
    let policy = QuantityPolicy::from_env();
    tracing::info!(?policy, store = ?args.store, "Starting bookstore server on {}", args.bind);

    match args.store {
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store; books are lost on exit");
            let state =
                AppState::new(Arc::new(MemoryBookStore::seeded())).with_quantity_policy(policy);
            run_server(state, config).await.context("Server error")?;
        }
        StoreKind::Postgres => {
            let (db, outcome) = open_database().await?;
            tracing::info!(?outcome, "Schema bootstrap complete");

            let store = PgBookStore::new(db.handle().clone());
            let state = AppState::new(Arc::new(store)).with_quantity_policy(policy);

            // Run server (blocks until shutdown), then close the pool once
            let served = run_server(state, config).await;
            db.close().await;
            served.context("Server error")?;
        }
    }

    Ok(())
}
