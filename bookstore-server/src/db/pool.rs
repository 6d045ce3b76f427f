//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits and an acquire
//! timeout, so a request waiting on an exhausted pool fails instead of
//! hanging.

use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgPool};

use crate::config::DbConfig;

/// Startup failure while building or pinging the pool (fatal)
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("unable to create connection pool: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("unable to ping database: {0}")]
    Ping(#[source] sqlx::Error),
}

/// Owner of the process-wide pool.
///
/// Hand out clones of `handle()` to repositories; call `close` once at
/// shutdown. `close` consumes the owner, so a second close cannot compile.
#[derive(Debug)]
pub struct DbPool {
    pool: PgPool,
}

impl DbPool {
    /// Create the pool and verify a connection answers a ping.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot connect or the ping fails.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let db = DbPool::connect(&DbConfig::from_env()?).await?;
    /// ```
    pub async fn connect(config: &DbConfig) -> Result<Self, PoolError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.connect_options())
            .await
            .map_err(PoolError::Connect)?;

        let db = Self { pool };
        if let Err(err) = db.ping().await {
            db.close().await;
            return Err(err);
        }

        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.name,
            max_connections = config.max_connections,
            "Connected to database"
        );
        Ok(db)
    }

    /// Liveness check on a freshly checked-out connection
    pub async fn ping(&self) -> Result<(), PoolError> {
        let mut conn = self.pool.acquire().await.map_err(PoolError::Ping)?;
        conn.ping().await.map_err(PoolError::Ping)
    }

    /// Shared handle for statement execution (cheap to clone)
    pub fn handle(&self) -> &PgPool {
        &self.pool
    }

    /// Close every connection. Later checkouts on cloned handles fail with
    /// `PoolClosed`; statements already running are not waited for.
    pub async fn close(self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
