//! Schema bootstrap command
//!
//! Also hosts `open_database`, the fatal-on-failure startup path shared
//! with `serve`.

use anyhow::{Context, Result};
use clap::Parser;

use bookstore_server::db::{bootstrap, DbPool, SeedOutcome};
use bookstore_server::DbConfig;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// Only create the table; do not insert the baseline books
    #[arg(long)]
    pub no_seed: bool,
}

/// Connect, ping and bootstrap. Any failure here aborts startup.
pub(crate) async fn open_database() -> Result<(DbPool, SeedOutcome)> {
    let config = DbConfig::from_env().context("Invalid database configuration")?;
    tracing::debug!(?config, "Database configuration loaded");

    let db = DbPool::connect(&config)
        .await
        .context("Failed to connect to database")?;

    match bootstrap::bootstrap(db.handle()).await {
        Ok(outcome) => Ok((db, outcome)),
        Err(e) => {
            db.close().await;
            Err(e).context("Failed to create table")
        }
    }
}

/// Bootstrap the schema and exit
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let (db, outcome) = if args.no_seed {
        let config = DbConfig::from_env().context("Invalid database configuration")?;
        let db = DbPool::connect(&config)
            .await
            .context("Failed to connect to database")?;
        let created = bootstrap::create_table(db.handle()).await;
        if let Err(e) = created {
            db.close().await;
            return Err(e).context("Failed to create table");
        }
        (db, None)
    } else {
        let (db, outcome) = open_database().await?;
        (db, Some(outcome))
    };

    match outcome {
        Some(SeedOutcome::Seeded(rows)) => println!("Table ready, seeded {} books", rows),
        Some(SeedOutcome::AlreadyPopulated(count)) => {
            println!("Table ready, {} books already present", count)
        }
        Some(SeedOutcome::Skipped) => println!("Table ready, seeding skipped (see log)"),
        None => println!("Table ready"),
    }

    db.close().await;
    Ok(())
}
