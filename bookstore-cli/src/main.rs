//! bookstore CLI - HTTP CRUD service over a `books` table
//!
//! Subcommands:
//! - `serve`: connect, bootstrap the schema and serve `/books` on :8080
//! - `init-db`: connect and bootstrap the schema, then exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "bookstore",
    author,
    version,
    about = "Book inventory HTTP service backed by PostgreSQL",
    long_about = "Serve create/read/update/delete operations over books. Database settings \
                  come from DB_HOST, DB_PORT, DB_USER, DB_PASSWORD and DB_NAME (a .env file \
                  in the working directory is honoured)."
)]
struct Cli {
    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the books table and seed it if empty, then exit
    InitDb(commands::init_db::InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap so `env = ...` args see it
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::InitDb(args) => commands::run_init_db(args).await?,
    }
    Ok(())
}
