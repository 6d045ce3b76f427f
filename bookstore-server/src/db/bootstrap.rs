//! Schema bootstrap - table creation and one-time seeding
//!
//! Runs once at startup, before the listener opens. Table creation is
//! fatal on failure; seeding only logs.

use sqlx::{PgPool, Postgres, QueryBuilder};

/// Baseline rows inserted into an empty table
pub const SEED_BOOKS: [(&str, &str, i32); 3] = [
    ("The Great Gatsby", "F. Scott Fitzgerald", 3),
    ("1984", "George Orwell", 5),
    ("To Kill a Mockingbird", "Harper Lee", 4),
];

/// What the seeding step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Table was empty; this many rows were inserted
    Seeded(u64),
    /// Table already held this many rows; nothing inserted
    AlreadyPopulated(i64),
    /// Count or insert failed (logged); table left as is
    Skipped,
}

/// Ensure the `books` table exists, then seed it if empty.
///
/// Only table creation can fail this call.
pub async fn bootstrap(pool: &PgPool) -> Result<SeedOutcome, sqlx::Error> {
    create_table(pool).await?;
    Ok(seed(pool).await)
}

/// Create the books table if it does not exist
pub async fn create_table(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id SERIAL PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            author VARCHAR(255) NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Table created or already exists");
    Ok(())
}

/// Insert `SEED_BOOKS` if and only if the table is empty.
pub async fn seed(pool: &PgPool) -> SeedOutcome {
    let count = match sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books")
        .fetch_one(pool)
        .await
    {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!(error = %e, "Error checking seed data");
            return SeedOutcome::Skipped;
        }
    };

    if count > 0 {
        tracing::debug!(count, "Books table already populated, skipping seed");
        return SeedOutcome::AlreadyPopulated(count);
    }

    let mut insert: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO books (title, author, quantity) ");
    insert.push_values(SEED_BOOKS, |mut row, (title, author, quantity)| {
        row.push_bind(title).push_bind(author).push_bind(quantity);
    });

    match insert.build().execute(pool).await {
        Ok(result) => {
            tracing::info!(rows = result.rows_affected(), "Initial data seeded");
            SeedOutcome::Seeded(result.rows_affected())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Error seeding data");
            SeedOutcome::Skipped
        }
    }
}
