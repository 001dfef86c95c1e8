//! # PostgreSQL Import
//!
//! Schema initialization and CSV import for the portfolio database.
//! Rows are upserted by `codigo` inside a single transaction; `N/A` and
//! empty cells become NULL, the same absence convention the validator
//! uses.

pub mod import;
pub mod init;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

/// Environment variable consulted when no connection URL is passed
pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";

/// Database errors
#[derive(Debug, Error)]
pub enum DbError {
    /// No URL passed and `DATABASE_URL` not set
    #[error("no database URL: pass --database-url or set DATABASE_URL")]
    MissingUrl,
    /// CSV could not be read
    #[error("import I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV could not be parsed
    #[error("import CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Query or connection failure
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    /// CSV row is missing a column the importer needs
    #[error("row {row} is missing column '{column}'")]
    MissingColumn { row: u64, column: String },
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Resolves the connection URL from the argument or the environment.
pub fn resolve_database_url(url: Option<String>) -> DbResult<String> {
    match url {
        Some(u) if !u.trim().is_empty() => Ok(u),
        _ => std::env::var(DATABASE_URL_ENV_VAR).map_err(|_| DbError::MissingUrl),
    }
}

/// Opens a connection pool.
pub async fn connect(database_url: &str) -> DbResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub use import::{import_csv, ImportRecord, ImportSummary};
pub use init::init_database;
