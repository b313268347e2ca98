//! Database initialization
//!
//! Creates the database file and schema on first run. Safe to call on every
//! startup; all statements are idempotent.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL lets the recent-readings view read while a strip is being logged
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_readings_table(&pool).await?;

    Ok(pool)
}

/// Create the readings table
///
/// One row per logged control strip. `row_number` is the position on the
/// monthly sheet for that process, starting at the first data row.
pub async fn create_readings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS readings (
            guid TEXT PRIMARY KEY,
            process TEXT NOT NULL CHECK (process IN ('c41', 'bw')),
            period TEXT NOT NULL,
            row_number INTEGER NOT NULL,
            date TEXT NOT NULL,
            time TEXT NOT NULL,
            notes TEXT NOT NULL DEFAULT '',
            readings TEXT NOT NULL,
            deviations TEXT NOT NULL,
            hdld TEXT NOT NULL,
            status TEXT NOT NULL,
            problems TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (process, period, row_number)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_readings_process_period ON readings(process, period, row_number)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
