//! SQLite storage layer
//!
//! Owns pool creation and the one-shot schema initializer. Every statement is
//! parameterised; single-statement operations ride SQLite's autocommit, and
//! the todo batch update uses an explicit transaction.
//!
//! Foreign key enforcement is turned off on every connection, matching the
//! store this service replaces: deleting a user does not cascade to or
//! restrict against their posts, so posts can orphan. Reads that discover an
//! orphan surface it as a consistency error instead of patching it over.

pub mod repos;

use std::path::Path;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Kept low for single-process tooling.
const MAX_CONNECTIONS: u32 = 5;

/// Open or create the database at the given path.
pub async fn connect(path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .context("failed to open sqlite database")?;

    Ok(pool)
}

/// Open an in-memory database (for testing). A single connection keeps every
/// operation on the same in-memory instance.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new().in_memory(true).foreign_keys(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .context("failed to open in-memory sqlite database")?;

    Ok(pool)
}

/// Create the three tables if absent. Idempotent; safe to call on every
/// process start. Partial failure is fatal at startup, not retried.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id      INTEGER PRIMARY KEY AUTOINCREMENT,
            name    TEXT NOT NULL,
            email   TEXT NOT NULL UNIQUE,
            user_id TEXT NOT NULL UNIQUE
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create users table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            title      TEXT NOT NULL,
            body       TEXT NOT NULL,
            user_id    TEXT NOT NULL REFERENCES users(user_id),
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create posts table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            task      TEXT NOT NULL,
            completed BOOLEAN NOT NULL DEFAULT FALSE
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create todos table")?;

    info!("database schema ready");
    Ok(())
}
