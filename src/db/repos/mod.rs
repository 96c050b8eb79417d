//! Entity repositories
//!
//! One repo per entity. Each repo speaks parameterised SQL against the pool
//! and returns typed records; raw rows never leave this boundary. Store
//! constraint violations are translated into [`DbError`] variants here, never
//! surfaced raw to handlers.

pub mod posts;
pub mod todos;
pub mod users;

pub use posts::{PostRecord, PostRepo};
pub use todos::{TodoPatch, TodoRecord, TodoRepo};
pub use users::{UserRecord, UserRepo};

use thiserror::Error;

/// Database error type
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    #[error("{0}")]
    Conflict(String),

    /// A row references another that no longer exists. This violates the
    /// data model's invariants and is surfaced, never silently repaired.
    #[error("inconsistent data: {0}")]
    Inconsistent(String),
}
