//! User repository

use sqlx::{FromRow, SqlitePool};

use super::DbError;

/// User record from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub user_id: String,
}

pub struct UserRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user and read back the row to pick up the server-assigned
    /// numeric id. A unique-constraint loss (concurrent create with the same
    /// email) surfaces as a conflict.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        user_id: &str,
    ) -> Result<UserRecord, DbError> {
        sqlx::query("INSERT INTO users (name, email, user_id) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(user_id)
            .execute(self.pool)
            .await
            .map_err(|err| unique_to_conflict(err, email))?;

        self.get(user_id).await
    }

    pub async fn list(&self) -> Result<Vec<UserRecord>, DbError> {
        let users = sqlx::query_as("SELECT id, name, email, user_id FROM users")
            .fetch_all(self.pool)
            .await?;
        Ok(users)
    }

    pub async fn get(&self, user_id: &str) -> Result<UserRecord, DbError> {
        sqlx::query_as("SELECT id, name, email, user_id FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "user",
                id: user_id.to_string(),
            })
    }

    pub async fn exists(&self, user_id: &str) -> Result<bool, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Exact-match email check, optionally excluding one user (for updates).
    pub async fn email_taken(
        &self,
        email: &str,
        exclude_user_id: Option<&str>,
    ) -> Result<bool, DbError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE email = ? AND (? IS NULL OR user_id != ?)",
        )
        .bind(email)
        .bind(exclude_user_id)
        .bind(exclude_user_id)
        .fetch_one(self.pool)
        .await?;
        Ok(count > 0)
    }

    /// Overwrite the supplied fields; a `None` leaves the column untouched.
    /// The external id is immutable and never part of the SET list.
    pub async fn update(
        &self,
        user_id: &str,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<UserRecord, DbError> {
        sqlx::query(
            "UPDATE users SET name = COALESCE(?, name), email = COALESCE(?, email) WHERE user_id = ?",
        )
        .bind(name)
        .bind(email)
        .bind(user_id)
        .execute(self.pool)
        .await
        .map_err(|err| unique_to_conflict(err, email.unwrap_or("")))?;

        self.get(user_id).await
    }

    pub async fn delete(&self, user_id: &str) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "user",
                id: user_id.to_string(),
            });
        }
        Ok(())
    }
}

fn unique_to_conflict(err: sqlx::Error, email: &str) -> DbError {
    match err.as_database_error() {
        Some(db) if db.is_unique_violation() => {
            DbError::Conflict(format!("email '{}' is already registered", email))
        }
        _ => DbError::Sqlx(err),
    }
}
