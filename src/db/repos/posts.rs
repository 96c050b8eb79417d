//! Post repository
//!
//! Every read joins the owning user so the author can be embedded in the
//! response. A post whose author row is missing violates the data model and
//! is reported as [`DbError::Inconsistent`], not a 404.

use chrono::NaiveDateTime;
use sqlx::{FromRow, SqlitePool};

use super::DbError;

/// Raw row shape shared by every post query.
#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    body: String,
    user_id: String,
    created_at: Option<NaiveDateTime>,
    author_name: Option<String>,
    author_email: Option<String>,
}

/// Post record with its author resolved.
#[derive(Debug, Clone)]
pub struct PostRecord {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub user_id: String,
    pub created_at: Option<NaiveDateTime>,
    pub author_name: String,
    pub author_email: String,
}

const SELECT_POST: &str = r#"
    SELECT p.id, p.title, p.body, p.user_id, p.created_at,
           u.name AS author_name, u.email AS author_email
    FROM posts p
    LEFT JOIN users u ON u.user_id = p.user_id
"#;

pub struct PostRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a post and read back the row for the server-assigned id and
    /// timestamp. A foreign-key loss (owner deleted between the handler's
    /// pre-check and the insert) surfaces as not-found.
    pub async fn create(
        &self,
        title: &str,
        body: &str,
        user_id: &str,
    ) -> Result<PostRecord, DbError> {
        let result = sqlx::query("INSERT INTO posts (title, body, user_id) VALUES (?, ?, ?)")
            .bind(title)
            .bind(body)
            .bind(user_id)
            .execute(self.pool)
            .await
            .map_err(|err| match err.as_database_error() {
                Some(db) if db.is_foreign_key_violation() => DbError::NotFound {
                    resource: "user",
                    id: user_id.to_string(),
                },
                _ => DbError::Sqlx(err),
            })?;

        self.get(result.last_insert_rowid()).await
    }

    /// List all posts, newest first. The id tiebreak keeps the order stable
    /// when two posts share a timestamp second.
    pub async fn list(&self) -> Result<Vec<PostRecord>, DbError> {
        let rows: Vec<PostRow> =
            sqlx::query_as(&format!("{SELECT_POST} ORDER BY p.created_at DESC, p.id DESC"))
                .fetch_all(self.pool)
                .await?;

        rows.into_iter().map(resolve_author).collect()
    }

    pub async fn get(&self, id: i64) -> Result<PostRecord, DbError> {
        let row: PostRow = sqlx::query_as(&format!("{SELECT_POST} WHERE p.id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "post",
                id: id.to_string(),
            })?;

        resolve_author(row)
    }

    /// Overwrite the supplied fields; a `None` leaves the column untouched.
    pub async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        body: Option<&str>,
    ) -> Result<PostRecord, DbError> {
        sqlx::query("UPDATE posts SET title = COALESCE(?, title), body = COALESCE(?, body) WHERE id = ?")
            .bind(title)
            .bind(body)
            .bind(id)
            .execute(self.pool)
            .await?;

        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "post",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

fn resolve_author(row: PostRow) -> Result<PostRecord, DbError> {
    let (author_name, author_email) = match (row.author_name, row.author_email) {
        (Some(name), Some(email)) => (name, email),
        _ => {
            return Err(DbError::Inconsistent(format!(
                "post {} references missing user '{}'",
                row.id, row.user_id
            )))
        }
    };

    Ok(PostRecord {
        id: row.id,
        title: row.title,
        body: row.body,
        user_id: row.user_id,
        created_at: row.created_at,
        author_name,
        author_email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::db::repos::UserRepo;

    async fn pool() -> SqlitePool {
        let pool = db::connect_in_memory().await.unwrap();
        db::ensure_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn create_joins_author_and_assigns_timestamp() {
        let pool = pool().await;
        UserRepo::new(&pool)
            .create("Ann", "ann@x.com", "u-1")
            .await
            .unwrap();

        let post = PostRepo::new(&pool).create("T", "B", "u-1").await.unwrap();
        assert_eq!(post.author_name, "Ann");
        assert_eq!(post.author_email, "ann@x.com");
        assert!(post.created_at.is_some());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let pool = pool().await;
        UserRepo::new(&pool)
            .create("Ann", "ann@x.com", "u-1")
            .await
            .unwrap();

        let repo = PostRepo::new(&pool);
        let first = repo.create("first", "B", "u-1").await.unwrap();
        let second = repo.create("second", "B", "u-1").await.unwrap();
        let third = repo.create("third", "B", "u-1").await.unwrap();

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn orphaned_post_is_a_consistency_error() {
        let pool = pool().await;
        let users = UserRepo::new(&pool);
        users.create("Ann", "ann@x.com", "u-1").await.unwrap();

        let repo = PostRepo::new(&pool);
        let post = repo.create("T", "B", "u-1").await.unwrap();

        // User deletion does not cascade or restrict; the post orphans.
        users.delete("u-1").await.unwrap();

        let err = repo.get(post.id).await.unwrap_err();
        assert!(matches!(err, DbError::Inconsistent(_)));
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let pool = pool().await;
        let err = PostRepo::new(&pool).get(999).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "post", .. }));
    }
}
