//! Todo repository

use sqlx::{FromRow, SqlitePool};

use super::DbError;

/// Todo record from the database
#[derive(Debug, Clone, FromRow)]
pub struct TodoRecord {
    pub id: i64,
    pub task: String,
    pub completed: bool,
}

/// Resolved patch for one todo in a batch update.
#[derive(Debug, Clone)]
pub struct TodoPatch<'a> {
    pub id: i64,
    pub task: Option<&'a str>,
    pub completed: Option<bool>,
}

pub struct TodoRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TodoRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, task: &str, completed: bool) -> Result<TodoRecord, DbError> {
        let result = sqlx::query("INSERT INTO todos (task, completed) VALUES (?, ?)")
            .bind(task)
            .bind(completed)
            .execute(self.pool)
            .await?;

        self.get(result.last_insert_rowid()).await
    }

    /// List all todos, most recently inserted first.
    pub async fn list(&self) -> Result<Vec<TodoRecord>, DbError> {
        let todos = sqlx::query_as("SELECT id, task, completed FROM todos ORDER BY id DESC")
            .fetch_all(self.pool)
            .await?;
        Ok(todos)
    }

    pub async fn get(&self, id: i64) -> Result<TodoRecord, DbError> {
        sqlx::query_as("SELECT id, task, completed FROM todos WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "todo",
                id: id.to_string(),
            })
    }

    /// Overwrite the supplied fields; a `None` leaves the column untouched.
    pub async fn update(
        &self,
        id: i64,
        task: Option<&str>,
        completed: Option<bool>,
    ) -> Result<TodoRecord, DbError> {
        sqlx::query(
            "UPDATE todos SET task = COALESCE(?, task), completed = COALESCE(?, completed) WHERE id = ?",
        )
        .bind(task)
        .bind(completed)
        .bind(id)
        .execute(self.pool)
        .await?;

        self.get(id).await
    }

    /// Apply a batch of patches all-or-nothing.
    ///
    /// Runs inside one transaction: every id is checked for existence before
    /// any row is mutated, and a missing id rolls the whole batch back. The
    /// updated rows come back in request order.
    pub async fn update_many(
        &self,
        patches: &[TodoPatch<'_>],
    ) -> Result<Vec<TodoRecord>, DbError> {
        let mut tx = self.pool.begin().await?;

        for patch in patches {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos WHERE id = ?")
                .bind(patch.id)
                .fetch_one(&mut *tx)
                .await?;
            if count == 0 {
                // Dropping the transaction rolls back anything staged.
                return Err(DbError::NotFound {
                    resource: "todo",
                    id: patch.id.to_string(),
                });
            }
        }

        for patch in patches {
            sqlx::query(
                "UPDATE todos SET task = COALESCE(?, task), completed = COALESCE(?, completed) WHERE id = ?",
            )
            .bind(patch.task)
            .bind(patch.completed)
            .bind(patch.id)
            .execute(&mut *tx)
            .await?;
        }

        let mut updated = Vec::with_capacity(patches.len());
        for patch in patches {
            let todo: TodoRecord =
                sqlx::query_as("SELECT id, task, completed FROM todos WHERE id = ?")
                    .bind(patch.id)
                    .fetch_one(&mut *tx)
                    .await?;
            updated.push(todo);
        }

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "todo",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn pool() -> SqlitePool {
        let pool = db::connect_in_memory().await.unwrap();
        db::ensure_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn create_defaults_and_round_trip() {
        let pool = pool().await;
        let repo = TodoRepo::new(&pool);

        let todo = repo.create("Buy milk", false).await.unwrap();
        assert!(!todo.completed);

        let fetched = repo.get(todo.id).await.unwrap();
        assert_eq!(fetched.task, "Buy milk");
    }

    #[tokio::test]
    async fn list_is_insertion_order_descending() {
        let pool = pool().await;
        let repo = TodoRepo::new(&pool);

        let a = repo.create("a", false).await.unwrap();
        let b = repo.create("b", false).await.unwrap();

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn flag_and_task_update_independently() {
        let pool = pool().await;
        let repo = TodoRepo::new(&pool);
        let todo = repo.create("Walk dog", false).await.unwrap();

        let updated = repo.update(todo.id, None, Some(true)).await.unwrap();
        assert_eq!(updated.task, "Walk dog");
        assert!(updated.completed);

        let updated = repo.update(todo.id, Some("Walk cat"), None).await.unwrap();
        assert_eq!(updated.task, "Walk cat");
        assert!(updated.completed);
    }

    #[tokio::test]
    async fn batch_with_missing_id_changes_nothing() {
        let pool = pool().await;
        let repo = TodoRepo::new(&pool);
        let todo = repo.create("keep me", false).await.unwrap();

        let patches = [
            TodoPatch {
                id: todo.id,
                task: Some("changed"),
                completed: Some(true),
            },
            TodoPatch {
                id: 9999,
                task: None,
                completed: Some(true),
            },
        ];

        let err = repo.update_many(&patches).await.unwrap_err();
        match err {
            DbError::NotFound { resource, id } => {
                assert_eq!(resource, "todo");
                assert_eq!(id, "9999");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }

        // The valid half of the batch was rolled back too.
        let unchanged = repo.get(todo.id).await.unwrap();
        assert_eq!(unchanged.task, "keep me");
        assert!(!unchanged.completed);
    }

    #[tokio::test]
    async fn batch_preserves_request_order_and_field_isolation() {
        let pool = pool().await;
        let repo = TodoRepo::new(&pool);
        let a = repo.create("a", false).await.unwrap();
        let b = repo.create("b", false).await.unwrap();

        let patches = [
            TodoPatch {
                id: b.id,
                task: None,
                completed: Some(true),
            },
            TodoPatch {
                id: a.id,
                task: Some("a2"),
                completed: None,
            },
        ];

        let updated = repo.update_many(&patches).await.unwrap();
        assert_eq!(updated.len(), 2);

        // Response order follows the request, not id order.
        assert_eq!(updated[0].id, b.id);
        assert_eq!(updated[0].task, "b");
        assert!(updated[0].completed);

        assert_eq!(updated[1].id, a.id);
        assert_eq!(updated[1].task, "a2");
        assert!(!updated[1].completed);
    }
}
