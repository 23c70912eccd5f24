use crate::models::user::User;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("User not found")]
    NotFound,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Data access for the `users` table.
///
/// Every method issues exactly one statement against the shared pool.
/// Implementations must be safe to share across request tasks.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, name: &str, email: &str) -> RepositoryResult<User>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<User>;
    async fn list_users(&self) -> RepositoryResult<Vec<User>>;
    async fn update_user(&self, id: i64, name: &str, email: &str) -> RepositoryResult<User>;
    /// Deleting an id that does not exist is not an error.
    async fn delete_user(&self, id: i64) -> RepositoryResult<()>;
    async fn close(&self);
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, name: &str, email: &str) -> RepositoryResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, created_at)
            VALUES (?, ?, ?)
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<User> {
        sqlx::query_as::<_, User>("SELECT id, name, email, created_at FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn update_user(&self, id: i64, name: &str, email: &str) -> RepositoryResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET name = ?, email = ?
            WHERE id = ?
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    async fn delete_user(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(id, rows_affected = result.rows_affected(), "Deleted user");

        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
