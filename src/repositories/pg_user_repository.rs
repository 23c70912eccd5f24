use crate::models::user::User;
use crate::repositories::user_repository::{RepositoryError, RepositoryResult, UserRepository};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

/// PostgreSQL backend, the one the service runs against by default.
///
/// Columns are cast on the way out so that an existing table using `SERIAL`
/// or `TIMESTAMP` decodes the same as one using `BIGSERIAL`/`TIMESTAMPTZ`.
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, name: &str, email: &str) -> RepositoryResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, created_at)
            VALUES ($1, $2, $3)
            RETURNING id::int8 AS id, name, email, created_at::timestamptz AS created_at
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
        sqlx::query_as::<_, User>(
            r#"
            SELECT id::int8 AS id, name, email, created_at::timestamptz AS created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id::int8 AS id, name, email, created_at::timestamptz AS created_at
            FROM users
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn update_user(&self, id: i64, name: &str, email: &str) -> RepositoryResult<User> {
        // RETURNING yields no row when the id is unknown
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET name = $1, email = $2
            WHERE id = $3
            RETURNING id::int8 AS id, name, email, created_at::timestamptz AS created_at
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
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
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
