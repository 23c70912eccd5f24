pub mod test_helpers {
    use crate::repositories::SqliteUserRepository;
    use crate::{routes::build_router, AppState};
    use axum::Router;
    use sqlx::{postgres::PgPoolOptions, sqlite::SqlitePoolOptions, PgPool, SqlitePool};
    use std::sync::Arc;

    const SQLITE_SCHEMA: &str = include_str!("../schema/sqlite.sql");
    pub const POSTGRES_SCHEMA: &str = include_str!("../schema/postgres.sql");

    /// Create a new in-memory SQLite database with the `users` table
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        // A single connection, since each in-memory connection is its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        sqlx::query(SQLITE_SCHEMA).execute(&pool).await?;

        Ok(pool)
    }

    /// Connect to a live PostgreSQL server and create `users` as a temporary
    /// table from `create_table`, which must be a `CREATE TEMP TABLE users`
    /// statement. The temporary table shadows any real one and vanishes with
    /// the connection, so the pool is held to one connection.
    pub async fn create_pg_test_db(
        database_url: &str,
        create_table: &str,
    ) -> Result<PgPool, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        sqlx::query(create_table).execute(&pool).await?;

        Ok(pool)
    }

    /// Router wired to a fresh in-memory database
    pub async fn create_test_app() -> Result<(Router, SqlitePool), sqlx::Error> {
        let pool = create_test_db().await?;
        let state = AppState {
            users: Arc::new(SqliteUserRepository::new(pool.clone())),
        };

        Ok((build_router(state), pool))
    }

    /// Insert a user row directly, bypassing the repository
    pub async fn insert_test_user(
        pool: &SqlitePool,
        name: &str,
        email: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO users (name, email, created_at) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(chrono::Utc::now())
            .execute(pool)
            .await?;

        Ok(result.last_insert_rowid())
    }
}
