pub mod pg_user_repository;
pub mod user_repository;

pub use pg_user_repository::PgUserRepository;
pub use user_repository::{RepositoryError, SqliteUserRepository, UserRepository};
