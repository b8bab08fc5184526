//! # Database Store
//!
//! Database connection pool and repository implementations.

// region: --- Modules
pub mod models;
pub mod token_repository;
pub mod user_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use token_repository::TokenRepository;
pub use user_repository::UserRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Create a new SQLite connection pool for the given database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true);

    SqlitePool::connect_with(options).await
}
// endregion: --- Types and Functions
