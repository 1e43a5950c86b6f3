use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;

/// Initializes the PostgreSQL connection pool from `DATABASE_URL`.
///
/// Called once at startup; the pool is cheaply cloneable and shared through
/// the application state.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the database is unreachable.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
