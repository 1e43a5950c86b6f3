use sqlx::PgPool;

use crate::modules::users::model::{Role, USER_COLUMNS, User};
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

/// Creates an administrator account directly in the database. Admins cannot
/// register through the API; this is the only way to mint one.
pub async fn create_admin(
    db: &PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let hashed_password = hash_password(password)?;

    let insert = format!(
        "INSERT INTO users (username, email, password, role) \
         VALUES ($1, $2, $3, $4) \
         RETURNING {USER_COLUMNS}"
    );

    sqlx::query_as::<_, User>(&insert)
        .bind(username.trim())
        .bind(email.trim().to_lowercase())
        .bind(&hashed_password)
        .bind(Role::Admin)
        .fetch_one(db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::bad_request("A user with this username or email already exists")
            }
            other => {
                AppError::database(anyhow::Error::new(other).context("Failed to insert admin"))
            }
        })
}
