use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use crate::config::jwt::JwtConfig;
use crate::middleware::role::ensure_store_approved;
use crate::modules::users::model::{Role, StoreStatus, USER_COLUMNS, User};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, LoginResponse, RegisterRequestDto};

#[derive(sqlx::FromRow)]
struct UserWithPassword {
    #[sqlx(flatten)]
    user: User,
    password: String,
}

pub struct AuthService;

impl AuthService {
    /// Resolves and validates the role a registration asks for. Admin
    /// registration is rejected outright; bookseller registration demands a
    /// non-empty store name.
    pub fn registration_role(dto: &RegisterRequestDto) -> Result<Role, AppError> {
        let role = dto.role.unwrap_or(Role::User);

        match role {
            Role::Admin => Err(AppError::bad_request(
                "Admin accounts cannot be created through registration",
            )),
            Role::Bookseller => {
                let has_store_name = dto
                    .store_name
                    .as_deref()
                    .is_some_and(|name| !name.trim().is_empty());

                if has_store_name {
                    Ok(Role::Bookseller)
                } else {
                    Err(AppError::unprocessable(
                        "store_name is required for bookseller accounts",
                    ))
                }
            }
            Role::User => Ok(Role::User),
        }
    }

    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequestDto) -> Result<User, AppError> {
        let role = Self::registration_role(&dto)?;
        let username = dto.username.trim().to_string();
        let email = dto.email.trim().to_lowercase();

        let email_taken =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE LOWER(email) = $1")
                .bind(&email)
                .fetch_one(db)
                .await
                .context("Failed to check email uniqueness")
                .map_err(AppError::database)?;

        if email_taken > 0 {
            return Err(AppError::bad_request("Email already exists"));
        }

        let username_taken = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE LOWER(username) = LOWER($1)",
        )
        .bind(&username)
        .fetch_one(db)
        .await
        .context("Failed to check username uniqueness")
        .map_err(AppError::database)?;

        if username_taken > 0 {
            return Err(AppError::bad_request("Username already exists"));
        }

        let (store_name, store_status) = match role {
            Role::Bookseller => {
                let store_name = dto
                    .store_name
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .to_string();

                let name_taken = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM users \
                     WHERE role = 'bookseller' AND LOWER(store_name) = LOWER($1)",
                )
                .bind(&store_name)
                .fetch_one(db)
                .await
                .context("Failed to check store name uniqueness")
                .map_err(AppError::database)?;

                if name_taken > 0 {
                    return Err(AppError::unprocessable("Store name is already taken"));
                }

                (Some(store_name), Some(StoreStatus::Pending))
            }
            Role::User | Role::Admin => (None, None),
        };

        // bcrypt is deliberately slow; keep it off the async worker threads.
        let password = dto.password.clone();
        let hashed_password = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(AppError::internal)??;

        let insert = format!(
            "INSERT INTO users \
             (username, email, password, role, store_name, store_status, store_phone, store_address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {USER_COLUMNS}"
        );

        let user = sqlx::query_as::<_, User>(&insert)
            .bind(&username)
            .bind(&email)
            .bind(&hashed_password)
            .bind(role)
            .bind(&store_name)
            .bind(store_status)
            .bind(&dto.store_phone)
            .bind(&dto.store_address)
            .fetch_one(db)
            .await
            .map_err(|e| match e {
                // Race with the pre-checks above; the constraint is the truth.
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    AppError::bad_request("Username, email or store name already exists")
                }
                other => AppError::database(
                    anyhow::Error::new(other).context("Failed to insert user"),
                ),
            })?;

        Ok(user)
    }

    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let row = Self::fetch_by_email(db, &dto.email).await?;

        Self::verify_credentials(&dto.password, &row).await?;

        if !row.user.is_active {
            return Err(AppError::forbidden("Account is deactivated"));
        }

        // Booksellers cannot log in until an admin approves their store.
        if row.user.role == Role::Bookseller {
            ensure_store_approved(row.user.store_status)?;
        }

        let user = Self::record_login(db, &row.user).await?;

        let access_token = create_access_token(
            user.id,
            &user.username,
            Some(&user.email),
            user.role,
            jwt_config,
        )?;

        Ok(LoginResponse { access_token, user })
    }

    /// Admin sign-in. Issues the short-lived admin token without an email
    /// claim; non-admin credentials are rejected even when valid.
    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn admin_login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let row = Self::fetch_by_email(db, &dto.email).await?;

        Self::verify_credentials(&dto.password, &row).await?;

        match row.user.role {
            Role::Admin => {}
            Role::User | Role::Bookseller => {
                return Err(AppError::forbidden("Administrator credentials required"));
            }
        }

        if !row.user.is_active {
            return Err(AppError::forbidden("Account is deactivated"));
        }

        let user = Self::record_login(db, &row.user).await?;

        let access_token =
            create_access_token(user.id, &user.username, None, user.role, jwt_config)?;

        Ok(LoginResponse { access_token, user })
    }

    async fn fetch_by_email(db: &PgPool, email: &str) -> Result<UserWithPassword, AppError> {
        let select = format!(
            "SELECT {USER_COLUMNS}, password FROM users WHERE LOWER(email) = LOWER($1)"
        );

        sqlx::query_as::<_, UserWithPassword>(&select)
            .bind(email.trim())
            .fetch_optional(db)
            .await
            .context("Failed to fetch user by email")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password"))
    }

    async fn verify_credentials(password: &str, row: &UserWithPassword) -> Result<(), AppError> {
        let password = password.to_string();
        let hash = row.password.clone();

        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(AppError::internal)??;

        if valid {
            Ok(())
        } else {
            Err(AppError::unauthorized("Invalid email or password"))
        }
    }

    async fn record_login(db: &PgPool, user: &User) -> Result<User, AppError> {
        let update = format!(
            "UPDATE users SET last_login = NOW() WHERE id = $1 RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&update)
            .bind(user.id)
            .fetch_one(db)
            .await
            .context("Failed to record login timestamp")
            .map_err(AppError::database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_dto(role: Option<Role>, store_name: Option<&str>) -> RegisterRequestDto {
        RegisterRequestDto {
            username: "reader".to_string(),
            email: "reader@example.com".to_string(),
            password: "password123".to_string(),
            role,
            store_name: store_name.map(str::to_string),
            store_phone: None,
            store_address: None,
        }
    }

    #[test]
    fn test_registration_role_defaults_to_user() {
        let role = AuthService::registration_role(&register_dto(None, None)).unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn test_registration_rejects_admin() {
        let result = AuthService::registration_role(&register_dto(Some(Role::Admin), None));
        assert!(result.is_err());
    }

    #[test]
    fn test_bookseller_requires_store_name() {
        let result = AuthService::registration_role(&register_dto(Some(Role::Bookseller), None));
        assert!(result.is_err());

        let result =
            AuthService::registration_role(&register_dto(Some(Role::Bookseller), Some("   ")));
        assert!(result.is_err());

        let role =
            AuthService::registration_role(&register_dto(Some(Role::Bookseller), Some("Acme Books")))
                .unwrap();
        assert_eq!(role, Role::Bookseller);
    }
}
