use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::Claims;
use crate::modules::users::model::Role;
use crate::utils::errors::AppError;

/// Signs a session token for the given identity.
///
/// Admin sessions are issued without the email claim and with the shorter
/// admin expiry; everyone else gets the standard expiry.
pub fn create_access_token(
    user_id: Uuid,
    username: &str,
    email: Option<&str>,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let ttl = match role {
        Role::Admin => jwt_config.admin_token_expiry,
        Role::User | Role::Bookseller => jwt_config.user_token_expiry,
    };

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        email: email.map(|e| e.to_string()),
        role,
        exp: (now + ttl) as usize,
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry. Malformed, tampered and expired tokens all
/// collapse into the same error so callers can't probe which check failed.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::forbidden("Invalid or expired token"))
}
