use std::env;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Expiry for user and bookseller sessions, in seconds.
    pub user_token_expiry: i64,
    /// Expiry for admin sessions, in seconds. Deliberately short.
    pub admin_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "change-this-secret-in-production".to_string()),
            user_token_expiry: env::var("JWT_USER_TOKEN_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604800), // 7 days
            admin_token_expiry: env::var("JWT_ADMIN_TOKEN_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
        }
    }
}
