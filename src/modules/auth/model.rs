use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::users::model::{Role, User};

/// Claims embedded in a session token at issuance. Admin tokens omit the
/// email claim. The claims only locate the user; authorization decisions are
/// always made against the live record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

/// Registration payload for user and bookseller accounts. Admin accounts are
/// created through the CLI only.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(length(min = 3, max = 30))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    /// Defaults to `user` when omitted.
    pub role: Option<Role>,
    /// Required for bookseller registrations; must be unique among stores.
    pub store_name: Option<String>,
    pub store_phone: Option<String>,
    pub store_address: Option<String>,
}
