use anyhow::Context;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::users::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// The authenticated caller, normalized for downstream authorization checks.
///
/// A principal is always re-derived from the live user record, not from the
/// token claims: the claims only locate the record. Role changes,
/// deactivation and store-approval changes therefore take effect on the next
/// request, without any token re-issue or revocation list.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
}

#[derive(sqlx::FromRow)]
struct PrincipalRow {
    id: Uuid,
    username: String,
    email: String,
    role: Role,
    is_active: bool,
}

/// Extractor gating every protected route.
///
/// Rejects with 401 when no bearer credential is present, 403 when the token
/// fails verification, 404 when the subject no longer exists, and 403 when
/// the account has been deactivated.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.0.role, Role::Admin)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::forbidden("Invalid or expired token"))?;

        // Claims are a hint; the live record is truth.
        let row = sqlx::query_as::<_, PrincipalRow>(
            "SELECT id, username, email, role, is_active FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&state.db)
        .await
        .context("Failed to load user for session verification")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("User not found"))?;

        if !row.is_active {
            return Err(AppError::forbidden("Account is deactivated"));
        }

        Ok(AuthUser(Principal {
            id: row.id,
            username: row.username,
            email: row.email,
            role: row.role,
        }))
    }
}
