//! Role-based authorization checks layered on top of the session verifier.
//!
//! Two styles are provided:
//! 1. Router layers via `axum::middleware::from_fn_with_state`
//!    ([`require_admin`], [`require_approved_bookseller`])
//! 2. Extractors usable directly in handler signatures ([`RequireAdmin`],
//!    [`RequireApprovedBookseller`])
//!
//! Role membership is cheap (it sits on the principal), but store approval
//! can change at any moment through an admin action, so it is always read
//! fresh from the database and never trusted from a token.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::auth::{AuthUser, Principal};
use crate::modules::users::model::{Role, StoreStatus};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Fails with 403 unless the principal holds exactly the required role.
pub fn check_role(principal: &Principal, required: Role) -> Result<(), AppError> {
    if principal.role != required {
        return Err(AppError::forbidden(format!(
            "Access denied. Required role: {}, but user has role: {}",
            required, principal.role
        )));
    }

    Ok(())
}

/// Fails with 403 unless the principal's role is in the allowed set.
pub fn check_any_role(principal: &Principal, allowed: &[Role]) -> Result<(), AppError> {
    if !allowed.contains(&principal.role) {
        return Err(AppError::forbidden(format!(
            "Access denied. Allowed roles: {:?}, but user has role: {}",
            allowed, principal.role
        )));
    }

    Ok(())
}

/// Resource ownership rule: a resource may be mutated by its owner or by an
/// admin, nobody else.
pub fn check_owner(principal: &Principal, owner_id: Uuid) -> Result<(), AppError> {
    match principal.role {
        Role::Admin => Ok(()),
        Role::User | Role::Bookseller => {
            if principal.id == owner_id {
                Ok(())
            } else {
                Err(AppError::forbidden("You do not own this resource"))
            }
        }
    }
}

/// Store-approval admission rule. `None` means the record carries no store
/// state at all, which gates the same way as a still-pending store.
pub fn ensure_store_approved(status: Option<StoreStatus>) -> Result<(), AppError> {
    match status {
        Some(StoreStatus::Approved) => Ok(()),
        Some(StoreStatus::Rejected) => {
            Err(AppError::forbidden("Store application has been rejected"))
        }
        Some(StoreStatus::Pending) | None => Err(AppError::forbidden("Store is pending approval")),
    }
}

/// Reads the current store status for a user. Deliberately a fresh query on
/// every call: approval state must never be cached across requests.
pub async fn fetch_store_status(
    db: &PgPool,
    user_id: Uuid,
) -> Result<Option<StoreStatus>, AppError> {
    let status = sqlx::query_scalar::<_, Option<StoreStatus>>(
        "SELECT store_status FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("Failed to load store status")
    .map_err(AppError::database)?;

    Ok(status.flatten())
}

/// Admission rule for publishing books: admins always may, booksellers only
/// with an approved store, plain users never.
pub async fn ensure_can_publish(db: &PgPool, principal: &Principal) -> Result<(), AppError> {
    match principal.role {
        Role::Admin => Ok(()),
        Role::Bookseller => {
            let status = fetch_store_status(db, principal.id).await?;
            ensure_store_approved(status)
        }
        Role::User => Err(AppError::forbidden("Bookseller account required")),
    }
}

/// Middleware checking the authenticated user against an allowed role set.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed: Vec<Role>,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    check_any_role(&auth_user.0, &allowed)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Router layer for admin-only route groups.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![Role::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Router layer for bookseller route groups that additionally demands an
/// approved store, checked against the live record.
pub async fn require_approved_bookseller(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = req.into_parts();

    let auth_user = match AuthUser::from_request_parts(&mut parts, &state).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    match auth_user.0.role {
        Role::Bookseller => {}
        Role::User | Role::Admin => {
            return AppError::forbidden("Bookseller account required").into_response();
        }
    }

    let status = match fetch_store_status(&state.db, auth_user.id()).await {
        Ok(status) => status,
        Err(err) => return err.into_response(),
    };

    if let Err(err) = ensure_store_approved(status) {
        return err.into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}

/// Extractor variant of the admin gate; carries the admin's principal.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        match auth_user.0.role {
            Role::Admin => Ok(RequireAdmin(auth_user)),
            Role::User | Role::Bookseller => {
                Err(AppError::forbidden("Administrator privileges required"))
            }
        }
    }
}

/// Extractor variant of the approved-bookseller gate.
#[derive(Debug, Clone)]
pub struct RequireApprovedBookseller(pub AuthUser);

impl FromRequestParts<AppState> for RequireApprovedBookseller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        match auth_user.0.role {
            Role::Bookseller => {}
            Role::User | Role::Admin => {
                return Err(AppError::forbidden("Bookseller account required"));
            }
        }

        let status = fetch_store_status(&state.db, auth_user.id()).await?;
        ensure_store_approved(status)?;

        Ok(RequireApprovedBookseller(auth_user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            username: "test".to_string(),
            email: "test@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_check_role_exact_match() {
        assert!(check_role(&principal(Role::Admin), Role::Admin).is_ok());
        assert!(check_role(&principal(Role::Bookseller), Role::Bookseller).is_ok());
        assert!(check_role(&principal(Role::User), Role::User).is_ok());
    }

    #[test]
    fn test_check_role_no_match() {
        assert!(check_role(&principal(Role::User), Role::Admin).is_err());
        assert!(check_role(&principal(Role::Bookseller), Role::Admin).is_err());
        assert!(check_role(&principal(Role::Admin), Role::User).is_err());
    }

    #[test]
    fn test_check_any_role() {
        let allowed = [Role::Admin, Role::Bookseller];
        assert!(check_any_role(&principal(Role::Admin), &allowed).is_ok());
        assert!(check_any_role(&principal(Role::Bookseller), &allowed).is_ok());
        assert!(check_any_role(&principal(Role::User), &allowed).is_err());
        assert!(check_any_role(&principal(Role::Admin), &[]).is_err());
    }

    #[test]
    fn test_check_owner_owner_allowed() {
        let p = principal(Role::User);
        assert!(check_owner(&p, p.id).is_ok());
    }

    #[test]
    fn test_check_owner_non_owner_rejected() {
        let p = principal(Role::User);
        assert!(check_owner(&p, Uuid::new_v4()).is_err());

        let p = principal(Role::Bookseller);
        assert!(check_owner(&p, Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_check_owner_admin_bypasses() {
        let p = principal(Role::Admin);
        assert!(check_owner(&p, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_ensure_store_approved() {
        assert!(ensure_store_approved(Some(StoreStatus::Approved)).is_ok());
        assert!(ensure_store_approved(Some(StoreStatus::Pending)).is_err());
        assert!(ensure_store_approved(Some(StoreStatus::Rejected)).is_err());
        assert!(ensure_store_approved(None).is_err());
    }
}
