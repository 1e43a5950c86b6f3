//! User data models and DTOs.
//!
//! The [`User`] entity backs every authorization decision in the system:
//! [`Role`] decides which gates admit the caller, `is_active` soft-deletes an
//! account without losing its rows, and the store columns carry a
//! bookseller's approval state. `store_name`/`store_status` are only
//! meaningful when `role == Role::Bookseller`; other roles leave them NULL.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::serde::deserialize_optional_role;

/// Closed set of account roles. Every authorization decision matches on this
/// exhaustively, so adding a role is a compile-time-visible change.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    User,
    Bookseller,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bookseller => "bookseller",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "bookseller" => Ok(Role::Bookseller),
            "admin" => Ok(Role::Admin),
            other => Err(format!("invalid role: {}", other)),
        }
    }
}

/// Bookseller store approval state. Assigned `Pending` at registration and
/// changed only by the admin approval workflow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "store_status", rename_all = "lowercase")]
pub enum StoreStatus {
    Pending,
    Approved,
    Rejected,
}

impl StoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Pending => "pending",
            StoreStatus::Approved => "approved",
            StoreStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StoreStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(StoreStatus::Pending),
            "approved" => Ok(StoreStatus::Approved),
            "rejected" => Ok(StoreStatus::Rejected),
            other => Err(format!("invalid store status: {}", other)),
        }
    }
}

/// Column list shared by every query that loads a [`User`]. The password
/// column is deliberately absent; only the auth service reads it, through its
/// own projection.
pub const USER_COLUMNS: &str = "id, username, email, role, is_active, last_login, \
     store_name, store_status, store_phone, store_address, created_at, updated_at";

/// A user as returned by the API. Never carries the password digest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub store_name: Option<String>,
    pub store_status: Option<StoreStatus>,
    pub store_phone: Option<String>,
    pub store_address: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// The bookseller-facing view of their store record.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StoreProfile {
    pub store_name: String,
    pub store_status: StoreStatus,
    pub store_phone: Option<String>,
    pub store_address: Option<String>,
}

/// DTO for updating the caller's own profile.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 3, max = 30))]
    pub username: Option<String>,
    pub store_phone: Option<String>,
    pub store_address: Option<String>,
}

/// DTO for changing the caller's password. The current password is verified
/// before the new one is hashed.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordDto {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Admin DTO toggling an account's active flag. Accounts are soft-deleted
/// this way, never removed.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetActiveDto {
    pub is_active: bool,
}

/// Query parameters for the admin user listing.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UserFilterParams {
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_role")]
    pub role: Option<Role>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<User>,
    pub meta: crate::utils::pagination::PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&Role::Bookseller).unwrap(),
            "\"bookseller\""
        );
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn test_role_from_str_round_trip() {
        for role in [Role::User, Role::Bookseller, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_store_status_from_str_round_trip() {
        for status in [
            StoreStatus::Pending,
            StoreStatus::Approved,
            StoreStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<StoreStatus>().unwrap(), status);
        }
        assert!("suspended".parse::<StoreStatus>().is_err());
    }

    #[test]
    fn test_change_password_dto_validation() {
        let dto = ChangePasswordDto {
            current_password: "oldpassword".to_string(),
            new_password: "newpassword123".to_string(),
        };
        assert!(dto.validate().is_ok());

        let dto_short = ChangePasswordDto {
            current_password: "oldpassword".to_string(),
            new_password: "short".to_string(),
        };
        assert!(dto_short.validate().is_err());
    }

    #[test]
    fn test_update_profile_dto_validation() {
        let dto = UpdateProfileDto {
            username: Some("ab".to_string()),
            store_phone: None,
            store_address: None,
        };
        assert!(dto.validate().is_err());

        let dto = UpdateProfileDto {
            username: Some("reader42".to_string()),
            store_phone: None,
            store_address: None,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_user_serialization_has_no_password_field() {
        let user = User {
            id: Uuid::new_v4(),
            username: "reader".to_string(),
            email: "reader@example.com".to_string(),
            role: Role::User,
            is_active: true,
            last_login: None,
            store_name: None,
            store_status: None,
            store_phone: None,
            store_address: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let serialized = serde_json::to_string(&user).unwrap();
        assert!(serialized.contains("reader@example.com"));
        assert!(!serialized.contains("password"));
    }
}
