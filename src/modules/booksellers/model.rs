//! Approval workflow types.
//!
//! The store lifecycle is a three-state machine over
//! [`StoreStatus`](crate::modules::users::model::StoreStatus): stores start
//! `pending`, admins move them to `approved` or `rejected`, and no state is
//! terminal — a store can be re-approved or re-rejected indefinitely. There
//! is no transition history; each action is a single update.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::modules::users::model::StoreStatus;
use crate::utils::serde::deserialize_optional_store_status;

/// Admin action on a bookseller's store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalAction {
    Approve,
    Reject,
}

impl ApprovalAction {
    /// The status this action writes. Applying the same action twice is a
    /// stable no-op, which is what makes the workflow idempotent.
    pub fn target_status(self) -> StoreStatus {
        match self {
            ApprovalAction::Approve => StoreStatus::Approved,
            ApprovalAction::Reject => StoreStatus::Rejected,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApprovalRequest {
    pub action: ApprovalAction,
}

/// Query parameters for the admin bookseller listing.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BooksellerFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_store_status")]
    pub status: Option<StoreStatus>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct PaginatedBooksellersResponse {
    pub data: Vec<crate::modules::users::model::User>,
    pub meta: crate::utils::pagination::PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_status() {
        assert_eq!(ApprovalAction::Approve.target_status(), StoreStatus::Approved);
        assert_eq!(ApprovalAction::Reject.target_status(), StoreStatus::Rejected);
    }

    #[test]
    fn test_target_status_is_idempotent() {
        // Re-applying an action keeps the state stable.
        let first = ApprovalAction::Approve.target_status();
        let second = ApprovalAction::Approve.target_status();
        assert_eq!(first, second);
    }

    #[test]
    fn test_action_deserializes_lowercase() {
        let action: ApprovalAction = serde_json::from_str("\"approve\"").unwrap();
        assert_eq!(action, ApprovalAction::Approve);

        let action: ApprovalAction = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(action, ApprovalAction::Reject);

        assert!(serde_json::from_str::<ApprovalAction>("\"suspend\"").is_err());
    }
}
