use bookmarket::modules::auth::model::RegisterRequestDto;
use bookmarket::modules::auth::service::AuthService;
use bookmarket::modules::booksellers::model::{ApprovalAction, ApprovalRequest};
use bookmarket::modules::users::model::{Role, StoreStatus};

fn bookseller_dto(store_name: Option<&str>) -> RegisterRequestDto {
    RegisterRequestDto {
        username: "acme".to_string(),
        email: "acme@example.com".to_string(),
        password: "password123".to_string(),
        role: Some(Role::Bookseller),
        store_name: store_name.map(str::to_string),
        store_phone: None,
        store_address: None,
    }
}

#[test]
fn test_approve_targets_approved() {
    assert_eq!(
        ApprovalAction::Approve.target_status(),
        StoreStatus::Approved
    );
}

#[test]
fn test_reject_targets_rejected() {
    assert_eq!(ApprovalAction::Reject.target_status(), StoreStatus::Rejected);
}

#[test]
fn test_transitions_are_idempotent() {
    // Applying the same action repeatedly converges on one stable state.
    let mut status = StoreStatus::Pending;
    for _ in 0..3 {
        status = ApprovalAction::Approve.target_status();
        assert_eq!(status, StoreStatus::Approved);
    }
}

#[test]
fn test_no_state_is_terminal() {
    // approved -> rejected and rejected -> approved are both writable.
    assert_eq!(ApprovalAction::Reject.target_status(), StoreStatus::Rejected);
    assert_eq!(
        ApprovalAction::Approve.target_status(),
        StoreStatus::Approved
    );
}

#[test]
fn test_approval_request_deserializes() {
    let request: ApprovalRequest = serde_json::from_str(r#"{"action":"approve"}"#).unwrap();
    assert_eq!(request.action, ApprovalAction::Approve);

    let request: ApprovalRequest = serde_json::from_str(r#"{"action":"reject"}"#).unwrap();
    assert_eq!(request.action, ApprovalAction::Reject);

    assert!(serde_json::from_str::<ApprovalRequest>(r#"{"action":"ban"}"#).is_err());
}

#[test]
fn test_bookseller_registration_needs_store_name() {
    assert!(AuthService::registration_role(&bookseller_dto(None)).is_err());
    assert!(AuthService::registration_role(&bookseller_dto(Some(""))).is_err());
    assert!(AuthService::registration_role(&bookseller_dto(Some("  "))).is_err());

    let role = AuthService::registration_role(&bookseller_dto(Some("Acme Books"))).unwrap();
    assert_eq!(role, Role::Bookseller);
}

#[test]
fn test_missing_store_name_is_a_validation_error() {
    let err = AuthService::registration_role(&bookseller_dto(None)).unwrap_err();
    assert_eq!(err.status, axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn test_plain_user_registration_needs_no_store_name() {
    let dto = RegisterRequestDto {
        username: "reader".to_string(),
        email: "reader@example.com".to_string(),
        password: "password123".to_string(),
        role: None,
        store_name: None,
        store_phone: None,
        store_address: None,
    };

    assert_eq!(AuthService::registration_role(&dto).unwrap(), Role::User);
}

#[test]
fn test_admin_registration_is_rejected() {
    let dto = RegisterRequestDto {
        username: "sneaky".to_string(),
        email: "sneaky@example.com".to_string(),
        password: "password123".to_string(),
        role: Some(Role::Admin),
        store_name: None,
        store_phone: None,
        store_address: None,
    };

    let err = AuthService::registration_role(&dto).unwrap_err();
    assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
}
