use bookmarket::middleware::role::{
    check_any_role, check_owner, check_role, ensure_store_approved,
};
use bookmarket::modules::users::model::{Role, StoreStatus};
use uuid::Uuid;

mod common;
use common::test_principal;

#[test]
fn test_check_role_exact_match() {
    assert!(check_role(&test_principal(Role::Admin), Role::Admin).is_ok());
    assert!(check_role(&test_principal(Role::Bookseller), Role::Bookseller).is_ok());
    assert!(check_role(&test_principal(Role::User), Role::User).is_ok());
}

#[test]
fn test_check_role_mismatch() {
    assert!(check_role(&test_principal(Role::User), Role::Admin).is_err());
    assert!(check_role(&test_principal(Role::Bookseller), Role::Admin).is_err());
    assert!(check_role(&test_principal(Role::Admin), Role::Bookseller).is_err());
}

#[test]
fn test_check_any_role_membership() {
    let staff = [Role::Admin, Role::Bookseller];

    assert!(check_any_role(&test_principal(Role::Admin), &staff).is_ok());
    assert!(check_any_role(&test_principal(Role::Bookseller), &staff).is_ok());
    assert!(check_any_role(&test_principal(Role::User), &staff).is_err());
}

#[test]
fn test_check_any_role_empty_set_rejects_everyone() {
    for role in [Role::User, Role::Bookseller, Role::Admin] {
        assert!(check_any_role(&test_principal(role), &[]).is_err());
    }
}

#[test]
fn test_check_owner_matrix() {
    // Any non-admin principal fails against a resource it does not own.
    for role in [Role::User, Role::Bookseller] {
        let principal = test_principal(role);
        let someone_elses = Uuid::new_v4();

        assert!(check_owner(&principal, principal.id).is_ok());
        assert!(check_owner(&principal, someone_elses).is_err());
    }
}

#[test]
fn test_check_owner_admin_overrides() {
    let admin = test_principal(Role::Admin);
    assert!(check_owner(&admin, Uuid::new_v4()).is_ok());
    assert!(check_owner(&admin, admin.id).is_ok());
}

#[test]
fn test_owner_check_rejection_is_forbidden() {
    let principal = test_principal(Role::User);
    let err = check_owner(&principal, Uuid::new_v4()).unwrap_err();
    assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
}

#[test]
fn test_ensure_store_approved_only_admits_approved() {
    assert!(ensure_store_approved(Some(StoreStatus::Approved)).is_ok());
    assert!(ensure_store_approved(Some(StoreStatus::Pending)).is_err());
    assert!(ensure_store_approved(Some(StoreStatus::Rejected)).is_err());
    assert!(ensure_store_approved(None).is_err());
}

#[test]
fn test_store_gate_rejections_are_forbidden() {
    for status in [Some(StoreStatus::Pending), Some(StoreStatus::Rejected), None] {
        let err = ensure_store_approved(status).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
    }
}
