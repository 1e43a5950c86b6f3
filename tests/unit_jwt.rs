use bookmarket::config::jwt::JwtConfig;
use bookmarket::modules::users::model::Role;
use bookmarket::utils::jwt::{create_access_token, verify_token};
use uuid::Uuid;

mod common;
use common::test_jwt_config;

#[test]
fn test_create_access_token_success() {
    let jwt_config = test_jwt_config();
    let user_id = Uuid::new_v4();

    let token = create_access_token(user_id, "reader", Some("reader@example.com"), Role::User, &jwt_config);

    assert!(token.is_ok());
    assert!(!token.unwrap().is_empty());
}

#[test]
fn test_verify_token_round_trip() {
    let jwt_config = test_jwt_config();
    let user_id = Uuid::new_v4();

    let token = create_access_token(
        user_id,
        "reader",
        Some("reader@example.com"),
        Role::User,
        &jwt_config,
    )
    .unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.username, "reader");
    assert_eq!(claims.email.as_deref(), Some("reader@example.com"));
    assert_eq!(claims.role, Role::User);
}

#[test]
fn test_user_token_gets_long_expiry() {
    let jwt_config = test_jwt_config();

    for role in [Role::User, Role::Bookseller] {
        let token =
            create_access_token(Uuid::new_v4(), "seller", Some("s@example.com"), role, &jwt_config)
                .unwrap();
        let claims = verify_token(&token, &jwt_config).unwrap();

        assert_eq!(
            claims.exp - claims.iat,
            jwt_config.user_token_expiry as usize
        );
    }
}

#[test]
fn test_admin_token_gets_short_expiry() {
    let jwt_config = test_jwt_config();

    let token = create_access_token(Uuid::new_v4(), "admin", None, Role::Admin, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(
        claims.exp - claims.iat,
        jwt_config.admin_token_expiry as usize
    );
}

#[test]
fn test_admin_token_omits_email_claim() {
    let jwt_config = test_jwt_config();

    let token = create_access_token(Uuid::new_v4(), "admin", None, Role::Admin, &jwt_config).unwrap();

    // Inspect the raw payload: the claim must be absent, not just null.
    use base64::Engine as _;
    let payload_b64 = token.split('.').nth(1).unwrap();
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload_b64)
        .unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&payload).unwrap();

    assert!(payload.get("email").is_none());
    assert_eq!(payload["role"], "admin");

    let claims = verify_token(&token, &jwt_config).unwrap();
    assert!(claims.email.is_none());
}

#[test]
fn test_verify_token_invalid() {
    let jwt_config = test_jwt_config();

    assert!(verify_token("invalid.token.here", &jwt_config).is_err());
    assert!(verify_token("", &jwt_config).is_err());
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = test_jwt_config();
    let token = create_access_token(
        Uuid::new_v4(),
        "reader",
        Some("reader@example.com"),
        Role::User,
        &jwt_config,
    )
    .unwrap();

    let wrong_config = JwtConfig {
        secret: "a_different_secret_key".to_string(),
        ..test_jwt_config()
    };

    assert!(verify_token(&token, &wrong_config).is_err());
}

#[test]
fn test_verify_token_expired() {
    // A negative expiry puts `exp` in the past at issuance.
    let expired_config = JwtConfig {
        user_token_expiry: -7200,
        ..test_jwt_config()
    };

    let token = create_access_token(
        Uuid::new_v4(),
        "reader",
        Some("reader@example.com"),
        Role::User,
        &expired_config,
    )
    .unwrap();

    assert!(verify_token(&token, &expired_config).is_err());
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = test_jwt_config();
    let malformed_tokens = vec![
        "not.enough",
        "too.many.parts.here.extra",
        "!!!.invalid.chars",
        "header.payload.",
        ".payload.signature",
    ];

    for token in malformed_tokens {
        assert!(verify_token(token, &jwt_config).is_err());
    }
}

#[test]
fn test_token_role_claim_values() {
    let jwt_config = test_jwt_config();

    for (role, expected) in [
        (Role::User, Role::User),
        (Role::Bookseller, Role::Bookseller),
        (Role::Admin, Role::Admin),
    ] {
        let token =
            create_access_token(Uuid::new_v4(), "someone", None, role, &jwt_config).unwrap();
        let claims = verify_token(&token, &jwt_config).unwrap();
        assert_eq!(claims.role, expected);
    }
}
