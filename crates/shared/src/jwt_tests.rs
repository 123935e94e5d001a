//! Unit tests for JWT functionality.

use chrono::{Duration, Utc};

use crate::auth::{Claims, TokenType};
use crate::jwt::{JwtConfig, JwtError, JwtService, TokenSubject};

fn create_test_service() -> JwtService {
    JwtService::new(JwtConfig {
        secret: "test-secret-key-for-testing".to_string(),
        access_token_expires_minutes: 15,
        refresh_token_expires_days: 7,
    })
}

fn admin_roles() -> Vec<String> {
    vec!["admin".to_string(), "user".to_string()]
}

#[test]
fn test_claims_new_sets_admin_flag_from_roles() {
    let roles = admin_roles();
    let claims = Claims::new(
        "u-1",
        "a@example.com",
        "user",
        &roles,
        TokenType::Access,
        Utc::now() + Duration::hours(1),
    );

    assert!(claims.is_admin);
    assert!(claims.has_role("admin"));
    assert!(claims.grants_admin());
    assert_eq!(claims.user_id(), "u-1");
}

#[test]
fn test_claims_without_admin_role() {
    let roles = vec!["user".to_string()];
    let claims = Claims::new(
        "u-2",
        "b@example.com",
        "user",
        &roles,
        TokenType::Access,
        Utc::now() + Duration::hours(1),
    );

    assert!(!claims.is_admin);
    assert!(!claims.grants_admin());
}

#[test]
fn test_claims_missing_optional_fields_deserialize() {
    let json = r#"{"sub":"u-3","email":"c@example.com","role":"admin","iat":0,"exp":1}"#;
    let claims: Claims = serde_json::from_str(json).unwrap();

    assert_eq!(claims.typ, TokenType::Access);
    assert!(claims.roles.is_empty());
    assert!(!claims.is_admin);
    assert!(claims.grants_admin());
}

#[test]
fn test_generate_and_validate_access_token() {
    let service = create_test_service();
    let roles = admin_roles();
    let subject = TokenSubject {
        user_id: "u-1",
        email: "a@example.com",
        role: "admin",
        roles: &roles,
    };

    let token = service.generate_access_token(&subject).unwrap();
    let claims = service.validate_as(&token, TokenType::Access).unwrap();

    assert_eq!(claims.sub, "u-1");
    assert_eq!(claims.email, "a@example.com");
    assert_eq!(claims.role, "admin");
    assert_eq!(claims.roles, roles);
    assert!(claims.is_admin);
}

#[test]
fn test_refresh_token_rejected_as_access() {
    let service = create_test_service();
    let roles = vec!["user".to_string()];
    let subject = TokenSubject {
        user_id: "u-1",
        email: "a@example.com",
        role: "user",
        roles: &roles,
    };

    let pair = service.generate_pair(&subject).unwrap();
    assert_eq!(pair.token_type, "bearer");
    assert_eq!(pair.expires_in, 15 * 60);

    assert!(matches!(
        service.validate_as(&pair.refresh_token, TokenType::Access),
        Err(JwtError::Invalid)
    ));
    assert!(
        service
            .validate_as(&pair.refresh_token, TokenType::Refresh)
            .is_ok()
    );
}

#[test]
fn test_expired_token() {
    let service = JwtService::new(JwtConfig {
        secret: "test-secret-key-for-testing".to_string(),
        access_token_expires_minutes: -10,
        refresh_token_expires_days: 7,
    });
    let roles = Vec::new();
    let subject = TokenSubject {
        user_id: "u-1",
        email: "a@example.com",
        role: "user",
        roles: &roles,
    };

    let token = service.generate_access_token(&subject).unwrap();
    assert!(matches!(
        service.validate_token(&token),
        Err(JwtError::Expired)
    ));
}

#[test]
fn test_invalid_token() {
    let service = create_test_service();
    assert!(service.validate_token("invalid.token.here").is_err());
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let other = JwtService::new(JwtConfig {
        secret: "another-secret".to_string(),
        ..JwtConfig::default()
    });
    let roles = Vec::new();
    let subject = TokenSubject {
        user_id: "u-1",
        email: "a@example.com",
        role: "user",
        roles: &roles,
    };
    let token = other.generate_access_token(&subject).unwrap();

    assert!(matches!(
        create_test_service().validate_token(&token),
        Err(JwtError::DecodingError(_))
    ));
}

#[test]
fn config_from_settings_converts_units() {
    let settings = crate::config::JwtSettings {
        secret: "s".into(),
        access_token_expiry_secs: 3600,
        refresh_token_expiry_secs: 604_800,
    };
    let config = JwtConfig::from(&settings);
    assert_eq!(config.access_token_expires_minutes, 60);
    assert_eq!(config.refresh_token_expires_days, 7);
}
