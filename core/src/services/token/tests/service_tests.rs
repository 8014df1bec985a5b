//! Unit tests for token service

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Map, Value};

use crate::domain::entities::{Claims, Identity};
use crate::errors::{DomainError, TokenError};
use crate::services::token::{ClaimsProvider, ExpiryWaiver, TokenService, TokenServiceConfig};

const SECRET: &str = "test-signing-secret";
const ISSUER: &str = "https://audits.example.com/api/audit/v1";

fn service() -> TokenService {
    TokenService::new(TokenServiceConfig::new(SECRET, ISSUER))
}

fn token_error(result: Result<Claims, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(e)) => e,
        other => panic!("expected token error, got {:?}", other),
    }
}

struct AlwaysWaive;

impl ExpiryWaiver for AlwaysWaive {
    fn waive(&self, _claims: &Claims) -> bool {
        true
    }
}

struct ScopeClaims;

impl ClaimsProvider for ScopeClaims {
    fn claims_for(&self, identity: &Identity) -> Map<String, Value> {
        let mut claims = Map::new();
        claims.insert("scope".into(), json!(format!("audits:{}", identity.id)));
        claims.insert("iss".into(), json!("https://attacker.example"));
        claims
    }
}

#[test]
fn test_issue_validate_round_trip() {
    let service = service();
    let identity = Identity::account(17);

    let token = service.issue_access(&identity).unwrap();
    assert_eq!(token.split('.').count(), 3);

    let claims = service.validate(&token).unwrap();
    assert_eq!(claims.identity(), Some(identity));
    assert_eq!(claims.iss, ISSUER);
    assert!(!claims.is_refresh());
    assert_eq!(claims.exp - claims.iat, 2_592_000);
}

#[test]
fn test_refresh_token_marked() {
    let service = service();
    let token = service.issue_refresh(&Identity::service(4)).unwrap();

    let claims = service.validate(&token).unwrap();
    assert!(claims.is_refresh());
    assert_eq!(claims.exp - claims.iat, 31_536_000);
    assert_eq!(claims.identity(), Some(Identity::service(4)));
}

#[test]
fn test_different_secret_fails_as_invalid_token() {
    let token = service().issue_access(&Identity::account(1)).unwrap();
    let other = TokenService::new(TokenServiceConfig::new("another-secret", ISSUER));

    assert_eq!(token_error(other.validate(&token)), TokenError::InvalidToken);
}

#[test]
fn test_garbage_is_invalid_token() {
    assert_eq!(token_error(service().validate("not.a.jwt")), TokenError::InvalidToken);
    assert_eq!(token_error(service().validate("")), TokenError::InvalidToken);
}

#[test]
fn test_missing_secret_is_hard_failure() {
    let service = TokenService::new(TokenServiceConfig {
        secret: None,
        ..TokenServiceConfig::new("", ISSUER)
    });
    assert!(!service.has_secret());

    let issued = service.issue(&Identity::account(1), Map::new(), 60);
    assert!(matches!(issued, Err(DomainError::Token(TokenError::SecretMissing))));
    assert_eq!(
        token_error(service.validate_header(Some("Bearer abc"))),
        TokenError::SecretMissing
    );
}

#[test]
fn test_issuer_mismatch() {
    let foreign = TokenService::new(TokenServiceConfig::new(SECRET, "https://elsewhere.example"));
    let token = foreign.issue_access(&Identity::account(1)).unwrap();

    assert_eq!(token_error(service().validate(&token)), TokenError::InvalidIssuer);
}

#[test]
fn test_missing_client_rejected() {
    let now = Utc::now().timestamp();
    let token = encode(
        &Header::default(),
        &json!({"iat": now, "iss": ISSUER, "exp": now + 60}),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert_eq!(token_error(service().validate(&token)), TokenError::InvalidClient);
}

#[test]
fn test_expired_token_rejected() {
    let service = service();
    let token = service
        .issue(&Identity::account(1), Map::new(), -10)
        .unwrap();

    assert_eq!(token_error(service.validate(&token)), TokenError::TokenExpired);
}

#[test]
fn test_waiver_accepts_expired_token() {
    let service = service().with_expiry_waiver(Arc::new(AlwaysWaive));
    let token = service
        .issue(&Identity::account(1), Map::new(), -10)
        .unwrap();

    let claims = service.validate(&token).unwrap();
    assert_eq!(claims.identity(), Some(Identity::account(1)));
}

#[test]
fn test_waiver_never_skips_issuer_or_client_checks() {
    let service = service().with_expiry_waiver(Arc::new(AlwaysWaive));

    let foreign = TokenService::new(TokenServiceConfig::new(SECRET, "https://elsewhere.example"));
    let token = foreign
        .issue(&Identity::account(1), Map::new(), -10)
        .unwrap();
    assert_eq!(token_error(service.validate(&token)), TokenError::InvalidIssuer);

    let now = Utc::now().timestamp();
    let clientless = encode(
        &Header::default(),
        &json!({"iat": now - 20, "iss": ISSUER, "exp": now - 10}),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();
    assert_eq!(token_error(service.validate(&clientless)), TokenError::InvalidClient);
}

#[test]
fn test_private_claims_cannot_overwrite_reserved() {
    let service = service().with_claims_provider(Arc::new(ScopeClaims));
    let token = service.issue_access(&Identity::account(8)).unwrap();

    let claims = service.validate(&token).unwrap();
    assert_eq!(claims.iss, ISSUER);
    assert_eq!(claims.private.get("scope"), Some(&json!("audits:8")));
}

#[test]
fn test_extra_claims_survive_round_trip() {
    let service = service();
    let mut extra = Map::new();
    extra.insert("worker_pool".into(), json!("php"));
    extra.insert("client".into(), json!({"id": 999}));

    let token = service.issue(&Identity::service(2), extra, 60).unwrap();
    let claims = service.validate(&token).unwrap();
    assert_eq!(claims.private.get("worker_pool"), Some(&json!("php")));
    assert_eq!(claims.identity(), Some(Identity::service(2)));
}

#[test]
fn test_extract_bearer() {
    assert_eq!(TokenService::extract_bearer(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    assert_eq!(TokenService::extract_bearer(Some("Bearer abc trailing")).unwrap(), "abc");

    assert!(matches!(
        TokenService::extract_bearer(None),
        Err(DomainError::Token(TokenError::NoAuthHeader))
    ));
    for malformed in ["Basic dXNlcjpwYXNz", "Bearer ", "Bearer", "bearer abc", ""] {
        assert!(
            matches!(
                TokenService::extract_bearer(Some(malformed)),
                Err(DomainError::Token(TokenError::MalformedToken))
            ),
            "{malformed:?}"
        );
    }
}

#[test]
fn test_validate_header() {
    let service = service();
    let token = service.issue_access(&Identity::account(3)).unwrap();

    let claims = service
        .validate_header(Some(&format!("Bearer {}", token)))
        .unwrap();
    assert_eq!(claims.identity(), Some(Identity::account(3)));
    assert_eq!(token_error(service.validate_header(None)), TokenError::NoAuthHeader);
}
