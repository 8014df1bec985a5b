//! Unit tests for keypair service

use std::sync::Arc;

use crate::domain::entities::{Account, Capability, Identity, Keypair};
use crate::domain::value_objects::CredentialRequest;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{AccountRepository, MockAccountRepository};
use crate::services::credentials::Authenticator;
use crate::services::keypair::{KeypairAuthenticator, KeypairService};
use crate::services::permission::AccountPermissionChecker;

const ADMIN: i64 = 1;
const MEMBER: i64 = 2;

async fn setup() -> (Arc<MockAccountRepository>, KeypairService<MockAccountRepository>) {
    let accounts = Arc::new(MockAccountRepository::new());
    accounts
        .insert(Account::new(ADMIN, "admin", "x").with_capability(Capability::ManageAccounts))
        .await;
    let mut member = Account::new(MEMBER, "member", "$2b$04$secret-hash");
    member.activation_key = Some("pending".into());
    accounts.insert(member).await;

    let permissions = Arc::new(AccountPermissionChecker::new(accounts.clone()));
    let service = KeypairService::new(accounts.clone(), permissions);
    (accounts, service)
}

fn is_forbidden<T: std::fmt::Debug>(result: Result<T, DomainError>) -> bool {
    matches!(result, Err(DomainError::Auth(AuthError::Forbidden)))
}

#[tokio::test]
async fn test_matching_pair_resolves_owner() {
    let (accounts, service) = setup().await;
    let pair = Keypair::generate(MEMBER);
    accounts.save_keypair(&pair).await.unwrap();

    let account = service
        .authenticate(&pair.key, &pair.secret)
        .await
        .unwrap()
        .expect("pair should match");
    assert_eq!(account.id, MEMBER);
    assert_eq!(account.login, "member");
}

#[tokio::test]
async fn test_mismatch_in_either_field_resolves_nothing() {
    let (accounts, service) = setup().await;
    let pair = Keypair::generate(MEMBER);
    accounts.save_keypair(&pair).await.unwrap();

    let wrong_secret = format!("{}x", pair.secret);
    assert!(service.authenticate(&pair.key, &wrong_secret).await.unwrap().is_none());
    assert!(service.authenticate("2unknown", &pair.secret).await.unwrap().is_none());
    assert!(service.authenticate(&pair.key, "").await.unwrap().is_none());
    assert!(service.authenticate("", "").await.unwrap().is_none());
}

#[tokio::test]
async fn test_generate_overwrites_prior_pair() {
    let (_, service) = setup().await;
    let caller = Identity::account(ADMIN);

    let first = service.generate(Some(&caller), MEMBER).await.unwrap();
    let second = service.generate(Some(&caller), MEMBER).await.unwrap();
    assert_ne!(first.key, second.key);

    assert!(service.authenticate(&first.key, &first.secret).await.unwrap().is_none());
    assert!(service.authenticate(&second.key, &second.secret).await.unwrap().is_some());

    let fetched = service.fetch(Some(&caller), MEMBER).await.unwrap();
    assert_eq!(fetched, Some(second));
}

#[tokio::test]
async fn test_non_privileged_caller_forbidden() {
    let (_, service) = setup().await;
    let member = Identity::account(MEMBER);

    assert!(is_forbidden(service.generate(Some(&member), MEMBER).await));
    assert!(is_forbidden(service.fetch(Some(&member), MEMBER).await));
    assert!(is_forbidden(service.generate(None, MEMBER).await));
    assert!(is_forbidden(service.generate(Some(&Identity::service(ADMIN)), MEMBER).await));
}

#[tokio::test]
async fn test_missing_target_forbidden() {
    let (_, service) = setup().await;
    let caller = Identity::account(ADMIN);

    assert!(is_forbidden(service.generate(Some(&caller), 404).await));
    assert!(is_forbidden(service.fetch(Some(&caller), 404).await));
}

#[tokio::test]
async fn test_fetch_before_generation_is_empty() {
    let (_, service) = setup().await;
    let fetched = service.fetch(Some(&Identity::account(ADMIN)), MEMBER).await.unwrap();
    assert!(fetched.is_none());
}

#[tokio::test]
async fn test_ensure_generates_once() {
    let (_, service) = setup().await;

    let first = service.ensure(MEMBER).await.unwrap();
    let again = service.ensure(MEMBER).await.unwrap();
    assert_eq!(first, again);

    assert!(matches!(
        service.ensure(404).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_authenticator_reads_body_fields() {
    let (accounts, service) = setup().await;
    let pair = Keypair::generate(MEMBER);
    accounts.save_keypair(&pair).await.unwrap();
    let authenticator = KeypairAuthenticator::new(Arc::new(service));

    let resolved = authenticator
        .authenticate(None, &CredentialRequest::keypair(&pair.key, &pair.secret))
        .await
        .unwrap();
    assert_eq!(resolved, Some(Identity::account(MEMBER)));

    let declined = authenticator
        .authenticate(None, &CredentialRequest::password("member", "pw"))
        .await
        .unwrap();
    assert_eq!(declined, None);

    let kept = authenticator
        .authenticate(Some(Identity::account(ADMIN)), &CredentialRequest::default())
        .await
        .unwrap();
    assert_eq!(kept, Some(Identity::account(ADMIN)));
}
