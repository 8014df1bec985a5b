//! Unit tests for the rate limiter

use std::sync::Arc;

use ag_shared::config::RateLimitConfig;
use chrono::Utc;

use crate::domain::entities::{Account, Capability, Identity, RateCounter, RateOverride};
use crate::domain::value_objects::{InboundRequest, QuotaSnapshot, RateDecision, RequestMeter};
use crate::errors::{AuthError, DomainError};
use crate::repositories::{
    AccountRepository, ExpiringStore, MockAccountRepository, MockExpiringStore,
};
use crate::services::permission::AccountPermissionChecker;
use crate::services::rate_limit::RateLimiter;

const ADMIN: i64 = 1;
const MEMBER: i64 = 2;

struct Fixture {
    store: Arc<MockExpiringStore>,
    accounts: Arc<MockAccountRepository>,
    limiter: RateLimiter<MockAccountRepository, MockExpiringStore>,
}

async fn fixture(config: RateLimitConfig) -> Fixture {
    let store = Arc::new(MockExpiringStore::new());
    let accounts = Arc::new(MockAccountRepository::new());
    accounts
        .insert(Account::new(ADMIN, "admin", "x").with_capability(Capability::ManageAccounts))
        .await;
    accounts.insert(Account::new(MEMBER, "member", "x")).await;
    let permissions = Arc::new(AccountPermissionChecker::new(accounts.clone()));
    let limiter = RateLimiter::new(config, store.clone(), accounts.clone(), permissions);
    Fixture {
        store,
        accounts,
        limiter,
    }
}

fn post(route: &str) -> InboundRequest {
    InboundRequest::new("POST", route).with_remote_addr("192.0.2.10")
}

async fn stored_counter(store: &MockExpiringStore, key: &str) -> RateCounter {
    let raw = store.get(key).await.unwrap().expect("counter stored");
    serde_json::from_str(&raw).unwrap()
}

async fn check_once(f: &Fixture, request: &InboundRequest, identity: Option<&Identity>) -> RateDecision {
    let mut meter = RequestMeter::new();
    f.limiter.check(request, identity, &mut meter).await.unwrap()
}

#[tokio::test]
async fn test_quota_of_three() {
    let f = fixture(RateLimitConfig::default().with_defaults(3, 60)).await;
    let identity = Identity::account(MEMBER);
    let request = post("audits");

    for expected in [2, 1, 0] {
        match check_once(&f, &request, Some(&identity)).await {
            RateDecision::Admitted(QuotaSnapshot { limit, remaining, reset }) => {
                assert_eq!(limit, 3);
                assert_eq!(remaining, expected);
                assert!(reset > 0 && reset <= 60);
            }
            other => panic!("expected admission, got {:?}", other),
        }
    }

    let decision = check_once(&f, &request, Some(&identity)).await;
    assert!(decision.is_rejected());
    assert_eq!(decision.snapshot().map(|s| s.remaining), Some(0));

    // The rejected request did not consume quota
    let counter = stored_counter(&f.store, "rate_counter:2").await;
    assert_eq!(counter.used, 3);
}

#[tokio::test]
async fn test_thousand_and_first_request_rejected() {
    let f = fixture(RateLimitConfig::default()).await;
    let request = post("audits");

    for _ in 0..1000 {
        let decision = check_once(&f, &request, None).await;
        assert!(matches!(decision, RateDecision::Admitted(_)));
    }
    match check_once(&f, &request, None).await {
        RateDecision::Rejected(snapshot) => {
            assert_eq!(snapshot.limit, 1000);
            assert!(snapshot.reset > 86_000);
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_window_rollover_resets_used() {
    let f = fixture(RateLimitConfig::default().with_defaults(3, 60)).await;
    let stale = RateCounter {
        client_key: "rate_counter:2".into(),
        limit: 3,
        interval: 60,
        used: 3,
        window_start: Utc::now().timestamp() - 61,
    };
    f.store
        .set_with_expiry(&stale.client_key, &serde_json::to_string(&stale).unwrap(), 1)
        .await
        .unwrap();

    let decision = check_once(&f, &post("audits"), Some(&Identity::account(MEMBER))).await;
    assert!(matches!(decision, RateDecision::Admitted(s) if s.remaining == 2));

    let counter = stored_counter(&f.store, "rate_counter:2").await;
    assert_eq!(counter.used, 1);
    assert!(counter.window_start > stale.window_start);
}

#[tokio::test]
async fn test_get_and_free_routes_never_metered() {
    let f = fixture(RateLimitConfig::default().with_defaults(1, 60)).await;
    let identity = Identity::account(MEMBER);

    // Exhaust the quota first
    check_once(&f, &post("audits"), Some(&identity)).await;
    assert!(check_once(&f, &post("audits"), Some(&identity)).await.is_rejected());

    for request in [
        InboundRequest::new("GET", "audits"),
        InboundRequest::new("GET", "reports/9"),
        post("auth"),
        post("/auth/"),
    ] {
        assert_eq!(
            check_once(&f, &request, Some(&identity)).await,
            RateDecision::Exempt
        );
    }
    assert_eq!(stored_counter(&f.store, "rate_counter:2").await.used, 1);
}

#[tokio::test]
async fn test_counted_once_per_request() {
    let f = fixture(RateLimitConfig::default().with_defaults(5, 60)).await;
    let identity = Identity::account(MEMBER);
    let request = post("audits");
    let mut meter = RequestMeter::new();

    let first = f.limiter.check(&request, Some(&identity), &mut meter).await.unwrap();
    assert!(matches!(first, RateDecision::Admitted(_)));
    let second = f.limiter.check(&request, Some(&identity), &mut meter).await.unwrap();
    assert_eq!(second, RateDecision::AlreadyMetered);

    assert_eq!(stored_counter(&f.store, "rate_counter:2").await.used, 1);
}

#[tokio::test]
async fn test_counter_ttl_matches_remaining_window() {
    let f = fixture(RateLimitConfig::default().with_defaults(5, 120)).await;
    check_once(&f, &post("audits"), None).await;

    let ttl = f.store.recorded_ttl("rate_counter:anonymous_192.0.2.10").await.unwrap();
    assert!(ttl > 0 && ttl <= 120);
}

#[tokio::test]
async fn test_account_override_applies() {
    let f = fixture(RateLimitConfig::default()).await;
    f.accounts
        .save_rate_override(
            MEMBER,
            RateOverride {
                limit: Some(2),
                interval: None,
            },
        )
        .await
        .unwrap();

    let decision = check_once(&f, &post("audits"), Some(&Identity::account(MEMBER))).await;
    let snapshot = decision.snapshot().unwrap();
    assert_eq!(snapshot.limit, 2);
    assert_eq!(snapshot.remaining, 1);
    assert!(snapshot.reset > 86_000);
}

#[tokio::test]
async fn test_update_override_resets_counter() {
    let f = fixture(RateLimitConfig::default().with_defaults(2, 60)).await;
    let member = Identity::account(MEMBER);
    check_once(&f, &post("audits"), Some(&member)).await;
    check_once(&f, &post("audits"), Some(&member)).await;
    assert!(check_once(&f, &post("audits"), Some(&member)).await.is_rejected());

    let usage = f
        .limiter
        .update_override(
            Some(&Identity::account(ADMIN)),
            MEMBER,
            RateOverride {
                limit: Some(10),
                interval: Some(3_600),
            },
        )
        .await
        .unwrap();
    assert_eq!(usage.settings.limit, 10);
    assert_eq!(usage.counter.as_ref().map(|c| c.used), Some(0));
    assert_eq!(f.store.recorded_ttl("rate_counter:2").await, Some(3_600));

    let decision = check_once(&f, &post("audits"), Some(&member)).await;
    assert!(matches!(decision, RateDecision::Admitted(s) if s.limit == 10 && s.remaining == 9));
}

#[tokio::test]
async fn test_override_admin_checks() {
    let f = fixture(RateLimitConfig::default()).await;
    let change = RateOverride {
        limit: Some(1),
        interval: None,
    };

    let result = f
        .limiter
        .update_override(Some(&Identity::account(MEMBER)), MEMBER, change)
        .await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::Forbidden))));

    let result = f
        .limiter
        .update_override(Some(&Identity::account(ADMIN)), 404, change)
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_usage_visible_to_self_and_managers() {
    let f = fixture(RateLimitConfig::default().with_defaults(4, 60)).await;
    let member = Identity::account(MEMBER);
    check_once(&f, &post("audits"), Some(&member)).await;

    let own = f.limiter.usage(Some(&member), MEMBER).await.unwrap();
    assert_eq!(own.counter.map(|c| c.used), Some(1));
    assert_eq!(own.settings.limit, 4);

    let managed = f.limiter.usage(Some(&Identity::account(ADMIN)), MEMBER).await.unwrap();
    assert!(managed.rate_override.is_none());

    let result = f.limiter.usage(Some(&member), ADMIN).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::Forbidden))));
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let f = fixture(RateLimitConfig::default()).await;
    f.store.fail_all();

    let mut meter = RequestMeter::new();
    let result = f.limiter.check(&post("audits"), None, &mut meter).await;
    assert!(matches!(result, Err(DomainError::Storage { .. })));
}

#[tokio::test]
async fn test_disabled_limiter_exempts_everything() {
    let f = fixture(RateLimitConfig::disabled()).await;
    assert_eq!(check_once(&f, &post("audits"), None).await, RateDecision::Exempt);
}

/// Two requests that load the counter before either stores it are both
/// admitted. The limit is soft under concurrency.
#[tokio::test]
async fn test_interleaved_requests_may_overadmit() {
    let f = fixture(RateLimitConfig::default().with_defaults(1, 60)).await;
    let seed = RateCounter {
        client_key: "rate_counter:2".into(),
        limit: 1,
        interval: 60,
        used: 0,
        window_start: Utc::now().timestamp(),
    };
    let raw = serde_json::to_string(&seed).unwrap();
    let member = Identity::account(MEMBER);

    f.store.set_with_expiry(&seed.client_key, &raw, 60).await.unwrap();
    let first = check_once(&f, &post("audits"), Some(&member)).await;
    // Second request read the same snapshot before the first stored its increment
    f.store.set_with_expiry(&seed.client_key, &raw, 60).await.unwrap();
    let second = check_once(&f, &post("audits"), Some(&member)).await;

    assert!(matches!(first, RateDecision::Admitted(_)));
    assert!(matches!(second, RateDecision::Admitted(_)));
}
