//! Shared fixtures for the API integration tests
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{body::MessageBody, dev::ServiceResponse, web};
use serde_json::Value;

use ag_api::AppState;
use ag_core::{Account, Capability, Identity};
use ag_infra::{MemoryAccountRepository, MemoryExpiringStore};
use ag_shared::{AppConfig, JwtConfig, RateLimitConfig};

pub const SECRET: &str = "api-test-secret";
pub const NS: &str = "/audit/v1";

pub const ADMIN_ID: i64 = 1;
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const MEMBER_ID: i64 = 2;
pub const MEMBER_PASSWORD: &str = "member-password";

pub type TestState = AppState<MemoryAccountRepository, MemoryExpiringStore>;

pub fn test_config(rate_limit: RateLimitConfig) -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt = JwtConfig::new(SECRET);
    config.rate_limit = rate_limit;
    config
}

pub async fn state_with(config: AppConfig) -> web::Data<TestState> {
    let accounts = MemoryAccountRepository::seeded([
        Account::new(ADMIN_ID, "admin", hash(ADMIN_PASSWORD))
            .with_capability(Capability::ManageAccounts),
        Account::new(MEMBER_ID, "member", hash(MEMBER_PASSWORD)),
    ])
    .await;

    web::Data::new(AppState::new(
        &config,
        Arc::new(accounts),
        Arc::new(MemoryExpiringStore::new()),
    ))
}

pub async fn state() -> web::Data<TestState> {
    state_with(test_config(RateLimitConfig::default())).await
}

/// `Authorization` header value carrying an access token for an account
pub fn bearer(state: &TestState, account_id: i64) -> String {
    let token = state
        .tokens
        .issue_access(&Identity::account(account_id))
        .unwrap();
    format!("Bearer {}", token)
}

pub fn url(route: &str) -> String {
    format!("{}/{}", NS, route.trim_start_matches('/'))
}

pub fn header<B>(resp: &ServiceResponse<B>, name: &str) -> Option<String> {
    resp.headers()
        .get(name)
        .map(|v| v.to_str().unwrap().to_string())
}

pub async fn json_body<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    actix_web::test::read_body_json(resp).await
}

fn hash(password: &str) -> String {
    bcrypt::hash(password, 4).unwrap()
}
