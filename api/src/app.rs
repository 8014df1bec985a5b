//! Application state and factory
//!
//! This module wires the core services from configuration and provides the
//! factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use ag_core::{
    AccountPermissionChecker, AccountRepository, AuthService, ClaimsProvider, ClientKeyOverride,
    CredentialChain, DomainError, ExpiringStore, ExpiryWaiver, KeypairAuthenticator,
    KeypairService, PasswordAuthenticator, PermissionChecker, RateLimiter,
    RefreshTokenAuthenticator, RefreshTokenService, RequestGate, TokenService,
    TokenServiceConfig,
};
use ag_shared::{AppConfig, HealthResponse};

use crate::handlers::{handle_domain_error, json_error_handler, path_error_handler};
use crate::middleware::RequestGateLayer;
use crate::routes;

/// Optional hooks registered once at startup
#[derive(Clone, Default)]
pub struct AuthHooks {
    pub claims_provider: Option<Arc<dyn ClaimsProvider>>,
    pub expiry_waiver: Option<Arc<dyn ExpiryWaiver>>,
    pub key_override: Option<Arc<dyn ClientKeyOverride>>,
}

/// Services shared by every worker
pub struct AppState<A, S>
where
    A: AccountRepository,
    S: ExpiringStore,
{
    pub auth: Arc<AuthService<A, S>>,
    pub tokens: Arc<TokenService>,
    pub keypairs: Arc<KeypairService<A>>,
    pub limiter: Arc<RateLimiter<A, S>>,
    pub gate: Arc<RequestGate<A, S>>,
    pub accounts: Arc<A>,
    namespace: String,
    auth_route: String,
}

impl<A, S> AppState<A, S>
where
    A: AccountRepository + 'static,
    S: ExpiringStore + 'static,
{
    pub fn new(config: &AppConfig, accounts: Arc<A>, store: Arc<S>) -> Self {
        Self::with_hooks(config, accounts, store, AuthHooks::default())
    }

    /// Build every service from configuration
    ///
    /// The credential chain tries the keypair scheme, then the refresh token
    /// scheme, then falls back to username and password.
    pub fn with_hooks(
        config: &AppConfig,
        accounts: Arc<A>,
        store: Arc<S>,
        hooks: AuthHooks,
    ) -> Self {
        let mut tokens = TokenService::new(TokenServiceConfig::from_jwt_config(
            &config.auth.jwt,
            &config.api_base_url(),
        ));
        if let Some(provider) = hooks.claims_provider {
            tokens = tokens.with_claims_provider(provider);
        }
        if let Some(waiver) = hooks.expiry_waiver {
            tokens = tokens.with_expiry_waiver(waiver);
        }
        let tokens = Arc::new(tokens);

        let permissions: Arc<dyn PermissionChecker> =
            Arc::new(AccountPermissionChecker::new(accounts.clone()));
        let keypairs = Arc::new(KeypairService::new(accounts.clone(), permissions.clone()));
        let refresh = Arc::new(RefreshTokenService::new(store.clone(), tokens.clone()));

        let chain = CredentialChain::new()
            .register(Arc::new(KeypairAuthenticator::new(keypairs.clone())))
            .register(Arc::new(RefreshTokenAuthenticator::new(refresh.clone())))
            .with_fallback(Arc::new(PasswordAuthenticator::new(accounts.clone())));
        let auth = Arc::new(AuthService::new(
            chain,
            tokens.clone(),
            refresh,
            accounts.clone(),
        ));

        // Token issuance is never metered, whatever the route is called
        let auth_route = config.auth.auth_route.trim_matches('/').to_string();
        let mut rate_limit = config.rate_limit.clone();
        if !rate_limit
            .free_routes
            .iter()
            .any(|route| route.trim_matches('/') == auth_route)
        {
            rate_limit = rate_limit.with_free_route(auth_route.clone());
        }

        let mut limiter = RateLimiter::new(
            rate_limit,
            store,
            accounts.clone(),
            permissions,
        );
        if let Some(key_override) = hooks.key_override {
            limiter = limiter.with_key_override(key_override);
        }
        let limiter = Arc::new(limiter);

        let gate = Arc::new(RequestGate::new(
            tokens.clone(),
            limiter.clone(),
            auth_route.clone(),
        ));

        Self {
            auth,
            tokens,
            keypairs,
            limiter,
            gate,
            accounts,
            namespace: config.server.namespace().to_string(),
            auth_route,
        }
    }

    /// API namespace without surrounding slashes
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

/// Create and configure the application
pub fn create_app<A, S>(
    state: web::Data<AppState<A, S>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    A: AccountRepository + 'static,
    S: ExpiringStore + 'static,
{
    let gate = RequestGateLayer::new(state.gate.clone(), state.namespace());
    let scope_path = format!("/{}", state.namespace());
    let auth_route = state.auth_route.clone();

    App::new()
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(TracingLogger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        .service(
            web::scope(&scope_path)
                .wrap(gate)
                .configure(|cfg| routes::configure::<A, S>(cfg, &auth_route))
                .default_service(web::route().to(not_found)),
        )
        .default_service(web::route().to(not_found))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

async fn not_found() -> HttpResponse {
    handle_domain_error(&DomainError::NotFound {
        resource: String::from("route"),
    })
}
