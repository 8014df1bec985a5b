use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::Identity;
use crate::domain::value_objects::{InboundRequest, RateDecision, RequestMeter};
use crate::errors::DomainResult;
use crate::repositories::{AccountRepository, ExpiringStore};
use crate::services::rate_limit::RateLimiter;
use crate::services::token::TokenService;

/// Identity installed for the request and the metering decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateOutcome {
    pub identity: Option<Identity>,
    pub decision: RateDecision,
}

pub struct RequestGate<A, S>
where
    A: AccountRepository,
    S: ExpiringStore,
{
    tokens: Arc<TokenService>,
    limiter: Arc<RateLimiter<A, S>>,
    auth_route: String,
}

impl<A, S> RequestGate<A, S>
where
    A: AccountRepository,
    S: ExpiringStore,
{
    /// `auth_route` is the token issuance route relative to the API namespace
    pub fn new(
        tokens: Arc<TokenService>,
        limiter: Arc<RateLimiter<A, S>>,
        auth_route: impl Into<String>,
    ) -> Self {
        Self {
            tokens,
            limiter,
            auth_route: auth_route.into().trim_matches('/').to_string(),
        }
    }

    pub fn limiter(&self) -> &RateLimiter<A, S> {
        &self.limiter
    }

    fn is_token_issuance(&self, request: &InboundRequest) -> bool {
        request.is_post() && request.route == self.auth_route
    }

    /// Resolves the bearer identity of a request
    ///
    /// POSTs to the issuance route are skipped so clients can obtain a token.
    /// Any other token failure is terminal, except on GET, which proceeds
    /// unauthenticated and leaves permission checks to the resource layer.
    pub async fn authenticate(&self, request: &InboundRequest) -> DomainResult<Option<Identity>> {
        if self.is_token_issuance(request) {
            return Ok(None);
        }

        match self.tokens.validate_header(request.authorization.as_deref()) {
            Ok(claims) => Ok(claims.identity()),
            Err(e) if request.is_get() => {
                debug!(route = %request.route, error = %e, "Unauthenticated GET");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn admit(
        &self,
        request: &InboundRequest,
        identity: Option<&Identity>,
        meter: &mut RequestMeter,
    ) -> DomainResult<RateDecision> {
        self.limiter.check(request, identity, meter).await
    }

    /// Authenticate, then meter
    pub async fn process(
        &self,
        request: &InboundRequest,
        meter: &mut RequestMeter,
    ) -> DomainResult<GateOutcome> {
        let identity = self.authenticate(request).await?;
        let decision = self.admit(request, identity.as_ref(), meter).await?;
        Ok(GateOutcome { identity, decision })
    }
}
