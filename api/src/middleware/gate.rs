//! Request gate middleware for the API namespace.
//!
//! Runs once per request ahead of every namespaced route: resolves the bearer
//! identity, meters the request, and annotates the response with the quota
//! headers. Credential failures answer 403 and quota exhaustion answers 429
//! before the route runs.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, RETRY_AFTER},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;

use ag_core::{
    AccountRepository, DomainError, ExpiringStore, InboundRequest, QuotaSnapshot, RateDecision,
    RateLimitError, RequestGate, RequestMeter,
};

use crate::handlers::handle_domain_error;
use crate::middleware::auth::AuthContext;

pub const RATE_LIMIT: HeaderName = HeaderName::from_static("x-rate-limit");
pub const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-rate-limit-remaining");
pub const RATE_LIMIT_RESET: HeaderName = HeaderName::from_static("x-rate-limit-reset");

const CLIENT_IP: &str = "client-ip";
const FORWARDED_FOR: &str = "x-forwarded-for";

/// Request gate middleware factory
pub struct RequestGateLayer<A, S>
where
    A: AccountRepository,
    S: ExpiringStore,
{
    gate: Arc<RequestGate<A, S>>,
    prefix: String,
}

impl<A, S> RequestGateLayer<A, S>
where
    A: AccountRepository,
    S: ExpiringStore,
{
    /// `namespace` is the path prefix of the wrapped scope, e.g. `audit/v1`
    pub fn new(gate: Arc<RequestGate<A, S>>, namespace: &str) -> Self {
        Self {
            gate,
            prefix: format!("/{}", namespace.trim_matches('/')),
        }
    }
}

impl<Svc, B, A, S> Transform<Svc, ServiceRequest> for RequestGateLayer<A, S>
where
    Svc: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    Svc::Future: 'static,
    B: 'static,
    A: AccountRepository + 'static,
    S: ExpiringStore + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestGateMiddleware<Svc, A, S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: Svc) -> Self::Future {
        ready(Ok(RequestGateMiddleware {
            service: Rc::new(service),
            gate: Arc::clone(&self.gate),
            prefix: self.prefix.clone(),
        }))
    }
}

/// Request gate middleware service
pub struct RequestGateMiddleware<Svc, A, S>
where
    A: AccountRepository,
    S: ExpiringStore,
{
    service: Rc<Svc>,
    gate: Arc<RequestGate<A, S>>,
    prefix: String,
}

impl<Svc, B, A, S> Service<ServiceRequest> for RequestGateMiddleware<Svc, A, S>
where
    Svc: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    Svc::Future: 'static,
    B: 'static,
    A: AccountRepository + 'static,
    S: ExpiringStore + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let gate = Arc::clone(&self.gate);
        let inbound = inbound_request(&req, &self.prefix);

        // An enclosing gate may already have metered this request
        let mut meter = req
            .extensions()
            .get::<RequestMeter>()
            .copied()
            .unwrap_or_default();

        Box::pin(async move {

            let outcome = match gate.process(&inbound, &mut meter).await {
                Ok(outcome) => outcome,
                Err(error) => {
                    let response = handle_domain_error(&error);
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            if let RateDecision::Rejected(snapshot) = outcome.decision {
                tracing::info!(
                    route = %inbound.route,
                    limit = snapshot.limit,
                    reset = snapshot.reset,
                    "Request rejected by rate limit"
                );
                let error = DomainError::from(RateLimitError::Exceeded {
                    limit: snapshot.limit,
                    reset_seconds: snapshot.reset,
                });
                let mut response = handle_domain_error(&error);
                apply_quota_headers(response.headers_mut(), snapshot);
                response
                    .headers_mut()
                    .insert(RETRY_AFTER, HeaderValue::from(snapshot.reset));
                return Ok(req.into_response(response).map_into_right_body());
            }

            if let Some(identity) = outcome.identity {
                req.extensions_mut().insert(AuthContext::new(identity));
            }
            req.extensions_mut().insert(meter);

            let mut response = service.call(req).await?;
            if let Some(snapshot) = outcome.decision.snapshot() {
                apply_quota_headers(response.headers_mut(), snapshot);
            }

            Ok(response.map_into_left_body())
        })
    }
}

/// Admission-relevant view of the request; the route is relative to `prefix`
fn inbound_request(req: &ServiceRequest, prefix: &str) -> InboundRequest {
    let path = req.path();
    let route = path.strip_prefix(prefix).unwrap_or(path);
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    InboundRequest {
        authorization: header(AUTHORIZATION.as_str()),
        client_ip: header(CLIENT_IP),
        forwarded_for: header(FORWARDED_FOR),
        remote_addr: req.peer_addr().map(|addr| addr.ip().to_string()),
        ..InboundRequest::new(req.method().as_str(), route)
    }
}

fn apply_quota_headers(headers: &mut HeaderMap, snapshot: QuotaSnapshot) {
    headers.insert(RATE_LIMIT, HeaderValue::from(snapshot.limit));
    headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from(snapshot.remaining));
    headers.insert(RATE_LIMIT_RESET, HeaderValue::from(snapshot.reset));
}
