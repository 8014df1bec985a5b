//! Per-request view used by the request gate and rate limiter.

/// The parts of an inbound HTTP request admission control depends on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundRequest {
    /// Upper-case HTTP method
    pub method: String,

    /// Path relative to the API namespace, without leading or trailing slashes
    pub route: String,

    pub authorization: Option<String>,

    /// `Client-IP` header
    pub client_ip: Option<String>,

    /// `X-Forwarded-For` header, possibly a comma-separated chain
    pub forwarded_for: Option<String>,

    /// Socket peer address
    pub remote_addr: Option<String>,
}

impl InboundRequest {
    pub fn new(method: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            method: method.into().to_ascii_uppercase(),
            route: route.into().trim_matches('/').to_string(),
            ..Default::default()
        }
    }

    pub fn with_authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    pub fn with_remote_addr(mut self, value: impl Into<String>) -> Self {
        self.remote_addr = Some(value.into());
        self
    }

    pub fn with_forwarded_for(mut self, value: impl Into<String>) -> Self {
        self.forwarded_for = Some(value.into());
        self
    }

    pub fn with_client_ip(mut self, value: impl Into<String>) -> Self {
        self.client_ip = Some(value.into());
        self
    }

    pub fn is_get(&self) -> bool {
        self.method == "GET"
    }

    pub fn is_post(&self) -> bool {
        self.method == "POST"
    }

    /// Network origin of an anonymous client: the first non-empty of the
    /// client IP header, the first forwarded-for hop, the socket address
    pub fn origin(&self) -> Option<&str> {
        fn non_empty(v: &Option<String>) -> Option<&str> {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
        }

        non_empty(&self.client_ip)
            .or_else(|| {
                non_empty(&self.forwarded_for)
                    .and_then(|chain| chain.split(',').next())
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
            })
            .or_else(|| non_empty(&self.remote_addr))
    }
}

/// Single-increment guard carried for the lifetime of one inbound request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestMeter {
    deducted: bool,
}

impl RequestMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_deducted(&self) -> bool {
        self.deducted
    }

    pub(crate) fn mark_deducted(&mut self) {
        self.deducted = true;
    }
}
