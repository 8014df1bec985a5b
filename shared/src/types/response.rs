//! API response types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error body returned by every failing request
///
/// `status` repeats the HTTP status so clients that only see the body can
/// still tell a credential failure (403) from a quota rejection (429).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable snake_case code
    pub code: String,

    /// Human-readable message
    pub message: String,

    pub status: u16,

    /// Extra structured data, e.g. the quota snapshot on a 429
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            status,
            data: None,
        }
    }

    /// Attach one structured field
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status: String::from("ok"),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_serialization() {
        let body = ErrorResponse::new("rate_limit_exceeded", "Too many requests", 429)
            .with_data("limit", 3)
            .with_data("remaining", 0);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "rate_limit_exceeded");
        assert_eq!(json["status"], 429);
        assert_eq!(json["data"]["limit"], 3);
        assert_eq!(json["data"]["remaining"], 0);
    }

    #[test]
    fn test_data_omitted_when_empty() {
        let body = ErrorResponse::new("invalid_credentials", "Invalid credentials", 403);
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("data"));
    }
}
