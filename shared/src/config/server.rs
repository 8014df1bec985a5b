//! HTTP server configuration module

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Path prefix every API route lives under, e.g. `audit/v1`
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Public base URL; defaults to `http://{host}:{port}/{namespace}`
    #[serde(default)]
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            namespace: default_namespace(),
            public_url: None,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            namespace: std::env::var("API_NAMESPACE").unwrap_or(defaults.namespace),
            public_url: std::env::var("API_BASE_URL").ok(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Namespace with surrounding slashes removed
    pub fn namespace(&self) -> &str {
        self.namespace.trim_matches('/')
    }

    pub fn api_base_url(&self) -> String {
        match &self.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}:{}/{}", self.host, self.port, self.namespace()),
        }
    }
}

fn default_host() -> String {
    String::from("127.0.0.1")
}

fn default_port() -> u16 {
    8080
}

fn default_namespace() -> String {
    String::from("audit/v1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_url() {
        let config = ServerConfig::default();
        assert_eq!(config.api_base_url(), "http://127.0.0.1:8080/audit/v1");

        let config = ServerConfig {
            public_url: Some("https://audits.example.com/api/".into()),
            ..Default::default()
        };
        assert_eq!(config.api_base_url(), "https://audits.example.com/api");
    }

    #[test]
    fn test_namespace_trimmed() {
        let config = ServerConfig {
            namespace: "/audit/v1/".into(),
            ..Default::default()
        };
        assert_eq!(config.namespace(), "audit/v1");
    }
}
