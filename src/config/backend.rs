//! Backend connection configuration

use serde::{Deserialize, Serialize};

/// How to reach the watchlist backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL; API paths are joined onto its path, so a same-origin
    /// prefix such as `http://host/dashboard` works
    pub base_url: String,
    /// Liveness endpoint, relative to `base_url`
    pub health_path: String,
    /// Per-request deadline. Unset means requests may hang indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_seconds: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            health_path: "/".to_string(),
            request_timeout_seconds: None,
        }
    }
}
