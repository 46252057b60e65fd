//! Configuration for the integration backend client.

use serde::Deserialize;

/// Where the integration backend lives and how long to wait for it.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend, without a trailing `/integrations`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. A hung backend surfaces as a network
    /// failure once this elapses.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
