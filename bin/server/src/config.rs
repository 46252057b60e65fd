//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables.
//!
//! See [`BackendConfig`](copper_kite_integration::BackendConfig) for the
//! integration backend settings.

use copper_kite_core::{DEFAULT_ORG, DEFAULT_USER, Identity};
use copper_kite_integration::BackendConfig;
use serde::Deserialize;

/// Server configuration composed from library configs.
#[derive(Debug, Default, Deserialize)]
pub struct ServerConfig {
    /// Integration backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Identity prefilled in the form.
    #[serde(default)]
    pub identity: IdentityConfig,
}

/// Identity the form starts with.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_user")]
    pub default_user: String,

    #[serde(default = "default_org")]
    pub default_org: String,
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

fn default_org() -> String {
    DEFAULT_ORG.to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            default_user: default_user(),
            default_org: default_org(),
        }
    }
}

impl IdentityConfig {
    /// The identity to prefill.
    #[must_use]
    pub fn to_identity(&self) -> Identity {
        Identity::new(self.default_user.clone(), self.default_org.clone())
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Nested keys use `__`, e.g. `BACKEND__BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are present but invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
