//! Identity, credentials and the authorization result shared between
//! the authorization panels and the data loader.

use crate::kind::IntegrationKind;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Default user name shown before the user types anything.
pub const DEFAULT_USER: &str = "TestUser";

/// Default organization shown before the user types anything.
pub const DEFAULT_ORG: &str = "TestOrg";

/// Who is connecting an integration.
///
/// Free text on both fields; nothing here is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user: String,
    pub org: String,
}

impl Identity {
    /// Creates an identity.
    #[must_use]
    pub fn new(user: impl Into<String>, org: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            org: org.into(),
        }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new(DEFAULT_USER, DEFAULT_ORG)
    }
}

/// Opaque authorization payload produced by an integration's authorization
/// flow.
///
/// The shape is integration-specific and never inspected here. It is only
/// carried around and serialized for the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(JsonValue);

impl Credentials {
    /// Wraps a credential payload.
    #[must_use]
    pub fn new(value: JsonValue) -> Self {
        Self(value)
    }

    /// Parses a credential payload from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not valid JSON.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self)
    }

    /// Serializes the payload to JSON text, as sent to the backend.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        // Serializing a `Value` cannot fail: its map keys are always strings.
        self.0.to_string()
    }

    /// Returns the wrapped payload.
    #[must_use]
    pub fn as_value(&self) -> &JsonValue {
        &self.0
    }

    /// Whether the payload carries anything at all.
    ///
    /// `null` and `{}` count as empty, mirroring what a backend returns
    /// when no credentials were stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            JsonValue::Null => true,
            JsonValue::Object(map) => map.is_empty(),
            _ => false,
        }
    }
}

impl From<JsonValue> for Credentials {
    fn from(value: JsonValue) -> Self {
        Self(value)
    }
}

/// The result of a completed authorization flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationParams {
    /// The integration the credentials belong to.
    #[serde(rename = "type")]
    pub kind: IntegrationKind,
    /// Credentials for loading that integration's data.
    pub credentials: Credentials,
}

impl IntegrationParams {
    /// Creates params for `kind`.
    #[must_use]
    pub fn new(kind: IntegrationKind, credentials: Credentials) -> Self {
        Self { kind, credentials }
    }
}
