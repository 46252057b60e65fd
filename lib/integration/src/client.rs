//! HTTP client for the integration backend.
//!
//! Every call is a multipart `POST {base_url}/integrations/{slug}/{endpoint}`.
//! Success bodies are JSON; error bodies may carry a `detail` string that
//! is surfaced to the user verbatim.

use crate::config::BackendConfig;
use crate::error::{BackendError, BackendOperation};
use async_trait::async_trait;
use copper_kite_core::{Credentials, Identity, IntegrationKind, LoadedItem};
use reqwest::multipart::Form;
use rootcause::prelude::Report;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Operations the backend offers for every integration.
///
/// Implemented by [`BackendClient`]; the server depends on the trait so
/// request handling can be exercised without a live backend.
#[async_trait]
pub trait IntegrationBackend: Send + Sync {
    /// Loads the records of `kind` using `credentials`.
    async fn load_items(
        &self,
        kind: IntegrationKind,
        credentials: &Credentials,
    ) -> Result<Vec<LoadedItem>, Report<BackendError>>;

    /// Starts an authorization flow and returns the provider URL to open.
    async fn authorize(
        &self,
        kind: IntegrationKind,
        identity: &Identity,
    ) -> Result<String, Report<BackendError>>;

    /// Fetches the credentials stored once the provider redirected back.
    async fn fetch_credentials(
        &self,
        kind: IntegrationKind,
        identity: &Identity,
    ) -> Result<Credentials, Report<BackendError>>;
}

/// `reqwest`-backed [`IntegrationBackend`].
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Builds a client from configuration.
    pub fn new(config: &BackendConfig) -> Result<Self, Report<BackendError>> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| BackendError::ClientSetup {
                reason: e.to_string(),
            })?;

        Ok(Self::with_http_client(http, &config.base_url))
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub fn with_http_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of `operation` for `kind`.
    #[must_use]
    pub fn endpoint_url(&self, kind: IntegrationKind, operation: BackendOperation) -> String {
        format!(
            "{}/integrations/{}/{}",
            self.base_url,
            kind.slug(),
            operation.endpoint()
        )
    }

    /// Sends a multipart POST and returns the body of a successful response.
    async fn post(
        &self,
        kind: IntegrationKind,
        operation: BackendOperation,
        form: Form,
    ) -> Result<String, Report<BackendError>> {
        let url = self.endpoint_url(kind, operation);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, url = %url, "Backend request failed");
                BackendError::NetworkFailure {
                    url: url.clone(),
                    reason: e.to_string(),
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!(error = %e, url = %url, "Failed to read backend response body");
            BackendError::NetworkFailure {
                url: url.clone(),
                reason: e.to_string(),
            }
        })?;

        if !status.is_success() {
            let detail = error_detail(&body);
            warn!(
                url = %url,
                status = %status,
                detail = ?detail,
                "Backend returned error"
            );
            return Err(BackendError::ServerError {
                status: status.as_u16(),
                detail,
            }
            .into());
        }

        Ok(body)
    }
}

#[async_trait]
impl IntegrationBackend for BackendClient {
    #[instrument(skip(self, credentials), fields(integration = %kind.slug()))]
    async fn load_items(
        &self,
        kind: IntegrationKind,
        credentials: &Credentials,
    ) -> Result<Vec<LoadedItem>, Report<BackendError>> {
        let form = Form::new().text("credentials", credentials.to_json_string());
        let body = self.post(kind, BackendOperation::Load, form).await?;
        let items = decode_items(&body)?;

        debug!(item_count = items.len(), "Loaded integration items");
        Ok(items)
    }

    #[instrument(skip(self, identity), fields(integration = %kind.slug()))]
    async fn authorize(
        &self,
        kind: IntegrationKind,
        identity: &Identity,
    ) -> Result<String, Report<BackendError>> {
        let body = self
            .post(kind, BackendOperation::Authorize, identity_form(identity))
            .await?;
        let url = decode_authorization_url(&body)?;

        debug!("Received authorization URL");
        Ok(url)
    }

    #[instrument(skip(self, identity), fields(integration = %kind.slug()))]
    async fn fetch_credentials(
        &self,
        kind: IntegrationKind,
        identity: &Identity,
    ) -> Result<Credentials, Report<BackendError>> {
        let body = self
            .post(
                kind,
                BackendOperation::FetchCredentials,
                identity_form(identity),
            )
            .await?;
        let credentials = decode_credentials(&body)?;

        debug!("Received integration credentials");
        Ok(credentials)
    }
}

fn identity_form(identity: &Identity) -> Form {
    Form::new()
        .text("user_id", identity.user.clone())
        .text("org_id", identity.org.clone())
}

/// Extracts the `detail` string from an error body, if there is one.
///
/// Structured details (e.g. validation error lists) are not strings and
/// yield `None`.
#[must_use]
pub fn error_detail(body: &str) -> Option<String> {
    let value: JsonValue = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_string)
}

/// Decodes a load response: a JSON array of items.
pub fn decode_items(body: &str) -> Result<Vec<LoadedItem>, BackendError> {
    match serde_json::from_str::<JsonValue>(body) {
        Ok(JsonValue::Array(values)) => Ok(values.iter().map(LoadedItem::from_value).collect()),
        Ok(other) => Err(BackendError::MalformedResponse {
            reason: format!("expected an array of items, got {}", json_kind(&other)),
        }),
        Err(e) => Err(BackendError::MalformedResponse {
            reason: e.to_string(),
        }),
    }
}

/// Decodes an authorize response: a JSON string holding the URL.
pub fn decode_authorization_url(body: &str) -> Result<String, BackendError> {
    match serde_json::from_str::<JsonValue>(body) {
        Ok(JsonValue::String(url)) if !url.is_empty() => Ok(url),
        Ok(other) => Err(BackendError::MalformedResponse {
            reason: format!("expected an authorization URL, got {}", json_kind(&other)),
        }),
        Err(e) => Err(BackendError::MalformedResponse {
            reason: e.to_string(),
        }),
    }
}

/// Decodes a credentials response: any non-empty JSON value.
pub fn decode_credentials(body: &str) -> Result<Credentials, BackendError> {
    let credentials =
        Credentials::from_json_str(body).map_err(|e| BackendError::MalformedResponse {
            reason: e.to_string(),
        })?;

    if credentials.is_empty() {
        return Err(BackendError::MalformedResponse {
            reason: "no credentials returned".to_string(),
        });
    }

    Ok(credentials)
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(s) if s.is_empty() => "an empty string",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_uses_slug() {
        let client = BackendClient::with_http_client(reqwest::Client::new(), "http://host:8000/");
        assert_eq!(client.base_url(), "http://host:8000");
        assert_eq!(
            client.endpoint_url(IntegrationKind::Hubspot, BackendOperation::Load),
            "http://host:8000/integrations/hubspot/load"
        );
        assert_eq!(
            client.endpoint_url(IntegrationKind::Notion, BackendOperation::FetchCredentials),
            "http://host:8000/integrations/notion/credentials"
        );
    }

    #[test]
    fn error_detail_extraction() {
        assert_eq!(
            error_detail(r#"{"detail": "Invalid token"}"#).as_deref(),
            Some("Invalid token")
        );
        assert_eq!(error_detail(r#"{"message": "nope"}"#), None);
        assert_eq!(error_detail(r#"{"detail": [{"loc": ["body"]}]}"#), None);
        assert_eq!(error_detail("Internal Server Error"), None);
    }

    #[test]
    fn decode_items_accepts_empty_array() {
        assert_eq!(decode_items("[]").expect("decode"), Vec::new());
    }

    #[test]
    fn decode_items_rejects_non_arrays() {
        let err = decode_items(r#"{"items": []}"#).unwrap_err();
        assert_eq!(
            err,
            BackendError::MalformedResponse {
                reason: "expected an array of items, got an object".to_string()
            }
        );
        assert!(decode_items("not json").is_err());
    }

    #[test]
    fn decode_authorization_url_requires_string() {
        assert_eq!(
            decode_authorization_url(r#""https://provider/authorize?x=1""#).expect("decode"),
            "https://provider/authorize?x=1"
        );
        assert!(decode_authorization_url(r#""""#).is_err());
        assert!(decode_authorization_url(r#"{"url": "x"}"#).is_err());
    }

    #[test]
    fn decode_credentials_rejects_empty_payloads() {
        assert!(decode_credentials("{}").is_err());
        assert!(decode_credentials("null").is_err());
        let credentials = decode_credentials(r#"{"access_token": "t"}"#).expect("decode");
        assert_eq!(credentials.as_value()["access_token"], "t");
    }
}
