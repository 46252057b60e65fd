//! Helper functions for server functions with proper error handling and logging.
//!
//! The server functions themselves only extract request state; the work
//! happens here against an [`IntegrationBackend`] so it can be tested with
//! a fake backend.

use crate::error::IntegrationRequestError;
use copper_kite_core::{Credentials, Identity, IntegrationKind, LoadedItem};
use copper_kite_integration::{BackendOperation, IntegrationBackend};
use leptos::prelude::*;
use std::ops::Deref;
use std::sync::Arc;

/// The backend shared by all requests, provided as a request extension.
#[derive(Clone)]
pub struct SharedBackend(Arc<dyn IntegrationBackend>);

impl SharedBackend {
    pub fn new(backend: impl IntegrationBackend + 'static) -> Self {
        Self(Arc::new(backend))
    }
}

impl Deref for SharedBackend {
    type Target = dyn IntegrationBackend;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Gets the integration backend from the request.
pub async fn get_backend() -> Result<SharedBackend, ServerFnError> {
    let axum::Extension(backend): axum::Extension<SharedBackend> =
        leptos_axum::extract().await?;
    Ok(backend)
}

/// Parses an integration name received from the browser.
pub fn parse_kind(integration_type: &str) -> Result<IntegrationKind, IntegrationRequestError> {
    integration_type.parse().map_err(|_| {
        tracing::debug!(
            integration_type = %integration_type,
            "Rejected unknown integration"
        );
        IntegrationRequestError::UnknownIntegration {
            name: integration_type.to_string(),
        }
    })
}

/// Loads an integration's items.
pub async fn load_items(
    backend: &dyn IntegrationBackend,
    integration_type: &str,
    credentials_json: &str,
) -> Result<Vec<LoadedItem>, IntegrationRequestError> {
    let kind = parse_kind(integration_type)?;

    let credentials = Credentials::from_json_str(credentials_json).map_err(|e| {
        tracing::debug!(
            error = %e,
            integration = %kind,
            "Credentials payload is not valid JSON"
        );
        IntegrationRequestError::InvalidCredentials {
            reason: e.to_string(),
        }
    })?;

    let items = backend
        .load_items(kind, &credentials)
        .await
        .map_err(|report| {
            tracing::warn!(
                error = %report,
                integration = %kind,
                "Failed to load integration items"
            );
            IntegrationRequestError::Backend {
                operation: BackendOperation::Load,
                error: report.current_context().clone(),
            }
        })?;

    tracing::info!(
        integration = %kind,
        item_count = items.len(),
        "Loaded integration items"
    );

    Ok(items)
}

/// Starts an authorization flow, returning the URL to open.
pub async fn start_authorization(
    backend: &dyn IntegrationBackend,
    integration_type: &str,
    identity: &Identity,
) -> Result<String, IntegrationRequestError> {
    let kind = parse_kind(integration_type)?;

    let url = backend.authorize(kind, identity).await.map_err(|report| {
        tracing::warn!(
            error = %report,
            integration = %kind,
            user = %identity.user,
            org = %identity.org,
            "Failed to start authorization"
        );
        IntegrationRequestError::Backend {
            operation: BackendOperation::Authorize,
            error: report.current_context().clone(),
        }
    })?;

    tracing::info!(
        integration = %kind,
        user = %identity.user,
        org = %identity.org,
        "Started authorization flow"
    );

    Ok(url)
}

/// Fetches the credentials stored after an authorization flow.
pub async fn collect_credentials(
    backend: &dyn IntegrationBackend,
    integration_type: &str,
    identity: &Identity,
) -> Result<Credentials, IntegrationRequestError> {
    let kind = parse_kind(integration_type)?;

    let credentials = backend
        .fetch_credentials(kind, identity)
        .await
        .map_err(|report| {
            tracing::warn!(
                error = %report,
                integration = %kind,
                user = %identity.user,
                org = %identity.org,
                "Failed to fetch credentials"
            );
            IntegrationRequestError::Backend {
                operation: BackendOperation::FetchCredentials,
                error: report.current_context().clone(),
            }
        })?;

    tracing::info!(
        integration = %kind,
        user = %identity.user,
        org = %identity.org,
        "Integration connected"
    );

    Ok(credentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LOAD_FAILED, user_message};
    use async_trait::async_trait;
    use copper_kite_integration::BackendError;
    use rootcause::prelude::Report;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    /// Backend double that records calls and answers from canned results.
    #[derive(Default)]
    struct FakeBackend {
        calls: Mutex<Vec<(IntegrationKind, Value)>>,
        load_error: Option<BackendError>,
    }

    impl FakeBackend {
        fn failing(error: BackendError) -> Self {
            Self {
                load_error: Some(error),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl IntegrationBackend for FakeBackend {
        async fn load_items(
            &self,
            kind: IntegrationKind,
            credentials: &Credentials,
        ) -> Result<Vec<LoadedItem>, Report<BackendError>> {
            self.calls
                .lock()
                .expect("lock")
                .push((kind, credentials.as_value().clone()));
            match &self.load_error {
                Some(error) => Err(error.clone().into()),
                None => Ok(vec![LoadedItem::new("1")]),
            }
        }

        async fn authorize(
            &self,
            kind: IntegrationKind,
            identity: &Identity,
        ) -> Result<String, Report<BackendError>> {
            Ok(format!(
                "https://provider.example/{}?user={}&org={}",
                kind.slug(),
                identity.user,
                identity.org
            ))
        }

        async fn fetch_credentials(
            &self,
            _kind: IntegrationKind,
            _identity: &Identity,
        ) -> Result<Credentials, Report<BackendError>> {
            Err(BackendError::ServerError {
                status: 400,
                detail: Some("No credentials found.".to_string()),
            }
            .into())
        }
    }

    #[tokio::test]
    async fn load_passes_credentials_through_unchanged() {
        let backend = FakeBackend::default();
        let payload = json!({ "bot_id": 7, "workspace": { "name": "Team" } });

        let items = load_items(&backend, "Notion", &payload.to_string())
            .await
            .expect("load");

        assert_eq!(items.len(), 1);
        let calls = backend.calls.lock().expect("lock");
        assert_eq!(calls.as_slice(), &[(IntegrationKind::Notion, payload.clone())]);
    }

    #[tokio::test]
    async fn load_rejects_unknown_integration_without_calling_backend() {
        let backend = FakeBackend::default();

        let err = load_items(&backend, "Dropbox", "{}").await.unwrap_err();

        assert!(matches!(
            err,
            IntegrationRequestError::UnknownIntegration { ref name } if name == "Dropbox"
        ));
        assert!(backend.calls.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn load_rejects_invalid_credentials_json() {
        let backend = FakeBackend::default();

        let err = load_items(&backend, "Airtable", "{oops").await.unwrap_err();

        assert!(matches!(err, IntegrationRequestError::InvalidCredentials { .. }));
    }

    #[tokio::test]
    async fn load_failure_carries_backend_detail() {
        let backend = FakeBackend::failing(BackendError::ServerError {
            status: 400,
            detail: Some("Invalid token".to_string()),
        });

        let err = load_items(&backend, "Hubspot", "{}").await.unwrap_err();

        assert_eq!(
            user_message(&err.into_server_error(), LOAD_FAILED),
            "Invalid token"
        );
    }

    #[tokio::test]
    async fn load_failure_without_detail_is_generic() {
        let backend = FakeBackend::failing(BackendError::MalformedResponse {
            reason: "expected an array of items, got an object".to_string(),
        });

        let err = load_items(&backend, "Hubspot", "{}").await.unwrap_err();

        assert_eq!(
            user_message(&err.into_server_error(), LOAD_FAILED),
            "Failed to load data."
        );
    }

    #[tokio::test]
    async fn authorization_returns_provider_url() {
        let identity = Identity::new("alice", "acme");

        let url = start_authorization(&FakeBackend::default(), "hubspot", &identity)
            .await
            .expect("authorize");

        assert_eq!(url, "https://provider.example/hubspot?user=alice&org=acme");
    }

    #[tokio::test]
    async fn credential_failure_carries_backend_detail() {
        let err = collect_credentials(&FakeBackend::default(), "Notion", &Identity::default())
            .await
            .unwrap_err();

        assert_eq!(
            user_message(&err.into_server_error(), LOAD_FAILED),
            "No credentials found."
        );
    }
}
