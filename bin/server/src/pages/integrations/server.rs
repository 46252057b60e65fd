//! Integration server functions.
//!
//! Each function extracts what it needs from the request and delegates to
//! [`server_helpers`](crate::server_helpers), which does the logging and
//! error conversion.

use copper_kite_core::{Credentials, Identity, LoadedItem};
use leptos::prelude::*;

/// Server function to get the identity the form starts with.
#[server]
pub async fn get_identity_defaults() -> Result<Identity, ServerFnError> {
    use crate::config::IdentityConfig;
    use axum::Extension;

    let Extension(identity): Extension<IdentityConfig> = leptos_axum::extract().await?;
    Ok(identity.to_identity())
}

/// Server function to load an integration's records.
///
/// `credentials_json` is the opaque credential payload as JSON text; it is
/// forwarded to the backend unchanged.
#[server]
pub async fn load_integration_data(
    integration_type: String,
    credentials_json: String,
) -> Result<Vec<LoadedItem>, ServerFnError> {
    use crate::server_helpers::{get_backend, load_items};

    let backend = get_backend().await?;
    load_items(&*backend, &integration_type, &credentials_json)
        .await
        .map_err(|e| e.into_server_error())
}

/// Server function to start an authorization flow.
///
/// Returns the provider URL the browser should open.
#[server]
pub async fn authorize_integration(
    integration_type: String,
    user: String,
    org: String,
) -> Result<String, ServerFnError> {
    use crate::server_helpers::{get_backend, start_authorization};

    let backend = get_backend().await?;
    start_authorization(&*backend, &integration_type, &Identity::new(user, org))
        .await
        .map_err(|e| e.into_server_error())
}

/// Server function to collect credentials once the provider redirected back.
#[server]
pub async fn fetch_integration_credentials(
    integration_type: String,
    user: String,
    org: String,
) -> Result<Credentials, ServerFnError> {
    use crate::server_helpers::{collect_credentials, get_backend};

    let backend = get_backend().await?;
    collect_credentials(&*backend, &integration_type, &Identity::new(user, org))
        .await
        .map_err(|e| e.into_server_error())
}
