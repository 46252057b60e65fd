//! Domain error types for server operations.
//!
//! Server functions log the full error and hand the browser only a
//! user-safe message, carried as `ServerFnError::ServerError`. The browser
//! shows that message verbatim and falls back to a generic text for any
//! other failure (e.g. the server itself being unreachable).

use leptos::server_fn::error::ServerFnError;

/// Shown when loading data fails without a backend-provided reason.
pub const LOAD_FAILED: &str = "Failed to load data.";

/// Shown when an authorization flow fails without a backend-provided reason.
pub const AUTHORIZATION_FAILED: &str = "Failed to connect integration.";

/// Shown when the authorization popup could not be opened.
pub const POPUP_BLOCKED: &str = "Could not open the authorization window. Allow popups and try again.";

/// The message to show the user for a failed server function call.
#[must_use]
pub fn user_message(error: &ServerFnError, fallback: &str) -> String {
    match error {
        ServerFnError::ServerError(message) if !message.is_empty() => message.clone(),
        _ => fallback.to_string(),
    }
}

#[cfg(feature = "ssr")]
pub use request::IntegrationRequestError;

#[cfg(feature = "ssr")]
mod request {
    use copper_kite_integration::{BackendError, BackendOperation};
    use leptos::server_fn::error::ServerFnError;
    use std::fmt;

    /// Errors from integration server functions.
    #[derive(Debug)]
    pub enum IntegrationRequestError {
        /// The integration name is not one we know.
        UnknownIntegration { name: String },
        /// The credentials argument was not valid JSON.
        InvalidCredentials { reason: String },
        /// The backend call failed.
        Backend {
            operation: BackendOperation,
            error: BackendError,
        },
    }

    impl fmt::Display for IntegrationRequestError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::UnknownIntegration { name } => {
                    write!(f, "unknown integration '{}'", name)
                }
                Self::InvalidCredentials { reason } => {
                    write!(f, "invalid credentials payload: {}", reason)
                }
                Self::Backend { operation, error } => {
                    write!(f, "backend {} failed: {}", operation, error)
                }
            }
        }
    }

    impl IntegrationRequestError {
        /// Convert to a user-safe ServerFnError.
        pub fn into_server_error(self) -> ServerFnError {
            match self {
                Self::UnknownIntegration { name } => {
                    ServerFnError::new(format!("Unknown integration: {}", name))
                }
                Self::InvalidCredentials { .. } => ServerFnError::new("Invalid credentials"),
                Self::Backend { operation, error } => {
                    ServerFnError::new(error.user_message(operation))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_shown_verbatim() {
        let error = ServerFnError::new("Invalid token");
        assert_eq!(user_message(&error, LOAD_FAILED), "Invalid token");
    }

    #[test]
    fn other_failures_use_fallback() {
        let error: ServerFnError = ServerFnError::Request("connection refused".to_string());
        assert_eq!(user_message(&error, LOAD_FAILED), "Failed to load data.");

        let error = ServerFnError::new("");
        assert_eq!(user_message(&error, AUTHORIZATION_FAILED), AUTHORIZATION_FAILED);
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn backend_errors_convert_to_user_messages() {
        use copper_kite_integration::{BackendError, BackendOperation};

        let error = IntegrationRequestError::Backend {
            operation: BackendOperation::Load,
            error: BackendError::ServerError {
                status: 401,
                detail: Some("Invalid token".to_string()),
            },
        };
        assert_eq!(
            user_message(&error.into_server_error(), LOAD_FAILED),
            "Invalid token"
        );

        let error = IntegrationRequestError::Backend {
            operation: BackendOperation::Load,
            error: BackendError::NetworkFailure {
                url: "http://localhost:8000/integrations/notion/load".to_string(),
                reason: "connection refused".to_string(),
            },
        };
        assert_eq!(
            user_message(&error.into_server_error(), LOAD_FAILED),
            "Failed to load data."
        );
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn unknown_integration_names_the_input() {
        let error = IntegrationRequestError::UnknownIntegration {
            name: "Dropbox".to_string(),
        };
        assert_eq!(error.to_string(), "unknown integration 'Dropbox'");
        assert_eq!(
            user_message(&error.into_server_error(), LOAD_FAILED),
            "Unknown integration: Dropbox"
        );
    }
}
