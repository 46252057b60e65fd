//! Error types for talking to the integration backend.
//!
//! `BackendError` is returned wrapped in a rootcause `Report`. The variants
//! separate what the user may see (a backend-provided `detail`) from what
//! only the logs should carry (connection errors, decode failures).

use std::fmt;

/// The backend call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendOperation {
    /// Loading an integration's records.
    Load,
    /// Requesting the provider authorization URL.
    Authorize,
    /// Fetching the credentials stored after authorization.
    FetchCredentials,
}

impl BackendOperation {
    /// Path segment under `/integrations/{slug}/`.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Authorize => "authorize",
            Self::FetchCredentials => "credentials",
        }
    }

    /// Message shown when the backend gave no `detail`.
    #[must_use]
    pub const fn generic_message(self) -> &'static str {
        match self {
            Self::Load => "Failed to load data.",
            Self::Authorize => "Failed to start authorization.",
            Self::FetchCredentials => "Failed to fetch credentials.",
        }
    }
}

impl fmt::Display for BackendOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// Errors from backend requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The request could not be completed (unreachable, timed out, reset).
    NetworkFailure { url: String, reason: String },
    /// The backend answered with a non-success status.
    ServerError { status: u16, detail: Option<String> },
    /// A success response did not have the expected shape.
    MalformedResponse { reason: String },
    /// The HTTP client could not be constructed.
    ClientSetup { reason: String },
}

impl BackendError {
    /// The backend-provided `detail`, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::ServerError {
                detail: Some(detail),
                ..
            } => Some(detail),
            _ => None,
        }
    }

    /// Text safe to show the user for a failed `operation`.
    #[must_use]
    pub fn user_message(&self, operation: BackendOperation) -> String {
        self.detail()
            .unwrap_or(operation.generic_message())
            .to_string()
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkFailure { url, reason } => {
                write!(f, "request to '{url}' failed: {reason}")
            }
            Self::ServerError {
                status,
                detail: Some(detail),
            } => write!(f, "backend returned HTTP {status}: {detail}"),
            Self::ServerError { status, detail: None } => {
                write!(f, "backend returned HTTP {status}")
            }
            Self::MalformedResponse { reason } => {
                write!(f, "malformed backend response: {reason}")
            }
            Self::ClientSetup { reason } => {
                write!(f, "failed to build HTTP client: {reason}")
            }
        }
    }
}

impl std::error::Error for BackendError {}
