//! Client for the integration backend.
//!
//! This crate provides:
//!
//! - **Backend trait**: [`IntegrationBackend`], the operations the backend
//!   offers for every integration (load, authorize, fetch credentials)
//! - **HTTP client**: [`BackendClient`], the `reqwest` implementation
//! - **Errors**: [`BackendError`] and the user-facing message rules

pub mod client;
pub mod config;
pub mod error;

pub use client::{BackendClient, IntegrationBackend};
pub use config::BackendConfig;
pub use error::{BackendError, BackendOperation};
