//! Core domain types for copper-kite.
//!
//! This crate provides the types every layer agrees on: the closed set of
//! integrations, the identity of the person connecting one, the opaque
//! credentials an authorization flow produces, and the records loaded
//! from the backend.

pub mod credentials;
pub mod error;
pub mod item;
pub mod kind;

pub use credentials::{Credentials, DEFAULT_ORG, DEFAULT_USER, Identity, IntegrationParams};
pub use error::Result;
pub use item::{LoadedItem, NOT_AVAILABLE, UNNAMED_ITEM, load_summary};
pub use kind::{IntegrationKind, UnknownIntegration};
