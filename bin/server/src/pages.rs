//! Page components for the application.
//!
//! Each page is a Leptos component that renders a specific route,
//! along with any server functions specific to that page.

pub mod integrations;

pub use integrations::IntegrationsPage;
