//! copper-kite web server and UI.
//!
//! This crate provides the Leptos-based web interface for connecting
//! third-party integrations and browsing the data loaded from them.

#![allow(non_snake_case)]

pub mod app;
pub mod browser;
pub mod error;
pub mod pages;
pub mod state;

#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod server_helpers;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
