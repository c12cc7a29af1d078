//! Coach-facing enrollment portal for the node program.
//!
//! Keycloak-backed sign-in, a role-gated dashboard and enrollment flows
//! against the DRAHT backend, built with Leptos and WebAssembly.

#![recursion_limit = "4096"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
