//! Domain logic of the enrollment portal: configuration, identity/guard,
//! API client and the static enrollment catalog. Everything here is
//! unit-testable off the browser.

pub mod api;
pub mod auth;
pub mod config;
pub mod enrollment;
pub mod routes;

pub use api::ApiClient;
pub use auth::{KeycloakAuth, RouteGuard};
pub use config::AppConfig;
