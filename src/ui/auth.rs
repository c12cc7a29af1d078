//! Auth context wiring the identity provider, the navigation guard and the
//! API client into the component tree.

use std::sync::Arc;

use leptos::prelude::*;

use crate::core::api::ApiClient;
use crate::core::auth::{KeycloakAuth, Profile, RouteGuard, claims};
use crate::core::config::AppConfig;

/// Shared handles for everything session-related. The provider is the single
/// writer of session state; this context only reads.
#[derive(Clone)]
pub struct AuthContext {
    pub provider: Arc<KeycloakAuth>,
    pub guard: Arc<RouteGuard<KeycloakAuth>>,
    pub api: ApiClient,
}

impl AuthContext {
    /// Reactive: whether a session is currently held.
    pub fn session_active(&self) -> bool {
        self.provider.session().with(|s| s.is_some())
    }

    /// Reactive display profile for the header.
    pub fn profile(&self) -> Option<Profile> {
        self.provider
            .session()
            .with(|s| s.as_ref().map(|s| claims::profile(&s.claims)))
    }

    pub fn login(&self) {
        self.provider.login().follow();
    }

    pub fn logout(&self) {
        self.provider.logout().follow();
    }
}

/// Provide the auth context; call once at application startup.
pub fn provide_auth_context(config: &AppConfig) -> AuthContext {
    let provider = Arc::new(KeycloakAuth::new(config.clone()));
    let ctx = AuthContext {
        guard: Arc::new(RouteGuard::new(provider.clone())),
        api: ApiClient::new(config, provider.clone()),
        provider,
    };
    provide_context(ctx.clone());
    ctx
}

pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}
