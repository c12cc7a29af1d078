//! Identity-provider integration: session state, claim helpers and the
//! navigation guard.

pub mod claims;
pub mod guard;
pub mod keycloak;

pub use claims::{Claims, Profile, decode_claims, external_contact_id, has_realm_role};
pub use guard::{COACH_ROLE, FORBIDDEN_REDIRECT, GuardOutcome, IdentityProvider, RouteGuard};
pub use keycloak::{InitOutcome, KeycloakAuth, LoadPolicy, PendingRedirect, Session};

/// Errors surfaced by the identity-provider layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    #[error("identity provider request failed: {0}")]
    Network(String),

    #[error("identity provider rejected the request: {0}")]
    Rejected(String),

    #[error("malformed access token: {0}")]
    MalformedToken(String),

    #[error("browser API unavailable: {0}")]
    Platform(String),

    #[error("session expired and no refresh token is held")]
    SessionExpired,
}
