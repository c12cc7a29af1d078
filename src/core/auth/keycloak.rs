//! Keycloak adapter.
//!
//! Implements the OIDC authorization-code flow with PKCE (S256) against the
//! configured realm. Redirect-based flows never mutate state directly; they
//! produce a [`PendingRedirect`] the caller follows, and the round-trip back
//! into the app re-initializes session state.
//!
//! Silent session checks re-use a refresh token persisted in localStorage,
//! the browser-native stand-in for an SSO iframe check.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::claims::{self, Claims, Profile};
use super::AuthError;
use crate::core::config::AppConfig;

/// How `init` should treat an absent session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Initialization must end in an authenticated session; an anonymous
    /// result carries a login redirect for the caller to follow.
    LoginRequired,
    /// Silently restore an existing session if one can be found.
    CheckSso,
}

/// Result of provider initialization.
#[derive(Debug, Clone, PartialEq)]
pub enum InitOutcome {
    Authenticated,
    Anonymous,
    /// Only produced under [`LoadPolicy::LoginRequired`].
    LoginRedirect(PendingRedirect),
}

/// A redirect the caller still has to perform. Keeps redirect-based control
/// flow explicit instead of an ambient side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRedirect {
    url: String,
}

impl PendingRedirect {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Navigate the browser to the target. No-op on the server.
    pub fn follow(self) {
        #[cfg(not(feature = "ssr"))]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().assign(&self.url);
            }
        }
    }
}

/// Session derived from a decoded access token.
///
/// Created on successful initialization or login-redirect completion,
/// replaced wholesale on refresh, cleared on logout.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Unix epoch seconds at which the access token expires.
    pub expires_at: f64,
    pub claims: Claims,
}

impl Session {
    pub fn remaining_secs(&self, now_epoch: f64) -> f64 {
        self.expires_at - now_epoch
    }

    pub fn is_valid(&self, now_epoch: f64) -> bool {
        self.remaining_secs(now_epoch) > 0.0
    }
}

/// Token-endpoint response (authorization-code and refresh grants).
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: f64,
}

/// Refresh-token material persisted across reloads for the silent check.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    refresh_token: String,
}

#[allow(dead_code)]
const STORAGE_KEY_SESSION: &str = "node-session";
#[allow(dead_code)]
const STORAGE_KEY_PKCE_VERIFIER: &str = "node-pkce-verifier";
#[allow(dead_code)]
const STORAGE_KEY_AUTH_STATE: &str = "node-auth-state";

/// Identity-provider client. Single writer of session state; everything else
/// reads through the accessors.
pub struct KeycloakAuth {
    config: AppConfig,
    session: RwSignal<Option<Session>>,
}

impl KeycloakAuth {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            session: RwSignal::new(None),
        }
    }

    fn oidc_base(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect",
            self.config.keycloak_url, self.config.keycloak_realm
        )
    }

    pub fn auth_endpoint(&self) -> String {
        format!("{}/auth", self.oidc_base())
    }

    pub fn token_endpoint(&self) -> String {
        format!("{}/token", self.oidc_base())
    }

    pub fn logout_endpoint(&self) -> String {
        format!("{}/logout", self.oidc_base())
    }

    /// Read-only view of the session for reactive consumers.
    pub fn session(&self) -> ReadSignal<Option<Session>> {
        self.session.read_only()
    }

    /// True iff a valid, non-expired token is held.
    pub fn is_authenticated(&self) -> bool {
        let now = now_epoch_secs();
        self.session
            .with_untracked(|s| s.as_ref().is_some_and(|s| s.is_valid(now)))
    }

    pub fn token(&self) -> Option<String> {
        self.session
            .with_untracked(|s| s.as_ref().map(|s| s.access_token.clone()))
    }

    /// Realm-role membership; false when unauthenticated or claims absent.
    pub fn has_role(&self, role: &str) -> bool {
        self.is_authenticated()
            && self
                .session
                .with_untracked(|s| s.as_ref().is_some_and(|s| claims::has_realm_role(&s.claims, role)))
    }

    pub fn profile(&self) -> Option<Profile> {
        if !self.is_authenticated() {
            return None;
        }
        self.session
            .with_untracked(|s| s.as_ref().map(|s| claims::profile(&s.claims)))
    }

    /// Dolibarr contact id from the token, if present and numeric.
    pub fn external_contact_id(&self) -> Option<i64> {
        self.session
            .with_untracked(|s| s.as_ref().and_then(|s| claims::external_contact_id(&s.claims)))
    }

    fn clear_session(&self) {
        self.session.set(None);
        clear_persisted_refresh_token();
    }

    fn install(&self, tokens: TokenResponse) -> Result<(), AuthError> {
        let decoded = claims::decode_claims(&tokens.access_token)?;
        match tokens.refresh_token.as_deref() {
            Some(refresh) => persist_refresh_token(refresh),
            None => clear_persisted_refresh_token(),
        }
        self.session.set(Some(Session {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_at: now_epoch_secs() + tokens.expires_in,
            claims: decoded,
        }));
        Ok(())
    }
}

// Browser-side flows.
#[cfg(not(feature = "ssr"))]
impl KeycloakAuth {
    /// One-time setup. The route guard serializes calls so this runs at most
    /// once per application lifetime.
    pub async fn init(&self, policy: LoadPolicy) -> Result<InitOutcome, AuthError> {
        if self.session.with_untracked(Option::is_some) {
            return Ok(if self.is_authenticated() {
                InitOutcome::Authenticated
            } else {
                InitOutcome::Anonymous
            });
        }

        // Returning leg of the login redirect.
        if let Some((code, verifier)) = self.take_callback_params() {
            let result = self.exchange_code(&code, &verifier).await;
            self.clean_callback_url();
            result?;
            return Ok(InitOutcome::Authenticated);
        }

        // Silent check against a persisted refresh token.
        if let Some(refresh_token) = load_persisted_refresh_token() {
            match self.refresh_grant(&refresh_token).await {
                Ok(()) => return Ok(InitOutcome::Authenticated),
                Err(AuthError::Rejected(reason)) => {
                    // Stale session; start anonymous.
                    leptos::logging::log!("silent session check rejected: {reason}");
                }
                Err(e) => return Err(e),
            }
        }

        match policy {
            LoadPolicy::LoginRequired => Ok(InitOutcome::LoginRedirect(self.login())),
            LoadPolicy::CheckSso => Ok(InitOutcome::Anonymous),
        }
    }

    /// Ensure the token stays valid for at least `min_validity_secs`,
    /// renewing it via the refresh grant when needed. Resolves to `true` when
    /// a refresh happened, `false` when the token was already fresh or no
    /// session is held.
    pub async fn update_token(&self, min_validity_secs: u32) -> Result<bool, AuthError> {
        let now = now_epoch_secs();
        let snapshot = self
            .session
            .with_untracked(|s| s.as_ref().map(|s| (s.remaining_secs(now), s.refresh_token.clone())));
        let Some((remaining, refresh_token)) = snapshot else {
            return Ok(false);
        };
        if remaining > f64::from(min_validity_secs) {
            return Ok(false);
        }
        let Some(refresh_token) = refresh_token else {
            self.clear_session();
            return Err(AuthError::SessionExpired);
        };
        self.refresh_grant(&refresh_token).await?;
        Ok(true)
    }

    /// Build the login redirect. State and PKCE material are stashed in
    /// sessionStorage for the returning leg.
    pub fn login(&self) -> PendingRedirect {
        match self.build_login_redirect() {
            Ok(redirect) => redirect,
            Err(e) => {
                leptos::logging::warn!("falling back to plain login redirect: {e}");
                PendingRedirect::new(self.auth_endpoint())
            }
        }
    }

    /// Clear the session and produce the provider logout redirect.
    pub fn logout(&self) -> PendingRedirect {
        self.clear_session();
        let mut url = self.logout_endpoint();
        if let Some(origin) = current_origin() {
            url = format!(
                "{url}?client_id={}&post_logout_redirect_uri={}",
                encode(&self.config.keycloak_client_id),
                encode(&origin)
            );
        }
        PendingRedirect::new(url)
    }

    fn build_login_redirect(&self) -> Result<PendingRedirect, AuthError> {
        let window = web_sys::window().ok_or_else(|| AuthError::Platform("no window".to_string()))?;
        let redirect_uri =
            current_page_uri().ok_or_else(|| AuthError::Platform("no location".to_string()))?;

        let verifier = URL_SAFE_NO_PAD.encode(random_bytes()?);
        let state = uuid::Uuid::new_v4().to_string();
        let storage = window
            .session_storage()
            .ok()
            .flatten()
            .ok_or_else(|| AuthError::Platform("sessionStorage unavailable".to_string()))?;
        storage
            .set_item(STORAGE_KEY_PKCE_VERIFIER, &verifier)
            .map_err(|e| AuthError::Platform(format!("{e:?}")))?;
        storage
            .set_item(STORAGE_KEY_AUTH_STATE, &state)
            .map_err(|e| AuthError::Platform(format!("{e:?}")))?;

        let params = web_sys::UrlSearchParams::new()
            .map_err(|e| AuthError::Platform(format!("{e:?}")))?;
        params.append("client_id", &self.config.keycloak_client_id);
        params.append("redirect_uri", &redirect_uri);
        params.append("response_type", "code");
        params.append("scope", "openid");
        params.append("state", &state);
        params.append("code_challenge", &pkce_challenge(&verifier));
        params.append("code_challenge_method", "S256");

        Ok(PendingRedirect::new(format!(
            "{}?{}",
            self.auth_endpoint(),
            String::from(params.to_string())
        )))
    }

    /// Pull `code`/`state` out of the callback query, consuming the stashed
    /// PKCE material. Returns `(code, verifier)` when the state matches.
    fn take_callback_params(&self) -> Option<(String, String)> {
        let window = web_sys::window()?;
        let search = window.location().search().ok()?;
        if search.is_empty() {
            return None;
        }
        let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
        let code = params.get("code")?;
        let state = params.get("state")?;
        let storage = window.session_storage().ok().flatten()?;
        let expected_state = storage.get_item(STORAGE_KEY_AUTH_STATE).ok().flatten()?;
        let verifier = storage.get_item(STORAGE_KEY_PKCE_VERIFIER).ok().flatten()?;
        let _ = storage.remove_item(STORAGE_KEY_AUTH_STATE);
        let _ = storage.remove_item(STORAGE_KEY_PKCE_VERIFIER);
        if state != expected_state {
            leptos::logging::warn!("auth callback state mismatch, ignoring callback");
            return None;
        }
        Some((code, verifier))
    }

    /// Strip the OIDC callback parameters from the address bar.
    fn clean_callback_url(&self) {
        if let Some(window) = web_sys::window() {
            if let (Ok(history), Ok(path)) = (window.history(), window.location().pathname()) {
                let _ =
                    history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
            }
        }
    }

    async fn exchange_code(&self, code: &str, verifier: &str) -> Result<(), AuthError> {
        let redirect_uri =
            current_page_uri().ok_or_else(|| AuthError::Platform("no location".to_string()))?;
        let form = format!(
            "grant_type=authorization_code&client_id={}&code={}&redirect_uri={}&code_verifier={}",
            encode(&self.config.keycloak_client_id),
            encode(code),
            encode(&redirect_uri),
            encode(verifier)
        );
        let tokens = self.token_request(form).await?;
        self.install(tokens)
    }

    async fn refresh_grant(&self, refresh_token: &str) -> Result<(), AuthError> {
        let form = format!(
            "grant_type=refresh_token&client_id={}&refresh_token={}",
            encode(&self.config.keycloak_client_id),
            encode(refresh_token)
        );
        match self.token_request(form).await {
            Ok(tokens) => self.install(tokens),
            Err(e) => {
                self.clear_session();
                Err(e)
            }
        }
    }

    async fn token_request(&self, form: String) -> Result<TokenResponse, AuthError> {
        let response = gloo_net::http::Request::post(&self.token_endpoint())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(form)
            .map_err(|e| AuthError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected(format!(
                "status {}: {body}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))
    }
}

// Server-side stubs; all identity work happens in the browser.
#[cfg(feature = "ssr")]
impl KeycloakAuth {
    pub async fn init(&self, _policy: LoadPolicy) -> Result<InitOutcome, AuthError> {
        Ok(InitOutcome::Anonymous)
    }

    pub async fn update_token(&self, _min_validity_secs: u32) -> Result<bool, AuthError> {
        Ok(false)
    }

    pub fn login(&self) -> PendingRedirect {
        PendingRedirect::new(self.auth_endpoint())
    }

    pub fn logout(&self) -> PendingRedirect {
        self.clear_session();
        PendingRedirect::new(self.logout_endpoint())
    }
}

impl super::guard::IdentityProvider for KeycloakAuth {
    fn is_authenticated(&self) -> bool {
        KeycloakAuth::is_authenticated(self)
    }

    fn has_role(&self, role: &str) -> bool {
        KeycloakAuth::has_role(self, role)
    }

    fn login(&self) -> PendingRedirect {
        KeycloakAuth::login(self)
    }

    async fn init(&self, policy: LoadPolicy) -> Result<InitOutcome, AuthError> {
        KeycloakAuth::init(self, policy).await
    }
}

/// S256 code challenge for a PKCE verifier.
pub(crate) fn pkce_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

#[cfg(not(feature = "ssr"))]
fn random_bytes() -> Result<[u8; 32], AuthError> {
    let window = web_sys::window().ok_or_else(|| AuthError::Platform("no window".to_string()))?;
    let crypto = window
        .crypto()
        .map_err(|e| AuthError::Platform(format!("{e:?}")))?;
    let mut buf = [0u8; 32];
    crypto
        .get_random_values_with_u8_array(&mut buf)
        .map_err(|e| AuthError::Platform(format!("{e:?}")))?;
    Ok(buf)
}

#[cfg(not(feature = "ssr"))]
fn encode(value: &str) -> String {
    String::from(js_sys::encode_uri_component(value))
}

#[cfg(not(feature = "ssr"))]
fn current_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(not(feature = "ssr"))]
fn current_page_uri() -> Option<String> {
    let location = web_sys::window()?.location();
    Some(format!(
        "{}{}",
        location.origin().ok()?,
        location.pathname().ok()?
    ))
}

fn now_epoch_secs() -> f64 {
    #[cfg(not(feature = "ssr"))]
    {
        js_sys::Date::now() / 1000.0
    }
    #[cfg(feature = "ssr")]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

#[cfg(not(feature = "ssr"))]
fn persist_refresh_token(refresh_token: &str) {
    let stored = StoredSession {
        refresh_token: refresh_token.to_string(),
    };
    if let Ok(json) = serde_json::to_string(&stored) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(STORAGE_KEY_SESSION, &json);
        }
    }
}

#[cfg(not(feature = "ssr"))]
fn load_persisted_refresh_token() -> Option<String> {
    let storage = local_storage()?;
    let json = storage.get_item(STORAGE_KEY_SESSION).ok()??;
    let stored: StoredSession = serde_json::from_str(&json).ok()?;
    Some(stored.refresh_token)
}

#[cfg(not(feature = "ssr"))]
fn clear_persisted_refresh_token() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(STORAGE_KEY_SESSION);
    }
}

#[cfg(not(feature = "ssr"))]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(feature = "ssr")]
fn persist_refresh_token(_refresh_token: &str) {}

#[cfg(feature = "ssr")]
fn clear_persisted_refresh_token() {}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use serde_json::json;

    fn config() -> AppConfig {
        AppConfig {
            keycloak_url: "https://sso.example.org".to_string(),
            keycloak_realm: "portal".to_string(),
            keycloak_client_id: "node".to_string(),
            api_url: String::new(),
        }
    }

    fn token_with(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.signature")
    }

    #[test]
    fn endpoints_follow_realm_layout() {
        let _owner = Owner::new_root(None);
        let auth = KeycloakAuth::new(config());
        assert_eq!(
            auth.auth_endpoint(),
            "https://sso.example.org/realms/portal/protocol/openid-connect/auth"
        );
        assert_eq!(
            auth.token_endpoint(),
            "https://sso.example.org/realms/portal/protocol/openid-connect/token"
        );
        assert_eq!(
            auth.logout_endpoint(),
            "https://sso.example.org/realms/portal/protocol/openid-connect/logout"
        );
    }

    #[test]
    fn pkce_challenge_matches_rfc7636_vector() {
        assert_eq!(
            pkce_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
    }

    #[test]
    fn session_validity_tracks_expiry() {
        let session = Session {
            access_token: "t".to_string(),
            refresh_token: None,
            expires_at: 1_000.0,
            claims: Claims::new(),
        };
        assert!(session.is_valid(900.0));
        assert!(!session.is_valid(1_000.0));
        assert!((session.remaining_secs(990.0) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unauthenticated_provider_answers_safely() {
        let _owner = Owner::new_root(None);
        let auth = KeycloakAuth::new(config());
        assert!(!auth.is_authenticated());
        assert!(!auth.has_role("coach"));
        assert_eq!(auth.token(), None);
        assert_eq!(auth.profile(), None);
        assert_eq!(auth.external_contact_id(), None);
    }

    #[test]
    fn installed_session_exposes_claims() {
        let _owner = Owner::new_root(None);
        let auth = KeycloakAuth::new(config());
        let tokens = TokenResponse {
            access_token: token_with(json!({
                "preferred_username": "ada",
                "realm_access": {"roles": ["coach"]},
                "dolibarr_contact_id": "42"
            })),
            refresh_token: None,
            expires_in: 300.0,
        };
        auth.install(tokens).expect("install");
        assert!(auth.is_authenticated());
        assert!(auth.has_role("coach"));
        assert!(!auth.has_role("admin"));
        assert_eq!(auth.external_contact_id(), Some(42));
        assert_eq!(auth.profile().map(|p| p.username), Some("ada".to_string()));
    }

    #[test]
    fn expired_token_means_unauthenticated() {
        let _owner = Owner::new_root(None);
        let auth = KeycloakAuth::new(config());
        let tokens = TokenResponse {
            access_token: token_with(json!({"realm_access": {"roles": ["coach"]}})),
            refresh_token: None,
            expires_in: -10.0,
        };
        auth.install(tokens).expect("install");
        assert!(!auth.is_authenticated());
        assert!(!auth.has_role("coach"), "roles require a live session");
        assert_eq!(auth.profile(), None);
    }
}
