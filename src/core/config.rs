//! Application configuration.
//!
//! The server reads environment variables at runtime (after `dotenvy::dotenv()`);
//! the WASM bundle gets the same values baked in at compile time via `option_env!`,
//! since the browser has no process environment.

const DEFAULT_KEYCLOAK_URL: &str = "https://sso.hands-on-technology.org";
const DEFAULT_KEYCLOAK_REALM: &str = "master";
const DEFAULT_KEYCLOAK_CLIENT_ID: &str = "node";
/// Empty base means same-origin (deployment behind the API proxy).
const DEFAULT_API_URL: &str = "";

/// Identity-provider and backend endpoints the portal talks to.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Keycloak base URL
    pub keycloak_url: String,
    /// Keycloak realm (tenant) name
    pub keycloak_realm: String,
    /// OIDC client id registered for this portal
    pub keycloak_client_id: String,
    /// DRAHT API base URL; the `/handson/node` and `/handson` segments are
    /// appended by the API client
    pub api_url: String,
}

impl AppConfig {
    /// Configuration baked into the client bundle at compile time.
    pub fn load() -> Self {
        Self {
            keycloak_url: option_env!("KEYCLOAK_URL")
                .unwrap_or(DEFAULT_KEYCLOAK_URL)
                .to_string(),
            keycloak_realm: option_env!("KEYCLOAK_REALM")
                .unwrap_or(DEFAULT_KEYCLOAK_REALM)
                .to_string(),
            keycloak_client_id: option_env!("KEYCLOAK_CLIENT_ID")
                .unwrap_or(DEFAULT_KEYCLOAK_CLIENT_ID)
                .to_string(),
            api_url: option_env!("DRAHT_API_URL")
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
        }
    }

    /// Load configuration from environment variables (server side).
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    #[cfg(feature = "ssr")]
    pub fn from_env() -> Self {
        Self {
            keycloak_url: std::env::var("KEYCLOAK_URL")
                .unwrap_or_else(|_| DEFAULT_KEYCLOAK_URL.to_string()),
            keycloak_realm: std::env::var("KEYCLOAK_REALM")
                .unwrap_or_else(|_| DEFAULT_KEYCLOAK_REALM.to_string()),
            keycloak_client_id: std::env::var("KEYCLOAK_CLIENT_ID")
                .unwrap_or_else(|_| DEFAULT_KEYCLOAK_CLIENT_ID.to_string()),
            api_url: std::env::var("DRAHT_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_falls_back_to_defaults() {
        let config = AppConfig::load();
        assert!(!config.keycloak_url.is_empty());
        assert!(!config.keycloak_realm.is_empty());
        assert!(!config.keycloak_client_id.is_empty());
    }

    #[test]
    fn config_fields_round_trip() {
        let config = AppConfig {
            keycloak_url: "https://sso.example.org".to_string(),
            keycloak_realm: "portal".to_string(),
            keycloak_client_id: "node".to_string(),
            api_url: "https://api.example.org".to_string(),
        };
        assert_eq!(config.keycloak_url, "https://sso.example.org");
        assert_eq!(config.api_url, "https://api.example.org");
    }
}
