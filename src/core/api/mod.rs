//! DRAHT API client.
//!
//! One client instance carries both backend namespaces: the node resources
//! under `/handson/node` and the sibling voucher namespace under `/handson`.
//! Every outgoing request first tops up the access token, then attaches the
//! bearer credential twice (intermediaries are known to strip the standard
//! header) plus the fixed tenant header. Error statuses, 401 included,
//! propagate unmodified to the calling view; the next user-initiated request
//! goes through the normal refresh path.

pub mod documents;
pub mod types;
pub mod voucher;

use std::sync::Arc;

use crate::core::auth::{AuthError, KeycloakAuth};
use crate::core::config::AppConfig;

pub use documents::DocumentHandle;
pub use types::{
    Address, Class, EnrollmentRequest, FutureEnrollmentRequest, Player, ShipmentDeferral, Team,
};
pub use voucher::{VoucherKind, VoucherValidation};

/// Path segment of the node resource namespace.
pub const NODE_API_SEGMENT: &str = "/handson/node";
/// Path segment of the sibling namespace (voucher lookups).
pub const HANDSON_API_SEGMENT: &str = "/handson";

pub const AUTH_HEADER: &str = "Authorization";
/// Fallback read by the DRAHT middleware when a proxy strips `Authorization`.
pub const FALLBACK_AUTH_HEADER: &str = "X-Authorization";
/// Forces entity 1 so api_access resolves the technical user under
/// multi-entity setups.
pub const TENANT_HEADER: &str = "DOLAPIENTITY";
pub const TENANT_ENTITY: &str = "1";

/// Minimum remaining token validity required before dispatching a request.
pub const MIN_TOKEN_VALIDITY_SECS: u32 = 5;

/// Errors surfaced by API calls. Views own the user-facing presentation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("request failed: {0}")]
    Network(String),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("not available during server rendering")]
    Unsupported,
}

impl ApiError {
    /// True for a 401 response. Not retried automatically; the next
    /// user-initiated request triggers the refresh path.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401, .. })
    }
}

/// Headers attached to every outgoing request. The bearer value, when
/// present, is sent under both header names with identical content.
pub fn request_headers(token: Option<&str>) -> Vec<(&'static str, String)> {
    let mut headers = vec![(TENANT_HEADER, TENANT_ENTITY.to_string())];
    if let Some(token) = token {
        let value = format!("Bearer {token}");
        headers.push((AUTH_HEADER, value.clone()));
        headers.push((FALLBACK_AUTH_HEADER, value));
    }
    headers
}

/// Lookup path within the sibling namespace; varies with the presence of a
/// program id. `code` must already be path-encoded.
fn voucher_path(program: Option<i64>, code: &str) -> String {
    match program {
        Some(program) => format!("/voucher/{program}/{code}"),
        None => format!("/voucher/{code}"),
    }
}

/// Preconfigured HTTP client for the DRAHT backend.
#[derive(Clone)]
pub struct ApiClient {
    node_base: String,
    handson_base: String,
    auth: Arc<KeycloakAuth>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, auth: Arc<KeycloakAuth>) -> Self {
        Self {
            node_base: format!("{}{NODE_API_SEGMENT}", config.api_url),
            handson_base: format!("{}{HANDSON_API_SEGMENT}", config.api_url),
            auth,
        }
    }

    fn node_url(&self, path: &str) -> String {
        format!("{}{path}", self.node_base)
    }

    fn handson_url(&self, path: &str) -> String {
        format!("{}{path}", self.handson_base)
    }
}

#[cfg(not(feature = "ssr"))]
mod client {
    use gloo_net::http::{Method, RequestBuilder, Response};
    use serde::Serialize;
    use serde::de::DeserializeOwned;

    use super::*;

    fn encode(value: &str) -> String {
        String::from(js_sys::encode_uri_component(value))
    }

    impl ApiClient {
        /// List address book entries for the current user (delivery/invoice).
        pub async fn addresses(&self) -> Result<Vec<Address>, ApiError> {
            self.get_json(&self.node_url("/addresses")).await
        }

        /// Enroll a team.
        pub async fn enroll_team(
            &self,
            request: &EnrollmentRequest,
        ) -> Result<serde_json::Value, ApiError> {
            self.post_json(&self.node_url("/teams"), request).await
        }

        /// Enroll a class.
        pub async fn enroll_class(
            &self,
            request: &EnrollmentRequest,
        ) -> Result<serde_json::Value, ApiError> {
            self.post_json(&self.node_url("/classes"), request).await
        }

        /// Enroll a future-edition group.
        pub async fn enroll_future(
            &self,
            request: &FutureEnrollmentRequest,
        ) -> Result<serde_json::Value, ApiError> {
            self.post_json(&self.node_url("/future"), request).await
        }

        /// List enrolled teams for the current coach.
        pub async fn teams(&self) -> Result<Vec<Team>, ApiError> {
            self.get_json(&self.node_url("/teams")).await
        }

        /// List enrolled classes for the current coach.
        pub async fn classes(&self) -> Result<Vec<Class>, ApiError> {
            self.get_json(&self.node_url("/classes")).await
        }

        pub async fn team(&self, id: i64) -> Result<Team, ApiError> {
            self.get_json(&self.node_url(&format!("/teams/{id}"))).await
        }

        pub async fn class(&self, id: i64) -> Result<Class, ApiError> {
            self.get_json(&self.node_url(&format!("/classes/{id}"))).await
        }

        /// Replace a team's player roster; order is preserved.
        pub async fn update_players(
            &self,
            team_id: i64,
            players: &[Player],
        ) -> Result<(), ApiError> {
            self.put_json(&self.node_url(&format!("/teams/{team_id}/players")), &players)
                .await
        }

        /// Set or clear a team's shipment deferral date.
        pub async fn update_shipment_deferral(
            &self,
            team_id: i64,
            versandaufschub: Option<chrono::NaiveDate>,
        ) -> Result<(), ApiError> {
            self.put_json(
                &self.node_url(&format!("/teams/{team_id}/versandaufschub")),
                &ShipmentDeferral { versandaufschub },
            )
            .await
        }

        /// Fetch a team document as a blob handle. The caller releases the
        /// handle after use.
        pub async fn team_document(
            &self,
            team_id: i64,
            doc_type: &str,
            reference: &str,
        ) -> Result<DocumentHandle, ApiError> {
            self.fetch_document(&self.node_url(&format!(
                "/teams/{team_id}/documents/{}/{}",
                encode(doc_type),
                encode(reference)
            )))
            .await
        }

        /// Fetch a class document as a blob handle.
        pub async fn class_document(
            &self,
            class_id: i64,
            doc_type: &str,
            reference: &str,
        ) -> Result<DocumentHandle, ApiError> {
            self.fetch_document(&self.node_url(&format!(
                "/classes/{class_id}/documents/{}/{}",
                encode(doc_type),
                encode(reference)
            )))
            .await
        }

        /// Validate a voucher code, optionally scoped to a program.
        pub async fn validate_voucher(
            &self,
            code: &str,
            program: Option<i64>,
        ) -> Result<VoucherValidation, ApiError> {
            let url = self.handson_url(&voucher_path(program, &encode(code)));
            let raw: serde_json::Value = self.get_json(&url).await?;
            Ok(voucher::classify(raw))
        }

        /// Top up the token and build a request with the standard headers.
        async fn builder(&self, method: Method, url: &str) -> Result<RequestBuilder, ApiError> {
            self.auth.update_token(MIN_TOKEN_VALIDITY_SECS).await?;
            let mut request = RequestBuilder::new(url).method(method);
            for (name, value) in request_headers(self.auth.token().as_deref()) {
                request = request.header(name, &value);
            }
            Ok(request)
        }

        async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
            let response = self
                .builder(Method::GET, url)
                .await?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            Self::into_json(response).await
        }

        async fn post_json<B: Serialize, T: DeserializeOwned>(
            &self,
            url: &str,
            body: &B,
        ) -> Result<T, ApiError> {
            let response = self
                .builder(Method::POST, url)
                .await?
                .json(body)
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            Self::into_json(response).await
        }

        async fn put_json<B: Serialize>(&self, url: &str, body: &B) -> Result<(), ApiError> {
            let response = self
                .builder(Method::PUT, url)
                .await?
                .json(body)
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            if !response.ok() {
                return Err(Self::status_error(response).await);
            }
            Ok(())
        }

        async fn fetch_document(&self, url: &str) -> Result<DocumentHandle, ApiError> {
            let response = self
                .builder(Method::GET, url)
                .await?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            if !response.ok() {
                return Err(Self::status_error(response).await);
            }
            let mime = response.headers().get("content-type");
            let bytes = response
                .binary()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            DocumentHandle::from_bytes(&bytes, mime.as_deref())
        }

        async fn into_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
            if !response.ok() {
                return Err(Self::status_error(response).await);
            }
            response
                .json()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        }

        async fn status_error(response: Response) -> ApiError {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            ApiError::Status { status, body }
        }
    }
}

// Server-side stubs; all backend traffic originates in the browser.
#[cfg(feature = "ssr")]
impl ApiClient {
    pub async fn addresses(&self) -> Result<Vec<Address>, ApiError> {
        Err(ApiError::Unsupported)
    }

    pub async fn enroll_team(
        &self,
        _request: &EnrollmentRequest,
    ) -> Result<serde_json::Value, ApiError> {
        Err(ApiError::Unsupported)
    }

    pub async fn enroll_class(
        &self,
        _request: &EnrollmentRequest,
    ) -> Result<serde_json::Value, ApiError> {
        Err(ApiError::Unsupported)
    }

    pub async fn enroll_future(
        &self,
        _request: &FutureEnrollmentRequest,
    ) -> Result<serde_json::Value, ApiError> {
        Err(ApiError::Unsupported)
    }

    pub async fn teams(&self) -> Result<Vec<Team>, ApiError> {
        Err(ApiError::Unsupported)
    }

    pub async fn classes(&self) -> Result<Vec<Class>, ApiError> {
        Err(ApiError::Unsupported)
    }

    pub async fn team(&self, _id: i64) -> Result<Team, ApiError> {
        Err(ApiError::Unsupported)
    }

    pub async fn class(&self, _id: i64) -> Result<Class, ApiError> {
        Err(ApiError::Unsupported)
    }

    pub async fn update_players(
        &self,
        _team_id: i64,
        _players: &[Player],
    ) -> Result<(), ApiError> {
        Err(ApiError::Unsupported)
    }

    pub async fn update_shipment_deferral(
        &self,
        _team_id: i64,
        _versandaufschub: Option<chrono::NaiveDate>,
    ) -> Result<(), ApiError> {
        Err(ApiError::Unsupported)
    }

    pub async fn team_document(
        &self,
        _team_id: i64,
        _doc_type: &str,
        _reference: &str,
    ) -> Result<DocumentHandle, ApiError> {
        Err(ApiError::Unsupported)
    }

    pub async fn class_document(
        &self,
        _class_id: i64,
        _doc_type: &str,
        _reference: &str,
    ) -> Result<DocumentHandle, ApiError> {
        Err(ApiError::Unsupported)
    }

    pub async fn validate_voucher(
        &self,
        _code: &str,
        _program: Option<i64>,
    ) -> Result<VoucherValidation, ApiError> {
        Err(ApiError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        let config = AppConfig {
            keycloak_url: "https://sso.example.org".to_string(),
            keycloak_realm: "portal".to_string(),
            keycloak_client_id: "node".to_string(),
            api_url: "https://backend.example.org".to_string(),
        };
        let auth = Arc::new(KeycloakAuth::new(config.clone()));
        ApiClient::new(&config, auth)
    }

    #[test]
    fn both_namespaces_share_the_configured_base() {
        let _owner = leptos::prelude::Owner::new_root(None);
        let client = client();
        assert_eq!(
            client.node_url("/teams"),
            "https://backend.example.org/handson/node/teams"
        );
        assert_eq!(
            client.handson_url("/voucher/X"),
            "https://backend.example.org/handson/voucher/X"
        );
    }

    #[test]
    fn headers_carry_the_token_twice_with_identical_values() {
        let headers = request_headers(Some("tok123"));
        let auth: Vec<_> = headers
            .iter()
            .filter(|(name, _)| *name == AUTH_HEADER || *name == FALLBACK_AUTH_HEADER)
            .collect();
        assert_eq!(auth.len(), 2);
        assert_eq!(auth[0].1, "Bearer tok123");
        assert_eq!(auth[0].1, auth[1].1);
    }

    #[test]
    fn tenant_header_is_always_present() {
        for token in [None, Some("tok")] {
            let headers = request_headers(token);
            assert!(
                headers
                    .iter()
                    .any(|(name, value)| *name == TENANT_HEADER && value == TENANT_ENTITY)
            );
        }
    }

    #[test]
    fn no_token_means_no_auth_headers() {
        let headers = request_headers(None);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].0, TENANT_HEADER);
    }

    #[test]
    fn voucher_path_varies_with_program_scope() {
        assert_eq!(voucher_path(None, "SPRING24"), "/voucher/SPRING24");
        assert_eq!(voucher_path(Some(2), "SPRING24"), "/voucher/2/SPRING24");
    }

    #[test]
    fn unauthorized_detection_matches_401_only() {
        assert!(
            ApiError::Status {
                status: 401,
                body: String::new()
            }
            .is_unauthorized()
        );
        assert!(
            !ApiError::Status {
                status: 403,
                body: String::new()
            }
            .is_unauthorized()
        );
        assert!(!ApiError::Network("boom".to_string()).is_unauthorized());
    }
}
