//! Access-token claim extraction.
//!
//! The backend verifies token signatures; the frontend only decodes the
//! payload segment to read display data and role membership.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

use super::AuthError;

/// Decoded token payload, kept as an opaque JSON mapping.
pub type Claims = serde_json::Map<String, Value>;

/// Claim holding the realm-wide role set (`realm_access.roles`).
pub const REALM_ACCESS_CLAIM: &str = "realm_access";

/// Claim name for the coach's Dolibarr contact id. Must match the Keycloak
/// mapper and the DRAHT middleware config.
pub const CONTACT_ID_CLAIM: &str = "dolibarr_contact_id";

/// Decode the payload segment of a compact JWT without verifying it.
pub fn decode_claims(access_token: &str) -> Result<Claims, AuthError> {
    let payload = access_token
        .split('.')
        .nth(1)
        .ok_or_else(|| AuthError::MalformedToken("missing payload segment".to_string()))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| AuthError::MalformedToken(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| AuthError::MalformedToken(e.to_string()))
}

/// True iff the realm-role set contains `role`. Absent or oddly shaped
/// claims count as "no roles".
pub fn has_realm_role(claims: &Claims, role: &str) -> bool {
    claims
        .get(REALM_ACCESS_CLAIM)
        .and_then(|v| v.get("roles"))
        .and_then(Value::as_array)
        .is_some_and(|roles| roles.iter().any(|r| r.as_str() == Some(role)))
}

/// Dolibarr contact id for the current coach, exposed in the token as a user
/// attribute. The frontend never sends it explicitly; DRAHT reads it from the
/// bearer token.
///
/// Returns `None` for a missing, empty or non-numeric claim.
pub fn external_contact_id(claims: &Claims) -> Option<i64> {
    match claims.get(CONTACT_ID_CLAIM)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) if !s.is_empty() => s.parse().ok(),
        _ => None,
    }
}

/// Display profile derived from the standard OIDC claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub username: String,
    pub picture: String,
}

pub fn profile(claims: &Claims) -> Profile {
    let get = |key: &str| claims.get(key).and_then(Value::as_str).map(str::to_string);
    Profile {
        name: get("name")
            .or_else(|| get("preferred_username"))
            .unwrap_or_else(|| "Coach".to_string()),
        email: get("email").unwrap_or_default(),
        username: get("preferred_username").unwrap_or_default(),
        picture: get("picture").unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token_with(claims: Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.signature")
    }

    fn claims_of(value: Value) -> Claims {
        decode_claims(&token_with(value)).expect("decode")
    }

    #[test]
    fn decodes_payload_segment() {
        let claims = claims_of(json!({"preferred_username": "ada", "email": "ada@example.org"}));
        assert_eq!(claims["preferred_username"], "ada");
        assert_eq!(claims["email"], "ada@example.org");
    }

    #[test]
    fn rejects_tokens_without_payload() {
        assert!(decode_claims("garbage").is_err());
        assert!(decode_claims("a.!!!.c").is_err());
    }

    #[test]
    fn role_membership_from_realm_access() {
        let claims = claims_of(json!({"realm_access": {"roles": ["coach", "offline_access"]}}));
        assert!(has_realm_role(&claims, "coach"));
        assert!(!has_realm_role(&claims, "admin"));
    }

    #[test]
    fn role_check_never_errors_on_odd_shapes() {
        assert!(!has_realm_role(&claims_of(json!({})), "coach"));
        assert!(!has_realm_role(&claims_of(json!({"realm_access": 3})), "coach"));
        assert!(!has_realm_role(
            &claims_of(json!({"realm_access": {"roles": "coach"}})),
            "coach"
        ));
    }

    #[test]
    fn contact_id_parses_numeric_string() {
        let claims = claims_of(json!({"dolibarr_contact_id": "42"}));
        assert_eq!(external_contact_id(&claims), Some(42));
    }

    #[test]
    fn contact_id_accepts_json_number() {
        let claims = claims_of(json!({"dolibarr_contact_id": 42}));
        assert_eq!(external_contact_id(&claims), Some(42));
    }

    #[test]
    fn contact_id_is_none_for_missing_empty_or_non_numeric() {
        assert_eq!(external_contact_id(&claims_of(json!({}))), None);
        assert_eq!(
            external_contact_id(&claims_of(json!({"dolibarr_contact_id": ""}))),
            None
        );
        assert_eq!(
            external_contact_id(&claims_of(json!({"dolibarr_contact_id": "abc"}))),
            None
        );
        assert_eq!(
            external_contact_id(&claims_of(json!({"dolibarr_contact_id": null}))),
            None
        );
    }

    #[test]
    fn profile_falls_back_to_username_then_default() {
        let full = profile(&claims_of(json!({
            "name": "Ada Lovelace",
            "preferred_username": "ada",
            "email": "ada@example.org"
        })));
        assert_eq!(full.name, "Ada Lovelace");
        assert_eq!(full.username, "ada");

        let username_only = profile(&claims_of(json!({"preferred_username": "ada"})));
        assert_eq!(username_only.name, "ada");

        let bare = profile(&claims_of(json!({})));
        assert_eq!(bare.name, "Coach");
        assert_eq!(bare.email, "");
    }
}
