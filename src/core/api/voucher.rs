//! Voucher validation.
//!
//! The backend answers a voucher lookup with `{type, data?, message}`. The
//! classification below is relied upon by the enrollment forms: the forced
//! invoice-address fields are populated if and only if the voucher type is
//! the address-bound kind. Results are built fresh per call and never cached.

use serde_json::Value;

/// Type tag the backend uses for an unusable code.
pub const VOUCHER_ERROR_TAG: &str = "error";

/// Recognized voucher kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoucherKind {
    /// Tag "1": the voucher forces a specific invoice address.
    InvoiceAddressBound,
    /// Tag "2": recorded as-is; downstream effect is the caller's decision.
    General,
}

impl VoucherKind {
    pub fn tag(self) -> &'static str {
        match self {
            VoucherKind::InvoiceAddressBound => "1",
            VoucherKind::General => "2",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "1" => Some(VoucherKind::InvoiceAddressBound),
            "2" => Some(VoucherKind::General),
            _ => None,
        }
    }
}

/// Per-request validation result.
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherValidation {
    pub valid: bool,
    pub voucher_type: Option<VoucherKind>,
    /// Populated iff `voucher_type` is [`VoucherKind::InvoiceAddressBound`].
    pub invoice_address_id: Option<i64>,
    pub invoice_address_name: Option<String>,
    pub message: String,
    /// Raw backend payload, untouched.
    pub raw: Value,
}

/// Classify a voucher-lookup payload. Valid unless the type tag equals the
/// error tag; a missing tag counts as an error payload.
pub fn classify(raw: Value) -> VoucherValidation {
    let tag = raw
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or(VOUCHER_ERROR_TAG)
        .to_string();
    let message = raw
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    if tag == VOUCHER_ERROR_TAG {
        return VoucherValidation {
            valid: false,
            voucher_type: None,
            invoice_address_id: None,
            invoice_address_name: None,
            message,
            raw,
        };
    }

    let voucher_type = VoucherKind::from_tag(&tag);
    let (invoice_address_id, invoice_address_name) =
        if voucher_type == Some(VoucherKind::InvoiceAddressBound) {
            (
                raw.pointer("/data/id").and_then(as_id),
                raw.pointer("/data/name")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            )
        } else {
            (None, None)
        };

    VoucherValidation {
        valid: true,
        voucher_type,
        invoice_address_id,
        invoice_address_name,
        message,
        raw,
    }
}

/// Dolibarr serializes ids either as numbers or numeric strings.
fn as_id(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_payload_is_invalid_with_no_type_or_address() {
        let result = classify(json!({"type": "error", "message": "unknown code"}));
        assert!(!result.valid);
        assert_eq!(result.voucher_type, None);
        assert_eq!(result.invoice_address_id, None);
        assert_eq!(result.invoice_address_name, None);
        assert_eq!(result.message, "unknown code");
    }

    #[test]
    fn address_bound_voucher_extracts_the_forced_address() {
        let result = classify(json!({
            "type": "1",
            "data": {"id": 7, "name": "ACME"},
            "message": "ok"
        }));
        assert!(result.valid);
        assert_eq!(result.voucher_type, Some(VoucherKind::InvoiceAddressBound));
        assert_eq!(result.invoice_address_id, Some(7));
        assert_eq!(result.invoice_address_name, Some("ACME".to_string()));
    }

    #[test]
    fn address_bound_voucher_accepts_string_ids() {
        let result = classify(json!({"type": "1", "data": {"id": "7", "name": "ACME"}}));
        assert_eq!(result.invoice_address_id, Some(7));
    }

    #[test]
    fn general_voucher_records_the_type_without_address() {
        let result = classify(json!({"type": "2"}));
        assert!(result.valid);
        assert_eq!(result.voucher_type, Some(VoucherKind::General));
        assert_eq!(result.invoice_address_id, None);
        assert_eq!(result.invoice_address_name, None);
    }

    #[test]
    fn unrecognized_tag_is_valid_with_no_kind() {
        let result = classify(json!({"type": "3", "data": {"id": 9, "name": "X"}}));
        assert!(result.valid);
        assert_eq!(result.voucher_type, None);
        // Address fields only follow the address-bound kind.
        assert_eq!(result.invoice_address_id, None);
    }

    #[test]
    fn missing_tag_counts_as_error() {
        let result = classify(json!({"message": "malformed"}));
        assert!(!result.valid);
        assert_eq!(result.voucher_type, None);
    }

    #[test]
    fn raw_payload_is_preserved() {
        let payload = json!({"type": "2", "extra": {"note": "kept"}});
        let result = classify(payload.clone());
        assert_eq!(result.raw, payload);
    }
}
