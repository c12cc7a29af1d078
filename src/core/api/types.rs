//! Wire types for the DRAHT node API.
//!
//! Shapes tolerate backend variance: listing payloads are Option-heavy with
//! serde defaults, request bodies serialize exactly the fields the API
//! expects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Address-book entry for delivery/invoice selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
}

/// Body for `POST /teams` and `POST /classes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequest {
    pub name: String,
    pub location: String,
    pub organization: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher: Option<String>,
    pub delivery_address: i64,
    pub invoice_address: i64,
}

/// Body for `POST /future`: the base enrollment plus the group code and the
/// pupil count chosen in the second step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureEnrollmentRequest {
    #[serde(flatten)]
    pub enrollment: EnrollmentRequest,
    pub group: String,
    pub pupils: u8,
}

/// Roster entry for `PUT /teams/{id}/players`. The list order is meaningful
/// and preserved as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub firstname: String,
    pub name: String,
    pub gender: String,
    pub birthday: Option<NaiveDate>,
}

/// Body for `PUT /teams/{id}/versandaufschub`. `None` clears the deferral,
/// so the field must serialize as an explicit null.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipmentDeferral {
    pub versandaufschub: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub program: Option<i64>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub versandaufschub: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub program: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enrollment_request_uses_backend_field_names() {
        let request = EnrollmentRequest {
            name: "Robo Foxes".to_string(),
            location: "Leipzig".to_string(),
            organization: "Grundschule Mitte".to_string(),
            voucher: Some("SPRING24".to_string()),
            delivery_address: 11,
            invoice_address: 12,
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            json!({
                "name": "Robo Foxes",
                "location": "Leipzig",
                "organization": "Grundschule Mitte",
                "voucher": "SPRING24",
                "deliveryAddress": 11,
                "invoiceAddress": 12,
            })
        );
    }

    #[test]
    fn absent_voucher_is_omitted() {
        let request = EnrollmentRequest {
            name: "n".to_string(),
            location: "l".to_string(),
            organization: "o".to_string(),
            voucher: None,
            delivery_address: 1,
            invoice_address: 1,
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert!(value.get("voucher").is_none());
    }

    #[test]
    fn future_enrollment_flattens_the_base_body() {
        let request = FutureEnrollmentRequest {
            enrollment: EnrollmentRequest {
                name: "Group 5 East".to_string(),
                location: "Dresden".to_string(),
                organization: "Hort Sonnenblume".to_string(),
                voucher: None,
                delivery_address: 3,
                invoice_address: 3,
            },
            group: "5".to_string(),
            pupils: 16,
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["group"], "5");
        assert_eq!(value["pupils"], 16);
        assert_eq!(value["deliveryAddress"], 3);
        assert_eq!(value["name"], "Group 5 East");
    }

    #[test]
    fn shipment_deferral_serializes_explicit_null() {
        let cleared = ShipmentDeferral {
            versandaufschub: None,
        };
        assert_eq!(
            serde_json::to_value(cleared).expect("serialize"),
            json!({"versandaufschub": null})
        );

        let set = ShipmentDeferral {
            versandaufschub: NaiveDate::from_ymd_opt(2026, 3, 1),
        };
        assert_eq!(
            serde_json::to_value(set).expect("serialize"),
            json!({"versandaufschub": "2026-03-01"})
        );
    }

    #[test]
    fn player_birthday_round_trips_as_date_string() {
        let player = Player {
            firstname: "Mia".to_string(),
            name: "Schmidt".to_string(),
            gender: "f".to_string(),
            birthday: NaiveDate::from_ymd_opt(2016, 7, 24),
        };
        let value = serde_json::to_value(&player).expect("serialize");
        assert_eq!(value["birthday"], "2016-07-24");
        let back: Player = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, player);
    }

    #[test]
    fn team_listing_tolerates_sparse_records() {
        let team: Team = serde_json::from_value(json!({"id": 9, "name": "Robo Foxes"}))
            .expect("deserialize");
        assert_eq!(team.id, 9);
        assert!(team.players.is_empty());
        assert_eq!(team.versandaufschub, None);
    }
}
