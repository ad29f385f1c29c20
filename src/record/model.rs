//! Plain record types for one AFTO Form 781 mission day.
//!
//! Everything the form receives is opaque short text. The core performs no
//! numeric parsing, formatting or localization; values are written to the
//! template exactly as given, and absent optional values become empty text.

use serde::{Deserialize, Serialize};

/// One complete form worth of data: header block, flight legs and crew rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormRecord {
    pub date: String,
    /// Mission design series, e.g. "SMC017A".
    pub mds: String,
    pub serial_number: String,
    pub unit_charged: String,
    pub harm_location: String,
    pub flight_auth_number: String,
    pub issuing_unit: String,

    /// Derived totals; carried for callers that compute them, never written
    /// to the template by the projector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grand_total_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grand_total_touch_go: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grand_total_full_stop: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grand_total_landings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grand_total_sorties: Option<u32>,

    #[serde(default)]
    pub flights: Vec<FlightLeg>,
    #[serde(default)]
    pub crew_members: Vec<CrewMember>,
}

/// One flight-data row. The template holds at most six of these, all on the
/// front page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightLeg {
    /// Sequence tag ("a", "b", ...). Kept on the record, not a form field.
    pub flight_seq: String,
    pub mission_number: String,
    pub mission_symbol: String,
    pub from_icao: String,
    pub to_icao: String,
    pub take_off_time: String,
    pub land_time: String,
    pub total_time: String,
    pub touch_and_go: String,
    pub full_stop: String,
    pub total_landings: String,
    pub sorties: String,
    pub special_use: String,
}

/// One crew-member row. Rows 0..15 land on the front page, rows 15..35 on
/// the back page; anything past that is dropped by the projector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrewMember {
    pub last_name: String,
    /// Not a form field; kept so callers can round-trip full names.
    #[serde(default)]
    pub first_name: String,
    pub ssan_last4: String,
    /// Flight authorization duty code, e.g. "IP B5".
    pub duty_code: String,
    pub organization: String,

    // Flying-time and flight-condition categories, numeric-as-text.
    #[serde(default)]
    pub primary: Option<String>,
    #[serde(default)]
    pub secondary: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub evaluator: Option<String>,
    #[serde(default)]
    pub other: Option<String>,
    #[serde(default)]
    pub total_time: Option<String>,
    #[serde(default)]
    pub sorties: Option<String>,
    #[serde(default)]
    pub night: Option<String>,
    #[serde(default)]
    pub instrument: Option<String>,
    #[serde(default)]
    pub sim_instrument: Option<String>,
    #[serde(default)]
    pub nvg: Option<String>,
    #[serde(default)]
    pub combat_time: Option<String>,
    #[serde(default)]
    pub combat_sorties: Option<String>,
    #[serde(default)]
    pub combat_support_time: Option<String>,

    /// Reserve status code: "1".."4", "33" or blank.
    #[serde(default)]
    pub resv_status: Option<String>,
}
