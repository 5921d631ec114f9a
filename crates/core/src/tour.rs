//! Tour value objects and the parsers for their serialized form fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Error message for any rejected priority value.
pub const INVALID_PRIORITY_MESSAGE: &str = "Invalid priority value";

/// One day of a tour itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub day: i32,
    pub title: String,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub overnight: String,
    #[serde(default)]
    pub included: Vec<String>,
}

/// Bank transfer details printed on the booking page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankDetails {
    pub account_name: String,
    pub sort_code: String,
    pub account_number: String,
    pub iban: String,
}

/// Payment section of a tour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentDetails {
    pub price_per_person: f64,
    pub bank_details: BankDetails,
}

/// Contact channels shown on a tour page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub whatsapp: String,
    pub email: String,
}

/// Parse the serialized itinerary field.
///
/// A blank value is an empty itinerary; anything else must be a JSON list of
/// day objects with a `day` number and a `title`.
pub fn parse_itinerary(raw: &str) -> Result<Vec<ItineraryDay>, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
        .map_err(|e| CoreError::Validation(format!("Invalid itinerary JSON format: {e}")))
}

/// Parse the serialized payment details field, falling back to
/// [`PaymentDetails::default`] when the value is blank or malformed.
pub fn parse_payment_details(raw: &str) -> PaymentDetails {
    serde_json::from_str(raw.trim()).unwrap_or_default()
}

/// Parse the serialized contact field, falling back to empty channels.
pub fn parse_contact(raw: &str) -> Contact {
    serde_json::from_str(raw.trim()).unwrap_or_default()
}

/// Parse a display priority supplied as a JSON number or numeric string.
///
/// Only non-negative whole numbers are accepted.
pub fn parse_priority(value: &Value) -> Result<i32, CoreError> {
    let invalid = || CoreError::Validation(INVALID_PRIORITY_MESSAGE.to_string());

    let number = match value {
        Value::Number(n) => n.as_f64().ok_or_else(invalid)?,
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };

    if !number.is_finite() || number < 0.0 || number.fract() != 0.0 || number > f64::from(i32::MAX)
    {
        return Err(invalid());
    }
    Ok(number as i32)
}
