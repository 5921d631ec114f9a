//! Package value types and the `features` field parser.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::normalize::FormValue;

/// Currency applied when a package is created without one.
pub const DEFAULT_CURRENCY: &str = "GBP";

pub const INVALID_FEATURES_MESSAGE: &str = "Invalid features JSON format";

/// One labelled line of a package's feature table, e.g. `Nights: 5`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub label: String,
    pub value: String,
}

/// Parse the `features` form field.
///
/// Accepts either one serialized JSON list of `{label, value}` objects, or
/// the field repeated with one serialized object per occurrence. A blank or
/// absent field is an empty list.
pub fn parse_features(value: Option<&FormValue>) -> Result<Vec<Feature>, CoreError> {
    let invalid = || CoreError::Validation(INVALID_FEATURES_MESSAGE.to_string());

    match value {
        None => Ok(Vec::new()),
        Some(FormValue::Text(raw)) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(Vec::new());
            }
            if raw.starts_with('{') {
                let single: Feature = serde_json::from_str(raw).map_err(|_| invalid())?;
                return Ok(vec![single]);
            }
            serde_json::from_str(raw).map_err(|_| invalid())
        }
        Some(FormValue::List(items)) => items
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| serde_json::from_str::<Feature>(s).map_err(|_| invalid()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn serialized_list_is_parsed() {
        let value = FormValue::Text(
            r#"[{"label":"Nights","value":"5"},{"label":"Meals","value":"Half board"}]"#.into(),
        );
        let features = parse_features(Some(&value)).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[1].value, "Half board");
    }

    #[test]
    fn repeated_objects_are_collected_in_order() {
        let value = FormValue::Text(r#"{"label":"A","value":"1"}"#.into())
            .push(r#"{"label":"B","value":"2"}"#.into());
        let features = parse_features(Some(&value)).unwrap();
        assert_eq!(
            features.iter().map(|f| f.label.as_str()).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
    }

    #[test]
    fn blank_or_absent_is_empty() {
        assert!(parse_features(None).unwrap().is_empty());
        assert!(parse_features(Some(&FormValue::Text(" ".into()))).unwrap().is_empty());
    }

    #[test]
    fn malformed_features_are_rejected() {
        let value = FormValue::Text("[{label: Nights}".into());
        let err = parse_features(Some(&value)).unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg == INVALID_FEATURES_MESSAGE);
    }
}
