//! Form-field normalization shared by every admin controller.
//!
//! Admin forms arrive as multipart bodies where the same logical field can
//! be sent as a repeated scalar (`tag=a&tag=b`), a serialized JSON list
//! (`tag=["a","b"]`), a JSON scalar, or a comma-joined string
//! (`tag=a, b`). [`coerce_list`] turns all of those into one `Vec<String>`
//! so no controller re-implements the parsing.

use serde_json::Value;

use crate::error::CoreError;

/// Raw value collected for one multipart field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    /// The field appeared once.
    Text(String),
    /// The field appeared more than once, in submission order.
    List(Vec<String>),
}

impl FormValue {
    /// Fold another occurrence of the same field name into this value.
    pub fn push(self, next: String) -> Self {
        match self {
            FormValue::Text(first) => FormValue::List(vec![first, next]),
            FormValue::List(mut items) => {
                items.push(next);
                FormValue::List(items)
            }
        }
    }

    /// The scalar view of the field: the single value, or the last
    /// occurrence when the field was repeated.
    pub fn as_text(&self) -> &str {
        match self {
            FormValue::Text(s) => s,
            FormValue::List(items) => items.last().map(String::as_str).unwrap_or(""),
        }
    }
}

/// Normalize an optional form field into a list of trimmed, non-empty
/// strings. Absent or blank fields yield an empty list.
pub fn coerce_list(value: Option<&FormValue>) -> Vec<String> {
    match value {
        None => Vec::new(),
        Some(FormValue::Text(raw)) => parse_text_list(raw),
        Some(FormValue::List(items)) => items
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Parse one text value as a list.
///
/// JSON lists and JSON scalars are honoured; anything that does not parse as
/// JSON falls back to comma-splitting.
pub fn parse_text_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Ok(Value::Object(_)) | Err(_) => split_commas(trimmed),
        Ok(other) => scalar_to_string(&other).into_iter().collect(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn split_commas(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trimmed scalar text of a field, `None` when the field is absent.
pub fn text(value: Option<&FormValue>) -> Option<String> {
    value.map(|v| v.as_text().trim().to_string())
}

/// Trimmed scalar text of a field, `None` when absent or blank.
pub fn non_blank(value: Option<&FormValue>) -> Option<String> {
    text(value).filter(|s| !s.is_empty())
}

/// Parse a required-format decimal field (`price`, `offerPrice`, ...).
///
/// Rejects non-numeric, non-finite and negative values.
pub fn parse_amount(field: &str, raw: &str) -> Result<f64, CoreError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("{field} must be a number")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(value)
}

/// Parse an integer field such as `groupSize` or `categoryId`.
pub fn parse_integer<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, CoreError> {
    raw.trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("{field} must be a whole number")))
}
