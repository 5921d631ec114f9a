//! Body extractors for admin requests.
//!
//! Admin pages submit either `multipart/form-data` (when files are attached),
//! urlencoded forms, or JSON. [`FormData`] folds all three into one map of
//! [`FormValue`]s plus the uploaded image files, so handlers read fields the
//! same way regardless of encoding. [`FormBody`] and [`ValidatedForm`] cover
//! the small fixed-shape bodies (login, passwords, priority) in the same three
//! encodings.

use std::collections::HashMap;

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::{Validate, ValidationErrors};
use voyago_core::normalize::{self, FormValue};
use voyago_media::UploadedFile;

use crate::error::AppError;

/// Field name carrying image files. `images[]` is accepted as an alias.
const IMAGES_FIELD: &str = "images";

/// Upload cap for tour forms.
pub const MAX_TOUR_IMAGES: usize = 5;
/// Upload cap for package, blog and ticket forms.
pub const MAX_IMAGES: usize = 10;

/// Parsed admin form body.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, FormValue>,
    images: Vec<UploadedFile>,
}

impl FormData {
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Trimmed text, `None` when the field is absent.
    pub fn text(&self, name: &str) -> Option<String> {
        normalize::text(self.get(name))
    }

    /// Trimmed text, `None` when absent or blank.
    pub fn non_blank(&self, name: &str) -> Option<String> {
        normalize::non_blank(self.get(name))
    }

    /// The field as a normalized list (see [`normalize::coerce_list`]).
    pub fn list(&self, name: &str) -> Vec<String> {
        normalize::coerce_list(self.get(name))
    }

    /// Take the uploaded images, rejecting the request when more than `max`
    /// were sent.
    pub fn take_images(&mut self, max: usize) -> Result<Vec<UploadedFile>, AppError> {
        if self.images.len() > max {
            return Err(AppError::BadRequest(format!(
                "You can upload a maximum of {max} images"
            )));
        }
        Ok(std::mem::take(&mut self.images))
    }

    fn insert(&mut self, name: &str, value: String) {
        let key = canonical_name(name).to_string();
        let merged = match self.fields.remove(&key) {
            Some(existing) => existing.push(value),
            None => FormValue::Text(value),
        };
        self.fields.insert(key, merged);
    }

    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        for (name, value) in pairs {
            form.insert(&name, value);
        }
        form
    }

    /// The text fields as a JSON object; repeated fields become arrays.
    fn into_json(self) -> Value {
        let map = self
            .fields
            .into_iter()
            .map(|(name, value)| {
                let value = match value {
                    FormValue::Text(text) => Value::String(text),
                    FormValue::List(items) => {
                        Value::Array(items.into_iter().map(Value::String).collect())
                    }
                };
                (name, value)
            })
            .collect();
        Value::Object(map)
    }

    /// JSON bodies: strings and scalars become text, arrays and objects are
    /// kept in serialized form so the shared parsers see the same input as
    /// they would from a multipart field.
    fn from_json(body: Value) -> Result<Self, AppError> {
        let Value::Object(map) = body else {
            return Err(AppError::BadRequest(
                "Request body must be a JSON object".to_string(),
            ));
        };
        let mut form = Self::default();
        for (name, value) in map {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s,
                other => other.to_string(),
            };
            form.insert(&name, text);
        }
        Ok(form)
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);

            if file_name.is_some() {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
                // Browsers send an empty part for an untouched file input.
                if canonical_name(&name) != IMAGES_FIELD || bytes.is_empty() {
                    continue;
                }
                form.images.push(UploadedFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read field: {e}")))?;
                form.insert(&name, value);
            }
        }
        Ok(form)
    }
}

/// `tags[]` and `tags` name the same field.
fn canonical_name(name: &str) -> &str {
    name.strip_suffix("[]").unwrap_or(name)
}

/// Lowercased `Content-Type` of the request, empty when absent.
fn content_type(req: &Request) -> String {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = content_type(&req);

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Self::from_multipart(multipart).await
        } else if content_type.starts_with("application/json") {
            let Json(body) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Self::from_json(body)
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            Ok(Self::from_pairs(pairs))
        } else {
            Err(AppError::BadRequest(
                "Unsupported content type; send multipart, JSON or urlencoded form data"
                    .to_string(),
            ))
        }
    }
}

/// Fixed-shape body deserialized from JSON, urlencoded or multipart input.
///
/// JSON keeps its native types. Form encodings arrive as strings (repeated
/// fields as string arrays), so target fields should be `String` or
/// [`Value`].
pub struct FormBody<T>(pub T);

impl<S, T> FromRequest<S> for FormBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if content_type(&req).starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return Ok(Self(value));
        }

        let form = FormData::from_request(req, state).await?;
        serde_json::from_value(form.into_json())
            .map(Self)
            .map_err(|e| AppError::BadRequest(format!("Invalid form body: {e}")))
    }
}

/// [`FormBody`] that is then checked with [`Validate`].
///
/// Both failures are reported as 400 through [`AppError`].
pub struct ValidatedForm<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let FormBody(value) = FormBody::<T>::from_request(req, state).await?;
        value
            .validate()
            .map_err(|e| AppError::BadRequest(validation_message(&e)))?;
        Ok(Self(value))
    }
}

/// Join the messages of every failed rule, in field order.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.join("; ")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn repeated_and_bracketed_names_fold_into_one_list() {
        let form = FormData::from_pairs(vec![
            ("peopleType[]".into(), "Couples".into()),
            ("peopleType".into(), "Families".into()),
            ("title".into(), "  Atlas Trek ".into()),
        ]);
        assert_eq!(form.list("peopleType"), vec!["Couples", "Families"]);
        assert_eq!(form.text("title").as_deref(), Some("Atlas Trek"));
        assert!(form.non_blank("subtitle").is_none());
    }

    #[test]
    fn json_arrays_stay_serialized_for_shared_parsers() {
        let form = FormData::from_json(json!({
            "included": ["Breakfast", "Guide"],
            "groupSize": 12,
            "subtitle": null,
        }))
        .unwrap();
        assert_eq!(form.list("included"), vec!["Breakfast", "Guide"]);
        assert_eq!(form.text("groupSize").as_deref(), Some("12"));
        assert!(!form.contains("subtitle"));
    }

    #[test]
    fn form_fields_convert_to_a_json_object() {
        let form = FormData::from_pairs(vec![
            ("username".into(), "admin".into()),
            ("tags".into(), "a".into()),
            ("tags[]".into(), "b".into()),
        ]);
        assert_eq!(
            form.into_json(),
            json!({ "username": "admin", "tags": ["a", "b"] })
        );
    }

    #[test]
    fn non_object_json_is_rejected() {
        assert_matches!(FormData::from_json(json!([1, 2])), Err(AppError::BadRequest(_)));
    }

    #[test]
    fn image_cap_is_enforced() {
        let mut form = FormData::default();
        for _ in 0..3 {
            form.images.push(UploadedFile {
                file_name: Some("a.jpg".into()),
                content_type: None,
                bytes: vec![1],
            });
        }
        assert_matches!(form.take_images(2), Err(AppError::BadRequest(_)));
        assert_eq!(form.take_images(3).unwrap().len(), 3);
        assert!(form.take_images(3).unwrap().is_empty());
    }
}
