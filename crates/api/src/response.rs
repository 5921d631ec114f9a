//! Shared response envelope types for API handlers.
//!
//! JSON endpoints answer with `{ "success": true, "message": ..., "data": ... }`;
//! page routes answer with a view model `{ "view": ..., "data": ... }` that
//! an external renderer turns into HTML.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Standard success envelope.
///
/// ```ignore
/// Ok(ApiResponse::ok("Tour updated successfully", tour))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    /// The envelope paired with `201 Created`.
    pub fn created(message: impl Into<String>, data: T) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Json(Self::ok(message, data)))
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Template name plus the data it renders.
#[derive(Debug, Serialize)]
pub struct ViewModel<T: Serialize> {
    pub view: &'static str,
    pub data: T,
}

impl<T: Serialize> ViewModel<T> {
    pub fn new(view: &'static str, data: T) -> Self {
        Self { view, data }
    }
}

impl<T: Serialize> IntoResponse for ViewModel<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
