//! Tests for `AppError` -> HTTP response mapping.
//!
//! Most cases call `IntoResponse` directly on `AppError` values; the last
//! few go through the router to check body rejections and the fallback.

mod common;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use voyago_api::error::AppError;
use voyago_core::error::CoreError;
use voyago_db::StoreError;
use voyago_media::MediaError;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::not_found("Tour", 42));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "Tour not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("Invalid priority value".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "Invalid priority value");
}

#[tokio::test]
async fn unauthorized_and_forbidden_map_to_401_and_403() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("no session".into()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Forbidden("Invalid token".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn unique_violations_get_friendly_messages() {
    let err = AppError::Store(StoreError::UniqueViolation {
        constraint: "uq_categories_name".into(),
    });
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "Category already exists");

    let err = AppError::Store(StoreError::UniqueViolation {
        constraint: "uq_other".into(),
    });
    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        json["message"],
        "Duplicate value violates unique constraint: uq_other"
    );
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    let err = AppError::InternalError("secret connection string".into());
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["message"], "An internal error occurred");
}

#[tokio::test]
async fn media_failures_return_500_upstream() {
    let (status, json) = error_to_response(AppError::Upstream(MediaError::NotConfigured)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["message"], "Media upload failed");
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = common::build_test_app();
    let response = app
        .send(common::request(Method::GET, "/no/such/page", None))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = common::body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "No route for /no/such/page");
}

#[tokio::test]
async fn malformed_json_body_is_400_not_422() {
    let app = common::build_test_app();
    let cookie = common::login(&app).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/admin/categories")
        .header(COOKIE, &cookie)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .expect("valid request");
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unsupported_content_type_is_400() {
    let app = common::build_test_app();
    let cookie = common::login(&app).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/admin/categories")
        .header(COOKIE, &cookie)
        .header(CONTENT_TYPE, "text/plain")
        .body(Body::from("name=Desert"))
        .expect("valid request");
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn urlencoded_forms_are_accepted() {
    let app = common::build_test_app();
    let cookie = common::login(&app).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/admin/categories")
        .header(COOKIE, &cookie)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("name=Desert+Tours&description=Dunes"))
        .expect("valid request");
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = common::body_json(response).await;
    assert_eq!(json["data"]["slug"], "desert-tours");
}

#[tokio::test]
async fn non_numeric_path_id_is_json_400() {
    let app = common::build_test_app();
    let cookie = common::login(&app).await;

    let response = app
        .send(common::request(Method::DELETE, "/admin/packages/abc", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["message"]
        .as_str()
        .is_some_and(|m| m.contains("abc")));
}
