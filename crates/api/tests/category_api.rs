//! HTTP-level tests for category management and the public category list.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app, create_category, json_request, login, request};
use serde_json::json;

#[tokio::test]
async fn create_category_derives_slug() {
    let app = build_test_app();
    let cookie = login(&app).await;

    let body = json!({ "name": "Desert Safaris", "description": "Sand and stars" });
    let response = app
        .send(json_request(Method::POST, "/admin/categories", &body, Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Category added successfully");
    assert_eq!(json["data"]["name"], "Desert Safaris");
    assert_eq!(json["data"]["slug"], "desert-safaris");
    assert_eq!(json["data"]["isActive"], true);
}

#[tokio::test]
async fn create_category_without_name_is_400() {
    let app = build_test_app();
    let cookie = login(&app).await;

    let body = json!({ "name": "   " });
    let response = app
        .send(json_request(Method::POST, "/admin/categories", &body, Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Category name is required");
}

#[tokio::test]
async fn duplicate_category_name_is_409() {
    let app = build_test_app();
    let cookie = login(&app).await;
    create_category(&app, &cookie, "Mountains").await;

    let body = json!({ "name": "Mountains" });
    let response = app
        .send(json_request(Method::POST, "/admin/categories", &body, Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Category already exists");
}

#[tokio::test]
async fn update_category_renames_and_reslugs() {
    let app = build_test_app();
    let cookie = login(&app).await;
    let id = create_category(&app, &cookie, "Mountains").await;

    let body = json!({ "name": "High Mountains" });
    let response = app
        .send(json_request(
            Method::PUT,
            &format!("/admin/categories/{id}"),
            &body,
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Category updated successfully");
    assert_eq!(json["data"]["slug"], "high-mountains");
    assert_eq!(json["data"]["description"], "test");
}

#[tokio::test]
async fn update_missing_category_is_404() {
    let app = build_test_app();
    let cookie = login(&app).await;

    let body = json!({ "name": "Anything" });
    let response = app
        .send(json_request(Method::PUT, "/admin/categories/999", &body, Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Category not found");
}

#[tokio::test]
async fn delete_category_removes_it() {
    let app = build_test_app();
    let cookie = login(&app).await;
    let id = create_category(&app, &cookie, "Lakes").await;

    let response = app
        .send(request(
            Method::DELETE,
            &format!("/admin/deletecategory/{id}"),
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Category deleted successfully");

    let response = app
        .send(request(
            Method::GET,
            &format!("/admin/categories/{id}"),
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_category_in_use_is_409() {
    let app = build_test_app();
    let cookie = login(&app).await;
    let id = create_category(&app, &cookie, "Islands").await;

    let package = json!({ "categoryId": id.to_string(), "name": "Island hop", "price": "500" });
    let response = app
        .send(json_request(Method::POST, "/admin/packages", &package, Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .send(request(
            Method::DELETE,
            &format!("/admin/deletecategory/{id}"),
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn category_pages_render_views() {
    let app = build_test_app();
    let cookie = login(&app).await;
    let id = create_category(&app, &cookie, "Rivers").await;

    let response = app
        .send(request(Method::GET, "/admin/allcategory", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["view"], "admin/allcategory");
    assert_eq!(json["data"]["categories"][0]["name"], "Rivers");

    let response = app
        .send(request(
            Method::GET,
            &format!("/admin/categories/{id}"),
            Some(&cookie),
        ))
        .await;
    let json = body_json(response).await;
    assert_eq!(json["view"], "admin/editcategory");
    assert_eq!(json["data"]["category"]["id"], id);

    let response = app
        .send(request(Method::GET, "/admin/addcategory", Some(&cookie)))
        .await;
    assert_eq!(body_json(response).await["view"], "admin/addcategory");
}

#[tokio::test]
async fn public_category_list_needs_no_session() {
    let app = build_test_app();
    let cookie = login(&app).await;
    create_category(&app, &cookie, "Beaches").await;
    create_category(&app, &cookie, "Alps").await;

    let response = app.send(request(Method::GET, "/categories", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<_> = json["data"]
        .as_array()
        .expect("array")
        .iter()
        .map(|c| c["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["Alps", "Beaches"]);
}
