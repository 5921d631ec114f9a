//! HTTP-level tests for blog posts and ticket offers.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app, json_request, login, multipart_request, request, TestApp};
use serde_json::{json, Value};

const JPEG: &[u8] = b"\xff\xd8\xff\xe0fake-jpeg";

async fn create_blog(app: &TestApp, cookie: &str, name: &str) -> Value {
    let response = app
        .send(multipart_request(
            Method::POST,
            "/admin/blogs",
            &[
                ("name", name),
                ("description", "Long form story"),
                ("miniDescription", "Teaser"),
            ],
            &[("images", "cover.jpg", JPEG)],
            Some(cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Blog added successfully");
    json["data"].clone()
}

// ---------------------------------------------------------------------------
// Blogs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_blog_stores_images() {
    let app = build_test_app();
    let cookie = login(&app).await;

    let blog = create_blog(&app, &cookie, "Ten days in Fez").await;
    assert_eq!(blog["name"], "Ten days in Fez");
    assert_eq!(blog["miniDescription"], "Teaser");
    assert_eq!(blog["images"], json!(["https://media.test/0"]));
}

#[tokio::test]
async fn create_blog_requires_text_fields() {
    let app = build_test_app();
    let cookie = login(&app).await;

    let body = json!({ "name": "Untitled", "description": "" });
    let response = app
        .send(json_request(Method::POST, "/admin/blogs", &body, Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "All fields are required except images."
    );
}

#[tokio::test]
async fn update_blog_keeps_blank_fields() {
    let app = build_test_app();
    let cookie = login(&app).await;
    let blog = create_blog(&app, &cookie, "Ten days in Fez").await;
    let id = blog["id"].as_i64().expect("id");

    let body = json!({ "name": "Twelve days in Fez", "description": "  " });
    let response = app
        .send(json_request(
            Method::PUT,
            &format!("/admin/blogs/{id}"),
            &body,
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Blog updated successfully");
    assert_eq!(json["data"]["name"], "Twelve days in Fez");
    assert_eq!(json["data"]["description"], "Long form story");
    assert_eq!(json["data"]["images"], blog["images"]);
}

#[tokio::test]
async fn delete_blog_and_its_image() {
    let app = build_test_app();
    let cookie = login(&app).await;
    let blog = create_blog(&app, &cookie, "Ten days in Fez").await;
    let id = blog["id"].as_i64().expect("id");

    let response = app
        .send(request(
            Method::DELETE,
            &format!("/admin/blogs/{id}/image?imageUrl=https://media.test/0"),
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["images"], json!([]));

    let response = app
        .send(request(Method::DELETE, &format!("/admin/blogs/{id}"), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Blog deleted successfully");

    let response = app
        .send(request(Method::DELETE, &format!("/admin/blogs/{id}"), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blog_admin_pages_render() {
    let app = build_test_app();
    let cookie = login(&app).await;
    let blog = create_blog(&app, &cookie, "Ten days in Fez").await;
    let id = blog["id"].as_i64().expect("id");

    let response = app
        .send(request(Method::GET, "/admin/allblogs", Some(&cookie)))
        .await;
    let json = body_json(response).await;
    assert_eq!(json["view"], "admin/allblog");
    assert_eq!(json["data"]["blogs"][0]["id"], id);

    let response = app
        .send(request(Method::GET, &format!("/admin/blogs/{id}/edit"), Some(&cookie)))
        .await;
    let json = body_json(response).await;
    assert_eq!(json["view"], "admin/editblog");
    assert_eq!(json["data"]["blog"]["name"], "Ten days in Fez");
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_ticket_accepts_ticket_name_alias() {
    let app = build_test_app();
    let cookie = login(&app).await;

    let body = json!({
        "ticketName": "Museum pass",
        "offerPrice": "20",
        "actualPrice": "25",
        "offPercentage": "20"
    });
    let response = app
        .send(json_request(Method::POST, "/admin/tickets", &body, Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Ticket created successfully.");
    assert_eq!(json["data"]["name"], "Museum pass");
    assert_eq!(json["data"]["offerPrice"], 20.0);
    assert_eq!(json["data"]["offPercentage"], 20.0);
}

#[tokio::test]
async fn ticket_amounts_are_validated() {
    let app = build_test_app();
    let cookie = login(&app).await;

    let negative = json!({ "name": "Bad", "offerPrice": "-5" });
    let response = app
        .send(json_request(Method::POST, "/admin/tickets", &negative, Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let too_much = json!({ "name": "Bad", "offPercentage": "150" });
    let response = app
        .send(json_request(Method::POST, "/admin/tickets", &too_much, Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "offPercentage must be between 0 and 100"
    );

    let nameless = json!({ "offerPrice": "5" });
    let response = app
        .send(json_request(Method::POST, "/admin/tickets", &nameless, Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Ticket name is required");
}

#[tokio::test]
async fn update_and_delete_ticket() {
    let app = build_test_app();
    let cookie = login(&app).await;

    let response = app
        .send(multipart_request(
            Method::POST,
            "/admin/tickets",
            &[("name", "Desert camp"), ("offerPrice", "80")],
            &[("images", "camp.jpg", JPEG)],
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().expect("id");

    let body = json!({ "offerPrice": "70" });
    let response = app
        .send(json_request(
            Method::PUT,
            &format!("/admin/tickets/{id}"),
            &body,
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["offerPrice"], 70.0);
    assert_eq!(json["data"]["name"], "Desert camp");
    assert_eq!(json["data"]["images"], json!(["https://media.test/0"]));

    let response = app
        .send(request(Method::GET, "/admin/alltickets", Some(&cookie)))
        .await;
    let json = body_json(response).await;
    assert_eq!(json["view"], "admin/alltickets");
    assert_eq!(json["data"]["tickets"][0]["id"], id);

    let response = app
        .send(request(Method::DELETE, &format!("/admin/tickets/{id}"), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.send(request(Method::GET, "/tickets", None)).await;
    assert_eq!(body_json(response).await["data"]["tickets"], json!([]));
}
