//! HTTP-level tests for tours: multipart create / update, trip-time
//! normalization, flag toggles, priority, soft delete and image removal.

mod common;

use std::sync::atomic::Ordering;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, StatusCode};
use common::{
    body_json, build_test_app, create_category, form_request, json_request, login,
    multipart_request, request, TestApp,
};
use serde_json::{json, Value};

const JPEG: &[u8] = b"\xff\xd8\xff\xe0fake-jpeg";

const ITINERARY: &str =
    r#"[{"day":1,"title":"Arrival","activities":["Check in"],"overnight":"Marrakech"}]"#;

async fn create_tour(app: &TestApp, cookie: &str, category_id: i64, title: &str) -> Value {
    let category = category_id.to_string();
    let response = app
        .send(multipart_request(
            Method::POST,
            "/admin/tours",
            &[
                ("categoryId", category.as_str()),
                ("title", title),
                ("tourPlace", "Marrakech"),
                ("price", "£899"),
                ("groupSize", "12"),
                ("peopleType", r#"["Couples","Families"]"#),
                ("whyTravelWithUs", "Local guides, Small groups"),
                ("included[]", "Breakfast"),
                ("included[]", "Transfers"),
                ("itinerary", ITINERARY),
                ("tripTime", r#"{"from":"08:00","to":"17:30"}"#),
                ("paymentDetails", r#"{"pricePerPerson":899}"#),
                ("whatsapp", "+44 7000 000000"),
                ("email", "trips@voyago.test"),
            ],
            &[("images", "a.jpg", JPEG), ("images", "b.jpg", JPEG)],
            Some(cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Tour added successfully");
    json["data"].clone()
}

async fn put_empty(app: &TestApp, cookie: &str, uri: &str) -> (StatusCode, Value) {
    let response = app.send(request(Method::PUT, uri, Some(cookie))).await;
    let status = response.status();
    (status, body_json(response).await)
}

#[tokio::test]
async fn create_tour_normalizes_every_field() {
    let app = build_test_app();
    let cookie = login(&app).await;
    let category_id = create_category(&app, &cookie, "Morocco").await;

    let tour = create_tour(&app, &cookie, category_id, "Atlas Escape").await;

    assert_eq!(tour["title"], "Atlas Escape");
    assert_eq!(tour["categoryId"], category_id);
    assert_eq!(tour["groupSize"], 12);
    assert_eq!(tour["peopleType"], json!(["Couples", "Families"]));
    assert_eq!(tour["whyTravelWithUs"], json!(["Local guides", "Small groups"]));
    assert_eq!(tour["included"], json!(["Breakfast", "Transfers"]));
    assert_eq!(tour["itinerary"][0]["title"], "Arrival");
    assert_eq!(tour["tripTime"], json!({ "from": "8:00 AM", "to": "5:30 PM" }));
    assert_eq!(tour["paymentDetails"]["pricePerPerson"], 899.0);
    assert_eq!(tour["contact"]["email"], "trips@voyago.test");
    assert_eq!(
        tour["images"],
        json!(["https://media.test/0", "https://media.test/1"])
    );
    assert_eq!(tour["isActive"], true);
    assert_eq!(tour["isBestseller"], false);
    assert_eq!(tour["priority"], 0);
}

#[tokio::test]
async fn create_tour_without_required_fields_is_400() {
    let app = build_test_app();
    let cookie = login(&app).await;

    let body = json!({ "title": "Only a title" });
    let response = app
        .send(json_request(Method::POST, "/admin/tours", &body, Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Title, tour place and price are required"
    );
}

#[tokio::test]
async fn malformed_itinerary_is_400() {
    let app = build_test_app();
    let cookie = login(&app).await;

    let body = json!({
        "title": "Broken",
        "tourPlace": "Nowhere",
        "price": "1",
        "itinerary": "[{not json"
    });
    let response = app
        .send(json_request(Method::POST, "/admin/tours", &body, Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = body_json(response).await["message"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    assert!(message.starts_with("Invalid itinerary JSON format"));
}

#[tokio::test]
async fn invalid_trip_time_is_400() {
    let app = build_test_app();
    let cookie = login(&app).await;

    let body = json!({
        "title": "Late",
        "tourPlace": "Nowhere",
        "price": "1",
        "tripTime": r#"{"from":"25:00","to":"10:00"}"#
    });
    let response = app
        .send(json_request(Method::POST, "/admin/tours", &body, Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Invalid time format. Use 8:00 AM format."
    );
}

#[tokio::test]
async fn more_than_five_tour_images_is_400() {
    let app = build_test_app();
    let cookie = login(&app).await;

    let files: Vec<_> = (0..6).map(|_| ("images", "x.jpg", JPEG)).collect();
    let response = app
        .send(multipart_request(
            Method::POST,
            "/admin/tours",
            &[("title", "Many"), ("tourPlace", "Here"), ("price", "1")],
            &files,
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "You can upload a maximum of 5 images"
    );
    assert_eq!(app.host.uploads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn edit_page_shows_trip_time_in_24_hour_form() {
    let app = build_test_app();
    let cookie = login(&app).await;
    let category_id = create_category(&app, &cookie, "Morocco").await;
    let tour = create_tour(&app, &cookie, category_id, "Atlas Escape").await;
    let id = tour["id"].as_i64().expect("id");

    let response = app
        .send(request(Method::GET, &format!("/admin/tours?id={id}"), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["view"], "admin/edit-tour-page");
    assert_eq!(json["data"]["tour"]["tripTime"], json!({ "from": "08:00", "to": "17:30" }));
    assert_eq!(json["data"]["categories"][0]["id"], category_id);

    let response = app
        .send(request(Method::GET, "/admin/tours", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Tour ID is required");
}

#[tokio::test]
async fn update_tour_merges_images_and_replaces_present_lists() {
    let app = build_test_app();
    let cookie = login(&app).await;
    let category_id = create_category(&app, &cookie, "Morocco").await;
    let tour = create_tour(&app, &cookie, category_id, "Atlas Escape").await;
    let id = tour["id"].as_i64().expect("id");

    let response = app
        .send(multipart_request(
            Method::PUT,
            &format!("/admin/tours/{id}"),
            &[("title", "Atlas Deluxe"), ("peopleType", "Solo")],
            &[("images", "c.jpg", JPEG)],
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Tour updated successfully");
    let updated = &json["data"];
    assert_eq!(updated["title"], "Atlas Deluxe");
    assert_eq!(updated["peopleType"], json!(["Solo"]));
    assert_eq!(updated["included"], tour["included"]);
    assert_eq!(updated["tripTime"], tour["tripTime"]);
    assert_eq!(
        updated["images"],
        json!([
            "https://media.test/0",
            "https://media.test/1",
            "https://media.test/2"
        ])
    );
}

#[tokio::test]
async fn update_missing_tour_is_404() {
    let app = build_test_app();
    let cookie = login(&app).await;

    let body = json!({ "title": "Ghost" });
    let response = app
        .send(json_request(Method::PUT, "/admin/tours/77", &body, Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Tour not found");
}

#[tokio::test]
async fn bestseller_and_offer_flags_flip() {
    let app = build_test_app();
    let cookie = login(&app).await;
    let category_id = create_category(&app, &cookie, "Morocco").await;
    let tour = create_tour(&app, &cookie, category_id, "Atlas Escape").await;
    let id = tour["id"].as_i64().expect("id");

    let (status, json) = put_empty(&app, &cookie, &format!("/admin/tours/{id}/bestseller")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Bestseller status updated");
    assert_eq!(json["data"]["isBestseller"], true);

    let (_, json) = put_empty(&app, &cookie, &format!("/admin/tours/{id}/bestseller")).await;
    assert_eq!(json["data"]["isBestseller"], false);

    let (status, json) = put_empty(&app, &cookie, &format!("/admin/tours/{id}/offer")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Offer status updated");
    assert_eq!(json["data"]["isOffer"], true);
}

#[tokio::test]
async fn status_can_be_set_or_toggled() {
    let app = build_test_app();
    let cookie = login(&app).await;
    let category_id = create_category(&app, &cookie, "Morocco").await;
    let tour = create_tour(&app, &cookie, category_id, "Atlas Escape").await;
    let id = tour["id"].as_i64().expect("id");
    let uri = format!("/admin/tours/{id}/status");

    let body = json!({ "status": false });
    let response = app
        .send(json_request(Method::PUT, &uri, &body, Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Tour status updated");
    assert_eq!(json["data"]["isActive"], false);

    let (status, json) = put_empty(&app, &cookie, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["isActive"], true);

    let request = Request::builder()
        .method(Method::PUT)
        .uri(&uri)
        .header(COOKIE, &cookie)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"status":"maybe"}"#))
        .expect("valid request");
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn priority_accepts_numbers_and_numeric_strings() {
    let app = build_test_app();
    let cookie = login(&app).await;
    let category_id = create_category(&app, &cookie, "Morocco").await;
    let tour = create_tour(&app, &cookie, category_id, "Atlas Escape").await;
    let id = tour["id"].as_i64().expect("id");
    let uri = format!("/admin/tours/{id}/priority");

    let response = app
        .send(json_request(Method::PUT, &uri, &json!({ "priority": 3 }), Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Tour priority updated successfully");
    assert_eq!(json["data"]["priority"], 3);

    let response = app
        .send(json_request(Method::PUT, &uri, &json!({ "priority": "7" }), Some(&cookie)))
        .await;
    assert_eq!(body_json(response).await["data"]["priority"], 7);

    for bad in [json!(-1), json!(2.5), json!("high"), json!(null)] {
        let response = app
            .send(json_request(Method::PUT, &uri, &json!({ "priority": bad }), Some(&cookie)))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Invalid priority value");
    }
}

#[tokio::test]
async fn priority_accepts_a_urlencoded_form() {
    let app = build_test_app();
    let cookie = login(&app).await;
    let category_id = create_category(&app, &cookie, "Morocco").await;
    let tour = create_tour(&app, &cookie, category_id, "Atlas Escape").await;
    let id = tour["id"].as_i64().expect("id");
    let uri = format!("/admin/tours/{id}/priority");

    let response = app
        .send(form_request(Method::PUT, &uri, "priority=3", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["priority"], 3);

    let response = app
        .send(form_request(Method::PUT, &uri, "priority=high", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid priority value");
}

#[tokio::test]
async fn soft_deleted_tour_leaves_public_listing() {
    let app = build_test_app();
    let cookie = login(&app).await;
    let category_id = create_category(&app, &cookie, "Morocco").await;
    let tour = create_tour(&app, &cookie, category_id, "Atlas Escape").await;
    let id = tour["id"].as_i64().expect("id");

    let (status, json) = put_empty(&app, &cookie, &format!("/admin/tours/delete/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Tour deleted successfully");
    assert_eq!(json["data"]["isActive"], false);

    let response = app.send(request(Method::GET, "/tours", None)).await;
    assert_eq!(body_json(response).await["data"]["tours"], json!([]));

    let response = app
        .send(request(Method::GET, "/admin/alltour", Some(&cookie)))
        .await;
    let json = body_json(response).await;
    assert_eq!(json["view"], "admin/Alltours");
    assert_eq!(json["data"]["tours"][0]["id"], id);
}

#[tokio::test]
async fn delete_tour_image_removes_only_that_url() {
    let app = build_test_app();
    let cookie = login(&app).await;
    let category_id = create_category(&app, &cookie, "Morocco").await;
    let tour = create_tour(&app, &cookie, category_id, "Atlas Escape").await;
    let id = tour["id"].as_i64().expect("id");

    let response = app
        .send(request(
            Method::DELETE,
            &format!("/admin/tours/{id}/image?imageUrl=https://media.test/1"),
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["data"]["images"],
        json!(["https://media.test/0"])
    );
}

#[tokio::test]
async fn add_tour_page_lists_active_categories() {
    let app = build_test_app();
    let cookie = login(&app).await;
    create_category(&app, &cookie, "Morocco").await;

    let response = app
        .send(request(Method::GET, "/admin/addtour", Some(&cookie)))
        .await;
    let json = body_json(response).await;
    assert_eq!(json["view"], "admin/addtour");
    assert_eq!(json["data"]["categories"][0]["name"], "Morocco");
}
