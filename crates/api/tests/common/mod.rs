#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use voyago_api::auth::jwt::JwtConfig;
use voyago_api::config::ServerConfig;
use voyago_api::router::build_app_router;
use voyago_api::state::AppState;
use voyago_core::password::HashedPassword;
use voyago_db::memory::MemoryStore;
use voyago_db::models::admin::{Admin, CreateAdmin};
use voyago_db::repositories::AdminRepo;
use voyago_db::Repositories;
use voyago_media::{MediaError, MediaHost, MediaRelay, ResourceKind, StagingArea};

pub const TEST_PASSWORD: &str = "correct-horse-battery";
const BOUNDARY: &str = "voyago-test-boundary";

/// Build a test `ServerConfig`: fixed JWT secret, non-secure cookies, no
/// database, no media credentials.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5001".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 5 * 1024 * 1024,
        database_url: None,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_days: 7,
        },
        cookie_secure: false,
        cloudinary: None,
        upload_dir: upload_dir.to_path_buf(),
        bootstrap_admin: None,
    }
}

/// Media host that hands back `https://media.test/<n>` for every upload.
#[derive(Default)]
pub struct FakeHost {
    pub uploads: AtomicUsize,
}

#[async_trait]
impl MediaHost for FakeHost {
    async fn upload(&self, local_path: &Path, _kind: ResourceKind) -> Result<String, MediaError> {
        assert!(local_path.exists(), "staged file must exist during upload");
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://media.test/{n}"))
    }
}

/// A running test application and the handles tests need to seed and
/// inspect it.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub host: Arc<FakeHost>,
    pub staging: TempDir,
}

impl TestApp {
    pub fn repos(&self) -> Repositories {
        Repositories::from_memory(self.store.clone())
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// over a fresh in-memory store and a fake media host.
pub fn build_test_app() -> TestApp {
    let staging = TempDir::new().expect("temp dir");
    let config = test_config(staging.path());
    let store = Arc::new(MemoryStore::new());
    let host = Arc::new(FakeHost::default());

    let state = AppState {
        repos: Repositories::from_memory(store.clone()),
        pool: None,
        media: MediaRelay::new(host.clone(), StagingArea::new(staging.path())),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        host,
        staging,
    }
}

// ---------------------------------------------------------------------------
// Request builders
// ---------------------------------------------------------------------------

fn with_cookie(builder: axum::http::request::Builder, cookie: Option<&str>) -> axum::http::request::Builder {
    match cookie {
        Some(cookie) => builder.header(COOKIE, cookie),
        None => builder,
    }
}

pub fn request(method: Method, uri: &str, cookie: Option<&str>) -> Request<Body> {
    with_cookie(Request::builder().method(method).uri(uri), cookie)
        .body(Body::empty())
        .expect("valid request")
}

pub fn json_request(method: Method, uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
    with_cookie(Request::builder().method(method).uri(uri), cookie)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// `application/x-www-form-urlencoded` request; `body` is already encoded.
pub fn form_request(method: Method, uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    with_cookie(Request::builder().method(method).uri(uri), cookie)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// One uploaded file part: (field name, file name, bytes).
pub type FilePart<'a> = (&'a str, &'a str, &'a [u8]);

/// Encode text fields and file parts as `multipart/form-data`.
pub fn multipart_body(fields: &[(&str, &str)], files: &[FilePart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, file_name, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(
    method: Method,
    uri: &str,
    fields: &[(&str, &str)],
    files: &[FilePart<'_>],
    cookie: Option<&str>,
) -> Request<Body> {
    with_cookie(Request::builder().method(method).uri(uri), cookie)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields, files)))
        .expect("valid request")
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("readable body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("JSON body")
}

/// The `name=value` part of the response's `Set-Cookie` header.
pub fn session_cookie_pair(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

pub async fn seed_admin(app: &TestApp, username: &str) -> Admin {
    let password = HashedPassword::from_plaintext(TEST_PASSWORD).expect("hashing works");
    AdminRepo::create(
        &*app.store,
        &CreateAdmin {
            username: username.to_string(),
            password,
        },
    )
    .await
    .expect("admin seeded")
}

/// Seed an admin, log in through the API and return the `Cookie` header
/// value carrying the session.
pub async fn login(app: &TestApp) -> String {
    seed_admin(app, "admin").await;
    let body = serde_json::json!({ "username": "admin", "password": TEST_PASSWORD });
    let response = app
        .send(json_request(Method::POST, "/admin/login", &body, None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie_pair(&response).expect("login sets the session cookie")
}

/// Create a category through the API and return its id.
pub async fn create_category(app: &TestApp, cookie: &str, name: &str) -> i64 {
    let body = serde_json::json!({ "name": name, "description": "test" });
    let response = app
        .send(json_request(Method::POST, "/admin/categories", &body, Some(cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("category id")
}
