//! Handlers for the admin session (login, logout, registration, password).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use voyago_core::error::CoreError;
use voyago_core::password::{validate_password_strength, HashedPassword, MIN_PASSWORD_LENGTH};
use voyago_core::roles::ROLE_ADMIN;
use voyago_db::models::admin::{AdminResponse, CreateAdmin};

use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::jwt::generate_token;
use crate::error::{AppError, AppResult};
use crate::form::ValidatedForm;
use crate::middleware::auth::AdminSession;
use crate::response::{ApiResponse, ViewModel};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for `POST /admin/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(custom(function = "username_length"))]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `PUT /admin/password`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

/// Successful login payload. The token is also set as the `token` cookie.
#[derive(Debug, Serialize)]
pub struct LoginData {
    pub token: String,
    pub admin: AdminResponse,
}

/// Usernames are stored trimmed, so the length rule applies after trimming.
fn username_length(username: &str) -> Result<(), ValidationError> {
    let len = username.trim().chars().count();
    if (3..=64).contains(&len) {
        return Ok(());
    }
    Err(ValidationError::new("username_length")
        .with_message("Username must be 3 to 64 characters".into()))
}

fn hash_password(password: &str) -> AppResult<HashedPassword> {
    validate_password_strength(password, MIN_PASSWORD_LENGTH).map_err(AppError::BadRequest)?;
    HashedPassword::from_plaintext(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /admin/login
pub async fn login_page() -> ViewModel<serde_json::Value> {
    ViewModel::new("admin/adminlogin", serde_json::json!({}))
}

/// POST /admin/login
///
/// Failed attempts are logged and never lock the account.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedForm(input): ValidatedForm<LoginRequest>,
) -> AppResult<(CookieJar, ApiResponse<LoginData>)> {
    let username = input.username.trim();

    let admin = match state.repos.admins.find_by_username(username).await? {
        Some(admin) => admin,
        None => {
            tracing::warn!(username = %username, "Login attempt for unknown admin");
            return Err(CoreError::not_found("Admin", username).into());
        }
    };

    let password_valid = admin
        .password()
        .verify(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(admin_id = admin.id, "Failed login attempt");
        return Err(AppError::BadRequest(
            "Invalid username or password".to_string(),
        ));
    }

    if !admin.is_active() {
        tracing::warn!(admin_id = admin.id, "Login attempt on disabled admin");
        return Err(CoreError::Forbidden("Account is disabled".into()).into());
    }

    let token = generate_token(admin.id, ROLE_ADMIN, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    let jar = jar.add(session_cookie(token.clone(), &state.config));

    tracing::info!(admin_id = admin.id, "Admin logged in");
    Ok((
        jar,
        ApiResponse::ok(
            "Login successful",
            LoginData {
                token,
                admin: AdminResponse::from(&admin),
            },
        ),
    ))
}

/// POST /admin/logout
///
/// Works with or without a valid session; the cookie is always cleared.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, ApiResponse<()>) {
    let jar = jar.add(clear_session_cookie(&state.config));
    (jar, ApiResponse::ok("User logged out successfully", ()))
}

/// POST /admin/register
pub async fn register(
    session: AdminSession,
    State(state): State<AppState>,
    ValidatedForm(input): ValidatedForm<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AdminResponse>>)> {
    let password = hash_password(&input.password)?;
    let admin = state
        .repos
        .admins
        .create(&CreateAdmin {
            username: input.username.trim().to_string(),
            password,
        })
        .await?;

    tracing::info!(
        admin_id = admin.id,
        created_by = session.admin_id,
        "Admin registered"
    );
    Ok(ApiResponse::created(
        "Admin registered successfully!",
        AdminResponse::from(&admin),
    ))
}

/// PUT /admin/password
pub async fn change_password(
    session: AdminSession,
    State(state): State<AppState>,
    ValidatedForm(input): ValidatedForm<ChangePasswordRequest>,
) -> AppResult<ApiResponse<()>> {
    let admin = state
        .repos
        .admins
        .find_by_id(session.admin_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Admin", session.admin_id))?;

    let current_valid = admin
        .password()
        .verify(&input.current_password)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        tracing::warn!(admin_id = admin.id, "Password change with wrong current password");
        return Err(AppError::BadRequest(
            "Current password is incorrect".to_string(),
        ));
    }

    let password = hash_password(&input.new_password)?;
    if !state.repos.admins.update_password(admin.id, &password).await? {
        return Err(CoreError::not_found("Admin", admin.id).into());
    }

    tracing::info!(admin_id = admin.id, "Admin password changed");
    Ok(ApiResponse::ok("Password updated successfully", ()))
}
