//! Cookie-based session extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use voyago_core::error::CoreError;
use voyago_core::roles::ROLE_ADMIN;
use voyago_core::types::DbId;

use crate::auth::cookie::SESSION_COOKIE;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Where page routes send visitors without a session.
pub const LOGIN_PAGE: &str = "/admin/login";

/// Identity of the admin behind a valid session token.
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// The admin's database id (from `claims.sub`).
    pub admin_id: DbId,
    pub role: String,
}

enum SessionFailure {
    Missing,
    Rejected(AppError),
}

fn authenticate(parts: &Parts, state: &AppState) -> Result<AdminSession, SessionFailure> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(SessionFailure::Missing)?;

    let claims = validate_token(&token, &state.config.jwt).map_err(|e| {
        tracing::debug!(error = %e, "Rejected session token");
        SessionFailure::Rejected(AppError::Core(CoreError::Forbidden(
            "Invalid token".into(),
        )))
    })?;

    if claims.role != ROLE_ADMIN {
        return Err(SessionFailure::Rejected(AppError::Core(
            CoreError::Forbidden("Admin role required".into()),
        )));
    }

    Ok(AdminSession {
        admin_id: claims.sub,
        role: claims.role,
    })
}

/// Session guard for JSON endpoints.
///
/// Missing cookie is 401; an invalid, expired or non-admin token is 403.
///
/// ```ignore
/// async fn handler(session: AdminSession) -> AppResult<Json<()>> {
///     tracing::info!(admin_id = session.admin_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state).map_err(|failure| match failure {
            SessionFailure::Missing => AppError::Core(CoreError::Unauthorized(
                "Authentication required".into(),
            )),
            SessionFailure::Rejected(err) => err,
        })
    }
}

/// Session guard for page routes: like [`AdminSession`], but a visitor with
/// no cookie is redirected (303) to [`LOGIN_PAGE`].
pub struct AdminPage(pub AdminSession);

/// Rejection for [`AdminPage`].
pub enum AdminPageRejection {
    Login,
    Error(AppError),
}

impl IntoResponse for AdminPageRejection {
    fn into_response(self) -> Response {
        match self {
            AdminPageRejection::Login => Redirect::to(LOGIN_PAGE).into_response(),
            AdminPageRejection::Error(err) => err.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for AdminPage {
    type Rejection = AdminPageRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state)
            .map(AdminPage)
            .map_err(|failure| match failure {
                SessionFailure::Missing => AdminPageRejection::Login,
                SessionFailure::Rejected(err) => AdminPageRejection::Error(err),
            })
    }
}
