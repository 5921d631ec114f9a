//! The `token` session cookie.

use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config::ServerConfig;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// Build the session cookie: HttpOnly, SameSite=Strict, Path=/, living as
/// long as the token itself.
pub fn session_cookie(token: String, config: &ServerConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(config.jwt.expiry_secs()))
        .build()
}

/// An empty, already-expired session cookie that makes the browser drop it.
pub fn clear_session_cookie(config: &ServerConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::ZERO)
        .build()
}
