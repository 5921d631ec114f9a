//! Session extractors for admin routes.
//!
//! - [`auth::AdminSession`] -- JSON endpoints; rejects with 401 / 403.
//! - [`auth::AdminPage`] -- page routes; redirects to the login page when
//!   no session cookie is present.

pub mod auth;
