//! Authentication primitives.
//!
//! - [`jwt`] -- session token generation and validation.
//! - [`cookie`] -- the `token` cookie carrying the session.

pub mod cookie;
pub mod jwt;
