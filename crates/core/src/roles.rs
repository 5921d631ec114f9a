//! Well-known role name constants carried in session tokens.

pub const ROLE_ADMIN: &str = "admin";
