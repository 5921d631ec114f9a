pub mod admin;
pub mod blog;
pub mod category;
pub mod package;
pub mod ticket;
pub mod tour;
