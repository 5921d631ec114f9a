//! Domain building blocks shared by the store, media and HTTP crates.
//!
//! Nothing in here performs I/O. The modules hold the rules that every
//! admin controller applies the same way: slug derivation, form-field
//! normalization, trip-time formatting, image-list mutation and password
//! hashing.

pub mod error;
pub mod media_list;
pub mod normalize;
pub mod package;
pub mod password;
pub mod roles;
pub mod slug;
pub mod tour;
pub mod trip_time;
pub mod types;
