//! Media relay: stage uploaded bytes on local disk, forward them to an
//! external media host, and hand back durable URLs.

pub mod cloudinary;
pub mod error;
pub mod host;
pub mod relay;
pub mod staging;

pub use cloudinary::{CloudinaryConfig, CloudinaryHost};
pub use error::MediaError;
pub use host::{MediaHost, ResourceKind, UnconfiguredHost};
pub use relay::MediaRelay;
pub use staging::{StagingArea, UploadedFile};
