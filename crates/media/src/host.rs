//! The seam between the relay and whichever service stores the files.

use std::path::Path;

use async_trait::async_trait;

use crate::error::MediaError;

/// Resource class passed to the host, selecting its processing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Image,
    Video,
    /// Let the host detect the type from the content.
    Auto,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Image => "image",
            ResourceKind::Video => "video",
            ResourceKind::Auto => "auto",
        }
    }
}

/// An external store that accepts a local file and returns its public URL.
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Upload the file at `local_path`. Returns the secure URL on success.
    ///
    /// Implementations must not delete `local_path`; cleanup belongs to
    /// [`crate::MediaRelay`].
    async fn upload(&self, local_path: &Path, kind: ResourceKind) -> Result<String, MediaError>;
}

/// Placeholder host used when no credentials are configured.
///
/// Every upload fails with [`MediaError::NotConfigured`], so forms without
/// files keep working while uploads report a clear server error.
pub struct UnconfiguredHost;

#[async_trait]
impl MediaHost for UnconfiguredHost {
    async fn upload(&self, _local_path: &Path, _kind: ResourceKind) -> Result<String, MediaError> {
        Err(MediaError::NotConfigured)
    }
}
