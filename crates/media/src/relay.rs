//! Stage-then-forward upload pipeline.

use std::path::Path;
use std::sync::Arc;

use crate::error::MediaError;
use crate::host::{MediaHost, ResourceKind};
use crate::staging::{StagingArea, UploadedFile};

/// Forwards staged files to a [`MediaHost`], cleaning up after itself.
#[derive(Clone)]
pub struct MediaRelay {
    host: Arc<dyn MediaHost>,
    staging: StagingArea,
}

impl MediaRelay {
    pub fn new(host: Arc<dyn MediaHost>, staging: StagingArea) -> Self {
        Self { host, staging }
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    /// Upload an already-staged file.
    ///
    /// The local copy is removed only when the host accepted it. On failure
    /// the file is left in place and the host error is returned.
    pub async fn relay(&self, local_path: &Path, kind: ResourceKind) -> Result<String, MediaError> {
        let url = self.host.upload(local_path, kind).await?;

        if let Err(e) = tokio::fs::remove_file(local_path).await {
            tracing::warn!(
                path = %local_path.display(),
                error = %e,
                "Uploaded media but failed to remove staged file",
            );
        }
        Ok(url)
    }

    /// Stage one received file and relay it.
    pub async fn upload(&self, file: &UploadedFile, kind: ResourceKind) -> Result<String, MediaError> {
        let path = self.staging.stage(file).await?;
        self.relay(&path, kind).await
    }

    /// Upload files one at a time, returning URLs in submission order.
    ///
    /// Stops at the first failure. URLs already obtained are not retracted
    /// from the host; they are reported in the log as orphaned.
    pub async fn upload_all(
        &self,
        files: &[UploadedFile],
        kind: ResourceKind,
    ) -> Result<Vec<String>, MediaError> {
        let mut urls = Vec::with_capacity(files.len());
        for file in files {
            match self.upload(file, kind).await {
                Ok(url) => urls.push(url),
                Err(e) => {
                    if !urls.is_empty() {
                        tracing::warn!(
                            orphaned = urls.len(),
                            error = %e,
                            "Upload batch failed after partial success; uploaded media left on host",
                        );
                    }
                    return Err(e);
                }
            }
        }
        Ok(urls)
    }
}
