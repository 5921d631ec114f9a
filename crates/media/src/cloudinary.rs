//! Cloudinary-compatible signed upload client.
//!
//! Uploads go to `POST {base_url}/{cloud_name}/{kind}/upload` as multipart
//! with `api_key`, `timestamp`, `folder` and a SHA-256 signature over the
//! sorted signable parameters followed by the API secret.

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::error::MediaError;
use crate::host::{MediaHost, ResourceKind};

/// Default API root for the hosted service.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Default destination folder for every upload.
pub const DEFAULT_FOLDER: &str = "tours";

/// Credentials and destination for [`CloudinaryHost`].
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: String,
    pub base_url: String,
}

/// Cloudinary-backed [`MediaHost`].
pub struct CloudinaryHost {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    error: Option<HostErrorBody>,
}

#[derive(Debug, Deserialize)]
struct HostErrorBody {
    message: String,
}

impl CloudinaryHost {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn upload_url(&self, kind: ResourceKind) -> String {
        format!(
            "{}/{}/{}/upload",
            self.config.base_url.trim_end_matches('/'),
            self.config.cloud_name,
            kind.as_str()
        )
    }
}

/// Compute the request signature: `k1=v1&k2=v2...` sorted by key, with the
/// secret appended, hashed with SHA-256 and hex-encoded.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, &str)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Pull the secure URL out of a host response body, or explain why not.
fn parse_upload_response(status: u16, body: &str) -> Result<String, MediaError> {
    let parsed: UploadResponse = serde_json::from_str(body)
        .map_err(|e| MediaError::InvalidResponse(format!("undecodable body: {e}")))?;

    if let Some(err) = parsed.error {
        return Err(MediaError::Rejected {
            status,
            message: err.message,
        });
    }
    if !(200..300).contains(&status) {
        return Err(MediaError::Rejected {
            status,
            message: body.chars().take(200).collect(),
        });
    }
    parsed
        .secure_url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| MediaError::InvalidResponse("missing secure_url".to_string()))
}

#[async_trait]
impl MediaHost for CloudinaryHost {
    async fn upload(&self, local_path: &Path, kind: ResourceKind) -> Result<String, MediaError> {
        let bytes = tokio::fs::read(local_path).await?;
        let file_name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[
                ("folder", self.config.folder.as_str()),
                ("timestamp", timestamp.as_str()),
            ],
            &self.config.api_secret,
        );

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", self.config.folder.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .client
            .post(self.upload_url(kind))
            .multipart(form)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        let url = parse_upload_response(status, &body)?;
        tracing::debug!(url = %url, kind = kind.as_str(), "Media uploaded");
        Ok(url)
    }
}
