//! Local staging of uploaded bytes before they are relayed.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::MediaError;

/// Default staging directory, relative to the working directory.
pub const DEFAULT_UPLOAD_DIR: &str = "public/assets/uploads";

/// One file part received from a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name, used only for its extension.
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A directory where uploads are written as `{unix-millis}{-n}{.ext}`.
#[derive(Debug, Clone)]
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `file` into the staging directory and return its path.
    ///
    /// Never overwrites: when the millisecond name is taken a `-1`, `-2`, ...
    /// suffix is tried.
    pub async fn stage(&self, file: &UploadedFile) -> Result<PathBuf, MediaError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let stem = chrono::Utc::now().timestamp_millis().to_string();
        let ext = extension_of(file.file_name.as_deref());

        for attempt in 0u32.. {
            let name = if attempt == 0 {
                format!("{stem}{ext}")
            } else {
                format!("{stem}-{attempt}{ext}")
            };
            let path = self.dir.join(name);
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut handle) => {
                    handle.write_all(&file.bytes).await?;
                    handle.flush().await?;
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }
        unreachable!("u32 range exhausted while staging upload")
    }
}

/// `.ext` of the client file name, lowercased and restricted to ASCII
/// alphanumerics. Empty when there is no usable extension.
fn extension_of(file_name: Option<&str>) -> String {
    let Some(ext) = file_name
        .and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
    else {
        return String::new();
    };
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return String::new();
    }
    format!(".{}", ext.to_ascii_lowercase())
}
