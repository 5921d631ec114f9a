#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Staging I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Media host request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Media host rejected upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Media host returned an unusable response: {0}")]
    InvalidResponse(String),

    #[error("No media host is configured")]
    NotConfigured,
}
