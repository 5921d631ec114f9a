use std::path::PathBuf;

use voyago_media::cloudinary::{DEFAULT_BASE_URL, DEFAULT_FOLDER};
use voyago_media::staging::DEFAULT_UPLOAD_DIR;
use voyago_media::CloudinaryConfig;

use crate::auth::jwt::JwtConfig;

/// Default multipart body cap: 25 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`).
    pub request_timeout_secs: u64,
    /// Maximum request body size for uploads, in bytes.
    pub max_upload_bytes: usize,
    /// PostgreSQL URL. `None` runs against the in-memory store.
    pub database_url: Option<String>,
    /// Session token configuration (secret, lifetime).
    pub jwt: JwtConfig,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// Media host credentials. `None` disables uploads.
    pub cloudinary: Option<CloudinaryConfig>,
    /// Local staging directory for uploads.
    pub upload_dir: PathBuf,
    /// Admin account created at startup when it does not exist yet.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Credentials for the startup admin account.
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                  |
    /// |----------------------------|--------------------------|
    /// | `HOST`                     | `0.0.0.0`                |
    /// | `PORT`                     | `5001`                   |
    /// | `CORS_ORIGINS`             | `http://localhost:5001`  |
    /// | `REQUEST_TIMEOUT_SECS`     | `60`                     |
    /// | `MAX_UPLOAD_BYTES`         | `26214400`               |
    /// | `DATABASE_URL`             | unset (in-memory store)  |
    /// | `COOKIE_SECURE`            | `true`                   |
    /// | `CLOUDINARY_CLOUD_NAME`    | unset (uploads disabled) |
    /// | `CLOUDINARY_API_KEY`       | unset                    |
    /// | `CLOUDINARY_API_SECRET`    | unset                    |
    /// | `CLOUDINARY_BASE_URL`      | `https://api.cloudinary.com/v1_1` |
    /// | `MEDIA_FOLDER`             | `tours`                  |
    /// | `UPLOAD_DIR`               | `public/assets/uploads`  |
    /// | `ADMIN_BOOTSTRAP_USERNAME` | unset                    |
    /// | `ADMIN_BOOTSTRAP_PASSWORD` | unset                    |
    ///
    /// JWT settings are documented on [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let cookie_secure: bool = std::env::var("COOKIE_SECURE")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("COOKIE_SECURE must be true or false");

        let cloudinary = match (
            non_empty_var("CLOUDINARY_CLOUD_NAME"),
            non_empty_var("CLOUDINARY_API_KEY"),
            non_empty_var("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(CloudinaryConfig {
                cloud_name,
                api_key,
                api_secret,
                folder: non_empty_var("MEDIA_FOLDER").unwrap_or_else(|| DEFAULT_FOLDER.into()),
                base_url: non_empty_var("CLOUDINARY_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            }),
            _ => None,
        };

        let bootstrap_admin = match (
            non_empty_var("ADMIN_BOOTSTRAP_USERNAME"),
            non_empty_var("ADMIN_BOOTSTRAP_PASSWORD"),
        ) {
            (Some(username), Some(password)) => Some(BootstrapAdmin { username, password }),
            _ => None,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_upload_bytes,
            database_url: non_empty_var("DATABASE_URL"),
            jwt: JwtConfig::from_env(),
            cookie_secure,
            cloudinary,
            upload_dir: non_empty_var("UPLOAD_DIR")
                .unwrap_or_else(|| DEFAULT_UPLOAD_DIR.into())
                .into(),
            bootstrap_admin,
        }
    }
}
