use serde::Deserialize;

use safereturn_core::config::Config;

fn default_api_port() -> u16 {
    3111
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

/// API service configuration loaded from environment variables
/// (`DATABASE_URL`, `JWT_SECRET`, `COOKIE_DOMAIN`, `API_PORT`, `UPLOAD_DIR`).
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HS256 signing secret for access and refresh tokens.
    pub jwt_secret: String,
    /// Domain attribute on token cookies.
    pub cookie_domain: String,
    /// TCP port for the HTTP server (default 3111).
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Directory that uploaded photos are written to (default "uploads").
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
}

impl Config for ApiConfig {}
