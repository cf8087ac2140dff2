//! Configuration module for the parish backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Placeholder session secret that must not be used outside development.
pub const DEV_SESSION_SECRET: &str = "dev-secret-change-me";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Directory where uploaded assets are stored
    pub upload_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Secret used to sign admin session tokens
    pub session_secret: String,
    /// Session token lifetime in hours
    pub session_ttl_hours: i64,
    /// Base URL prepended to upload paths in API responses (optional)
    pub public_base_url: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("PARISH_DB_PATH")
            .unwrap_or_else(|_| "./data/parish.sqlite".to_string())
            .into();

        let upload_dir = env::var("PARISH_UPLOAD_DIR")
            .unwrap_or_else(|_| "./data/uploads".to_string())
            .into();

        let bind_addr = env::var("PARISH_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid PARISH_BIND_ADDR format");

        let session_secret =
            env::var("PARISH_SESSION_SECRET").unwrap_or_else(|_| DEV_SESSION_SECRET.to_string());

        let session_ttl_hours = env::var("PARISH_SESSION_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);

        let public_base_url = env::var("PARISH_PUBLIC_BASE_URL")
            .ok()
            .map(|url| url.trim_end_matches('/').to_string());

        let request_timeout_secs = env::var("PARISH_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let log_level = env::var("PARISH_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            db_path,
            upload_dir,
            bind_addr,
            session_secret,
            session_ttl_hours,
            public_base_url,
            request_timeout_secs,
            log_level,
        }
    }

    /// Whether the session secret is still the development placeholder.
    pub fn uses_dev_secret(&self) -> bool {
        self.session_secret == DEV_SESSION_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("PARISH_DB_PATH");
        env::remove_var("PARISH_UPLOAD_DIR");
        env::remove_var("PARISH_BIND_ADDR");
        env::remove_var("PARISH_SESSION_SECRET");
        env::remove_var("PARISH_SESSION_TTL_HOURS");
        env::remove_var("PARISH_PUBLIC_BASE_URL");
        env::remove_var("PARISH_REQUEST_TIMEOUT_SECS");
        env::remove_var("PARISH_LOG_LEVEL");

        let config = Config::from_env();

        assert_eq!(config.db_path, PathBuf::from("./data/parish.sqlite"));
        assert_eq!(config.upload_dir, PathBuf::from("./data/uploads"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert!(config.uses_dev_secret());
        assert_eq!(config.session_ttl_hours, 24);
        assert!(config.public_base_url.is_none());
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.log_level, "info");

        // Trailing slash on the public base URL is stripped
        env::set_var("PARISH_PUBLIC_BASE_URL", "https://cms.example.org/");
        let config = Config::from_env();
        assert_eq!(
            config.public_base_url.as_deref(),
            Some("https://cms.example.org")
        );
        env::remove_var("PARISH_PUBLIC_BASE_URL");
    }
}
