use crate::error::{Result as ServerErrorResult, ServerError};

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;
use log::info;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:5000)
    pub bind_addr: SocketAddr,

    /// SQLite database file path (default: twofactor.db)
    pub database_path: PathBuf,

    /// JWT secret for HS256 signing and validation (required)
    pub jwt_secret: String,

    /// Browser origins allowed to send credentialed requests
    pub allowed_origins: Vec<String>,

    /// Mark session cookies Secure + SameSite=None (APP_ENV=production)
    pub secure_cookies: bool,

    /// Sender address for outgoing OTP mail
    pub sender_email: Option<String>,

    /// Mail provider endpoint
    pub mail_api_url: Option<String>,

    /// Mail provider API key
    pub mail_api_key: Option<String>,

    /// Log level (default: info)
    pub log_level: String,

    /// Enable colored logs (default: true)
    pub log_colored: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> ServerErrorResult<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:5000".to_string())
            .parse()
            .map_err(|source| ServerError::InvalidBindAddr { source })?;

        let jwt_secret = std::env::var("JWT_SECRET").map_err(|_| ServerError::MissingJwtSecret)?;
        if jwt_secret.is_empty() {
            return Err(ServerError::MissingJwtSecret);
        }

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Self {
            bind_addr,

            database_path: std::env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("twofactor.db")),

            jwt_secret,
            allowed_origins,
            secure_cookies: app_env == "production",

            sender_email: std::env::var("SENDER_EMAIL").ok(),
            mail_api_url: std::env::var("MAIL_API_URL").ok(),
            mail_api_key: std::env::var("MAIL_API_KEY").ok(),

            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            log_colored: std::env::var("LOG_COLORED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
        })
    }

    /// Parse the allowed origins into header values for the CORS layer
    pub fn cors_origins(&self) -> ServerErrorResult<Vec<HeaderValue>> {
        self.allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| ServerError::InvalidOrigin {
                    origin: origin.clone(),
                })
            })
            .collect()
    }

    /// True when the mail provider is fully configured
    pub fn mail_configured(&self) -> bool {
        self.mail_api_url.is_some() && self.mail_api_key.is_some() && self.sender_email.is_some()
    }

    /// Log a startup summary without leaking secrets
    pub fn log_summary(&self) {
        info!("Bind address: {}", self.bind_addr);
        info!("Database: {}", self.database_path.display());
        info!("Allowed origins: {}", self.allowed_origins.join(", "));
        info!("Secure cookies: {}", self.secure_cookies);
        if self.mail_configured() {
            info!("Mail: HTTP provider configured");
        } else {
            info!("Mail: not configured, OTP codes will be logged");
        }
    }
}
