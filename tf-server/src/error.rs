use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid BIND_ADDR: {source}")]
    InvalidBindAddr {
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("JWT_SECRET must be set")]
    MissingJwtSecret,

    #[error("Invalid origin in ALLOWED_ORIGINS: {origin}")]
    InvalidOrigin { origin: String },

    #[error("Environment variable error: {message}")]
    EnvVar { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
