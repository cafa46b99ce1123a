//! REST API error types
//!
//! Every error renders as HTTP 200 with a `{success: false, message}`
//! body. Clients branch on the success flag and message, never on the
//! status code. The variant and source location are logged server-side.

use tf_auth::AuthError;
use tf_core::CoreError;
use tf_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Required request fields missing or blank
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    /// Registration against an email that already has an account
    #[error("Duplicate account {location}")]
    DuplicateAccount { location: ErrorLocation },

    /// Account lookup miss
    #[error("Account not found {location}")]
    NotFound { location: ErrorLocation },

    /// Password check failed
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    /// Verification request without a code
    #[error("OTP missing from request {location}")]
    OtpRequired { location: ErrorLocation },

    /// Submitted code does not match the stored one
    #[error("Invalid OTP {location}")]
    InvalidOtp { location: ErrorLocation },

    /// Submitted code matches but is past its expiry
    #[error("OTP expired {location}")]
    OtpExpired { location: ErrorLocation },

    /// Missing, invalid, or insufficient session token
    #[error("Unauthenticated: {message} {location}")]
    Unauthenticated {
        message: String,
        location: ErrorLocation,
    },

    /// Internal failure; the message is logged, never sent to clients
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log the error with location for debugging
        log::error!("{}", self);

        let message = match self {
            ApiError::Validation { message, .. } => message,
            ApiError::DuplicateAccount { .. } => "User already exists".to_string(),
            ApiError::NotFound { .. } => "User not found".to_string(),
            ApiError::InvalidCredentials { .. } => "Invalid password".to_string(),
            ApiError::OtpRequired { .. } => "OTP required".to_string(),
            ApiError::InvalidOtp { .. } => "Invalid OTP".to_string(),
            ApiError::OtpExpired { .. } => "OTP expired".to_string(),
            ApiError::Unauthenticated { message, .. } => message,
            ApiError::Internal { .. } => "Something went wrong".to_string(),
        };

        let body = serde_json::json!({
            "success": false,
            "message": message,
        });

        (StatusCode::OK, Json(body)).into_response()
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        match e {
            DbError::DuplicateEmail { .. } => ApiError::DuplicateAccount {
                location: ErrorLocation::from(Location::caller()),
            },
            DbError::Sqlx { .. } | DbError::Initialization { .. } => {
                log::error!("Database error: {}", e);
                ApiError::Internal {
                    message: "Database operation failed".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
        }
    }
}

/// Convert OTP check failures to API errors
impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidOtp { .. } => ApiError::InvalidOtp {
                location: ErrorLocation::from(Location::caller()),
            },
            CoreError::OtpExpired { .. } => ApiError::OtpExpired {
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

/// Convert token and hashing errors to API errors
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::TokenExpired { .. }
            | AuthError::JwtDecode { .. }
            | AuthError::InvalidClaim { .. } => ApiError::Unauthenticated {
                message: "Authentication failed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
            AuthError::JwtEncode { .. } | AuthError::PasswordHash { .. } => {
                log::error!("Auth error: {}", e);
                ApiError::Internal {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
