use error_location::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Stored code absent, blank, or mismatched.
    #[error("Invalid OTP {location}")]
    InvalidOtp { location: ErrorLocation },

    /// Code matched but its absolute expiry has passed.
    #[error("OTP expired {location}")]
    OtpExpired { location: ErrorLocation },
}

pub type Result<T> = StdResult<T, CoreError>;
