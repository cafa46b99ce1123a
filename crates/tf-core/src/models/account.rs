//! Account entity - the single persistent record per registered user.

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user account.
///
/// Carries at most one outstanding login OTP and one outstanding reset OTP
/// at a time; issuing a new code overwrites the previous one. `None` models
/// the unset placeholder - verification against an unset code always fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    /// Globally unique; registration fails on a duplicate.
    pub email: String,
    /// Argon2 PHC string. Never exposed through the API.
    pub password_hash: String,
    pub is_verified: bool,
    pub login_otp: Option<String>,
    pub login_otp_expires_at: Option<DateTime<Utc>>,
    pub reset_otp: Option<String>,
    pub reset_otp_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with no outstanding OTPs.
    ///
    /// `is_verified` starts true: registration itself counts as the
    /// ownership check, while every login still runs the per-login OTP
    /// step-up independently.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            is_verified: true,
            login_otp: None,
            login_otp_expires_at: None,
            reset_otp: None,
            reset_otp_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check a presented code against the stored login OTP.
    ///
    /// Mismatch is reported before expiry: a wrong code on an expired slot
    /// is `InvalidOtp`, a correct code past its expiry is `OtpExpired`.
    #[track_caller]
    pub fn check_login_otp(&self, code: &str, now: DateTime<Utc>) -> CoreErrorResult<()> {
        check_otp(
            self.login_otp.as_deref(),
            self.login_otp_expires_at,
            code,
            now,
        )
    }

    /// Check a presented code against the stored reset OTP.
    #[track_caller]
    pub fn check_reset_otp(&self, code: &str, now: DateTime<Utc>) -> CoreErrorResult<()> {
        check_otp(
            self.reset_otp.as_deref(),
            self.reset_otp_expires_at,
            code,
            now,
        )
    }
}

/// Shared single-use code check. A blank or absent stored code never
/// matches anything; an absent expiry on a matching code counts as expired.
#[track_caller]
fn check_otp(
    stored: Option<&str>,
    expires_at: Option<DateTime<Utc>>,
    code: &str,
    now: DateTime<Utc>,
) -> CoreErrorResult<()> {
    let matches = match stored {
        Some(stored) if !stored.trim().is_empty() => stored == code,
        _ => false,
    };
    if !matches {
        return Err(CoreError::InvalidOtp {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let expired = match expires_at {
        Some(expires_at) => expires_at < now,
        None => true,
    };
    if expired {
        return Err(CoreError::OtpExpired {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(())
}
