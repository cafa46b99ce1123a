//! One-time code generation.
//!
//! Codes are 6-digit decimal strings drawn uniformly from
//! [100000, 999999]. Expiry is always issued-at + 24 hours for both the
//! login and reset flows; there is no per-call TTL.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Fixed validity window for every issued code.
pub const OTP_VALIDITY_HOURS: i64 = 24;

/// Generate a fresh 6-digit code.
pub fn generate() -> String {
    rand::rng().random_range(100_000..=999_999).to_string()
}

/// Absolute expiry for a code issued at `issued_at`.
pub fn expiry_from(issued_at: DateTime<Utc>) -> DateTime<Utc> {
    issued_at + Duration::hours(OTP_VALIDITY_HOURS)
}
