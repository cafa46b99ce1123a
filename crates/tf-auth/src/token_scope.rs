//! Session token classes.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// The two token classes, distinguished only by claim payload and lifetime.
///
/// A provisional token marks "password checked, OTP pending" and is only
/// honored by the verification endpoints; a full token marks an
/// authenticated session. Modeling the distinction as a claim lets the
/// authorization layer pattern-match instead of inspecting cookie names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenScope {
    /// Issued after the password check, before OTP verification. 1 hour.
    Provisional,
    /// Issued after OTP verification. 24 hours.
    Full,
}

impl TokenScope {
    /// Token lifetime for this scope.
    pub fn lifetime(&self) -> Duration {
        match self {
            Self::Provisional => Duration::hours(1),
            Self::Full => Duration::hours(24),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provisional => "provisional",
            Self::Full => "full",
        }
    }
}
