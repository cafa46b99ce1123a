//! The two purposes a one-time code can be issued for.

use serde::{Deserialize, Serialize};

/// Login verification and password reset codes live in separate account
/// fields and never interfere with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OtpPurpose {
    LoginVerification,
    PasswordReset,
}

impl OtpPurpose {
    /// Mail subject line for this purpose.
    pub fn subject(&self) -> &'static str {
        match self {
            Self::LoginVerification => "Login Verification",
            Self::PasswordReset => "Reset your password",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoginVerification => "login-verification",
            Self::PasswordReset => "password-reset",
        }
    }
}
