use serde::Serialize;

/// Uniform success envelope for the auth endpoints
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,

    pub message: String,

    /// Set on login to signal that an OTP check is still pending
    #[serde(rename = "requiresVerification", skip_serializing_if = "Option::is_none")]
    pub requires_verification: Option<bool>,
}

impl AuthResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            requires_verification: None,
        }
    }

    pub fn otp_pending(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            requires_verification: Some(true),
        }
    }
}
