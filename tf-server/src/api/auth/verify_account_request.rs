use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct VerifyAccountRequest {
    /// Six-digit code from the login verification mail
    #[serde(default)]
    pub otp: Option<String>,
}
