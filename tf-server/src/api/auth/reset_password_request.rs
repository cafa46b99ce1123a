use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: Option<String>,

    /// Six-digit code from the reset mail
    #[serde(default)]
    pub otp: Option<String>,

    #[serde(default, rename = "newPassword")]
    pub new_password: Option<String>,
}
