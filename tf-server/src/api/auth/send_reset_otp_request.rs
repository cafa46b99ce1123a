use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SendResetOtpRequest {
    #[serde(default)]
    pub email: Option<String>,
}
