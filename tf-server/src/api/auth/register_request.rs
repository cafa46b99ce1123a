use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Display name (required)
    #[serde(default)]
    pub name: Option<String>,

    /// Unique email address (required)
    #[serde(default)]
    pub email: Option<String>,

    /// Plaintext password, hashed before storage (required)
    #[serde(default)]
    pub password: Option<String>,
}
