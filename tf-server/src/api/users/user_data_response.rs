use tf_core::AccountView;

use serde::Serialize;

/// Public account view response
#[derive(Debug, Serialize)]
pub struct UserDataResponse {
    pub success: bool,

    /// Set by is-auth, absent on the user data endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(rename = "userData")]
    pub user_data: AccountView,
}

impl UserDataResponse {
    pub fn new(user_data: AccountView) -> Self {
        Self {
            success: true,
            message: None,
            user_data,
        }
    }

    pub fn authenticated(user_data: AccountView) -> Self {
        Self {
            success: true,
            message: Some("User is authenticated".to_string()),
            user_data,
        }
    }
}
