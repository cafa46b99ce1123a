//! Public projection of an account for API responses.

use crate::Account;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What authenticated clients are allowed to see about an account.
/// Never contains the password hash or OTP fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub name: String,
    pub email: String,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "isAccountVerified")]
    pub is_account_verified: bool,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            name: account.name.clone(),
            email: account.email.clone(),
            user_id: account.id,
            is_account_verified: account.is_verified,
        }
    }
}
