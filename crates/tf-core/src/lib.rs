pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use models::account::Account;
pub use models::account_view::AccountView;
pub use models::otp_purpose::OtpPurpose;
