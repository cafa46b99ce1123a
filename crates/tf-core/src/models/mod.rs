pub mod account;
pub mod account_view;
pub mod otp_purpose;
