pub mod auth;
pub mod auth_response;
pub mod login_request;
pub mod register_request;
pub mod reset_password_request;
pub mod send_reset_otp_request;
pub mod verify_account_request;
