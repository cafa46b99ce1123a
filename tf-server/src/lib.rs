pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod logger;
pub mod mailer;
pub mod routes;
pub mod state;

pub use api::{
    auth::{
        auth::{
            is_auth, login, logout, register, reset_password, send_reset_otp, send_verify_otp,
            verify_account,
        },
        auth_response::AuthResponse,
        login_request::LoginRequest,
        register_request::RegisterRequest,
        reset_password_request::ResetPasswordRequest,
        send_reset_otp_request::SendResetOtpRequest,
        verify_account_request::VerifyAccountRequest,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::session::{FullSession, Session},
    users::{user_data_response::UserDataResponse, users::get_user_data},
};

pub use crate::routes::build_router;
pub use crate::state::AppState;
