//! Authentication REST API handlers
//!
//! Login is two-step: a password check issues a provisional token and
//! mails a one-time code; verifying the code upgrades the session to a
//! full token. Mail delivery is best-effort, the stored code stays
//! valid and can be resent.

use crate::api::cookies::{self, PROVISIONAL_COOKIE, SESSION_COOKIE};
use crate::{
    ApiError, ApiResult, AppState, AuthResponse, FullSession, LoginRequest, RegisterRequest,
    ResetPasswordRequest, SendResetOtpRequest, Session, UserDataResponse, VerifyAccountRequest,
};

use tf_auth::{TokenScope, otp, password};
use tf_core::{Account, AccountView, OtpPurpose};
use tf_db::AccountRepository;

use std::panic::Location;

use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use error_location::ErrorLocation;

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/auth/register
///
/// Create an account. The password is hashed before storage and the
/// caller still goes through the OTP login afterwards.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (Some(name), Some(email), Some(plain)) = (
        required(req.name),
        required(req.email),
        required(req.password),
    ) else {
        return Err(validation("Missing details"));
    };

    let repo = AccountRepository::new(state.pool.clone());
    if repo.find_by_email(&email).await?.is_some() {
        return Err(ApiError::DuplicateAccount {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let password_hash = password::hash(&plain)?;
    let account = Account::new(name, email, password_hash);
    repo.create(&account).await?;

    Ok(Json(AuthResponse::ok(
        "Registration successful. You can now login.",
    )))
}

/// POST /api/auth/login
///
/// Check the password, stage a login OTP, and hand out a provisional
/// token. The session is not authenticated until the OTP is verified.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let (Some(email), Some(plain)) = (required(req.email), required(req.password)) else {
        return Err(validation("Email and password required"));
    };

    let repo = AccountRepository::new(state.pool.clone());
    let account = repo
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            location: ErrorLocation::from(Location::caller()),
        })?;

    if !password::verify(&plain, &account.password_hash)? {
        return Err(ApiError::InvalidCredentials {
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let code = otp::generate();
    repo.set_login_otp(account.id, &code, otp::expiry_from(Utc::now()))
        .await?;
    send_code(&state, &account, OtpPurpose::LoginVerification, &code).await;

    let token = state
        .token_issuer
        .issue(account.id, TokenScope::Provisional)?;
    let jar = jar.add(cookies::session_cookie(
        TokenScope::Provisional,
        token,
        state.secure_cookies,
    ));

    Ok((
        jar,
        Json(AuthResponse::otp_pending(
            "Please verify your login with the OTP sent to your email",
        )),
    ))
}

/// POST /api/auth/logout
///
/// Clear both session cookies. Idempotent, requires no token.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<AuthResponse>) {
    let jar = jar
        .add(cookies::removal_cookie(SESSION_COOKIE, state.secure_cookies))
        .add(cookies::removal_cookie(
            PROVISIONAL_COOKIE,
            state.secure_cookies,
        ));

    (jar, Json(AuthResponse::ok("Logout Success")))
}

/// POST /api/auth/send-verify-otp
///
/// Re-issue a fresh login OTP. Reachable with a provisional token so a
/// caller mid-login can request a resend.
pub async fn send_verify_otp(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<AuthResponse>> {
    let repo = AccountRepository::new(state.pool.clone());
    let account = repo
        .find_by_id(session.account_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            location: ErrorLocation::from(Location::caller()),
        })?;

    let code = otp::generate();
    repo.set_login_otp(account.id, &code, otp::expiry_from(Utc::now()))
        .await?;
    send_code(&state, &account, OtpPurpose::LoginVerification, &code).await;

    Ok(Json(AuthResponse::ok("OTP sent to your email")))
}

/// POST /api/auth/verify-account
///
/// Check the submitted OTP against the stored one. Success consumes the
/// code, marks the account verified, and upgrades to a full session.
pub async fn verify_account(
    State(state): State<AppState>,
    jar: CookieJar,
    session: Session,
    Json(req): Json<VerifyAccountRequest>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let Some(code) = required(req.otp) else {
        return Err(ApiError::OtpRequired {
            location: ErrorLocation::from(Location::caller()),
        });
    };

    let repo = AccountRepository::new(state.pool.clone());
    let account = repo
        .find_by_id(session.account_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            location: ErrorLocation::from(Location::caller()),
        })?;

    account.check_login_otp(&code, Utc::now())?;
    repo.consume_login_otp(account.id).await?;

    let token = state.token_issuer.issue(account.id, TokenScope::Full)?;
    let jar = jar
        .add(cookies::removal_cookie(
            PROVISIONAL_COOKIE,
            state.secure_cookies,
        ))
        .add(cookies::session_cookie(
            TokenScope::Full,
            token,
            state.secure_cookies,
        ));

    Ok((jar, Json(AuthResponse::ok("Login successful"))))
}

/// GET /api/auth/is-auth
///
/// Resolve the caller's account from a full session token.
pub async fn is_auth(
    State(state): State<AppState>,
    session: FullSession,
) -> ApiResult<Json<UserDataResponse>> {
    let repo = AccountRepository::new(state.pool.clone());
    let account = repo
        .find_by_id(session.0)
        .await?
        .ok_or_else(|| ApiError::Unauthenticated {
            message: "User not found".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(Json(UserDataResponse::authenticated(AccountView::from(
        &account,
    ))))
}

/// POST /api/auth/send-reset-otp
///
/// Stage a password-reset OTP for the given email. Requires no session.
pub async fn send_reset_otp(
    State(state): State<AppState>,
    Json(req): Json<SendResetOtpRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let Some(email) = required(req.email) else {
        return Err(validation("Email required"));
    };

    let repo = AccountRepository::new(state.pool.clone());
    let account = repo
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            location: ErrorLocation::from(Location::caller()),
        })?;

    let code = otp::generate();
    repo.set_reset_otp(account.id, &code, otp::expiry_from(Utc::now()))
        .await?;
    send_code(&state, &account, OtpPurpose::PasswordReset, &code).await;

    Ok(Json(AuthResponse::ok("OTP sent to your email")))
}

/// POST /api/auth/reset-password
///
/// Check the reset OTP and replace the password hash. The stored code
/// is cleared in the same statement as the hash update.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (Some(email), Some(code), Some(new_password)) = (
        required(req.email),
        required(req.otp),
        required(req.new_password),
    ) else {
        return Err(validation("Email, OTP and new password required"));
    };

    let repo = AccountRepository::new(state.pool.clone());
    let account = repo
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            location: ErrorLocation::from(Location::caller()),
        })?;

    account.check_reset_otp(&code, Utc::now())?;

    let password_hash = password::hash(&new_password)?;
    repo.reset_password(account.id, &password_hash).await?;

    Ok(Json(AuthResponse::ok("Password reset successfully")))
}

// =============================================================================
// Helpers
// =============================================================================

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[track_caller]
fn validation(message: &str) -> ApiError {
    ApiError::Validation {
        message: message.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Delivery failure is logged, not surfaced; the stored code stays
/// valid and the caller can request a resend.
async fn send_code(state: &AppState, account: &Account, purpose: OtpPurpose, code: &str) {
    if let Err(e) = state
        .mailer
        .send_otp(&account.email, &account.name, purpose, code)
        .await
    {
        log::warn!("OTP mail delivery failed for {}: {}", account.email, e);
    }
}
