//! Integration tests for the password reset flow
mod common;

use crate::common::{
    account_id, body_json, create_test_app_state, post_json, register_account, stored_reset_otp,
    wrong_code,
};

use tf_db::AccountRepository;

use chrono::{Duration, Utc};
use serde_json::json;

#[tokio::test]
async fn test_send_reset_otp_stages_code() {
    let state = create_test_app_state().await;
    register_account(&state, "Ann", "ann@x.com", "hunter22").await;

    let response = post_json(
        &state,
        "/api/auth/send-reset-otp",
        json!({ "email": "ann@x.com" }),
        None,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "OTP sent to your email");

    let code = stored_reset_otp(&state, "ann@x.com").await.unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_send_reset_otp_unknown_email() {
    let state = create_test_app_state().await;

    let response = post_json(
        &state,
        "/api/auth/send-reset-otp",
        json!({ "email": "nobody@x.com" }),
        None,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "User not found");
}

#[tokio::test]
async fn test_send_reset_otp_missing_email() {
    let state = create_test_app_state().await;

    let response = post_json(&state, "/api/auth/send-reset-otp", json!({}), None).await;

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Email required");
}

#[tokio::test]
async fn test_reset_password_happy_path() {
    let state = create_test_app_state().await;
    register_account(&state, "Ann", "ann@x.com", "hunter22").await;

    post_json(
        &state,
        "/api/auth/send-reset-otp",
        json!({ "email": "ann@x.com" }),
        None,
    )
    .await;
    let code = stored_reset_otp(&state, "ann@x.com").await.unwrap();

    let response = post_json(
        &state,
        "/api/auth/reset-password",
        json!({ "email": "ann@x.com", "otp": code, "newPassword": "n3w-secret" }),
        None,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Password reset successfully");

    // Old password no longer works
    let response = post_json(
        &state,
        "/api/auth/login",
        json!({ "email": "ann@x.com", "password": "hunter22" }),
        None,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid password");

    // New password does
    let response = post_json(
        &state,
        "/api/auth/login",
        json!({ "email": "ann@x.com", "password": "n3w-secret" }),
        None,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["requiresVerification"], true);
}

#[tokio::test]
async fn test_reset_password_wrong_otp() {
    let state = create_test_app_state().await;
    register_account(&state, "Ann", "ann@x.com", "hunter22").await;

    post_json(
        &state,
        "/api/auth/send-reset-otp",
        json!({ "email": "ann@x.com" }),
        None,
    )
    .await;
    let code = stored_reset_otp(&state, "ann@x.com").await.unwrap();

    let response = post_json(
        &state,
        "/api/auth/reset-password",
        json!({ "email": "ann@x.com", "otp": wrong_code(&code), "newPassword": "n3w-secret" }),
        None,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid OTP");
}

#[tokio::test]
async fn test_reset_password_without_staged_code() {
    let state = create_test_app_state().await;
    register_account(&state, "Ann", "ann@x.com", "hunter22").await;

    // No send-reset-otp call; the stored code is absent and can never match
    let response = post_json(
        &state,
        "/api/auth/reset-password",
        json!({ "email": "ann@x.com", "otp": "123456", "newPassword": "n3w-secret" }),
        None,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid OTP");
}

#[tokio::test]
async fn test_reset_password_expired_otp() {
    let state = create_test_app_state().await;
    register_account(&state, "Ann", "ann@x.com", "hunter22").await;

    let id = account_id(&state, "ann@x.com").await;
    let repo = AccountRepository::new(state.pool.clone());
    repo.set_reset_otp(id, "123456", Utc::now() - Duration::hours(1))
        .await
        .unwrap();

    let response = post_json(
        &state,
        "/api/auth/reset-password",
        json!({ "email": "ann@x.com", "otp": "123456", "newPassword": "n3w-secret" }),
        None,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "OTP expired");
}

#[tokio::test]
async fn test_reset_password_missing_fields() {
    let state = create_test_app_state().await;

    let response = post_json(
        &state,
        "/api/auth/reset-password",
        json!({ "email": "ann@x.com", "otp": "123456" }),
        None,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Email, OTP and new password required");
}

#[tokio::test]
async fn test_reset_code_is_single_use() {
    let state = create_test_app_state().await;
    register_account(&state, "Ann", "ann@x.com", "hunter22").await;

    post_json(
        &state,
        "/api/auth/send-reset-otp",
        json!({ "email": "ann@x.com" }),
        None,
    )
    .await;
    let code = stored_reset_otp(&state, "ann@x.com").await.unwrap();

    let response = post_json(
        &state,
        "/api/auth/reset-password",
        json!({ "email": "ann@x.com", "otp": code.clone(), "newPassword": "n3w-secret" }),
        None,
    )
    .await;
    assert_eq!(body_json(response).await["success"], true);

    // Replaying the consumed code fails
    let response = post_json(
        &state,
        "/api/auth/reset-password",
        json!({ "email": "ann@x.com", "otp": code, "newPassword": "another-one" }),
        None,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid OTP");
}
