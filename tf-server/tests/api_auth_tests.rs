//! Integration tests for registration, login, and logout
mod common;

use crate::common::{
    body_json, cookie_pair, create_test_app_state, login_provisional, post_json, register_account,
    set_cookie_header, stored_login_otp,
};

use tf_db::AccountRepository;

use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let state = create_test_app_state().await;

    let response = post_json(
        &state,
        "/api/auth/register",
        json!({ "name": "Ann", "email": "ann@x.com", "password": "hunter22" }),
        None,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Registration successful. You can now login.");

    let repo = AccountRepository::new(state.pool.clone());
    let account = repo.find_by_email("ann@x.com").await.unwrap().unwrap();
    assert_eq!(account.name, "Ann");
    assert!(account.is_verified);
    // Stored as an argon2 hash, never the plaintext
    assert_ne!(account.password_hash, "hunter22");
    assert!(account.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_register_missing_fields() {
    let state = create_test_app_state().await;

    let response = post_json(
        &state,
        "/api/auth/register",
        json!({ "name": "Ann" }),
        None,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Missing details");
}

#[tokio::test]
async fn test_register_blank_fields_rejected() {
    let state = create_test_app_state().await;

    let response = post_json(
        &state,
        "/api/auth/register",
        json!({ "name": "Ann", "email": "  ", "password": "hunter22" }),
        None,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Missing details");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let state = create_test_app_state().await;
    register_account(&state, "Ann", "ann@x.com", "hunter22").await;

    let response = post_json(
        &state,
        "/api/auth/register",
        json!({ "name": "Other Ann", "email": "ann@x.com", "password": "different" }),
        None,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "User already exists");
}

#[tokio::test]
async fn test_login_stages_otp_and_sets_provisional_cookie() {
    let state = create_test_app_state().await;
    register_account(&state, "Ann", "ann@x.com", "hunter22").await;

    let response = post_json(
        &state,
        "/api/auth/login",
        json!({ "email": "ann@x.com", "password": "hunter22" }),
        None,
    )
    .await;

    let temp_cookie = set_cookie_header(&response, "tempToken")
        .expect("login should set a tempToken cookie");
    assert!(temp_cookie.contains("HttpOnly"));

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(
        json["message"],
        "Please verify your login with the OTP sent to your email"
    );
    assert_eq!(json["requiresVerification"], true);

    let code = stored_login_otp(&state, "ann@x.com").await.unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_login_unknown_email() {
    let state = create_test_app_state().await;

    let response = post_json(
        &state,
        "/api/auth/login",
        json!({ "email": "nobody@x.com", "password": "hunter22" }),
        None,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "User not found");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let state = create_test_app_state().await;
    register_account(&state, "Ann", "ann@x.com", "hunter22").await;

    let response = post_json(
        &state,
        "/api/auth/login",
        json!({ "email": "ann@x.com", "password": "wrong" }),
        None,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid password");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let state = create_test_app_state().await;

    let response = post_json(
        &state,
        "/api/auth/login",
        json!({ "email": "ann@x.com" }),
        None,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Email and password required");
}

#[tokio::test]
async fn test_relogin_overwrites_staged_otp() {
    let state = create_test_app_state().await;
    register_account(&state, "Ann", "ann@x.com", "hunter22").await;

    let _first = login_provisional(&state, "ann@x.com", "hunter22").await;
    let _second = login_provisional(&state, "ann@x.com", "hunter22").await;

    // Exactly one staged code remains
    let code = stored_login_otp(&state, "ann@x.com").await;
    assert!(code.is_some());
}

#[tokio::test]
async fn test_logout_clears_both_cookies() {
    let state = create_test_app_state().await;

    let response = post_json(&state, "/api/auth/logout", json!({}), None).await;

    let token = set_cookie_header(&response, "token").expect("logout should clear token");
    let temp = set_cookie_header(&response, "tempToken").expect("logout should clear tempToken");
    assert!(token.contains("Max-Age=0"));
    assert!(temp.contains("Max-Age=0"));
    assert_eq!(cookie_pair(&response, "token").unwrap(), "token=");

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Logout Success");
}
