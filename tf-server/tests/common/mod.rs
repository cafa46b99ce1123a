#![allow(dead_code)]

//! Test infrastructure for tf-server API tests

use tf_server::mailer::LogMailer;
use tf_server::{AppState, build_router};

use tf_auth::{JwtValidator, TokenIssuer};
use tf_db::AccountRepository;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, header};
use axum::response::Response;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"test-secret";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    sqlx::migrate!("../crates/tf-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing
pub async fn create_test_app_state() -> AppState {
    let pool = create_test_pool().await;

    AppState {
        pool,
        token_issuer: Arc::new(TokenIssuer::new(TEST_SECRET)),
        jwt_validator: Arc::new(JwtValidator::with_hs256(TEST_SECRET)),
        mailer: Arc::new(LogMailer),
        cors_origins: Vec::new(),
        secure_cookies: false,
    }
}

/// POST a JSON body, optionally with a Cookie header
pub async fn post_json(
    state: &AppState,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Response {
    let app = build_router(state.clone());

    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// GET a route, optionally with a Cookie header
pub async fn http_get(state: &AppState, uri: &str, cookie: Option<&str>) -> Response {
    let app = build_router(state.clone());

    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = builder.body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON
pub async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Find a Set-Cookie header for `name` and return its `name=value` pair
pub fn cookie_pair(response: &Response, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|raw| {
            let pair = raw.split(';').next()?.trim();
            pair.starts_with(&prefix).then(|| pair.to_string())
        })
}

/// The raw Set-Cookie header for `name`, attributes included
pub fn set_cookie_header(response: &Response, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|raw| raw.starts_with(&prefix))
        .map(|raw| raw.to_string())
}

/// Register an account through the API
pub async fn register_account(state: &AppState, name: &str, email: &str, password: &str) {
    let response = post_json(
        state,
        "/api/auth/register",
        serde_json::json!({ "name": name, "email": email, "password": password }),
        None,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["success"], true, "registration failed: {json}");
}

/// Log in and return the provisional `tempToken=...` cookie pair
pub async fn login_provisional(state: &AppState, email: &str, password: &str) -> String {
    let response = post_json(
        state,
        "/api/auth/login",
        serde_json::json!({ "email": email, "password": password }),
        None,
    )
    .await;

    cookie_pair(&response, "tempToken").expect("login should set a tempToken cookie")
}

/// Complete the full login flow and return the `token=...` cookie pair
pub async fn login_full(state: &AppState, email: &str, password: &str) -> String {
    let temp_cookie = login_provisional(state, email, password).await;
    let code = stored_login_otp(state, email)
        .await
        .expect("login should stage an OTP");

    let response = post_json(
        state,
        "/api/auth/verify-account",
        serde_json::json!({ "otp": code }),
        Some(&temp_cookie),
    )
    .await;

    cookie_pair(&response, "token").expect("verification should set a token cookie")
}

/// Read the staged login OTP straight from the database
pub async fn stored_login_otp(state: &AppState, email: &str) -> Option<String> {
    let repo = AccountRepository::new(state.pool.clone());
    repo.find_by_email(email)
        .await
        .expect("account lookup failed")
        .and_then(|account| account.login_otp)
}

/// Read the staged reset OTP straight from the database
pub async fn stored_reset_otp(state: &AppState, email: &str) -> Option<String> {
    let repo = AccountRepository::new(state.pool.clone());
    repo.find_by_email(email)
        .await
        .expect("account lookup failed")
        .and_then(|account| account.reset_otp)
}

/// Account id for an email
pub async fn account_id(state: &AppState, email: &str) -> Uuid {
    let repo = AccountRepository::new(state.pool.clone());
    repo.find_by_email(email)
        .await
        .expect("account lookup failed")
        .expect("account should exist")
        .id
}

/// A code guaranteed to differ from `stored`
pub fn wrong_code(stored: &str) -> &'static str {
    if stored == "000000" { "111111" } else { "000000" }
}
