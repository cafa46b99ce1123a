use crate::{api, health};

use crate::AppState;

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    // Credentialed CORS: explicit origin allow-list, cookies enabled
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(state.cors_origins.clone()))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        // Health check endpoint
        .route("/health", get(health::health))
        // Auth endpoints
        .route("/api/auth/register", post(api::auth::auth::register))
        .route("/api/auth/login", post(api::auth::auth::login))
        .route("/api/auth/logout", post(api::auth::auth::logout))
        .route(
            "/api/auth/send-verify-otp",
            post(api::auth::auth::send_verify_otp),
        )
        .route(
            "/api/auth/verify-account",
            post(api::auth::auth::verify_account),
        )
        .route("/api/auth/is-auth", get(api::auth::auth::is_auth))
        .route(
            "/api/auth/send-reset-otp",
            post(api::auth::auth::send_reset_otp),
        )
        .route(
            "/api/auth/reset-password",
            post(api::auth::auth::reset_password),
        )
        // User endpoints
        .route("/api/user/data", get(api::users::users::get_user_data))
        // Add shared state
        .with_state(state)
        // CORS middleware
        .layer(cors)
}
