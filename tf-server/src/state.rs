use crate::mailer::Mailer;

use tf_auth::{JwtValidator, TokenIssuer};

use std::sync::Arc;

use axum::http::HeaderValue;
use sqlx::SqlitePool;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub token_issuer: Arc<TokenIssuer>,
    pub jwt_validator: Arc<JwtValidator>,
    pub mailer: Arc<dyn Mailer>,
    pub cors_origins: Vec<HeaderValue>,
    pub secure_cookies: bool,
}
