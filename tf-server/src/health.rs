use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - Health check with component status
pub async fn health(State(state): State<AppState>) -> Response {
    let database = match sqlx::query("SELECT 1").fetch_one(&state.pool).await {
        Ok(_) => "operational",
        Err(e) => {
            log::warn!("Health check database probe failed: {}", e);
            "unavailable"
        }
    };

    let status = if database == "operational" {
        "healthy"
    } else {
        "degraded"
    };

    let health = json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "database": database,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}
