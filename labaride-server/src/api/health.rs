//! Health check endpoints

use axum::Json;
use axum::extract::State;
use shared::error::ApiResponse;

use crate::db;
use crate::error::ServiceResult;
use crate::state::AppState;

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "labaride-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /test-connection: one round trip to the database
pub async fn test_connection(State(state): State<AppState>) -> ServiceResult<ApiResponse<()>> {
    db::ping(&state.pool).await?;
    Ok(ApiResponse::ok("Database connection successful"))
}
