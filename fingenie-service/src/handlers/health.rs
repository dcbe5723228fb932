use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::gateway::GatewayStatus;
use crate::models::QueryResponse;
use crate::startup::AppState;

/// Liveness probe. Independent of gateway state.
pub async fn root() -> Json<QueryResponse> {
    Json(QueryResponse::new("ok"))
}

/// Readiness probe reporting whether the model gateway can serve requests.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.gateway.status() {
        GatewayStatus::Ready { model } => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "model": model,
            })),
        ),
        GatewayStatus::Unconfigured { reason } => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unconfigured",
                "detail": reason,
            })),
        ),
    }
}
