use axum::{extract::State, Json};
use service_core::error::AppError;

use crate::models::{QueryRequest, QueryResponse};
use crate::startup::AppState;
use crate::utils::ValidatedJson;

/// `POST /ask`: forward the question to the model and return its reply.
pub async fn ask_question(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<QueryRequest>,
) -> Result<Json<QueryResponse>, AppError> {
    tracing::debug!(question_len = req.question.len(), "Received question");

    let response = state.gateway.generate(&req.question).await?;

    Ok(Json(QueryResponse::new(response)))
}
