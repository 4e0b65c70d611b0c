use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use super::ApiError;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct QueryRequest {
    pub question: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn query_handler(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::debug!(question = %sanitize_prompt(&request.question), "Processing query");

    match state.rag_chain.query(&request.question).await {
        Ok(answer) => {
            tracing::info!(sources_count = answer.sources.len(), "Query successful");
            Ok((StatusCode::OK, Json(answer)))
        }
        Err(e) => {
            tracing::error!(error = %e, "Query failed");
            Err(e.into())
        }
    }
}
