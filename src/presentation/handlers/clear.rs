use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use super::ApiError;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ClearResponse {
    pub message: String,
}

/// Drops the whole collection and the conversation history with it.
#[tracing::instrument(skip(state))]
pub async fn clear_handler(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    state.vector_store_manager.clear().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to clear vector store");
        ApiError::from(e)
    })?;
    state.rag_chain.clear_memory().await;

    tracing::info!("Vector store cleared");
    Ok((
        StatusCode::OK,
        Json(ClearResponse {
            message: "Vector store cleared successfully".to_string(),
        }),
    ))
}
