use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use super::ApiError;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct SourcesResponse {
    pub sources: Vec<String>,
    pub count: usize,
}

#[tracing::instrument(skip(state))]
pub async fn sources_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let sources = state.vector_store_manager.list_sources().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list sources");
        ApiError::from(e)
    })?;

    Ok((
        StatusCode::OK,
        Json(SourcesResponse {
            count: sources.len(),
            sources,
        }),
    ))
}
