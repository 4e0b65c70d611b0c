use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

/// Fixed placeholder; nothing is measured.
#[derive(Serialize, Default)]
pub struct MetricsResponse {
    pub total_queries: u64,
    pub avg_response_time: u64,
    pub documents_indexed: u64,
    pub most_queried_topics: Vec<String>,
}

pub async fn metrics_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(MetricsResponse::default()))
}
