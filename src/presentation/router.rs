use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    clear_handler, health_handler, ingest_directory_handler, ingest_handler, metrics_handler,
    query_handler, sources_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let max_upload_bytes = state.settings.server.max_upload_bytes;

    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .route("/api/query", post(query_handler))
        .route("/api/ingest", post(ingest_handler))
        .route("/api/ingest-directory", post(ingest_directory_handler))
        .route("/api/sources", get(sources_handler))
        .route("/api/metrics", get(metrics_handler))
        .route("/api/clear", delete(clear_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
