use std::path::{Path, PathBuf};

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::application::services::IngestionReport;
use crate::domain::{FileType, SUPPORTED_EXTENSIONS};
use crate::presentation::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub message: String,
    #[serde(flatten)]
    pub report: IngestionReport,
}

#[derive(Debug, Deserialize)]
pub struct IngestDirectoryRequest {
    pub directory_path: String,
}

/// Upload one file and append it to the knowledge base.
#[tracing::instrument(skip(state, multipart))]
pub async fn ingest_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            tracing::warn!("Ingest request with no file");
            return Err(ApiError::bad_request("No file uploaded"));
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return Err(ApiError::bad_request(format!(
                "Failed to read multipart: {}",
                e
            )));
        }
    };

    if field.name() != Some(FILE_FIELD) {
        tracing::warn!(field = ?field.name(), "Unexpected multipart field");
        return Err(ApiError::bad_request(format!(
            "Expected a multipart field named '{}'",
            FILE_FIELD
        )));
    }

    let filename = sanitize_filename(field.file_name().unwrap_or_default());
    if filename.is_empty() {
        return Err(ApiError::bad_request("Uploaded file has no name"));
    }

    let extension = Path::new(&filename)
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default();

    if FileType::from_extension(&extension).is_none() {
        tracing::warn!(filename = %filename, "Unsupported upload type");
        return Err(ApiError::bad_request(format!(
            "Unsupported file type: .{}. Supported: {}",
            extension,
            SUPPORTED_EXTENSIONS.join(", ")
        )));
    }

    let data = field.bytes().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to read file bytes");
        ApiError::bad_request(format!("Failed to read file: {}", e))
    })?;

    tracing::debug!(filename = %filename, bytes = data.len(), "File data received");

    // Removed on drop, whichever way this handler returns.
    let temp_file = tempfile::Builder::new()
        .prefix("lorebook-upload-")
        .suffix(&format!(".{}", extension))
        .tempfile()
        .map_err(|e| ApiError::internal(format!("Failed to stage upload: {}", e)))?;

    tokio::fs::write(temp_file.path(), &data)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to stage upload: {}", e)))?;

    match state
        .ingestion_service
        .ingest_file(temp_file.path(), &filename)
        .await
    {
        Ok(report) => {
            tracing::info!(
                filename = %filename,
                documents = report.documents_processed,
                chunks = report.chunks_created,
                "Upload ingested"
            );
            Ok((
                StatusCode::OK,
                Json(IngestResponse {
                    message: format!("Successfully ingested {}", filename),
                    report,
                }),
            ))
        }
        Err(e) => {
            tracing::error!(filename = %filename, error = %e, "Upload ingestion failed");
            Err(e.into())
        }
    }
}

/// Rebuild the knowledge base from a directory on the server.
#[tracing::instrument(skip(state, request), fields(directory = %request.directory_path))]
pub async fn ingest_directory_handler(
    State(state): State<AppState>,
    Json(request): Json<IngestDirectoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let directory = PathBuf::from(&request.directory_path);

    match state.ingestion_service.ingest_directory(&directory).await {
        Ok(report) => Ok((
            StatusCode::OK,
            Json(IngestResponse {
                message: format!(
                    "Successfully ingested documents from {}",
                    request.directory_path
                ),
                report,
            }),
        )),
        Err(e) => {
            tracing::error!(error = %e, "Directory ingestion failed");
            Err(e.into())
        }
    }
}

/// Keeps only the final path component of a client-supplied file name.
fn sanitize_filename(raw: &str) -> String {
    let normalized = raw.replace('\\', "/");
    normalized
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
