use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::FileLoaderError;
use crate::application::services::{IngestionError, RagChainError, VectorStoreManagerError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// An error rendered as `{"detail": ...}` with its status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { detail: self.detail })).into_response()
    }
}

impl From<FileLoaderError> for ApiError {
    fn from(error: FileLoaderError) -> Self {
        match &error {
            FileLoaderError::NotFound(_) | FileLoaderError::NotADirectory(_) => {
                Self::not_found(error.to_string())
            }
            FileLoaderError::UnsupportedFileType { .. } => Self::bad_request(error.to_string()),
            FileLoaderError::ExtractionFailed(_) | FileLoaderError::NoTextFound(_) => {
                Self::internal(error.to_string())
            }
        }
    }
}

impl From<VectorStoreManagerError> for ApiError {
    fn from(error: VectorStoreManagerError) -> Self {
        match error {
            VectorStoreManagerError::NoDocuments => Self::bad_request(error.to_string()),
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<IngestionError> for ApiError {
    fn from(error: IngestionError) -> Self {
        match error {
            IngestionError::Loading(e) => e.into(),
            IngestionError::Indexing(e) => e.into(),
            IngestionError::NoDocumentsFound(_) => {
                Self::not_found("No documents found in directory")
            }
            IngestionError::NoTextExtracted => Self::bad_request(error.to_string()),
        }
    }
}

impl From<RagChainError> for ApiError {
    fn from(error: RagChainError) -> Self {
        match error {
            RagChainError::InvalidQuestion | RagChainError::NotInitialized => {
                Self::bad_request(error.to_string())
            }
            other => Self::internal(format!("Query error: {}", other)),
        }
    }
}
