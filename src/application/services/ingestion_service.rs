use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use super::{DocumentLoader, TextProcessor, VectorStoreManager, VectorStoreManagerError};
use crate::application::ports::FileLoaderError;
use crate::domain::Document;

/// Load, split and index in one pass.
pub struct IngestionService {
    document_loader: Arc<DocumentLoader>,
    text_processor: Arc<TextProcessor>,
    vector_store_manager: Arc<VectorStoreManager>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestionReport {
    pub documents_processed: usize,
    pub chunks_created: usize,
}

impl IngestionService {
    pub fn new(
        document_loader: Arc<DocumentLoader>,
        text_processor: Arc<TextProcessor>,
        vector_store_manager: Arc<VectorStoreManager>,
    ) -> Self {
        Self {
            document_loader,
            text_processor,
            vector_store_manager,
        }
    }

    /// Appends one file to the existing collection, recording `source_name` as
    /// its source.
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    pub async fn ingest_file(
        &self,
        path: &Path,
        source_name: &str,
    ) -> Result<IngestionReport, IngestionError> {
        let documents = self
            .document_loader
            .load_document_as(path, source_name)
            .await?;
        let chunks = self.text_processor.split_documents(&documents);
        let stored = self.vector_store_manager.add_documents(&chunks).await?;

        let report = IngestionReport {
            documents_processed: documents.len(),
            chunks_created: stored,
        };
        tracing::info!(
            source = %source_name,
            documents = report.documents_processed,
            chunks = report.chunks_created,
            "file_ingested"
        );
        Ok(report)
    }

    /// Rebuilds the collection from every supported file under `path`.
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    pub async fn ingest_directory(&self, path: &Path) -> Result<IngestionReport, IngestionError> {
        let documents = self.document_loader.load_directory(path).await?;
        if documents.is_empty() {
            return Err(IngestionError::NoDocumentsFound(path.display().to_string()));
        }

        let chunks = self.split_non_empty(&documents)?;
        let stored = self
            .vector_store_manager
            .create_from_documents(&chunks)
            .await?;

        let report = IngestionReport {
            documents_processed: documents.len(),
            chunks_created: stored,
        };
        tracing::info!(
            documents = report.documents_processed,
            chunks = report.chunks_created,
            "directory_ingested"
        );
        Ok(report)
    }

    fn split_non_empty(&self, documents: &[Document]) -> Result<Vec<Document>, IngestionError> {
        let chunks = self.text_processor.split_documents(documents);
        if chunks.is_empty() {
            return Err(IngestionError::NoTextExtracted);
        }
        Ok(chunks)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error(transparent)]
    Loading(#[from] FileLoaderError),
    #[error("No documents found in directory: {0}")]
    NoDocumentsFound(String),
    #[error("No text could be extracted from the documents")]
    NoTextExtracted,
    #[error(transparent)]
    Indexing(#[from] VectorStoreManagerError),
}
