use std::collections::BTreeSet;
use std::sync::Arc;

use crate::application::ports::{
    CollectionConfig, DistanceMetric, Embedder, EmbedderError, SearchResult, VectorStore,
    VectorStoreError,
};
use crate::domain::{Chunk, Document, Embedding};

/// Chunks sampled when listing sources.
pub const SOURCE_SAMPLE_LIMIT: usize = 100;

const EMBED_BATCH_SIZE: usize = 100;

/// Embeds documents and keeps them in one vector collection.
pub struct VectorStoreManager {
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    distance_metric: DistanceMetric,
    default_top_k: usize,
}

impl VectorStoreManager {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
        distance_metric: DistanceMetric,
        default_top_k: usize,
    ) -> Self {
        Self {
            embedder,
            vector_store,
            distance_metric,
            default_top_k,
        }
    }

    /// Replaces whatever collection exists with one built from `documents`.
    #[tracing::instrument(skip(self, documents), fields(documents = documents.len()))]
    pub async fn create_from_documents(
        &self,
        documents: &[Document],
    ) -> Result<usize, VectorStoreManagerError> {
        if documents.is_empty() {
            return Err(VectorStoreManagerError::NoDocuments);
        }

        let (chunks, embeddings) = self.embed_documents(documents).await?;

        self.vector_store.delete_collection().await?;
        self.create_collection_for(&embeddings).await?;
        self.vector_store.upsert(&chunks, &embeddings).await?;

        tracing::info!(chunks = chunks.len(), "vector_store_created");
        Ok(chunks.len())
    }

    /// Whether a persisted collection is available. Never creates one.
    pub async fn load(&self) -> Result<bool, VectorStoreManagerError> {
        Ok(self.vector_store.collection_exists().await?)
    }

    /// Appends `documents`, creating the collection on first use.
    #[tracing::instrument(skip(self, documents), fields(documents = documents.len()))]
    pub async fn add_documents(
        &self,
        documents: &[Document],
    ) -> Result<usize, VectorStoreManagerError> {
        if documents.is_empty() {
            return Ok(0);
        }

        let (chunks, embeddings) = self.embed_documents(documents).await?;

        if !self.vector_store.collection_exists().await? {
            self.create_collection_for(&embeddings).await?;
        }
        self.vector_store.upsert(&chunks, &embeddings).await?;

        tracing::info!(chunks = chunks.len(), "documents_added");
        Ok(chunks.len())
    }

    /// Up to `k` stored chunks closest to `query`, best first. `None` uses the
    /// configured default.
    #[tracing::instrument(skip(self, query))]
    pub async fn similarity_search(
        &self,
        query: &str,
        k: Option<usize>,
    ) -> Result<Vec<SearchResult>, VectorStoreManagerError> {
        if !self.vector_store.collection_exists().await? {
            return Ok(Vec::new());
        }

        let k = k.unwrap_or(self.default_top_k);
        let embedding = self.embedder.embed(query).await?;
        let results = self.vector_store.search(&embedding, k).await?;

        tracing::debug!(results = results.len(), "similarity_search_completed");
        Ok(results)
    }

    /// Distinct source names among a sample of stored chunks, sorted.
    pub async fn list_sources(&self) -> Result<Vec<String>, VectorStoreManagerError> {
        if !self.vector_store.collection_exists().await? {
            return Ok(Vec::new());
        }

        let sample = self.vector_store.sample(SOURCE_SAMPLE_LIMIT).await?;
        let sources: BTreeSet<String> = sample
            .into_iter()
            .map(|chunk| chunk.metadata.source)
            .collect();

        Ok(sources.into_iter().collect())
    }

    pub async fn chunk_count(&self) -> Result<u64, VectorStoreManagerError> {
        Ok(self.vector_store.count().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), VectorStoreManagerError> {
        self.vector_store.delete_collection().await?;
        tracing::info!("vector_store_cleared");
        Ok(())
    }

    async fn embed_documents(
        &self,
        documents: &[Document],
    ) -> Result<(Vec<Chunk>, Vec<Embedding>), VectorStoreManagerError> {
        let mut embeddings = Vec::with_capacity(documents.len());

        for batch in documents.chunks(EMBED_BATCH_SIZE) {
            let texts: Vec<&str> = batch.iter().map(|d| d.text.as_str()).collect();
            let batch_embeddings = self.embedder.embed_batch(&texts).await?;

            if batch_embeddings.len() != batch.len() {
                return Err(VectorStoreManagerError::Embedding(
                    EmbedderError::InvalidResponse(format!(
                        "expected {} embeddings, got {}",
                        batch.len(),
                        batch_embeddings.len()
                    )),
                ));
            }
            embeddings.extend(batch_embeddings);
        }

        let chunks = documents.iter().cloned().map(Chunk::from).collect();
        Ok((chunks, embeddings))
    }

    async fn create_collection_for(
        &self,
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreManagerError> {
        let dimensions = embeddings
            .first()
            .map(|e| e.dimensions() as u64)
            .ok_or(VectorStoreManagerError::NoDocuments)?;

        self.vector_store
            .create_collection(&CollectionConfig::new(dimensions, self.distance_metric))
            .await?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VectorStoreManagerError {
    #[error("No documents to index")]
    NoDocuments,
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("vector store: {0}")]
    Storage(#[from] VectorStoreError),
}
