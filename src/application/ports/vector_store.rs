use async_trait::async_trait;

use super::{CollectionConfig, SearchResult, VectorStoreError};
use crate::domain::{Chunk, Embedding};

/// A single named collection of embedded chunks.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Returns `false` when the collection already existed.
    async fn create_collection(&self, config: &CollectionConfig) -> Result<bool, VectorStoreError>;

    async fn collection_exists(&self) -> Result<bool, VectorStoreError>;

    async fn delete_collection(&self) -> Result<(), VectorStoreError>;

    async fn upsert(&self, chunks: &[Chunk], embeddings: &[Embedding])
    -> Result<(), VectorStoreError>;

    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError>;

    /// Up to `limit` stored chunks in storage order, without scoring.
    async fn sample(&self, limit: usize) -> Result<Vec<Chunk>, VectorStoreError>;

    async fn count(&self) -> Result<u64, VectorStoreError>;
}
