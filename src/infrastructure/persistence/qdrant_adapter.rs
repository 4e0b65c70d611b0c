use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::{
    CountPointsBuilder, CreateCollectionBuilder, CreateFieldIndexCollectionBuilder, Distance,
    FieldType, PointId, PointStruct, ScrollPointsBuilder, SearchPointsBuilder,
    UpsertPointsBuilder, Value, VectorParamsBuilder, VectorsConfig,
};
use qdrant_client::{Payload, Qdrant};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::ports::{
    CollectionConfig, DistanceMetric, PayloadFieldType, SearchResult, VectorStore, VectorStoreError,
};
use crate::domain::{Chunk, ChunkId, DocumentMetadata, Embedding, FileType};

pub struct QdrantAdapter {
    client: Arc<Qdrant>,
    collection_name: String,
}

impl QdrantAdapter {
    pub async fn new(url: &str, collection_name: String) -> Result<Self, VectorStoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            collection_name,
        })
    }

    pub fn with_client(client: Arc<Qdrant>, collection_name: String) -> Self {
        Self {
            client,
            collection_name,
        }
    }

    fn map_distance_metric(metric: &DistanceMetric) -> Distance {
        match metric {
            DistanceMetric::Cosine => Distance::Cosine,
            DistanceMetric::Euclidean => Distance::Euclid,
            DistanceMetric::DotProduct => Distance::Dot,
        }
    }

    fn map_field_type(field_type: &PayloadFieldType) -> FieldType {
        match field_type {
            PayloadFieldType::Keyword => FieldType::Keyword,
            PayloadFieldType::Integer => FieldType::Integer,
        }
    }

    fn payload_for(chunk: &Chunk) -> Result<Payload, VectorStoreError> {
        let metadata = &chunk.metadata;
        Payload::try_from(serde_json::json!({
            "text": chunk.text,
            "source": metadata.source,
            "file_type": metadata.file_type.as_str(),
            "file_path": metadata.file_path,
            "page": metadata.page,
            "chunk_index": metadata.chunk_index,
        }))
        .map_err(|e| VectorStoreError::UpsertFailed(e.to_string()))
    }

    fn chunk_from_point(id: Option<PointId>, payload: &HashMap<String, Value>) -> Option<Chunk> {
        let chunk_id = match id?.point_id_options? {
            PointIdOptions::Uuid(uuid) => Uuid::parse_str(&uuid).ok()?,
            PointIdOptions::Num(_) => return None,
        };

        let text = payload.get("text")?.as_str()?.to_string();
        let source = payload.get("source")?.as_str()?.to_string();
        let file_type: FileType = payload.get("file_type")?.as_str()?.parse().ok()?;
        let file_path = payload
            .get("file_path")
            .and_then(|v| v.as_str())
            .cloned()
            .unwrap_or_default();
        let page = payload
            .get("page")
            .and_then(|v| v.as_integer())
            .map(|v| v as u32);
        let chunk_index = payload
            .get("chunk_index")
            .and_then(|v| v.as_integer())
            .map(|v| v as usize);

        let mut metadata = DocumentMetadata::new(source, file_type, file_path).with_page(page);
        metadata.chunk_index = chunk_index;

        Some(Chunk {
            id: ChunkId::from_uuid(chunk_id),
            text,
            metadata,
        })
    }
}

#[async_trait]
impl VectorStore for QdrantAdapter {
    #[instrument(skip(self, config), fields(collection = %self.collection_name))]
    async fn create_collection(&self, config: &CollectionConfig) -> Result<bool, VectorStoreError> {
        if self.collection_exists().await? {
            info!(collection = %self.collection_name, "collection already exists");
            return Ok(false);
        }

        let vectors_config = VectorsConfig::from(VectorParamsBuilder::new(
            config.vector_dimensions,
            Self::map_distance_metric(&config.distance_metric),
        ));

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection_name).vectors_config(vectors_config),
            )
            .await
            .map_err(|e| VectorStoreError::CollectionCreationFailed(e.to_string()))?;

        info!(collection = %self.collection_name, "collection_created");

        for index in &config.payload_indexes {
            self.client
                .create_field_index(CreateFieldIndexCollectionBuilder::new(
                    &self.collection_name,
                    &index.field_name,
                    Self::map_field_type(&index.field_type),
                ))
                .await
                .map_err(|e| VectorStoreError::PayloadIndexFailed(e.to_string()))?;

            info!(
                collection = %self.collection_name,
                field = %index.field_name,
                "payload_index_applied"
            );
        }

        Ok(true)
    }

    #[instrument(skip(self), fields(collection = %self.collection_name))]
    async fn collection_exists(&self) -> Result<bool, VectorStoreError> {
        self.client
            .collection_exists(&self.collection_name)
            .await
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))
    }

    #[instrument(skip(self), fields(collection = %self.collection_name))]
    async fn delete_collection(&self) -> Result<(), VectorStoreError> {
        if !self.collection_exists().await? {
            return Ok(());
        }

        self.client
            .delete_collection(&self.collection_name)
            .await
            .map_err(|e| VectorStoreError::CollectionDeletionFailed(e.to_string()))?;

        info!(collection = %self.collection_name, "collection_deleted");
        Ok(())
    }

    #[instrument(skip(self, chunks, embeddings), fields(collection = %self.collection_name, count = chunks.len()))]
    async fn upsert(
        &self,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError> {
        if chunks.len() != embeddings.len() {
            return Err(VectorStoreError::UpsertFailed(
                "chunks and embeddings count mismatch".to_string(),
            ));
        }

        let points = chunks
            .iter()
            .zip(embeddings.iter())
            .map(|(chunk, embedding)| {
                Ok(PointStruct::new(
                    PointId::from(chunk.id.as_uuid().to_string()),
                    embedding.values.clone(),
                    Self::payload_for(chunk)?,
                ))
            })
            .collect::<Result<Vec<_>, VectorStoreError>>()?;

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection_name, points).wait(true))
            .await
            .map_err(|e| VectorStoreError::UpsertFailed(e.to_string()))?;

        info!(collection = %self.collection_name, count = chunks.len(), "points_upserted");
        Ok(())
    }

    #[instrument(skip(self, embedding), fields(collection = %self.collection_name, top_k = top_k))]
    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let response = self
            .client
            .search_points(
                SearchPointsBuilder::new(
                    &self.collection_name,
                    embedding.values.clone(),
                    top_k as u64,
                )
                .with_payload(true),
            )
            .await
            .map_err(|e| VectorStoreError::SearchFailed(e.to_string()))?;

        Ok(response
            .result
            .into_iter()
            .filter_map(|point| {
                let chunk = Self::chunk_from_point(point.id, &point.payload)?;
                Some(SearchResult {
                    chunk,
                    score: point.score,
                })
            })
            .collect())
    }

    #[instrument(skip(self), fields(collection = %self.collection_name, limit = limit))]
    async fn sample(&self, limit: usize) -> Result<Vec<Chunk>, VectorStoreError> {
        let response = self
            .client
            .scroll(
                ScrollPointsBuilder::new(&self.collection_name)
                    .limit(limit as u32)
                    .with_payload(true),
            )
            .await
            .map_err(|e| VectorStoreError::SearchFailed(e.to_string()))?;

        Ok(response
            .result
            .into_iter()
            .filter_map(|point| Self::chunk_from_point(point.id, &point.payload))
            .collect())
    }

    #[instrument(skip(self), fields(collection = %self.collection_name))]
    async fn count(&self) -> Result<u64, VectorStoreError> {
        if !self.collection_exists().await? {
            return Ok(0);
        }

        let response = self
            .client
            .count(CountPointsBuilder::new(&self.collection_name).exact(true))
            .await
            .map_err(|e| VectorStoreError::SearchFailed(e.to_string()))?;

        Ok(response.result.map(|r| r.count).unwrap_or(0))
    }
}
