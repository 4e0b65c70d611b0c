use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::application::ports::{
    CollectionConfig, DistanceMetric, SearchResult, VectorStore, VectorStoreError,
};
use crate::domain::{Chunk, ChunkId, DocumentMetadata, Embedding};

/// A single collection persisted as one JSON file under a directory, scored by
/// brute force.
///
/// The file is loaded lazily on first use and cached; every write rewrites the
/// whole file through a temporary sibling and a rename.
pub struct LocalVectorStore {
    directory: PathBuf,
    collection_name: String,
    cache: RwLock<Option<PersistedCollection>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedCollection {
    name: String,
    dimensions: u64,
    distance: DistanceMetric,
    points: Vec<StoredPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredPoint {
    id: Uuid,
    vector: Vec<f32>,
    text: String,
    metadata: DocumentMetadata,
}

impl StoredPoint {
    fn to_chunk(&self) -> Chunk {
        Chunk {
            id: ChunkId::from_uuid(self.id),
            text: self.text.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

impl LocalVectorStore {
    pub fn new(directory: impl Into<PathBuf>, collection_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            collection_name: collection_name.into(),
            cache: RwLock::new(None),
        }
    }

    pub fn collection_path(&self) -> PathBuf {
        self.directory.join(format!("{}.json", self.collection_name))
    }

    async fn read_from_disk(&self) -> Result<Option<PersistedCollection>, VectorStoreError> {
        let path = self.collection_path();
        match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map(Some).map_err(|e| {
                VectorStoreError::PersistenceFailed(format!(
                    "corrupt collection file {}: {e}",
                    path.display()
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(VectorStoreError::PersistenceFailed(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    async fn write_to_disk(&self, collection: &PersistedCollection) -> Result<(), VectorStoreError> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| VectorStoreError::PersistenceFailed(e.to_string()))?;

        let bytes = serde_json::to_vec(collection)
            .map_err(|e| VectorStoreError::PersistenceFailed(e.to_string()))?;

        let path = self.collection_path();
        let staging = path.with_extension("json.tmp");
        tokio::fs::write(&staging, bytes)
            .await
            .map_err(|e| VectorStoreError::PersistenceFailed(e.to_string()))?;
        tokio::fs::rename(&staging, &path)
            .await
            .map_err(|e| VectorStoreError::PersistenceFailed(e.to_string()))?;

        Ok(())
    }

    async fn loaded(&self) -> Result<RwLockReadGuard<'_, Option<PersistedCollection>>, VectorStoreError> {
        let mut guard = self.cache.write().await;
        if guard.is_none() {
            *guard = self.read_from_disk().await?;
        }
        Ok(guard.downgrade())
    }
}

#[async_trait]
impl VectorStore for LocalVectorStore {
    #[instrument(skip(self, config), fields(collection = %self.collection_name))]
    async fn create_collection(&self, config: &CollectionConfig) -> Result<bool, VectorStoreError> {
        let mut guard = self.cache.write().await;
        if guard.is_none() {
            *guard = self.read_from_disk().await?;
        }
        if guard.is_some() {
            info!(collection = %self.collection_name, "collection already exists");
            return Ok(false);
        }

        let collection = PersistedCollection {
            name: self.collection_name.clone(),
            dimensions: config.vector_dimensions,
            distance: config.distance_metric,
            points: Vec::new(),
        };
        self.write_to_disk(&collection)
            .await
            .map_err(|e| VectorStoreError::CollectionCreationFailed(e.to_string()))?;
        *guard = Some(collection);

        info!(collection = %self.collection_name, path = %self.collection_path().display(), "collection_created");
        Ok(true)
    }

    async fn collection_exists(&self) -> Result<bool, VectorStoreError> {
        Ok(self.loaded().await?.is_some())
    }

    #[instrument(skip(self), fields(collection = %self.collection_name))]
    async fn delete_collection(&self) -> Result<(), VectorStoreError> {
        let mut guard = self.cache.write().await;

        match tokio::fs::remove_file(self.collection_path()).await {
            Ok(()) => info!(collection = %self.collection_name, "collection_deleted"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(VectorStoreError::CollectionDeletionFailed(e.to_string())),
        }

        *guard = None;
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

        let mut guard = self.cache.write().await;
        if guard.is_none() {
            *guard = self.read_from_disk().await?;
        }
        let collection = guard
            .as_ref()
            .ok_or_else(|| VectorStoreError::CollectionNotFound(self.collection_name.clone()))?;

        if let Some(bad) = embeddings
            .iter()
            .find(|e| e.dimensions() as u64 != collection.dimensions)
        {
            return Err(VectorStoreError::UpsertFailed(format!(
                "expected {} dimensions, got {}",
                collection.dimensions,
                bad.dimensions()
            )));
        }

        // The cache only sees the new points once they are on disk.
        let mut points = collection.points.clone();
        let mut positions: HashMap<Uuid, usize> = points
            .iter()
            .enumerate()
            .map(|(position, point)| (point.id, position))
            .collect();

        for (chunk, embedding) in chunks.iter().zip(embeddings.iter()) {
            let point = StoredPoint {
                id: chunk.id.as_uuid(),
                vector: embedding.values.clone(),
                text: chunk.text.clone(),
                metadata: chunk.metadata.clone(),
            };
            match positions.get(&point.id) {
                Some(&position) => points[position] = point,
                None => {
                    positions.insert(point.id, points.len());
                    points.push(point);
                }
            }
        }

        let updated = PersistedCollection {
            name: collection.name.clone(),
            dimensions: collection.dimensions,
            distance: collection.distance,
            points,
        };
        self.write_to_disk(&updated)
            .await
            .map_err(|e| VectorStoreError::UpsertFailed(e.to_string()))?;
        *guard = Some(updated);

        info!(collection = %self.collection_name, count = chunks.len(), "points_upserted");
        Ok(())
    }

    #[instrument(skip(self, embedding), fields(collection = %self.collection_name, top_k = top_k))]
    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let guard = self.loaded().await?;
        let collection = guard
            .as_ref()
            .ok_or_else(|| VectorStoreError::CollectionNotFound(self.collection_name.clone()))?;

        let mut scored: Vec<(f32, &StoredPoint)> = collection
            .points
            .iter()
            .map(|point| {
                let candidate = Embedding::new(point.vector.clone());
                (collection.distance.score(embedding, &candidate), point)
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(score, point)| SearchResult {
                chunk: point.to_chunk(),
                score,
            })
            .collect())
    }

    async fn sample(&self, limit: usize) -> Result<Vec<Chunk>, VectorStoreError> {
        let guard = self.loaded().await?;
        Ok(guard
            .as_ref()
            .map(|c| c.points.iter().take(limit).map(StoredPoint::to_chunk).collect())
            .unwrap_or_default())
    }

    async fn count(&self) -> Result<u64, VectorStoreError> {
        let guard = self.loaded().await?;
        Ok(guard.as_ref().map(|c| c.points.len() as u64).unwrap_or(0))
    }
}
