use std::sync::Arc;

use crate::application::ports::{VectorStore, VectorStoreError};
use crate::presentation::config::{VectorStoreBackend, VectorStoreSettings};

use super::{LocalVectorStore, QdrantAdapter};

pub struct VectorStoreFactory;

impl VectorStoreFactory {
    pub async fn create(
        settings: &VectorStoreSettings,
    ) -> Result<Arc<dyn VectorStore>, VectorStoreError> {
        match settings.backend {
            VectorStoreBackend::Local => {
                tracing::info!(
                    directory = %settings.persist_directory,
                    collection = %settings.collection_name,
                    "Using local file-backed vector store"
                );
                Ok(Arc::new(LocalVectorStore::new(
                    &settings.persist_directory,
                    settings.collection_name.clone(),
                )))
            }
            VectorStoreBackend::Qdrant => {
                tracing::info!(
                    url = %settings.qdrant_url,
                    collection = %settings.collection_name,
                    "Using Qdrant vector store"
                );
                let adapter =
                    QdrantAdapter::new(&settings.qdrant_url, settings.collection_name.clone())
                        .await?;
                Ok(Arc::new(adapter))
            }
        }
    }
}
