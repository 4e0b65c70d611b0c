use std::sync::Arc;

use crate::application::ports::Embedder;
use crate::presentation::config::{EmbeddingProvider, EmbeddingsSettings, OpenAiSettings};

use super::{HashedEmbedder, OpenAiEmbedder};

pub struct EmbedderFactory;

#[derive(Debug, thiserror::Error)]
pub enum EmbedderFactoryError {
    #[error("missing API key: OpenAI embedder requires OPENAI_API_KEY")]
    MissingApiKey,
}

impl EmbedderFactory {
    pub fn create(
        embeddings: &EmbeddingsSettings,
        openai: &OpenAiSettings,
    ) -> Result<Arc<dyn Embedder>, EmbedderFactoryError> {
        match embeddings.provider {
            EmbeddingProvider::Hashed => {
                tracing::info!(
                    dimensions = embeddings.hashed_dimensions,
                    "Using offline hashed embedder"
                );
                Ok(Arc::new(HashedEmbedder::new(embeddings.hashed_dimensions)))
            }
            EmbeddingProvider::OpenAi => {
                if openai.api_key.trim().is_empty() {
                    return Err(EmbedderFactoryError::MissingApiKey);
                }
                tracing::info!(model = %openai.embedding_model, "Using OpenAI embedding model");
                Ok(Arc::new(OpenAiEmbedder::with_base_url(
                    openai.base_url.clone(),
                    openai.api_key.clone(),
                    openai.embedding_model.clone(),
                )))
            }
        }
    }
}
