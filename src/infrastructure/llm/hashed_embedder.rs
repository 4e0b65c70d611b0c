use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;

pub const DEFAULT_HASHED_DIMENSIONS: usize = 256;

/// Offline bag-of-words embedder.
///
/// Each lowercase alphanumeric token is hashed into a fixed number of buckets
/// and the vector is L2-normalised, so texts sharing words score higher under
/// cosine similarity. Deterministic across runs.
pub struct HashedEmbedder {
    dimensions: usize,
}

impl HashedEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn vectorize(&self, text: &str) -> Embedding {
        let mut values = vec![0.0f32; self.dimensions];

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            token.to_lowercase().hash(&mut hasher);
            let bucket = (hasher.finish() % self.dimensions as u64) as usize;
            values[bucket] += 1.0;
        }

        let magnitude = values.iter().map(|v| v * v).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            values.iter_mut().for_each(|v| *v /= magnitude);
        }

        Embedding::new(values)
    }
}

impl Default for HashedEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_HASHED_DIMENSIONS)
    }
}

#[async_trait]
impl Embedder for HashedEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        Ok(self.vectorize(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }
}
