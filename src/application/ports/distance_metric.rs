use serde::{Deserialize, Serialize};

use crate::domain::Embedding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Cosine,
    Euclidean,
    DotProduct,
}

impl DistanceMetric {
    /// Similarity score where higher always means closer.
    pub fn score(&self, a: &Embedding, b: &Embedding) -> f32 {
        match self {
            DistanceMetric::Cosine => a.cosine_similarity(b),
            DistanceMetric::Euclidean => -a.euclidean_distance(b),
            DistanceMetric::DotProduct => a.dot_product(b),
        }
    }
}
