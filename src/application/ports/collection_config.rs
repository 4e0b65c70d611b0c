use super::{DistanceMetric, PayloadFieldType};

/// Payload field the store should index for filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadIndex {
    pub field_name: String,
    pub field_type: PayloadFieldType,
}

impl PayloadIndex {
    pub fn keyword(field_name: &str) -> Self {
        Self {
            field_name: field_name.to_string(),
            field_type: PayloadFieldType::Keyword,
        }
    }

    pub fn integer(field_name: &str) -> Self {
        Self {
            field_name: field_name.to_string(),
            field_type: PayloadFieldType::Integer,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CollectionConfig {
    pub vector_dimensions: u64,
    pub distance_metric: DistanceMetric,
    pub payload_indexes: Vec<PayloadIndex>,
}

impl CollectionConfig {
    /// Indexes the provenance fields chunks are filtered by.
    pub fn new(vector_dimensions: u64, distance_metric: DistanceMetric) -> Self {
        Self {
            vector_dimensions,
            distance_metric,
            payload_indexes: vec![
                PayloadIndex::keyword("source"),
                PayloadIndex::keyword("file_type"),
                PayloadIndex::integer("page"),
            ],
        }
    }
}
