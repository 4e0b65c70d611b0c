use serde::{Deserialize, Serialize};

use super::FileType;

/// Provenance carried by every document and every chunk cut from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub source: String,
    pub file_type: FileType,
    pub file_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<usize>,
}

impl DocumentMetadata {
    pub fn new(source: impl Into<String>, file_type: FileType, file_path: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            file_type,
            file_path: file_path.into(),
            page: None,
            chunk_index: None,
        }
    }

    pub fn with_page(mut self, page: Option<u32>) -> Self {
        self.page = page;
        self
    }

    pub fn with_chunk_index(mut self, chunk_index: usize) -> Self {
        self.chunk_index = Some(chunk_index);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn new(text: impl Into<String>, metadata: DocumentMetadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
