use uuid::Uuid;

use super::{Document, DocumentMetadata};

/// A stored slice of a document, keyed by an id the store assigns.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub id: ChunkId,
    pub text: String,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkId(Uuid);

impl ChunkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ChunkId {
    fn default() -> Self {
        Self::new()
    }
}

impl Chunk {
    pub fn new(text: String, metadata: DocumentMetadata) -> Self {
        Self {
            id: ChunkId::new(),
            text,
            metadata,
        }
    }

    pub fn into_document(self) -> Document {
        Document::new(self.text, self.metadata)
    }
}

impl From<Document> for Chunk {
    fn from(document: Document) -> Self {
        Self::new(document.text, document.metadata)
    }
}
