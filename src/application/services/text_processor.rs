use std::sync::Arc;

use crate::application::ports::TextSplitter;
use crate::domain::Document;
use crate::infrastructure::text_processing::collapse_internal_whitespace;

/// Cuts loaded documents into chunk-sized documents.
pub struct TextProcessor {
    splitter: Arc<dyn TextSplitter>,
}

impl TextProcessor {
    pub fn new(splitter: Arc<dyn TextSplitter>) -> Self {
        Self { splitter }
    }

    /// Every piece keeps its parent's metadata plus a 0-based `chunk_index`
    /// counted per parent.
    pub fn split_documents(&self, documents: &[Document]) -> Vec<Document> {
        let chunks: Vec<Document> = documents
            .iter()
            .flat_map(|document| {
                self.splitter
                    .split_text(&document.text)
                    .into_iter()
                    .enumerate()
                    .map(|(index, text)| {
                        Document::new(text, document.metadata.clone().with_chunk_index(index))
                    })
            })
            .collect();

        tracing::debug!(
            documents = documents.len(),
            chunks = chunks.len(),
            "documents_split"
        );

        chunks
    }

    /// Collapses runs of whitespace inside each line to one space, keeps a
    /// single blank line between paragraphs, and trims the result.
    pub fn clean_text(text: &str) -> String {
        collapse_internal_whitespace(text)
    }
}
