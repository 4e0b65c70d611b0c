use std::path::Path;

use async_trait::async_trait;

/// Text extracted from one unit of a file: a page for paged formats, the whole
/// file otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page: Option<u32>,
    pub text: String,
}

impl PageText {
    pub fn whole(text: String) -> Self {
        Self { page: None, text }
    }

    pub fn page(page: u32, text: String) -> Self {
        Self {
            page: Some(page),
            text,
        }
    }
}

#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Not a directory: {0}")]
    NotADirectory(String),
    #[error("Unsupported file type: {extension}. Supported: pdf, txt, docx")]
    UnsupportedFileType { extension: String },
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
}
