use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError, PageText};

use super::text_sanitizer::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn read_pages(path: &Path) -> Result<Vec<PageText>, FileLoaderError> {
        let doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        let mut pages = Vec::with_capacity(page_count);

        for page_index in 0..page_count {
            let raw = match doc.extract_text(page_index) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(page = page_index + 1, error = %e, "Skipping unreadable PDF page");
                    continue;
                }
            };

            let text = sanitize_extracted_text(&raw);
            if !text.is_empty() {
                pages.push(PageText::page((page_index + 1) as u32, text));
            }
        }

        Ok(pages)
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    async fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, FileLoaderError> {
        let owned: PathBuf = path.to_path_buf();

        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::read_pages(&owned)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");

        if pages.is_empty() {
            return Err(FileLoaderError::NoTextFound(path.display().to_string()));
        }

        Ok(pages)
    }
}
