use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError, PageText};

pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, FileLoaderError> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read {}: {e}", path.display()))
        })?;

        let text = String::from_utf8(data)
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))?;

        Ok(vec![PageText::whole(text)])
    }
}
