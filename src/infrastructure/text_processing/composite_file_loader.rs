use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError, PageText};
use crate::domain::FileType;

use super::{DocxAdapter, PdfAdapter, PlainTextAdapter};

/// Routes a path to the adapter registered for its extension.
pub struct CompositeFileLoader {
    adapters: HashMap<FileType, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(FileType, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// Every supported format wired to its built-in adapter.
    pub fn with_default_adapters() -> Self {
        Self::new(vec![
            (FileType::Pdf, Arc::new(PdfAdapter::new()) as Arc<dyn FileLoader>),
            (FileType::Txt, Arc::new(PlainTextAdapter)),
            (FileType::Docx, Arc::new(DocxAdapter)),
        ])
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, FileLoaderError> {
        let unsupported = || FileLoaderError::UnsupportedFileType {
            extension: path
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default(),
        };

        let file_type = FileType::from_path(path).ok_or_else(unsupported)?;
        let adapter = self.adapters.get(&file_type).ok_or_else(unsupported)?;

        adapter.extract_pages(path).await
    }
}
