use std::path::Path;
use std::sync::Arc;

use walkdir::WalkDir;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentMetadata, FileType};

/// Turns files on disk into [`Document`]s annotated with their provenance.
pub struct DocumentLoader {
    file_loader: Arc<dyn FileLoader>,
}

impl DocumentLoader {
    pub fn new(file_loader: Arc<dyn FileLoader>) -> Self {
        Self { file_loader }
    }

    /// Loads one file, using its own file name as the source.
    pub async fn load_document(&self, path: &Path) -> Result<Vec<Document>, FileLoaderError> {
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.load_document_as(path, &source).await
    }

    /// Loads one file, recording `source_name` as its source.
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    pub async fn load_document_as(
        &self,
        path: &Path,
        source_name: &str,
    ) -> Result<Vec<Document>, FileLoaderError> {
        if !path.is_file() {
            return Err(FileLoaderError::NotFound(path.display().to_string()));
        }

        let file_type =
            FileType::from_path(path).ok_or_else(|| FileLoaderError::UnsupportedFileType {
                extension: path
                    .extension()
                    .map(|ext| format!(".{}", ext.to_string_lossy()))
                    .unwrap_or_default(),
            })?;

        let file_path = std::path::absolute(path)
            .unwrap_or_else(|_| path.to_path_buf())
            .display()
            .to_string();

        let pages = self.file_loader.extract_pages(path).await?;

        let documents: Vec<Document> = pages
            .into_iter()
            .map(|page| {
                let metadata = DocumentMetadata::new(source_name, file_type, file_path.clone())
                    .with_page(page.page);
                Document::new(page.text, metadata)
            })
            .collect();

        tracing::info!(
            source = %source_name,
            file_type = %file_type,
            documents = documents.len(),
            "document_loaded"
        );

        Ok(documents)
    }

    /// Loads every supported file under `path`, recursively.
    ///
    /// Files that fail to load are logged and skipped; unsupported extensions are
    /// ignored.
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    pub async fn load_directory(&self, path: &Path) -> Result<Vec<Document>, FileLoaderError> {
        if !path.is_dir() {
            return Err(FileLoaderError::NotADirectory(path.display().to_string()));
        }

        let mut documents = Vec::new();

        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() || FileType::from_path(entry.path()).is_none() {
                continue;
            }

            match self.load_document(entry.path()).await {
                Ok(loaded) => documents.extend(loaded),
                Err(e) => {
                    tracing::warn!(
                        file = %entry.path().display(),
                        error = %e,
                        "Skipping file that failed to load"
                    );
                }
            }
        }

        tracing::info!(documents = documents.len(), "directory_loaded");
        Ok(documents)
    }
}
