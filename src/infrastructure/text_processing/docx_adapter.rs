use std::path::Path;

use async_trait::async_trait;
use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent, TableChild,
    TableRowChild,
};

use crate::application::ports::{FileLoader, FileLoaderError, PageText};

use super::text_sanitizer::sanitize_extracted_text;

/// Body paragraphs and table cells; headers and footers are not read.
pub struct DocxAdapter;

impl DocxAdapter {
    fn paragraph_text(paragraph: &Paragraph, out: &mut String) {
        for child in &paragraph.children {
            if let ParagraphChild::Run(run) = child {
                for run_child in &run.children {
                    if let RunChild::Text(text) = run_child {
                        out.push_str(&text.text);
                    }
                }
            }
        }
    }

    /// One line per row, cells separated by tabs. Nested tables follow their cell.
    fn table_text(table: &Table, out: &mut String) {
        for row_child in &table.rows {
            let TableChild::TableRow(row) = row_child;
            let mut first_cell = true;
            for cell_child in &row.cells {
                let TableRowChild::TableCell(cell) = cell_child;
                if !first_cell {
                    out.push('\t');
                }
                first_cell = false;

                let mut first_paragraph = true;
                for content in &cell.children {
                    match content {
                        TableCellContent::Paragraph(paragraph) => {
                            if !first_paragraph {
                                out.push(' ');
                            }
                            first_paragraph = false;
                            Self::paragraph_text(paragraph, out);
                        }
                        TableCellContent::Table(nested) => {
                            out.push('\n');
                            Self::table_text(nested, out);
                        }
                        _ => {}
                    }
                }
            }
            out.push('\n');
        }
    }
}

#[async_trait]
impl FileLoader for DocxAdapter {
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    async fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, FileLoaderError> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read {}: {e}", path.display()))
        })?;

        let docx = docx_rs::read_docx(&data)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse DOCX: {e}")))?;

        let mut raw = String::new();
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(paragraph) => {
                    Self::paragraph_text(paragraph, &mut raw);
                    raw.push('\n');
                }
                DocumentChild::Table(table) => Self::table_text(table, &mut raw),
                _ => {}
            }
        }

        let text = sanitize_extracted_text(&raw);
        tracing::debug!(chars = text.len(), "DOCX text extraction complete");

        Ok(vec![PageText::whole(text)])
    }
}
