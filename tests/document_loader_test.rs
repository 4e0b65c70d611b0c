mod common;

use std::sync::Arc;

use tempfile::TempDir;

use common::{write_docx, write_docx_with_table, write_file, write_pdf};
use lorebook::application::ports::FileLoaderError;
use lorebook::application::services::DocumentLoader;
use lorebook::domain::FileType;
use lorebook::infrastructure::text_processing::{CompositeFileLoader, sanitize_extracted_text};

fn loader() -> DocumentLoader {
    DocumentLoader::new(Arc::new(CompositeFileLoader::with_default_adapters()))
}

#[tokio::test]
async fn given_text_file_when_loading_then_returns_single_document_with_metadata() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "notes.txt", "Renewable energy notes.");

    let documents = loader().load_document(&path).await.unwrap();

    assert_eq!(documents.len(), 1);
    let document = &documents[0];
    assert_eq!(document.text, "Renewable energy notes.");
    assert_eq!(document.metadata.source, "notes.txt");
    assert_eq!(document.metadata.file_type, FileType::Txt);
    assert!(document.metadata.file_path.ends_with("notes.txt"));
    assert_eq!(document.metadata.page, None);
    assert_eq!(document.metadata.chunk_index, None);
}

#[tokio::test]
async fn given_uppercase_extension_when_loading_then_extension_is_matched_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "LOUD.TXT", "Shouting about wind.");

    let documents = loader().load_document(&path).await.unwrap();

    assert_eq!(documents[0].metadata.file_type, FileType::Txt);
}

#[tokio::test]
async fn given_display_name_when_loading_then_source_uses_display_name() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "tmp-8f3a.txt", "Uploaded content.");

    let documents = loader()
        .load_document_as(&path, "report.txt")
        .await
        .unwrap();

    assert_eq!(documents[0].metadata.source, "report.txt");
}

#[tokio::test]
async fn given_docx_file_when_loading_then_paragraphs_are_joined_by_newlines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("brief.docx");
    write_docx(&path, &["Solar is growing.", "Wind is   steady."]);

    let documents = loader().load_document(&path).await.unwrap();

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].text, "Solar is growing.\nWind is steady.");
    assert_eq!(documents[0].metadata.file_type, FileType::Docx);
}

#[tokio::test]
async fn given_docx_with_table_when_loading_then_cells_are_read_row_by_row() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mix.docx");
    write_docx_with_table(
        &path,
        "Energy mix.",
        &[&["Source", "Share"], &["Solar", "40%"]],
    );

    let documents = loader().load_document(&path).await.unwrap();

    assert_eq!(documents[0].text, "Energy mix.\nSource Share\nSolar 40%");
}

#[tokio::test]
async fn given_unsupported_extension_when_loading_then_returns_unsupported_type() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "table.csv", "a,b,c");

    let result = loader().load_document(&path).await;

    match result {
        Err(FileLoaderError::UnsupportedFileType { extension }) => assert_eq!(extension, ".csv"),
        other => panic!("expected unsupported file type, got {other:?}"),
    }
}

#[tokio::test]
async fn given_missing_file_when_loading_then_returns_not_found() {
    let dir = TempDir::new().unwrap();

    let result = loader().load_document(&dir.path().join("absent.txt")).await;

    assert!(matches!(result, Err(FileLoaderError::NotFound(_))));
}

#[tokio::test]
async fn given_invalid_utf8_text_when_loading_then_returns_extraction_failure() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("binary.txt");
    std::fs::write(&path, [0xff, 0xfe, 0xfd]).unwrap();

    let result = loader().load_document(&path).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_two_page_pdf_when_loading_then_returns_one_document_per_page() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("energy.pdf");
    write_pdf(&path, &["Solar panels on rooftops.", "Wind turbines offshore."]);

    let documents = loader().load_document(&path).await.unwrap();

    assert_eq!(documents.len(), 2);
    assert!(documents[0].text.contains("Solar"));
    assert!(documents[1].text.contains("Wind"));
    assert_eq!(documents[0].metadata.page, Some(1));
    assert_eq!(documents[1].metadata.page, Some(2));
    assert!(documents.iter().all(|d| d.metadata.file_type == FileType::Pdf));
    assert!(documents.iter().all(|d| d.metadata.source == "energy.pdf"));
}

#[tokio::test]
async fn given_pdf_with_blank_page_when_loading_then_blank_page_is_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gaps.pdf");
    write_pdf(&path, &["Hydro power.", "", "Geothermal heat."]);

    let documents = loader().load_document(&path).await.unwrap();

    let pages: Vec<Option<u32>> = documents.iter().map(|d| d.metadata.page).collect();
    assert_eq!(pages, vec![Some(1), Some(3)]);
}

#[tokio::test]
async fn given_pdf_without_text_when_loading_then_returns_no_text_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scanned.pdf");
    write_pdf(&path, &["", ""]);

    let result = loader().load_document(&path).await;

    assert!(matches!(result, Err(FileLoaderError::NoTextFound(_))));
}

#[test]
fn given_word_hyphenated_across_lines_when_sanitizing_then_word_is_rejoined() {
    assert_eq!(sanitize_extracted_text("photo-\nvoltaic"), "photovoltaic");
    assert_eq!(
        sanitize_extracted_text("solar  photo- \n  voltaic\n\n\ncells"),
        "solar photovoltaic\n\ncells"
    );
}

#[test]
fn given_compatibility_characters_when_sanitizing_then_text_is_nfkc_normalised() {
    assert_eq!(sanitize_extracted_text("\u{FB01}eld"), "field");
}

#[tokio::test]
async fn given_broken_pdf_when_loading_then_returns_error_instead_of_partial_result() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "broken.pdf", "this is not a pdf");

    let result = loader().load_document(&path).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn given_directory_with_mixed_files_when_loading_then_skips_bad_and_unsupported_files() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.txt", "First document.");
    write_file(dir.path(), "nested/b.txt", "Second document.");
    write_file(dir.path(), "c.md", "Markdown is ignored.");
    write_file(dir.path(), "broken.pdf", "not really a pdf");
    write_docx(&dir.path().join("d.docx"), &["Third document."]);

    let documents = loader().load_directory(dir.path()).await.unwrap();

    let mut sources: Vec<&str> = documents
        .iter()
        .map(|d| d.metadata.source.as_str())
        .collect();
    sources.sort();
    assert_eq!(sources, vec!["a.txt", "b.txt", "d.docx"]);
}

#[tokio::test]
async fn given_file_path_when_loading_directory_then_returns_not_a_directory() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "a.txt", "content");

    let result = loader().load_directory(&path).await;

    assert!(matches!(result, Err(FileLoaderError::NotADirectory(_))));
}
