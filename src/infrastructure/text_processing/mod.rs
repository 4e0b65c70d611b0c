mod composite_file_loader;
mod docx_adapter;
mod pdf_adapter;
mod plain_text_adapter;
mod recursive_character_splitter;
mod text_sanitizer;

pub use composite_file_loader::CompositeFileLoader;
pub use docx_adapter::DocxAdapter;
pub use pdf_adapter::PdfAdapter;
pub use plain_text_adapter::PlainTextAdapter;
pub use recursive_character_splitter::{DEFAULT_SEPARATORS, RecursiveCharacterSplitter};
pub use text_sanitizer::{collapse_internal_whitespace, sanitize_extracted_text};
