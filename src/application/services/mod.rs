mod document_loader;
mod ingestion_service;
mod prompts;
mod rag_chain;
mod text_processor;
mod vector_store_manager;

pub use document_loader::DocumentLoader;
pub use ingestion_service::{IngestionError, IngestionReport, IngestionService};
pub use rag_chain::{NOT_INITIALIZED_MESSAGE, RagAnswer, RagChain, RagChainError, SourceExcerpt};
pub use text_processor::TextProcessor;
pub use vector_store_manager::{SOURCE_SAMPLE_LIMIT, VectorStoreManager, VectorStoreManagerError};
