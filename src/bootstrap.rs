//! Wiring of the long-lived services shared by every request.

use std::sync::Arc;

use crate::application::ports::{
    Embedder, LlmClient, TextSplitterError, VectorStore, VectorStoreError,
};
use crate::application::services::{
    DocumentLoader, IngestionService, RagChain, TextProcessor, VectorStoreManager,
};
use crate::infrastructure::llm::{EmbedderFactory, EmbedderFactoryError, OpenAiClient};
use crate::infrastructure::persistence::VectorStoreFactory;
use crate::infrastructure::text_processing::{CompositeFileLoader, RecursiveCharacterSplitter};
use crate::presentation::{AppState, Settings};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("invalid chunking settings: {0}")]
    Chunking(#[from] TextSplitterError),
    #[error("embedder: {0}")]
    Embedder(#[from] EmbedderFactoryError),
    #[error("vector store: {0}")]
    VectorStore(#[from] VectorStoreError),
}

/// Builds every adapter from `settings` and wires them into an [`AppState`].
pub async fn build_state(settings: Settings) -> Result<AppState, BootstrapError> {
    let embedder = EmbedderFactory::create(&settings.embeddings, &settings.openai)?;
    let vector_store = VectorStoreFactory::create(&settings.vector_store).await?;

    if settings.openai.api_key.trim().is_empty() {
        tracing::warn!("openai.api_key is empty; queries will fail until it is set");
    }

    let llm_client: Arc<dyn LlmClient> = Arc::new(
        OpenAiClient::with_base_url(
            settings.openai.base_url.clone(),
            settings.openai.api_key.clone(),
            settings.openai.llm_model.clone(),
            settings.openai.temperature,
        )
        .with_max_tokens(settings.openai.max_tokens),
    );

    build_state_with(settings, embedder, vector_store, llm_client)
}

/// Wires the services around already-built adapters.
pub fn build_state_with(
    settings: Settings,
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    llm_client: Arc<dyn LlmClient>,
) -> Result<AppState, BootstrapError> {
    let splitter = RecursiveCharacterSplitter::new(
        settings.chunking.chunk_size,
        settings.chunking.chunk_overlap,
    )?;

    let document_loader = Arc::new(DocumentLoader::new(Arc::new(
        CompositeFileLoader::with_default_adapters(),
    )));
    let text_processor = Arc::new(TextProcessor::new(Arc::new(splitter)));
    let vector_store_manager = Arc::new(VectorStoreManager::new(
        embedder,
        vector_store,
        settings.vector_store.distance,
        settings.rag.top_k,
    ));

    let ingestion_service = Arc::new(IngestionService::new(
        document_loader,
        text_processor,
        Arc::clone(&vector_store_manager),
    ));
    let rag_chain = Arc::new(RagChain::new(
        Arc::clone(&vector_store_manager),
        llm_client,
        settings.rag.memory_max_turns,
        settings.rag.condense_question,
    ));

    Ok(AppState {
        ingestion_service,
        vector_store_manager,
        rag_chain,
        settings: Arc::new(settings),
    })
}
