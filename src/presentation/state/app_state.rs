use std::sync::Arc;

use crate::application::services::{IngestionService, RagChain, VectorStoreManager};
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub ingestion_service: Arc<IngestionService>,
    pub vector_store_manager: Arc<VectorStoreManager>,
    pub rag_chain: Arc<RagChain>,
    pub settings: Arc<Settings>,
}
