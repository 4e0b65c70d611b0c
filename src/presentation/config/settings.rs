use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;
use crate::application::ports::DistanceMetric;

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const ENVIRONMENT_VAR: &str = "APP_ENVIRONMENT";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub openai: OpenAiSettings,
    pub embeddings: EmbeddingsSettings,
    pub vector_store: VectorStoreSettings,
    pub chunking: ChunkingSettings,
    pub rag: RagSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: String,
    pub embedding_model: String,
    pub llm_model: String,
    pub temperature: f32,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsSettings {
    pub provider: EmbeddingProvider,
    pub hashed_dimensions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    Hashed,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VectorStoreSettings {
    pub backend: VectorStoreBackend,
    pub persist_directory: String,
    pub collection_name: String,
    pub qdrant_url: String,
    pub distance: DistanceMetric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorStoreBackend {
    Local,
    Qdrant,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RagSettings {
    pub top_k: usize,
    pub memory_max_turns: usize,
    pub condense_question: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Defaults, then `appsettings.{environment}`, then `APP_*` variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let mut builder = Self::with_defaults(Config::builder())?
            .add_source(
                File::with_name(&environment.settings_file_name()).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Ok(api_key) = std::env::var(OPENAI_API_KEY_VAR) {
            builder = builder.set_default("openai.api_key", api_key)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Defaults only; no files or environment variables are consulted.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::with_defaults(Config::builder())?
            .build()?
            .try_deserialize()
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.max_upload_bytes", 50 * 1024 * 1024)?
            .set_default("openai.api_key", "")?
            .set_default("openai.base_url", crate::infrastructure::llm::OPENAI_BASE_URL)?
            .set_default("openai.embedding_model", "text-embedding-ada-002")?
            .set_default("openai.llm_model", "gpt-4")?
            .set_default("openai.temperature", 0.0)?
            .set_default("embeddings.provider", "openai")?
            .set_default(
                "embeddings.hashed_dimensions",
                crate::infrastructure::llm::DEFAULT_HASHED_DIMENSIONS as u64,
            )?
            .set_default("vector_store.backend", "local")?
            .set_default("vector_store.persist_directory", "./vector_db")?
            .set_default("vector_store.collection_name", "documents")?
            .set_default("vector_store.qdrant_url", "http://localhost:6334")?
            .set_default("vector_store.distance", "cosine")?
            .set_default("chunking.chunk_size", 1000)?
            .set_default("chunking.chunk_overlap", 200)?
            .set_default("rag.top_k", 4)?
            .set_default("rag.memory_max_turns", 10)?
            .set_default("rag.condense_question", true)?
            .set_default("logging.level", "info,lorebook=debug,tower_http=debug")?
            .set_default("logging.enable_json", false)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Reads `APP_ENVIRONMENT`, defaulting to local.
pub fn environment_from_env() -> Result<Environment, String> {
    match std::env::var(ENVIRONMENT_VAR) {
        Ok(value) => value.try_into(),
        Err(_) => Ok(Environment::default()),
    }
}
