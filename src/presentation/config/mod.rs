mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ChunkingSettings, EmbeddingProvider, EmbeddingsSettings, LoggingSettings, OpenAiSettings,
    RagSettings, ServerSettings, Settings, VectorStoreBackend, VectorStoreSettings,
    environment_from_env,
};
