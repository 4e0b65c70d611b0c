mod embedder_factory;
mod hashed_embedder;
mod mock_llm_client;
mod openai_client;
mod openai_embedder;

pub use embedder_factory::{EmbedderFactory, EmbedderFactoryError};
pub use hashed_embedder::{DEFAULT_HASHED_DIMENSIONS, HashedEmbedder};
pub use mock_llm_client::MockLlmClient;
pub use openai_client::OpenAiClient;
pub use openai_embedder::OpenAiEmbedder;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
