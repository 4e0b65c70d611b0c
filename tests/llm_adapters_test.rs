use lorebook::application::ports::{Embedder, LlmClient};
use lorebook::domain::ChatMessage;
use lorebook::infrastructure::llm::{
    EmbedderFactory, EmbedderFactoryError, HashedEmbedder, MockLlmClient, OpenAiEmbedder,
};
use lorebook::presentation::config::{EmbeddingProvider, Settings};

#[tokio::test]
async fn given_empty_batch_when_embedding_with_openai_then_returns_empty_without_calling_api() {
    let embedder = OpenAiEmbedder::with_base_url(
        "http://127.0.0.1:9".to_string(),
        "sk-invalid-key".to_string(),
        "text-embedding-ada-002".to_string(),
    );
    let texts: &[&str] = &[];

    let result = embedder.embed_batch(texts).await.unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn given_unreachable_endpoint_when_embedding_then_returns_error() {
    let embedder = OpenAiEmbedder::with_base_url(
        "http://127.0.0.1:9".to_string(),
        "sk-invalid-key".to_string(),
        "text-embedding-ada-002".to_string(),
    );

    assert!(embedder.embed("test text").await.is_err());
}

#[tokio::test]
async fn given_same_text_when_hashing_then_embedding_is_deterministic_and_normalized() {
    let embedder = HashedEmbedder::new(64);

    let first = embedder.embed("Solar panels and sunlight").await.unwrap();
    let second = embedder.embed("solar PANELS and sunlight").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.dimensions(), 64);
    assert!((first.magnitude() - 1.0).abs() < 1e-5);
}

#[tokio::test]
async fn given_text_without_tokens_when_hashing_then_embedding_is_zero() {
    let embedder = HashedEmbedder::default();

    let embedding = embedder.embed("  ...  ").await.unwrap();

    assert_eq!(embedding.magnitude(), 0.0);
}

#[tokio::test]
async fn given_mock_client_when_completing_then_returns_canned_answer_and_records_prompt() {
    let client = MockLlmClient::new("canned");

    let answer = client
        .complete(&[ChatMessage::user("hello")])
        .await
        .unwrap();

    assert_eq!(answer, "canned");
    assert_eq!(client.calls(), vec![vec![ChatMessage::user("hello")]]);
}

#[test]
fn given_openai_provider_without_key_when_creating_embedder_then_fails() {
    let mut settings = Settings::defaults().unwrap();
    settings.embeddings.provider = EmbeddingProvider::OpenAi;
    settings.openai.api_key = "  ".to_string();

    let result = EmbedderFactory::create(&settings.embeddings, &settings.openai);

    assert!(matches!(result, Err(EmbedderFactoryError::MissingApiKey)));
}

#[tokio::test]
async fn given_hashed_provider_when_creating_embedder_then_uses_configured_dimensions() {
    let mut settings = Settings::defaults().unwrap();
    settings.embeddings.provider = EmbeddingProvider::Hashed;
    settings.embeddings.hashed_dimensions = 32;

    let embedder = EmbedderFactory::create(&settings.embeddings, &settings.openai).unwrap();

    assert_eq!(embedder.embed("wind").await.unwrap().dimensions(), 32);
}
