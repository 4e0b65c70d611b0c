use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use super::prompts;
use super::{VectorStoreManager, VectorStoreManagerError};
use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::ConversationMemory;
use crate::infrastructure::observability::sanitize_prompt;

pub const NOT_INITIALIZED_MESSAGE: &str =
    "Vector store not initialized. Please ingest documents first.";

/// Answers questions from the indexed documents, remembering recent turns.
pub struct RagChain {
    vector_store_manager: Arc<VectorStoreManager>,
    llm_client: Arc<dyn LlmClient>,
    memory: Mutex<ConversationMemory>,
    condense_question: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RagAnswer {
    pub question: String,
    pub answer: String,
    pub sources: Vec<SourceExcerpt>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceExcerpt {
    pub content: String,
    pub source: String,
    pub page: Option<u32>,
}

impl RagChain {
    pub fn new(
        vector_store_manager: Arc<VectorStoreManager>,
        llm_client: Arc<dyn LlmClient>,
        memory_max_turns: usize,
        condense_question: bool,
    ) -> Self {
        Self {
            vector_store_manager,
            llm_client,
            memory: Mutex::new(ConversationMemory::new(memory_max_turns)),
            condense_question,
        }
    }

    #[tracing::instrument(skip(self, question), fields(question = %sanitize_prompt(question)))]
    pub async fn query(&self, question: &str) -> Result<RagAnswer, RagChainError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(RagChainError::InvalidQuestion);
        }

        if !self.vector_store_manager.load().await? {
            return Err(RagChainError::NotInitialized);
        }

        let history = self.memory.lock().await.clone();

        let retrieval_query = if self.condense_question && !history.is_empty() {
            let standalone = self
                .llm_client
                .complete(&prompts::condense_question_messages(&history, question))
                .await?;
            let standalone = standalone.trim();

            tracing::debug!(
                standalone = %sanitize_prompt(standalone),
                "follow_up_condensed"
            );

            if standalone.is_empty() {
                question.to_string()
            } else {
                standalone.to_string()
            }
        } else {
            question.to_string()
        };

        let results = self
            .vector_store_manager
            .similarity_search(&retrieval_query, None)
            .await?;

        let context: Vec<&str> = results.iter().map(|r| r.chunk.text.as_str()).collect();
        let answer = self
            .llm_client
            .complete(&prompts::answer_messages(&context, &history, question))
            .await?;

        self.memory
            .lock()
            .await
            .record(question.to_string(), answer.clone());

        tracing::info!(sources = results.len(), "query_answered");

        let sources = results
            .into_iter()
            .map(|r| SourceExcerpt {
                content: r.chunk.text,
                source: r.chunk.metadata.source,
                page: r.chunk.metadata.page,
            })
            .collect();

        Ok(RagAnswer {
            question: question.to_string(),
            answer,
            sources,
        })
    }

    pub async fn clear_memory(&self) {
        self.memory.lock().await.clear();
        tracing::debug!("conversation_memory_cleared");
    }

    pub async fn memory_len(&self) -> usize {
        self.memory.lock().await.len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RagChainError {
    #[error("Question must not be empty")]
    InvalidQuestion,
    #[error("{}", NOT_INITIALIZED_MESSAGE)]
    NotInitialized,
    #[error("retrieval: {0}")]
    Retrieval(#[from] VectorStoreManagerError),
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
}
