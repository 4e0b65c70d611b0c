//! Prompt templates used by the RAG chain.

use crate::domain::{ChatMessage, ConversationMemory};

const CONTEXT_SEPARATOR: &str = "\n\n";

/// System message with the retrieved context, prior turns, then the question.
pub fn answer_messages(
    context_chunks: &[&str],
    history: &ConversationMemory,
    question: &str,
) -> Vec<ChatMessage> {
    let context = context_chunks.join(CONTEXT_SEPARATOR);
    let system = format!(
        "Use the following pieces of context to answer the user's question.\n\
         If you don't know the answer, just say that you don't know, don't try to make up an answer.\n\
         ----------------\n\
         {context}"
    );

    let mut messages = Vec::with_capacity(history.len() * 2 + 2);
    messages.push(ChatMessage::system(system));
    messages.extend(history.as_messages());
    messages.push(ChatMessage::user(question));
    messages
}

/// Single user message asking for `question` to be rewritten so it no longer
/// depends on the conversation so far.
pub fn condense_question_messages(history: &ConversationMemory, question: &str) -> Vec<ChatMessage> {
    let prompt = format!(
        "Given the following conversation and a follow up question, rephrase the follow up \
         question to be a standalone question, in its original language.\n\n\
         Chat History:\n\
         {}\n\
         Follow Up Input: {}\n\
         Standalone question:",
        history.transcript(),
        question
    );

    vec![ChatMessage::user(prompt)]
}
