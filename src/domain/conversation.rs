use std::collections::VecDeque;

use super::ChatMessage;

#[derive(Debug, Clone)]
pub struct ConversationTurn {
    pub question: String,
    pub answer: String,
}

impl ConversationTurn {
    pub fn new(question: String, answer: String) -> Self {
        Self { question, answer }
    }
}

/// Ordered question/answer history with a hard cap.
///
/// Once `max_turns` is reached, recording a new turn evicts the oldest one.
/// A cap of zero keeps nothing.
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    turns: VecDeque<ConversationTurn>,
    max_turns: usize,
}

impl ConversationMemory {
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(max_turns),
            max_turns,
        }
    }

    pub fn record(&mut self, question: String, answer: String) {
        if self.max_turns == 0 {
            return;
        }

        while self.turns.len() >= self.max_turns {
            self.turns.pop_front();
        }

        self.turns.push_back(ConversationTurn::new(question, answer));
    }

    pub fn turns(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// History rendered as alternating user/assistant messages, oldest first.
    pub fn as_messages(&self) -> Vec<ChatMessage> {
        self.turns
            .iter()
            .flat_map(|turn| {
                [
                    ChatMessage::user(turn.question.clone()),
                    ChatMessage::assistant(turn.answer.clone()),
                ]
            })
            .collect()
    }

    /// History rendered as a plain transcript for the question-condensing prompt.
    pub fn transcript(&self) -> String {
        self.turns
            .iter()
            .map(|turn| format!("Human: {}\nAssistant: {}", turn.question, turn.answer))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
