mod chunk;
mod conversation;
mod document;
mod embedding;
mod file_type;
mod message;
mod message_role;

pub use chunk::{Chunk, ChunkId};
pub use conversation::{ConversationMemory, ConversationTurn};
pub use document::{Document, DocumentMetadata};
pub use embedding::Embedding;
pub use file_type::{FileType, SUPPORTED_EXTENSIONS};
pub use message::ChatMessage;
pub use message_role::MessageRole;
