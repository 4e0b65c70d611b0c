/// Splits raw text into bounded, possibly overlapping pieces.
pub trait TextSplitter: Send + Sync {
    fn split_text(&self, text: &str) -> Vec<String>;
}

#[derive(Debug, thiserror::Error)]
pub enum TextSplitterError {
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,
    #[error("chunk overlap ({overlap}) must be smaller than chunk size ({size})")]
    OverlapTooLarge { size: usize, overlap: usize },
}
