//! Error type shared by the parser, tokenizer and pipeline.

use thiserror::Error;

/// Errors produced while turning input text into CIDR blocks.
///
/// `InvalidAddress` and `InvalidPrefix` are recovered inside the tokenizer
/// (the token is dropped). Only `Io` reaches the caller of the pipeline.
#[derive(Debug, Error)]
pub enum MergeIpError {
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    #[error("invalid network mask: {0}")]
    InvalidPrefix(String),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl MergeIpError {
    /// True for per-token validation failures that must not stop the stream.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MergeIpError::InvalidAddress(_) | MergeIpError::InvalidPrefix(_)
        )
    }
}
