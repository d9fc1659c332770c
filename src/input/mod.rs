//! Input side of the pipeline.
//!
//! - [`parser`] - one token to an [`AddressRange`](crate::models::AddressRange)
//! - [`tokenizer`] - chunked byte stream to a lazy sequence of ranges

pub mod parser;
pub mod tokenizer;

pub use parser::parse_range;
pub use tokenizer::{
    tokenize, tokens, StreamTokenizer, Token, TokenizerState, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE,
};
