//! Output formatting for merged CIDR blocks.
//!
//! - [`text`] - one CIDR per line
//! - [`json`] - a single JSON document

mod json;
mod text;

use crate::models::CidrBlock;
use std::io::{self, Write};

pub use json::{write_json, Summary};
pub use text::write_text;

/// How the binary prints its result.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One CIDR per line.
    #[default]
    Text,
    /// `{"count": N, "cidrs": [...]}`.
    Json,
}

/// Write `blocks` to `out` in the chosen format.
pub fn write_cidrs<W: Write>(
    out: &mut W,
    blocks: &[CidrBlock],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => write_text(out, blocks),
        OutputFormat::Json => write_json(out, blocks),
    }
}
