//! Merge IPv4 addresses and CIDR blocks into the minimal sorted set of
//! non-overlapping CIDR blocks covering the same addresses.
//!
//! The pipeline is tokenize -> merge -> summarize:
//! - [`input`] reads `A.B.C.D[/N]` tokens from a chunked byte stream
//! - [`processing`] coalesces the ranges and splits them into aligned blocks
//! - [`output`] writes the blocks as text or JSON

pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod processing;

use input::{parse_range, StreamTokenizer, DEFAULT_CHUNK_SIZE};
use itertools::Itertools;
use models::{AddressRange, CidrBlock};
use processing::{merge_ranges, summarize_range};
use std::io::Read;

pub use error::MergeIpError;

/// Read `reader` to the end and return the merged CIDR blocks in ascending order.
///
/// Invalid tokens and non-CIDR noise are skipped. Only a read failure is an error.
///
/// # Examples
/// ```
/// let blocks = merge_ip::run_pipeline(&b"192.168.0.0/24\n192.168.1.0/24\n"[..]).unwrap();
/// assert_eq!(blocks[0].to_string(), "192.168.0.0/23");
/// ```
pub fn run_pipeline<R: Read>(reader: R) -> Result<Vec<CidrBlock>, MergeIpError> {
    run_pipeline_with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
}

/// [`run_pipeline`] with an explicit tokenizer read size.
pub fn run_pipeline_with_chunk_size<R: Read>(
    reader: R,
    chunk_size: usize,
) -> Result<Vec<CidrBlock>, MergeIpError> {
    let mut tokenizer = StreamTokenizer::with_chunk_size(reader, chunk_size);
    let ranges = tokenizer.by_ref().collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "read {} ranges in {} chunks of {chunk_size} bytes",
        ranges.len(),
        tokenizer.chunks_read()
    );
    if tokenizer.rejected() > 0 {
        log::info!("skipped {} invalid tokens", tokenizer.rejected());
    }

    let merged = merge_ranges(ranges);
    let blocks = summarize_all(&merged);
    log::debug!(
        "{} merged ranges as {} CIDR blocks: {}",
        merged.len(),
        blocks.len(),
        blocks.iter().join(" ")
    );
    Ok(blocks)
}

/// Summarize each range in order and concatenate the blocks.
pub fn summarize_all(ranges: &[AddressRange]) -> Vec<CidrBlock> {
    ranges.iter().flat_map(|r| summarize_range(*r)).collect()
}

/// Merge already split tokens, dropping the ones that do not parse.
///
/// # Examples
/// ```
/// let blocks = merge_ip::merge_tokens(["10.0.0.0/8", "10.1.0.0/16", "bogus"]);
/// assert_eq!(blocks.len(), 1);
/// ```
pub fn merge_tokens<I, S>(tokens: I) -> Vec<CidrBlock>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ranges = tokens.into_iter().filter_map(|token| {
        let token = token.as_ref();
        parse_range(token)
            .map_err(|e| log::debug!("cannot process CIDR {token}: {e}"))
            .ok()
    });
    summarize_all(&merge_ranges(ranges))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(blocks: &[CidrBlock]) -> Vec<String> {
        blocks.iter().map(|b| b.to_string()).collect()
    }

    #[test]
    fn test_run_pipeline_scenarios() {
        let blocks = run_pipeline(&b"192.168.0.0/24 192.168.2.0/24 192.168.1.0/24"[..]).unwrap();
        assert_eq!(strings(&blocks), vec!["192.168.0.0/23", "192.168.2.0/24"]);

        let blocks = run_pipeline(&b"10.0.0.0/8\n10.1.0.0/16\n10.0.2.0/24\n"[..]).unwrap();
        assert_eq!(strings(&blocks), vec!["10.0.0.0/8"]);
    }

    #[test]
    fn test_run_pipeline_empty() {
        assert!(run_pipeline(&b""[..]).unwrap().is_empty());
        assert!(run_pipeline(&b"nothing to see\n"[..]).unwrap().is_empty());
    }

    #[test]
    fn test_run_pipeline_huge_chunk_size() {
        let blocks = run_pipeline_with_chunk_size(&b"10.0.0.0/8\n"[..], usize::MAX).unwrap();
        assert_eq!(strings(&blocks), vec!["10.0.0.0/8"]);
    }

    #[test]
    fn test_merge_tokens_host() {
        let blocks = merge_tokens(["172.31.1.1"]);
        assert_eq!(strings(&blocks), vec!["172.31.1.1/32"]);
    }

    #[test]
    fn test_summarize_all_keeps_order() {
        let ranges = vec![
            parse_range("10.0.0.0/24").unwrap(),
            parse_range("10.0.2.0/23").unwrap(),
        ];
        assert_eq!(strings(&summarize_all(&ranges)), vec!["10.0.0.0/24", "10.0.2.0/23"]);
    }
}
