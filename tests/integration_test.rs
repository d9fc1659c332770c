//! Integration tests for merge-ip
//!
//! These tests run the complete pipeline from a file or byte stream to CIDR text.

use merge_ip::output::{write_cidrs, OutputFormat, Summary};
use merge_ip::{merge_tokens, run_pipeline, run_pipeline_with_chunk_size, MergeIpError};
use std::fs::File;
use std::io::{self, Read};

fn run_file(path: &str) -> Vec<String> {
    let file = File::open(path).expect("Failed to open test data");
    run_pipeline(file)
        .expect("Failed to run pipeline")
        .iter()
        .map(|b| b.to_string())
        .collect()
}

fn run_text(input: &str) -> Vec<String> {
    run_pipeline(input.as_bytes())
        .expect("Failed to run pipeline")
        .iter()
        .map(|b| b.to_string())
        .collect()
}

#[test]
fn test_adjacent_blocks_merge() {
    assert_eq!(
        run_text("192.168.0.0/24\n192.168.1.0/24\n"),
        vec!["192.168.0.0/23"]
    );
}

#[test]
fn test_contained_blocks_collapse() {
    assert_eq!(
        run_text("10.0.0.0/8\n10.1.0.0/16\n10.0.2.0/24\n"),
        vec!["10.0.0.0/8"]
    );
}

#[test]
fn test_unsorted_partial_merge() {
    assert_eq!(
        run_text("192.168.0.0/24\n192.168.2.0/24\n192.168.1.0/24\n"),
        vec!["192.168.0.0/23", "192.168.2.0/24"]
    );
}

#[test]
fn test_mixed_blocks_file() {
    assert_eq!(
        run_file("src/tests/test_data/cidrs_01.txt"),
        vec![
            "10.10.0.0/23",
            "10.10.2.0/24",
            "10.10.3.0/27",
            "10.10.3.32/28",
            "10.10.3.128/25",
            "10.10.4.0/24",
            "10.11.0.0/16",
            "192.168.100.0/22",
        ]
    );
}

#[test]
fn test_mixed_blocks_with_hosts_file() {
    assert_eq!(
        run_file("src/tests/test_data/cidrs_02.txt"),
        vec![
            "10.10.0.0/22",
            "10.10.4.0/24",
            "10.11.0.0/16",
            "172.16.0.0/12",
            "192.168.100.0/22",
            "192.168.104.0/22",
        ]
    );
}

#[test]
fn test_noise_and_invalid_tokens_file() {
    assert_eq!(
        run_file("src/tests/test_data/acl_noise.txt"),
        vec!["10.0.0.0/8", "192.0.2.6/31"]
    );
}

#[test]
fn test_empty_and_noise_input() {
    assert!(run_text("").is_empty());
    assert!(run_text("\n\n   \t").is_empty());
    assert!(run_text("hello world 1.2.3 4.5\n").is_empty());
}

#[test]
fn test_bare_host_is_32() {
    assert_eq!(run_text("172.31.1.1"), vec!["172.31.1.1/32"]);
}

#[test]
fn test_whole_address_space() {
    assert_eq!(run_text("0.0.0.0/1 128.0.0.0/1"), vec!["0.0.0.0/0"]);
    assert_eq!(run_text("10.0.0.0/8 0.0.0.0/0"), vec!["0.0.0.0/0"]);
}

#[test]
fn test_file_with_small_chunks_matches_default() {
    let mut data = Vec::new();
    File::open("src/tests/test_data/cidrs_02.txt")
        .and_then(|mut f| f.read_to_end(&mut data))
        .expect("Failed to read test data");

    let expected = run_pipeline(&data[..]).unwrap();
    for chunk_size in [1, 2, 3, 7, 13, 64, 100] {
        let blocks = run_pipeline_with_chunk_size(&data[..], chunk_size).unwrap();
        assert_eq!(blocks, expected, "chunk size {chunk_size}");
    }
}

#[test]
fn test_rerun_on_output_is_stable() {
    let first = run_pipeline(File::open("src/tests/test_data/cidrs_02.txt").unwrap()).unwrap();
    let mut text = Vec::new();
    write_cidrs(&mut text, &first, OutputFormat::Text).unwrap();
    let second = run_pipeline(&text[..]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_merge_tokens_matches_stream() {
    let tokens = ["192.168.0.0/24", "192.168.2.0/24", "192.168.1.0/24"];
    let from_tokens = merge_tokens(tokens);
    let from_stream = run_pipeline(tokens.join("\n").as_bytes()).unwrap();
    assert_eq!(from_tokens, from_stream);
}

#[test]
fn test_json_output() {
    let blocks = run_pipeline(&b"10.0.0.0/8 192.168.0.0/24 192.168.1.0/24"[..]).unwrap();
    let mut out = Vec::new();
    write_cidrs(&mut out, &blocks, OutputFormat::Json).unwrap();
    let summary: Summary = serde_json::from_slice(&out).unwrap();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.cidrs, blocks);
}

struct BrokenReader;

impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "no access"))
    }
}

#[test]
fn test_read_failure_is_reported() {
    let err = run_pipeline(BrokenReader).unwrap_err();
    assert!(matches!(err, MergeIpError::Io(_)));
    assert!(!err.is_recoverable());
}
