//! Streaming extraction of CIDR tokens from chunked input.
//!
//! The input is read in fixed-size chunks. Each chunk is appended to the bytes
//! carried over from the previous read and scanned for `A.B.C.D[/N]` tokens
//! followed by optional whitespace. The last token of a chunk is held back when
//! it runs into the end of the buffer, because the next read may extend it
//! (`10.0.0.1` may become `10.0.0.12`, `/2` may become `/24`).

use crate::error::MergeIpError;
use crate::input::parse_range;
use crate::models::AddressRange;
use colored::Colorize;
use regex::bytes::Regex;
use std::borrow::Cow;
use std::collections::VecDeque;
use std::io::{self, Read};
use std::sync::OnceLock;

/// Default read size in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Largest read size; bigger requests are clamped to this.
pub const MAX_CHUNK_SIZE: usize = 1 << 20;

/// Lower bound for the carried residual, so tiny chunk sizes still hold a
/// whole `255.255.255.255/32` token.
const MIN_CARRY_CAPACITY: usize = 64;

/// Token followed by its run of trailing whitespace.
static CIDR_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_cidr_regex() -> &'static Regex {
    CIDR_REGEX.get_or_init(|| {
        Regex::new(r"((?:[0-9]{1,3}\.){3}[0-9]{1,3}(?:/[0-9]{1,2})?)([ \t\n\r\x0B\x0C]*)")
            .expect("Invalid Regex")
    })
}

/// Bytes that may continue a token.
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.' || b == b'/'
}

/// A candidate token found in a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// The `A.B.C.D[/N]` part, without trailing whitespace.
    pub text: Cow<'a, str>,
    /// Offset of the token in the scanned buffer.
    pub start: usize,
    /// Length of the token plus its trailing whitespace.
    pub consumed: usize,
    /// No whitespace follows and every following byte could still extend it.
    pub possibly_truncated: bool,
}

impl Token<'_> {
    /// Offset just past the trailing whitespace.
    pub fn end(&self) -> usize {
        self.start + self.consumed
    }
}

/// Scan `buf` left to right for non-overlapping tokens.
pub fn tokens(buf: &[u8]) -> impl Iterator<Item = Token<'_>> {
    get_cidr_regex().captures_iter(buf).filter_map(move |caps| {
        let whole = caps.get(0)?;
        let cidr = caps.get(1)?;
        let trailing_ws = caps.get(2).map_or(0, |m| m.len());
        let possibly_truncated =
            trailing_ws == 0 && buf[cidr.end()..].iter().all(|b| is_token_byte(*b));
        Some(Token {
            // the pattern only matches ASCII, so this borrows
            text: String::from_utf8_lossy(cidr.as_bytes()),
            start: whole.start(),
            consumed: whole.len(),
            possibly_truncated,
        })
    })
}

/// Progress of a [`StreamTokenizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerState {
    /// More chunks may arrive.
    Reading,
    /// End of input seen, the carried bytes still need a final scan.
    Draining,
    /// Nothing left to yield.
    Done,
}

/// Lazily turns a byte stream into [`AddressRange`]s.
///
/// Tokens that fail validation are dropped and counted in
/// [`rejected`](StreamTokenizer::rejected). A read error is yielded once as
/// [`MergeIpError::Io`] and ends the iteration.
pub struct StreamTokenizer<R> {
    reader: R,
    chunk_size: usize,
    carry_capacity: usize,
    buf: Vec<u8>,
    pending: VecDeque<AddressRange>,
    state: TokenizerState,
    rejected: usize,
    chunks: usize,
}

impl<R: Read> StreamTokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    /// `chunk_size` is clamped to `1..=MAX_CHUNK_SIZE`.
    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        let chunk_size = chunk_size.clamp(1, MAX_CHUNK_SIZE);
        let carry_capacity = chunk_size.max(MIN_CARRY_CAPACITY);
        StreamTokenizer {
            reader,
            chunk_size,
            carry_capacity,
            buf: Vec::with_capacity(carry_capacity + chunk_size),
            pending: VecDeque::new(),
            state: TokenizerState::Reading,
            rejected: 0,
            chunks: 0,
        }
    }

    pub fn state(&self) -> TokenizerState {
        self.state
    }

    /// Number of tokens dropped because they failed validation.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Number of non-empty chunks read so far.
    pub fn chunks_read(&self) -> usize {
        self.chunks
    }

    /// Bytes currently carried into the next read.
    pub fn carried(&self) -> usize {
        self.buf.len()
    }

    /// Read one chunk after the carried bytes and scan it.
    fn read_chunk(&mut self) -> io::Result<()> {
        let carried = self.buf.len();
        self.buf.resize(carried + self.chunk_size, 0);

        let read = loop {
            match self.reader.read(&mut self.buf[carried..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.buf.truncate(carried);
                    return Err(e);
                }
            }
        };
        self.buf.truncate(carried + read);

        if read == 0 {
            log::debug!("end of input, {carried} bytes left to drain");
            self.state = TokenizerState::Draining;
            return Ok(());
        }
        self.chunks += 1;

        let cursor = scan(&self.buf, false, &mut self.pending, &mut self.rejected);
        let keep_from = residual_start(&self.buf, cursor, self.carry_capacity);
        self.buf.drain(..keep_from);
        log::trace!(
            "chunk {} read {read} bytes, carrying {}",
            self.chunks,
            self.buf.len()
        );
        Ok(())
    }

    /// Final scan of the carried bytes; every token is complete now.
    fn drain(&mut self) {
        scan(&self.buf, true, &mut self.pending, &mut self.rejected);
        self.buf.clear();
        self.state = TokenizerState::Done;
    }
}

impl<R: Read> Iterator for StreamTokenizer<R> {
    type Item = Result<AddressRange, MergeIpError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(range) = self.pending.pop_front() {
                return Some(Ok(range));
            }
            match self.state {
                TokenizerState::Done => return None,
                TokenizerState::Draining => self.drain(),
                TokenizerState::Reading => {
                    if let Err(e) = self.read_chunk() {
                        log::warn!("read failed after {} chunks: {e}", self.chunks);
                        self.buf.clear();
                        self.state = TokenizerState::Done;
                        return Some(Err(e.into()));
                    }
                }
            }
        }
    }
}

/// Tokenize `reader` with the default chunk size.
pub fn tokenize<R: Read>(reader: R) -> StreamTokenizer<R> {
    StreamTokenizer::new(reader)
}

/// Parse the tokens of `buf` into `out` and return the offset of the first
/// byte not consumed. With `final_pass` unset the last token is left in place
/// when it may be truncated.
fn scan(
    buf: &[u8],
    final_pass: bool,
    out: &mut VecDeque<AddressRange>,
    rejected: &mut usize,
) -> usize {
    let mut cursor = 0;
    let mut found = tokens(buf).peekable();

    while let Some(token) = found.next() {
        let is_last = found.peek().is_none();
        if is_last && token.possibly_truncated && !final_pass {
            log::trace!("deferring {} to next read", token.text);
            break;
        }

        match parse_range(&token.text) {
            Ok(range) => out.push_back(range),
            Err(e) => {
                *rejected += 1;
                log::debug!("no match for CIDR {}: {e}", token.text.as_ref().red());
            }
        }
        cursor = token.end();
    }
    cursor
}

/// Start of the bytes to carry: the trailing run of token bytes after
/// `cursor`, limited to the last `capacity` bytes.
fn residual_start(buf: &[u8], cursor: usize, capacity: usize) -> usize {
    let run_start = buf
        .iter()
        .rposition(|b| !is_token_byte(*b))
        .map_or(0, |p| p + 1);
    run_start
        .max(cursor)
        .max(buf.len().saturating_sub(capacity))
}
