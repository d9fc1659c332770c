//! Plain text output.

use crate::models::CidrBlock;
use std::io::{self, Write};

/// Write each block on its own newline-terminated line.
///
/// Nothing is written for an empty slice.
pub fn write_text<W: Write>(out: &mut W, blocks: &[CidrBlock]) -> io::Result<()> {
    for block in blocks {
        writeln!(out, "{block}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_text() {
        let blocks = vec![
            CidrBlock::new("10.10.0.0/23").unwrap(),
            CidrBlock::new("192.168.100.0/22").unwrap(),
        ];
        let mut out = Vec::new();
        write_text(&mut out, &blocks).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "10.10.0.0/23\n192.168.100.0/22\n");
    }

    #[test]
    fn test_write_text_empty() {
        let mut out = Vec::new();
        write_text(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }
}
