//! JSON output.

use crate::models::CidrBlock;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// The JSON document written by [`write_json`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub cidrs: Vec<CidrBlock>,
}

impl Summary {
    pub fn new(blocks: &[CidrBlock]) -> Self {
        Summary {
            count: blocks.len(),
            cidrs: blocks.to_vec(),
        }
    }
}

/// Write `blocks` as a pretty-printed [`Summary`] followed by a newline.
pub fn write_json<W: Write>(out: &mut W, blocks: &[CidrBlock]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &Summary::new(blocks))?;
    writeln!(out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json() {
        let blocks = vec![
            CidrBlock::new("192.168.0.0/23").unwrap(),
            CidrBlock::new("192.168.2.0/24").unwrap(),
        ];
        let mut out = Vec::new();
        write_json(&mut out, &blocks).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["count"], 2);
        assert_eq!(value["cidrs"][0], "192.168.0.0/23");
        assert_eq!(value["cidrs"][1], "192.168.2.0/24");

        let summary: Summary = serde_json::from_slice(&out).unwrap();
        assert_eq!(summary.cidrs, blocks);
    }

    #[test]
    fn test_write_json_empty() {
        let mut out = Vec::new();
        write_json(&mut out, &[]).unwrap();
        let summary: Summary = serde_json::from_slice(&out).unwrap();
        assert_eq!(summary, Summary { count: 0, cidrs: vec![] });
    }
}
