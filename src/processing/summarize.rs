//! Decomposition of an address range into aligned CIDR blocks.

use crate::models::{lo_mask, AddressRange, CidrBlock, MAX_LENGTH};
use std::iter::FusedIterator;
use std::net::Ipv4Addr;

/// Cover `range` with the fewest aligned blocks, in ascending order.
///
/// # Examples
/// ```
/// use merge_ip::models::AddressRange;
/// use merge_ip::processing::summarize_range;
/// // 10.10.3.0 - 10.10.3.47
/// let range = AddressRange::new(0x0A0A0300, 0x0A0A032F).unwrap();
/// let blocks: Vec<String> = summarize_range(range).map(|b| b.to_string()).collect();
/// assert_eq!(blocks, vec!["10.10.3.0/27", "10.10.3.32/28"]);
/// ```
pub fn summarize_range(range: AddressRange) -> CidrBlocks {
    CidrBlocks {
        next: Some(range.min()),
        last: range.max(),
    }
}

/// Iterator returned by [`summarize_range`].
///
/// Each step takes the largest block that starts at the current address, is
/// aligned to it and does not pass the end of the range.
#[derive(Debug, Clone)]
pub struct CidrBlocks {
    next: Option<u32>,
    last: u32,
}

impl Iterator for CidrBlocks {
    type Item = CidrBlock;

    fn next(&mut self) -> Option<CidrBlock> {
        let first = self.next.filter(|first| *first <= self.last)?;

        // alignment of `first`: 32 for 0.0.0.0
        let zero_bits = MAX_LENGTH - lo_mask(Ipv4Addr::from(first));
        // largest power of two that fits in what is left, at most 2^32
        let span = u64::from(self.last) - u64::from(first) + 1;
        let span_bits = (u64::BITS - 1 - span.leading_zeros()) as u8;
        let block_bits = zero_bits.min(span_bits);

        // None once the block reaches 255.255.255.255
        let after = u64::from(first) + (1u64 << block_bits);
        self.next = u32::try_from(after).ok();

        Some(CidrBlock {
            addr: Ipv4Addr::from(first),
            mask: MAX_LENGTH - block_bits,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(first) if first <= self.last => (1, Some(2 * MAX_LENGTH as usize)),
            _ => (0, Some(0)),
        }
    }
}

impl FusedIterator for CidrBlocks {}
