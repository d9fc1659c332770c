//! Closed interval of IPv4 addresses.

use crate::models::CidrBlock;
use std::net::Ipv4Addr;

/// Inclusive range `[min, max]` of IPv4 addresses in numeric order.
///
/// Field order matters: the derived `Ord` sorts by `(min, max)`, which is the
/// order the merger relies on.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct AddressRange {
    min: u32,
    max: u32,
}

impl AddressRange {
    /// Highest representable address, `255.255.255.255`.
    pub const MAX_ADDR: u32 = u32::MAX;

    /// Returns `None` when `min > max`.
    pub fn new(min: u32, max: u32) -> Option<AddressRange> {
        (min <= max).then_some(AddressRange { min, max })
    }

    /// Range of the block covering `addr` under `mask`.
    pub(crate) fn from_masked(addr: u32, mask: u32) -> AddressRange {
        AddressRange {
            min: addr & mask,
            max: addr | !mask,
        }
    }

    // by value, so these win over `Ord::min`/`Ord::max`
    pub fn min(self) -> u32 {
        self.min
    }

    pub fn max(self) -> u32 {
        self.max
    }

    pub fn first(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.min)
    }

    pub fn last(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.max)
    }

    /// Number of addresses in the range (up to 2^32).
    pub fn len(&self) -> u64 {
        u64::from(self.max) - u64::from(self.min) + 1
    }

    /// Always false; kept for parity with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, addr: u32) -> bool {
        self.min <= addr && addr <= self.max
    }

    /// True when `other` overlaps this range or starts right after it.
    ///
    /// Assumes `self.min <= other.min`, as in a sorted sequence.
    pub fn overlaps_or_adjacent(&self, other: &AddressRange) -> bool {
        u64::from(other.min) <= u64::from(self.max) + 1
    }

    pub fn reaches_top(&self) -> bool {
        self.max == Self::MAX_ADDR
    }

    /// Copy with `max` raised to `max` if that widens the range.
    pub(crate) fn widen_to(self, max: u32) -> AddressRange {
        AddressRange {
            min: self.min,
            max: self.max.max(max),
        }
    }
}

impl From<CidrBlock> for AddressRange {
    fn from(block: CidrBlock) -> Self {
        AddressRange {
            min: u32::from(block.network()),
            max: u32::from(block.broadcast()),
        }
    }
}

impl std::fmt::Display for AddressRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}-{}", self.first(), self.last())
    }
}
