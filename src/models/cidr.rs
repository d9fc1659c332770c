//! IPv4 CIDR block and mask utilities.
//!
//! [`CidrBlock`] is the output unit of the summarizer. Its [`Display`](std::fmt::Display)
//! form `a.b.c.d/n` is the canonical CIDR string written by the binary.

use crate::error::MergeIpError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use merge_ip::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// assert_eq!(get_cidr_mask(0).unwrap(), 0);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, MergeIpError> {
    if len > MAX_LENGTH {
        Err(MergeIpError::InvalidPrefix(len.to_string()))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        // u64 so that a shift by 32 (len == 0) stays defined
        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Parse the `N` of `A.B.C.D/N`: ASCII digits only, at most 32.
pub fn parse_prefix(prefix: &str) -> Result<u8, MergeIpError> {
    // u8::from_str accepts a leading '+', a prefix length never has one
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MergeIpError::InvalidPrefix(prefix.to_string()));
    }
    match u8::from_str(prefix) {
        Ok(len) if len <= MAX_LENGTH => Ok(len),
        _ => Err(MergeIpError::InvalidPrefix(prefix.to_string())),
    }
}

/// Get the network address for a given IP and prefix length.
pub fn network_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, MergeIpError> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, MergeIpError> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// Smallest prefix length that `ip` is aligned to, based on its trailing zeros.
///
/// `0.0.0.0` is aligned to every block, so it yields 0.
pub fn lo_mask(ip: Ipv4Addr) -> u8 {
    let trailing_zeros = u32::from(ip).trailing_zeros().min(MAX_LENGTH as u32) as u8;
    MAX_LENGTH - trailing_zeros
}

/// An aligned IPv4 block in CIDR notation.
///
/// Ordering is by address, then by mask, which for the disjoint blocks produced
/// by the summarizer is plain ascending address order.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct CidrBlock {
    /// The network address.
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub mask: u8,
}

impl CidrBlock {
    /// Build a block, normalising `addr` down to its network address.
    pub fn from_parts(addr: Ipv4Addr, mask: u8) -> Result<CidrBlock, MergeIpError> {
        let addr = network_addr(addr, mask)?;
        Ok(CidrBlock { addr, mask })
    }

    /// Create a new [`CidrBlock`] from a CIDR string (e.g., "10.0.0.0/24").
    ///
    /// A bare address is read as a `/32`. Host bits are cleared.
    pub fn new(addr_cidr: &str) -> Result<CidrBlock, MergeIpError> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = match addr_cidr.split_once('/') {
            Some((addr, mask)) => (addr, Some(mask)),
            None => (addr_cidr, None),
        };
        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| MergeIpError::InvalidAddress(addr.to_string()))?;
        let mask = match mask {
            Some(mask) => parse_prefix(mask)?,
            None => MAX_LENGTH,
        };
        CidrBlock::from_parts(addr, mask)
    }

    /// Lowest (network) address in the block.
    pub fn network(&self) -> Ipv4Addr {
        self.addr
    }

    /// Highest (broadcast) address in the block.
    pub fn broadcast(&self) -> Ipv4Addr {
        // mask is validated on construction
        let mask = get_cidr_mask(self.mask).unwrap_or(u32::MAX);
        Ipv4Addr::from(u32::from(self.addr) | !mask)
    }

    /// Number of addresses covered, `2^(32 - mask)`.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.mask.min(MAX_LENGTH))
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.network() <= ip && ip <= self.broadcast()
    }

    /// True when the network address is a multiple of the block size.
    pub fn is_aligned(&self) -> bool {
        lo_mask(self.addr) <= self.mask
    }
}

impl FromStr for CidrBlock {
    type Err = MergeIpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CidrBlock::new(s)
    }
}

impl Serialize for CidrBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CidrBlock {
    fn deserialize<D>(deserializer: D) -> Result<CidrBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CidrBlock::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

impl std::fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
