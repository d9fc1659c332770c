//! Parsing of a single `A.B.C.D[/N]` token into an [`AddressRange`].

use crate::error::MergeIpError;
use crate::models::{get_cidr_mask, parse_prefix, AddressRange, MAX_LENGTH};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Parse one CIDR or host token.
///
/// A token without `/N` is a single host (`/32`). Octets must be 0-255 and
/// the prefix 0-32. The returned range is the whole block the token names,
/// so `10.1.2.3/8` yields `10.0.0.0-10.255.255.255`.
///
/// # Examples
/// ```
/// use merge_ip::input::parse_range;
/// let range = parse_range("192.168.0.0/23").unwrap();
/// assert_eq!(range.len(), 512);
/// ```
pub fn parse_range(token: &str) -> Result<AddressRange, MergeIpError> {
    let (addr, prefix) = match token.split_once('/') {
        Some((addr, prefix)) => (addr, Some(prefix)),
        None => (token, None),
    };

    let addr = Ipv4Addr::from_str(addr)
        .map_err(|_| MergeIpError::InvalidAddress(addr.to_string()))?;

    let len = match prefix {
        Some(prefix) => parse_prefix(prefix)?,
        None => MAX_LENGTH,
    };
    let mask = get_cidr_mask(len)?;

    Ok(AddressRange::from_masked(u32::from(addr), mask))
}

impl FromStr for AddressRange {
    type Err = MergeIpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_range(s.trim())
    }
}
