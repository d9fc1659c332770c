//! Domain models for CIDR merging.
//!
//! - [`AddressRange`] - inclusive interval of IPv4 addresses
//! - [`CidrBlock`] - aligned block in CIDR notation, the output unit

mod cidr;
mod range;

// Re-export public types
pub use cidr::{
    broadcast_addr, get_cidr_mask, lo_mask, network_addr, parse_prefix, CidrBlock, MAX_LENGTH,
};
pub use range::AddressRange;
