//! Range processing.
//!
//! - [`merge`] - sort and coalesce ranges into a disjoint set
//! - [`summarize`] - turn each disjoint range back into CIDR blocks

mod merge;
mod summarize;

// Re-export public functions
pub use merge::merge_ranges;
pub use summarize::{summarize_range, CidrBlocks};
