//! Coalescing of overlapping and adjacent address ranges.

use crate::models::AddressRange;
use itertools::Itertools;

/// Sort `ranges` and merge every overlapping or adjacent pair.
///
/// The result is ascending and disjoint, and no two consecutive ranges touch:
/// `out[i].max() + 1 < out[i + 1].min()`.
///
/// # Examples
/// ```
/// use merge_ip::input::parse_range;
/// use merge_ip::processing::merge_ranges;
/// let merged = merge_ranges(vec![
///     parse_range("192.168.1.0/24").unwrap(),
///     parse_range("192.168.0.0/24").unwrap(),
/// ]);
/// assert_eq!(merged, vec![parse_range("192.168.0.0/23").unwrap()]);
/// ```
pub fn merge_ranges<I>(ranges: I) -> Vec<AddressRange>
where
    I: IntoIterator<Item = AddressRange>,
{
    // (min, max) ascending, a narrower range before a wider one with the same start
    let mut sorted = ranges.into_iter().sorted();
    let mut merged = Vec::new();

    let Some(mut current) = sorted.next() else {
        return merged;
    };

    // nothing sorts after a range that already ends at the top of the space
    if current.reaches_top() {
        merged.push(current);
        return merged;
    }

    for range in sorted {
        if current.overlaps_or_adjacent(&range) {
            current = current.widen_to(range.max());
        } else {
            merged.push(current);
            current = range;
        }

        if current.reaches_top() {
            break;
        }
    }
    merged.push(current);

    log::debug!("merged into {} ranges", merged.len());
    merged
}
