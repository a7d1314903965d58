use super::metadata::Version;

/// Every module position in codeword placement order. Columns are taken in
/// pairs from the right edge, right module before left, and the direction
/// flips between pairs starting upward. Column 6 holds the vertical timing
/// pattern, so pairs left of it shift one column over. Positions that hold
/// function patterns are included, callers skip them.
pub fn placement_order(ver: Version) -> impl Iterator<Item = (usize, usize)> {
    let w = ver.width();
    let rights = (1..w).rev().step_by(2).map(|c| if c <= 6 { c - 1 } else { c });
    rights.enumerate().flat_map(move |(k, right)| {
        (0..w).flat_map(move |step| {
            let r = if k % 2 == 0 { w - 1 - step } else { step };
            [(r, right), (r, right - 1)]
        })
    })
}
