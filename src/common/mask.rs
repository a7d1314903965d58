use std::ops::Deref;

use tracing::trace;

use super::error::{QRError, QRResult};
use crate::builder::QR;

/// One of the 8 data mask patterns.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        match pattern {
            0..=7 => Ok(Self(pattern)),
            _ => Err(QRError::InvalidMaskPattern),
        }
    }

    pub(crate) fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(Self)
    }

    /// Whether the data module at (r, c) is inverted under this pattern.
    pub fn flips(self, r: usize, c: usize) -> bool {
        match self.0 {
            0 => (r + c) % 2 == 0,
            1 => r % 2 == 0,
            2 => c % 3 == 0,
            3 => (r + c) % 3 == 0,
            4 => (r / 2 + c / 3) % 2 == 0,
            5 => (r * c) % 2 + (r * c) % 3 == 0,
            6 => ((r * c) % 2 + (r * c) % 3) % 2 == 0,
            _ => ((r + c) % 2 + (r * c) % 3) % 2 == 0,
        }
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &u8 {
        &self.0
    }
}

// Mask selection
//------------------------------------------------------------------------------

/// Scores every mask on a copy of `qr`, applies the cheapest one and returns
/// it. Equal scores go to the lower pattern number.
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let scores = MaskPattern::all().map(|mask| {
        let mut candidate = qr.clone();
        candidate.apply_mask(mask);
        let score = compute_total_penalty(&candidate);
        trace!(mask = *mask, penalty = score, "Scored mask");
        (mask, score)
    });
    let (best, score) = cheapest(scores).unwrap_or((MaskPattern(0), 0));
    trace!(mask = *best, penalty = score, "Selected mask");
    qr.apply_mask(best);
    best
}

// First entry with the lowest score
fn cheapest(scores: impl Iterator<Item = (MaskPattern, u32)>) -> Option<(MaskPattern, u32)> {
    scores.min_by_key(|&(_, score)| score)
}

/// Sum of the 4 penalty rules over the whole symbol, lower is better.
pub fn compute_total_penalty(qr: &QR) -> u32 {
    let rows = qr.to_matrix();
    let cols = transpose(&rows);
    let lines = || rows.iter().chain(cols.iter());

    let runs = lines().map(|l| run_penalty(l)).sum::<u32>();
    let finders = lines().map(|l| finder_penalty(l)).sum::<u32>();
    runs + block_penalty(&rows) + finders + balance_penalty(&rows)
}

fn transpose(rows: &[Vec<bool>]) -> Vec<Vec<bool>> {
    let w = rows.first().map_or(0, Vec::len);
    (0..w).map(|c| rows.iter().map(|row| row[c]).collect()).collect()
}

// 3 for a run of 5 same colored modules, 1 more per extra module
fn run_penalty(line: &[bool]) -> u32 {
    let mut penalty = 0;
    let mut start = 0;
    for i in 1..=line.len() {
        if i < line.len() && line[i] == line[start] {
            continue;
        }
        let run = i - start;
        if run >= 5 {
            penalty += run as u32 - 2;
        }
        start = i;
    }
    penalty
}

// 3 per 2x2 square of one color, overlapping squares all count
fn block_penalty(rows: &[Vec<bool>]) -> u32 {
    let squares = rows.windows(2).map(|pair| {
        let (top, bottom) = (&pair[0], &pair[1]);
        (1..top.len())
            .filter(|&c| {
                let clr = top[c];
                top[c - 1] == clr && bottom[c - 1] == clr && bottom[c] == clr
            })
            .count()
    });
    squares.sum::<usize>() as u32 * 3
}

const FINDER_LIKE: [bool; 7] = [true, false, true, true, true, false, true];

// 40 per dark-light-dark-dark-dark-light-dark run with 4 light modules on
// either side. The symbol edge counts as light.
fn finder_penalty(line: &[bool]) -> u32 {
    let len = line.len() as isize;
    let light = |i: isize| i < 0 || i >= len || !line[i as usize];
    let hits = (0..line.len().saturating_sub(6))
        .filter(|&i| line[i..i + 7] == FINDER_LIKE)
        .map(|i| i as isize)
        .filter(|&i| (i - 4..i).all(light) || (i + 7..i + 11).all(light))
        .count();
    hits as u32 * 40
}

// 10 per full 5% the dark share strays from half
fn balance_penalty(rows: &[Vec<bool>]) -> u32 {
    let total = rows.iter().map(Vec::len).sum::<usize>();
    if total == 0 {
        return 0;
    }
    let dark = rows.iter().flatten().filter(|&&d| d).count();
    let steps = (20 * dark).abs_diff(10 * total) / total;
    steps as u32 * 10
}

#[cfg(test)]
mod mask_tests {
    use test_case::test_case;

    use super::{
        apply_best_mask, balance_penalty, block_penalty, cheapest, compute_total_penalty,
        finder_penalty, run_penalty, MaskPattern,
    };
    use crate::builder::QR;
    use crate::common::error::QRError;
    use crate::common::metadata::{ECLevel, Version};

    const D: bool = true;
    const L: bool = false;

    fn mask(m: u8) -> MaskPattern {
        MaskPattern::new(m).unwrap()
    }

    #[test]
    fn test_new() {
        assert_eq!(*mask(7), 7);
        assert_eq!(MaskPattern::new(8), Err(QRError::InvalidMaskPattern));
        assert_eq!(MaskPattern::all().count(), 8);
    }

    #[test_case(0, 0, 0, true)]
    #[test_case(0, 0, 1, false)]
    #[test_case(1, 2, 5, true)]
    #[test_case(2, 5, 3, true)]
    #[test_case(2, 3, 5, false)]
    #[test_case(3, 1, 2, true)]
    #[test_case(4, 2, 3, true)]
    #[test_case(4, 4, 0, true)]
    #[test_case(4, 2, 2, false)]
    #[test_case(5, 2, 3, true)]
    #[test_case(5, 1, 1, false)]
    #[test_case(6, 1, 1, true)]
    #[test_case(6, 2, 2, false)]
    #[test_case(7, 1, 3, true)]
    #[test_case(7, 1, 1, false)]
    fn test_flips(m: u8, r: usize, c: usize, exp: bool) {
        assert_eq!(mask(m).flips(r, c), exp);
    }

    #[test]
    fn test_flips_orientation() {
        // Pattern 1 follows rows only, pattern 2 columns only
        assert!((0..20).all(|c| mask(1).flips(0, c) && !mask(1).flips(1, c)));
        assert!((0..20).all(|r| mask(2).flips(r, 0) && !mask(2).flips(r, 1)));
    }

    #[test_case(&[D, D, D, D, L, L], 0)]
    #[test_case(&[D, D, D, D, D, L], 3)]
    #[test_case(&[L, L, L, L, L, L, L], 5)]
    #[test_case(&[D, D, D, D, D, L, L, L, L, L, L], 7)]
    #[test_case(&[], 0)]
    fn test_run_penalty(line: &[bool], exp: u32) {
        assert_eq!(run_penalty(line), exp);
    }

    #[test_case(vec![vec![D, D], vec![D, D]], 3)]
    #[test_case(vec![vec![L, L], vec![L, L]], 3)]
    #[test_case(vec![vec![D, L], vec![L, D]], 0)]
    #[test_case(vec![vec![D, D, L], vec![D, D, L]], 3)]
    #[test_case(vec![vec![D, D, D], vec![D, D, D]], 6)]
    #[test_case(vec![vec![D; 3]; 3], 12)]
    #[test_case(vec![vec![D, D], vec![D, L]], 0)]
    fn test_block_penalty(rows: Vec<Vec<bool>>, exp: u32) {
        assert_eq!(block_penalty(&rows), exp);
    }

    #[test_case(&[L, L, L, L, D, L, D, D, D, L, D], 40)]
    #[test_case(&[D, L, D, D, D, L, D, L, L, L, L], 40)]
    #[test_case(&[D, L, D, D, D, L, D, D], 40 ; "edge counts as light")]
    #[test_case(&[D, L, D, L, D, L, D, D, D, L, D, D, L, L, L], 0)]
    #[test_case(&[D, L, L, L, D, L, D, D, D, L, D, D], 0)]
    fn test_finder_penalty(line: &[bool], exp: u32) {
        assert_eq!(finder_penalty(line), exp);
    }

    #[test_case(500, 1000, 0)]
    #[test_case(549, 1000, 0)]
    #[test_case(550, 1000, 10)]
    #[test_case(451, 1000, 0)]
    #[test_case(450, 1000, 10)]
    #[test_case(600, 1000, 20)]
    #[test_case(0, 1000, 100)]
    #[test_case(1000, 1000, 100)]
    fn test_balance_penalty(dark: usize, total: usize, exp: u32) {
        let rows = vec![(0..total).map(|i| i < dark).collect::<Vec<_>>()];
        assert_eq!(balance_penalty(&rows), exp);
    }

    #[test]
    fn test_cheapest_prefers_lower_pattern() {
        let scores = [(mask(0), 50), (mask(1), 30), (mask(2), 30), (mask(3), 31)];
        assert_eq!(cheapest(scores.into_iter()), Some((mask(1), 30)));

        let even = MaskPattern::all().map(|m| (m, 7));
        assert_eq!(cheapest(even), Some((mask(0), 7)));
    }

    #[test]
    fn test_best_mask_scores_lowest() {
        let codewords = (0..26_u32).map(|i| (i * 37 + 11) as u8).collect::<Vec<_>>();
        let mut unmasked = QR::new(Version::MIN, ECLevel::M);
        unmasked.place_codewords(&codewords);

        let mut best = unmasked.clone();
        let chosen = apply_best_mask(&mut best);
        assert_eq!(best.mask(), Some(chosen));

        let best_score = compute_total_penalty(&best);
        for m in MaskPattern::all() {
            let mut other = unmasked.clone();
            other.apply_mask(m);
            let score = compute_total_penalty(&other);
            assert!(best_score <= score, "{m:?} scores {score}, below {best_score}");
            if score == best_score {
                assert!(chosen <= m);
            }
        }
    }
}
