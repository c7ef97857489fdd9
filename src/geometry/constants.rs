// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Compile-time limits shared by both solvers.
//!
//! The limits are enforced when an input file is parsed, so that the search
//! code can rely on them without checking again.

/// Maximum number of terminals in a Steiner instance.
///
/// Terminal subsets are stored as bitmasks in a `u64`, so this is also the
/// width of [`TerminalSet`](crate::geometry::TerminalSet).
pub const MAX_TERMINALS: usize = 64;

/// Largest coordinate value accepted on input (before scaling).
pub const MAX_COORD: i64 = 100_000;

/// Default factor applied to every input coordinate.
///
/// The one-tree lower bound halves an MST length and the sum of two
/// distances. With all coordinates even, every rectilinear distance is even
/// and both halves are exact integers. The reported length is divided by the
/// same factor again.
pub const DEFAULT_COORDINATE_SCALE: i64 = 2;

/// Maximum number of rectangles in a floorplanning instance.
///
/// The search enumerates n! × n! sequence pairs, and each sequence keeps its
/// order number in a `u64`. 20! is the largest factorial that fits.
pub const MAX_RECTANGLES: usize = 20;

/// Largest width or height accepted for a rectangle.
pub const MAX_RECT_DIM: u64 = 10_000;

/// Compute n! or `None` if it does not fit in a `u64`.
pub const fn checked_factorial(n: usize) -> Option<u64> {
    let mut acc: u64 = 1;
    let mut i: u64 = 2;
    while i <= n as u64 {
        match acc.checked_mul(i) {
            Some(next) => acc = next,
            None => return None,
        }
        i += 1;
    }
    Some(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_factorials() {
        assert_eq!(checked_factorial(0), Some(1));
        assert_eq!(checked_factorial(1), Some(1));
        assert_eq!(checked_factorial(4), Some(24));
        assert_eq!(checked_factorial(10), Some(3_628_800));
    }

    #[test]
    fn test_factorial_limit() {
        assert!(checked_factorial(MAX_RECTANGLES).is_some());
        assert!(checked_factorial(MAX_RECTANGLES + 1).is_none());
    }
}
