// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! TerminalSet type for representing sets of terminals as bitsets.
//!
//! A TerminalSet is a compact representation of a subset of the terminals of
//! a Steiner instance, where bit i represents the presence of terminal i.
//! Terminal 0 is the root.
//!
//! # Examples
//!
//! ```
//! use vlsi_exact::geometry::TerminalSet;
//!
//! let mut set = TerminalSet::empty();
//! set.insert(1);
//! set.insert(3);
//!
//! assert_eq!(set.len(), 2);
//! assert_eq!(format!("{}", set), "{1,3}");
//!
//! // Complement relative to an instance with 5 terminals.
//! let rest = set.complement(5);
//! assert_eq!(rest.iter().collect::<Vec<_>>(), vec![0, 2, 4]);
//! ```

use crate::geometry::constants::MAX_TERMINALS;
use std::fmt;

/// A set of terminal indices represented as a bitset.
///
/// Bit i (counting from LSB) is set if terminal i is in the set.
/// This provides O(1) insert, remove, contains, union and intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TerminalSet(u64);

impl TerminalSet {
    /// Create an empty terminal set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Create the set {0, 1, ..., n-1}.
    ///
    /// # Panics
    ///
    /// Panics if `n > MAX_TERMINALS`.
    pub fn full(n: usize) -> Self {
        assert!(n <= MAX_TERMINALS, "Terminal count out of range: {}", n);
        if n == MAX_TERMINALS {
            Self(u64::MAX)
        } else {
            Self((1u64 << n) - 1)
        }
    }

    /// Create the set {i}.
    pub fn singleton(i: usize) -> Self {
        let mut set = Self::empty();
        set.insert(i);
        set
    }

    /// Create a terminal set from a raw bit value.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Check if the set contains terminal `i`.
    pub fn contains(self, i: usize) -> bool {
        i < MAX_TERMINALS && (self.0 >> i) & 1 != 0
    }

    /// Insert terminal `i` into the set.
    ///
    /// # Panics
    ///
    /// Panics if `i >= MAX_TERMINALS`.
    pub fn insert(&mut self, i: usize) {
        assert!(i < MAX_TERMINALS, "Terminal index out of range: {}", i);
        self.0 |= 1 << i;
    }

    /// Remove terminal `i` from the set.
    pub fn remove(&mut self, i: usize) {
        if i < MAX_TERMINALS {
            self.0 &= !(1 << i);
        }
    }

    /// Get the number of terminals in the set (population count).
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Check if the set is empty.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying bitset value.
    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Elements of `self` that are not in `other`.
    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    /// The complement R \ self, where R = {0, ..., n-1}.
    pub fn complement(self, n: usize) -> Self {
        Self::full(n).difference(self)
    }

    /// Iterate over all terminal indices in the set.
    ///
    /// Indices are yielded in ascending order (0, 1, 2, ...).
    pub fn iter(self) -> impl Iterator<Item = usize> {
        TerminalSetIter { bits: self.0 }
    }
}

/// Iterator over terminal indices in a TerminalSet.
struct TerminalSetIter {
    bits: u64,
}

impl Iterator for TerminalSetIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        // Clear lowest set bit.
        self.bits &= self.bits - 1;
        Some(idx)
    }
}

impl fmt::Display for TerminalSet {
    /// Format a terminal set as "{0,2,5}".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (k, i) in self.iter().enumerate() {
            if k > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", i)?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<usize> for TerminalSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut set = Self::empty();
        for i in iter {
            set.insert(i);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let set = TerminalSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.bits(), 0);
    }

    #[test]
    fn test_full() {
        let set = TerminalSet::full(5);
        assert_eq!(set.len(), 5);
        for i in 0..5 {
            assert!(set.contains(i));
        }
        assert!(!set.contains(5));
        assert_eq!(TerminalSet::full(MAX_TERMINALS).len(), MAX_TERMINALS);
        assert!(TerminalSet::full(0).is_empty());
    }

    #[test]
    fn test_insert_contains_remove() {
        let mut set = TerminalSet::empty();
        assert!(!set.contains(0));

        set.insert(0);
        set.insert(63);
        assert!(set.contains(0));
        assert!(set.contains(63));
        assert_eq!(set.len(), 2);

        set.remove(0);
        assert!(!set.contains(0));
        set.remove(0); // Remove again - should be idempotent
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_set_algebra() {
        let a: TerminalSet = [1, 2, 3].into_iter().collect();
        let b: TerminalSet = [3, 4].into_iter().collect();

        assert_eq!(a.union(b), [1, 2, 3, 4].into_iter().collect());
        assert_eq!(a.intersection(b), TerminalSet::singleton(3));
        assert_eq!(a.difference(b), [1, 2].into_iter().collect());
        assert!(!a.is_disjoint(b));
        assert!(a.is_disjoint(TerminalSet::singleton(0)));
    }

    #[test]
    fn test_complement() {
        let a: TerminalSet = [1, 3].into_iter().collect();
        let c = a.complement(5);
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![0, 2, 4]);
        assert_eq!(c.complement(5), a);
        assert!(TerminalSet::full(7).complement(7).is_empty());
    }

    #[test]
    fn test_iter_order() {
        let set: TerminalSet = [9, 0, 40, 5].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 5, 9, 40]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", TerminalSet::empty()), "{}");
        let set: TerminalSet = [0, 2, 5].into_iter().collect();
        assert_eq!(format!("{}", set), "{0,2,5}");
    }

    #[test]
    #[should_panic(expected = "Terminal index out of range")]
    fn test_insert_out_of_range() {
        let mut set = TerminalSet::empty();
        set.insert(MAX_TERMINALS);
    }
}
