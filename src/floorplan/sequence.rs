// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Permutations and sequence pairs.
//!
//! A [`SequencePair`] is a pair of permutations `(pos, neg)` of the rectangle
//! indices. For two rectangles `x` and `y`:
//!
//! | `x` before `y` in `neg` | `x` before `y` in `pos` | relation |
//! |---|---|---|
//! | yes | yes | `x` left of `y` |
//! | yes | no  | `x` below `y` |
//! | no  | no  | `x` right of `y` |
//! | no  | yes | `x` above `y` |
//!
//! so every ordered pair of distinct rectangles has exactly one relation, and
//! `(x, y)` and `(y, x)` have opposite relations.
//!
//! The pair is enumerated like a two-digit counter in the factorial number
//! system: `neg` is the low digit, `pos` the high digit. The linear order
//! number of a pair is `pos * n! + neg`.

use crate::error::FloorplanError;
use crate::geometry::constants::checked_factorial;
use std::fmt;

/// Outcome of advancing a permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Moved to the next permutation.
    Advanced,
    /// Was at the last permutation; now back at the identity.
    Wrapped,
}

/// A permutation of `0..n` with a lazily computed order table.
#[derive(Debug, Clone)]
pub struct Sequence {
    perm: Vec<usize>,

    /// `order[x * n + y]` is true iff `x` precedes `y`.
    order: Vec<bool>,
    dirty: bool,

    order_number: u64,
    factorial: u64,
}

impl Sequence {
    /// The identity permutation of `0..n`.
    pub fn new(n: usize) -> Result<Self, FloorplanError> {
        let factorial = checked_factorial(n).ok_or(FloorplanError::FactorialOverflow { n })?;
        Ok(Self {
            perm: (0..n).collect(),
            order: vec![false; n * n],
            dirty: true,
            order_number: 0,
            factorial,
        })
    }

    pub fn len(&self) -> usize {
        self.perm.len()
    }

    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }

    /// Number of permutations, `n!`.
    pub fn factorial(&self) -> u64 {
        self.factorial
    }

    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    /// Lexicographic rank of the current permutation.
    pub fn order_number(&self) -> u64 {
        self.order_number
    }

    fn refresh(&mut self) {
        if !self.dirty {
            return;
        }
        let n = self.perm.len();
        for (i, &x) in self.perm.iter().enumerate() {
            for (j, &y) in self.perm.iter().enumerate() {
                self.order[x * n + y] = i < j;
            }
        }
        self.dirty = false;
    }

    /// True iff `x` precedes `y` in the current permutation.
    pub fn comes_before(&mut self, x: usize, y: usize) -> bool {
        self.refresh();
        self.order[x * self.perm.len() + y]
    }

    /// Advance to the lexicographically next permutation, wrapping from the
    /// last permutation to the identity.
    pub fn increment(&mut self) -> Step {
        self.dirty = true;
        let n = self.perm.len();
        let Some(i) = (1..n).rev().find(|&i| self.perm[i - 1] < self.perm[i]) else {
            self.perm.reverse();
            self.order_number = 0;
            return Step::Wrapped;
        };
        let pivot = i - 1;
        let j = (i..n)
            .rev()
            .find(|&j| self.perm[j] > self.perm[pivot])
            .unwrap_or(i);
        self.perm.swap(pivot, j);
        self.perm[i..].reverse();
        self.order_number = (self.order_number + 1) % self.factorial;
        Step::Advanced
    }

    /// Jump to the `k`-th permutation in lexicographic order.
    pub fn set_order(&mut self, k: u64) -> Result<(), FloorplanError> {
        if k >= self.factorial {
            return Err(FloorplanError::OrderOutOfRange {
                order: k as u128,
                limit: self.factorial as u128,
            });
        }
        let n = self.perm.len();
        let mut available: Vec<usize> = (0..n).collect();
        let mut rest = k;
        for i in 0..n {
            // (n - 1 - i)! divides the remaining rank into digit and rest.
            let place = checked_factorial(n - 1 - i).ok_or(FloorplanError::FactorialOverflow { n })?;
            let digit = (rest / place) as usize;
            rest %= place;
            self.perm[i] = available.remove(digit);
        }
        self.order_number = k;
        self.dirty = true;
        Ok(())
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.perm.iter().map(|x| x.to_string()).collect();
        write!(f, "[{}]", parts.join(" "))
    }
}

/// Relative placement of one rectangle with respect to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    LeftOf,
    RightOf,
    Below,
    Above,
}

impl Relation {
    /// The relation of `y` to `x` when `x` has this relation to `y`.
    pub fn opposite(self) -> Self {
        match self {
            Relation::LeftOf => Relation::RightOf,
            Relation::RightOf => Relation::LeftOf,
            Relation::Below => Relation::Above,
            Relation::Above => Relation::Below,
        }
    }
}

/// A positive and a negative sequence over the same rectangles.
#[derive(Debug, Clone)]
pub struct SequencePair {
    pos: Sequence,
    neg: Sequence,

    /// Bumped on every change so that derived views can tell they are stale.
    revision: u64,
}

impl SequencePair {
    pub fn new(n: usize) -> Result<Self, FloorplanError> {
        Ok(Self {
            pos: Sequence::new(n)?,
            neg: Sequence::new(n)?,
            revision: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    pub fn positive(&self) -> &Sequence {
        &self.pos
    }

    pub fn negative(&self) -> &Sequence {
        &self.neg
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Size of the order space, `n! * n!`.
    pub fn order_count(&self) -> u128 {
        self.pos.factorial() as u128 * self.neg.factorial() as u128
    }

    /// Linear order number `pos * n! + neg`.
    pub fn order_number(&self) -> u128 {
        self.pos.order_number() as u128 * self.neg.factorial() as u128
            + self.neg.order_number() as u128
    }

    /// Advance to the next pair. Returns false once the whole space has been
    /// enumerated; the pair is then back at the identity.
    pub fn increment(&mut self) -> bool {
        self.revision += 1;
        if self.neg.increment() == Step::Advanced {
            return true;
        }
        self.pos.increment() == Step::Advanced
    }

    /// Set both sequences by their lexicographic ranks.
    ///
    /// Both ranks are checked before either sequence changes.
    pub fn set_orders(&mut self, pos_order: u64, neg_order: u64) -> Result<(), FloorplanError> {
        for (order, seq) in [(pos_order, &self.pos), (neg_order, &self.neg)] {
            if order >= seq.factorial() {
                return Err(FloorplanError::OrderOutOfRange {
                    order: order as u128,
                    limit: seq.factorial() as u128,
                });
            }
        }
        self.revision += 1;
        self.pos.set_order(pos_order)?;
        self.neg.set_order(neg_order)
    }

    /// Set the pair from its linear order number.
    pub fn set_order(&mut self, order: u128) -> Result<(), FloorplanError> {
        let limit = self.order_count();
        if order >= limit {
            return Err(FloorplanError::OrderOutOfRange { order, limit });
        }
        let base = self.neg.factorial() as u128;
        // Both digits are below n!, which fits in u64.
        self.set_orders((order / base) as u64, (order % base) as u64)
    }

    pub fn leftof(&mut self, x: usize, y: usize) -> bool {
        x != y && self.neg.comes_before(x, y) && self.pos.comes_before(x, y)
    }

    pub fn below(&mut self, x: usize, y: usize) -> bool {
        x != y && self.neg.comes_before(x, y) && !self.pos.comes_before(x, y)
    }

    pub fn rightof(&mut self, x: usize, y: usize) -> bool {
        x != y && !self.neg.comes_before(x, y) && !self.pos.comes_before(x, y)
    }

    pub fn above(&mut self, x: usize, y: usize) -> bool {
        x != y && !self.neg.comes_before(x, y) && self.pos.comes_before(x, y)
    }

    /// The relation of `x` to `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x == y`.
    pub fn relation(&mut self, x: usize, y: usize) -> Relation {
        assert_ne!(x, y, "A rectangle has no relation to itself");
        match (self.neg.comes_before(x, y), self.pos.comes_before(x, y)) {
            (true, true) => Relation::LeftOf,
            (true, false) => Relation::Below,
            (false, false) => Relation::RightOf,
            (false, true) => Relation::Above,
        }
    }
}

impl fmt::Display for SequencePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} -{}", self.pos, self.neg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_is_lexicographic() {
        let mut seq = Sequence::new(3).unwrap();
        let mut seen = vec![seq.permutation().to_vec()];
        while seq.increment() == Step::Advanced {
            seen.push(seq.permutation().to_vec());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
        assert_eq!(seq.permutation(), &[0, 1, 2]);
        assert_eq!(seq.order_number(), 0);
    }

    #[test]
    fn test_order_number_tracks_increment() {
        let mut seq = Sequence::new(4).unwrap();
        for k in 1..24 {
            assert_eq!(seq.increment(), Step::Advanced);
            assert_eq!(seq.order_number(), k);
        }
        assert_eq!(seq.increment(), Step::Wrapped);
    }

    #[test]
    fn test_set_order_matches_increment() {
        let mut walked = Sequence::new(4).unwrap();
        let mut jumped = Sequence::new(4).unwrap();
        for k in 0..24 {
            jumped.set_order(k).unwrap();
            assert_eq!(jumped.permutation(), walked.permutation());
            assert_eq!(jumped.order_number(), k);
            walked.increment();
        }
        assert!(matches!(
            jumped.set_order(24),
            Err(FloorplanError::OrderOutOfRange { order: 24, limit: 24 })
        ));
    }

    #[test]
    fn test_comes_before_follows_changes() {
        let mut seq = Sequence::new(3).unwrap();
        assert!(seq.comes_before(0, 2));
        seq.set_order(5).unwrap();
        assert_eq!(seq.permutation(), &[2, 1, 0]);
        assert!(!seq.comes_before(0, 2));
        assert!(seq.comes_before(2, 0));
        assert!(!seq.comes_before(1, 1));
    }

    #[test]
    fn test_trivial_sequences() {
        for n in 0..2 {
            let mut seq = Sequence::new(n).unwrap();
            assert_eq!(seq.factorial(), 1);
            assert_eq!(seq.increment(), Step::Wrapped);
        }
        assert!(matches!(
            Sequence::new(21),
            Err(FloorplanError::FactorialOverflow { n: 21 })
        ));
    }

    #[test]
    fn test_identity_pair_is_left_to_right() {
        let mut pair = SequencePair::new(4).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert!(!pair.rightof(i, j));
                if i < j {
                    assert!(pair.leftof(i, j));
                }
            }
        }
    }

    #[test]
    fn test_pair_enumerates_whole_space() {
        let mut pair = SequencePair::new(3).unwrap();
        let mut count = 1;
        while pair.increment() {
            assert_eq!(pair.order_number(), count);
            count += 1;
        }
        assert_eq!(count, pair.order_count());
        assert_eq!(count, 36);
        assert_eq!(pair.order_number(), 0);
    }

    #[test]
    fn test_relations_are_a_partition() {
        let mut pair = SequencePair::new(3).unwrap();
        loop {
            for x in 0..3 {
                for y in 0..3 {
                    if x == y {
                        continue;
                    }
                    let holding = [
                        pair.leftof(x, y),
                        pair.below(x, y),
                        pair.rightof(x, y),
                        pair.above(x, y),
                    ];
                    assert_eq!(holding.iter().filter(|&&h| h).count(), 1);
                    assert_eq!(pair.relation(y, x), pair.relation(x, y).opposite());
                }
            }
            if !pair.increment() {
                break;
            }
        }
    }

    #[test]
    fn test_set_order_round_trip() {
        let mut pair = SequencePair::new(3).unwrap();
        for k in 0..36u128 {
            pair.set_order(k).unwrap();
            assert_eq!(pair.order_number(), k);
        }
        let revision = pair.revision();
        assert!(pair.set_order(36).is_err());
        assert!(pair.revision() >= revision);
    }

    #[test]
    fn test_rejected_orders_leave_pair_unchanged() {
        let mut pair = SequencePair::new(3).unwrap();
        pair.set_order(20).unwrap();
        let revision = pair.revision();
        assert_eq!(
            pair.set_orders(1, 999),
            Err(FloorplanError::OrderOutOfRange { order: 999, limit: 6 })
        );
        assert!(pair.set_orders(6, 0).is_err());
        assert_eq!(pair.order_number(), 20);
        assert_eq!(pair.revision(), revision);
    }

    #[test]
    fn test_below_and_above() {
        let mut pair = SequencePair::new(2).unwrap();
        // pos = [1 0], neg = [0 1]: 0 precedes 1 in neg only.
        pair.set_orders(1, 0).unwrap();
        assert!(pair.below(0, 1));
        assert!(pair.above(1, 0));
        assert_eq!(pair.relation(0, 1), Relation::Below);
        assert_eq!(pair.to_string(), "+[1 0] -[0 1]");
    }
}
