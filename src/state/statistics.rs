// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Statistics are owned by a solver and incremented as the search proceeds.
//! They never influence the search itself.

use std::fmt;
use strum::EnumCount;
use strum_macros::{EnumCount as EnumCountMacro, EnumIter, IntoStaticStr};

#[derive(Debug, EnumCountMacro, EnumIter, IntoStaticStr, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Counter {
    /// Labels created by a Dijkstra step or a merge step.
    LabelsCreated,
    /// Labels pushed onto the priority queue.
    LabelsQueued,
    /// Labels refused by the queue because of an upper bound.
    LabelsRejected,
    /// Stale queue entries: the label was already permanent or its cost
    /// changed after the entry was queued.
    TokensDiscarded,
    /// Labels dropped after being popped because they exceed U(I).
    LabelsPruned,
    /// Labels made permanent.
    LabelsSettled,
    /// Improvements of a local upper bound U(I).
    UpperBoundUpdates,
    /// Improvements of U(I u J) from U(I) + U(J).
    UpperBoundMerges,
    /// Sequence-pair orders whose width was evaluated.
    OrdersEvaluated,
    /// Orders skipped because their width alone rules them out.
    HeightsSkipped,
    /// Orders that improved the best area.
    AreaImprovements,
}

const COUNT: usize = Counter::COUNT;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub fn increment(&mut self, counter: Counter) {
        self.stats[counter as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counter) -> u64 {
        self.stats[counter as usize]
    }

    /// Add every counter of `other` to this one.
    pub fn merge(&mut self, other: &Statistics) {
        for (mine, theirs) in self.stats.iter_mut().zip(other.stats.iter()) {
            *mine += theirs;
        }
    }
}

impl fmt::Display for Statistics {
    /// Format the non-zero counters as "name=value" pairs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use strum::IntoEnumIterator;

        let mut first = true;
        for counter in Counter::iter() {
            let value = self.get(counter);
            if value == 0 {
                continue;
            }
            if !first {
                write!(f, " ")?;
            }
            let name: &'static str = counter.into();
            write!(f, "{}={}", name, value)?;
            first = false;
        }
        Ok(())
    }
}
