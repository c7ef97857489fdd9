// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Exhaustive minimum-area floorplanning over sequence pairs.
//!
//! Every sequence pair induces a compacted placement: the left-to-right
//! constraint graph gives the chip width, the bottom-to-top graph the
//! height. The solver walks a range of the `n! * n!` pairs and keeps the
//! placement of least area.
//!
//! Two cheap bounds cut the work:
//! - the tallest rectangle bounds the height from below, so a width that is
//!   already too large skips the height computation;
//! - the total rectangle area bounds every floorplan from below, so reaching
//!   it ends the search.

use super::dag::{Orientation, SequencePairDag};
use super::placement::{Corner, Floorplan};
use super::sequence::SequencePair;
use crate::error::FloorplanError;
use crate::instance::FloorplanInstance;
use crate::state::{Counter, Statistics};

/// A contiguous slice of the order space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchRange {
    /// Linear order number to start from, `pos * n! + neg`.
    pub offset: u128,
    /// Number of orders to evaluate; `None` runs to the end of the space.
    /// The starting order is always evaluated.
    pub max_iterations: Option<u64>,
}

impl SearchRange {
    /// The whole order space.
    pub fn full() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: u128) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }
}

/// Settings for a floorplanning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorplanConfig {
    pub range: SearchRange,
    /// Number of parallel workers the range is split across.
    pub workers: usize,
}

impl Default for FloorplanConfig {
    fn default() -> Self {
        Self {
            range: SearchRange::full(),
            workers: 1,
        }
    }
}

impl FloorplanConfig {
    pub fn with_offset(mut self, offset: u128) -> Self {
        self.range.offset = offset;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.range.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

/// Best floorplan of a search and how far the search got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub floorplan: Floorplan,
    /// Orders evaluated.
    pub iterations: u64,
    /// False if the search was limited to part of the space and did not
    /// reach the area lower bound.
    pub proven_optimal: bool,
    pub statistics: Statistics,
}

/// Walks sequence pairs for one instance.
pub struct FloorplanSolver<'a> {
    instance: &'a FloorplanInstance,
    pair: SequencePair,
    width_dag: SequencePairDag,
    height_dag: SequencePairDag,
    statistics: Statistics,
}

/// Best order seen so far, with the far-edge coordinates of each rectangle.
struct Best {
    width: u64,
    height: u64,
    area: u64,
    rights: Vec<u64>,
    tops: Vec<u64>,
}

impl<'a> FloorplanSolver<'a> {
    pub fn new(instance: &'a FloorplanInstance) -> Result<Self, FloorplanError> {
        Ok(Self {
            instance,
            pair: SequencePair::new(instance.n_rectangles())?,
            width_dag: SequencePairDag::new(Orientation::LeftToRight, instance.widths()),
            height_dag: SequencePairDag::new(Orientation::BottomToTop, instance.heights()),
            statistics: Statistics::new(),
        })
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Size of the order space.
    pub fn order_count(&self) -> u128 {
        self.pair.order_count()
    }

    /// Find the least-area floorplan among the orders in `range`.
    ///
    /// The outcome's statistics cover this call only.
    pub fn solve(&mut self, range: SearchRange) -> Result<SearchOutcome, FloorplanError> {
        self.pair.set_order(range.offset)?;
        self.statistics = Statistics::new();
        let area_lower_bound = self.instance.area_lower_bound()?;
        let height_lower_bound = self.instance.height_lower_bound();

        // The first order always improves on nothing.
        self.statistics.increment(Counter::OrdersEvaluated);
        let width = self.width_dag.longest_path_length(&mut self.pair);
        let height = self.height_dag.longest_path_length(&mut self.pair);
        let mut best = self.record(width, height)?;
        let mut iterations: u64 = 1;
        let mut reached_lower_bound = best.area <= area_lower_bound;
        let mut exhausted = false;

        while !reached_lower_bound {
            if range.max_iterations.is_some_and(|max| iterations >= max) {
                break;
            }
            if !self.pair.increment() {
                exhausted = true;
                break;
            }
            iterations += 1;
            self.statistics.increment(Counter::OrdersEvaluated);

            let width = self.width_dag.longest_path_length(&mut self.pair);
            let hopeless = width
                .checked_mul(height_lower_bound)
                .map_or(true, |least| least >= best.area);
            if hopeless {
                self.statistics.increment(Counter::HeightsSkipped);
                continue;
            }
            let height = self.height_dag.longest_path_length(&mut self.pair);
            let area = width
                .checked_mul(height)
                .ok_or(FloorplanError::AreaOverflow { width, height })?;
            if area < best.area {
                best = self.record(width, height)?;
                reached_lower_bound = area <= area_lower_bound;
            }
        }

        let floorplan = Floorplan::new(
            self.instance.rectangles(),
            best.width,
            best.height,
            &best.rights,
            &best.tops,
            Corner::UpperRight,
        )?;
        let proven_optimal = reached_lower_bound || (exhausted && range.offset == 0);
        tracing::debug!(
            area = floorplan.area(),
            iterations,
            proven_optimal,
            "floorplan search finished"
        );
        Ok(SearchOutcome {
            floorplan,
            iterations,
            proven_optimal,
            statistics: self.statistics.clone(),
        })
    }

    /// Capture the current order as the best so far.
    fn record(&mut self, width: u64, height: u64) -> Result<Best, FloorplanError> {
        let area = width
            .checked_mul(height)
            .ok_or(FloorplanError::AreaOverflow { width, height })?;
        self.statistics.increment(Counter::AreaImprovements);
        tracing::debug!(
            width,
            height,
            area,
            order = %self.pair.order_number(),
            "improved floorplan"
        );
        Ok(Best {
            width,
            height,
            area,
            rights: self.width_dag.total_weights_in_order(&mut self.pair),
            tops: self.height_dag.total_weights_in_order(&mut self.pair),
        })
    }
}
