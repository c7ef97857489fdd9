// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The Dijkstra-Steiner label search.
//!
//! Labels are settled in order of `l + lower bound`, as in A*. Settling a
//! label `(v, I)` relaxes the labels `(w, I)` of the grid neighbours of `v`
//! (the Dijkstra step) and combines it with every permanent label `(v, J)`
//! with disjoint `J` (the merge step). The search ends when the root label
//! `(root, R \ {root})` is settled: its cost is the length of a minimum
//! rectilinear Steiner tree.
//!
//! A label that is improved after it was queued leaves a stale entry behind.
//! Each entry records the cost it was queued with, and entries whose label is
//! permanent or has since changed cost are discarded when popped.

use super::bounds::{BoundComputator, BoundOptions, BoundUpdate};
use super::label::{Label, LabelId, LabelStore};
use crate::error::SteinerError;
use crate::geometry::constants::DEFAULT_COORDINATE_SCALE;
use crate::geometry::TerminalSet;
use crate::instance::GridInstance;
use crate::state::{Counter, Statistics};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Settings for one Steiner search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteinerConfig {
    pub bounds: BoundOptions,
    /// Factor applied to input coordinates when building the grid instance.
    pub coordinate_scale: i64,
    /// Emit a progress event every this many iterations (0 disables them).
    pub progress_interval: u64,
}

impl Default for SteinerConfig {
    fn default() -> Self {
        Self {
            bounds: BoundOptions::all(),
            coordinate_scale: DEFAULT_COORDINATE_SCALE,
            progress_interval: 10_000,
        }
    }
}

impl SteinerConfig {
    pub fn with_bounds(mut self, bounds: BoundOptions) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_coordinate_scale(mut self, scale: i64) -> Self {
        self.coordinate_scale = scale;
        self
    }
}

/// Length of a minimum Steiner tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteinerSolution {
    /// Tree length in scaled grid units.
    pub raw_length: u64,
    /// Coordinate scale of the instance.
    pub scale: i64,
    /// Queue entries popped before the root label was settled.
    pub iterations: u64,
}

impl SteinerSolution {
    /// Tree length in input units.
    pub fn length(&self) -> u64 {
        self.raw_length / self.scale as u64
    }
}

/// Queue entry: `Reverse` turns the max-heap into a min-heap on priority.
/// The cost at queue time identifies stale entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct QueueEntry {
    priority: u64,
    cost: u64,
    label: LabelId,
}

pub struct SteinerSolver<'a> {
    instance: &'a GridInstance,
    config: SteinerConfig,
    bounds: BoundComputator<'a>,
    labels: LabelStore,
    queue: BinaryHeap<Reverse<QueueEntry>>,

    /// MST over all terminals: no label may cost more.
    global_upper_bound: u64,
    /// `R \ {root}`.
    final_subset: TerminalSet,

    statistics: Statistics,
    /// Queue entries popped so far.
    iterations: u64,
    solution: Option<SteinerSolution>,
}

impl<'a> SteinerSolver<'a> {
    pub fn new(instance: &'a GridInstance, config: SteinerConfig) -> Self {
        let n = instance.n_terminals();
        Self {
            instance,
            config,
            bounds: BoundComputator::new(instance, config.bounds),
            labels: LabelStore::new(instance.n_vertices()),
            queue: BinaryHeap::new(),
            global_upper_bound: u64::MAX,
            final_subset: TerminalSet::full(n).difference(TerminalSet::singleton(0)),
            statistics: Statistics::new(),
            iterations: 0,
            solution: None,
        }
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// The result of the last successful [`solve`](Self::solve), if any.
    pub fn solution(&self) -> Option<SteinerSolution> {
        self.solution
    }

    /// Run the search to completion.
    ///
    /// Calling `solve` again returns the stored solution.
    pub fn solve(&mut self) -> Result<SteinerSolution, SteinerError> {
        if let Some(solution) = self.solution {
            return Ok(solution);
        }
        if self.final_subset.is_empty() {
            let solution = SteinerSolution {
                raw_length: 0,
                scale: self.instance.scale(),
                iterations: 0,
            };
            self.solution = Some(solution);
            return Ok(solution);
        }

        self.initialize()?;
        loop {
            if let Some(solution) = self.step()? {
                self.solution = Some(solution);
                return Ok(solution);
            }
        }
    }

    /// Pop one queue entry and process it. Returns the solution once the
    /// root label is settled.
    fn step(&mut self) -> Result<Option<SteinerSolution>, SteinerError> {
        let Some(Reverse(entry)) = self.queue.pop() else {
            return Err(SteinerError::QueueExhausted {
                iterations: self.iterations,
            });
        };
        self.iterations += 1;
        let iterations = self.iterations;
        if self.config.progress_interval > 0 && iterations % self.config.progress_interval == 0 {
            tracing::debug!(
                iterations,
                priority = entry.priority,
                queued = self.queue.len(),
                labels = self.labels.len(),
                "search progress"
            );
        }

        let id = entry.label;
        let label = self.labels.get(id);
        if label.is_permanent() || label.cost() != entry.cost {
            self.statistics.increment(Counter::TokensDiscarded);
            return Ok(None);
        }

        if self.bounds.update_upper_bound(label)? == BoundUpdate::Improved {
            self.statistics.increment(Counter::UpperBoundUpdates);
        }
        let label = self.labels.get(id);
        if self.bounds.exceeds_upper_bound(label) {
            self.statistics.increment(Counter::LabelsPruned);
            return Ok(None);
        }

        self.labels.make_permanent(id);
        self.statistics.increment(Counter::LabelsSettled);

        let label = self.labels.get(id);
        if label.vertex() == self.instance.root() && label.subset() == self.final_subset {
            let solution = SteinerSolution {
                raw_length: label.cost(),
                scale: self.instance.scale(),
                iterations,
            };
            tracing::debug!(
                length = solution.length(),
                raw_length = solution.raw_length,
                iterations,
                labels = self.labels.len(),
                "root label settled"
            );
            return Ok(Some(solution));
        }

        self.consider_neighbours(id)?;
        self.merge(id)?;
        Ok(None)
    }

    fn initialize(&mut self) -> Result<(), SteinerError> {
        self.global_upper_bound = self
            .bounds
            .mst(TerminalSet::full(self.instance.n_terminals()));
        tracing::debug!(
            global_upper_bound = self.global_upper_bound,
            bounds = %self.config.bounds,
            "starting label search"
        );

        for s in 1..self.instance.n_terminals() {
            let id = self.create(Label::new(
                self.instance.terminal(s),
                TerminalSet::singleton(s),
                0,
            ));
            self.add_to_queue(id)?;
        }
        for v in 0..self.instance.n_vertices() {
            let id = self.labels.insert(Label::new(v, TerminalSet::empty(), 0));
            self.labels.make_permanent(id);
        }
        Ok(())
    }

    fn create(&mut self, label: Label) -> LabelId {
        self.statistics.increment(Counter::LabelsCreated);
        self.labels.insert(label)
    }

    /// Queue a label unless its cost rules it out. Returns whether it was queued.
    fn add_to_queue(&mut self, id: LabelId) -> Result<bool, SteinerError> {
        let label = self.labels.get(id);
        let lower_bound = match label.lower_bound() {
            Some(lb) => lb,
            None => {
                let lb = self.bounds.lower_bound(label)?;
                self.labels.get_mut(id).set_lower_bound(lb);
                lb
            }
        };

        let label = self.labels.get(id);
        if label.cost() > self.global_upper_bound || self.bounds.exceeds_upper_bound(label) {
            self.statistics.increment(Counter::LabelsRejected);
            return Ok(false);
        }
        self.queue.push(Reverse(QueueEntry {
            priority: label.cost() + lower_bound,
            cost: label.cost(),
            label: id,
        }));
        self.statistics.increment(Counter::LabelsQueued);
        Ok(true)
    }

    /// Offer `cost` to the label `(v, subset)`, creating it if needed.
    fn relax(&mut self, v: usize, subset: TerminalSet, cost: u64) -> Result<(), SteinerError> {
        match self.labels.find(v, subset) {
            None => {
                let id = self.create(Label::new(v, subset, cost));
                self.add_to_queue(id)?;
            }
            Some(id) => {
                if self.labels.get_mut(id).improve(cost) {
                    self.add_to_queue(id)?;
                }
            }
        }
        Ok(())
    }

    /// Dijkstra step: extend the tree of `(v, I)` by one grid edge.
    fn consider_neighbours(&mut self, id: LabelId) -> Result<(), SteinerError> {
        let instance = self.instance;
        let label = self.labels.get(id);
        let (v, subset, cost) = (label.vertex(), label.subset(), label.cost());
        for &w in instance.neighbours(v) {
            self.relax(w, subset, cost + instance.distance(v, w))?;
        }
        Ok(())
    }

    /// Merge step: join the tree of `(v, I)` with every permanent `(v, J)`.
    fn merge(&mut self, id: LabelId) -> Result<(), SteinerError> {
        let label = self.labels.get(id);
        let (v, subset, cost) = (label.vertex(), label.subset(), label.cost());

        // Merging only creates non-permanent labels, so this list is stable.
        let n_partners = self.labels.permanent_at(v).len();
        for k in 0..n_partners {
            let partner = self.labels.get(self.labels.permanent_at(v)[k]);
            let other = partner.subset();
            if other.is_empty() || other.contains(0) || !other.is_disjoint(subset) {
                continue;
            }
            let other_cost = partner.cost();

            if self.bounds.merge_upper_bound(subset, other) == BoundUpdate::Improved {
                self.statistics.increment(Counter::UpperBoundMerges);
            }
            self.relax(v, subset.union(other), cost + other_cost)?;
        }
        Ok(())
    }
}
