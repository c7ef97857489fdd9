// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Lower and upper bounds for the Dijkstra-Steiner search.
//!
//! For a label `(v, I)` the lower bound estimates the cost of connecting `v`
//! to every terminal outside `I`. Two admissible bounds are available:
//!
//! - **Bounding box**: half the perimeter of the bounding box of the
//!   complement of `I` together with `v`. In 3D this is the sum of the three
//!   axis extents.
//! - **One-tree**: half the minimum spanning tree of the complement, plus the
//!   average distance from `v` to its two nearest complement terminals (or
//!   the full distance if the complement is a single terminal).
//!
//! The one-tree bound halves odd numbers, so the grid coordinates are scaled
//! by an even factor before the search; see
//! [`DEFAULT_COORDINATE_SCALE`](crate::geometry::DEFAULT_COORDINATE_SCALE).
//!
//! The upper bound table `A(I) = (U(I), S(I))` records the cheapest known
//! tree connecting `I` to the witness terminals `S(I)` outside `I`. A label
//! whose cost exceeds `U(I)` cannot be part of an optimal solution.
//!
//! Every quantity that depends only on `I` is memoized by `I`.

use super::label::Label;
use crate::error::SteinerError;
use crate::geometry::{BoundingBox, Point3, TerminalSet};
use crate::instance::{GridInstance, VertexId};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Which lower bounds the search uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundOptions {
    pub use_bounding_box: bool,
    pub use_one_tree: bool,
}

impl BoundOptions {
    pub fn all() -> Self {
        Self {
            use_bounding_box: true,
            use_one_tree: true,
        }
    }

    pub fn one_tree() -> Self {
        Self {
            use_bounding_box: false,
            use_one_tree: true,
        }
    }

    pub fn bounding_box() -> Self {
        Self {
            use_bounding_box: true,
            use_one_tree: false,
        }
    }

    pub fn none() -> Self {
        Self {
            use_bounding_box: false,
            use_one_tree: false,
        }
    }
}

impl Default for BoundOptions {
    fn default() -> Self {
        Self::all()
    }
}

impl FromStr for BoundOptions {
    type Err = String;

    /// Parse one of `ALL`, `OT`, `BB` or `NONE`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(Self::all()),
            "OT" => Ok(Self::one_tree()),
            "BB" => Ok(Self::bounding_box()),
            "NONE" => Ok(Self::none()),
            _ => Err(format!(
                "unknown bound selection {:?} (expected ALL, OT, BB or NONE)",
                s
            )),
        }
    }
}

impl fmt::Display for BoundOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match (self.use_bounding_box, self.use_one_tree) {
            (true, true) => "ALL",
            (false, true) => "OT",
            (true, false) => "BB",
            (false, false) => "NONE",
        };
        write!(f, "{}", name)
    }
}

/// Best known upper bound for one terminal subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpperBound {
    /// `U(I)`.
    pub value: u64,
    /// `S(I)`: terminals outside `I` that the bounding tree also connects.
    pub witnesses: TerminalSet,
}

/// Result of an attempt to tighten an upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundUpdate {
    /// Preconditions not met; nothing was attempted.
    Skipped,
    /// The stored bound was already at least as good.
    Unchanged,
    /// The stored bound was lowered.
    Improved,
}

/// Bound computations and memo tables for one search.
pub struct BoundComputator<'a> {
    instance: &'a GridInstance,
    options: BoundOptions,

    /// Scaled location of each terminal.
    points: Vec<Point3>,
    all_terminals: TerminalSet,

    /// Bounding box of the complement of `I`, by `I`.
    complement_boxes: HashMap<TerminalSet, Option<BoundingBox>>,
    /// MST length of the complement of `I`, by `I`.
    complement_msts: HashMap<TerminalSet, u64>,
    /// Closest (distance, complement terminal) between `I` and its complement.
    complement_distances: HashMap<TerminalSet, (u64, usize)>,
    /// Closest (distance, complement terminal) between a vertex and the
    /// complement of `I`, by `(I, v)`.
    vertex_distances: HashMap<(TerminalSet, VertexId), (u64, usize)>,

    upper_bounds: HashMap<TerminalSet, UpperBound>,
}

impl<'a> BoundComputator<'a> {
    pub fn new(instance: &'a GridInstance, options: BoundOptions) -> Self {
        let n = instance.n_terminals();
        Self {
            instance,
            options,
            points: (0..n).map(|i| instance.terminal_point(i)).collect(),
            all_terminals: TerminalSet::full(n),
            complement_boxes: HashMap::new(),
            complement_msts: HashMap::new(),
            complement_distances: HashMap::new(),
            vertex_distances: HashMap::new(),
            upper_bounds: HashMap::new(),
        }
    }

    pub fn options(&self) -> BoundOptions {
        self.options
    }

    fn complement(&self, subset: TerminalSet) -> TerminalSet {
        self.all_terminals.difference(subset)
    }

    /// Half-perimeter of the bounding box of the complement of `I` and `v`.
    pub fn bb_lower_bound(&mut self, label: &Label) -> u64 {
        let subset = label.subset();
        let complement = self.complement(subset);
        let points = &self.points;
        let bbox = *self
            .complement_boxes
            .entry(subset)
            .or_insert_with(|| BoundingBox::of(complement.iter().map(|t| &points[t])));

        match bbox {
            Some(bbox) => bbox.with(self.instance.point(label.vertex())).half_perimeter(),
            // Nothing left to connect.
            None => 0,
        }
    }

    /// Length of a minimum spanning tree over the terminals in `set`,
    /// by Prim's algorithm.
    pub fn mst(&self, set: TerminalSet) -> u64 {
        let members: Vec<usize> = set.iter().collect();
        if members.len() <= 1 {
            return 0;
        }

        let mut in_tree = vec![false; members.len()];
        let mut best = vec![u64::MAX; members.len()];
        best[0] = 0;
        let mut total = 0;
        for _ in 0..members.len() {
            let mut next = usize::MAX;
            for k in 0..members.len() {
                if !in_tree[k] && (next == usize::MAX || best[k] < best[next]) {
                    next = k;
                }
            }
            in_tree[next] = true;
            total += best[next];
            let p = self.points[members[next]];
            for k in 0..members.len() {
                if !in_tree[k] {
                    let d = p.rect_distance(&self.points[members[k]]);
                    if d < best[k] {
                        best[k] = d;
                    }
                }
            }
        }
        total
    }

    /// MST of the complement, memoized by `I`.
    fn complement_mst(&mut self, subset: TerminalSet) -> u64 {
        if let Some(&mst) = self.complement_msts.get(&subset) {
            return mst;
        }
        let mst = self.mst(self.complement(subset));
        self.complement_msts.insert(subset, mst);
        mst
    }

    /// One-tree bound for connecting `v` to the complement of `I`.
    pub fn one_tree_lower_bound(&mut self, label: &Label) -> Result<u64, SteinerError> {
        let subset = label.subset();
        let complement = self.complement(subset);
        if complement.is_empty() {
            return Ok(0);
        }

        let mst = self.complement_mst(subset);
        let v = self.instance.point(label.vertex());

        let mut nearest = u64::MAX;
        let mut second = u64::MAX;
        for t in complement.iter() {
            let d = v.rect_distance(&self.points[t]);
            if d < nearest {
                second = nearest;
                nearest = d;
            } else if d < second {
                second = d;
            }
        }

        if complement.len() == 1 {
            return Ok(mst / 2 + nearest);
        }
        if second == u64::MAX {
            return Err(SteinerError::NoSecondNearest {
                vertex: label.vertex(),
                subset: subset.bits(),
            });
        }
        Ok(mst / 2 + (nearest + second) / 2)
    }

    /// The combined lower bound selected by the options.
    pub fn lower_bound(&mut self, label: &Label) -> Result<u64, SteinerError> {
        let bb = if self.options.use_bounding_box {
            self.bb_lower_bound(label)
        } else {
            0
        };
        let one_tree = if self.options.use_one_tree {
            self.one_tree_lower_bound(label)?
        } else {
            0
        };
        Ok(bb.max(one_tree))
    }

    /// Closest distance between a terminal of `I` and a terminal outside
    /// `I`, with the outside terminal achieving it.
    pub fn complement_distance(&mut self, subset: TerminalSet) -> Result<(u64, usize), SteinerError> {
        if let Some(&found) = self.complement_distances.get(&subset) {
            return Ok(found);
        }
        let complement = self.complement(subset);
        let mut best: Option<(u64, usize)> = None;
        for i in subset.iter() {
            for j in complement.iter() {
                let d = self.points[i].rect_distance(&self.points[j]);
                if best.map_or(true, |(b, _)| d < b) {
                    best = Some((d, j));
                }
            }
        }
        let found = best.ok_or(SteinerError::EmptyPartition {
            subset: subset.bits(),
        })?;
        self.complement_distances.insert(subset, found);
        Ok(found)
    }

    /// Closest distance between vertex `v` and a terminal outside `I`.
    pub fn vertex_complement_distance(
        &mut self,
        subset: TerminalSet,
        v: VertexId,
    ) -> Result<(u64, usize), SteinerError> {
        if let Some(&found) = self.vertex_distances.get(&(subset, v)) {
            return Ok(found);
        }
        let p = self.instance.point(v);
        let mut best: Option<(u64, usize)> = None;
        for j in self.complement(subset).iter() {
            let d = p.rect_distance(&self.points[j]);
            if best.map_or(true, |(b, _)| d < b) {
                best = Some((d, j));
            }
        }
        let found = best.ok_or(SteinerError::EmptyPartition {
            subset: subset.bits(),
        })?;
        self.vertex_distances.insert((subset, v), found);
        Ok(found)
    }

    /// The stored upper bound for `I`, if any.
    pub fn upper_bound(&self, subset: TerminalSet) -> Option<UpperBound> {
        self.upper_bounds.get(&subset).copied()
    }

    fn offer(&mut self, subset: TerminalSet, candidate: UpperBound) -> BoundUpdate {
        match self.upper_bounds.get(&subset) {
            Some(stored) if stored.value <= candidate.value => BoundUpdate::Unchanged,
            _ => {
                self.upper_bounds.insert(subset, candidate);
                BoundUpdate::Improved
            }
        }
    }

    /// Tighten `U(I)` with a tree made of the label's tree plus the cheapest
    /// edge from `I` or `v` to one terminal outside `I`.
    pub fn update_upper_bound(&mut self, label: &Label) -> Result<BoundUpdate, SteinerError> {
        let subset = label.subset();
        if subset.is_empty() {
            return Ok(BoundUpdate::Skipped);
        }
        let (subset_dist, subset_witness) = self.complement_distance(subset)?;
        let (vertex_dist, vertex_witness) = self.vertex_complement_distance(subset, label.vertex())?;
        let (dist, witness) = if vertex_dist < subset_dist {
            (vertex_dist, vertex_witness)
        } else {
            (subset_dist, subset_witness)
        };
        Ok(self.offer(
            subset,
            UpperBound {
                value: label.cost() + dist,
                witnesses: TerminalSet::singleton(witness),
            },
        ))
    }

    /// Tighten `U(I u J)` with `U(I) + U(J)`.
    ///
    /// Requires both bounds to be known and each witness set to avoid the
    /// other subset, so that the combined witnesses lie outside `I u J`.
    pub fn merge_upper_bound(&mut self, i: TerminalSet, j: TerminalSet) -> BoundUpdate {
        let (Some(a), Some(b)) = (self.upper_bound(i), self.upper_bound(j)) else {
            return BoundUpdate::Skipped;
        };
        if !a.witnesses.is_disjoint(j) || !i.is_disjoint(b.witnesses) {
            return BoundUpdate::Skipped;
        }
        let union = i.union(j);
        self.offer(
            union,
            UpperBound {
                value: a.value + b.value,
                witnesses: a.witnesses.union(b.witnesses).difference(union),
            },
        )
    }

    /// True if the label costs more than the known upper bound for its subset.
    pub fn exceeds_upper_bound(&self, label: &Label) -> bool {
        self.upper_bounds
            .get(&label.subset())
            .is_some_and(|ub| label.cost() > ub.value)
    }
}
