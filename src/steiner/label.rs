// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Labels of the Dijkstra-Steiner search and the arena that owns them.
//!
//! A label `(v, I)` stands for a Steiner tree connecting the terminals in `I`
//! to the vertex `v`. Its cost `l(v, I)` is the length of the cheapest such
//! tree found so far; once the label is permanent, that cost is optimal and
//! never changes again.

use crate::geometry::TerminalSet;
use crate::instance::VertexId;
use std::collections::HashMap;

/// Index of a label in its [`LabelStore`].
pub type LabelId = usize;

/// Search state for one (vertex, terminal subset) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    vertex: VertexId,
    subset: TerminalSet,

    /// Tentative cost `l(v, I)`.
    cost: u64,

    /// Lower bound for connecting `v` to the complement of `I`, computed the
    /// first time the label is offered to the queue.
    lower_bound: Option<u64>,

    /// Permanent labels are final. The flag never resets.
    permanent: bool,
}

impl Label {
    pub fn new(vertex: VertexId, subset: TerminalSet, cost: u64) -> Self {
        Self {
            vertex,
            subset,
            cost,
            lower_bound: None,
            permanent: false,
        }
    }

    pub fn vertex(&self) -> VertexId {
        self.vertex
    }

    pub fn subset(&self) -> TerminalSet {
        self.subset
    }

    pub fn cost(&self) -> u64 {
        self.cost
    }

    pub fn lower_bound(&self) -> Option<u64> {
        self.lower_bound
    }

    pub fn set_lower_bound(&mut self, lb: u64) {
        self.lower_bound = Some(lb);
    }

    pub fn is_permanent(&self) -> bool {
        self.permanent
    }

    /// Lower the cost to `candidate` if the label is not permanent and the
    /// candidate is strictly cheaper. Returns whether the cost changed.
    pub fn improve(&mut self, candidate: u64) -> bool {
        if self.permanent || candidate >= self.cost {
            return false;
        }
        self.cost = candidate;
        true
    }

    /// Mark the label permanent. Returns false if it already was.
    fn make_permanent(&mut self) -> bool {
        !std::mem::replace(&mut self.permanent, true)
    }
}

/// Arena of all labels created during one search.
///
/// Each vertex has at most one label per terminal subset. Permanent labels
/// are additionally listed per vertex, in the order they became permanent,
/// for the merge step.
#[derive(Debug, Clone, Default)]
pub struct LabelStore {
    labels: Vec<Label>,
    by_vertex: Vec<HashMap<TerminalSet, LabelId>>,
    permanent_by_vertex: Vec<Vec<LabelId>>,
}

impl LabelStore {
    pub fn new(n_vertices: usize) -> Self {
        Self {
            labels: Vec::new(),
            by_vertex: vec![HashMap::new(); n_vertices],
            permanent_by_vertex: vec![Vec::new(); n_vertices],
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, id: LabelId) -> &Label {
        &self.labels[id]
    }

    pub fn get_mut(&mut self, id: LabelId) -> &mut Label {
        &mut self.labels[id]
    }

    /// The label for `(v, subset)`, if one exists.
    pub fn find(&self, v: VertexId, subset: TerminalSet) -> Option<LabelId> {
        self.by_vertex[v].get(&subset).copied()
    }

    /// Add a new label.
    ///
    /// # Panics
    ///
    /// Panics if the vertex already has a label for the same subset.
    pub fn insert(&mut self, label: Label) -> LabelId {
        let id = self.labels.len();
        let previous = self.by_vertex[label.vertex].insert(label.subset, id);
        assert!(
            previous.is_none(),
            "Duplicate label for vertex {} and subset {}",
            label.vertex,
            label.subset
        );
        self.labels.push(label);
        id
    }

    /// Mark a label permanent. Returns false if it already was.
    pub fn make_permanent(&mut self, id: LabelId) -> bool {
        let label = &mut self.labels[id];
        if !label.make_permanent() {
            return false;
        }
        self.permanent_by_vertex[label.vertex].push(id);
        true
    }

    /// Permanent labels at `v`, oldest first.
    pub fn permanent_at(&self, v: VertexId) -> &[LabelId] {
        &self.permanent_by_vertex[v]
    }
}
