// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Constraint graphs of a sequence pair.
//!
//! For one orientation, the graph has an edge `x -> y` whenever `x` has the
//! orientation's relation to `y`. The negative sequence is already a
//! topological order for the left-to-right and bottom-to-top graphs, and its
//! reverse is one for the other two, so no general topological sort is
//! needed.
//!
//! Each vertex weighs its rectangle's extent along the axis. The total weight
//! of a vertex is the heaviest path ending there, including the vertex: the
//! coordinate of the far edge of its rectangle in a compacted placement.

use super::sequence::SequencePair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Edges follow `leftof`; weights are widths.
    LeftToRight,
    /// Edges follow `rightof`.
    RightToLeft,
    /// Edges follow `below`; weights are heights.
    BottomToTop,
    /// Edges follow `above`.
    TopToBottom,
}

impl Orientation {
    fn reversed(self) -> bool {
        matches!(self, Orientation::RightToLeft | Orientation::TopToBottom)
    }

    /// True if the graph has an edge `x -> y`.
    fn has_edge(self, pair: &mut SequencePair, x: usize, y: usize) -> bool {
        match self {
            Orientation::LeftToRight => pair.leftof(x, y),
            Orientation::RightToLeft => pair.rightof(x, y),
            Orientation::BottomToTop => pair.below(x, y),
            Orientation::TopToBottom => pair.above(x, y),
        }
    }
}

/// Longest paths in one constraint graph of a [`SequencePair`].
///
/// The graph holds no state of its own beyond a cache: every query takes the
/// pair and recomputes if the pair has changed since the last query.
#[derive(Debug, Clone)]
pub struct SequencePairDag {
    orientation: Orientation,
    weights: Vec<u64>,

    /// Vertices in topological order.
    order: Vec<usize>,
    /// Total weight of `order[k]`, at index `k`.
    totals: Vec<u64>,
    /// Revision of the pair the cache was computed for.
    revision: Option<u64>,
}

impl SequencePairDag {
    pub fn new(orientation: Orientation, weights: Vec<u64>) -> Self {
        let n = weights.len();
        Self {
            orientation,
            weights,
            order: Vec::with_capacity(n),
            totals: Vec::with_capacity(n),
            revision: None,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn refresh(&mut self, pair: &mut SequencePair) {
        if self.revision == Some(pair.revision()) {
            return;
        }
        debug_assert_eq!(pair.len(), self.weights.len());

        self.order.clear();
        self.order.extend_from_slice(pair.negative().permutation());
        if self.orientation.reversed() {
            self.order.reverse();
        }

        self.totals.clear();
        self.totals.extend(self.order.iter().map(|&v| self.weights[v]));
        for j in 1..self.order.len() {
            let y = self.order[j];
            for i in 0..j {
                let x = self.order[i];
                if self.orientation.has_edge(pair, x, y) {
                    let through = self.totals[i] + self.weights[y];
                    if through > self.totals[j] {
                        self.totals[j] = through;
                    }
                }
            }
        }
        self.revision = Some(pair.revision());
    }

    /// The heaviest path in the graph: the chip width or height.
    pub fn longest_path_length(&mut self, pair: &mut SequencePair) -> u64 {
        self.refresh(pair);
        self.totals.iter().copied().max().unwrap_or(0)
    }

    /// Total weight of every vertex, indexed by vertex.
    pub fn total_weights_in_order(&mut self, pair: &mut SequencePair) -> Vec<u64> {
        self.refresh(pair);
        let mut by_vertex = vec![0; self.order.len()];
        for (&v, &total) in self.order.iter().zip(self.totals.iter()) {
            by_vertex[v] = total;
        }
        by_vertex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_pair_stacks_horizontally() {
        let mut pair = SequencePair::new(3).unwrap();
        let mut width = SequencePairDag::new(Orientation::LeftToRight, vec![2, 3, 4]);
        let mut height = SequencePairDag::new(Orientation::BottomToTop, vec![5, 1, 2]);
        assert_eq!(width.longest_path_length(&mut pair), 9);
        assert_eq!(width.total_weights_in_order(&mut pair), vec![2, 5, 9]);
        assert_eq!(height.longest_path_length(&mut pair), 5);
        assert_eq!(height.total_weights_in_order(&mut pair), vec![5, 1, 2]);
    }

    #[test]
    fn test_reversed_orientations_mirror() {
        let mut pair = SequencePair::new(3).unwrap();
        let mut rtl = SequencePairDag::new(Orientation::RightToLeft, vec![2, 3, 4]);
        assert_eq!(rtl.longest_path_length(&mut pair), 9);
        // Rectangle 2 is rightmost, so it is first in right-to-left order.
        assert_eq!(rtl.total_weights_in_order(&mut pair), vec![9, 7, 4]);
    }

    #[test]
    fn test_stacked_vertically() {
        let mut pair = SequencePair::new(2).unwrap();
        // pos = [1 0], neg = [0 1]: rectangle 0 below rectangle 1.
        pair.set_orders(1, 0).unwrap();
        let mut width = SequencePairDag::new(Orientation::LeftToRight, vec![2, 3]);
        let mut height = SequencePairDag::new(Orientation::BottomToTop, vec![5, 1]);
        let mut ttb = SequencePairDag::new(Orientation::TopToBottom, vec![5, 1]);
        assert_eq!(width.longest_path_length(&mut pair), 3);
        assert_eq!(height.longest_path_length(&mut pair), 6);
        assert_eq!(height.total_weights_in_order(&mut pair), vec![5, 6]);
        assert_eq!(ttb.total_weights_in_order(&mut pair), vec![6, 1]);
    }

    #[test]
    fn test_refreshes_after_pair_changes() {
        let mut pair = SequencePair::new(2).unwrap();
        let mut width = SequencePairDag::new(Orientation::LeftToRight, vec![2, 3]);
        assert_eq!(width.longest_path_length(&mut pair), 5);
        pair.set_orders(1, 0).unwrap();
        assert_eq!(width.longest_path_length(&mut pair), 3);
        pair.increment();
        assert_eq!(width.longest_path_length(&mut pair), 5);
    }

    #[test]
    fn test_empty_graph() {
        let mut pair = SequencePair::new(0).unwrap();
        let mut width = SequencePairDag::new(Orientation::LeftToRight, Vec::new());
        assert_eq!(width.longest_path_length(&mut pair), 0);
        assert!(width.total_weights_in_order(&mut pair).is_empty());
    }
}
