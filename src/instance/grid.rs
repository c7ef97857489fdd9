// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The Hanan grid of a 3D rectilinear Steiner tree instance.
//!
//! The Hanan grid is formed by all combinations of the x, y and z coordinate
//! values that occur among the terminals. It is known to contain an optimal
//! rectilinear Steiner tree, so the label search only ever visits its vertices.
//!
//! # Vertex numbering
//!
//! Vertices are created in lexicographic (x, y, z) order and their id is their
//! index in that order. Vertex `(i, j, k)` of the grid (the i-th x value, j-th
//! y value, k-th z value) therefore has id `(i * ny + j) * nz + k`.
//!
//! # Root terminal
//!
//! Terminal 0 is the root of the search. After construction, it is the
//! terminal closest to the integer centroid of all terminals (ties go to the
//! earliest terminal in input order). The remaining terminals keep their
//! relative input positions, except for the one swapped out of slot 0.

use crate::error::SteinerError;
use crate::geometry::constants::{DEFAULT_COORDINATE_SCALE, MAX_TERMINALS};
use crate::geometry::Point3;

/// Unique identifier for a Hanan grid vertex.
pub type VertexId = usize;

/// An immutable Steiner instance: terminals embedded in their Hanan grid.
#[derive(Debug, Clone)]
pub struct GridInstance {
    /// All grid points, sorted lexicographically. Index = vertex id.
    vertices: Vec<Point3>,

    /// Up to six grid-adjacent vertices per vertex.
    neighbours: Vec<Vec<VertexId>>,

    /// Vertex id of each terminal. `terminals[0]` is the root.
    terminals: Vec<VertexId>,

    /// Input position (0-based) of each terminal.
    input_positions: Vec<usize>,

    /// Number of distinct x, y and z values.
    dims: [usize; 3],

    /// Factor applied to every input coordinate.
    scale: i64,
}

impl GridInstance {
    /// Build the grid for the given terminal locations with the default
    /// coordinate scale.
    pub fn new(points: &[Point3]) -> Result<Self, SteinerError> {
        Self::with_scale(points, DEFAULT_COORDINATE_SCALE)
    }

    /// Build the grid after multiplying every coordinate by `scale`.
    ///
    /// # Panics
    ///
    /// Panics if `scale < 1`.
    pub fn with_scale(points: &[Point3], scale: i64) -> Result<Self, SteinerError> {
        assert!(scale >= 1, "Coordinate scale must be positive: {}", scale);
        if points.is_empty() {
            return Err(SteinerError::NoTerminals);
        }
        if points.len() > MAX_TERMINALS {
            return Err(SteinerError::TooManyTerminals {
                count: points.len(),
                max: MAX_TERMINALS,
            });
        }

        let scaled = points
            .iter()
            .map(|&point| {
                point
                    .checked_scaled(scale)
                    .ok_or(SteinerError::CoordinateOverflow { point, scale })
            })
            .collect::<Result<Vec<Point3>, _>>()?;

        let xs = distinct_sorted(scaled.iter().map(|p| p.x));
        let ys = distinct_sorted(scaled.iter().map(|p| p.y));
        let zs = distinct_sorted(scaled.iter().map(|p| p.z));
        let dims = [xs.len(), ys.len(), zs.len()];

        let mut vertices = Vec::with_capacity(dims[0] * dims[1] * dims[2]);
        for &x in &xs {
            for &y in &ys {
                for &z in &zs {
                    vertices.push(Point3::new(x, y, z));
                }
            }
        }

        let neighbours = wire_neighbours(dims);

        // Every terminal coordinate is a grid coordinate by construction.
        let rank = |values: &[i64], c: i64| values.partition_point(|&v| v < c);
        let mut terminals: Vec<VertexId> = scaled
            .iter()
            .map(|p| (rank(&xs, p.x) * dims[1] + rank(&ys, p.y)) * dims[2] + rank(&zs, p.z))
            .collect();
        let mut input_positions: Vec<usize> = (0..scaled.len()).collect();

        let root = closest_to_centroid(&scaled);
        terminals.swap(0, root);
        input_positions.swap(0, root);

        tracing::debug!(
            terminals = terminals.len(),
            vertices = vertices.len(),
            nx = dims[0],
            ny = dims[1],
            nz = dims[2],
            root_input_position = root,
            "built Hanan grid"
        );

        Ok(Self {
            vertices,
            neighbours,
            terminals,
            input_positions,
            dims,
            scale,
        })
    }

    pub fn n_terminals(&self) -> usize {
        self.terminals.len()
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of distinct x, y and z values.
    pub fn dimensions(&self) -> [usize; 3] {
        self.dims
    }

    pub fn scale(&self) -> i64 {
        self.scale
    }

    /// Vertex ids of all terminals; index 0 is the root.
    pub fn terminals(&self) -> &[VertexId] {
        &self.terminals
    }

    /// Vertex id of terminal `i`.
    pub fn terminal(&self, i: usize) -> VertexId {
        self.terminals[i]
    }

    /// Location (scaled) of terminal `i`.
    pub fn terminal_point(&self, i: usize) -> Point3 {
        self.vertices[self.terminals[i]]
    }

    /// Input position (0-based) of terminal `i`.
    pub fn input_position(&self, i: usize) -> usize {
        self.input_positions[i]
    }

    pub fn root(&self) -> VertexId {
        self.terminals[0]
    }

    /// Location (scaled) of vertex `v`.
    pub fn point(&self, v: VertexId) -> Point3 {
        self.vertices[v]
    }

    pub fn neighbours(&self, v: VertexId) -> &[VertexId] {
        &self.neighbours[v]
    }

    /// Rectilinear distance between two vertices (in scaled units).
    pub fn distance(&self, v: VertexId, w: VertexId) -> u64 {
        self.vertices[v].rect_distance(&self.vertices[w])
    }

    /// Vertex id of a (scaled) grid point, if it lies on the grid.
    pub fn vertex_at(&self, p: &Point3) -> Option<VertexId> {
        self.vertices.binary_search(p).ok()
    }
}

fn distinct_sorted(values: impl Iterator<Item = i64>) -> Vec<i64> {
    let mut v: Vec<i64> = values.collect();
    v.sort_unstable();
    v.dedup();
    v
}

/// Neighbour lists for a grid of the given dimensions, using the
/// lexicographic vertex numbering.
fn wire_neighbours([nx, ny, nz]: [usize; 3]) -> Vec<Vec<VertexId>> {
    let id = |i: usize, j: usize, k: usize| (i * ny + j) * nz + k;
    let mut neighbours = Vec::with_capacity(nx * ny * nz);
    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                let mut adj = Vec::with_capacity(6);
                if i > 0 {
                    adj.push(id(i - 1, j, k));
                }
                if i + 1 < nx {
                    adj.push(id(i + 1, j, k));
                }
                if j > 0 {
                    adj.push(id(i, j - 1, k));
                }
                if j + 1 < ny {
                    adj.push(id(i, j + 1, k));
                }
                if k > 0 {
                    adj.push(id(i, j, k - 1));
                }
                if k + 1 < nz {
                    adj.push(id(i, j, k + 1));
                }
                neighbours.push(adj);
            }
        }
    }
    neighbours
}

/// Index of the point closest to the integer centroid (first minimum wins).
fn closest_to_centroid(points: &[Point3]) -> usize {
    let n = points.len() as i64;
    let sum = points.iter().fold((0i64, 0i64, 0i64), |acc, p| {
        (acc.0 + p.x, acc.1 + p.y, acc.2 + p.z)
    });
    let center = Point3::new(sum.0 / n, sum.1 / n, sum.2 / n);

    let mut best = 0;
    let mut best_dist = points[0].rect_distance(&center);
    for (i, p) in points.iter().enumerate().skip(1) {
        let d = p.rect_distance(&center);
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape() -> Vec<Point3> {
        vec![
            Point3::new(0, 0, 0),
            Point3::new(4, 0, 0),
            Point3::new(4, 4, 0),
        ]
    }

    #[test]
    fn test_grid_size() {
        let inst = GridInstance::with_scale(&l_shape(), 1).unwrap();
        assert_eq!(inst.dimensions(), [2, 2, 1]);
        assert_eq!(inst.n_vertices(), 4);
        assert_eq!(inst.n_terminals(), 3);
    }

    #[test]
    fn test_vertices_are_lexicographic() {
        let inst = GridInstance::with_scale(&l_shape(), 1).unwrap();
        for v in 1..inst.n_vertices() {
            assert!(inst.point(v - 1) < inst.point(v));
        }
    }

    #[test]
    fn test_neighbours_are_symmetric_and_axis_aligned() {
        let points = vec![
            Point3::new(0, 0, 0),
            Point3::new(3, 1, 2),
            Point3::new(5, 7, 1),
        ];
        let inst = GridInstance::with_scale(&points, 1).unwrap();
        assert_eq!(inst.n_vertices(), 27);
        for v in 0..inst.n_vertices() {
            assert!(inst.neighbours(v).len() <= 6);
            for &w in inst.neighbours(v) {
                assert!(inst.neighbours(w).contains(&v));
                let (p, q) = (inst.point(v), inst.point(w));
                let differing = [p.x != q.x, p.y != q.y, p.z != q.z]
                    .iter()
                    .filter(|&&d| d)
                    .count();
                assert_eq!(differing, 1);
            }
        }
        // The centre vertex of a 3x3x3 grid has all six neighbours.
        assert_eq!(inst.neighbours(13).len(), 6);
    }

    #[test]
    fn test_root_is_closest_to_centroid() {
        // Centroid of the L-shape is (2, 1, 0); (4, 0, 0) is at distance 3,
        // (0, 0, 0) also at 3, so the first one in input order wins.
        let inst = GridInstance::with_scale(&l_shape(), 1).unwrap();
        assert_eq!(inst.terminal_point(0), Point3::new(0, 0, 0));

        let points = vec![
            Point3::new(0, 0, 0),
            Point3::new(10, 10, 0),
            Point3::new(5, 5, 0),
            Point3::new(10, 0, 0),
        ];
        let inst = GridInstance::with_scale(&points, 1).unwrap();
        assert_eq!(inst.terminal_point(0), Point3::new(5, 5, 0));
        assert_eq!(inst.input_position(0), 2);
        assert_eq!(inst.terminal_point(2), Point3::new(0, 0, 0));
        assert_eq!(inst.input_position(2), 0);
    }

    #[test]
    fn test_scaling() {
        let inst = GridInstance::new(&l_shape()).unwrap();
        assert_eq!(inst.scale(), 2);
        assert_eq!(inst.vertex_at(&Point3::new(8, 8, 0)), Some(inst.terminal(2)));
        assert_eq!(inst.distance(inst.terminal(0), inst.terminal(2)), 16);
    }

    #[test]
    fn test_rejects_empty_and_oversized() {
        assert_eq!(
            GridInstance::new(&[]).unwrap_err(),
            SteinerError::NoTerminals
        );
        let many: Vec<Point3> = (0..=MAX_TERMINALS as i64).map(|i| Point3::new(i, 0, 0)).collect();
        assert!(matches!(
            GridInstance::new(&many),
            Err(SteinerError::TooManyTerminals { .. })
        ));
    }

    #[test]
    fn test_rejects_overflowing_scale() {
        let far = Point3::new(0, i64::MAX / 2 + 1, 0);
        assert_eq!(
            GridInstance::new(&[Point3::new(0, 0, 0), far]).unwrap_err(),
            SteinerError::CoordinateOverflow { point: far, scale: 2 }
        );
    }
}
