// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Exact solvers for two classical VLSI layout problems.
//!
//! # Rectilinear Steiner minimal trees
//!
//! Given up to 64 terminals in 3D, find the shortest network of axis-parallel
//! wires connecting them. The search is the Dijkstra-Steiner algorithm of
//! Hougardy, Silvanus and Vygen: a label `(v, I)` records the cheapest tree
//! found so far connecting the terminal subset `I` to the Hanan grid vertex
//! `v`, and labels are settled in order of cost plus an admissible lower
//! bound on the cost still to come.
//!
//! ```
//! use vlsi_exact::geometry::Point3;
//! use vlsi_exact::instance::GridInstance;
//! use vlsi_exact::steiner::{SteinerConfig, SteinerSolver};
//!
//! let points = [Point3::new(0, 0, 0), Point3::new(4, 0, 0), Point3::new(4, 4, 0)];
//! let instance = GridInstance::new(&points).unwrap();
//! let mut solver = SteinerSolver::new(&instance, SteinerConfig::default());
//! assert_eq!(solver.solve().unwrap().length(), 8);
//! ```
//!
//! # Floorplanning
//!
//! Given a handful of rectangles, find a non-overlapping placement whose
//! bounding box has least area. Every placement that matters is encoded by a
//! sequence pair (Murata et al.); the solver enumerates all `n! * n!` pairs
//! and evaluates each by longest paths in two constraint graphs. The order
//! space can be split into disjoint ranges searched in parallel.
//!
//! # Architecture
//!
//! ## Immutable instances
//!
//! - [`GridInstance`]: terminals, Hanan grid vertices and their neighbours
//! - [`FloorplanInstance`]: rectangles in input order
//!
//! ## Solver-owned state
//!
//! Each solver owns its memo tables, queue and counters, so separate solves
//! never share mutable state:
//! - [`SteinerSolver`] with its [`steiner::BoundComputator`] and [`steiner::LabelStore`]
//! - [`FloorplanSolver`] with its [`floorplan::SequencePair`] and two
//!   [`floorplan::SequencePairDag`]s
//!
//! # References
//!
//! - Hougardy, S., Silvanus, J., Vygen, J. (2017). "Dijkstra meets Steiner: a
//!   fast exact goal-oriented Steiner tree algorithm." Mathematical
//!   Programming Computation 9, 135-202.
//! - Murata, H., Fujiyoshi, K., Nakatake, S., Kajitani, Y. (1996).
//!   "VLSI module placement based on rectangle-packing by the sequence-pair."
//!   IEEE Transactions on CAD 15(12), 1518-1524.

pub mod cli;
pub mod error;
pub mod floorplan;
pub mod geometry;
pub mod instance;
pub mod parser;
pub mod state;
pub mod steiner;

// Re-export commonly used types
pub use error::{Error, FloorplanError, ParseError, Result, SteinerError};
pub use floorplan::{Floorplan, FloorplanSolver, SearchOutcome, SearchRange};
pub use instance::{FloorplanInstance, GridInstance};
pub use steiner::{SteinerSolution, SteinerSolver};
