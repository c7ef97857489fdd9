// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Minimum-area rectangle floorplanning by sequence-pair enumeration.
//!
//! - [`sequence`]: permutations, sequence pairs and their relations
//! - [`dag`]: constraint graphs and their longest paths
//! - [`placement`]: placed rectangles, validation and text output
//! - [`solver`]: the exhaustive search over one range of orders
//! - [`parallel`]: the same search split across worker threads

pub mod dag;
pub mod parallel;
pub mod placement;
pub mod sequence;
pub mod solver;

pub use dag::{Orientation, SequencePairDag};
pub use parallel::{solve_parallel, solve_partitioned};
pub use placement::{Corner, Floorplan};
pub use sequence::{Relation, Sequence, SequencePair, Step};
pub use solver::{FloorplanConfig, FloorplanSolver, SearchOutcome, SearchRange};
