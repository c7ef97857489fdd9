// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Exact rectilinear Steiner minimal trees in 3D.
//!
//! The search runs over labels `(v, I)`, one per Hanan grid vertex `v` and
//! subset `I` of the non-root terminals:
//! - [`label`]: label state and the arena that owns it
//! - [`bounds`]: admissible lower bounds and pruning upper bounds
//! - [`solver`]: the priority-queue driver

pub mod bounds;
pub mod label;
pub mod solver;

pub use bounds::{BoundComputator, BoundOptions, BoundUpdate, UpperBound};
pub use label::{Label, LabelId, LabelStore};
pub use solver::{SteinerConfig, SteinerSolution, SteinerSolver};
