// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Problem instances.
//!
//! Both instance types are immutable once built and are shared read-only by
//! the solvers:
//! - [`GridInstance`]: terminals of a Steiner problem and their Hanan grid
//! - [`FloorplanInstance`]: rectangles of a floorplanning problem

pub mod floorplan;
pub mod grid;

pub use floorplan::FloorplanInstance;
pub use grid::{GridInstance, VertexId};
