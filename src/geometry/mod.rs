// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Geometric types shared by both solvers.
//!
//! This module contains type-safe representations of geometric primitives:
//! - Point3: Integer lattice points with rectilinear distance
//! - BoundingBox: Axis-aligned boxes of point sets
//! - TerminalSet: Bitset of terminal indices
//! - Rectangle: Blocks placed by the floorplanner

pub mod constants;
pub mod point;
pub mod rectangle;
pub mod terminal_set;

// Re-export for convenience
pub use constants::*;
pub use point::{BoundingBox, Point3};
pub use rectangle::{rectangles_overlap, Rectangle, RectangleId};
pub use terminal_set::TerminalSet;
