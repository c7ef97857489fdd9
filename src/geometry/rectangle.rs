// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Rectangles to be placed by the floorplanner.

/// Unique identifier for a rectangle.
///
/// Rectangles are numbered sequentially in input order, starting at 0.
pub type RectangleId = usize;

/// An axis-parallel rectangle with positive integer dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub id: RectangleId,
    pub width: u64,
    pub height: u64,
}

impl Rectangle {
    pub fn new(id: RectangleId, width: u64, height: u64) -> Self {
        Self { id, width, height }
    }

    /// `None` if the area does not fit in 64 bits.
    pub fn area(&self) -> Option<u64> {
        self.width.checked_mul(self.height)
    }
}

/// Whether the half-open intervals `[a, a + len_a)` and `[b, b + len_b)` share a point.
pub(crate) fn intervals_overlap(a: u64, len_a: u64, b: u64, len_b: u64) -> bool {
    a < b + len_b && b < a + len_a
}

/// Whether two rectangles placed with lower-left corners `pa` and `pb` overlap.
///
/// Rectangles that merely touch along an edge or at a corner do not overlap.
pub fn rectangles_overlap(a: &Rectangle, pa: (u64, u64), b: &Rectangle, pb: (u64, u64)) -> bool {
    intervals_overlap(pa.0, a.width, pb.0, b.width) && intervals_overlap(pa.1, a.height, pb.1, b.height)
}
