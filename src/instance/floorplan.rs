// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The list of rectangles of a floorplanning instance.

use crate::error::FloorplanError;
use crate::geometry::constants::{MAX_RECTANGLES, MAX_RECT_DIM};
use crate::geometry::Rectangle;

/// An immutable floorplanning instance.
///
/// Rectangle ids equal their position in [`rectangles`](Self::rectangles).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloorplanInstance {
    rectangles: Vec<Rectangle>,
}

impl FloorplanInstance {
    /// Create an instance from `(width, height)` pairs, assigning ids in order.
    pub fn new(dimensions: &[(u64, u64)]) -> Self {
        let rectangles = dimensions
            .iter()
            .enumerate()
            .map(|(id, &(w, h))| Rectangle::new(id, w, h))
            .collect();
        Self { rectangles }
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn n_rectangles(&self) -> usize {
        self.rectangles.len()
    }

    pub fn widths(&self) -> Vec<u64> {
        self.rectangles.iter().map(|r| r.width).collect()
    }

    pub fn heights(&self) -> Vec<u64> {
        self.rectangles.iter().map(|r| r.height).collect()
    }

    /// Sum of the rectangle areas: no floorplan can be smaller.
    pub fn area_lower_bound(&self) -> Result<u64, FloorplanError> {
        self.rectangles.iter().try_fold(0u64, |total, r| {
            let area = r.area().ok_or(FloorplanError::AreaOverflow {
                width: r.width,
                height: r.height,
            })?;
            total
                .checked_add(area)
                .ok_or(FloorplanError::TotalAreaOverflow)
        })
    }

    /// The tallest rectangle: no floorplan can be lower.
    pub fn height_lower_bound(&self) -> u64 {
        self.rectangles.iter().map(|r| r.height).max().unwrap_or(0)
    }

    /// Check that ids match positions and dimensions are within limits.
    pub fn verify(&self) -> bool {
        self.rectangles.len() <= MAX_RECTANGLES
            && self.rectangles.iter().enumerate().all(|(i, r)| {
                r.id == i
                    && (1..=MAX_RECT_DIM).contains(&r.width)
                    && (1..=MAX_RECT_DIM).contains(&r.height)
            })
    }
}
