// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Placed rectangles.

use crate::error::FloorplanError;
use crate::geometry::{rectangles_overlap, Rectangle};
use std::fmt::Write;

/// Which corner of each rectangle a coordinate refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    LowerLeft,
    LowerRight,
    UpperLeft,
    UpperRight,
}

/// A chip of a given size with every rectangle placed by its lower-left
/// corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Floorplan {
    width: u64,
    height: u64,
    area: u64,
    rectangles: Vec<Rectangle>,
    positions: Vec<(u64, u64)>,
}

impl Floorplan {
    /// Build a floorplan from per-rectangle coordinates of the given corner.
    pub fn new(
        rectangles: &[Rectangle],
        width: u64,
        height: u64,
        xs: &[u64],
        ys: &[u64],
        corner: Corner,
    ) -> Result<Self, FloorplanError> {
        for coords in [xs, ys] {
            if coords.len() != rectangles.len() {
                return Err(FloorplanError::CoordinateCount {
                    expected: rectangles.len(),
                    found: coords.len(),
                });
            }
        }
        let area = width
            .checked_mul(height)
            .ok_or(FloorplanError::AreaOverflow { width, height })?;

        let (from_right, from_top) = match corner {
            Corner::LowerLeft => (false, false),
            Corner::LowerRight => (true, false),
            Corner::UpperLeft => (false, true),
            Corner::UpperRight => (true, true),
        };
        let mut positions = Vec::with_capacity(rectangles.len());
        for (rect, (&x, &y)) in rectangles.iter().zip(xs.iter().zip(ys.iter())) {
            let x = if from_right { lower_edge(rect.id, x, rect.width)? } else { x };
            let y = if from_top { lower_edge(rect.id, y, rect.height)? } else { y };
            positions.push((x, y));
        }

        Ok(Self {
            width,
            height,
            area,
            rectangles: rectangles.to_vec(),
            positions,
        })
    }

    pub fn width(&self) -> u64 {
        self.width
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn area(&self) -> u64 {
        self.area
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    /// Lower-left corner of each rectangle, in input order.
    pub fn positions(&self) -> &[(u64, u64)] {
        &self.positions
    }

    /// Check that the rectangles fit on the chip without overlapping.
    pub fn verify(&self) -> Result<(), FloorplanError> {
        for (rect, &(x, y)) in self.rectangles.iter().zip(self.positions.iter()) {
            let fits = x.checked_add(rect.width).is_some_and(|right| right <= self.width)
                && y.checked_add(rect.height).is_some_and(|top| top <= self.height);
            if !fits {
                return Err(FloorplanError::OutOfBounds {
                    rectangle: rect.id,
                    width: self.width,
                    height: self.height,
                });
            }
        }
        for i in 0..self.rectangles.len() {
            for j in (i + 1)..self.rectangles.len() {
                let (a, b) = (&self.rectangles[i], &self.rectangles[j]);
                if rectangles_overlap(a, self.positions[i], b, self.positions[j]) {
                    return Err(FloorplanError::Overlap {
                        first: a.id,
                        second: b.id,
                    });
                }
            }
        }
        Ok(())
    }

    /// The text form: `"W H"`, then `"x y"` per rectangle, followed by
    /// `" w h"` if `with_dimensions` is set.
    pub fn render(&self, with_dimensions: bool) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{} {}", self.width, self.height);
        for (rect, (x, y)) in self.rectangles.iter().zip(self.positions.iter()) {
            if with_dimensions {
                let _ = writeln!(out, "{} {} {} {}", x, y, rect.width, rect.height);
            } else {
                let _ = writeln!(out, "{} {}", x, y);
            }
        }
        out
    }
}

fn lower_edge(rectangle: usize, coordinate: u64, extent: u64) -> Result<u64, FloorplanError> {
    coordinate
        .checked_sub(extent)
        .ok_or(FloorplanError::CoordinateUnderflow {
            rectangle,
            coordinate,
            extent,
        })
}
