// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Points of the 3D integer lattice and their rectilinear (L1) distance.

use std::fmt;

/// A point with integer coordinates in three dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point3 {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Point3 {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Rectilinear (Manhattan) distance between two points.
    ///
    /// # Examples
    ///
    /// ```
    /// use vlsi_exact::geometry::Point3;
    ///
    /// let a = Point3::new(0, 0, 0);
    /// let b = Point3::new(4, -6, 1);
    /// assert_eq!(a.rect_distance(&b), 11);
    /// ```
    pub fn rect_distance(&self, other: &Point3) -> u64 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }

    /// Multiply every coordinate by `factor`, or `None` on overflow.
    pub fn checked_scaled(&self, factor: i64) -> Option<Self> {
        Some(Self::new(
            self.x.checked_mul(factor)?,
            self.y.checked_mul(factor)?,
            self.z.checked_mul(factor)?,
        ))
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Axis-aligned bounding box of a set of points.
///
/// Its half-perimeter (the sum of the three extents) is a lower bound on the
/// length of any rectilinear Steiner tree connecting the points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox {
    /// Bounding box of a single point.
    pub fn at(p: Point3) -> Self {
        Self { min: p, max: p }
    }

    /// Bounding box of the given points, or `None` if there are none.
    pub fn of<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bbox = Self::at(first);
        for p in iter {
            bbox.extend(*p);
        }
        Some(bbox)
    }

    /// Grow the box so that it contains `p`.
    pub fn extend(&mut self, p: Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// A copy of the box grown to contain `p`.
    pub fn with(mut self, p: Point3) -> Self {
        self.extend(p);
        self
    }

    /// Sum of the extents along the three axes.
    pub fn half_perimeter(&self) -> u64 {
        self.min.rect_distance(&self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_distance_symmetric() {
        let a = Point3::new(3, -2, 7);
        let b = Point3::new(-1, 5, 7);
        assert_eq!(a.rect_distance(&b), 11);
        assert_eq!(b.rect_distance(&a), 11);
        assert_eq!(a.rect_distance(&a), 0);
    }

    #[test]
    fn test_scaled() {
        assert_eq!(Point3::new(1, 2, 3).checked_scaled(2), Some(Point3::new(2, 4, 6)));
        assert_eq!(Point3::new(1, i64::MIN, 3).checked_scaled(2), None);
    }

    #[test]
    fn test_bounding_box() {
        let points = [Point3::new(0, 0, 0), Point3::new(4, 0, 2), Point3::new(4, 4, 0)];
        let bbox = BoundingBox::of(&points).unwrap();
        assert_eq!(bbox.min, Point3::new(0, 0, 0));
        assert_eq!(bbox.max, Point3::new(4, 4, 2));
        assert_eq!(bbox.half_perimeter(), 10);

        let grown = bbox.with(Point3::new(-1, 0, 0));
        assert_eq!(grown.half_perimeter(), 11);
    }

    #[test]
    fn test_bounding_box_empty() {
        let none: Vec<Point3> = Vec::new();
        assert!(BoundingBox::of(&none).is_none());
    }
}
