//! Axis-aligned box geometry for paddle, ball, blocks and menu items
//!
//! A box is defined by its top-left corner and a non-negative size, in
//! window space (y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Principal axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Unit vector along the axis
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Axis::X => Vec2::X,
            Axis::Y => Vec2::Y,
        }
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisBox {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height (non-negative)
    pub size: Vec2,
}

impl AxisBox {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        debug_assert!(size.x >= 0.0 && size.y >= 0.0, "negative box size {size:?}");
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Corners in clockwise order starting at the top-left
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.pos,
            Vec2::new(self.right(), self.top()),
            Vec2::new(self.right(), self.bottom()),
            Vec2::new(self.left(), self.bottom()),
        ]
    }

    /// Project the corners onto an axis, returning `(min, max)`
    pub fn project(&self, axis: Vec2) -> (f32, f32) {
        self.corners()
            .iter()
            .map(|c| c.dot(axis))
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p), hi.max(p)))
    }

    /// Strict containment: points on the edge are outside
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x > self.left() && point.x < self.right() && point.y > self.top() && point.y < self.bottom()
    }

    /// Whether the box lies strictly inside a `width` x `height` area anchored at the origin
    pub fn inside_area(&self, width: f32, height: f32) -> bool {
        self.left() > 0.0 && self.right() < width && self.top() > 0.0 && self.bottom() < height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let b = AxisBox::new(Vec2::new(10.0, 20.0), Vec2::new(32.0, 16.0));
        assert_eq!(b.left(), 10.0);
        assert_eq!(b.right(), 42.0);
        assert_eq!(b.top(), 20.0);
        assert_eq!(b.bottom(), 36.0);
        assert_eq!(b.center(), Vec2::new(26.0, 28.0));
    }

    #[test]
    fn test_projection_matches_edges() {
        let b = AxisBox::new(Vec2::new(-5.0, 3.0), Vec2::new(4.0, 6.0));
        assert_eq!(b.project(Axis::X.unit()), (-5.0, -1.0));
        assert_eq!(b.project(Axis::Y.unit()), (3.0, 9.0));
    }

    #[test]
    fn test_contains_point_is_strict() {
        let b = AxisBox::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(b.contains_point(Vec2::new(5.0, 5.0)));
        assert!(!b.contains_point(Vec2::new(0.0, 5.0)));
        assert!(!b.contains_point(Vec2::new(5.0, 10.0)));
    }

    #[test]
    fn test_inside_area() {
        let b = AxisBox::new(Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0));
        assert!(b.inside_area(100.0, 100.0));
        assert!(!AxisBox::new(Vec2::new(0.0, 1.0), Vec2::new(2.0, 2.0)).inside_area(100.0, 100.0));
        assert!(!AxisBox::new(Vec2::new(98.0, 1.0), Vec2::new(2.0, 2.0)).inside_area(100.0, 100.0));
    }
}
