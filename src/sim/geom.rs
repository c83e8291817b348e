//! Geometry primitives
//!
//! `Vec2` comes from glam; this module adds the axis-aligned `Rect` used for
//! every body and tile query, plus an epsilon-guarded normalize.
//! Screen convention: top-left origin, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::NORMALIZE_EPSILON;

/// Vector helpers glam doesn't provide in the form the simulation needs
pub trait VecExt {
    /// Unit vector in the same direction, or zero for near-zero lengths
    fn normalized(self) -> Vec2;
}

impl VecExt for Vec2 {
    #[inline]
    fn normalized(self) -> Vec2 {
        let len = self.length();
        if len < NORMALIZE_EPSILON {
            return Vec2::ZERO;
        }
        self / len
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Open-interval overlap: rectangles that only share an edge don't intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y)
    }

    /// Closed-interval containment (boundary counts as inside)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Grow by `dx` on the left and right and `dy` on the top and bottom
    pub fn expanded(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x - dx, self.y - dy, self.w + 2.0 * dx, self.h + 2.0 * dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_unit_length() {
        let v = Vec2::new(3.0, 4.0).normalized();
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_normalized_zero_and_tiny() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
        assert_eq!(Vec2::new(1e-8, -1e-8).normalized(), Vec2::ZERO);
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));

        let c = Rect::new(9.5, 5.0, 10.0, 10.0);
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(5.0, 10.0)));
        assert!(!r.contains(Vec2::new(10.01, 5.0)));
    }

    #[test]
    fn test_center_and_edges() {
        let r = Rect::new(2.0, 4.0, 10.0, 6.0);
        assert_eq!(r.center(), Vec2::new(7.0, 7.0));
        assert_eq!(r.right(), 12.0);
        assert_eq!(r.bottom(), 10.0);
        assert_eq!(r.expanded(1.0, 2.0), Rect::new(1.0, 2.0, 12.0, 10.0));
    }
}
