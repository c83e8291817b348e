//! Physics bodies and per-tick contact records

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Rect;

/// Caller-chosen body identifier, unique among live bodies
pub type BodyId = u32;

/// An axis-aligned box simulated by the physics world
///
/// Fields are public: gameplay code writes `velocity`/`acceleration` directly
/// through `PhysicsWorld::body_mut`. Anything that moves `position` must call
/// `update_bounds` afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub id: BodyId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Single-tick acceleration, cleared after every integration
    pub acceleration: Vec2,
    pub bounds: Rect,

    /// Never integrated, never pushed by resolution
    pub is_static: bool,
    /// Recomputed by the world every tick
    pub is_grounded: bool,
    /// Takes part in body-vs-body resolution
    pub is_solid: bool,

    /// Reserved for impulse-based resolution
    pub mass: f32,
    /// Ground traction factor, consumed by actor controllers
    pub friction: f32,
    /// Reserved for impulse-based resolution
    pub restitution: f32,
}

impl PhysicsBody {
    pub fn new(id: BodyId, position: Vec2, size: Vec2) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            bounds: Rect::from_pos_size(position, size),
            is_static: false,
            is_grounded: false,
            is_solid: true,
            mass: 1.0,
            friction: 0.0,
            restitution: 0.0,
        }
    }

    /// Copy `position` into `bounds`
    #[inline]
    pub fn update_bounds(&mut self) {
        self.bounds.x = self.position.x;
        self.bounds.y = self.position.y;
    }

    /// Move to `position` and resync bounds
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.update_bounds();
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.bounds.size()
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        !self.is_static
    }
}

/// A body-vs-body overlap found this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub body_a: BodyId,
    pub body_b: BodyId,
    /// Unit axis from A toward B (the direction B was pushed)
    pub normal: Vec2,
    /// Overlap depth along `normal` before correction
    pub penetration: f32,
    /// Midpoint between the two centers
    pub point: Vec2,
}

impl Contact {
    #[inline]
    pub fn involves(&self, id: BodyId) -> bool {
        self.body_a == id || self.body_b == id
    }

    /// The other participant, if `id` is one of the two
    pub fn other(&self, id: BodyId) -> Option<BodyId> {
        if self.body_a == id {
            Some(self.body_b)
        } else if self.body_b == id {
            Some(self.body_a)
        } else {
            None
        }
    }

    /// Normal pointing from `id` toward the other body
    ///
    /// `(0, 1)` means the other body is below `id`, `(1, 0)` to its right.
    pub fn normal_from(&self, id: BodyId) -> Vec2 {
        if self.body_b == id {
            -self.normal
        } else {
            self.normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_bounds_idempotent() {
        let mut body = PhysicsBody::new(1, Vec2::new(5.0, 6.0), Vec2::new(10.0, 20.0));
        body.position = Vec2::new(7.5, -3.0);
        body.update_bounds();
        let first = body.bounds;
        body.update_bounds();
        assert_eq!(body.bounds, first);
        assert_eq!(body.bounds, Rect::new(7.5, -3.0, 10.0, 20.0));
    }

    #[test]
    fn test_contact_orientation() {
        let contact = Contact {
            body_a: 1,
            body_b: 2,
            normal: Vec2::new(0.0, -1.0),
            penetration: 2.0,
            point: Vec2::ZERO,
        };
        assert_eq!(contact.other(1), Some(2));
        assert_eq!(contact.other(2), Some(1));
        assert_eq!(contact.other(3), None);
        assert_eq!(contact.normal_from(1), Vec2::new(0.0, -1.0));
        assert_eq!(contact.normal_from(2), Vec2::new(0.0, 1.0));
        assert!(contact.involves(2));
        assert!(!contact.involves(5));
    }
}
