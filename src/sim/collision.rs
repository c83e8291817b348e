//! Collision detection queries
//!
//! Stateless geometry tests shared by the physics world and gameplay code.
//! Degenerate inputs (zero velocity, zero direction) have defined fallbacks
//! instead of dividing by zero.

use glam::Vec2;

use super::geom::Rect;

/// Result of a swept AABB test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepResult {
    /// Whether the moving box touches the stationary one during this motion
    pub hit: bool,
    /// Fraction of the motion at first contact (0..=1)
    pub t: f32,
    /// Face normal of the stationary box that was hit
    pub normal: Vec2,
    /// Fraction of the motion left after contact (`1 - t`)
    pub remaining: f32,
}

impl SweepResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            t: 1.0,
            normal: Vec2::ZERO,
            remaining: 0.0,
        }
    }
}

/// Strict AABB overlap (touching edges don't count)
#[inline]
pub fn check_collision(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

/// Point inside rectangle, boundary inclusive
#[inline]
pub fn check_point_in_rect(point: Vec2, rect: &Rect) -> bool {
    rect.contains(point)
}

/// Circle vs rectangle via the closest point on the rectangle
pub fn check_circle_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = closest_point_on_rect(center, rect);
    distance_squared(center, closest) <= radius * radius
}

/// Clamp a point onto a rectangle
#[inline]
pub fn closest_point_on_rect(point: Vec2, rect: &Rect) -> Vec2 {
    Vec2::new(
        point.x.clamp(rect.x, rect.right()),
        point.y.clamp(rect.y, rect.bottom()),
    )
}

#[inline]
pub fn distance_squared(a: Vec2, b: Vec2) -> f32 {
    (a - b).length_squared()
}

/// Sweep `moving` along `velocity` against `stationary`
///
/// The stationary box is grown by the moving box's half-extents (Minkowski
/// sum) and a ray is cast from the moving box's center. The hit normal comes
/// from whichever face of `stationary` is nearest the hit point, checked in
/// the order left, right, top, bottom.
///
/// Zero velocity falls back to a plain overlap test with `t = 0`.
pub fn sweep_aabb(moving: &Rect, velocity: Vec2, stationary: &Rect) -> SweepResult {
    if velocity == Vec2::ZERO {
        if check_collision(moving, stationary) {
            return SweepResult {
                hit: true,
                t: 0.0,
                normal: Vec2::ZERO,
                remaining: 1.0,
            };
        }
        return SweepResult::miss();
    }

    let expanded = stationary.expanded(moving.w / 2.0, moving.h / 2.0);
    let ray_start = moving.center();

    let Some(t) = ray_intersect_rect(ray_start, velocity, &expanded) else {
        return SweepResult::miss();
    };
    if !(0.0..=1.0).contains(&t) {
        return SweepResult::miss();
    }

    let hit_point = ray_start + velocity * t;

    let dx1 = hit_point.x - stationary.x;
    let dx2 = stationary.right() - hit_point.x;
    let dy1 = hit_point.y - stationary.y;
    let dy2 = stationary.bottom() - hit_point.y;

    let min_dist = dx1.min(dx2).min(dy1).min(dy2);

    let normal = if min_dist == dx1 {
        Vec2::new(-1.0, 0.0)
    } else if min_dist == dx2 {
        Vec2::new(1.0, 0.0)
    } else if min_dist == dy1 {
        Vec2::new(0.0, -1.0)
    } else {
        Vec2::new(0.0, 1.0)
    };

    SweepResult {
        hit: true,
        t,
        normal,
        remaining: 1.0 - t,
    }
}

/// Slab test of the segment `start..start + dir` against a rectangle
///
/// Returns the entry fraction in `[0, 1]`. An axis with zero direction is
/// tested for containment instead; a zero direction never intersects.
pub fn ray_intersect_rect(start: Vec2, dir: Vec2, rect: &Rect) -> Option<f32> {
    if dir == Vec2::ZERO {
        return None;
    }

    let mut t_min = 0.0_f32;
    let mut t_max = 1.0_f32;

    for (origin, d, lo, hi) in [
        (start.x, dir.x, rect.x, rect.right()),
        (start.y, dir.y, rect.y, rect.bottom()),
    ] {
        if d != 0.0 {
            let mut t1 = (lo - origin) / d;
            let mut t2 = (hi - origin) / d;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        } else if origin < lo || origin > hi {
            return None;
        }
    }

    Some(t_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_hits_left_face() {
        let moving = Rect::new(0.0, 0.0, 10.0, 10.0);
        let stationary = Rect::new(15.0, 0.0, 10.0, 10.0);

        let result = sweep_aabb(&moving, Vec2::new(20.0, 0.0), &stationary);
        assert!(result.hit);
        assert!(result.t > 0.0 && result.t < 1.0);
        assert!((result.t - 0.25).abs() < 1e-5);
        assert_eq!(result.normal, Vec2::new(-1.0, 0.0));
        assert!((result.remaining - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_sweep_falling_onto_floor() {
        let moving = Rect::new(0.0, 0.0, 10.0, 10.0);
        let floor = Rect::new(-50.0, 30.0, 100.0, 10.0);

        let result = sweep_aabb(&moving, Vec2::new(0.0, 40.0), &floor);
        assert!(result.hit);
        assert!((result.t - 0.5).abs() < 1e-5);
        assert_eq!(result.normal, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_sweep_misses_when_too_short() {
        let moving = Rect::new(0.0, 0.0, 10.0, 10.0);
        let stationary = Rect::new(50.0, 0.0, 10.0, 10.0);
        let result = sweep_aabb(&moving, Vec2::new(20.0, 0.0), &stationary);
        assert!(!result.hit);
    }

    #[test]
    fn test_sweep_zero_velocity_is_static_overlap() {
        let moving = Rect::new(0.0, 0.0, 10.0, 10.0);
        let overlapping = Rect::new(5.0, 5.0, 10.0, 10.0);
        let apart = Rect::new(20.0, 0.0, 10.0, 10.0);

        let hit = sweep_aabb(&moving, Vec2::ZERO, &overlapping);
        assert!(hit.hit);
        assert_eq!(hit.t, 0.0);
        assert!(!sweep_aabb(&moving, Vec2::ZERO, &apart).hit);
    }

    #[test]
    fn test_ray_zero_direction_never_hits() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(ray_intersect_rect(Vec2::new(5.0, 5.0), Vec2::ZERO, &rect), None);
    }

    #[test]
    fn test_ray_axis_aligned_uses_containment() {
        let rect = Rect::new(10.0, 0.0, 10.0, 10.0);
        // Horizontal ray inside the slab's y range
        let t = ray_intersect_rect(Vec2::new(0.0, 5.0), Vec2::new(20.0, 0.0), &rect);
        assert_eq!(t, Some(0.5));
        // Same ray below the rectangle
        assert_eq!(
            ray_intersect_rect(Vec2::new(0.0, 15.0), Vec2::new(20.0, 0.0), &rect),
            None
        );
    }

    #[test]
    fn test_ray_starting_inside_reports_zero() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            ray_intersect_rect(Vec2::new(5.0, 5.0), Vec2::new(3.0, 1.0), &rect),
            Some(0.0)
        );
    }

    #[test]
    fn test_circle_rect() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(check_circle_rect(Vec2::new(13.0, 5.0), 3.0, &rect));
        assert!(!check_circle_rect(Vec2::new(13.1, 5.0), 3.0, &rect));
        // Corner: distance sqrt(8) ~ 2.83
        assert!(check_circle_rect(Vec2::new(12.0, 12.0), 3.0, &rect));
        assert!(!check_circle_rect(Vec2::new(12.0, 12.0), 2.5, &rect));
        // Center inside
        assert!(check_circle_rect(Vec2::new(5.0, 5.0), 0.1, &rect));
    }

    #[test]
    fn test_point_in_rect() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(check_point_in_rect(Vec2::new(10.0, 0.0), &rect));
        assert!(!check_point_in_rect(Vec2::new(-0.1, 0.0), &rect));
    }
}
