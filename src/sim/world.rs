//! Physics world
//!
//! Owns every body and advances them one fixed step at a time. Order within a
//! tick matters and is fixed:
//! 1. level pass per dynamic body (boundary clamp, ground or ceiling, walls)
//! 2. velocity then position integration
//! 3. pairwise body-vs-body positional correction
//!
//! Grounded state is derived fresh each tick from the tile probe and from
//! pairwise contacts; nothing else carries it between ticks.

use std::fmt;

use glam::Vec2;

use super::body::{BodyId, Contact, PhysicsBody};
use super::collision::{check_collision, ray_intersect_rect};
use super::geom::Rect;
use super::level::LevelGrid;
use crate::consts::{GROUNDING_NORMAL, NORMALIZE_EPSILON};
use crate::settings::PhysicsConfig;

/// Cap on tiles visited by one tile raycast
const MAX_RAYCAST_STEPS: usize = 256;

/// Nearest hit of `PhysicsWorld::raycast`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec2,
    /// Fraction along `start..end`
    pub t: f32,
    /// Body that was hit, `None` for level tiles
    pub body: Option<BodyId>,
}

pub struct PhysicsWorld {
    /// Insertion order is iteration order
    bodies: Vec<PhysicsBody>,
    /// Contacts from the most recent `update`
    contacts: Vec<Contact>,
    config: PhysicsConfig,
    level: Option<Box<dyn LevelGrid>>,
}

impl fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("bodies", &self.bodies)
            .field("contacts", &self.contacts)
            .field("config", &self.config)
            .field("has_level", &self.level.is_some())
            .finish()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl PhysicsWorld {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            bodies: Vec::new(),
            contacts: Vec::new(),
            config,
            level: None,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    /// Attach the tile grid queried by the level pass
    pub fn set_level(&mut self, level: impl LevelGrid + 'static) {
        self.level = Some(Box::new(level));
    }

    /// Detach the tile grid; bodies fall unobstructed afterwards
    pub fn clear_level(&mut self) -> Option<Box<dyn LevelGrid>> {
        self.level.take()
    }

    pub fn level(&self) -> Option<&dyn LevelGrid> {
        self.level.as_deref()
    }

    /// Add a dynamic body
    ///
    /// Returns `None` (and logs) if a live body already uses `id`.
    pub fn create_body(
        &mut self,
        id: BodyId,
        position: Vec2,
        size: Vec2,
    ) -> Option<&mut PhysicsBody> {
        if self.contains(id) {
            log::warn!("Body {} already exists, creation refused", id);
            return None;
        }
        self.bodies.push(PhysicsBody::new(id, position, size));
        self.bodies.last_mut()
    }

    /// Add a static body covering `rect`
    pub fn create_static_body(&mut self, id: BodyId, rect: Rect) -> Option<&mut PhysicsBody> {
        let body = self.create_body(id, rect.position(), rect.size())?;
        body.is_static = true;
        Some(body)
    }

    /// Remove a body, returning it; its contacts are dropped too
    pub fn remove_body(&mut self, id: BodyId) -> Option<PhysicsBody> {
        let index = self.index_of(id)?;
        self.contacts.retain(|c| !c.involves(id));
        Some(self.bodies.remove(index))
    }

    pub fn body(&self, id: BodyId) -> Option<&PhysicsBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Temporary mutable view for gameplay writes (velocity, acceleration)
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut PhysicsBody> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn bodies(&self) -> &[PhysicsBody] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.index_of(id).is_some()
    }

    /// All contacts from the last tick
    pub fn collisions(&self) -> &[Contact] {
        &self.contacts
    }

    /// Contacts from the last tick involving `id`
    pub fn collisions_for(&self, id: BodyId) -> impl Iterator<Item = &Contact> + '_ {
        self.contacts.iter().filter(move |c| c.involves(id))
    }

    /// Advance the simulation by one fixed step
    pub fn update(&mut self, dt: f32) {
        self.contacts.clear();

        let config = self.config;
        let level = self.level.as_deref();

        for body in self.bodies.iter_mut().filter(|b| b.is_dynamic()) {
            body.is_grounded = false;
            if let Some(level) = level {
                resolve_level(body, level, &config, dt);
            }
            integrate_velocity(body, &config, dt);
            integrate_position(body, dt);
        }

        self.resolve_collisions();
    }

    /// Nearest solid body or level tile along `start..end`
    ///
    /// A zero-length segment never hits.
    pub fn raycast(&self, start: Vec2, end: Vec2, ignore: Option<BodyId>) -> Option<RayHit> {
        let dir = end - start;
        if dir.length() < NORMALIZE_EPSILON {
            return None;
        }

        let mut best: Option<RayHit> = None;
        for body in &self.bodies {
            if !body.is_solid || Some(body.id) == ignore {
                continue;
            }
            if let Some(t) = ray_intersect_rect(start, dir, &body.bounds) {
                if best.is_none_or(|hit| t < hit.t) {
                    best = Some(RayHit {
                        point: start + dir * t,
                        t,
                        body: Some(body.id),
                    });
                }
            }
        }

        if let Some(t) = self.level().and_then(|level| raycast_tiles(level, start, dir)) {
            if best.is_none_or(|hit| t < hit.t) {
                best = Some(RayHit {
                    point: start + dir * t,
                    t,
                    body: None,
                });
            }
        }

        best
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }

    /// Push apart every overlapping pair of solid bodies
    fn resolve_collisions(&mut self) {
        let count = self.bodies.len();
        for i in 0..count {
            for j in (i + 1)..count {
                let (head, tail) = self.bodies.split_at_mut(j);
                if let Some(contact) = resolve_pair(&mut head[i], &mut tail[0]) {
                    self.contacts.push(contact);
                }
            }
        }
    }
}

/// Body against the tile grid, before integration
fn resolve_level(body: &mut PhysicsBody, level: &dyn LevelGrid, config: &PhysicsConfig, dt: f32) {
    let ts = level.tile_size();
    let skin = config.contact_skin;

    // World boundary
    let max_x = level.width() as f32 * ts - body.bounds.w;
    if body.position.x < 0.0 {
        body.position.x = 0.0;
        body.velocity.x = 0.0;
    } else if body.position.x > max_x {
        body.position.x = max_x;
        body.velocity.x = 0.0;
    }
    body.update_bounds();

    // Ground or ceiling first: a body sunk into the floor must be lifted out
    // before the wall probe, or the floor row reads as a wall
    let vy = body.velocity.y;
    let b = body.bounds;
    let (left, right) = (b.x + skin, b.right() - skin);
    let row_solid = |row: i32| span_solid(level, Axis::Row, row, left, right);
    let clamp = |r: i32| r.clamp(-1, level.height());

    if vy >= 0.0 {
        let reach = vy * dt + config.probe_depth;
        let first = clamp(cell_at(b.bottom(), ts));
        let last = clamp(cell_at(b.bottom() + reach, ts));
        if let Some(row) = (first..=last).find(|&r| row_solid(r)) {
            body.is_grounded = true;
            body.position.y = row as f32 * ts - b.h;
            body.velocity.y = 0.0;
        }
    } else {
        let reach = -vy * dt + config.probe_depth;
        let first = clamp(cell_before(b.y, ts));
        let last = clamp(cell_at(b.y - reach, ts));
        if let Some(row) = (last..=first).rev().find(|&r| row_solid(r)) {
            body.position.y = (row + 1) as f32 * ts;
            body.velocity.y = 0.0;
        }
    }
    body.update_bounds();

    // Walls
    let vx = body.velocity.x;
    if vx != 0.0 {
        let b = body.bounds;
        let reach = vx.abs() * dt + config.probe_depth;
        let (top, bottom) = (b.y + skin, b.bottom() - skin);
        let column_solid = |col: i32| span_solid(level, Axis::Column, col, top, bottom);
        let clamp = |c: i32| c.clamp(-1, level.width());

        if vx > 0.0 {
            let first = clamp(cell_at(b.right(), ts));
            let last = clamp(cell_at(b.right() + reach, ts));
            if let Some(col) = (first..=last).find(|&c| column_solid(c)) {
                body.position.x = col as f32 * ts - b.w;
                body.velocity.x = 0.0;
            }
        } else {
            let first = clamp(cell_before(b.x, ts));
            let last = clamp(cell_at(b.x - reach, ts));
            if let Some(col) = (last..=first).rev().find(|&c| column_solid(c)) {
                body.position.x = (col + 1) as f32 * ts;
                body.velocity.x = 0.0;
            }
        }
        body.update_bounds();
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Row,
    Column,
}

/// Is any tile of one row (or column) solid between `from` and `to` pixels?
fn span_solid(level: &dyn LevelGrid, axis: Axis, index: i32, from: f32, to: f32) -> bool {
    let ts = level.tile_size();
    // A half-tile band centered in the cell keeps the query to that one cell
    let band = index as f32 * ts + ts * 0.25;
    let rect = match axis {
        Axis::Row => Rect::new(from, band, (to - from).max(0.0), ts * 0.5),
        Axis::Column => Rect::new(band, from, ts * 0.5, (to - from).max(0.0)),
    };
    level.check_collision(&rect)
}

/// Cell containing pixel `p` (a boundary belongs to the cell after it)
#[inline]
fn cell_at(p: f32, tile_size: f32) -> i32 {
    (p / tile_size).floor() as i32
}

/// Cell just before pixel `p` (a boundary belongs to the cell before it)
#[inline]
fn cell_before(p: f32, tile_size: f32) -> i32 {
    (p / tile_size).ceil() as i32 - 1
}

fn integrate_velocity(body: &mut PhysicsBody, config: &PhysicsConfig, dt: f32) {
    if body.is_grounded {
        // Resting: don't let gravity build up, but keep upward (jump) velocity
        body.velocity.y = body.velocity.y.min(0.0);
    } else {
        body.acceleration += config.gravity;
    }

    body.velocity += body.acceleration * dt;
    body.velocity.y = body.velocity.y.min(config.max_fall_speed);

    if !body.is_grounded {
        body.velocity.x *= config.air_resistance;
    }

    body.acceleration = Vec2::ZERO;
}

fn integrate_position(body: &mut PhysicsBody, dt: f32) {
    body.position += body.velocity * dt;
    body.update_bounds();
}

/// Minimum-translation separation of one pair
fn resolve_pair(a: &mut PhysicsBody, b: &mut PhysicsBody) -> Option<Contact> {
    if !a.is_solid || !b.is_solid {
        return None;
    }
    if a.is_static && b.is_static {
        return None;
    }
    if !check_collision(&a.bounds, &b.bounds) {
        return None;
    }

    let center_a = a.bounds.center();
    let delta = b.bounds.center() - center_a;

    let overlap_x = (a.bounds.w + b.bounds.w) / 2.0 - delta.x.abs();
    let overlap_y = (a.bounds.h + b.bounds.h) / 2.0 - delta.y.abs();

    let (normal, penetration) = if overlap_x < overlap_y {
        let sign = if delta.x > 0.0 { 1.0 } else { -1.0 };
        (Vec2::new(sign, 0.0), overlap_x)
    } else {
        let sign = if delta.y > 0.0 { 1.0 } else { -1.0 };
        (Vec2::new(0.0, sign), overlap_y)
    };

    let contact = Contact {
        body_a: a.id,
        body_b: b.id,
        normal,
        penetration,
        point: center_a + delta * 0.5,
    };

    let correction = normal * penetration;
    if a.is_static {
        b.position += correction;
        b.update_bounds();
    } else if b.is_static {
        a.position -= correction;
        a.update_bounds();
    } else {
        a.position -= correction * 0.5;
        b.position += correction * 0.5;
        a.update_bounds();
        b.update_bounds();
    }

    // y grows downward: normal.y < 0 means B sits on top of A
    if normal.y < -GROUNDING_NORMAL {
        land(b);
    } else if normal.y > GROUNDING_NORMAL {
        land(a);
    }

    Some(contact)
}

fn land(body: &mut PhysicsBody) {
    if body.is_static {
        return;
    }
    body.is_grounded = true;
    if body.velocity.y > 0.0 {
        body.velocity.y = 0.0;
    }
}

/// DDA walk over tiles along `start..start + dir`; returns the entry fraction
fn raycast_tiles(level: &dyn LevelGrid, start: Vec2, dir: Vec2) -> Option<f32> {
    let ts = level.tile_size();
    let mut cx = cell_at(start.x, ts);
    let mut cy = cell_at(start.y, ts);
    if level.check_tile(cx, cy) {
        return Some(0.0);
    }

    let step = |d: f32| {
        if d > 0.0 {
            1
        } else if d < 0.0 {
            -1
        } else {
            0
        }
    };
    let (step_x, step_y) = (step(dir.x), step(dir.y));

    let first_boundary = |origin: f32, d: f32, cell: i32, s: i32| match s {
        1 => ((cell + 1) as f32 * ts - origin) / d,
        -1 => (cell as f32 * ts - origin) / d,
        _ => f32::INFINITY,
    };
    let mut t_max_x = first_boundary(start.x, dir.x, cx, step_x);
    let mut t_max_y = first_boundary(start.y, dir.y, cy, step_y);
    let t_delta_x = if step_x != 0 { ts / dir.x.abs() } else { f32::INFINITY };
    let t_delta_y = if step_y != 0 { ts / dir.y.abs() } else { f32::INFINITY };

    for _ in 0..MAX_RAYCAST_STEPS {
        let t = if t_max_x < t_max_y {
            cx += step_x;
            let t = t_max_x;
            t_max_x += t_delta_x;
            t
        } else {
            cy += step_y;
            let t = t_max_y;
            t_max_y += t_delta_y;
            t
        };

        if t > 1.0 {
            return None;
        }
        if level.check_tile(cx, cy) {
            return Some(t);
        }
    }

    None
}
