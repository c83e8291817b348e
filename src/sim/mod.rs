//! Deterministic simulation module
//!
//! All physics and gameplay logic lives here. This module must be pure and
//! deterministic:
//! - Fixed timestep only
//! - Stable iteration order (body insertion order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod body;
pub mod clock;
pub mod collision;
pub mod geom;
pub mod level;
pub mod world;

pub use actor::{ActorInput, EnemyState, Facing, Patroller, Player, PlayerEvent, PlayerState};
pub use body::{BodyId, Contact, PhysicsBody};
pub use clock::FixedTimestep;
pub use collision::{
    SweepResult, check_circle_rect, check_collision, check_point_in_rect, ray_intersect_rect,
    sweep_aabb,
};
pub use geom::{Rect, VecExt};
pub use level::{Level, LevelData, LevelGrid, Tile};
pub use world::{PhysicsWorld, RayHit};
