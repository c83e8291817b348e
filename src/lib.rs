//! Tile Platformer - fixed-step 2D platformer physics
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collision queries, tile level,
//!   physics world, actor controllers, fixed-step clock)
//! - `settings`: Data-driven physics and actor tuning

pub mod settings;
pub mod sim;

pub use settings::{EnemyTuning, PhysicsConfig, PlayerTuning, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest real frame delta fed to the accumulator (spiral-of-death guard)
    pub const MAX_FRAME_DELTA: f32 = 0.05;

    /// Pixels per tile
    pub const TILE_SIZE: f32 = 32.0;

    /// Downward gravity (pixels/s²)
    pub const GRAVITY: f32 = 980.0;
    /// Terminal vertical velocity (pixels/s)
    pub const MAX_FALL_SPEED: f32 = 500.0;
    /// Per-tick horizontal velocity multiplier while airborne
    pub const AIR_RESISTANCE: f32 = 0.99;
    /// Per-tick horizontal velocity multiplier an actor applies on the ground
    pub const GROUND_FRICTION: f32 = 0.92;

    /// Extra reach of the tile probes beyond the body's travel this tick
    pub const PROBE_DEPTH: f32 = 1.0;
    /// Inset on the non-probed axis so tiles merely touching a side don't count
    pub const CONTACT_SKIN: f32 = 0.5;
    /// |normal.y| above which a pairwise contact grounds the upper body
    pub const GROUNDING_NORMAL: f32 = 0.5;
    /// Lengths below this normalize to zero
    pub const NORMALIZE_EPSILON: f32 = 1e-6;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 24.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    pub const PLAYER_MAX_SPEED: f32 = 350.0;
    pub const PLAYER_JUMP_SPEED: f32 = 450.0;
    pub const PLAYER_ACCELERATION: f32 = 1200.0;
    /// Rising velocity multiplier applied while jump is released
    pub const PLAYER_JUMP_CUT: f32 = 0.5;
    /// Falling speed that counts as having walked off a ledge
    pub const LEAVE_GROUND_SPEED: f32 = 5.0;
    /// Horizontal speed above which a grounded player is running
    pub const RUN_THRESHOLD: f32 = 10.0;

    /// Gameplay timers (seconds)
    pub const COYOTE_TIME: f32 = 0.15;
    pub const JUMP_BUFFER_TIME: f32 = 0.1;
    pub const INVINCIBILITY_TIME: f32 = 2.0;
    pub const MAX_LIVES: u32 = 3;

    /// Enemy defaults
    pub const GOOMBA_SPEED: f32 = 50.0;
    pub const KOOPA_SPEED: f32 = 75.0;
    pub const ENEMY_SIZE: f32 = 32.0;
    pub const STUN_TIME: f32 = 1.5;
}
