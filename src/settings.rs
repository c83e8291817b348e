//! Physics and actor tuning
//!
//! Everything here is plain data with serde defaults, so a partial JSON
//! document only overrides the values it names. Reading the file itself is the
//! host's job; `Settings::load` takes the text.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// World-level physics parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration (pixels/s², +y is down)
    pub gravity: Vec2,
    /// Vertical velocity cap
    pub max_fall_speed: f32,
    /// Horizontal velocity multiplier per airborne tick
    pub air_resistance: f32,
    /// Tile probe reach beyond this tick's travel
    pub probe_depth: f32,
    /// Inset on the non-probed axis of each tile probe
    pub contact_skin: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, GRAVITY),
            max_fall_speed: MAX_FALL_SPEED,
            air_resistance: AIR_RESISTANCE,
            probe_depth: PROBE_DEPTH,
            contact_skin: CONTACT_SKIN,
        }
    }
}

/// Player controller tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub size: Vec2,
    pub acceleration: f32,
    pub max_speed: f32,
    pub jump_speed: f32,
    /// Rising velocity multiplier while jump is released
    pub jump_cut: f32,
    /// Velocity multiplier per tick on the ground with no input
    pub ground_friction: f32,
    pub coyote_time: f32,
    pub jump_buffer_time: f32,
    pub invincibility_time: f32,
    pub lives: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            acceleration: PLAYER_ACCELERATION,
            max_speed: PLAYER_MAX_SPEED,
            jump_speed: PLAYER_JUMP_SPEED,
            jump_cut: PLAYER_JUMP_CUT,
            ground_friction: GROUND_FRICTION,
            coyote_time: COYOTE_TIME,
            jump_buffer_time: JUMP_BUFFER_TIME,
            invincibility_time: INVINCIBILITY_TIME,
            lives: MAX_LIVES,
        }
    }
}

/// Patrolling enemy tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub size: Vec2,
    pub speed: f32,
    pub stun_time: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            size: Vec2::splat(ENEMY_SIZE),
            speed: GOOMBA_SPEED,
            stun_time: STUN_TIME,
        }
    }
}

impl EnemyTuning {
    /// Faster shelled variant
    pub fn koopa() -> Self {
        Self {
            speed: KOOPA_SPEED,
            ..Self::default()
        }
    }
}

/// All tunables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsConfig,
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse settings text if any, falling back to defaults
    pub fn load(json: Option<&str>) -> Self {
        if let Some(json) = json {
            match Self::from_json(json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Invalid settings ({}), using defaults", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "physics": { "max_fall_speed": 800.0 } }"#).unwrap();
        assert_eq!(settings.physics.max_fall_speed, 800.0);
        assert_eq!(settings.physics.gravity, Vec2::new(0.0, GRAVITY));
        assert_eq!(settings.player, PlayerTuning::default());
    }

    #[test]
    fn test_load_falls_back_on_garbage() {
        assert_eq!(Settings::load(Some("not json")), Settings::default());
        assert_eq!(Settings::load(None), Settings::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::default();
        settings.player.jump_speed = 600.0;
        settings.enemy = EnemyTuning::koopa();
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
