//! Actor controllers
//!
//! Gameplay objects that steer a body they don't own. Each actor holds only a
//! `BodyId` and goes through `PhysicsWorld` for every read and write, so a
//! removed body simply makes the actor inert.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::BodyId;
use super::world::PhysicsWorld;
use crate::consts::{GROUNDING_NORMAL, LEAVE_GROUND_SPEED, RUN_THRESHOLD};
use crate::settings::{EnemyTuning, PlayerTuning};

/// Controller input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActorInput {
    pub left: bool,
    pub right: bool,
    /// Jump went down this tick
    pub jump_pressed: bool,
    /// Jump is being held
    pub jump_held: bool,
}

impl ActorInput {
    /// -1, 0 or 1
    fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Idle,
    Running,
    Jumping,
    Falling,
    Hurt,
    Dead,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Things that happened to the player, for audio/effects hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Jumped,
    Landed,
    LeftGround,
    Hurt,
    Died,
}

/// Player controller
#[derive(Debug, Clone)]
pub struct Player {
    id: BodyId,
    tuning: PlayerTuning,
    state: PlayerState,
    facing: Facing,
    was_grounded: bool,
    coyote_timer: f32,
    jump_buffer_timer: f32,
    invulnerability_timer: f32,
    score: u32,
    coins: u32,
    lives: u32,
    powered_up: bool,
}

impl Player {
    /// Create the player's body and controller
    ///
    /// Returns `None` if `id` is already taken in `world`.
    pub fn spawn(
        world: &mut PhysicsWorld,
        id: BodyId,
        position: Vec2,
        tuning: PlayerTuning,
    ) -> Option<Self> {
        let body = world.create_body(id, position, tuning.size)?;
        body.friction = tuning.ground_friction;

        Some(Self {
            id,
            tuning,
            state: PlayerState::Idle,
            facing: Facing::Right,
            was_grounded: false,
            coyote_timer: 0.0,
            jump_buffer_timer: 0.0,
            invulnerability_timer: 0.0,
            score: 0,
            coins: 0,
            lives: tuning.lives,
            powered_up: false,
        })
    }

    /// Apply one tick of input; call before `PhysicsWorld::update`
    pub fn update(
        &mut self,
        world: &mut PhysicsWorld,
        input: &ActorInput,
        dt: f32,
    ) -> Vec<PlayerEvent> {
        let mut events = Vec::new();

        self.update_timers(dt);
        if self.state == PlayerState::Dead {
            return events;
        }

        let Some(body) = world.body_mut(self.id) else {
            return events;
        };

        // Grounded state comes from the world's previous tick
        let grounded = body.is_grounded;
        if grounded && !self.was_grounded {
            events.push(PlayerEvent::Landed);
        }
        if self.was_grounded && !grounded && body.velocity.y > LEAVE_GROUND_SPEED {
            // Walked off a ledge: allow a late jump
            self.coyote_timer = self.tuning.coyote_time;
            events.push(PlayerEvent::LeftGround);
        }
        self.was_grounded = grounded;

        if input.jump_pressed {
            self.jump_buffer_timer = self.tuning.jump_buffer_time;
        }
        if self.jump_buffer_timer > 0.0 && (grounded || self.coyote_timer > 0.0) {
            body.velocity.y = -self.tuning.jump_speed;
            self.jump_buffer_timer = 0.0;
            self.coyote_timer = 0.0;
            events.push(PlayerEvent::Jumped);
        }

        let direction = input.direction();
        if direction != 0.0 {
            let max = self.tuning.max_speed;
            body.velocity.x =
                (body.velocity.x + direction * self.tuning.acceleration * dt).clamp(-max, max);
            self.facing = if direction < 0.0 { Facing::Left } else { Facing::Right };
        } else if grounded {
            body.velocity.x *= self.tuning.ground_friction;
        }

        // Variable jump height
        if !input.jump_held && body.velocity.y < 0.0 {
            body.velocity.y *= self.tuning.jump_cut;
        }

        if !matches!(self.state, PlayerState::Hurt | PlayerState::Dead) {
            // A jump issued this tick already counts as airborne
            self.state = if grounded && body.velocity.y >= 0.0 {
                if body.velocity.x.abs() > RUN_THRESHOLD {
                    PlayerState::Running
                } else {
                    PlayerState::Idle
                }
            } else if body.velocity.y < 0.0 {
                PlayerState::Jumping
            } else {
                PlayerState::Falling
            };
        }

        events
    }

    fn update_timers(&mut self, dt: f32) {
        self.coyote_timer = (self.coyote_timer - dt).max(0.0);
        self.jump_buffer_timer = (self.jump_buffer_timer - dt).max(0.0);

        if self.invulnerability_timer > 0.0 {
            self.invulnerability_timer = (self.invulnerability_timer - dt).max(0.0);
            if self.invulnerability_timer == 0.0 && self.state == PlayerState::Hurt {
                self.state = PlayerState::Idle;
            }
        }
    }

    /// Lose the power-up, or a life when there is none
    ///
    /// Ignored while invulnerable or dead.
    pub fn take_damage(&mut self) -> Option<PlayerEvent> {
        if self.is_invulnerable() || self.state == PlayerState::Dead {
            return None;
        }

        if self.powered_up {
            self.powered_up = false;
        } else {
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                log::info!("Player {} died", self.id);
                self.state = PlayerState::Dead;
                return Some(PlayerEvent::Died);
            }
        }

        self.invulnerability_timer = self.tuning.invincibility_time;
        self.state = PlayerState::Hurt;
        Some(PlayerEvent::Hurt)
    }

    /// Returns false if already powered up
    pub fn power_up(&mut self) -> bool {
        if self.powered_up {
            return false;
        }
        self.powered_up = true;
        true
    }

    /// Small upward kick after stomping an enemy
    pub fn bounce(&self, world: &mut PhysicsWorld) {
        if let Some(body) = world.body_mut(self.id) {
            body.velocity.y = -self.tuning.jump_speed * 0.5;
        }
    }

    /// Move back to `position` at rest, briefly invulnerable
    pub fn respawn(&mut self, world: &mut PhysicsWorld, position: Vec2) {
        if let Some(body) = world.body_mut(self.id) {
            body.set_position(position);
            body.velocity = Vec2::ZERO;
            body.acceleration = Vec2::ZERO;
        }
        self.invulnerability_timer = self.tuning.invincibility_time;
        self.coyote_timer = 0.0;
        self.jump_buffer_timer = 0.0;
        self.was_grounded = false;
        self.state = PlayerState::Idle;
    }

    /// Back to a fresh game: score, coins, lives and power-up
    pub fn reset(&mut self, world: &mut PhysicsWorld) {
        self.score = 0;
        self.coins = 0;
        self.lives = self.tuning.lives;
        self.powered_up = false;
        self.invulnerability_timer = 0.0;
        self.state = PlayerState::Idle;
        if let Some(body) = world.body_mut(self.id) {
            body.velocity = Vec2::ZERO;
            body.acceleration = Vec2::ZERO;
        }
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn add_coins(&mut self, coins: u32) {
        self.coins = self.coins.saturating_add(coins);
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_powered_up(&self) -> bool {
        self.powered_up
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability_timer > 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.state == PlayerState::Dead
    }

    pub fn position(&self, world: &PhysicsWorld) -> Option<Vec2> {
        world.body(self.id).map(|b| b.position)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    #[default]
    Patrol,
    Stunned,
    Dead,
}

/// Walks back and forth, turning around whenever it is blocked
#[derive(Debug, Clone)]
pub struct Patroller {
    id: BodyId,
    tuning: EnemyTuning,
    state: EnemyState,
    /// -1 (left) or 1 (right)
    direction: f32,
    stun_timer: f32,
}

impl Patroller {
    /// Create the enemy's body, initially walking left
    pub fn spawn(
        world: &mut PhysicsWorld,
        id: BodyId,
        position: Vec2,
        tuning: EnemyTuning,
    ) -> Option<Self> {
        let body = world.create_body(id, position, tuning.size)?;
        body.velocity.x = -tuning.speed;

        Some(Self {
            id,
            tuning,
            state: EnemyState::Patrol,
            direction: -1.0,
            stun_timer: 0.0,
        })
    }

    /// Steer for the next tick; call before `PhysicsWorld::update`
    pub fn update(&mut self, world: &mut PhysicsWorld, dt: f32) {
        match self.state {
            EnemyState::Dead => {}
            EnemyState::Stunned => {
                self.stun_timer = (self.stun_timer - dt).max(0.0);
                if self.stun_timer == 0.0 {
                    self.state = EnemyState::Patrol;
                }
                if let Some(body) = world.body_mut(self.id) {
                    body.velocity.x = if self.state == EnemyState::Patrol {
                        self.direction * self.tuning.speed
                    } else {
                        0.0
                    };
                }
            }
            EnemyState::Patrol => {
                let Some(body) = world.body(self.id) else {
                    return;
                };
                // The level pass zeroes vx against walls and the world edge
                let stopped = body.velocity.x == 0.0;
                let bumped = world
                    .collisions_for(self.id)
                    .any(|c| c.normal_from(self.id).x * self.direction > GROUNDING_NORMAL);
                if stopped || bumped {
                    self.direction = -self.direction;
                }

                if let Some(body) = world.body_mut(self.id) {
                    body.velocity.x = self.direction * self.tuning.speed;
                }
            }
        }
    }

    /// Did `other` land on top of this enemy during the last tick?
    pub fn stomped_by(&self, world: &PhysicsWorld, other: BodyId) -> bool {
        if self.state == EnemyState::Dead {
            return false;
        }
        world
            .collisions_for(self.id)
            .filter(|c| c.other(self.id) == Some(other))
            .any(|c| c.normal_from(self.id).y < -GROUNDING_NORMAL)
    }

    /// Is `other` touching this enemy from any side but the top?
    pub fn touches(&self, world: &PhysicsWorld, other: BodyId) -> bool {
        if self.state != EnemyState::Patrol {
            return false;
        }
        world
            .collisions_for(self.id)
            .filter(|c| c.other(self.id) == Some(other))
            .any(|c| c.normal_from(self.id).y >= -GROUNDING_NORMAL)
    }

    pub fn stun(&mut self, world: &mut PhysicsWorld) {
        if self.state == EnemyState::Dead {
            return;
        }
        self.state = EnemyState::Stunned;
        self.stun_timer = self.tuning.stun_time;
        if let Some(body) = world.body_mut(self.id) {
            body.velocity.x = 0.0;
        }
    }

    /// Remove the enemy's body from the world
    pub fn kill(&mut self, world: &mut PhysicsWorld) {
        if self.state == EnemyState::Dead {
            return;
        }
        self.state = EnemyState::Dead;
        world.remove_body(self.id);
        log::debug!("Enemy {} killed", self.id);
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::level::{Level, LevelData};

    /// 20x10 tiles with a floor on row 9 (top at y = 288)
    fn floor_world() -> PhysicsWorld {
        let mut data = LevelData::empty(20, 10);
        for x in 0..20 {
            data.fill_solid(x, 9, 1);
        }
        let mut world = PhysicsWorld::default();
        world.set_level(Level::new(data));
        world
    }

    fn step(world: &mut PhysicsWorld, player: &mut Player, input: ActorInput) -> Vec<PlayerEvent> {
        let events = player.update(world, &input, SIM_DT);
        world.update(SIM_DT);
        events
    }

    fn settled_player(world: &mut PhysicsWorld) -> Player {
        let mut player =
            Player::spawn(world, 1, Vec2::new(100.0, 256.0), PlayerTuning::default()).unwrap();
        for _ in 0..5 {
            step(world, &mut player, ActorInput::default());
        }
        player
    }

    #[test]
    fn test_spawn_refuses_duplicate_id() {
        let mut world = floor_world();
        assert!(Player::spawn(&mut world, 1, Vec2::ZERO, PlayerTuning::default()).is_some());
        assert!(Player::spawn(&mut world, 1, Vec2::ZERO, PlayerTuning::default()).is_none());
        assert!(Patroller::spawn(&mut world, 1, Vec2::ZERO, EnemyTuning::default()).is_none());
    }

    #[test]
    fn test_jump_from_ground() {
        let mut world = floor_world();
        let mut player = settled_player(&mut world);
        assert_eq!(player.state(), PlayerState::Idle);

        let input = ActorInput {
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        };
        let events = step(&mut world, &mut player, input);
        assert!(events.contains(&PlayerEvent::Jumped));
        assert_eq!(player.state(), PlayerState::Jumping);

        let body = world.body(1).unwrap();
        assert!(body.position.y < 256.0);
        assert!(!body.is_grounded);
    }

    #[test]
    fn test_no_jump_in_midair() {
        let mut world = floor_world();
        let mut player =
            Player::spawn(&mut world, 1, Vec2::new(100.0, 20.0), PlayerTuning::default()).unwrap();
        step(&mut world, &mut player, ActorInput::default());

        let input = ActorInput {
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        };
        let events = step(&mut world, &mut player, input);
        assert!(!events.contains(&PlayerEvent::Jumped));
        assert!(world.body(1).unwrap().velocity.y > 0.0);
    }

    #[test]
    fn test_buffered_jump_fires_on_landing() {
        let mut world = floor_world();
        // About 4 px above the floor
        let mut player =
            Player::spawn(&mut world, 1, Vec2::new(100.0, 252.0), PlayerTuning::default()).unwrap();
        step(&mut world, &mut player, ActorInput::default());

        let press = ActorInput {
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        };
        let hold = ActorInput {
            jump_held: true,
            ..Default::default()
        };
        let mut jumped = step(&mut world, &mut player, press).contains(&PlayerEvent::Jumped);
        for _ in 0..5 {
            jumped |= step(&mut world, &mut player, hold).contains(&PlayerEvent::Jumped);
        }
        assert!(jumped);
    }

    #[test]
    fn test_coyote_jump_after_leaving_ledge() {
        // Floor only under the left half
        let mut data = LevelData::empty(20, 10);
        for x in 0..5 {
            data.fill_solid(x, 9, 1);
        }
        let mut world = PhysicsWorld::default();
        world.set_level(Level::new(data));
        let mut player =
            Player::spawn(&mut world, 1, Vec2::new(130.0, 256.0), PlayerTuning::default()).unwrap();

        let run = ActorInput {
            right: true,
            ..Default::default()
        };
        let mut left_ground = false;
        for _ in 0..60 {
            if step(&mut world, &mut player, run).contains(&PlayerEvent::LeftGround) {
                left_ground = true;
                break;
            }
        }
        assert!(left_ground);
        assert!(!world.body(1).unwrap().is_grounded);

        let jump = ActorInput {
            right: true,
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        };
        assert!(step(&mut world, &mut player, jump).contains(&PlayerEvent::Jumped));
        assert!(world.body(1).unwrap().velocity.y < 0.0);
    }

    #[test]
    fn test_running_is_speed_capped() {
        let mut world = floor_world();
        let mut player = settled_player(&mut world);
        let run = ActorInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..30 {
            step(&mut world, &mut player, run);
        }
        assert_eq!(player.state(), PlayerState::Running);
        assert_eq!(player.facing(), Facing::Right);
        let vx = world.body(1).unwrap().velocity.x;
        assert!(vx > 0.0 && vx <= PlayerTuning::default().max_speed);
    }

    #[test]
    fn test_ground_friction_slows_to_idle() {
        let mut world = floor_world();
        let mut player = settled_player(&mut world);
        world.body_mut(1).unwrap().velocity.x = 200.0;
        for _ in 0..120 {
            step(&mut world, &mut player, ActorInput::default());
        }
        assert!(world.body(1).unwrap().velocity.x.abs() < 1.0);
        assert_eq!(player.state(), PlayerState::Idle);
    }

    #[test]
    fn test_released_jump_is_cut_short() {
        let press = ActorInput {
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        };
        let hold = ActorInput {
            jump_held: true,
            ..Default::default()
        };

        let apex = |held: bool| {
            let mut world = floor_world();
            let mut player = settled_player(&mut world);
            step(&mut world, &mut player, press);
            let mut min_y = f32::MAX;
            for _ in 0..60 {
                step(&mut world, &mut player, if held { hold } else { ActorInput::default() });
                min_y = min_y.min(world.body(1).unwrap().position.y);
            }
            min_y
        };

        // Smaller y is higher
        assert!(apex(true) < apex(false));
    }

    #[test]
    fn test_damage_power_up_and_death() {
        let mut world = floor_world();
        let mut player = settled_player(&mut world);
        assert_eq!(player.lives(), 3);

        assert!(player.power_up());
        assert!(!player.power_up());
        assert_eq!(player.take_damage(), Some(PlayerEvent::Hurt));
        assert!(!player.is_powered_up());
        assert_eq!(player.lives(), 3);

        // Invulnerable: ignored
        assert_eq!(player.take_damage(), None);

        // Let the window run out; Hurt clears back to a movement state
        for _ in 0..150 {
            step(&mut world, &mut player, ActorInput::default());
        }
        assert!(!player.is_invulnerable());
        assert_eq!(player.state(), PlayerState::Idle);

        assert_eq!(player.take_damage(), Some(PlayerEvent::Hurt));
        assert_eq!(player.lives(), 2);
        for _ in 0..150 {
            step(&mut world, &mut player, ActorInput::default());
        }
        assert_eq!(player.take_damage(), Some(PlayerEvent::Hurt));
        for _ in 0..150 {
            step(&mut world, &mut player, ActorInput::default());
        }
        assert_eq!(player.take_damage(), Some(PlayerEvent::Died));
        assert!(player.is_dead());
        assert_eq!(player.take_damage(), None);

        // Dead players ignore input
        let events = step(
            &mut world,
            &mut player,
            ActorInput {
                jump_pressed: true,
                jump_held: true,
                ..Default::default()
            },
        );
        assert!(events.is_empty());

        player.add_score(500);
        player.reset(&mut world);
        assert_eq!(player.lives(), 3);
        assert_eq!(player.score(), 0);
        assert_eq!(player.state(), PlayerState::Idle);
    }

    #[test]
    fn test_score_and_coins_saturate() {
        let mut world = floor_world();
        let mut player = settled_player(&mut world);
        player.add_coins(3);
        player.add_coins(2);
        player.add_score(100);
        assert_eq!(player.coins(), 5);
        assert_eq!(player.score(), 100);

        player.add_coins(u32::MAX);
        player.add_score(u32::MAX);
        assert_eq!(player.coins(), u32::MAX);
        assert_eq!(player.score(), u32::MAX);

        player.reset(&mut world);
        assert_eq!(player.coins(), 0);
    }

    #[test]
    fn test_respawn_moves_body_at_rest() {
        let mut world = floor_world();
        let mut player = settled_player(&mut world);
        world.body_mut(1).unwrap().velocity = Vec2::new(100.0, -50.0);

        player.respawn(&mut world, Vec2::new(300.0, 100.0));
        let body = world.body(1).unwrap();
        assert_eq!(body.position, Vec2::new(300.0, 100.0));
        assert_eq!(body.bounds.position(), body.position);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert!(player.is_invulnerable());
    }

    #[test]
    fn test_patroller_turns_at_wall() {
        let mut data = LevelData::empty(20, 10);
        for x in 0..20 {
            data.fill_solid(x, 9, 1);
        }
        for y in 0..9 {
            data.fill_solid(2, y, 2);
        }
        let mut world = PhysicsWorld::default();
        world.set_level(Level::new(data));
        let mut enemy =
            Patroller::spawn(&mut world, 10, Vec2::new(160.0, 256.0), EnemyTuning::default()).unwrap();
        assert_eq!(enemy.direction(), -1.0);

        // 96 px to the wall at 50 px/s
        for _ in 0..180 {
            enemy.update(&mut world, SIM_DT);
            world.update(SIM_DT);
            assert!(world.body(10).unwrap().position.x >= 96.0);
        }
        assert_eq!(enemy.direction(), 1.0);
        assert!(world.body(10).unwrap().velocity.x > 0.0);
    }

    #[test]
    fn test_patrollers_bounce_off_each_other() {
        let mut world = floor_world();
        world.set_gravity(Vec2::ZERO);
        let tuning = EnemyTuning::default();
        let mut a = Patroller::spawn(&mut world, 10, Vec2::new(100.0, 256.0), tuning).unwrap();
        let mut b = Patroller::spawn(&mut world, 11, Vec2::new(60.0, 256.0), tuning).unwrap();
        // b walks right toward a
        b.direction = 1.0;

        for _ in 0..60 {
            a.update(&mut world, SIM_DT);
            b.update(&mut world, SIM_DT);
            world.update(SIM_DT);
        }
        assert_eq!(b.direction(), -1.0);
    }

    #[test]
    fn test_stomp_stun_and_kill() {
        let mut world = floor_world();
        let mut enemy =
            Patroller::spawn(&mut world, 10, Vec2::new(160.0, 256.0), EnemyTuning::default()).unwrap();
        let player =
            Player::spawn(&mut world, 1, Vec2::new(164.0, 200.0), PlayerTuning::default()).unwrap();
        world.body_mut(1).unwrap().velocity.y = 300.0;

        let mut stomped = false;
        for _ in 0..30 {
            enemy.update(&mut world, SIM_DT);
            world.update(SIM_DT);
            if enemy.stomped_by(&world, player.id()) {
                stomped = true;
                break;
            }
        }
        assert!(stomped);
        assert!(!enemy.touches(&world, player.id()));

        enemy.stun(&mut world);
        assert_eq!(enemy.state(), EnemyState::Stunned);
        enemy.update(&mut world, SIM_DT);
        assert_eq!(world.body(10).unwrap().velocity.x, 0.0);

        enemy.kill(&mut world);
        assert_eq!(enemy.state(), EnemyState::Dead);
        assert!(!world.contains(10));
        assert_eq!(world.collisions_for(10).count(), 0);
        // Inert once dead
        enemy.update(&mut world, SIM_DT);
        assert!(!enemy.stomped_by(&world, player.id()));
    }

    #[test]
    fn test_patroller_keeps_walking_under_rider() {
        let mut world = floor_world();
        let mut enemy =
            Patroller::spawn(&mut world, 10, Vec2::new(160.0, 256.0), EnemyTuning::default()).unwrap();
        Player::spawn(&mut world, 1, Vec2::new(164.0, 200.0), PlayerTuning::default()).unwrap();
        world.body_mut(1).unwrap().velocity.y = 300.0;

        let mut previous_x = 160.0;
        for _ in 0..20 {
            enemy.update(&mut world, SIM_DT);
            world.update(SIM_DT);
            let body = world.body(10).unwrap();
            assert!(body.position.x <= previous_x, "enemy moved back to {}", body.position.x);
            previous_x = body.position.x;
        }

        assert_eq!(enemy.direction(), -1.0);
        assert!(world.body(10).unwrap().velocity.x < 0.0);
        assert!(previous_x < 150.0);
    }

    #[test]
    fn test_stun_wears_off() {
        let mut world = floor_world();
        let mut enemy =
            Patroller::spawn(&mut world, 10, Vec2::new(160.0, 256.0), EnemyTuning::default()).unwrap();
        enemy.stun(&mut world);
        for _ in 0..100 {
            enemy.update(&mut world, SIM_DT);
            world.update(SIM_DT);
        }
        assert_eq!(enemy.state(), EnemyState::Patrol);
        assert!(world.body(10).unwrap().velocity.x != 0.0);
    }
}
