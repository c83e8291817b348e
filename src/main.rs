//! Tile Platformer entry point
//!
//! Headless demo run: builds the generated test level, spawns a player and two
//! enemies, and drives them with seeded random input through the fixed-step
//! clock. Usage: `tile-platformer [settings.json] [seed]`

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use tile_platformer::Settings;
use tile_platformer::consts::TILE_SIZE;
use tile_platformer::settings::EnemyTuning;
use tile_platformer::sim::{
    ActorInput, BodyId, FixedTimestep, Level, LevelData, Patroller, PhysicsWorld, Player,
    PlayerEvent,
};

const DEMO_SEED: u64 = 0x5EED;
const DEMO_SECONDS: f32 = 30.0;
const LEVEL_WIDTH: i32 = 50;
const LEVEL_HEIGHT: i32 = 15;
const PLAYER_ID: BodyId = 1;
const STOMP_SCORE: u32 = 100;

fn main() {
    env_logger::init();
    log::info!("Tile Platformer (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_text = args
        .next()
        .and_then(|path| match std::fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("Failed to read settings from {}: {}", path, e);
                None
            }
        });
    let settings = Settings::load(settings_text.as_deref());
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEMO_SEED);

    let level = Level::new(LevelData::test_level(LEVEL_WIDTH, LEVEL_HEIGHT));
    let spawn = level.player_spawn();
    let goal = level.goal_position();

    let mut world = PhysicsWorld::new(settings.physics);
    world.set_level(level);

    let Some(mut player) = Player::spawn(&mut world, PLAYER_ID, spawn, settings.player) else {
        log::error!("Could not spawn player");
        return;
    };

    let mut enemies: Vec<Patroller> = [
        (10, 14.0, settings.enemy),
        (11, 26.0, EnemyTuning::koopa()),
    ]
    .into_iter()
    .filter_map(|(id, tile_x, tuning)| {
        Patroller::spawn(&mut world, id, Vec2::new(tile_x * TILE_SIZE, spawn.y), tuning)
    })
    .collect();

    let mut rng = Pcg32::seed_from_u64(seed);
    let mut clock = FixedTimestep::default();
    let mut input = ActorInput::default();
    let mut hold_ticks = 0u32;
    let mut elapsed = 0.0;
    let mut ticks = 0u64;
    let mut jumps = 0u32;
    let mut last_state = player.state();
    let mut reached_goal = false;

    while elapsed < DEMO_SECONDS && !player.is_dead() {
        // Jittered frame times, like a real display loop
        let frame_dt: f32 = rng.random_range(0.008..0.045);
        elapsed += frame_dt;

        for _ in 0..clock.advance(frame_dt) {
            if hold_ticks == 0 {
                input = random_input(&mut rng);
                hold_ticks = rng.random_range(10..45);
            } else {
                input.jump_pressed = false;
                hold_ticks -= 1;
            }

            for event in tick(&mut world, &mut player, &mut enemies, &input, clock.step()) {
                log::debug!("tick {}: {:?}", ticks, event);
                if event == PlayerEvent::Jumped {
                    jumps += 1;
                }
            }
            ticks += 1;

            if player.state() != last_state {
                log::trace!("tick {}: {:?} -> {:?}", ticks, last_state, player.state());
                last_state = player.state();
            }

            if !reached_goal
                && player
                    .position(&world)
                    .is_some_and(|p| p.x >= goal.x)
            {
                reached_goal = true;
                log::info!("Goal column reached after {} ticks", ticks);
            }
        }
    }

    if let Some(position) = player.position(&world) {
        let below = world
            .raycast(position, position + Vec2::new(0.0, 10.0 * TILE_SIZE), Some(player.id()))
            .map(|hit| hit.point.y - position.y);
        log::info!(
            "Player at ({:.1}, {:.1}), ground below at {:?}",
            position.x,
            position.y,
            below
        );
    }
    log::info!(
        "Finished: {} ticks in {:.1}s, {} jumps, score {}, lives {}, {} enemies left",
        ticks,
        elapsed,
        jumps,
        player.score(),
        player.lives(),
        enemies.iter().filter(|e| world.contains(e.id())).count()
    );
}

/// One fixed step: controllers, physics, then contact gameplay
fn tick(
    world: &mut PhysicsWorld,
    player: &mut Player,
    enemies: &mut [Patroller],
    input: &ActorInput,
    dt: f32,
) -> Vec<PlayerEvent> {
    let mut events = player.update(world, input, dt);
    for enemy in enemies.iter_mut() {
        enemy.update(world, dt);
    }

    world.update(dt);

    for enemy in enemies.iter_mut() {
        if enemy.stomped_by(world, player.id()) {
            enemy.kill(world);
            player.bounce(world);
            player.add_score(STOMP_SCORE);
        } else if enemy.touches(world, player.id()) {
            events.extend(player.take_damage());
        }
    }

    events
}

/// Mostly run right, sometimes jump
fn random_input(rng: &mut Pcg32) -> ActorInput {
    let (left, right) = match rng.random_range(0..4) {
        0 => (true, false),
        1 | 2 => (false, true),
        _ => (false, false),
    };
    let jump = rng.random_bool(0.35);
    ActorInput {
        left,
        right,
        jump_pressed: jump,
        jump_held: jump,
    }
}
