//! Timed enemy spawning at the world edges

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameEvent, GameState, World};
use crate::consts::*;

/// World edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Uniformly random edge
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Spawn interval for a wave: 760 ms, 80 ms faster per wave, never below 300 ms
pub fn spawn_cooldown_ms(wave: u32) -> f32 {
    (SPAWN_COOLDOWN_BASE_MS - wave as f32 * SPAWN_COOLDOWN_PER_WAVE_MS).max(SPAWN_COOLDOWN_MIN_MS)
}

/// Enemy speed for a wave given a jitter sample in `[0, 1)`
pub fn enemy_speed(wave: u32, jitter: f32) -> f32 {
    ENEMY_BASE_SPEED + wave as f32 * ENEMY_SPEED_PER_WAVE + jitter * ENEMY_SPEED_JITTER
}

/// A point on `edge`, `SPAWN_EDGE_OFFSET` outside the world; `t` in `[0, 1)`
/// selects the position along the edge
pub fn edge_position(world: &World, edge: Edge, t: f32) -> Vec2 {
    match edge {
        Edge::Top => Vec2::new(t * world.width, -SPAWN_EDGE_OFFSET),
        Edge::Right => Vec2::new(world.width + SPAWN_EDGE_OFFSET, t * world.height),
        Edge::Bottom => Vec2::new(t * world.width, world.height + SPAWN_EDGE_OFFSET),
        Edge::Left => Vec2::new(-SPAWN_EDGE_OFFSET, t * world.height),
    }
}

/// Uniformly random spawn point just outside the world
pub fn spawn_position<R: Rng>(world: &World, rng: &mut R) -> Vec2 {
    let edge = Edge::random(rng);
    edge_position(world, edge, rng.random::<f32>())
}

/// Create one enemy at a random edge and return its id
pub fn spawn_enemy(state: &mut GameState) -> u32 {
    let pos = spawn_position(&state.world, &mut state.rng);
    let speed = enemy_speed(state.wave, state.rng.random::<f32>());
    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos,
        radius: ENEMY_RADIUS,
        speed,
        touch_cooldown_ms: 0.0,
    });
    state.events.push(GameEvent::EnemySpawned { id });
    log::debug!("Spawned enemy {} at ({:.0}, {:.0}) speed {:.1}", id, pos.x, pos.y, speed);
    id
}

/// Count down the spawn timer and release at most one enemy per call
pub fn update_spawning(state: &mut GameState, dt_ms: f32) {
    if state.enemies_to_spawn == 0 {
        return;
    }

    state.spawn_timer_ms -= dt_ms;
    if state.spawn_timer_ms <= 0.0 {
        spawn_enemy(state);
        state.enemies_to_spawn -= 1;
        state.spawn_timer_ms = state.spawn_cooldown_ms;
    }
}
