//! Combat resolution: sword strikes, shuriken throws and flight, and enemy
//! contact damage.
//!
//! Removal during a scan keeps the remaining entities in their original
//! order, so "first match" always means earliest spawned / earliest thrown.

use glam::Vec2;

use super::state::{DefeatCause, GameEvent, GamePhase, GameState, Projectile};
use crate::consts::*;
use crate::{circles_overlap, direction_or};

/// Strike every enemy within sword range. Returns how many were defeated.
pub fn swing_sword(state: &mut GameState) -> usize {
    if !state.is_running() {
        return 0;
    }
    state.swing_timer_ms = SWORD_SWING_MS;
    state.events.push(GameEvent::SwordSwung);

    let center = state.player.pos;
    let mut defeated = Vec::new();
    state.enemies.retain(|enemy| {
        let hit = enemy.pos.distance(center) <= SWORD_RANGE;
        if hit {
            defeated.push(enemy.id);
        }
        !hit
    });

    for &id in &defeated {
        state.record_defeat(id, DefeatCause::Sword);
    }
    defeated.len()
}

/// Turn the player toward a world point (pointer aim)
pub fn aim_at(state: &mut GameState, target: Vec2) {
    let offset = target - state.player.pos;
    state.player.face(offset);
}

/// Throw one shuriken along the player's facing. Returns false when the
/// throw was ignored (not running or out of charges).
pub fn throw_shuriken(state: &mut GameState) -> bool {
    if !state.is_running() || state.shuriken == 0 {
        return false;
    }

    let facing = direction_or(state.player.facing, Vec2::X);
    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos: state.player.pos + facing * (state.player.radius + SHURIKEN_SPAWN_GAP),
        vel: facing * SHURIKEN_SPEED,
        radius: SHURIKEN_RADIUS,
        life_ms: SHURIKEN_LIFETIME_MS,
    });
    state.shuriken -= 1;
    state.events.push(GameEvent::ShurikenThrown { id });
    true
}

/// Advance shuriken, expire them, and resolve hits (one enemy per shuriken)
pub fn update_projectiles(state: &mut GameState, dt_ms: f32) {
    let dt = dt_ms / 1000.0;
    let world = state.world;

    let mut i = 0;
    while i < state.projectiles.len() {
        let projectile = &mut state.projectiles[i];
        projectile.pos += projectile.vel * dt;
        projectile.life_ms -= dt_ms;

        if projectile.life_ms <= 0.0 || world.is_outside(projectile.pos, SHURIKEN_BOUNDS_MARGIN) {
            state.projectiles.remove(i);
            continue;
        }

        let (pos, radius) = (projectile.pos, projectile.radius);
        let hit = state
            .enemies
            .iter()
            .position(|enemy| circles_overlap(pos, radius, enemy.pos, enemy.radius));

        if let Some(enemy_idx) = hit {
            let enemy = state.enemies.remove(enemy_idx);
            state.projectiles.remove(i);
            state.record_defeat(enemy.id, DefeatCause::Shuriken);
            continue;
        }

        i += 1;
    }
}

/// Move enemies toward the player and apply contact damage.
///
/// Stops processing the moment hearts run out; later enemies in the list
/// neither move nor tick their cooldowns that frame.
pub fn update_enemies(state: &mut GameState, dt_ms: f32) {
    let dt = dt_ms / 1000.0;
    let target = state.player.pos;
    let player_radius = state.player.radius;

    for enemy in state.enemies.iter_mut() {
        let to_player = target - enemy.pos;
        let dist = to_player.length();
        if dist > MIN_STEER_DISTANCE {
            enemy.pos += to_player / dist * enemy.speed * dt;
        }

        enemy.touch_cooldown_ms = (enemy.touch_cooldown_ms - dt_ms).max(0.0);

        // Contact uses the pre-move distance
        let touching = dist <= player_radius + enemy.radius;
        if !touching || enemy.touch_cooldown_ms > 0.0 || state.player.invuln_ms > 0.0 {
            continue;
        }

        enemy.touch_cooldown_ms = ENEMY_TOUCH_COOLDOWN_MS;
        state.player.invuln_ms = PLAYER_INVULN_MS;
        state.heart_tenths = state.heart_tenths.saturating_sub(ENEMY_HEART_DAMAGE_TENTHS);
        state.events.push(GameEvent::PlayerHit {
            by: enemy.id,
            heart_tenths: state.heart_tenths,
        });
        log::debug!("Player hit by enemy {}, hearts {}", enemy.id, state.heart_tenths);

        if state.heart_tenths == 0 {
            state.phase = GamePhase::Defeat;
            state.events.push(GameEvent::Defeat);
            log::info!("Defeated on wave {}", state.wave);
            return;
        }
    }
}
