//! Variable timestep simulation tick
//!
//! Core game loop step: queued actions, movement, timers, spawning,
//! projectiles, enemies, then the wave check, always in that order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::combat::{aim_at, swing_sword, throw_shuriken, update_enemies, update_projectiles};
use super::spawner::update_spawning;
use super::state::GameState;
use super::wave::maybe_advance_wave;
use crate::consts::MAX_FRAME_MS;

/// Level-triggered directional intents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intents {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Intents {
    /// Combined direction (unnormalized, y grows downward)
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Discrete action events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Sword strike around the player
    Strike,
    /// Throw a shuriken, optionally turning toward a world point first
    Throw { aim: Option<Vec2> },
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub intents: Intents,
    /// Actions in arrival order
    pub actions: Vec<Action>,
}

/// Turns host timestamps into clamped frame deltas
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameClock {
    last_timestamp_ms: Option<f64>,
}

impl FrameClock {
    /// Elapsed ms since the previous call, clamped to `[0, MAX_FRAME_MS]`.
    /// The first call after construction or reset yields 0.
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_timestamp_ms {
            Some(last) if (timestamp_ms - last).is_finite() => {
                (timestamp_ms - last).clamp(0.0, MAX_FRAME_MS as f64) as f32
            }
            _ => 0.0,
        };
        if timestamp_ms.is_finite() {
            self.last_timestamp_ms = Some(timestamp_ms);
        }
        dt
    }

    pub fn last_timestamp_ms(&self) -> Option<f64> {
        self.last_timestamp_ms
    }
}

/// Apply one queued action
pub fn apply_action(state: &mut GameState, action: Action) {
    match action {
        Action::Strike => {
            swing_sword(state);
        }
        Action::Throw { aim } => {
            if !state.is_running() {
                return;
            }
            if let Some(target) = aim {
                aim_at(state, target);
            }
            throw_shuriken(state);
        }
    }
}

/// Move the player from directional intents and keep it inside the world
pub fn apply_movement(state: &mut GameState, intents: &Intents, dt_ms: f32) {
    let Some(dir) = intents.direction().try_normalize() else {
        return;
    };
    let player = &mut state.player;
    player.facing = dir;
    player.pos += dir * player.speed * (dt_ms / 1000.0);
    player.pos = state.world.clamp_circle(player.pos, player.radius);
}

/// Advance the game state by `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if !state.is_running() {
        return;
    }

    for &action in &input.actions {
        apply_action(state, action);
    }

    apply_movement(state, &input.intents, dt_ms);

    state.player.invuln_ms = (state.player.invuln_ms - dt_ms).max(0.0);
    state.swing_timer_ms = (state.swing_timer_ms - dt_ms).max(0.0);

    update_spawning(state, dt_ms);
    update_projectiles(state, dt_ms);
    update_enemies(state, dt_ms);
    if !state.is_running() {
        return;
    }
    maybe_advance_wave(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::GamePhase;
    use proptest::prelude::*;

    fn moving(intents: Intents) -> TickInput {
        TickInput {
            intents,
            ..Default::default()
        }
    }

    #[test]
    fn test_clock_first_frame_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(1234.0), 0.0);
        assert_eq!(clock.advance(1250.0), 16.0);
    }

    #[test]
    fn test_clock_clamps_stalls_and_rewinds() {
        let mut clock = FrameClock::default();
        clock.advance(0.0);
        assert_eq!(clock.advance(5000.0), MAX_FRAME_MS);
        assert_eq!(clock.advance(4000.0), 0.0);
        assert_eq!(clock.last_timestamp_ms(), Some(4000.0));
    }

    #[test]
    fn test_clock_recovers_after_non_finite_timestamp() {
        let mut clock = FrameClock::default();
        clock.advance(0.0);
        assert_eq!(clock.advance(f64::NAN), 0.0);
        assert_eq!(clock.advance(f64::INFINITY), 0.0);
        assert_eq!(clock.last_timestamp_ms(), Some(0.0));
        assert_eq!(clock.advance(16.0), 16.0);
    }

    #[test]
    fn test_intents_direction() {
        let intents = Intents {
            up: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(intents.direction(), Vec2::new(1.0, -1.0));

        let cancel = Intents {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(cancel.direction(), Vec2::ZERO);
    }

    #[test]
    fn test_diagonal_movement_is_normalized() {
        let mut state = GameState::new(1);
        let start = state.player.pos;
        let input = moving(Intents {
            down: true,
            right: true,
            ..Default::default()
        });
        tick(&mut state, &input, 40.0);

        let moved = state.player.pos - start;
        assert!((moved.length() - PLAYER_SPEED * 0.04).abs() < 1e-3);
        assert!((state.player.facing.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_idle_keeps_facing() {
        let mut state = GameState::new(1);
        let up = moving(Intents {
            up: true,
            ..Default::default()
        });
        tick(&mut state, &up, 16.0);
        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.player.facing, Vec2::NEG_Y);
    }

    #[test]
    fn test_movement_clamped_to_world() {
        let mut state = GameState::new(1);
        let left = moving(Intents {
            left: true,
            ..Default::default()
        });
        for _ in 0..200 {
            tick(&mut state, &left, 40.0);
            if !state.is_running() {
                break;
            }
        }
        assert_eq!(state.player.pos.x, PLAYER_RADIUS);
    }

    #[test]
    fn test_actions_apply_before_update() {
        let mut state = GameState::new(1);
        let input = TickInput {
            actions: vec![Action::Throw {
                aim: Some(state.player.pos + Vec2::new(0.0, 100.0)),
            }],
            ..Default::default()
        };
        tick(&mut state, &input, 10.0);

        assert_eq!(state.shuriken, SHURIKEN_PER_WAVE - 1);
        assert_eq!(state.player.facing, Vec2::Y);
        let p = &state.projectiles[0];
        // Spawned at radius + 8 and already flown for this frame
        let expected = state.player.pos.y + 24.0 + SHURIKEN_SPEED * 0.01;
        assert!((p.pos.y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_timers_floor_at_zero() {
        let mut state = GameState::new(1);
        state.player.invuln_ms = 10.0;
        let input = TickInput {
            actions: vec![Action::Strike],
            ..Default::default()
        };
        tick(&mut state, &input, 40.0);
        assert_eq!(state.player.invuln_ms, 0.0);
        assert_eq!(state.swing_timer_ms, SWORD_SWING_MS - 40.0);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), 40.0);
        }
        assert_eq!(state.swing_timer_ms, 0.0);
    }

    #[test]
    fn test_wave_advances_only_when_field_empty() {
        let mut state = GameState::new(2);
        state.enemies_to_spawn = 0;
        state.defeated_this_wave = ENEMIES_PER_WAVE;
        state.push_enemy(Vec2::new(-500.0, -500.0));

        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.wave, 1);

        state.enemies.clear();
        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.wave, 2);
    }

    #[test]
    fn test_victory_halts_updates() {
        let mut state = GameState::new(2);
        state.wave = TOTAL_WAVES;
        state.enemies_to_spawn = 0;
        state.defeated_this_wave = ENEMIES_PER_WAVE;
        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.phase, GamePhase::Victory);

        let before = serde_json::to_string(&state).unwrap();
        let input = TickInput {
            intents: Intents {
                left: true,
                ..Default::default()
            },
            actions: vec![Action::Strike, Action::Throw { aim: None }],
        };
        for _ in 0..5 {
            tick(&mut state, &input, 40.0);
        }
        assert_eq!(serde_json::to_string(&state).unwrap(), before);
    }

    #[test]
    fn test_defeat_skips_wave_check() {
        let mut state = GameState::new(2);
        state.heart_tenths = 1;
        state.enemies_to_spawn = 0;
        state.defeated_this_wave = ENEMIES_PER_WAVE - 1;
        state.push_enemy(state.player.pos + Vec2::new(10.0, 0.0));

        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.phase, GamePhase::Defeat);
        assert_eq!(state.heart_tenths, 0);

        tick(&mut state, &TickInput::default(), 16.0);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            moving(Intents {
                up: true,
                ..Default::default()
            }),
            TickInput {
                actions: vec![Action::Throw { aim: None }],
                ..Default::default()
            },
            TickInput {
                actions: vec![Action::Strike],
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..300 {
            for input in &inputs {
                tick(&mut state1, input, 16.0);
                tick(&mut state2, input, 16.0);
            }
        }

        assert_eq!(
            serde_json::to_string(&state1).unwrap(),
            serde_json::to_string(&state2).unwrap()
        );
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<[bool; 4]>(), 0u8..4, -100.0f32..1100.0, -100.0f32..700.0).prop_map(
            |(dirs, act, ax, ay)| {
                let actions = match act {
                    0 => vec![],
                    1 => vec![Action::Strike],
                    2 => vec![Action::Throw { aim: None }],
                    _ => vec![Action::Throw {
                        aim: Some(Vec2::new(ax, ay)),
                    }],
                };
                TickInput {
                    intents: Intents {
                        up: dirs[0],
                        down: dirs[1],
                        left: dirs[2],
                        right: dirs[3],
                    },
                    actions,
                }
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_invariants_hold_every_frame(
            seed in any::<u64>(),
            frames in prop::collection::vec((arb_input(), 0.0f32..40.0), 1..400),
        ) {
            let mut state = GameState::new(seed);
            for (input, dt) in &frames {
                tick(&mut state, input, *dt);

                prop_assert!(state.heart_tenths <= STARTING_HEART_TENTHS);
                prop_assert!(state.hearts() >= 0.0);
                prop_assert!(state.shuriken <= SHURIKEN_PER_WAVE);
                prop_assert!(state.defeated_this_wave <= ENEMIES_PER_WAVE);
                prop_assert!(state.wave >= 1 && state.wave <= TOTAL_WAVES);

                let p = &state.player;
                prop_assert!(p.pos.x >= p.radius && p.pos.x <= state.world.width - p.radius);
                prop_assert!(p.pos.y >= p.radius && p.pos.y <= state.world.height - p.radius);
                prop_assert!((p.facing.length() - 1.0).abs() < 1e-4);
                prop_assert!(p.invuln_ms >= 0.0);
                prop_assert!(state.swing_timer_ms >= 0.0);
                prop_assert!(state.enemies.iter().all(|e| e.touch_cooldown_ms >= 0.0));

                if state.phase == GamePhase::Defeat {
                    prop_assert_eq!(state.heart_tenths, 0);
                }
            }
        }
    }
}
