//! Demo-mode player
//!
//! Holds the middle of the field, swings at anything in reach and throws at
//! the nearest approaching enemy.

use glam::Vec2;

use super::InputSource;
use crate::consts::*;
use crate::sim::{Action, GameState, Intents, TickInput};

/// Only throw at enemies closer than this
const THROW_RANGE: f32 = 260.0;
/// Frames between throws
const THROW_INTERVAL_FRAMES: u32 = 6;
/// Drift back toward the center when farther than this
const HOME_SLACK: f32 = 24.0;

/// AI input source
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    frames_since_throw: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    fn steer_home(state: &GameState) -> Intents {
        let offset = state.world.center() - state.player.pos;
        Intents {
            up: offset.y < -HOME_SLACK,
            down: offset.y > HOME_SLACK,
            left: offset.x < -HOME_SLACK,
            right: offset.x > HOME_SLACK,
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        let player = state.player.pos;
        let nearest = state.enemies.iter().min_by(|a, b| {
            a.pos
                .distance_squared(player)
                .partial_cmp(&b.pos.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        self.frames_since_throw = self.frames_since_throw.saturating_add(1);
        let mut actions = Vec::new();

        if let Some(enemy) = nearest {
            let dist = enemy.pos.distance(player);
            // Swing a little before the enemy reaches the edge of sword range
            if dist <= SWORD_RANGE - 2.0 {
                actions.push(Action::Strike);
            } else if dist <= THROW_RANGE
                && state.shuriken > 0
                && self.frames_since_throw >= THROW_INTERVAL_FRAMES
            {
                actions.push(Action::Throw {
                    aim: Some(enemy.pos),
                });
                self.frames_since_throw = 0;
            }
        }

        TickInput {
            intents: Self::steer_home(state),
            actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strikes_close_enemy() {
        let mut state = GameState::new(1);
        state.push_enemy(state.player.pos + Vec2::new(30.0, 0.0));
        let input = Autopilot::new().poll(&state);
        assert_eq!(input.actions, vec![Action::Strike]);
    }

    #[test]
    fn test_throws_at_nearest_in_range() {
        let mut state = GameState::new(1);
        let target = state.player.pos + Vec2::new(0.0, 150.0);
        state.push_enemy(state.player.pos + Vec2::new(250.0, 0.0));
        state.push_enemy(target);

        let mut pilot = Autopilot::new();
        pilot.frames_since_throw = THROW_INTERVAL_FRAMES;
        let input = pilot.poll(&state);
        assert_eq!(input.actions, vec![Action::Throw { aim: Some(target) }]);

        // Rate limited on the next frame
        assert!(pilot.poll(&state).actions.is_empty());
    }

    #[test]
    fn test_steers_home() {
        let mut state = GameState::new(1);
        state.player.pos = Vec2::new(100.0, 100.0);
        let input = Autopilot::new().poll(&state);
        assert!(input.intents.right && input.intents.down);
        assert!(!input.intents.left && !input.intents.up);
    }
}
