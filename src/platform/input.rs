//! Host-side input plumbing
//!
//! Hosts translate raw key/pointer events into intents and actions here; the
//! loop drains them at the start of the next frame.

use glam::Vec2;

use super::InputSource;
use crate::sim::{Action, GameState, Intents, TickInput};

/// A movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Move(Direction),
    Strike,
    Throw,
}

/// Default keyboard layout (keys as reported by `KeyboardEvent.key`)
pub fn key_binding(key: &str) -> Option<Binding> {
    match key.to_lowercase().as_str() {
        "w" | "arrowup" => Some(Binding::Move(Direction::Up)),
        "s" | "arrowdown" => Some(Binding::Move(Direction::Down)),
        "a" | "arrowleft" => Some(Binding::Move(Direction::Left)),
        "d" | "arrowright" => Some(Binding::Move(Direction::Right)),
        " " | "spacebar" => Some(Binding::Strike),
        "f" => Some(Binding::Throw),
        _ => None,
    }
}

/// Held directions plus actions waiting for the next frame
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    intents: Intents,
    pending: Vec<Action>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press or release a direction
    pub fn set_direction(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Up => self.intents.up = held,
            Direction::Down => self.intents.down = held,
            Direction::Left => self.intents.left = held,
            Direction::Right => self.intents.right = held,
        }
    }

    pub fn push_action(&mut self, action: Action) {
        self.pending.push(action);
    }

    /// Queue a throw toward a world point
    pub fn throw_at(&mut self, target: Vec2) {
        self.push_action(Action::Throw { aim: Some(target) });
    }

    /// Route a key event. Returns true if the key is bound.
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> bool {
        match key_binding(key) {
            Some(Binding::Move(dir)) => {
                self.set_direction(dir, pressed);
                true
            }
            Some(Binding::Strike) => {
                if pressed {
                    self.push_action(Action::Strike);
                }
                true
            }
            Some(Binding::Throw) => {
                if pressed {
                    self.push_action(Action::Throw { aim: None });
                }
                true
            }
            None => false,
        }
    }

    /// Release everything (e.g. on reset or focus loss)
    pub fn clear(&mut self) {
        self.intents = Intents::default();
        self.pending.clear();
    }

    pub fn intents(&self) -> Intents {
        self.intents
    }
}

impl InputSource for InputQueue {
    fn poll(&mut self, _state: &GameState) -> TickInput {
        TickInput {
            intents: self.intents,
            actions: std::mem::take(&mut self.pending),
        }
    }
}
