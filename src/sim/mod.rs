//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Time only enters as a millisecond delta
//! - Randomness only from the session's seeded RNG
//! - Stable iteration order (spawn/throw order)

pub mod combat;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod wave;

pub use combat::{aim_at, swing_sword, throw_shuriken, update_enemies, update_projectiles};
pub use spawner::{Edge, spawn_cooldown_ms, spawn_enemy, update_spawning};
pub use state::{
    DefeatCause, Enemy, GameEvent, GamePhase, GameState, Player, Projectile, World,
};
pub use tick::{Action, FrameClock, Intents, TickInput, apply_action, apply_movement, tick};
pub use wave::{WaveTransition, maybe_advance_wave, wave_cleared};
