//! Shuriken Defense - A top-down wave survival arcade game
//!
//! Core modules:
//! - `sim`: Simulation (movement, combat, spawning, wave progression)
//! - `platform`: Input/frame ports and the frame-driven game loop
//! - `ui`: Read-only snapshots for HUD, renderer and overlay
//! - `settings`: Session configuration

pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default world dimensions
    pub const WORLD_WIDTH: f32 = 960.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Largest frame delta fed to the simulation (25 fps floor)
    pub const MAX_FRAME_MS: f32 = 40.0;

    /// Session rules
    pub const TOTAL_WAVES: u32 = 5;
    pub const ENEMIES_PER_WAVE: u32 = 30;
    pub const SHURIKEN_PER_WAVE: u32 = 30;
    pub const STARTING_HEARTS: u32 = 3;
    /// Hearts are tracked in tenths so the 0.1 damage step stays exact
    pub const HEART_TENTHS: u32 = 10;
    pub const STARTING_HEART_TENTHS: u32 = STARTING_HEARTS * HEART_TENTHS;
    /// One contact costs 0.1 hearts
    pub const ENEMY_HEART_DAMAGE_TENTHS: u32 = 1;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 16.0;
    /// Smallest world side that still fits the player
    pub const MIN_WORLD_SIZE: f32 = 2.0 * PLAYER_RADIUS;
    pub const PLAYER_SPEED: f32 = 235.0;
    pub const PLAYER_INVULN_MS: f32 = 280.0;
    /// Flash toggles every this many ms of remaining invulnerability
    pub const INVULN_FLASH_PERIOD_MS: f32 = 35.0;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 14.0;
    pub const ENEMY_BASE_SPEED: f32 = 62.0;
    pub const ENEMY_SPEED_PER_WAVE: f32 = 9.0;
    pub const ENEMY_SPEED_JITTER: f32 = 8.0;
    pub const ENEMY_TOUCH_COOLDOWN_MS: f32 = 300.0;
    /// Enemies closer than this to the player do not steer
    pub const MIN_STEER_DISTANCE: f32 = 1.0;

    /// Spawning
    pub const SPAWN_EDGE_OFFSET: f32 = 16.0;
    pub const SPAWN_COOLDOWN_BASE_MS: f32 = 760.0;
    pub const SPAWN_COOLDOWN_PER_WAVE_MS: f32 = 80.0;
    pub const SPAWN_COOLDOWN_MIN_MS: f32 = 300.0;
    /// Delay before the first spawn of waves 2+
    pub const WAVE_START_DELAY_MS: f32 = 400.0;

    /// Sword
    pub const SWORD_RANGE: f32 = 56.0;
    pub const SWORD_SWING_MS: f32 = 180.0;
    /// Radius of the swing arc drawn around the player
    pub const SWORD_ARC_RADIUS: f32 = 42.0;

    /// Shuriken
    pub const SHURIKEN_SPEED: f32 = 520.0;
    pub const SHURIKEN_RADIUS: f32 = 6.0;
    pub const SHURIKEN_LIFETIME_MS: f32 = 900.0;
    /// Gap between the player's edge and a freshly thrown shuriken
    pub const SHURIKEN_SPAWN_GAP: f32 = 8.0;
    /// Shuriken are dropped once this far outside the world
    pub const SHURIKEN_BOUNDS_MARGIN: f32 = 20.0;
}

/// Unit vector along `v`, or `fallback` when `v` has no usable direction
#[inline]
pub fn direction_or(v: Vec2, fallback: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(fallback)
}

/// Strict circle-circle overlap (touching edges do not count)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Clamp a point into the rectangle `[min, max]`.
///
/// Applies `max` then `min` per axis so an inverted rectangle never panics.
#[inline]
pub fn clamp_to_rect(pos: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    pos.max(min).min(max)
}
