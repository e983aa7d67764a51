//! Game state and core simulation types
//!
//! `GameState` is the single owned aggregate the loop mutates. Entities are
//! plain records; the rules that move and destroy them live in the sibling
//! modules.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawner::spawn_cooldown_ms;
use super::tick::FrameClock;
use crate::clamp_to_rect;
use crate::consts::*;

/// Session outcome. Defeat and Victory are terminal until reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Hearts ran out
    Defeat,
    /// Final wave cleared
    Victory,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Running)
    }
}

/// What removed an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefeatCause {
    Sword,
    Shuriken,
}

/// State changes the HUD and overlay care about, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32 },
    EnemyDefeated { id: u32, cause: DefeatCause },
    SwordSwung,
    ShurikenThrown { id: u32 },
    PlayerHit { by: u32, heart_tenths: u32 },
    WaveStarted { wave: u32 },
    Defeat,
    Victory,
    Reset,
}

/// Rectangular play field, fixed for a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

impl World {
    /// Sides below `MIN_WORLD_SIZE` are raised to it so the player always fits
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(MIN_WORLD_SIZE),
            height: height.max(MIN_WORLD_SIZE),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a circle's center so the whole circle stays inside the world
    pub fn clamp_circle(&self, pos: Vec2, radius: f32) -> Vec2 {
        clamp_to_rect(
            pos,
            Vec2::splat(radius),
            Vec2::new(self.width - radius, self.height - radius),
        )
    }

    /// True if `pos` lies more than `margin` outside the world on any side
    pub fn is_outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || pos.y < -margin
            || pos.x > self.width + margin
            || pos.y > self.height + margin
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Movement speed (units/second)
    pub speed: f32,
    /// Unit facing vector, never zero
    pub facing: Vec2,
    /// Remaining invulnerability (ms)
    pub invuln_ms: f32,
}

impl Player {
    /// Player standing at the world center, facing right
    pub fn new(world: &World) -> Self {
        Self {
            pos: world.center(),
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            facing: Vec2::X,
            invuln_ms: 0.0,
        }
    }

    /// Point the player along `dir`; degenerate directions keep the old facing
    pub fn face(&mut self, dir: Vec2) {
        if let Some(dir) = dir.try_normalize() {
            self.facing = dir;
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_ms > 0.0
    }

    /// Blink phase while invulnerable
    pub fn is_flashing(&self) -> bool {
        self.is_invulnerable() && ((self.invuln_ms / INVULN_FLASH_PERIOD_MS).floor() as u32) % 2 == 0
    }
}

/// A homing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Units/second
    pub speed: f32,
    /// Time before this enemy can hurt the player again (ms)
    pub touch_cooldown_ms: f32,
}

/// A thrown shuriken
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Units/second
    pub vel: Vec2,
    pub radius: f32,
    pub life_ms: f32,
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Play field bounds
    pub world: World,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn RNG, seeded from `seed` and kept running across resets
    #[serde(skip)]
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Current wave (1-based)
    pub wave: u32,
    /// Hearts remaining, in tenths
    pub heart_tenths: u32,
    /// Shuriken charges left this wave
    pub shuriken: u32,
    /// Enemies this wave that have not spawned yet
    pub enemies_to_spawn: u32,
    /// Enemies defeated this wave, by any cause
    pub defeated_this_wave: u32,
    /// Countdown to the next spawn (ms)
    pub spawn_timer_ms: f32,
    /// Spawn interval for the current wave (ms)
    pub spawn_cooldown_ms: f32,
    /// Cosmetic sword swing timer (ms)
    pub swing_timer_ms: f32,
    /// Timestamp bookkeeping for frame deltas
    pub clock: FrameClock,
    pub player: Player,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Live projectiles in throw order
    pub projectiles: Vec<Projectile>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a running session on the default world
    pub fn new(seed: u64) -> Self {
        Self::with_world(World::default(), seed)
    }

    /// Create a running session on a custom world
    pub fn with_world(world: World, seed: u64) -> Self {
        Self {
            world,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            wave: 1,
            heart_tenths: STARTING_HEART_TENTHS,
            shuriken: SHURIKEN_PER_WAVE,
            enemies_to_spawn: ENEMIES_PER_WAVE,
            defeated_this_wave: 0,
            spawn_timer_ms: 0.0,
            spawn_cooldown_ms: spawn_cooldown_ms(1),
            swing_timer_ms: 0.0,
            clock: FrameClock::default(),
            player: Player::new(&world),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Return every session field to its wave-1 default and resume running.
    ///
    /// The RNG keeps its stream so consecutive runs differ.
    pub fn reset_game(&mut self) {
        self.phase = GamePhase::Running;
        self.wave = 1;
        self.heart_tenths = STARTING_HEART_TENTHS;
        self.shuriken = SHURIKEN_PER_WAVE;
        self.enemies_to_spawn = ENEMIES_PER_WAVE;
        self.defeated_this_wave = 0;
        self.spawn_timer_ms = 0.0;
        self.spawn_cooldown_ms = spawn_cooldown_ms(1);
        self.swing_timer_ms = 0.0;
        self.clock = FrameClock::default();
        self.player = Player::new(&self.world);
        self.enemies.clear();
        self.projectiles.clear();
        self.events.clear();
        self.events.push(GameEvent::Reset);
        log::info!("Session reset (seed {})", self.seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Hearts as displayed (0.0..=STARTING_HEARTS)
    pub fn hearts(&self) -> f32 {
        self.heart_tenths as f32 / HEART_TENTHS as f32
    }

    /// Enemies already spawned this wave
    pub fn enemies_spawned(&self) -> u32 {
        ENEMIES_PER_WAVE.saturating_sub(self.enemies_to_spawn)
    }

    /// Enemies still standing between the player and the next wave
    pub fn enemies_left(&self) -> u32 {
        ENEMIES_PER_WAVE.saturating_sub(self.defeated_this_wave)
    }

    /// Count a kill toward the wave quota
    pub(crate) fn record_defeat(&mut self, id: u32, cause: DefeatCause) {
        self.defeated_this_wave = (self.defeated_this_wave + 1).min(ENEMIES_PER_WAVE);
        self.events.push(GameEvent::EnemyDefeated { id, cause });
        log::debug!(
            "Enemy {} defeated by {:?} ({}/{})",
            id,
            cause,
            self.defeated_this_wave,
            ENEMIES_PER_WAVE
        );
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Test helper: place an enemy directly
    #[cfg(test)]
    pub(crate) fn push_enemy(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            pos,
            radius: ENEMY_RADIUS,
            speed: ENEMY_BASE_SPEED,
            touch_cooldown_ms: 0.0,
        });
        id
    }
}
