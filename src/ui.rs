//! Read-only views of the session for the HUD, renderer and overlay

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{GamePhase, GameState};

/// HUD text and counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    /// "X.X / MAX"
    pub hearts: String,
    /// "N / TOTAL"
    pub wave: String,
    pub enemies_left: u32,
    pub shuriken: u32,
}

impl HudSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            hearts: format!("{:.1} / {}", state.hearts(), STARTING_HEARTS),
            wave: format!("{} / {}", state.wave, TOTAL_WAVES),
            enemies_left: state.enemies_left(),
            shuriken: state.shuriken,
        }
    }
}

/// Player as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub facing: Vec2,
    /// Invulnerability blink phase
    pub flashing: bool,
    /// Sword arc visible this frame
    pub swinging: bool,
}

/// A circle to draw (enemy or shuriken)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleView {
    pub pos: Vec2,
    pub radius: f32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub world_size: Vec2,
    pub player: PlayerView,
    pub enemies: Vec<CircleView>,
    pub projectiles: Vec<CircleView>,
    /// Wave number for the banner, only while running
    pub wave_banner: Option<u32>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            world_size: Vec2::new(state.world.width, state.world.height),
            player: PlayerView {
                pos: player.pos,
                radius: player.radius,
                facing: player.facing,
                flashing: player.is_flashing(),
                swinging: state.swing_timer_ms > 0.0,
            },
            enemies: state
                .enemies
                .iter()
                .map(|e| CircleView {
                    pos: e.pos,
                    radius: e.radius,
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| CircleView {
                    pos: p.pos,
                    radius: p.radius,
                })
                .collect(),
            wave_banner: state.is_running().then_some(state.wave),
        }
    }
}

/// Modal card shown before the first run and after a terminal outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlay {
    pub title: String,
    pub message: String,
    pub restart_label: String,
}

impl Overlay {
    /// Card for a terminal phase; `None` while running
    pub fn for_phase(phase: GamePhase) -> Option<Self> {
        match phase {
            GamePhase::Running => None,
            GamePhase::Defeat => Some(Self {
                title: "Defeated".into(),
                message: format!(
                    "Your home has fallen. Try again and defend all {TOTAL_WAVES} waves."
                ),
                restart_label: "Restart".into(),
            }),
            GamePhase::Victory => Some(Self {
                title: "Victory".into(),
                message: format!("You defended your home through all {TOTAL_WAVES} waves."),
                restart_label: "Play Again".into(),
            }),
        }
    }

    /// Card shown before the first session
    pub fn title_card() -> Self {
        Self {
            title: "Shuriken Defense".into(),
            message: "Move with WASD or arrows. Space swings the sword, F or click throws a shuriken."
                .into(),
            restart_label: "Start".into(),
        }
    }
}
