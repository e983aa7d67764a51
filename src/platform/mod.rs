//! Platform abstraction layer
//!
//! Ports between the simulation and its host:
//! - `InputSource`: produces intents and actions once per frame
//! - `FrameSink`: consumes HUD, render and overlay snapshots
//!
//! `GameLoop` drives one frame per host tick through those ports.

pub mod autopilot;
pub mod input;

pub use autopilot::Autopilot;
pub use input::{Binding, Direction, InputQueue, key_binding};

use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::ui::{HudSnapshot, Overlay, RenderSnapshot};

/// Produces the input for the next frame
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> TickInput;
}

/// Receives read-only views of the session
pub trait FrameSink {
    /// Draw the latest state (called every frame, running or not)
    fn draw(&mut self, frame: &RenderSnapshot);
    /// Refresh HUD text after state-mutating events
    fn update_hud(&mut self, hud: &HudSnapshot);
    /// Show the end-of-run card
    fn show_overlay(&mut self, overlay: &Overlay);
}

/// Frame-driven session runner
#[derive(Debug, Clone)]
pub struct GameLoop {
    pub state: GameState,
    frames: u64,
}

impl GameLoop {
    pub fn new(state: GameState) -> Self {
        log::info!(
            "Starting session: world {}x{}, seed {}",
            state.world.width,
            state.world.height,
            state.seed
        );
        Self { state, frames: 0 }
    }

    pub fn from_settings(settings: &Settings, seed: u64) -> Self {
        Self::new(GameState::with_world(settings.world(), seed))
    }

    /// Frames processed since construction
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one host frame: advance the clock, poll input, tick, publish
    pub fn frame(
        &mut self,
        timestamp_ms: f64,
        source: &mut dyn InputSource,
        sink: &mut dyn FrameSink,
    ) -> Vec<GameEvent> {
        self.frames += 1;
        let dt_ms = self.state.clock.advance(timestamp_ms);
        let was_running = self.state.is_running();

        // Poll even when stopped so stale actions never leak into the next run
        let input = source.poll(&self.state);
        tick(&mut self.state, &input, dt_ms);

        let events = self.state.drain_events();
        if !events.is_empty() {
            sink.update_hud(&HudSnapshot::capture(&self.state));
        }
        if was_running && self.state.phase != GamePhase::Running {
            if let Some(overlay) = Overlay::for_phase(self.state.phase) {
                sink.show_overlay(&overlay);
            }
        }
        sink.draw(&RenderSnapshot::capture(&self.state));
        events
    }

    /// Draw without advancing (e.g. behind the title card)
    pub fn redraw(&self, sink: &mut dyn FrameSink) {
        sink.draw(&RenderSnapshot::capture(&self.state));
    }

    /// Restart the session and refresh the HUD
    pub fn reset(&mut self, sink: &mut dyn FrameSink) {
        self.state.reset_game();
        self.state.drain_events();
        sink.update_hud(&HudSnapshot::capture(&self.state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::Action;
    use glam::Vec2;

    #[derive(Default)]
    struct RecordingSink {
        draws: usize,
        huds: Vec<HudSnapshot>,
        overlays: Vec<Overlay>,
    }

    impl FrameSink for RecordingSink {
        fn draw(&mut self, _frame: &RenderSnapshot) {
            self.draws += 1;
        }
        fn update_hud(&mut self, hud: &HudSnapshot) {
            self.huds.push(hud.clone());
        }
        fn show_overlay(&mut self, overlay: &Overlay) {
            self.overlays.push(overlay.clone());
        }
    }

    #[test]
    fn test_frame_draws_and_publishes_hud() {
        let mut game = GameLoop::new(GameState::new(8));
        let mut input = InputQueue::new();
        let mut sink = RecordingSink::default();

        // First frame: dt 0, but the spawn timer starts at zero so an enemy appears
        game.frame(1000.0, &mut input, &mut sink);
        assert_eq!(sink.draws, 1);
        assert_eq!(game.state.enemies.len(), 1);
        assert_eq!(sink.huds.len(), 1);

        input.push_action(Action::Throw { aim: None });
        let events = game.frame(1016.0, &mut input, &mut sink);
        assert!(events.iter().any(|e| matches!(e, GameEvent::ShurikenThrown { .. })));
        assert_eq!(sink.huds.last().unwrap().shuriken, SHURIKEN_PER_WAVE - 1);
    }

    #[test]
    fn test_defeat_shows_overlay_once_and_keeps_drawing() {
        let mut game = GameLoop::new(GameState::new(8));
        let mut input = InputQueue::new();
        let mut sink = RecordingSink::default();
        game.state.heart_tenths = 1;
        game.state.enemies_to_spawn = 0;
        let pos = game.state.player.pos + Vec2::new(5.0, 0.0);
        game.state.push_enemy(pos);

        game.frame(0.0, &mut input, &mut sink);
        assert_eq!(game.state.phase, GamePhase::Defeat);
        game.frame(16.0, &mut input, &mut sink);
        game.frame(32.0, &mut input, &mut sink);

        assert_eq!(sink.overlays.len(), 1);
        assert_eq!(sink.overlays[0].title, "Defeated");
        assert_eq!(sink.draws, 3);
        assert_eq!(game.frames(), 3);
        assert_eq!(sink.huds.last().unwrap().hearts, "0.0 / 3");
    }

    #[test]
    fn test_reset_after_terminal() {
        let mut game = GameLoop::new(GameState::new(8));
        let mut sink = RecordingSink::default();
        game.state.phase = GamePhase::Victory;
        game.state.wave = TOTAL_WAVES;
        game.state.shuriken = 0;
        game.state.clock.advance(500.0);

        game.reset(&mut sink);

        assert!(game.state.is_running());
        assert_eq!(game.state.wave, 1);
        assert_eq!(game.state.shuriken, SHURIKEN_PER_WAVE);
        assert_eq!(game.state.clock.last_timestamp_ms(), None);
        assert_eq!(sink.huds.last().unwrap().wave, "1 / 5");
        assert!(game.state.events.is_empty());
    }

    #[test]
    fn test_autopilot_runs_are_reproducible() {
        let run = |seed| {
            let mut game = GameLoop::new(GameState::new(seed));
            let mut pilot = Autopilot::new();
            let mut sink = RecordingSink::default();
            for frame in 0..2000u32 {
                game.frame(frame as f64 * 16.0, &mut pilot, &mut sink);
            }
            (
                game.state.wave,
                game.state.heart_tenths,
                game.state.shuriken,
                game.state.enemies.len(),
                game.state.defeated_this_wave,
            )
        };
        assert_eq!(run(77), run(77));
    }
}
