//! Wave progression
//!
//! A wave is Active until its full quota has been defeated and the field is
//! empty. Clearing is transient: the same call either starts the next wave or
//! ends the run in Victory.

use super::spawner::spawn_cooldown_ms;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Outcome of a wave check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveTransition {
    /// Current wave continues
    Hold,
    /// Wave cleared, this wave number has started
    NextWave(u32),
    /// Final wave cleared
    Victory,
}

/// Whether the current wave's clear condition holds
pub fn wave_cleared(state: &GameState) -> bool {
    state.defeated_this_wave >= ENEMIES_PER_WAVE && state.enemies.is_empty()
}

/// Advance to the next wave or to Victory once the current wave is cleared
pub fn maybe_advance_wave(state: &mut GameState) -> WaveTransition {
    if !state.is_running() || !wave_cleared(state) {
        return WaveTransition::Hold;
    }

    if state.wave >= TOTAL_WAVES {
        state.phase = GamePhase::Victory;
        state.events.push(GameEvent::Victory);
        log::info!("Victory: all {} waves defended", TOTAL_WAVES);
        return WaveTransition::Victory;
    }

    state.wave += 1;
    state.shuriken = SHURIKEN_PER_WAVE;
    state.enemies_to_spawn = ENEMIES_PER_WAVE;
    state.defeated_this_wave = 0;
    state.spawn_cooldown_ms = spawn_cooldown_ms(state.wave);
    state.spawn_timer_ms = WAVE_START_DELAY_MS;
    state.events.push(GameEvent::WaveStarted { wave: state.wave });
    log::info!(
        "Wave {}/{} started (spawn every {} ms)",
        state.wave,
        TOTAL_WAVES,
        state.spawn_cooldown_ms
    );
    WaveTransition::NextWave(state.wave)
}
