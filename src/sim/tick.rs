//! Per-tick simulation
//!
//! One call to [`tick`] per displayed frame. Only `Play` and `LevelUp`
//! advance the world; `Home` and `GameOver` are frozen and driven by input
//! commands instead.

use super::collision::{obstacle_hits_player, power_up_touches_player};
use super::spawn::respawn_obstacle;
use super::state::{GamePhase, GameState, MoveFlags, PowerUpKind};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held direction keys
    pub moves: MoveFlags,
    /// Use the held power-up (one-shot)
    pub activate_power_up: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Home | GamePhase::GameOver => {}
        GamePhase::Play => tick_play(state, input),
        GamePhase::LevelUp => tick_level_up(state),
    }
}

/// Apply the held power-up, if any; only valid while playing
///
/// Returns the kind that was applied.
pub fn activate_power_up(state: &mut GameState) -> Option<PowerUpKind> {
    if state.phase != GamePhase::Play {
        return None;
    }
    let kind = state.held_power_up.take()?;
    match kind {
        PowerUpKind::Intangibility => state.player.make_intangible(POWER_UP_DURATION_TICKS),
        PowerUpKind::Slow => state.effects.start_slow_motion(POWER_UP_DURATION_TICKS),
    }
    log::debug!("Activated {}", kind.label());
    Some(kind)
}

fn tick_play(state: &mut GameState, input: &TickInput) {
    if input.activate_power_up {
        activate_power_up(state);
    }

    let bounds = state.movement_bounds();
    state.player.update(input.moves, bounds);

    let slow = state.effects.slow_motion;

    // Obstacles: move, collide, recycle
    for i in 0..state.obstacles.len() {
        state.obstacles[i].advance(slow);

        if !state.player.intangible && obstacle_hits_player(&state.obstacles[i], &state.player) {
            state.game_over();
            return;
        }

        if state.obstacles[i].is_off_screen(state.height) {
            respawn_obstacle(&mut state.obstacles, i, &mut state.rng, &state.lanes, state.level);
        }
    }

    // Power-ups: collected ones are skipped until the next regeneration
    for power_up in state.power_ups.iter_mut().filter(|p| !p.collected) {
        power_up.advance(slow);
        if power_up_touches_player(power_up, &state.player) {
            power_up.collected = true;
            state.held_power_up = Some(power_up.kind);
            log::debug!("Collected {}", power_up.kind.label());
        }
    }

    state.effects.tick();

    state.score += 1;

    if state.score > 0 && state.score % LEVEL_SCORE_STEP == 0 && !state.transitioning {
        state.transitioning = true;
        state.transition_ticks = LEVEL_UP_TICKS;
        state.phase = GamePhase::LevelUp;
        log::info!("Level {} cleared at score {}", state.level, state.score);
    }
}

fn tick_level_up(state: &mut GameState) {
    state.transition_ticks = state.transition_ticks.saturating_sub(1);
    if state.transition_ticks == 0 {
        state.level += 1;
        state.regenerate();
        state.transitioning = false;
        state.phase = GamePhase::Play;
        log::info!("Starting level {}", state.level);
    }
}
