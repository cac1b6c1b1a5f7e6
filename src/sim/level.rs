//! Level, lives and timer control
//!
//! Owns every transition of the session: losing a life, filling the
//! board, and regenerating the obstacle layout for a level.

use rand::Rng;
use rand_pcg::Pcg32;

use super::bonus::spawn_bonuses;
use super::state::{
    DeathCause, GameEvent, GamePhase, GameState, Platform, PlatformKind, Player, Predator,
    Vehicle,
};
use crate::consts::*;
use crate::tuning::LaneSpec;

/// Spend a life. Terminal when none remain.
pub fn lose_life(state: &mut GameState, cause: DeathCause) {
    if !state.is_playing() {
        return;
    }
    state.lives = state.lives.saturating_sub(1);
    state.push_event(GameEvent::LifeLost {
        cause,
        lives_left: state.lives,
    });
    log::info!("Life lost ({:?}), {} left", cause, state.lives);

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.player.queued = None;
        state.push_event(GameEvent::GameOver { score: state.score });
        log::info!("Game over at level {} with score {}", state.level, state.score);
        return;
    }

    reset_player(state);
}

/// Put the player back on the start cell with a full countdown.
///
/// Entities and goal occupancy are untouched.
pub fn reset_player(state: &mut GameState) {
    state.player = Player::at(state.tuning.start_row(), START_COL as f32);
    state.time_remaining = state.time_max;
}

/// All goal slots filled: bank the bonus and move on (or win)
pub fn complete_level(state: &mut GameState) {
    state.score += LEVEL_COMPLETE_BONUS;
    state.push_event(GameEvent::LevelComplete { level: state.level });
    log::info!("Level {} complete, score {}", state.level, state.score);

    if state.tuning.final_level == Some(state.level) {
        state.phase = GamePhase::Won;
        state.player.queued = None;
        state.push_event(GameEvent::Won { score: state.score });
        log::info!("Final level cleared with score {}", state.score);
        return;
    }

    state.level += 1;
    reset_level(state);
}

/// Fresh obstacle layout for the current level.
///
/// Lives and score carry over; goals are cleared and the player returns
/// to the start cell.
pub fn reset_level(state: &mut GameState) {
    state.goals = [false; GOAL_SLOTS];
    state.goals_filled = 0;
    state.time_max = state.tuning.time_max_for_level(state.level);
    populate_lanes(state);
    spawn_bonuses(state);
    reset_player(state);
    log::debug!(
        "Level {} ready: {} vehicles, {} platforms, {} predators, {} bonus items",
        state.level,
        state.vehicles.len(),
        state.platforms.len(),
        state.predators.len(),
        state.bonuses.len()
    );
}

/// Build vehicles, platforms and predators for every lane
pub fn populate_lanes(state: &mut GameState) {
    state.vehicles.clear();
    state.platforms.clear();
    state.predators.clear();

    let multiplier = state.tuning.speed_multiplier(state.level);
    let min_gap = state.tuning.min_gap_cells;
    let surfaced_secs = state.tuning.dive_surfaced_secs;
    let lanes = state.tuning.lanes.clone();

    for (row, lane) in lanes.iter().enumerate() {
        let row = row as i32;
        match *lane {
            LaneSpec::Road {
                vehicle,
                count,
                width,
                speed,
            } => {
                for col in lane_positions(&mut state.rng, row, count, width, min_gap) {
                    let id = state.next_entity_id();
                    state.vehicles.push(Vehicle {
                        id,
                        row,
                        col,
                        width,
                        speed: speed * multiplier,
                        kind: vehicle,
                    });
                }
            }
            LaneSpec::Water {
                platform,
                count,
                width,
                speed,
            } => {
                for col in lane_positions(&mut state.rng, row, count, width, min_gap) {
                    let id = state.next_entity_id();
                    let dive_timer = match platform {
                        PlatformKind::Turtle => state.rng.random_range(0.0..surfaced_secs),
                        PlatformKind::Log => 0.0,
                    };
                    state.platforms.push(Platform {
                        id,
                        row,
                        col,
                        width,
                        speed: speed * multiplier,
                        kind: platform,
                        submerged: false,
                        dive_timer,
                    });
                }
            }
            LaneSpec::Goal | LaneSpec::Safe => {}
        }
    }

    spawn_predators(state);
}

/// Put predators on a random subset of logs, once the level allows it
fn spawn_predators(state: &mut GameState) {
    let chance = state.tuning.predator_chance(state.level);
    if chance <= 0.0 {
        return;
    }
    let closed_secs = state.tuning.mouth_closed_secs;
    let GameState {
        platforms,
        predators,
        rng,
        ..
    } = state;
    for platform in platforms.iter().filter(|p| p.kind == PlatformKind::Log) {
        if rng.random_bool(chance) {
            predators.push(Predator {
                platform_id: platform.id,
                mouth_open: false,
                mouth_timer: rng.random_range(0.0..closed_secs),
            });
        }
    }
}

/// Left edges for `count` entities of `width` spread over one wrap cycle.
///
/// Neighbours (including across the wrap) are always at least
/// `width + min_gap` apart; the count is reduced when the lane is too
/// short for that.
pub fn lane_positions(rng: &mut Pcg32, row: i32, count: u32, width: f32, min_gap: f32) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    let span = GRID_COLS as f32 + width;
    let pitch = width + min_gap;
    let fits = ((span / pitch).floor() as u32).max(1);
    let count = if count > fits {
        log::warn!("Row {row}: {count} entities of width {width} do not fit, using {fits}");
        fits
    } else {
        count
    };

    let gap = span / count as f32;
    let slack = (gap - pitch).max(0.0);
    let start = rng.random_range(0.0..gap);
    (0..count)
        .map(|i| {
            let jitter = if slack > 0.0 {
                rng.random_range(0.0..slack)
            } else {
                0.0
            };
            let col = start + i as f32 * gap + jitter;
            (col + width).rem_euclid(span) - width
        })
        .collect()
}
