//! Landing resolution
//!
//! Runs once per completed hop. The destination lane decides which rule
//! applies: goal slots, vehicle overlap, or platform support plus the
//! predator check. Surviving a landing collects any bonus item there.

use super::bonus::collect_bonuses;
use super::level::{complete_level, lose_life, reset_player};
use super::state::{DeathCause, GameEvent, GameState, LaneKind, Platform, Vehicle};
use crate::consts::*;
use crate::intervals_overlap;

/// Outcome of a landing, for callers that care
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Safe,
    Goal { slot: usize },
    Died(DeathCause),
}

/// Resolve the player's current cell after a hop completes
pub fn resolve_landing(state: &mut GameState) -> Landing {
    let row = state.player.row;
    let col = state.player.col;
    state.push_event(GameEvent::Landed { row, col });

    let outcome = match state.lane(row) {
        Some(LaneKind::Goal) => return land_in_goal(state, col),
        Some(LaneKind::Road) => {
            if vehicle_hit(&state.vehicles, row, col) {
                Landing::Died(DeathCause::Vehicle)
            } else {
                Landing::Safe
            }
        }
        Some(LaneKind::Water) => match state.support_at(row, col) {
            None => Landing::Died(DeathCause::Drowned),
            Some(host) if predator_bites(state, host, col) => Landing::Died(DeathCause::Predator),
            Some(_) => Landing::Safe,
        },
        Some(LaneKind::Safe) => Landing::Safe,
        None => Landing::Died(DeathCause::Wall),
    };

    match outcome {
        Landing::Died(cause) => lose_life(state, cause),
        _ => collect_bonuses(state, row, col),
    }
    outcome
}

/// Whether a one-cell player footprint at `col` overlaps a vehicle on `row`
pub fn vehicle_hit(vehicles: &[Vehicle], row: i32, col: f32) -> bool {
    vehicles
        .iter()
        .filter(|v| v.row == row)
        .any(|v| intervals_overlap(col, col + 1.0, v.col, v.col + v.width))
}

/// Whether an open mouth on `host` is within reach of `col`
pub fn predator_bites(state: &GameState, host: &Platform, col: f32) -> bool {
    (col - host.leading_cell()).abs() <= MOUTH_REACH
        && state
            .predators
            .iter()
            .any(|c| c.platform_id == host.id && c.mouth_open)
}

/// Goal slot aligned with `col`, if any
pub fn goal_slot_at(col: f32) -> Option<usize> {
    GOAL_COLUMNS
        .iter()
        .position(|&slot| (col - slot as f32).abs() < GOAL_ALIGN_TOLERANCE)
}

fn land_in_goal(state: &mut GameState, col: f32) -> Landing {
    let Some(slot) = goal_slot_at(col) else {
        lose_life(state, DeathCause::Wall);
        return Landing::Died(DeathCause::Wall);
    };
    if state.goals[slot] {
        lose_life(state, DeathCause::SlotTaken);
        return Landing::Died(DeathCause::SlotTaken);
    }

    state.goals[slot] = true;
    state.goals_filled += 1;
    let points = GOAL_SCORE + state.time_remaining as u64 * TIME_BONUS_PER_UNIT;
    state.score += points;
    state.push_event(GameEvent::GoalReached { slot, points });
    log::debug!("Goal slot {} filled for {} points", slot, points);

    let slot_col = GOAL_COLUMNS[slot] as f32;
    state.player.col = slot_col;
    collect_bonuses(state, 0, slot_col);

    if state.goals.iter().all(|&g| g) {
        complete_level(state);
    } else {
        reset_player(state);
    }
    Landing::Goal { slot }
}
