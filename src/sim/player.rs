//! Player hop state machine
//!
//! Idle -> Moving -> Idle. An intent is queued by the input layer, picked
//! up on the next tick, and the landing is resolved the moment the hop
//! animation completes.

use super::collision::resolve_landing;
use super::state::{Direction, GameEvent, GameState};
use crate::consts::*;

/// Queue a directional intent.
///
/// Dropped while a hop is in progress or the game has ended. While idle
/// the new intent replaces any stale one.
pub fn queue_move(state: &mut GameState, direction: Direction) {
    if !state.is_playing() || state.player.moving {
        return;
    }
    state.player.queued = Some(direction);
}

/// Start a queued hop (if any) and advance the one in flight
pub fn step(state: &mut GameState, dt: f32) {
    if !state.is_playing() {
        return;
    }
    if !state.player.moving {
        if let Some(direction) = state.player.queued.take() {
            begin_hop(state, direction);
        }
    }
    if !state.player.moving {
        return;
    }

    state.player.progress += dt / MOVE_DURATION;
    if state.player.progress >= 1.0 {
        let player = &mut state.player;
        player.row = player.target_row;
        player.col = player.target_col;
        player.moving = false;
        player.progress = 0.0;
        resolve_landing(state);
    }
}

/// Accept a hop if it stays on the board; out-of-bounds intents vanish
fn begin_hop(state: &mut GameState, direction: Direction) {
    let (d_row, d_col) = direction.delta();
    let row = state.player.row + d_row;
    let col = state.player.col + d_col as f32;
    if row < 0 || row >= state.tuning.rows() || col < 0.0 || col > (GRID_COLS - 1) as f32 {
        log::debug!("Rejected {:?} hop off the board", direction);
        return;
    }

    let player = &mut state.player;
    player.target_row = row;
    player.target_col = col;
    player.moving = true;
    player.progress = 0.0;

    if direction == Direction::Up {
        state.score += FORWARD_STEP_SCORE;
    }
    state.push_event(GameEvent::Hop { direction });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Player};
    use crate::tuning::Tuning;

    fn idle_state() -> GameState {
        GameState::new(1, Tuning::default())
    }

    /// Ticks to finish one hop
    fn hop_ticks() -> u32 {
        (MOVE_DURATION / SIM_DT).ceil() as u32 + 1
    }

    #[test]
    fn test_queued_hop_completes() {
        let mut state = idle_state();
        let start_row = state.player.row;
        queue_move(&mut state, Direction::Up);
        assert_eq!(state.player.queued, Some(Direction::Up));

        step(&mut state, SIM_DT);
        assert!(state.player.moving);
        assert!(state.player.queued.is_none());
        assert!(state.player.progress > 0.0 && state.player.progress < 1.0);
        assert_eq!(state.player.row, start_row);

        for _ in 0..hop_ticks() {
            step(&mut state, SIM_DT);
        }
        assert!(!state.player.moving);
        assert_eq!(state.player.row, start_row - 1);
        assert_eq!(state.player.progress, 0.0);
    }

    #[test]
    fn test_intent_while_moving_is_dropped() {
        let mut state = idle_state();
        queue_move(&mut state, Direction::Left);
        step(&mut state, SIM_DT);
        assert!(state.player.moving);

        queue_move(&mut state, Direction::Up);
        assert!(state.player.queued.is_none());

        for _ in 0..hop_ticks() * 2 {
            step(&mut state, SIM_DT);
        }
        assert_eq!(state.player.row, state.tuning.start_row());
        assert_eq!(state.player.col, (START_COL - 1) as f32);
    }

    #[test]
    fn test_idle_intent_overwrites_stale_one() {
        let mut state = idle_state();
        queue_move(&mut state, Direction::Left);
        queue_move(&mut state, Direction::Right);
        assert_eq!(state.player.queued, Some(Direction::Right));
    }

    #[test]
    fn test_out_of_bounds_intent_is_ignored() {
        let mut state = idle_state();
        // Start row is the bottom row
        queue_move(&mut state, Direction::Down);
        step(&mut state, SIM_DT);
        assert!(!state.player.moving);
        assert_eq!(state.player.row, state.tuning.start_row());
        assert!(state.events.is_empty());

        state.player = Player::at(state.tuning.start_row(), 0.0);
        queue_move(&mut state, Direction::Left);
        step(&mut state, SIM_DT);
        assert!(!state.player.moving);
        assert_eq!(state.player.col, 0.0);

        // A drifted column that would land past the last cell
        state.player = Player::at(state.tuning.start_row(), (GRID_COLS - 1) as f32 - 0.3);
        queue_move(&mut state, Direction::Right);
        step(&mut state, SIM_DT);
        assert!(!state.player.moving);
    }

    #[test]
    fn test_forward_bonus_awarded_on_accept() {
        let mut state = idle_state();
        queue_move(&mut state, Direction::Up);
        step(&mut state, SIM_DT);
        assert_eq!(state.score, FORWARD_STEP_SCORE);

        for _ in 0..hop_ticks() {
            step(&mut state, SIM_DT);
        }
        queue_move(&mut state, Direction::Left);
        step(&mut state, SIM_DT);
        assert_eq!(state.score, FORWARD_STEP_SCORE);
    }

    #[test]
    fn test_no_moves_after_game_over() {
        let mut state = idle_state();
        state.phase = GamePhase::GameOver;
        queue_move(&mut state, Direction::Up);
        step(&mut state, SIM_DT);
        assert!(state.player.queued.is_none());
        assert!(!state.player.moving);
    }
}
