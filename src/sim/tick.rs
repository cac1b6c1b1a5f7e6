//! Fixed timestep simulation tick and countdown tick
//!
//! The two periodic tasks of a session. Each runs to completion on the
//! state it is handed; the scheduler never interleaves them.

use super::entities;
use super::level::lose_life;
use super::player;
use super::state::{DeathCause, GameState};

/// Advance the game state by one fixed timestep.
///
/// Order: entities (including carried motion), then the player's queued
/// or in-flight hop, whose completion resolves the landing.
pub fn tick(state: &mut GameState, dt: f32) {
    if !state.is_playing() {
        return;
    }
    state.time_ticks += 1;

    entities::step(state, dt);
    player::step(state, dt);
}

/// One countdown period elapsed.
///
/// The clock only runs while the player is idle; running out costs a life
/// (which refills the clock, so expiry fires once).
pub fn countdown_tick(state: &mut GameState) {
    if !state.is_playing() || state.player.moving {
        return;
    }
    state.time_remaining = state.time_remaining.saturating_sub(1);
    if state.time_remaining == 0 {
        log::debug!("Countdown expired on level {}", state.level);
        lose_life(state, DeathCause::TimeUp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::level::reset_level;
    use crate::sim::player::queue_move;
    use crate::sim::state::{Direction, GameEvent, GamePhase, Platform, PlatformKind, Player};
    use crate::tuning::Tuning;

    #[test]
    fn test_countdown_expiry_fires_once() {
        let mut state = GameState::new(1, Tuning::default());
        state.time_remaining = 2;
        countdown_tick(&mut state);
        assert_eq!(state.lives, 3);
        countdown_tick(&mut state);
        assert_eq!(state.lives, 2);
        assert_eq!(state.time_remaining, state.time_max);

        countdown_tick(&mut state);
        assert_eq!(state.lives, 2);
        let losses = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::LifeLost { .. }))
            .count();
        assert_eq!(losses, 1);
    }

    #[test]
    fn test_countdown_paused_mid_hop() {
        let mut state = GameState::new(1, Tuning::default());
        queue_move(&mut state, Direction::Up);
        tick(&mut state, SIM_DT);
        assert!(state.player.moving);
        let before = state.time_remaining;
        countdown_tick(&mut state);
        assert_eq!(state.time_remaining, before);
    }

    #[test]
    fn test_terminal_state_freezes_ticks() {
        let mut state = GameState::new(1, Tuning::default());
        reset_level(&mut state);
        state.phase = GamePhase::GameOver;
        let cols: Vec<f32> = state.vehicles.iter().map(|v| v.col).collect();
        tick(&mut state, SIM_DT);
        countdown_tick(&mut state);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.time_remaining, state.time_max);
        let after: Vec<f32> = state.vehicles.iter().map(|v| v.col).collect();
        assert_eq!(cols, after);
    }

    #[test]
    fn test_turtle_diving_during_hop_drowns_on_landing() {
        let mut state = GameState::new(1, Tuning::default());
        state.platforms.push(Platform {
            id: 1,
            row: 5,
            col: 4.0,
            width: 3.0,
            speed: 0.0001,
            kind: PlatformKind::Turtle,
            submerged: false,
            dive_timer: MOVE_DURATION / 2.0,
        });
        state.player = Player::at(6, 5.0);
        queue_move(&mut state, Direction::Up);
        for _ in 0..30 {
            tick(&mut state, SIM_DT);
        }
        assert_eq!(state.lives, 2);
        assert!(state.events.contains(&GameEvent::LifeLost {
            cause: DeathCause::Drowned,
            lives_left: 2
        }));
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed| {
            let mut state = GameState::new(seed, Tuning::default());
            reset_level(&mut state);
            for i in 0..600 {
                if i % 40 == 0 {
                    queue_move(&mut state, Direction::Up);
                }
                tick(&mut state, SIM_DT);
            }
            (
                state.score,
                state.lives,
                state.player.row,
                state.vehicles.iter().map(|v| v.col).collect::<Vec<_>>(),
            )
        };
        assert_eq!(run(77), run(77));
    }
}
