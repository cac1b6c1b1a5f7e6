//! Entity simulation
//!
//! Advances vehicles and platforms, recycles them at the board edges,
//! cycles turtle dives and predator mouths, and carries an idle player
//! along with the platform under them.

use super::level::lose_life;
use super::state::{BonusAnchor, DeathCause, GameState, LaneKind, PlatformKind};
use crate::consts::GRID_COLS;

/// Advance every entity by `dt` seconds, then apply carried motion
pub fn step(state: &mut GameState, dt: f32) {
    // Support is judged against the layout the player landed on
    let rider = riding(state);

    for vehicle in &mut state.vehicles {
        vehicle.col = advance_wrapped(vehicle.col, vehicle.width, vehicle.speed, dt);
    }

    let (surfaced_secs, submerged_secs) =
        (state.tuning.dive_surfaced_secs, state.tuning.dive_submerged_secs);
    for platform in &mut state.platforms {
        platform.col = advance_wrapped(platform.col, platform.width, platform.speed, dt);

        if platform.kind == PlatformKind::Turtle {
            platform.dive_timer -= dt;
            if platform.dive_timer <= 0.0 {
                platform.submerged = !platform.submerged;
                platform.dive_timer += if platform.submerged {
                    submerged_secs
                } else {
                    surfaced_secs
                };
            }
        }
    }

    let (open_secs, closed_secs) = (state.tuning.mouth_open_secs, state.tuning.mouth_closed_secs);
    for predator in &mut state.predators {
        predator.mouth_timer -= dt;
        if predator.mouth_timer <= 0.0 {
            predator.mouth_open = !predator.mouth_open;
            predator.mouth_timer += if predator.mouth_open { open_secs } else { closed_secs };
        }
    }

    follow_hosts(state);
    if let Some(host) = rider {
        carry_player(state, host, dt);
    }
}

/// Move a left edge by `speed * dt`, recycling it to just outside the
/// opposite edge once its trailing edge has left the board
pub fn advance_wrapped(col: f32, width: f32, speed: f32, dt: f32) -> f32 {
    let col = col + speed * dt;
    let board = GRID_COLS as f32;
    if speed > 0.0 && col >= board {
        -width
    } else if speed < 0.0 && col + width <= 0.0 {
        board
    } else {
        col
    }
}

/// Keep platform-riding bonus items on their host
fn follow_hosts(state: &mut GameState) {
    let GameState {
        bonuses, platforms, ..
    } = state;
    for item in bonuses.iter_mut() {
        if let BonusAnchor::Platform {
            platform_id,
            offset,
        } = item.anchor
        {
            if let Some(host) = platforms.iter().find(|p| p.id == platform_id) {
                item.col = host.col + offset;
            }
        }
    }
}

/// What holds up an idle player on water before this step moves anything.
///
/// `None` when carrying does not apply; `Some(None)` when nothing does.
fn riding(state: &GameState) -> Option<Option<u32>> {
    if !state.is_playing() || state.player.moving {
        return None;
    }
    let row = state.player.row;
    if state.lane(row) != Some(LaneKind::Water) {
        return None;
    }
    Some(state.support_at(row, state.player.col).map(|p| p.id))
}

/// Drift an idle player on water with the platform found by [`riding`].
///
/// Leaving the board this way, or the platform diving, costs a life
/// without any hop being involved.
fn carry_player(state: &mut GameState, host: Option<u32>, dt: f32) {
    let speed = host
        .and_then(|id| state.platform(id))
        .filter(|p| !p.submerged)
        .map(|p| p.speed);
    let Some(speed) = speed else {
        log::debug!("Platform gone from under the player at col {:.2}", state.player.col);
        lose_life(state, DeathCause::Drowned);
        return;
    };

    state.player.col += speed * dt;
    state.player.target_col = state.player.col;
    let max_col = (GRID_COLS - 1) as f32;
    if state.player.col < 0.0 || state.player.col > max_col {
        log::debug!("Player carried off the board at col {:.2}", state.player.col);
        lose_life(state, DeathCause::SweptAway);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{
        BonusItem, BonusKind, GameEvent, Platform, Player, Predator, Vehicle, VehicleKind,
    };
    use crate::consts::SIM_DT;
    use crate::sim::collision::{Landing, resolve_landing};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn empty_state() -> GameState {
        GameState::new(42, Tuning::default())
    }

    fn log_platform(id: u32, row: i32, col: f32, width: f32, speed: f32) -> Platform {
        Platform {
            id,
            row,
            col,
            width,
            speed,
            kind: PlatformKind::Log,
            submerged: false,
            dive_timer: 0.0,
        }
    }

    #[test]
    fn test_vehicles_advance_by_speed() {
        let mut state = empty_state();
        state.vehicles.push(Vehicle {
            id: 1,
            row: 8,
            col: 2.0,
            width: 1.0,
            speed: 3.0,
            kind: VehicleKind::Car,
        });
        step(&mut state, 0.5);
        assert!((state.vehicles[0].col - 3.5).abs() < 1e-5);
    }

    #[test]
    fn test_wraparound_lands_outside_entry_edge() {
        let board = GRID_COLS as f32;
        // Rightward: trailing (left) edge passes the right edge
        assert_eq!(advance_wrapped(board - 0.01, 2.0, 1.0, 0.1), -2.0);
        // Leftward: trailing (right) edge passes the left edge
        assert_eq!(advance_wrapped(-2.95, 3.0, -1.0, 0.1), board);
        // Still partially visible: no recycle
        assert!((advance_wrapped(board - 0.5, 2.0, 1.0, 0.1) - (board - 0.4)).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_wrapped_entities_never_teleport_into_view(
            col in -6.0f32..(GRID_COLS as f32 + 1.0),
            width in 1.0f32..5.0,
            speed in prop_oneof![(-4.0f32..-0.1), (0.1f32..4.0)],
            dt in 0.001f32..0.1,
        ) {
            let board = GRID_COLS as f32;
            let moved = col + speed * dt;
            let next = advance_wrapped(col, width, speed, dt);
            if (next - moved).abs() > 1e-6 {
                // Recycled: fully outside the board on the entry side
                if speed > 0.0 {
                    prop_assert!(next + width <= 0.0);
                } else {
                    prop_assert!(next >= board);
                }
            }
        }
    }

    #[test]
    fn test_turtles_dive_and_resurface() {
        let mut state = empty_state();
        let mut turtle = log_platform(1, 2, 4.0, 2.0, 0.0001);
        turtle.kind = PlatformKind::Turtle;
        turtle.dive_timer = 0.05;
        state.platforms.push(turtle);

        step(&mut state, 0.1);
        assert!(state.platforms[0].submerged);
        assert!((state.platforms[0].dive_timer - (state.tuning.dive_submerged_secs - 0.05)).abs() < 1e-4);

        let submerged_secs = state.tuning.dive_submerged_secs;
        step(&mut state, submerged_secs);
        assert!(!state.platforms[0].submerged);
    }

    #[test]
    fn test_logs_never_dive() {
        let mut state = empty_state();
        state.platforms.push(log_platform(1, 2, 4.0, 2.0, 0.0001));
        for _ in 0..100 {
            step(&mut state, 0.1);
        }
        assert!(!state.platforms[0].submerged);
    }

    #[test]
    fn test_predator_mouth_cycles_independently() {
        let mut state = empty_state();
        state.platforms.push(log_platform(1, 1, 2.0, 3.0, 1.0));
        state.predators.push(Predator {
            platform_id: 1,
            mouth_open: false,
            mouth_timer: 0.2,
        });
        step(&mut state, 0.25);
        assert!(state.predators[0].mouth_open);
        let open_secs = state.tuning.mouth_open_secs;
        step(&mut state, open_secs);
        assert!(!state.predators[0].mouth_open);
    }

    #[test]
    fn test_hitchhiker_follows_host() {
        let mut state = empty_state();
        state.platforms.push(log_platform(9, 1, 2.0, 3.0, 2.0));
        state.bonuses.push(BonusItem {
            kind: BonusKind::Hitchhiker,
            row: 1,
            col: 3.0,
            value: 200,
            anchor: BonusAnchor::Platform {
                platform_id: 9,
                offset: 1.0,
            },
        });
        step(&mut state, 0.5);
        assert!((state.bonuses[0].col - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_idle_player_is_carried() {
        let mut state = empty_state();
        state.platforms.push(log_platform(1, 3, 2.0, 4.0, 1.0));
        state.player = Player::at(3, 3.0);
        step(&mut state, 0.5);
        assert!((state.player.col - 3.5).abs() < 1e-5);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_carried_off_board_loses_life() {
        let mut state = empty_state();
        let max_col = (GRID_COLS - 1) as f32;
        state.platforms.push(log_platform(1, 3, max_col - 1.0, 3.0, 2.0));
        state.player = Player::at(3, max_col - 0.05);
        step(&mut state, 0.1);
        assert_eq!(state.lives, 2);
        assert_eq!(state.player.row, state.tuning.start_row());
        assert!(state.events.contains(&GameEvent::LifeLost {
            cause: DeathCause::SweptAway,
            lives_left: 2
        }));
    }

    #[test]
    fn test_player_drowns_when_turtle_dives() {
        let mut state = empty_state();
        let mut turtle = log_platform(1, 2, 4.0, 3.0, 0.0001);
        turtle.kind = PlatformKind::Turtle;
        turtle.dive_timer = 0.01;
        state.platforms.push(turtle);
        state.player = Player::at(2, 5.0);

        step(&mut state, 0.02);
        assert_eq!(state.lives, 2);
        assert!(state.events.contains(&GameEvent::LifeLost {
            cause: DeathCause::Drowned,
            lives_left: 2
        }));
    }

    #[test]
    fn test_player_on_trailing_cell_rides_right_moving_log() {
        let mut state = empty_state();
        state.platforms.push(log_platform(1, 3, 2.99, 3.0, 2.0));
        state.player = Player::at(3, 3.0);
        assert!(state.support_at(3, 3.0).is_some());

        step(&mut state, SIM_DT);
        assert_eq!(state.lives, 3);
        assert!((state.player.col - (3.0 + 2.0 * SIM_DT)).abs() < 1e-5);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_player_on_last_cell_rides_left_moving_log() {
        let mut state = empty_state();
        // [2, 5) moving left: the back edge is the right one
        state.platforms.push(log_platform(1, 3, 2.0, 3.0, -2.0));
        state.player = Player::at(3, 4.99);

        step(&mut state, SIM_DT);
        assert_eq!(state.lives, 3);
        assert!((state.player.col - (4.99 - 2.0 * SIM_DT)).abs() < 1e-5);
    }

    #[test]
    fn test_safe_landing_on_log_edge_survives_next_frame() {
        let mut state = empty_state();
        state.platforms.push(log_platform(1, 3, 2.99, 3.0, 2.0));
        state.player = Player::at(3, 3.0);
        assert_eq!(resolve_landing(&mut state), Landing::Safe);

        for _ in 0..10 {
            step(&mut state, SIM_DT);
        }
        assert_eq!(state.lives, 3);
        assert!(!state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::LifeLost { .. })));
    }

    #[test]
    fn test_moving_player_is_not_carried() {
        let mut state = empty_state();
        state.platforms.push(log_platform(1, 3, 2.0, 4.0, 1.0));
        state.player = Player::at(3, 3.0);
        state.player.moving = true;
        state.player.target_row = 2;
        step(&mut state, 0.5);
        assert_eq!(state.player.col, 3.0);
    }
}
