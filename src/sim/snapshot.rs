//! Read-only view of a session for renderers and the HUD

use glam::Vec2;
use serde::Serialize;

use super::state::{
    BonusItem, GamePhase, GameState, LaneKind, Platform, Vehicle,
};
use crate::consts::*;

/// Player as drawn
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub row: i32,
    pub col: f32,
    pub moving: bool,
    pub progress: f32,
    /// Interpolated (col, row)
    pub pos: Vec2,
}

/// Predator as drawn: sits on the leading cell of its host
#[derive(Debug, Clone, Serialize)]
pub struct PredatorView {
    pub row: i32,
    pub col: f32,
    pub mouth_open: bool,
}

/// Everything a frame needs, copied out of the state
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub cols: i32,
    pub lanes: Vec<LaneKind>,
    pub goal_columns: [i32; GOAL_SLOTS],
    pub goals: [bool; GOAL_SLOTS],
    pub player: PlayerView,
    pub vehicles: Vec<Vehicle>,
    pub platforms: Vec<Platform>,
    pub predators: Vec<PredatorView>,
    pub bonuses: Vec<BonusItem>,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub time_remaining: u32,
    pub time_max: u32,
    pub game_over: bool,
    pub won: bool,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let predators = state
            .predators
            .iter()
            .filter_map(|c| {
                let host = state.platform(c.platform_id)?;
                Some(PredatorView {
                    row: host.row,
                    col: host.leading_cell(),
                    mouth_open: c.mouth_open,
                })
            })
            .collect();

        Self {
            cols: GRID_COLS,
            lanes: state.tuning.lanes.iter().map(|l| l.kind()).collect(),
            goal_columns: GOAL_COLUMNS,
            goals: state.goals,
            player: PlayerView {
                row: state.player.row,
                col: state.player.col,
                moving: state.player.moving,
                progress: state.player.progress,
                pos: state.player.display_pos(),
            },
            vehicles: state.vehicles.clone(),
            platforms: state.platforms.clone(),
            predators,
            bonuses: state.bonuses.clone(),
            score: state.score,
            lives: state.lives,
            level: state.level,
            time_remaining: state.time_remaining,
            time_max: state.time_max,
            game_over: state.phase == GamePhase::GameOver,
            won: state.phase == GamePhase::Won,
        }
    }

    /// Fraction of the countdown left, for the time bar
    pub fn time_fraction(&self) -> f32 {
        if self.time_max == 0 {
            return 0.0;
        }
        self.time_remaining as f32 / self.time_max as f32
    }
}
