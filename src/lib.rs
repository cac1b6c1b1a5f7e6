//! Frog Crossing - A lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, level state machine)
//! - `scheduler`: Frame and countdown tasks driven from one owner
//! - `game`: Lifecycle entry points (start, reset, teardown)
//! - `renderer`: Palette and Canvas2D drawing of render snapshots
//! - `platform`: Browser input mapping
//! - `tuning`: Data-driven game balance and lane layout

pub mod best_score;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use best_score::BestScore;
pub use game::Game;
pub use scheduler::Scheduler;
pub use settings::{DifficultyPreset, Settings};
pub use tuning::{LaneSpec, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest real frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Countdown period (seconds per time unit)
    pub const COUNTDOWN_PERIOD: f32 = 0.5;

    /// Grid width in cells
    pub const GRID_COLS: i32 = 11;
    /// Number of goal slots in the goal lane
    pub const GOAL_SLOTS: usize = 5;
    /// Goal slot columns, left to right
    pub const GOAL_COLUMNS: [i32; GOAL_SLOTS] = [1, 3, 5, 7, 9];
    /// Player start column (the start row is the last lane)
    pub const START_COL: i32 = GRID_COLS / 2;

    /// Time for one discrete hop (seconds)
    pub const MOVE_DURATION: f32 = 0.12;

    /// Score for each accepted hop toward the goal lane
    pub const FORWARD_STEP_SCORE: u64 = 10;
    /// Score for filling a goal slot
    pub const GOAL_SCORE: u64 = 50;
    /// Extra goal score per remaining countdown unit
    pub const TIME_BONUS_PER_UNIT: u64 = 10;
    /// Score for filling every goal slot in a level
    pub const LEVEL_COMPLETE_BONUS: u64 = 1000;

    /// Column distance within which a goal slot counts as reached
    pub const GOAL_ALIGN_TOLERANCE: f32 = 0.5;
    /// Column distance within which a bonus item is picked up
    pub const PICKUP_TOLERANCE: f32 = 0.5;
    /// Column distance from an open mouth that is fatal
    pub const MOUTH_REACH: f32 = 0.5;
}

/// Half-open interval overlap: `[a_left, a_right)` against `[b_left, b_right)`.
///
/// Touching edges do not overlap.
#[inline]
pub fn intervals_overlap(a_left: f32, a_right: f32, b_left: f32, b_right: f32) -> bool {
    a_right > b_left && a_left < b_right
}

/// Whether `x` lies in `[left, left + width)`
#[inline]
pub fn span_contains(left: f32, width: f32, x: f32) -> bool {
    x >= left && x < left + width
}
