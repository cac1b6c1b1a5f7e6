//! Data-driven game balance
//!
//! Lane layout, difficulty scaling and spawn odds. Everything the level
//! generator reads comes from here so difficulty curves can be tuned (or
//! loaded from JSON) without touching the simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::GRID_COLS;
use crate::sim::state::{LaneKind, PlatformKind, VehicleKind};

/// One row of the board, top (row 0) to bottom (start row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LaneSpec {
    Goal,
    Safe,
    Road {
        vehicle: VehicleKind,
        count: u32,
        width: f32,
        /// Cells per second at level 1, sign gives direction
        speed: f32,
    },
    Water {
        platform: PlatformKind,
        count: u32,
        width: f32,
        /// Cells per second at level 1, sign gives direction
        speed: f32,
    },
}

impl LaneSpec {
    pub fn kind(&self) -> LaneKind {
        match self {
            LaneSpec::Goal => LaneKind::Goal,
            LaneSpec::Safe => LaneKind::Safe,
            LaneSpec::Road { .. } => LaneKind::Road,
            LaneSpec::Water { .. } => LaneKind::Water,
        }
    }
}

/// Level at which the countdown maximum drops to `time_max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeThreshold {
    pub level: u32,
    pub time_max: u32,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Board rows, row 0 first. The last row is the start row.
    pub lanes: Vec<LaneSpec>,
    pub lives: u8,
    /// Countdown length in 500 ms units
    pub time_max: u32,
    /// Countdown caps applied from a given level on
    pub time_thresholds: Vec<TimeThreshold>,

    /// Speed gain per level (0.15 = +15%)
    pub speed_step_per_level: f32,
    pub max_speed_multiplier: f32,
    /// Minimum empty cells between neighbours in a lane
    pub min_gap_cells: f32,

    pub predator_min_level: u32,
    pub predator_base_chance: f64,
    pub predator_chance_per_level: f64,
    pub predator_max_chance: f64,
    pub mouth_open_secs: f32,
    pub mouth_closed_secs: f32,

    pub dive_surfaced_secs: f32,
    pub dive_submerged_secs: f32,

    pub goal_bonus_chance: f64,
    pub rider_bonus_chance: f64,
    pub goal_bonus_value: u64,
    pub rider_bonus_value: u64,

    /// Completing this level wins the game (endless when `None`)
    pub final_level: Option<u32>,
}

impl Default for Tuning {
    fn default() -> Self {
        use LaneSpec::*;
        Self {
            lanes: vec![
                Goal,
                Water { platform: PlatformKind::Log, count: 3, width: 3.0, speed: 1.2 },
                Water { platform: PlatformKind::Turtle, count: 3, width: 2.0, speed: -1.6 },
                Water { platform: PlatformKind::Log, count: 2, width: 4.0, speed: 2.0 },
                Water { platform: PlatformKind::Log, count: 3, width: 2.0, speed: 1.4 },
                Water { platform: PlatformKind::Turtle, count: 3, width: 3.0, speed: -1.1 },
                Safe,
                Road { vehicle: VehicleKind::Truck, count: 2, width: 2.0, speed: -1.0 },
                Road { vehicle: VehicleKind::Racer, count: 2, width: 1.0, speed: 2.4 },
                Road { vehicle: VehicleKind::Car, count: 3, width: 1.0, speed: -1.5 },
                Road { vehicle: VehicleKind::Bulldozer, count: 3, width: 1.0, speed: 1.0 },
                Road { vehicle: VehicleKind::Car, count: 3, width: 1.0, speed: -1.3 },
                Safe,
            ],
            lives: 3,
            time_max: 60,
            time_thresholds: vec![
                TimeThreshold { level: 3, time_max: 50 },
                TimeThreshold { level: 5, time_max: 40 },
            ],
            speed_step_per_level: 0.15,
            max_speed_multiplier: 2.5,
            min_gap_cells: 1.5,
            predator_min_level: 3,
            predator_base_chance: 0.2,
            predator_chance_per_level: 0.1,
            predator_max_chance: 0.6,
            mouth_open_secs: 1.0,
            mouth_closed_secs: 2.0,
            dive_surfaced_secs: 3.0,
            dive_submerged_secs: 1.2,
            goal_bonus_chance: 0.5,
            rider_bonus_chance: 0.3,
            goal_bonus_value: 200,
            rider_bonus_value: 200,
            final_level: None,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject layouts the simulation cannot run
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.lanes.len() < 2 {
            return Err(TuningError::Invalid("need at least a goal and a start lane".into()));
        }
        if self.lanes[0] != LaneSpec::Goal {
            return Err(TuningError::Invalid("row 0 must be the goal lane".into()));
        }
        if self.lanes[1..].iter().any(|l| *l == LaneSpec::Goal) {
            return Err(TuningError::Invalid("only row 0 may be a goal lane".into()));
        }
        if self.lanes.last().map(LaneSpec::kind) != Some(LaneKind::Safe) {
            return Err(TuningError::Invalid("the start row must be safe".into()));
        }
        for (row, lane) in self.lanes.iter().enumerate() {
            if let LaneSpec::Road { width, speed, .. } | LaneSpec::Water { width, speed, .. } = lane {
                if !(*width >= 1.0 && *width < GRID_COLS as f32) {
                    return Err(TuningError::Invalid(format!("row {row}: bad width {width}")));
                }
                if !speed.is_finite() || *speed == 0.0 {
                    return Err(TuningError::Invalid(format!("row {row}: speed must be non-zero")));
                }
            }
        }
        if self.lives == 0 || self.time_max == 0 {
            return Err(TuningError::Invalid("lives and time_max must be positive".into()));
        }
        if self.speed_step_per_level < 0.0 || self.max_speed_multiplier < 1.0 {
            return Err(TuningError::Invalid("speed scaling must not slow entities down".into()));
        }
        if self.min_gap_cells < 0.0 {
            return Err(TuningError::Invalid("min_gap_cells must be >= 0".into()));
        }
        if self.mouth_open_secs <= 0.0
            || self.mouth_closed_secs <= 0.0
            || self.dive_surfaced_secs <= 0.0
            || self.dive_submerged_secs <= 0.0
        {
            return Err(TuningError::Invalid("cycle durations must be positive".into()));
        }
        let chances = [
            self.predator_base_chance,
            self.predator_chance_per_level,
            self.predator_max_chance,
            self.goal_bonus_chance,
            self.rider_bonus_chance,
        ];
        if chances.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(TuningError::Invalid("chances must lie in [0, 1]".into()));
        }
        Ok(())
    }

    /// Number of board rows
    pub fn rows(&self) -> i32 {
        self.lanes.len() as i32
    }

    /// The row the player starts (and respawns) on
    pub fn start_row(&self) -> i32 {
        self.rows() - 1
    }

    /// Classification of a row (rows outside the board are walls; callers
    /// bounds-check first)
    pub fn lane_kind(&self, row: i32) -> Option<LaneKind> {
        usize::try_from(row)
            .ok()
            .and_then(|r| self.lanes.get(r))
            .map(LaneSpec::kind)
    }

    /// Speed multiplier for a 1-based level; non-decreasing and capped
    pub fn speed_multiplier(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        (1.0 + self.speed_step_per_level * steps).min(self.max_speed_multiplier)
    }

    /// Countdown maximum for a level; never increases with level
    pub fn time_max_for_level(&self, level: u32) -> u32 {
        self.time_thresholds
            .iter()
            .filter(|t| level >= t.level)
            .fold(self.time_max, |acc, t| acc.min(t.time_max))
    }

    /// Probability that a log hosts a predator at this level
    pub fn predator_chance(&self, level: u32) -> f64 {
        if level < self.predator_min_level {
            return 0.0;
        }
        let steps = (level - self.predator_min_level) as f64;
        (self.predator_base_chance + self.predator_chance_per_level * steps)
            .clamp(0.0, self.predator_max_chance.min(1.0))
    }
}
