//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`; components
//! receive it by `&mut` and there is no ambient state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives; every intent and tick is a no-op until restart
    GameOver,
    /// Final level completed
    Won,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Static classification of a board row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneKind {
    Goal,
    Road,
    Water,
    Safe,
}

/// Directional intent from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (row, col) delta for one hop
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// The player
///
/// `row`/`col` are the cell the player occupies (or departed from, while
/// moving). `col` is fractional because platforms carry the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub row: i32,
    pub col: f32,
    pub target_row: i32,
    pub target_col: f32,
    pub moving: bool,
    /// Hop animation progress in [0, 1)
    pub progress: f32,
    /// At most one intent waiting for the next tick
    pub queued: Option<Direction>,
}

impl Player {
    pub fn at(row: i32, col: f32) -> Self {
        Self {
            row,
            col,
            target_row: row,
            target_col: col,
            moving: false,
            progress: 0.0,
            queued: None,
        }
    }

    /// Interpolated (col, row) position for drawing
    pub fn display_pos(&self) -> Vec2 {
        let from = Vec2::new(self.col, self.row as f32);
        if !self.moving {
            return from;
        }
        let to = Vec2::new(self.target_col, self.target_row as f32);
        from.lerp(to, self.progress)
    }
}

/// Vehicle sprite variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Car,
    Truck,
    Racer,
    Bulldozer,
}

/// A road obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u32,
    pub row: i32,
    /// Left edge, in cells
    pub col: f32,
    pub width: f32,
    /// Cells per second, sign gives direction
    pub speed: f32,
    pub kind: VehicleKind,
}

/// Floating platform variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
    /// Never dives; may host a predator
    Log,
    /// Dives and resurfaces on its own countdown
    Turtle,
}

/// A water platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub row: i32,
    /// Left edge, in cells
    pub col: f32,
    pub width: f32,
    /// Cells per second, sign gives direction
    pub speed: f32,
    pub kind: PlatformKind,
    pub submerged: bool,
    /// Seconds until the next surface/dive toggle
    pub dive_timer: f32,
}

impl Platform {
    /// Whether the platform can hold the player right now
    pub fn supports(&self, col: f32) -> bool {
        !self.submerged && crate::span_contains(self.col, self.width, col)
    }

    /// Column of the cell at the front in the direction of travel
    pub fn leading_cell(&self) -> f32 {
        if self.speed > 0.0 {
            self.col + self.width - 1.0
        } else {
            self.col
        }
    }
}

/// A predator riding a log. Reads its host's position, never writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Predator {
    pub platform_id: u32,
    pub mouth_open: bool,
    /// Seconds until the mouth toggles
    pub mouth_timer: f32,
}

/// Bonus item variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    /// Sits in an empty goal slot
    Fly,
    /// Rides a platform
    Hitchhiker,
}

/// Where a bonus item is anchored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BonusAnchor {
    GoalSlot(usize),
    Platform { platform_id: u32, offset: f32 },
}

/// A transient score item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusItem {
    pub kind: BonusKind,
    pub row: i32,
    pub col: f32,
    pub value: u64,
    pub anchor: BonusAnchor,
}

/// Why a life was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Hit by a vehicle
    Vehicle,
    /// Landed on (or was left in) open water
    Drowned,
    /// Landed by an open predator mouth
    Predator,
    /// Hopped into a goal-lane wall between slots
    Wall,
    /// Hopped into an already filled goal slot
    SlotTaken,
    /// Carried off the edge of the board
    SweptAway,
    /// Countdown expired
    TimeUp,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Hop { direction: Direction },
    Landed { row: i32, col: f32 },
    LifeLost { cause: DeathCause, lives_left: u8 },
    GoalReached { slot: usize, points: u64 },
    BonusCollected { kind: BonusKind, points: u64 },
    LevelComplete { level: u32 },
    GameOver { score: u64 },
    Won { score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u8,
    pub score: u64,
    /// Countdown units left (one unit = 500 ms)
    pub time_remaining: u32,
    pub time_max: u32,
    pub goals: [bool; GOAL_SLOTS],
    pub goals_filled: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub vehicles: Vec<Vehicle>,
    pub platforms: Vec<Platform>,
    pub predators: Vec<Predator>,
    pub bonuses: Vec<BonusItem>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh session with no obstacles on the board.
    ///
    /// Call `level::reset_level` (or go through `Game::start`) to populate it.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let time_max = tuning.time_max_for_level(1);
        let player = Player::at(tuning.start_row(), START_COL as f32);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            lives: tuning.lives,
            tuning,
            level: 1,
            score: 0,
            time_remaining: time_max,
            time_max,
            goals: [false; GOAL_SLOTS],
            goals_filled: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player,
            vehicles: Vec::new(),
            platforms: Vec::new(),
            predators: Vec::new(),
            bonuses: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn lane(&self, row: i32) -> Option<LaneKind> {
        self.tuning.lane_kind(row)
    }

    pub fn platform(&self, id: u32) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    /// Whether any predator rides this platform
    pub fn hosts_predator(&self, platform_id: u32) -> bool {
        self.predators.iter().any(|c| c.platform_id == platform_id)
    }

    /// The surfaced platform holding `col` on `row`, if any
    pub fn support_at(&self, row: i32, col: f32) -> Option<&Platform> {
        self.platforms
            .iter()
            .find(|p| p.row == row && p.supports(col))
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
