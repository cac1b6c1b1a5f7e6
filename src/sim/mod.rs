//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod bonus;
pub mod collision;
pub mod entities;
pub mod level;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Landing, goal_slot_at, resolve_landing, vehicle_hit};
pub use level::{complete_level, lose_life, reset_level, reset_player};
pub use player::queue_move;
pub use snapshot::RenderSnapshot;
pub use state::{
    BonusAnchor, BonusItem, BonusKind, DeathCause, Direction, GameEvent, GamePhase, GameState,
    LaneKind, Platform, PlatformKind, Player, Predator, Vehicle, VehicleKind,
};
pub use tick::{countdown_tick, tick};
