//! Platform abstraction layer
//!
//! Browser/native differences for input. Keyboard keys and touch swipes
//! both reduce to a `Direction` handed to `Game::queue_move`.

pub mod input;

pub use input::{SwipeTracker, direction_for_key, direction_for_swipe};
