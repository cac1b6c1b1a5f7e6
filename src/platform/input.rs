//! Keyboard and touch input mapping

use crate::sim::Direction;

/// Map a `KeyboardEvent.key` value to a hop direction
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Direction::Up),
        "ArrowDown" | "s" | "S" => Some(Direction::Down),
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}

/// Map a swipe vector (screen pixels, y down) to a direction.
///
/// Swipes shorter than `threshold` on their dominant axis are taps and
/// produce nothing.
pub fn direction_for_swipe(dx: f32, dy: f32, threshold: f32) -> Option<Direction> {
    if dx.abs() < threshold && dy.abs() < threshold {
        return None;
    }
    if dx.abs() > dy.abs() {
        Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    }
}

/// Remembers where a touch started
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn begin(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Finish the touch; returns the swipe direction, if any
    pub fn end(&mut self, x: f32, y: f32, threshold: f32) -> Option<Direction> {
        let (sx, sy) = self.start.take()?;
        direction_for_swipe(x - sx, y - sy, threshold)
    }
}
