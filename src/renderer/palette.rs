//! Colours and board layout for drawing

use glam::Vec2;

use crate::sim::{BonusKind, LaneKind, PlatformKind, VehicleKind};

/// Top-left pixel of a (col, row) board position
#[inline]
pub fn cell_origin(pos: Vec2, cell_px: f32) -> Vec2 {
    pos * cell_px
}

/// Length in cells of the countdown bar for the remaining time fraction
pub fn timer_bar_cells(fraction: f32, cols: f32) -> f32 {
    fraction.clamp(0.0, 1.0) * cols
}

/// CSS colours for every drawable
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub goal: &'static str,
    pub goal_filled: &'static str,
    pub road: &'static str,
    pub water: &'static str,
    pub safe: &'static str,
    pub log: &'static str,
    pub turtle: &'static str,
    pub turtle_submerged: &'static str,
    pub predator: &'static str,
    pub mouth: &'static str,
    pub player: &'static str,
    pub bonus: &'static str,
    pub hud: &'static str,
}

impl Palette {
    pub const STANDARD: Palette = Palette {
        goal: "#1b5e20",
        goal_filled: "#66bb6a",
        road: "#303030",
        water: "#0d47a1",
        safe: "#4a148c",
        log: "#795548",
        turtle: "#c62828",
        turtle_submerged: "rgba(198, 40, 40, 0.3)",
        predator: "#2e7d32",
        mouth: "#ffeb3b",
        player: "#76ff03",
        bonus: "#ffd600",
        hud: "#ffffff",
    };

    pub const HIGH_CONTRAST: Palette = Palette {
        goal: "#000000",
        goal_filled: "#00ff00",
        road: "#000000",
        water: "#0000ff",
        safe: "#404040",
        log: "#ffaa00",
        turtle: "#ff0000",
        turtle_submerged: "rgba(255, 0, 0, 0.45)",
        predator: "#00ff00",
        mouth: "#ffffff",
        player: "#ffff00",
        bonus: "#ff00ff",
        hud: "#ffffff",
    };

    pub fn for_contrast(high_contrast: bool) -> &'static Palette {
        if high_contrast {
            &Self::HIGH_CONTRAST
        } else {
            &Self::STANDARD
        }
    }

    pub fn lane(&self, kind: LaneKind) -> &'static str {
        match kind {
            LaneKind::Goal => self.goal,
            LaneKind::Road => self.road,
            LaneKind::Water => self.water,
            LaneKind::Safe => self.safe,
        }
    }

    pub fn platform(&self, kind: PlatformKind, submerged: bool) -> &'static str {
        match (kind, submerged) {
            (PlatformKind::Log, _) => self.log,
            (PlatformKind::Turtle, false) => self.turtle,
            (PlatformKind::Turtle, true) => self.turtle_submerged,
        }
    }

    pub fn bonus(&self, kind: BonusKind) -> &'static str {
        match kind {
            BonusKind::Fly => self.bonus,
            BonusKind::Hitchhiker => self.goal_filled,
        }
    }
}

/// Body colour per vehicle type (same in every palette)
pub fn vehicle_color(kind: VehicleKind) -> &'static str {
    match kind {
        VehicleKind::Car => "#ffca28",
        VehicleKind::Truck => "#eceff1",
        VehicleKind::Racer => "#ec407a",
        VehicleKind::Bulldozer => "#8d6e63",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_bar_tracks_remaining_time() {
        assert_eq!(timer_bar_cells(1.0, 11.0), 11.0);
        assert_eq!(timer_bar_cells(0.5, 11.0), 5.5);
        assert_eq!(timer_bar_cells(-0.2, 11.0), 0.0);
        assert_eq!(timer_bar_cells(3.0, 11.0), 11.0);
    }

    #[test]
    fn test_cell_origin_scales() {
        assert_eq!(cell_origin(Vec2::new(2.5, 3.0), 40.0), Vec2::new(100.0, 120.0));
    }

    #[test]
    fn test_submerged_turtles_drawn_differently() {
        let p = Palette::for_contrast(false);
        assert_ne!(
            p.platform(PlatformKind::Turtle, false),
            p.platform(PlatformKind::Turtle, true)
        );
        assert_eq!(
            p.platform(PlatformKind::Log, true),
            p.platform(PlatformKind::Log, false)
        );
        assert_eq!(p.lane(LaneKind::Water), Palette::STANDARD.water);
        assert_eq!(Palette::for_contrast(true).water, "#0000ff");
    }
}
