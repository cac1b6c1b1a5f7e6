//! Canvas2D drawing of render snapshots

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wasm_bindgen::JsCast;

use super::palette::{Palette, cell_origin, timer_bar_cells, vehicle_color};
use crate::sim::RenderSnapshot;

/// Draws snapshots onto one canvas
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    cell_px: f32,
    pub high_contrast: bool,
}

impl CanvasRenderer {
    /// Size the canvas for a board of `cols` x `rows` and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement, cols: i32, rows: i32, cell_px: f32) -> Option<Self> {
        canvas.set_width((cols as f32 * cell_px) as u32);
        canvas.set_height((rows as f32 * cell_px) as u32);
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            cell_px,
            high_contrast: false,
        })
    }

    fn rect(&self, color: &str, pos: Vec2, width_cells: f32, height_cells: f32) {
        let origin = cell_origin(pos, self.cell_px);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            origin.x as f64,
            origin.y as f64,
            (width_cells * self.cell_px) as f64,
            (height_cells * self.cell_px) as f64,
        );
    }

    fn dot(&self, color: &str, center: Vec2, radius_cells: f32) {
        let c = cell_origin(center, self.cell_px);
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            c.x as f64,
            c.y as f64,
            (radius_cells * self.cell_px) as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }

    pub fn draw(&self, snap: &RenderSnapshot) {
        let palette = Palette::for_contrast(self.high_contrast);
        let cols = snap.cols as f32;

        for (row, lane) in snap.lanes.iter().enumerate() {
            self.rect(palette.lane(*lane), Vec2::new(0.0, row as f32), cols, 1.0);
        }

        for (slot, &col) in snap.goal_columns.iter().enumerate() {
            let color = if snap.goals[slot] {
                palette.goal_filled
            } else {
                palette.water
            };
            self.rect(color, Vec2::new(col as f32, 0.0), 1.0, 1.0);
        }

        for platform in &snap.platforms {
            let color = palette.platform(platform.kind, platform.submerged);
            let pos = Vec2::new(platform.col, platform.row as f32 + 0.1);
            self.rect(color, pos, platform.width, 0.8);
        }

        for predator in &snap.predators {
            let pos = Vec2::new(predator.col, predator.row as f32 + 0.1);
            self.rect(palette.predator, pos, 1.0, 0.8);
            if predator.mouth_open {
                self.rect(palette.mouth, pos + Vec2::new(0.6, 0.2), 0.4, 0.4);
            }
        }

        for vehicle in &snap.vehicles {
            let pos = Vec2::new(vehicle.col, vehicle.row as f32 + 0.15);
            self.rect(vehicle_color(vehicle.kind), pos, vehicle.width, 0.7);
        }

        for item in &snap.bonuses {
            let center = Vec2::new(item.col + 0.5, item.row as f32 + 0.5);
            self.dot(palette.bonus(item.kind), center, 0.2);
        }

        // Countdown along the bottom edge of the board
        let bottom = snap.lanes.len() as f32 - 0.1;
        let bar = timer_bar_cells(snap.time_fraction(), cols);
        self.rect(palette.hud, Vec2::new(0.0, bottom), bar, 0.1);

        if !snap.game_over {
            let center = snap.player.pos + Vec2::splat(0.5);
            self.dot(palette.player, center, 0.35);
        }
    }
}
