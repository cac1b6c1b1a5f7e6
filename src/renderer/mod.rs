//! Rendering module
//!
//! Draws `RenderSnapshot`s. The palette and layout math are portable; the
//! Canvas2D drawer only exists on wasm32.

pub mod palette;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use palette::{Palette, cell_origin};
