//! Immediate-mode 2D rendering
//!
//! The engine draws through [`DrawContext`], a handful of filled primitives.
//! On the web this is the canvas 2D context; tests and headless runs use
//! [`RecordingContext`].

pub mod recording;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

use crate::Color;
use crate::error::RenderError;

pub use recording::{DrawCommand, RecordingContext, RecordingSurface};
pub use scene::draw_scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasContext, CanvasSurface};

/// Filled drawing primitives
pub trait DrawContext {
    /// Clear the whole surface to transparent
    fn clear(&mut self, width: f32, height: f32) -> Result<(), RenderError>;

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) -> Result<(), RenderError>;

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) -> Result<(), RenderError>;

    /// Fill several circles as one path (overlaps do not double the alpha)
    fn fill_circles(&mut self, circles: &[(Vec2, f32)], color: Color) -> Result<(), RenderError>;

    /// Fill a closed polygon path
    fn fill_polygon(&mut self, points: &[Vec2], color: Color) -> Result<(), RenderError>;

    /// Fill a rect with a two-stop gradient from `top` to `bottom`
    fn fill_vertical_gradient(
        &mut self,
        pos: Vec2,
        size: Vec2,
        top: Color,
        bottom: Color,
    ) -> Result<(), RenderError>;
}

/// Something the engine can draw on
pub trait Surface {
    type Context: DrawContext;

    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Acquire the 2D context; `None` if the surface cannot provide one
    fn context_2d(&self) -> Option<Self::Context>;
}
