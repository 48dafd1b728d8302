//! Draw context that records commands instead of rasterizing

use glam::Vec2;

use super::{DrawContext, Surface};
use crate::Color;
use crate::error::RenderError;

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    Rect { pos: Vec2, size: Vec2, color: Color },
    Ellipse { center: Vec2, radii: Vec2, color: Color },
    Circles { circles: Vec<(Vec2, f32)>, color: Color },
    Polygon { points: Vec<Vec2>, color: Color },
    Gradient { pos: Vec2, size: Vec2, top: Color, bottom: Color },
}

/// Records every draw call; can be told to fail
#[derive(Debug, Default)]
pub struct RecordingContext {
    pub commands: Vec<DrawCommand>,
    failing: bool,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent draw call fail
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    fn push(&mut self, command: DrawCommand) -> Result<(), RenderError> {
        if self.failing {
            return Err(RenderError::Backend("recording context set to fail".into()));
        }
        self.commands.push(command);
        Ok(())
    }
}

impl DrawContext for RecordingContext {
    fn clear(&mut self, width: f32, height: f32) -> Result<(), RenderError> {
        self.push(DrawCommand::Clear { width, height })
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) -> Result<(), RenderError> {
        self.push(DrawCommand::Rect { pos, size, color })
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) -> Result<(), RenderError> {
        self.push(DrawCommand::Ellipse { center, radii, color })
    }

    fn fill_circles(&mut self, circles: &[(Vec2, f32)], color: Color) -> Result<(), RenderError> {
        self.push(DrawCommand::Circles {
            circles: circles.to_vec(),
            color,
        })
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) -> Result<(), RenderError> {
        self.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        })
    }

    fn fill_vertical_gradient(
        &mut self,
        pos: Vec2,
        size: Vec2,
        top: Color,
        bottom: Color,
    ) -> Result<(), RenderError> {
        self.push(DrawCommand::Gradient { pos, size, top, bottom })
    }
}

/// Fixed-size surface handing out recording contexts
#[derive(Debug, Clone, Copy)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    /// When false, `context_2d` returns `None`
    pub available: bool,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            available: true,
        }
    }

    /// A surface whose context cannot be obtained
    pub fn unavailable(width: f32, height: f32) -> Self {
        Self {
            available: false,
            ..Self::new(width, height)
        }
    }
}

impl Surface for RecordingSurface {
    type Context = RecordingContext;

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn context_2d(&self) -> Option<RecordingContext> {
        self.available.then(RecordingContext::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut ctx = RecordingContext::new();
        ctx.clear(10.0, 10.0).unwrap();
        ctx.fill_rect(Vec2::ZERO, Vec2::ONE, Color::WHITE).unwrap();
        assert_eq!(ctx.commands.len(), 2);
        assert_eq!(ctx.commands[0], DrawCommand::Clear { width: 10.0, height: 10.0 });
        assert_eq!(ctx.take().len(), 2);
        assert!(ctx.commands.is_empty());
    }

    #[test]
    fn test_failing_context() {
        let mut ctx = RecordingContext::new();
        ctx.set_failing(true);
        let err = ctx.fill_polygon(&[Vec2::ZERO], Color::WHITE).unwrap_err();
        assert!(matches!(err, RenderError::Backend(_)));
        assert!(ctx.commands.is_empty());
    }

    #[test]
    fn test_unavailable_surface() {
        assert!(RecordingSurface::new(1.0, 1.0).context_2d().is_some());
        assert!(RecordingSurface::unavailable(1.0, 1.0).context_2d().is_none());
    }
}
