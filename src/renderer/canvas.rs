//! Browser canvas 2D backend

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{DrawContext, Surface};
use crate::Color;
use crate::error::RenderError;

fn js_err(e: JsValue) -> RenderError {
    RenderError::Backend(format!("{:?}", e))
}

/// `CanvasRenderingContext2d` adapter
pub struct CanvasContext {
    ctx: CanvasRenderingContext2d,
}

impl CanvasContext {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl DrawContext for CanvasContext {
    fn clear(&mut self, width: f32, height: f32) -> Result<(), RenderError> {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        Ok(())
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) -> Result<(), RenderError> {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
        Ok(())
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) -> Result<(), RenderError> {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        self.ctx
            .ellipse(center.x as f64, center.y as f64, radii.x as f64, radii.y as f64, 0.0, 0.0, TAU)
            .map_err(js_err)?;
        self.ctx.fill();
        Ok(())
    }

    fn fill_circles(&mut self, circles: &[(Vec2, f32)], color: Color) -> Result<(), RenderError> {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        for (center, radius) in circles {
            self.ctx
                .arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                .map_err(js_err)?;
        }
        self.ctx.fill();
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) -> Result<(), RenderError> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.fill();
        Ok(())
    }

    fn fill_vertical_gradient(
        &mut self,
        pos: Vec2,
        size: Vec2,
        top: Color,
        bottom: Color,
    ) -> Result<(), RenderError> {
        let gradient = self.ctx.create_linear_gradient(
            pos.x as f64,
            pos.y as f64,
            pos.x as f64,
            (pos.y + size.y) as f64,
        );
        gradient.add_color_stop(0.0, &top.to_css()).map_err(js_err)?;
        gradient.add_color_stop(1.0, &bottom.to_css()).map_err(js_err)?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx
            .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
        Ok(())
    }
}

/// An `HtmlCanvasElement` with fixed backing-store size
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

impl Surface for CanvasSurface {
    type Context = CanvasContext;

    fn width(&self) -> f32 {
        self.canvas.width() as f32
    }

    fn height(&self) -> f32 {
        self.canvas.height() as f32
    }

    fn context_2d(&self) -> Option<CanvasContext> {
        self.canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()
            .map(CanvasContext::new)
    }
}
