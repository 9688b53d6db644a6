use glam::Vec2;
use star_core::{GradientStop, Paint, Rgba, Surface};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// [`Surface`] backed by a canvas 2D context.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
            .ok_or_else(|| anyhow::anyhow!("canvas has no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    fn apply_glow(&self, paint: &Paint) {
        match paint.glow {
            Some(glow) => {
                self.ctx.set_shadow_color(&glow.color.to_string());
                self.ctx.set_shadow_blur(glow.blur as f64);
            }
            None => self.clear_glow(),
        }
    }

    fn clear_glow(&self) {
        self.ctx.set_shadow_color(&Rgba::TRANSPARENT.to_string());
        self.ctx.set_shadow_blur(0.0);
    }

    fn apply_stroke(&self, paint: &Paint) {
        self.apply_glow(paint);
        self.ctx.set_stroke_style_str(&paint.color.to_string());
        self.ctx.set_line_width(paint.width as f64);
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        self.apply_glow(&paint);
        self.ctx.set_fill_style_str(&paint.color.to_string());
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        self.apply_stroke(&paint);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.stroke();
        }
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, paint: Paint) {
        self.apply_stroke(&paint);
        self.ctx.begin_path();
        if self
            .ctx
            .ellipse(
                center.x as f64,
                center.y as f64,
                radii.x.max(0.0) as f64,
                radii.y.max(0.0) as f64,
                rotation as f64,
                0.0,
                TAU,
            )
            .is_ok()
        {
            self.ctx.stroke();
        }
    }

    fn stroke_polyline(&mut self, points: &[Vec2], closed: bool, paint: Paint) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.apply_stroke(&paint);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        if closed {
            self.ctx.close_path();
        }
        self.ctx.stroke();
    }

    fn fill_radial_gradient(&mut self, center: Vec2, inner: f32, outer: f32, stops: &[GradientStop]) {
        let (x, y) = (center.x as f64, center.y as f64);
        let outer = outer.max(0.0);
        let inner = inner.clamp(0.0, outer) as f64;
        let outer = outer as f64;
        let Ok(gradient) = self.ctx.create_radial_gradient(x, y, inner, x, y, outer) else {
            return;
        };
        for stop in stops {
            let _ = gradient.add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.to_string());
        }
        self.clear_glow();
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.begin_path();
        if self.ctx.arc(x, y, outer, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }
}
