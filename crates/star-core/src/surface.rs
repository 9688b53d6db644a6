//! Drawing primitives the scene renders through.
//!
//! The core never talks to a concrete canvas. Front-ends implement
//! [`Surface`] (the web crate wraps a `CanvasRenderingContext2d`); the
//! [`RecordingSurface`] keeps every call so headless runs and tests can
//! inspect what a frame would have drawn.

use glam::Vec2;
use std::fmt;

/// Straight (non-premultiplied) RGBA colour, channels in \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// `0xRRGGBB` packed colour, fully opaque.
    pub fn from_hex(hex: u32) -> Self {
        let ch = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(ch(16), ch(8), ch(0))
    }

    /// HSL colour with hue in degrees, saturation and lightness in \[0, 1\].
    pub fn hsla(hue_deg: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let h = hue_deg.rem_euclid(360.0) / 360.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        if s == 0.0 {
            return Self::new(l, l, l, alpha.clamp(0.0, 1.0));
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let channel = |t: f32| {
            let t = t.rem_euclid(1.0);
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            }
        };
        Self::new(
            channel(h + 1.0 / 3.0),
            channel(h),
            channel(h - 1.0 / 3.0),
            alpha.clamp(0.0, 1.0),
        )
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Multiply the existing alpha, used for global-alpha style fades.
    pub fn faded(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Rgba {
    /// CSS `rgba(r, g, b, a)` notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "rgba({}, {}, {}, {:.3})",
            to8(self.r),
            to8(self.g),
            to8(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }
}

/// Soft blurred halo drawn around a primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub color: Rgba,
    pub blur: f32,
}

/// Colour, stroke width and optional glow for a single primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub color: Rgba,
    pub width: f32,
    pub glow: Option<Glow>,
}

impl Paint {
    pub fn fill(color: Rgba) -> Self {
        Self {
            color,
            width: 0.0,
            glow: None,
        }
    }

    pub fn stroke(color: Rgba, width: f32) -> Self {
        Self {
            color,
            width,
            glow: None,
        }
    }

    pub fn with_glow(self, color: Rgba, blur: f32) -> Self {
        Self {
            glow: Some(Glow { color, blur }),
            ..self
        }
    }
}

/// One colour stop of a gradient, `offset` in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Immediate-mode drawing target. Coordinates are surface pixels with the
/// origin at the top-left corner.
pub trait Surface {
    fn size(&self) -> Vec2;
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, paint: Paint);
    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, paint: Paint);
    fn stroke_polyline(&mut self, points: &[Vec2], closed: bool, paint: Paint);
    /// Fill a disc of `outer` radius with a radial gradient running from
    /// `inner` to `outer`.
    fn fill_radial_gradient(&mut self, center: Vec2, inner: f32, outer: f32, stops: &[GradientStop]);

    #[inline]
    fn stroke_line(&mut self, from: Vec2, to: Vec2, paint: Paint) {
        self.stroke_polyline(&[from, to], false, paint);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillCircle {
        center: Vec2,
        radius: f32,
        paint: Paint,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        paint: Paint,
    },
    StrokeEllipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        paint: Paint,
    },
    Polyline {
        points: Vec<Vec2>,
        closed: bool,
        paint: Paint,
    },
    RadialGradient {
        center: Vec2,
        inner: f32,
        outer: f32,
        stops: Vec<GradientStop>,
    },
}

impl DrawCommand {
    pub fn paint(&self) -> Option<&Paint> {
        match self {
            DrawCommand::Clear | DrawCommand::RadialGradient { .. } => None,
            DrawCommand::FillCircle { paint, .. }
            | DrawCommand::StrokeCircle { paint, .. }
            | DrawCommand::StrokeEllipse { paint, .. }
            | DrawCommand::Polyline { paint, .. } => Some(paint),
        }
    }
}

/// Surface that only remembers what was drawn.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    size: Vec2,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands issued since the most recent `clear`.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            paint,
        });
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, paint: Paint) {
        self.commands.push(DrawCommand::StrokeEllipse {
            center,
            radii,
            rotation,
            paint,
        });
    }

    fn stroke_polyline(&mut self, points: &[Vec2], closed: bool, paint: Paint) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            closed,
            paint,
        });
    }

    fn fill_radial_gradient(&mut self, center: Vec2, inner: f32, outer: f32, stops: &[GradientStop]) {
        self.commands.push(DrawCommand::RadialGradient {
            center,
            inner,
            outer,
            stops: stops.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_hsl_agree_on_primaries() {
        let red = Rgba::hsla(0.0, 1.0, 0.5, 1.0);
        assert!((red.r - 1.0).abs() < 1e-5 && red.g.abs() < 1e-5 && red.b.abs() < 1e-5);
        let sky = Rgba::from_hex(0x87ceeb);
        assert_eq!(sky.to_string(), "rgba(135, 206, 235, 1.000)");
    }

    #[test]
    fn last_frame_starts_after_latest_clear() {
        let mut s = RecordingSurface::new(10.0, 10.0);
        s.fill_circle(Vec2::ZERO, 1.0, Paint::fill(Rgba::WHITE));
        s.clear();
        s.stroke_line(Vec2::ZERO, Vec2::ONE, Paint::stroke(Rgba::WHITE, 1.0));
        assert_eq!(s.last_frame().len(), 1);
        assert_eq!(s.commands().len(), 3);
    }
}
