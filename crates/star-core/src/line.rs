use crate::constants::{LINE_DEFAULT_OPACITY, LINE_DEFAULT_SHADOW_BLUR, LINE_DEFAULT_WIDTH};
use crate::star::{Star, StarId};
use crate::surface::{Paint, Rgba, Surface};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Rgba,
    pub opacity: f32,
    pub width: f32,
    pub shadow_blur: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Rgba::WHITE,
            opacity: LINE_DEFAULT_OPACITY,
            width: LINE_DEFAULT_WIDTH,
            shadow_blur: LINE_DEFAULT_SHADOW_BLUR,
        }
    }
}

/// Connection between two stars. The stars are referenced by index into
/// whichever list is passed at draw time; the line never owns them.
#[derive(Clone, Debug, PartialEq)]
pub struct StarLine {
    pub from: StarId,
    pub to: StarId,
    pub style: LineStyle,
}

impl StarLine {
    pub fn new(from: StarId, to: StarId) -> Self {
        Self {
            from,
            to,
            style: LineStyle::default(),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, stars: &[Star]) {
        self.draw_styled(surface, stars, &self.style);
    }

    /// Draw with a caller-computed style; the line's own style is left
    /// untouched.
    pub fn draw_styled(&self, surface: &mut dyn Surface, stars: &[Star], style: &LineStyle) {
        let (Some(a), Some(b)) = (stars.get(self.from.0), stars.get(self.to.0)) else {
            log::warn!("line {:?}->{:?} references a missing star", self.from, self.to);
            return;
        };
        let size = surface.size();
        let color = style.color.faded(style.opacity);
        surface.stroke_line(
            a.position(size),
            b.position(size),
            Paint::stroke(color, style.width).with_glow(style.color, style.shadow_blur),
        );
    }
}
