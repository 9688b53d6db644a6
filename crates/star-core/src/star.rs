use crate::constants::{
    HIGHLIGHT_RADIUS_DIVISOR, STAR_HALO_ALPHA, STAR_RADIUS_DIVISOR, STAR_SHADOW_BLUR,
};
use crate::spectrum::NoteId;
use crate::surface::{GradientStop, Paint, Rgba, Surface};
use glam::Vec2;

/// Index of a star inside the list that owns it (the live field, or a
/// constellation's snapshot of it).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StarId(pub usize);

/// One note channel placed on the sky.
///
/// Position is stored as ratios of the surface size so the same star can
/// be drawn on the live canvas and on any gallery thumbnail.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub ratio: Vec2,
    pub note: NoteId,
    pub opacity: f32,
    pub color: Rgba,
    pub visible: bool,
    pub clicked: bool,
}

impl Star {
    pub fn new(ratio: Vec2, note: NoteId) -> Self {
        Self {
            ratio,
            note,
            opacity: 0.0,
            color: Rgba::WHITE,
            visible: false,
            clicked: false,
        }
    }

    /// Value copy carrying only what a finished constellation needs.
    pub fn snapshot(&self) -> Star {
        Star {
            ratio: self.ratio,
            note: self.note,
            opacity: self.opacity,
            color: self.color,
            visible: false,
            clicked: false,
        }
    }

    #[inline]
    pub fn position(&self, surface_size: Vec2) -> Vec2 {
        self.ratio * surface_size
    }

    /// Lower opacity by `step`, hiding the star once it reaches zero.
    pub fn fade(&mut self, step: f32) {
        self.opacity -= step;
        if self.opacity <= 0.0 {
            self.opacity = 0.0;
            self.visible = false;
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if self.opacity <= 0.0 {
            return;
        }
        let size = surface.size();
        let center = self.position(size);
        let r = size.x / STAR_RADIUS_DIVISOR;
        let body = self.color.faded(self.opacity);
        surface.fill_circle(
            center,
            r,
            Paint::fill(body).with_glow(body, STAR_SHADOW_BLUR),
        );
        surface.fill_circle(
            center,
            r * 2.0,
            Paint::fill(Rgba::WHITE.with_alpha(STAR_HALO_ALPHA * self.opacity)),
        );
    }

    /// Pulsing, hue-cycling ring marking the currently selected star.
    pub fn highlight(&self, surface: &mut dyn Surface, time_sec: f32) {
        let size = surface.size();
        let center = self.position(size);
        let r = size.x / HIGHLIGHT_RADIUS_DIVISOR;
        let hue = (time_sec * 15.0) % 360.0;

        let glow_radius = r * (1.2 + (time_sec * 2.0).sin() * 0.2);
        surface.fill_radial_gradient(
            center,
            r * 0.2,
            glow_radius,
            &[
                GradientStop::new(0.0, Rgba::hsla(hue, 1.0, 0.7, 0.7)),
                GradientStop::new(0.7, Rgba::hsla(hue, 1.0, 0.7, 0.3)),
                GradientStop::new(1.0, Rgba::hsla(hue, 1.0, 0.7, 0.0)),
            ],
        );

        let pulse = r * (1.5 + (time_sec * 3.0).sin() * 0.2);
        surface.stroke_circle(
            center,
            pulse,
            Paint::stroke(Rgba::hsla(hue, 1.0, 0.8, 0.6), size.x / 600.0)
                .with_glow(Rgba::hsla(hue, 1.0, 0.8, 0.8), size.x / 200.0),
        );
    }
}
