//! The celebration played when a constellation is finalized.
//!
//! Five layers share one wall-clock timeline of [`COMPLETION_DURATION_MS`]:
//! the working lines flash twice and fade, three rings expand from the
//! centre, ambient particles twinkle across the surface, sparkles drift off
//! the constellation's stars, and a rotating circle-and-pentagon figure
//! fades in and out.

use super::shapes::{ease_out_quad, indented_pentagon, pentagon, triangle_pulse};
use crate::constants::{
    COMPLETION_AMBIENT_PARTICLES, COMPLETION_DECOR_PEAK, COMPLETION_DECOR_SIZE,
    COMPLETION_DURATION_MS, COMPLETION_FLASH_HALF_WIDTH, COMPLETION_FLASH_TIMES,
    COMPLETION_LINE_FADE_SPAN, COMPLETION_LINE_FADE_START, COMPLETION_PHASE_STEP,
    COMPLETION_SPARKLES_PER_STAR, COMPLETION_SPARKLE_LIFE_STEP, COMPLETION_WAVES,
    COMPLETION_WAVE_GROW_MS, COMPLETION_WAVE_RADIUS_SCALE, COMPLETION_WAVE_STAGGER_MS,
};
use crate::line::{LineStyle, StarLine};
use crate::star::Star;
use crate::surface::{Paint, Rgba, Surface};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::{PI, TAU};

const WARM_WHITE: Rgba = Rgba::rgb(1.0, 1.0, 220.0 / 255.0);
const PALE_GOLD: Rgba = Rgba::rgb(1.0, 1.0, 200.0 / 255.0);

#[derive(Clone, Debug, PartialEq)]
pub struct Wave {
    pub offset_ms: f64,
    pub max_radius: f32,
}

impl Wave {
    /// Radius and opacity `elapsed_ms` after the effect started, or `None`
    /// before this ring's start offset.
    pub fn at(&self, elapsed_ms: f64) -> Option<(f32, f32)> {
        let own = elapsed_ms - self.offset_ms;
        if own <= 0.0 {
            return None;
        }
        let t = (own / COMPLETION_WAVE_GROW_MS).min(1.0) as f32;
        Some((self.max_radius * ease_out_quad(t), (0.4 * (1.0 - t)).max(0.0)))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AmbientParticle {
    pub position: Vec2,
    pub size: f32,
    pub opacity: f32,
    pub speed: f32,
    pub angle: f32,
    pub twinkle_speed: f32,
    pub twinkle_phase: f32,
}

impl AmbientParticle {
    pub fn twinkle(&self) -> f32 {
        let s = self.twinkle_phase.sin();
        0.3 + 0.7 * s * s
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sparkle {
    pub position: Vec2,
    pub size: f32,
    pub opacity: f32,
    pub speed: f32,
    pub angle: f32,
    pub life: f32,
    pub hue: f32,
}

#[derive(Clone, Debug)]
pub struct CompletionEffect {
    pub started_ms: f64,
    pub duration_ms: f64,
    elapsed_ms: f64,
    surface: Vec2,
    pub waves: Vec<Wave>,
    pub particles: Vec<AmbientParticle>,
    pub sparkles: Vec<Sparkle>,
    pub phase: f32,
}

impl CompletionEffect {
    /// `star_positions` are the pixel positions of the stars that make up
    /// the finished constellation; each one seeds a handful of sparkles.
    pub fn new<R: Rng + ?Sized>(
        now_ms: f64,
        surface: Vec2,
        star_positions: &[Vec2],
        rng: &mut R,
    ) -> Self {
        let max_radius = surface.x.max(surface.y) * COMPLETION_WAVE_RADIUS_SCALE;
        let waves = (0..COMPLETION_WAVES)
            .map(|i| Wave {
                offset_ms: i as f64 * COMPLETION_WAVE_STAGGER_MS,
                max_radius,
            })
            .collect();

        let particles = (0..COMPLETION_AMBIENT_PARTICLES)
            .map(|_| AmbientParticle {
                position: Vec2::new(rng.gen::<f32>(), rng.gen::<f32>()) * surface,
                size: 1.0 + rng.gen::<f32>() * 3.0,
                opacity: 0.1 + rng.gen::<f32>() * 0.5,
                speed: 0.2 + rng.gen::<f32>() * 0.8,
                angle: rng.gen::<f32>() * TAU,
                twinkle_speed: 0.02 + rng.gen::<f32>() * 0.05,
                twinkle_phase: rng.gen::<f32>() * TAU,
            })
            .collect();

        let mut sparkles = Vec::with_capacity(star_positions.len() * COMPLETION_SPARKLES_PER_STAR);
        for &origin in star_positions {
            for _ in 0..COMPLETION_SPARKLES_PER_STAR {
                let angle = rng.gen::<f32>() * TAU;
                let dist = 5.0 + rng.gen::<f32>() * 50.0;
                sparkles.push(Sparkle {
                    position: origin + Vec2::new(angle.cos(), angle.sin()) * dist,
                    size: 2.0 + rng.gen::<f32>() * 3.0,
                    opacity: 0.6 + rng.gen::<f32>() * 0.4,
                    speed: 0.5 + rng.gen::<f32>() * 1.5,
                    angle,
                    life: 1.0,
                    hue: 40.0 + rng.gen::<f32>() * 20.0,
                });
            }
        }

        Self {
            started_ms: now_ms,
            duration_ms: COMPLETION_DURATION_MS,
            elapsed_ms: 0.0,
            surface,
            waves,
            particles,
            sparkles,
            phase: 0.0,
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn progress(&self) -> f32 {
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Step to wall-clock `now_ms`. Returns `false` once the duration has
    /// run out and the effect should be removed.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        let elapsed = now_ms - self.started_ms;
        if elapsed >= self.duration_ms {
            self.elapsed_ms = self.duration_ms;
            return false;
        }
        self.elapsed_ms = elapsed.max(0.0);
        self.phase += COMPLETION_PHASE_STEP;

        for p in &mut self.particles {
            p.twinkle_phase += p.twinkle_speed;
            p.position += Vec2::new(p.angle.cos(), p.angle.sin()) * p.speed * 0.2;
        }

        for i in (0..self.sparkles.len()).rev() {
            let s = &mut self.sparkles[i];
            s.position += Vec2::new(s.angle.cos(), s.angle.sin()) * s.speed;
            s.life -= COMPLETION_SPARKLE_LIFE_STEP;
            if s.life <= 0.0 {
                self.sparkles.remove(i);
            }
        }
        true
    }

    /// Strength of the two line flashes, 0..=1.
    pub fn glow_factor(&self) -> f32 {
        let d = self.duration_ms;
        COMPLETION_FLASH_TIMES
            .iter()
            .map(|t| triangle_pulse(self.elapsed_ms, d * t, d * COMPLETION_FLASH_HALF_WIDTH))
            .fold(0.0, f32::max)
    }

    /// 1 until half way, then linear down to 0 at 80% of the duration.
    pub fn line_fade_factor(&self) -> f32 {
        let start = self.duration_ms * COMPLETION_LINE_FADE_START;
        if self.elapsed_ms < start {
            return 1.0;
        }
        let span = self.duration_ms * COMPLETION_LINE_FADE_SPAN;
        (1.0 - (self.elapsed_ms - start) / span).max(0.0) as f32
    }

    /// Style a working line is drawn with at this point of the timeline.
    /// The second value is the extra outer-glow pass, if any.
    pub fn line_style(&self, base: &LineStyle) -> (LineStyle, Option<LineStyle>) {
        let glow = self.glow_factor();
        let fade = self.line_fade_factor();
        if glow > 0.1 {
            let opacity = (base.opacity * (fade + glow).min(1.0)).min(1.0);
            let lit = LineStyle {
                color: WARM_WHITE,
                opacity,
                width: base.width * (1.0 + glow * 3.0),
                shadow_blur: base.shadow_blur,
            };
            let aura = (glow > 0.5).then(|| LineStyle {
                color: PALE_GOLD.with_alpha(0.8),
                shadow_blur: lit.width * 2.0,
                ..lit
            });
            (lit, aura)
        } else {
            (
                LineStyle {
                    opacity: base.opacity * fade,
                    ..*base
                },
                None,
            )
        }
    }

    /// Opacity of the rotating figure: ramp to 0.4 by 40%, hold to 70%,
    /// quadratic decay to 0 at 95%. Hidden outside (10%, 95%).
    pub fn decor_opacity(progress: f32) -> Option<f32> {
        if progress <= 0.1 || progress >= 0.95 {
            return None;
        }
        let opacity = if progress < 0.4 {
            progress.min(COMPLETION_DECOR_PEAK)
        } else if progress < 0.7 {
            COMPLETION_DECOR_PEAK
        } else {
            let t = (progress - 0.7) / 0.25;
            COMPLETION_DECOR_PEAK * (1.0 - t * t)
        };
        Some(opacity)
    }

    pub fn draw(&self, surface: &mut dyn Surface, stars: &[Star], lines: &[StarLine]) {
        let progress = self.progress();
        let center = self.surface * 0.5;

        for line in lines {
            let (style, aura) = self.line_style(&line.style);
            if let Some(aura) = aura {
                line.draw_styled(surface, stars, &aura);
            }
            line.draw_styled(surface, stars, &style);
        }

        for wave in &self.waves {
            let Some((radius, opacity)) = wave.at(self.elapsed_ms) else {
                continue;
            };
            if opacity <= 0.0 {
                continue;
            }
            let edge_start = wave.max_radius * 0.7;
            let edge_fade = if radius > edge_start {
                1.0 - (radius - edge_start) / (wave.max_radius * 0.3)
            } else {
                1.0
            };
            surface.stroke_circle(
                center,
                radius,
                Paint::stroke(WARM_WHITE.with_alpha(opacity * 0.3 * edge_fade), 2.0),
            );
        }

        let envelope = if progress < 0.3 {
            progress / 0.3
        } else if progress > 0.7 {
            (1.0 - progress) / 0.3
        } else {
            1.0
        };
        for p in &self.particles {
            let twinkle = p.twinkle();
            let opacity = p.opacity * twinkle * envelope;
            if opacity > 0.0 {
                surface.fill_circle(
                    p.position,
                    p.size * twinkle,
                    Paint::fill(WARM_WHITE.with_alpha(opacity))
                        .with_glow(PALE_GOLD.with_alpha(opacity), p.size * 3.0),
                );
            }
        }

        let fade_in = if progress < 0.3 { progress / 0.3 } else { 1.0 };
        for s in &self.sparkles {
            let opacity = s.opacity * s.life * fade_in;
            if opacity > 0.0 {
                surface.fill_circle(
                    s.position,
                    s.size * s.life,
                    Paint::fill(Rgba::hsla(s.hue, 1.0, 0.8, opacity))
                        .with_glow(Rgba::hsla(s.hue, 1.0, 0.7, opacity), s.size * 2.0),
                );
            }
        }

        if let Some(opacity) = Self::decor_opacity(progress) {
            self.draw_decor(surface, center, opacity);
        }
    }

    fn draw_decor(&self, surface: &mut dyn Surface, center: Vec2, opacity: f32) {
        let size = self.surface.x.min(self.surface.y) * COMPLETION_DECOR_SIZE;
        let strong = Paint::stroke(PALE_GOLD.with_alpha(opacity), 1.0);
        let faint = Paint::stroke(PALE_GOLD.with_alpha(opacity * 0.4), 1.0);
        let rot = self.phase;

        surface.stroke_circle(center, size, strong);
        surface.stroke_circle(center, size * 0.95, faint);

        let depth = size * 0.1;
        surface.stroke_polyline(&indented_pentagon(center, size * 0.75, depth, rot), true, strong);
        surface.stroke_polyline(&indented_pentagon(center, size * 0.7, depth, rot), true, faint);

        let outer = size * 0.95;
        surface.stroke_polyline(&pentagon(center, outer, rot + PI / 5.0), true, faint);
        surface.stroke_polyline(&pentagon(center, outer, rot), true, faint);
    }
}
