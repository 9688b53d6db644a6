//! Short burst played where a star was tapped: one expanding ring plus a
//! handful of falling sparks.

use crate::constants::{
    TAP_DOTS_MIN_RADIUS, TAP_INITIAL_ALPHA, TAP_LINE_WIDTH, TAP_MAX_RADIUS,
    TAP_PARTICLES_MAX, TAP_PARTICLES_MIN, TAP_PARTICLE_GRAVITY, TAP_PARTICLE_LIFE_STEP, TAP_SPEED,
};
use crate::surface::{Paint, Rgba, Surface};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct TapCircle {
    pub origin: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub alpha: f32,
    pub line_width: f32,
    pub speed: f32,
    // Radial spread of the orbiting dots, fixed at spawn.
    dot_spread: [f32; 4],
}

#[derive(Clone, Debug, PartialEq)]
pub struct TapParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub max_size: f32,
    pub alpha: f32,
    pub life: f32,
    pub max_life: f32,
    pub hue: f32,
    pub gravity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TapEffect {
    Circle(TapCircle),
    Particle(TapParticle),
}

impl TapEffect {
    /// One ring and 4–6 particles fanning out from `origin`.
    pub fn burst<R: Rng + ?Sized>(origin: Vec2, rng: &mut R) -> Vec<TapEffect> {
        let count = rng.gen_range(TAP_PARTICLES_MIN..=TAP_PARTICLES_MAX);
        let mut out = Vec::with_capacity(count + 1);
        out.push(TapEffect::Circle(TapCircle {
            origin,
            radius: 0.0,
            max_radius: TAP_MAX_RADIUS,
            alpha: TAP_INITIAL_ALPHA,
            line_width: TAP_LINE_WIDTH,
            speed: TAP_SPEED,
            dot_spread: std::array::from_fn(|_| rng.gen::<f32>()),
        }));
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32 + rng.gen::<f32>() * 0.5;
            let dir = Vec2::new(angle.cos(), angle.sin());
            let speed = Vec2::new(1.5 + rng.gen::<f32>() * 2.0, 1.5 + rng.gen::<f32>() * 2.0);
            let life = 15.0 + rng.gen::<f32>() * 15.0;
            out.push(TapEffect::Particle(TapParticle {
                position: origin,
                velocity: dir * speed,
                size: 1.0 + rng.gen::<f32>(),
                max_size: (1.0 + rng.gen::<f32>()) * 1.5,
                alpha: 0.9,
                life,
                max_life: life,
                hue: rng.gen::<f32>() * 60.0,
                gravity: TAP_PARTICLE_GRAVITY,
            }));
        }
        out
    }

    /// Step one frame. Returns `false` once the effect should be removed.
    pub fn advance(&mut self) -> bool {
        match self {
            TapEffect::Circle(c) => {
                let progress = c.radius / c.max_radius;
                // Grows fast at first and eases as it nears the max radius.
                c.radius += (10.0 * (1.0 - progress).powi(2) + 1.0) * c.speed;
                c.alpha -= 0.02 + progress * 0.08;
                c.alpha > 0.0 && c.radius < c.max_radius
            }
            TapEffect::Particle(p) => {
                p.position += p.velocity;
                p.velocity.y += p.gravity;
                p.life -= TAP_PARTICLE_LIFE_STEP;
                let remaining = (p.life / p.max_life).max(0.0);
                p.alpha = remaining * 0.9;
                p.size = p.max_size * (remaining * 2.0).min(1.0);
                p.life > 0.0
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, time_sec: f32) {
        match self {
            TapEffect::Circle(c) => draw_circle(surface, c, time_sec),
            TapEffect::Particle(p) => draw_particle(surface, p),
        }
    }
}

fn draw_circle(surface: &mut dyn Surface, c: &TapCircle, time_sec: f32) {
    let hue = (time_sec * 30.0) % 360.0 + 60.0;
    let distortion = 1.0 + (time_sec * 5.0).sin() * 0.03;
    surface.stroke_ellipse(
        c.origin,
        Vec2::new(c.radius, c.radius * distortion),
        time_sec % TAU,
        Paint::stroke(Rgba::hsla(hue, 1.0, 0.7, c.alpha), c.line_width),
    );
    if c.radius > TAP_DOTS_MIN_RADIUS {
        let dots = (c.radius / 5.0).floor() as usize;
        let dot = Paint::fill(Rgba::WHITE.with_alpha(c.alpha * 0.7));
        for i in 0..dots {
            let angle = TAU * i as f32 / dots as f32 + time_sec;
            let dist = c.radius * 0.7 * c.dot_spread[i % c.dot_spread.len()];
            surface.fill_circle(c.origin + Vec2::new(angle.cos(), angle.sin()) * dist, 0.5, dot);
        }
    }
}

fn draw_particle(surface: &mut dyn Surface, p: &TapParticle) {
    let brightness = (p.life / (p.max_life * 0.3)).clamp(0.0, 1.0);
    surface.fill_circle(
        p.position,
        p.size,
        Paint::fill(Rgba::hsla(p.hue, 0.8, 0.7 + brightness * 0.3, p.alpha))
            .with_glow(Rgba::hsla(p.hue, 1.0, 0.7, p.alpha), p.size * 2.0),
    );
}
