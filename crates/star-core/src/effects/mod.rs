pub mod completion;
pub mod shapes;
pub mod tap;

pub use completion::CompletionEffect;
pub use tap::{TapCircle, TapEffect, TapParticle};

use crate::line::StarLine;
use crate::star::Star;
use crate::surface::Surface;
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectEvent {
    /// A completion effect ran out its duration and was removed.
    CompletionFinished,
}

/// Owns every running effect. Tap effects advance per frame; completion
/// effects follow the wall clock.
///
/// Star suppression keys off "any completion effect running", so at most
/// one is expected at a time. A second one started mid-animation simply
/// overlaps the first.
#[derive(Default)]
pub struct EffectEngine {
    taps: Vec<TapEffect>,
    completions: Vec<CompletionEffect>,
}

impl EffectEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn taps(&self) -> &[TapEffect] {
        &self.taps
    }

    pub fn completions(&self) -> &[CompletionEffect] {
        &self.completions
    }

    pub fn completion_active(&self) -> bool {
        !self.completions.is_empty()
    }

    pub fn spawn_tap<R: Rng + ?Sized>(&mut self, at: Vec2, rng: &mut R) {
        self.taps.extend(TapEffect::burst(at, rng));
    }

    pub fn start_completion<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        surface: Vec2,
        star_positions: &[Vec2],
        rng: &mut R,
    ) {
        if self.completion_active() {
            log::warn!("[effects] completion started while another is still running");
        }
        self.completions
            .push(CompletionEffect::new(now_ms, surface, star_positions, rng));
    }

    /// Advance every effect and drop the expired ones.
    pub fn update(&mut self, now_ms: f64) -> Vec<EffectEvent> {
        for i in (0..self.taps.len()).rev() {
            if !self.taps[i].advance() {
                self.taps.remove(i);
            }
        }

        let mut events = Vec::new();
        for i in (0..self.completions.len()).rev() {
            if !self.completions[i].advance(now_ms) {
                self.completions.remove(i);
                log::debug!("[effects] completion finished");
                events.push(EffectEvent::CompletionFinished);
            }
        }
        events
    }

    pub fn draw_taps(&self, surface: &mut dyn Surface, time_sec: f32) {
        for tap in &self.taps {
            tap.draw(surface, time_sec);
        }
    }

    /// Completion layers, including the glowing working lines.
    pub fn draw_completions(&self, surface: &mut dyn Surface, stars: &[Star], lines: &[StarLine]) {
        for effect in &self.completions {
            effect.draw(surface, stars, lines);
        }
    }

    /// Drop everything at once (song switch or field reset).
    pub fn clear(&mut self) {
        self.taps.clear();
        self.completions.clear();
    }
}
