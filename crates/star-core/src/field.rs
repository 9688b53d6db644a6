//! The fixed grid of stars and its per-frame spectral update.

use crate::constants::{
    BASE_NOTE, FIELD_COLS, FIELD_ROWS, LAYOUT_JITTER, STAR_FADE_STEP, STAR_SUPPRESSED_FADE_STEP,
};
use crate::spectrum::{chord_highlight, NoteId, SpectralFrame};
use crate::star::{Star, StarId};
use crate::surface::{Rgba, Surface};
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub rows: usize,
    pub cols: usize,
    pub base_note: u16,
    /// Random offset per axis as a fraction of one cell.
    pub jitter: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            rows: FIELD_ROWS,
            cols: FIELD_COLS,
            base_note: BASE_NOTE,
            jitter: LAYOUT_JITTER,
        }
    }
}

pub struct StarField {
    pub config: FieldConfig,
    stars: Vec<Star>,
    size: Vec2,
}

impl StarField {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            stars: Vec::new(),
            size: Vec2::ONE,
        }
    }

    /// Lay out `rows x cols` stars, one per grid cell with a small random
    /// offset. Notes count up row-major starting from the bottom row, and
    /// every star starts dark. Layout stops early if the notes would run
    /// past `u16::MAX`.
    pub fn initialize<R: Rng + ?Sized>(&mut self, width: f32, height: f32, rng: &mut R) {
        let FieldConfig {
            rows,
            cols,
            base_note,
            jitter,
        } = self.config;
        self.size = Vec2::new(width.max(1.0), height.max(1.0));
        self.stars.clear();
        self.stars.reserve(rows * cols);

        let cell = Vec2::new(1.0 / cols.max(1) as f32, 1.0 / rows.max(1) as f32);
        let mut next_note = Some(base_note);
        'layout: for row in (0..rows).rev() {
            for col in 0..cols {
                let Some(note) = next_note else {
                    log::warn!(
                        "[field] notes exhausted after {} of {} stars",
                        self.stars.len(),
                        rows * cols
                    );
                    break 'layout;
                };
                let center = Vec2::new(col as f32 + 0.5, row as f32 + 0.5) * cell;
                let offset = Vec2::new(
                    rng.gen_range(-jitter..=jitter),
                    rng.gen_range(-jitter..=jitter),
                ) * cell;
                self.stars.push(Star::new(center + offset, NoteId(note)));
                next_note = note.checked_add(1);
            }
        }
        log::info!(
            "[field] {} stars laid out on {:.0}x{:.0} (n{}..n{})",
            self.stars.len(),
            self.size.x,
            self.size.y,
            base_note,
            self.stars.last().map_or(base_note, |s| s.note.midi())
        );
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width.max(1.0), height.max(1.0));
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn star(&self, id: StarId) -> Option<&Star> {
        self.stars.get(id.0)
    }

    pub fn star_mut(&mut self, id: StarId) -> Option<&mut Star> {
        self.stars.get_mut(id.0)
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Apply one spectral frame. `suppress` is set while a completion
    /// effect plays: every star then fades out and loses its click mark.
    pub fn update(&mut self, frame: Option<&SpectralFrame>, chord: &str, suppress: bool) {
        let Some(frame) = frame else {
            return;
        };
        let top = frame.top_notes();
        let strongest = top.first().map(|(note, _)| *note);
        let highlight = chord_highlight(chord);

        for star in &mut self.stars {
            if suppress {
                if star.visible {
                    star.fade(STAR_SUPPRESSED_FADE_STEP);
                }
                star.clicked = false;
                continue;
            }
            if star.clicked {
                star.visible = true;
                continue;
            }
            if top.iter().any(|(note, _)| *note == star.note) {
                let level = frame.intensity(star.note).unwrap_or(1.0);
                star.opacity = if level.is_finite() {
                    level.clamp(0.0, 1.0)
                } else {
                    1.0
                };
                star.color = if strongest == Some(star.note) {
                    highlight
                } else {
                    Rgba::WHITE
                };
                star.visible = true;
            } else {
                star.fade(STAR_FADE_STEP);
            }
        }
    }

    /// Nearest visible star strictly closer than `max_radius` to `point`
    /// (surface pixels).
    pub fn hit_test(&self, point: Vec2, max_radius: f32) -> Option<StarId> {
        let mut best: Option<(StarId, f32)> = None;
        for (i, star) in self.stars.iter().enumerate() {
            if !star.visible {
                continue;
            }
            let dist = star.position(self.size).distance(point);
            if dist < max_radius && best.map_or(true, |(_, d)| dist < d) {
                best = Some((StarId(i), dist));
            }
        }
        best.map(|(id, _)| id)
    }

    /// One column width, the pick radius the canvas uses.
    pub fn default_hit_radius(&self) -> f32 {
        self.size.x / self.config.cols.max(1) as f32
    }

    pub fn clear_clicked(&mut self) {
        for star in &mut self.stars {
            star.clicked = false;
        }
    }

    /// Put every star back to dark and unclicked, keeping the layout.
    pub fn reset(&mut self) {
        for star in &mut self.stars {
            star.visible = false;
            star.clicked = false;
            star.opacity = 0.0;
            star.color = Rgba::WHITE;
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for star in &self.stars {
            star.draw(surface);
        }
    }
}

impl Default for StarField {
    fn default() -> Self {
        Self::new(FieldConfig::default())
    }
}
