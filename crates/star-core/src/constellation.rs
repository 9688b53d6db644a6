use crate::line::StarLine;
use crate::star::Star;
use crate::surface::Surface;
use fnv::FnvHashSet;

/// A named, finished set of lines.
///
/// Stars are value copies taken at finalize time, in field order, so the
/// `StarId`s inside `lines` resolve against `stars()` and later changes to
/// the live field never leak into a finished constellation.
#[derive(Clone, Debug, PartialEq)]
pub struct Constellation {
    name: String,
    lines: Vec<StarLine>,
    stars: Vec<Star>,
    created_at_ms: f64,
}

impl Constellation {
    pub fn new(
        name: impl Into<String>,
        lines: Vec<StarLine>,
        stars: Vec<Star>,
        created_at_ms: f64,
    ) -> Self {
        Self {
            name: name.into(),
            lines,
            stars,
            created_at_ms,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[StarLine] {
        &self.lines
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn created_at_ms(&self) -> f64 {
        self.created_at_ms
    }

    /// At least one line and a non-blank name.
    pub fn is_valid(&self) -> bool {
        !self.lines.is_empty() && !self.name.trim().is_empty()
    }

    /// Number of distinct stars the lines touch.
    pub fn star_count(&self) -> usize {
        self.lines
            .iter()
            .flat_map(|l| [l.from, l.to])
            .collect::<FnvHashSet<_>>()
            .len()
    }

    /// Redraw onto any surface; pixel positions come from the stored ratios.
    pub fn draw(&self, surface: &mut dyn Surface) {
        for star in &self.stars {
            star.draw(surface);
        }
        for line in &self.lines {
            line.draw(surface, &self.stars);
        }
    }
}
