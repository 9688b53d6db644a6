//! Selection, connection and finalisation of constellations.

use crate::constants::{MAX_STORED_INDEX, MAX_WORKING_LINES, NAME_SUFFIX};
use crate::constellation::Constellation;
use crate::error::Rejection;
use crate::field::StarField;
use crate::line::StarLine;
use crate::star::StarId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    /// Input is gated off (playback paused).
    Ignored,
    Selected(StarId),
    /// Same note as the current selection; nothing changes.
    SameNote,
    Connected { from: StarId, to: StarId },
}

pub struct ConstellationBuilder {
    selected: Option<StarId>,
    working_lines: Vec<StarLine>,
    completed: Vec<Constellation>,
    pending_name: String,
    input_enabled: bool,
    // Lines are kept after finalize until the completion effect ends.
    awaiting_effect: bool,
}

impl Default for ConstellationBuilder {
    fn default() -> Self {
        Self {
            selected: None,
            working_lines: Vec::new(),
            completed: Vec::new(),
            pending_name: String::new(),
            input_enabled: true,
            awaiting_effect: false,
        }
    }
}

impl ConstellationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<StarId> {
        self.selected
    }

    pub fn working_lines(&self) -> &[StarLine] {
        &self.working_lines
    }

    pub fn completed(&self) -> &[Constellation] {
        &self.completed
    }

    /// Stored name including the suffix, if one has been set.
    pub fn name(&self) -> Option<&str> {
        (!self.pending_name.is_empty()).then_some(self.pending_name.as_str())
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    pub fn awaiting_effect(&self) -> bool {
        self.awaiting_effect
    }

    pub fn can_finalize(&self) -> bool {
        self.input_enabled
            && !self.awaiting_effect
            && !self.pending_name.is_empty()
            && !self.working_lines.is_empty()
    }

    pub fn can_clear(&self) -> bool {
        self.input_enabled && !self.awaiting_effect
    }

    /// A star was picked on the canvas.
    ///
    /// The first hit selects, the second connects the pair and clears the
    /// selection. Hitting a star with the selection's note is ignored.
    /// At the line ceiling the pending selection is dropped and the hit is
    /// rejected without marking the hit star clicked.
    pub fn on_star_hit(
        &mut self,
        field: &mut StarField,
        hit: StarId,
    ) -> Result<HitOutcome, Rejection> {
        if !self.input_enabled {
            return Ok(HitOutcome::Ignored);
        }
        let Some(hit_note) = field.star(hit).map(|s| s.note) else {
            return Ok(HitOutcome::Ignored);
        };

        let Some(selected) = self.selected else {
            mark_clicked(field, hit, true);
            self.selected = Some(hit);
            return Ok(HitOutcome::Selected(hit));
        };

        if field.star(selected).map(|s| s.note) == Some(hit_note) {
            return Ok(HitOutcome::SameNote);
        }

        if self.working_lines.len() >= MAX_WORKING_LINES {
            mark_clicked(field, selected, false);
            self.selected = None;
            return Err(Rejection::TooManyLines);
        }

        mark_clicked(field, hit, true);
        self.working_lines.push(StarLine::new(selected, hit));
        self.selected = None;
        log::debug!(
            "[builder] line {} connects {:?} -> {:?}",
            self.working_lines.len(),
            selected,
            hit
        );
        Ok(HitOutcome::Connected {
            from: selected,
            to: hit,
        })
    }

    /// Trim and store the name with the constellation suffix. Blank input
    /// is ignored and returns `None`.
    pub fn set_name(&mut self, raw: &str) -> Option<&str> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.pending_name = format!("{trimmed}{NAME_SUFFIX}");
        Some(&self.pending_name)
    }

    /// Snapshot the working lines and the whole field into a new
    /// constellation.
    ///
    /// Returns `Ok(None)` when there is nothing to finalize. The working
    /// lines stay in place (for the completion effect to light up) until
    /// [`release_working_lines`](Self::release_working_lines) is called.
    pub fn finalize(
        &mut self,
        field: &mut StarField,
        created_at_ms: f64,
    ) -> Result<Option<&Constellation>, Rejection> {
        if self.pending_name.is_empty() || self.working_lines.is_empty() {
            return Ok(None);
        }
        if self.completed.len() > MAX_STORED_INDEX {
            return Err(Rejection::TooManyConstellations);
        }

        let constellation = Constellation::new(
            self.pending_name.clone(),
            self.working_lines.clone(),
            field.stars().iter().map(|s| s.snapshot()).collect(),
            created_at_ms,
        );
        if !constellation.is_valid() {
            return Ok(None);
        }
        log::debug!(
            "[builder] finalized `{}` with {} lines ({} stored)",
            constellation.name(),
            constellation.lines().len(),
            self.completed.len() + 1
        );
        self.completed.push(constellation);

        self.selected = None;
        field.clear_clicked();
        self.pending_name.clear();
        self.awaiting_effect = true;
        Ok(self.completed.last())
    }

    /// Drop the working set. Refused while a completion effect is playing.
    pub fn clear(&mut self, field: &mut StarField) -> bool {
        if self.awaiting_effect {
            return false;
        }
        self.working_lines.clear();
        self.selected = None;
        field.clear_clicked();
        true
    }

    /// Called when the completion effect ends.
    pub fn release_working_lines(&mut self) {
        self.working_lines.clear();
        self.awaiting_effect = false;
    }

    /// Forget everything, including finished constellations.
    pub fn reset(&mut self) {
        self.selected = None;
        self.working_lines.clear();
        self.completed.clear();
        self.pending_name.clear();
        self.awaiting_effect = false;
    }
}

fn mark_clicked(field: &mut StarField, id: StarId, clicked: bool) {
    if let Some(star) = field.star_mut(id) {
        star.clicked = clicked;
    }
}
