//! The composed scene: star field, builder and effects behind one handle.
//!
//! Front-ends call into the scene once per input or tick and get back the
//! list of [`SceneEvent`]s the UI should react to. No state is shared
//! through globals or broadcast events.

use crate::builder::{ConstellationBuilder, HitOutcome};
use crate::constants::DEFAULT_NAME_PROMPT;
use crate::constellation::Constellation;
use crate::effects::{EffectEngine, EffectEvent};
use crate::field::{FieldConfig, StarField};
use crate::spectrum::SpectralFrame;
use crate::star::StarId;
use crate::surface::Surface;
use fnv::FnvHashSet;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Which companion artwork the UI shows next to the sky.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Companion {
    #[default]
    Idle,
    Celebrating,
}

impl Companion {
    pub fn asset_name(self) -> &'static str {
        match self {
            Companion::Idle => "miku_default",
            Companion::Celebrating => "miku_smile",
        }
    }
}

/// Enablement of the "finalize" and "clear" buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub finalize: bool,
    pub clear: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    /// Transient message for the name label (a rejected input).
    Message(String),
    /// New text for the name label.
    NameChanged(String),
    ControlsChanged(Controls),
    CompanionChanged(Companion),
    ConstellationStarted,
    ConstellationFinished,
}

pub struct Scene {
    field: StarField,
    builder: ConstellationBuilder,
    effects: EffectEngine,
    rng: StdRng,
    companion: Companion,
    controls: Controls,
}

impl Scene {
    pub fn new(config: FieldConfig, seed: u64) -> Self {
        Self {
            field: StarField::new(config),
            builder: ConstellationBuilder::new(),
            effects: EffectEngine::new(),
            rng: StdRng::seed_from_u64(seed),
            companion: Companion::Idle,
            controls: Controls::default(),
        }
    }

    pub fn field(&self) -> &StarField {
        &self.field
    }

    pub fn builder(&self) -> &ConstellationBuilder {
        &self.builder
    }

    pub fn effects(&self) -> &EffectEngine {
        &self.effects
    }

    /// Finished constellations, oldest first, for the end-of-song gallery.
    pub fn constellations(&self) -> &[Constellation] {
        self.builder.completed()
    }

    pub fn companion(&self) -> Companion {
        self.companion
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    /// What the name label should currently read.
    pub fn name_label(&self) -> &str {
        self.builder.name().unwrap_or(DEFAULT_NAME_PROMPT)
    }

    /// Lay out a fresh field for a new song. Any running effect, working
    /// line and finished constellation is dropped.
    pub fn initialize(&mut self, width: f32, height: f32) -> Vec<SceneEvent> {
        self.effects.clear();
        self.builder.reset();
        self.field.initialize(width, height, &mut self.rng);
        self.session_reset_events()
    }

    /// Same as [`initialize`](Self::initialize) but keeps the star layout.
    pub fn reset(&mut self) -> Vec<SceneEvent> {
        self.effects.clear();
        self.builder.reset();
        self.field.reset();
        self.session_reset_events()
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.field.resize(width, height);
    }

    /// Playback state gate. Paused playback ignores star hits and disables
    /// both buttons.
    pub fn set_playing(&mut self, playing: bool) -> Vec<SceneEvent> {
        self.builder.set_input_enabled(playing);
        let mut events = Vec::new();
        self.refresh_controls(&mut events);
        events
    }

    /// Per-frame state update. Must run before [`draw_frame`](Self::draw_frame).
    pub fn tick(
        &mut self,
        now_ms: f64,
        frame: Option<&SpectralFrame>,
        chord: &str,
    ) -> Vec<SceneEvent> {
        self.field
            .update(frame, chord, self.effects.completion_active());

        let mut events = Vec::new();
        for event in self.effects.update(now_ms) {
            match event {
                EffectEvent::CompletionFinished => self.finish_completion(&mut events),
            }
        }
        events
    }

    /// Stars, then the selection ring and working lines, then tap effects,
    /// then the completion effect on top.
    pub fn draw_frame(&self, surface: &mut dyn Surface, now_ms: f64) {
        let time_sec = (now_ms / 1000.0) as f32;
        let stars = self.field.stars();
        surface.clear();
        self.field.draw(surface);

        if !self.effects.completion_active() {
            if let Some(star) = self.builder.selected().and_then(|id| self.field.star(id)) {
                star.highlight(surface, time_sec);
            }
            for line in self.builder.working_lines() {
                line.draw(surface, stars);
            }
        }

        self.effects.draw_taps(surface, time_sec);
        self.effects
            .draw_completions(surface, stars, self.builder.working_lines());
    }

    /// Pointer press at surface coordinates.
    pub fn pointer(&mut self, point: Vec2) -> Vec<SceneEvent> {
        let mut events = Vec::new();
        if self.field.is_empty() || !self.builder.input_enabled() {
            return events;
        }
        let Some(hit) = self.field.hit_test(point, self.field.default_hit_radius()) else {
            return events;
        };

        match self.builder.on_star_hit(&mut self.field, hit) {
            Ok(HitOutcome::Selected(id)) | Ok(HitOutcome::Connected { to: id, .. }) => {
                self.spawn_tap_at(id);
            }
            Ok(HitOutcome::SameNote) | Ok(HitOutcome::Ignored) => {}
            Err(rejection) => {
                log::debug!("[scene] star hit rejected: {rejection}");
                events.push(SceneEvent::Message(rejection.to_string()));
            }
        }
        self.refresh_controls(&mut events);
        events
    }

    pub fn set_name(&mut self, raw: &str) -> Vec<SceneEvent> {
        let mut events = Vec::new();
        if let Some(name) = self.builder.set_name(raw) {
            events.push(SceneEvent::NameChanged(name.to_owned()));
            self.refresh_controls(&mut events);
        }
        events
    }

    /// Turn the working lines into a stored constellation and start the
    /// completion effect. Ignored while a previous completion is playing.
    pub fn finalize(&mut self, now_ms: f64, created_at_ms: f64) -> Vec<SceneEvent> {
        let mut events = Vec::new();
        if self.builder.awaiting_effect() {
            return events;
        }
        let size = self.field.size();
        let star_positions = match self.builder.finalize(&mut self.field, created_at_ms) {
            Ok(Some(constellation)) => constellation_star_positions(constellation, size),
            Ok(None) => return events,
            Err(rejection) => {
                events.push(SceneEvent::Message(rejection.to_string()));
                return events;
            }
        };

        self.effects
            .start_completion(now_ms, size, &star_positions, &mut self.rng);
        self.companion = Companion::Celebrating;
        events.push(SceneEvent::ConstellationStarted);
        events.push(SceneEvent::CompanionChanged(self.companion));
        events.push(SceneEvent::NameChanged(DEFAULT_NAME_PROMPT.to_owned()));
        self.refresh_controls(&mut events);
        events
    }

    pub fn clear(&mut self) -> Vec<SceneEvent> {
        let mut events = Vec::new();
        if self.builder.clear(&mut self.field) {
            self.refresh_controls(&mut events);
        }
        events
    }

    fn spawn_tap_at(&mut self, id: StarId) {
        let size = self.field.size();
        if let Some(star) = self.field.star(id) {
            let at = star.position(size);
            self.effects.spawn_tap(at, &mut self.rng);
        }
    }

    fn finish_completion(&mut self, events: &mut Vec<SceneEvent>) {
        self.builder.release_working_lines();
        self.companion = Companion::Idle;
        events.push(SceneEvent::ConstellationFinished);
        events.push(SceneEvent::CompanionChanged(self.companion));
        self.refresh_controls(events);
    }

    fn session_reset_events(&mut self) -> Vec<SceneEvent> {
        self.companion = Companion::Idle;
        self.controls = Controls {
            finalize: self.builder.can_finalize(),
            clear: self.builder.can_clear(),
        };
        vec![
            SceneEvent::NameChanged(DEFAULT_NAME_PROMPT.to_owned()),
            SceneEvent::CompanionChanged(self.companion),
            SceneEvent::ControlsChanged(self.controls),
        ]
    }

    fn refresh_controls(&mut self, events: &mut Vec<SceneEvent>) {
        let next = Controls {
            finalize: self.builder.can_finalize(),
            clear: self.builder.can_clear(),
        };
        if next != self.controls {
            self.controls = next;
            events.push(SceneEvent::ControlsChanged(next));
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(FieldConfig::default(), 0)
    }
}

/// Pixel positions of the distinct stars the constellation's lines touch.
fn constellation_star_positions(constellation: &Constellation, size: Vec2) -> Vec<Vec2> {
    let mut seen = FnvHashSet::default();
    constellation
        .lines()
        .iter()
        .flat_map(|l| [l.from, l.to])
        .filter(|id| seen.insert(*id))
        .filter_map(|id| constellation.stars().get(id.0))
        .map(|s| s.position(size))
        .collect()
}
