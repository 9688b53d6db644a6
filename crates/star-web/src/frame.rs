use crate::canvas::CanvasSurface;
use crate::dom::{self, NAME_LABEL_ID};
use glam::Vec2;
use star_core::{Scene, SceneEvent, Spectrum, Surface};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Latest transport state reported by the player.
#[derive(Default, Clone)]
pub struct Playback {
    pub playing: bool,
    pub position_ms: f64,
    pub chord: String,
}

pub struct FrameContext {
    pub document: web::Document,
    pub surface: CanvasSurface,
    pub scene: Scene,
    pub spectrum: Option<Spectrum>,
    pub playback: Playback,
}

impl FrameContext {
    pub fn new(document: web::Document, surface: CanvasSurface, scene: Scene) -> Self {
        Self {
            document,
            surface,
            scene,
            spectrum: None,
            playback: Playback::default(),
        }
    }

    pub fn frame(&mut self) {
        let now = instant::now();
        self.sync_size();

        let frame = match (&self.spectrum, self.playback.playing) {
            (Some(spectrum), true) => spectrum.frame_at(self.playback.position_ms),
            _ => None,
        };
        let events = self.scene.tick(now, frame, &self.playback.chord);
        self.apply(events);
        self.scene.draw_frame(&mut self.surface, now);
    }

    /// Install a freshly loaded dataset and lay out a new field.
    pub fn load(&mut self, spectrum: Spectrum) {
        dom::sync_canvas_backing_size(self.surface.canvas());
        let size = self.surface.size();
        self.spectrum = Some(spectrum);
        self.playback.position_ms = 0.0;
        self.playback.chord.clear();
        let events = self.scene.initialize(size.x, size.y);
        self.apply(events);
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playback.playing = playing;
        let events = self.scene.set_playing(playing);
        self.apply(events);
    }

    pub fn set_position(&mut self, position_ms: f64, chord: Option<String>) {
        if position_ms.is_finite() {
            self.playback.position_ms = position_ms;
        }
        if let Some(chord) = chord {
            self.playback.chord = chord;
        }
    }

    pub fn pointer(&mut self, at: Vec2) {
        let events = self.scene.pointer(at);
        self.apply(events);
    }

    pub fn set_name(&mut self, raw: &str) {
        let events = self.scene.set_name(raw);
        self.apply(events);
    }

    pub fn finalize(&mut self) {
        let now = instant::now();
        let created_at = js_sys::Date::now();
        let events = self.scene.finalize(now, created_at);
        self.apply(events);
    }

    pub fn clear(&mut self) {
        let events = self.scene.clear();
        self.apply(events);
    }

    pub fn show_gallery(&self) {
        if let Err(e) = crate::gallery::render(&self.document, self.scene.constellations()) {
            log::error!("gallery error: {:?}", e);
        }
    }

    /// Reflect scene events in the page.
    fn apply(&self, events: Vec<SceneEvent>) {
        for event in events {
            match event {
                SceneEvent::Message(text) | SceneEvent::NameChanged(text) => {
                    dom::set_text(&self.document, NAME_LABEL_ID, &text);
                }
                SceneEvent::ControlsChanged(controls) => {
                    dom::apply_controls(&self.document, controls);
                }
                SceneEvent::CompanionChanged(companion) => {
                    dom::set_companion(&self.document, companion);
                }
                SceneEvent::ConstellationStarted => log::info!("[scene] constellation started"),
                SceneEvent::ConstellationFinished => log::info!("[scene] constellation finished"),
            }
        }
    }

    // Canvas CSS size can change without a window resize (layout shifts).
    pub fn sync_size(&mut self) {
        if dom::sync_canvas_backing_size(self.surface.canvas()) {
            let size = self.surface.size();
            self.scene.resize(size.x, size.y);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
