//! Platform-free core of the star sky: stars that follow the music, the
//! constellation builder driven by pointer hits, and the effects layered on
//! top. Front-ends provide a [`Surface`] and feed spectral frames.

pub mod builder;
pub mod constants;
pub mod constellation;
pub mod effects;
pub mod error;
pub mod field;
pub mod line;
pub mod scene;
pub mod spectrum;
pub mod star;
pub mod surface;

pub use builder::{ConstellationBuilder, HitOutcome};
pub use constants::*;
pub use constellation::Constellation;
pub use effects::{CompletionEffect, EffectEngine, EffectEvent, TapEffect};
pub use error::{Rejection, SpectrumError};
pub use field::{FieldConfig, StarField};
pub use line::{LineStyle, StarLine};
pub use scene::{Companion, Controls, Scene, SceneEvent};
pub use spectrum::{chord_highlight, NoteId, SpectralFrame, Spectrum};
pub use star::{Star, StarId};
pub use surface::{DrawCommand, Glow, GradientStop, Paint, RecordingSurface, Rgba, Surface};
