//! Per-frame spectral analysis data.
//!
//! The analysis script writes one JSON object per 1/60 s of audio:
//! `{ "volume": 27.4, "notes": { "n48": 0.61, "n49": 0.12, ... } }` where
//! `volume` is the frame's average weighted level (dB) and each note
//! intensity is normalised to \[0, 1\] across the whole song.

use crate::constants::{SPECTRUM_FPS, VOLUME_PER_ACTIVE_NOTE};
use crate::error::SpectrumError;
use crate::surface::Rgba;
use fnv::FnvHashMap;
use serde::{Deserialize, Deserializer};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// One spectral channel, identified by its MIDI note number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(pub u16);

impl NoteId {
    pub fn midi(self) -> u16 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = SpectrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('n')
            .and_then(|digits| digits.parse::<u16>().ok())
            .map(NoteId)
            .ok_or_else(|| SpectrumError::InvalidNote(s.to_owned()))
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Top notes are rarely more than a handful; keep them inline.
pub type TopNotes = SmallVec<[(NoteId, f32); 8]>;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SpectralFrame {
    #[serde(default)]
    pub volume: f32,
    #[serde(default)]
    pub notes: FnvHashMap<NoteId, f32>,
}

impl SpectralFrame {
    pub fn new(volume: f32, notes: impl IntoIterator<Item = (NoteId, f32)>) -> Self {
        Self {
            volume,
            notes: notes.into_iter().collect(),
        }
    }

    /// How many notes light up this frame: `floor(volume / 5)`.
    pub fn active_count(&self) -> usize {
        if self.volume.is_finite() && self.volume > 0.0 {
            (self.volume / VOLUME_PER_ACTIVE_NOTE).floor() as usize
        } else {
            0
        }
    }

    pub fn intensity(&self, note: NoteId) -> Option<f32> {
        self.notes.get(&note).copied()
    }

    /// The `active_count` loudest notes, loudest first. Equal intensities
    /// are ordered by note id so the selection is deterministic.
    pub fn top_notes(&self) -> TopNotes {
        let mut ranked: TopNotes = self.notes.iter().map(|(n, v)| (*n, *v)).collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(self.active_count());
        ranked
    }
}

/// A whole song's worth of spectral frames at a fixed 60 fps.
#[derive(Clone, Debug, Default)]
pub struct Spectrum {
    frames: Vec<SpectralFrame>,
}

impl Spectrum {
    pub fn new(frames: Vec<SpectralFrame>) -> Self {
        Self { frames }
    }

    pub fn from_json(json: &str) -> Result<Self, SpectrumError> {
        let frames: Vec<SpectralFrame> = serde_json::from_str(json)?;
        if frames.is_empty() {
            return Err(SpectrumError::Empty);
        }
        Ok(Self { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame index for a playback position, clamped into the dataset.
    pub fn frame_index(&self, position_ms: f64) -> usize {
        let raw = (position_ms / 1000.0 * SPECTRUM_FPS).floor();
        let last = self.frames.len().saturating_sub(1);
        if raw.is_nan() || raw <= 0.0 {
            0
        } else {
            (raw as usize).min(last)
        }
    }

    pub fn frame_at(&self, position_ms: f64) -> Option<&SpectralFrame> {
        self.frames.get(self.frame_index(position_ms))
    }
}

pub const CHORD_MINOR_COLOR: u32 = 0x87ceeb;
pub const CHORD_SEVENTH_COLOR: u32 = 0xffd700;
pub const CHORD_DIMINISHED_COLOR: u32 = 0xaa66ff;

/// Colour for the strongest star under a chord label. Each rule is checked
/// in turn and the last match wins, so `"Cm7"` resolves to the seventh
/// colour and `"Bdim"` (which also contains `m`) to the diminished one.
pub fn chord_highlight(label: &str) -> Rgba {
    let mut color = Rgba::WHITE;
    if label.contains('m') {
        color = Rgba::from_hex(CHORD_MINOR_COLOR);
    }
    if label.contains('7') {
        color = Rgba::from_hex(CHORD_SEVENTH_COLOR);
    }
    if label.contains("dim") {
        color = Rgba::from_hex(CHORD_DIMINISHED_COLOR);
    }
    color
}
