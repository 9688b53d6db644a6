// Shared tuning constants for the star field, builder and effects.

// Field layout
pub const FIELD_ROWS: usize = 5;
pub const FIELD_COLS: usize = 12;
pub const BASE_NOTE: u16 = 48; // bottom-left star is n48
pub const LAYOUT_JITTER: f32 = 0.3; // +/- fraction of a cell on each axis

// Spectral timing
pub const SPECTRUM_FPS: f64 = 60.0;
pub const VOLUME_PER_ACTIVE_NOTE: f32 = 5.0; // activeCount = floor(volume / 5)

// Per-frame opacity fades
pub const STAR_FADE_STEP: f32 = 0.02;
pub const STAR_SUPPRESSED_FADE_STEP: f32 = 0.03; // while a completion effect runs

// Star drawing, relative to surface width
pub const STAR_RADIUS_DIVISOR: f32 = 300.0;
pub const STAR_SHADOW_BLUR: f32 = 4.0;
pub const STAR_HALO_ALPHA: f32 = 0.3;
pub const HIGHLIGHT_RADIUS_DIVISOR: f32 = 70.0;

// Builder ceilings
pub const MAX_WORKING_LINES: usize = 100;
pub const MAX_STORED_INDEX: usize = 30; // finalize rejected once completed.len() > 30
pub const NAME_SUFFIX: &str = "座";
pub const DEFAULT_NAME_PROMPT: &str = "歌詞をクリックしてね！";

// Line defaults
pub const LINE_DEFAULT_OPACITY: f32 = 0.3;
pub const LINE_DEFAULT_WIDTH: f32 = 1.0;
pub const LINE_DEFAULT_SHADOW_BLUR: f32 = 2.0;

// Tap effect
pub const TAP_MAX_RADIUS: f32 = 20.0;
pub const TAP_INITIAL_ALPHA: f32 = 0.4;
pub const TAP_LINE_WIDTH: f32 = 3.0;
pub const TAP_SPEED: f32 = 1.2;
pub const TAP_DOTS_MIN_RADIUS: f32 = 10.0;
pub const TAP_PARTICLES_MIN: usize = 4;
pub const TAP_PARTICLES_MAX: usize = 6;
pub const TAP_PARTICLE_GRAVITY: f32 = 0.05;
pub const TAP_PARTICLE_LIFE_STEP: f32 = 2.0;

// Completion effect
pub const COMPLETION_DURATION_MS: f64 = 3500.0;
pub const COMPLETION_WAVES: usize = 3;
pub const COMPLETION_WAVE_STAGGER_MS: f64 = 400.0;
pub const COMPLETION_WAVE_GROW_MS: f64 = 2000.0;
pub const COMPLETION_WAVE_RADIUS_SCALE: f32 = 1.5; // x larger surface dimension
pub const COMPLETION_AMBIENT_PARTICLES: usize = 80;
pub const COMPLETION_SPARKLES_PER_STAR: usize = 5;
pub const COMPLETION_SPARKLE_LIFE_STEP: f32 = 0.01;
pub const COMPLETION_PHASE_STEP: f32 = 0.01;
pub const COMPLETION_FLASH_TIMES: [f64; 2] = [0.1, 0.2]; // fractions of duration
pub const COMPLETION_FLASH_HALF_WIDTH: f64 = 0.075;
pub const COMPLETION_LINE_FADE_START: f64 = 0.5;
pub const COMPLETION_LINE_FADE_SPAN: f64 = 0.3;
pub const COMPLETION_DECOR_SIZE: f32 = 0.4; // x smaller surface dimension
pub const COMPLETION_DECOR_PEAK: f32 = 0.4;
