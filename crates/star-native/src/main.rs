//! Headless replay of a song's spectral data through the scene.
//!
//! Usage: `star-native <spectrum.json> [seconds] [seed]`
//!
//! Ticks the scene at 60 fps against a recording surface, plays a scripted
//! listener who taps lit stars and names a constellation every few lines,
//! then logs what happened.

use anyhow::Context;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use star_core::{FieldConfig, RecordingSurface, Scene, SceneEvent, Spectrum, SPECTRUM_FPS};
use std::path::PathBuf;

const WIDTH: f32 = 1280.0;
const HEIGHT: f32 = 720.0;
const DEFAULT_SECONDS: f64 = 30.0;
const DEFAULT_SEED: u64 = 42;

// A tap every 0.75 s, a finalize after every 4 lines.
const TAP_EVERY_FRAMES: u64 = 45;
const LINES_PER_CONSTELLATION: usize = 4;
const CHORDS: [&str; 4] = ["C", "Am", "F", "G7"];
const CHORD_SECONDS: f64 = 2.0;

struct Args {
    spectrum: PathBuf,
    seconds: f64,
    seed: u64,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = std::env::args().skip(1);
    let spectrum = args
        .next()
        .map(PathBuf::from)
        .context("usage: star-native <spectrum.json> [seconds] [seed]")?;
    let seconds = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid seconds `{s}`"))?,
        None => DEFAULT_SECONDS,
    };
    let seed = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid seed `{s}`"))?,
        None => DEFAULT_SEED,
    };
    Ok(Args {
        spectrum,
        seconds,
        seed,
    })
}

#[derive(Default, Debug)]
struct Summary {
    frames: u64,
    taps: u64,
    lines: usize,
    rejections: Vec<String>,
    started: u32,
    finished: u32,
    draw_commands: usize,
    peak_lit: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = parse_args()?;
    let json = std::fs::read_to_string(&args.spectrum)
        .with_context(|| format!("reading {}", args.spectrum.display()))?;
    let spectrum = Spectrum::from_json(&json)
        .with_context(|| format!("parsing {}", args.spectrum.display()))?;
    log::info!(
        "[replay] {} frames ({:.1}s of audio), replaying {:.1}s with seed {}",
        spectrum.len(),
        spectrum.len() as f64 / SPECTRUM_FPS,
        args.seconds,
        args.seed
    );

    let mut scene = Scene::new(FieldConfig::default(), args.seed);
    let mut listener = StdRng::seed_from_u64(args.seed ^ 0x5eed);
    let mut surface = RecordingSurface::new(WIDTH, HEIGHT);
    let mut summary = Summary::default();

    let mut events = scene.initialize(WIDTH, HEIGHT);
    events.extend(scene.set_playing(true));
    record(&mut summary, &events);

    let frame_ms = 1000.0 / SPECTRUM_FPS;
    let total_frames = (args.seconds.max(0.0) * SPECTRUM_FPS).round() as u64;
    for i in 0..total_frames {
        let now = i as f64 * frame_ms;
        let chord = CHORDS[(now / 1000.0 / CHORD_SECONDS) as usize % CHORDS.len()];
        let events = scene.tick(now, spectrum.frame_at(now), chord);
        record(&mut summary, &events);

        if i % TAP_EVERY_FRAMES == TAP_EVERY_FRAMES - 1 {
            if let Some(at) = pick_lit_star(&scene, &mut listener) {
                summary.taps += 1;
                let events = scene.pointer(at);
                record(&mut summary, &events);
            }
            if scene.builder().working_lines().len() >= LINES_PER_CONSTELLATION
                && scene.controls().clear
            {
                let n = scene.constellations().len() + 1;
                let mut events = scene.set_name(&format!("リプレイ{n}"));
                events.extend(scene.finalize(now, now));
                record(&mut summary, &events);
            }
        }

        scene.draw_frame(&mut surface, now);
        summary.draw_commands += surface.take().len();
        summary.lines = summary.lines.max(scene.builder().working_lines().len());
        let lit = scene.field().stars().iter().filter(|s| s.visible).count();
        summary.peak_lit = summary.peak_lit.max(lit);
        summary.frames += 1;
    }

    log::info!(
        "[replay] {} frames, {} taps, {} draw commands, peak {} lit stars, longest working set {} lines",
        summary.frames,
        summary.taps,
        summary.draw_commands,
        summary.peak_lit,
        summary.lines
    );
    log::info!(
        "[replay] completions started {} / finished {}",
        summary.started,
        summary.finished
    );
    for rejection in &summary.rejections {
        log::warn!("[replay] rejected: {rejection}");
    }
    for c in scene.constellations() {
        log::info!(
            "[replay] {}: {} lines over {} stars, made at {:.0} ms",
            c.name(),
            c.lines().len(),
            c.star_count(),
            c.created_at_ms()
        );
    }
    Ok(())
}

fn record(summary: &mut Summary, events: &[SceneEvent]) {
    for event in events {
        log::debug!("[replay] {event:?}");
        match event {
            SceneEvent::Message(text) => summary.rejections.push(text.clone()),
            SceneEvent::ConstellationStarted => summary.started += 1,
            SceneEvent::ConstellationFinished => summary.finished += 1,
            _ => {}
        }
    }
}

/// Pixel position of a random currently visible star.
fn pick_lit_star(scene: &Scene, rng: &mut StdRng) -> Option<Vec2> {
    let size = scene.field().size();
    let lit: Vec<Vec2> = scene
        .field()
        .stars()
        .iter()
        .filter(|s| s.visible)
        .map(|s| s.position(size))
        .collect();
    if lit.is_empty() {
        return None;
    }
    Some(lit[rng.gen_range(0..lit.len())])
}
