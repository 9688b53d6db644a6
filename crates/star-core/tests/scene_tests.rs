// Host-side tests for the composed scene: event flow between the field,
// the builder and the effects, plus the per-frame draw order.

use glam::Vec2;
use star_core::*;

fn loud_frame() -> SpectralFrame {
    SpectralFrame::new(300.0, (48..108).map(|n| (NoteId(n), 1.0)))
}

/// A 1200x500 scene with every star lit.
fn lit_scene() -> Scene {
    let mut scene = Scene::new(FieldConfig::default(), 3);
    scene.initialize(1200.0, 500.0);
    scene.tick(0.0, Some(&loud_frame()), "C");
    assert!(scene.field().stars().iter().all(|s| s.visible));
    scene
}

fn at(scene: &Scene, i: usize) -> Vec2 {
    scene.field().stars()[i].position(scene.field().size())
}

fn connect(scene: &mut Scene, a: usize, b: usize) {
    let pa = at(scene, a);
    let pb = at(scene, b);
    scene.pointer(pa);
    scene.pointer(pb);
}

fn last_controls(events: &[SceneEvent]) -> Option<Controls> {
    events.iter().rev().find_map(|e| match e {
        SceneEvent::ControlsChanged(c) => Some(*c),
        _ => None,
    })
}

#[test]
fn initialize_announces_a_fresh_session() {
    let mut scene = Scene::new(FieldConfig::default(), 1);
    let events = scene.initialize(1200.0, 500.0);
    assert_eq!(
        events,
        vec![
            SceneEvent::NameChanged("歌詞をクリックしてね！".to_owned()),
            SceneEvent::CompanionChanged(Companion::Idle),
            SceneEvent::ControlsChanged(Controls {
                finalize: false,
                clear: true
            }),
        ]
    );
    assert_eq!(scene.field().stars().len(), 60);
    assert_eq!(scene.name_label(), DEFAULT_NAME_PROMPT);
}

#[test]
fn draw_order_is_stars_then_selection_then_taps() {
    let mut scene = lit_scene();
    let p0 = at(&scene, 0);
    assert!(scene.pointer(p0).is_empty());
    assert_eq!(scene.builder().selected(), Some(StarId(0)));

    let mut surface = RecordingSurface::new(1200.0, 500.0);
    scene.draw_frame(&mut surface, 0.0);
    let frame = surface.last_frame();
    assert_eq!(surface.commands()[0], DrawCommand::Clear);

    // Body and halo for each of the 60 stars.
    assert!(frame[..120]
        .iter()
        .all(|c| matches!(c, DrawCommand::FillCircle { .. })));
    // Selection glow and ring.
    assert!(matches!(frame[120], DrawCommand::RadialGradient { center, .. } if center == p0));
    assert!(matches!(frame[121], DrawCommand::StrokeCircle { center, .. } if center == p0));
    // Tap ring at the selected star, then its particles.
    assert!(matches!(frame[122], DrawCommand::StrokeEllipse { center, .. } if center == p0));
    assert!(frame[123..]
        .iter()
        .all(|c| matches!(c, DrawCommand::FillCircle { .. })));
    assert!((4..=6).contains(&frame[123..].len()));
}

#[test]
fn working_lines_draw_between_stars_and_taps() {
    let mut scene = lit_scene();
    connect(&mut scene, 0, 1);
    assert_eq!(scene.builder().working_lines().len(), 1);
    let rings = scene
        .effects()
        .taps()
        .iter()
        .filter(|t| matches!(t, TapEffect::Circle(_)))
        .count();
    assert_eq!(rings, 2);

    let mut surface = RecordingSurface::new(1200.0, 500.0);
    scene.draw_frame(&mut surface, 16.0);
    let frame = surface.last_frame();
    match &frame[120] {
        DrawCommand::Polyline {
            points,
            closed,
            paint,
        } => {
            assert!(!closed);
            assert_eq!(points, &vec![at(&scene, 0), at(&scene, 1)]);
            assert_eq!(paint.width, 1.0);
        }
        other => panic!("expected the working line, got {other:?}"),
    }
    assert!(matches!(frame[121], DrawCommand::StrokeEllipse { .. }));
}

#[test]
fn finalize_runs_the_completion_and_returns_to_idle() {
    let mut scene = lit_scene();
    connect(&mut scene, 0, 13);
    connect(&mut scene, 13, 26);

    let events = scene.set_name("\u{3000}ひかり ");
    assert_eq!(events[0], SceneEvent::NameChanged("ひかり座".to_owned()));
    assert_eq!(
        last_controls(&events),
        Some(Controls {
            finalize: true,
            clear: true
        })
    );

    let events = scene.finalize(1000.0, 42.0);
    assert_eq!(
        events,
        vec![
            SceneEvent::ConstellationStarted,
            SceneEvent::CompanionChanged(Companion::Celebrating),
            SceneEvent::NameChanged(DEFAULT_NAME_PROMPT.to_owned()),
            SceneEvent::ControlsChanged(Controls {
                finalize: false,
                clear: false
            }),
        ]
    );
    assert_eq!(scene.constellations().len(), 1);
    assert_eq!(scene.constellations()[0].name(), "ひかり座");
    assert_eq!(scene.constellations()[0].created_at_ms(), 42.0);
    assert_eq!(scene.companion(), Companion::Celebrating);
    assert!(scene.effects().completion_active());
    // Three distinct stars, five sparkles each.
    assert_eq!(scene.effects().completions()[0].sparkles.len(), 15);

    // Clearing is refused while the effect plays.
    assert!(scene.clear().is_empty());
    assert_eq!(scene.builder().working_lines().len(), 2);

    let mut now = 1016.0;
    while now < 4500.0 {
        let events = scene.tick(now, Some(&loud_frame()), "C");
        assert!(events.is_empty(), "effect ended early at {now}");
        now += 16.0;
    }
    let events = scene.tick(4500.0, Some(&loud_frame()), "C");
    assert_eq!(
        events,
        vec![
            SceneEvent::ConstellationFinished,
            SceneEvent::CompanionChanged(Companion::Idle),
            SceneEvent::ControlsChanged(Controls {
                finalize: false,
                clear: true
            }),
        ]
    );
    assert!(scene.builder().working_lines().is_empty());
    assert!(!scene.effects().completion_active());
    assert_eq!(scene.constellations().len(), 1);
}

#[test]
fn stars_fade_while_the_completion_plays() {
    let mut scene = lit_scene();
    connect(&mut scene, 0, 1);
    scene.set_name("あ");
    scene.finalize(100.0, 0.0);

    scene.tick(116.0, Some(&loud_frame()), "C");
    for s in scene.field().stars() {
        assert!((s.opacity - 0.97).abs() < 1e-6);
        assert!(!s.clicked);
    }

    // Selection ring and plain working lines are hidden under the effect.
    let p5 = at(&scene, 5);
    scene.pointer(p5);
    let mut surface = RecordingSurface::new(1200.0, 500.0);
    scene.draw_frame(&mut surface, 132.0);
    let frame = surface.last_frame();
    assert!(!frame[120..]
        .iter()
        .any(|c| matches!(c, DrawCommand::StrokeCircle { center, .. } if *center == p5)));
}

#[test]
fn second_finalize_waits_for_the_running_effect() {
    let mut scene = lit_scene();
    connect(&mut scene, 0, 1);
    scene.set_name("いち");
    scene.finalize(0.0, 0.0);

    connect(&mut scene, 2, 3);
    scene.set_name("に");
    assert!(scene.finalize(100.0, 0.0).is_empty());
    assert_eq!(scene.constellations().len(), 1);
    assert_eq!(scene.effects().completions().len(), 1);
}

#[test]
fn too_many_lines_reports_a_message() {
    let mut scene = lit_scene();
    for _ in 0..MAX_WORKING_LINES {
        connect(&mut scene, 0, 1);
    }
    let p2 = at(&scene, 2);
    let p3 = at(&scene, 3);
    scene.pointer(p2);
    let events = scene.pointer(p3);
    assert_eq!(events, vec![SceneEvent::Message("線の数が多すぎます！".to_owned())]);
    assert_eq!(scene.builder().working_lines().len(), 100);
    assert_eq!(scene.builder().selected(), None);
}

#[test]
fn paused_playback_ignores_input() {
    let mut scene = lit_scene();
    let events = scene.set_playing(false);
    assert_eq!(
        events,
        vec![SceneEvent::ControlsChanged(Controls {
            finalize: false,
            clear: false
        })]
    );
    let p0 = at(&scene, 0);
    assert!(scene.pointer(p0).is_empty());
    assert_eq!(scene.builder().selected(), None);
    assert!(scene.effects().taps().is_empty());

    let events = scene.set_playing(true);
    assert_eq!(
        last_controls(&events),
        Some(Controls {
            finalize: false,
            clear: true
        })
    );
    scene.pointer(p0);
    assert_eq!(scene.builder().selected(), Some(StarId(0)));
}

#[test]
fn misses_do_nothing() {
    let mut scene = lit_scene();
    assert!(scene.pointer(Vec2::new(-1000.0, -1000.0)).is_empty());
    assert_eq!(scene.builder().selected(), None);
    assert!(scene.effects().taps().is_empty());
}

#[test]
fn initialize_drops_effects_lines_and_constellations() {
    let mut scene = lit_scene();
    connect(&mut scene, 0, 1);
    scene.set_name("う");
    scene.finalize(0.0, 0.0);
    connect(&mut scene, 4, 5);
    assert!(scene.effects().completion_active());

    scene.initialize(800.0, 600.0);
    assert!(!scene.effects().completion_active());
    assert!(scene.effects().taps().is_empty());
    assert!(scene.builder().working_lines().is_empty());
    assert!(scene.constellations().is_empty());
    assert_eq!(scene.companion(), Companion::Idle);
    assert!(scene.field().stars().iter().all(|s| !s.visible));
    assert_eq!(scene.field().size(), Vec2::new(800.0, 600.0));
}

#[test]
fn reset_clears_effects_and_selection_but_keeps_the_layout() {
    let mut scene = lit_scene();
    connect(&mut scene, 0, 1);
    scene.set_name("お");
    scene.finalize(0.0, 0.0);
    let p9 = at(&scene, 9);
    scene.pointer(p9);
    assert!(scene.effects().completion_active());
    assert!(!scene.effects().taps().is_empty());
    assert_eq!(scene.builder().selected(), Some(StarId(9)));
    let layout: Vec<Vec2> = scene.field().stars().iter().map(|s| s.ratio).collect();

    let events = scene.reset();
    assert_eq!(
        events,
        vec![
            SceneEvent::NameChanged(DEFAULT_NAME_PROMPT.to_owned()),
            SceneEvent::CompanionChanged(Companion::Idle),
            SceneEvent::ControlsChanged(Controls {
                finalize: false,
                clear: true
            }),
        ]
    );
    assert!(!scene.effects().completion_active());
    assert!(scene.effects().taps().is_empty());
    assert!(scene.builder().working_lines().is_empty());
    assert_eq!(scene.builder().selected(), None);
    assert!(scene.constellations().is_empty());
    assert!(scene
        .field()
        .stars()
        .iter()
        .all(|s| !s.visible && !s.clicked && s.opacity == 0.0));
    let kept: Vec<Vec2> = scene.field().stars().iter().map(|s| s.ratio).collect();
    assert_eq!(kept, layout);

    // Nothing is left to finish on later ticks.
    assert!(scene.tick(5000.0, None, "C").is_empty());
}

#[test]
fn gallery_redraw_scales_to_the_thumbnail() {
    let mut scene = lit_scene();
    connect(&mut scene, 7, 30);
    scene.set_name("え");
    scene.finalize(0.0, 0.0);
    let constellation = &scene.constellations()[0];

    let mut thumb = RecordingSurface::new(400.0, 400.0);
    constellation.draw(&mut thumb);
    let lines: Vec<&DrawCommand> = thumb
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Polyline { .. }))
        .collect();
    assert_eq!(lines.len(), 1);
    let DrawCommand::Polyline { points, .. } = lines[0] else {
        unreachable!()
    };
    let stars = constellation.stars();
    assert_eq!(points[0], stars[7].ratio * 400.0);
    assert_eq!(points[1], stars[30].ratio * 400.0);
    // Every lit star of the snapshot is drawn with body and halo.
    let circles = thumb
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
        .count();
    assert_eq!(circles, 120);
}
