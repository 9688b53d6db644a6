// Host-side tests for tap bursts and the completion effect timeline.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use star_core::effects::completion::Wave;
use star_core::*;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn tap_burst_is_one_ring_and_a_few_particles() {
    let mut r = rng();
    for _ in 0..20 {
        let burst = TapEffect::burst(Vec2::new(40.0, 60.0), &mut r);
        let rings = burst
            .iter()
            .filter(|e| matches!(e, TapEffect::Circle(_)))
            .count();
        assert_eq!(rings, 1);
        assert!((5..=7).contains(&burst.len()), "burst of {}", burst.len());
        for e in &burst {
            if let TapEffect::Particle(p) = e {
                assert_eq!(p.position, Vec2::new(40.0, 60.0));
                assert!(p.life >= 15.0 && p.life <= 30.0);
                assert_eq!(p.life, p.max_life);
            }
        }
    }
}

#[test]
fn tap_effects_fade_monotonically_and_expire() {
    let mut engine = EffectEngine::new();
    let mut r = rng();
    engine.spawn_tap(Vec2::new(100.0, 100.0), &mut r);
    assert!(engine.taps().len() >= 5);

    let mut last: Vec<TapEffect> = engine.taps().to_vec();
    for _ in 0..40 {
        engine.update(0.0);
        for e in engine.taps() {
            match e {
                TapEffect::Circle(c) => {
                    let prev = last
                        .iter()
                        .find_map(|p| match p {
                            TapEffect::Circle(pc) if pc.origin == c.origin => Some(pc),
                            _ => None,
                        })
                        .unwrap();
                    assert!(c.alpha < prev.alpha);
                    assert!(c.radius > prev.radius);
                }
                TapEffect::Particle(p) => {
                    assert!(p.alpha <= 0.9);
                    assert!(p.size >= 0.0);
                }
            }
        }
        last = engine.taps().to_vec();
    }
    assert!(engine.taps().is_empty(), "every tap effect should have expired");
}

#[test]
fn particle_life_and_alpha_decrease() {
    let mut r = rng();
    let mut particle = TapEffect::burst(Vec2::ZERO, &mut r)
        .into_iter()
        .find(|e| matches!(e, TapEffect::Particle(_)))
        .unwrap();
    let mut prev = match &particle {
        TapEffect::Particle(p) => (p.life, p.alpha),
        _ => unreachable!(),
    };
    while particle.advance() {
        let TapEffect::Particle(p) = &particle else {
            unreachable!()
        };
        assert!(p.life < prev.0);
        assert!(p.alpha < prev.1);
        prev = (p.life, p.alpha);
    }
}

#[test]
fn completion_lives_for_its_duration() {
    let mut engine = EffectEngine::new();
    let mut r = rng();
    let t0 = 10_000.0;
    engine.start_completion(t0, Vec2::new(800.0, 600.0), &[Vec2::new(100.0, 100.0)], &mut r);
    assert!(engine.completion_active());

    let mut now = t0;
    while now < t0 + 3500.0 {
        let events = engine.update(now);
        assert!(events.is_empty(), "finished early at {now}");
        assert!(engine.completion_active());
        now += 16.0;
    }
    assert_eq!(engine.update(t0 + 3500.0), vec![EffectEvent::CompletionFinished]);
    assert!(!engine.completion_active());
    assert!(engine.update(t0 + 4000.0).is_empty());
}

#[test]
fn completion_spawns_waves_particles_and_sparkles() {
    let mut r = rng();
    let stars = [Vec2::new(10.0, 10.0), Vec2::new(50.0, 20.0), Vec2::new(90.0, 80.0)];
    let effect = CompletionEffect::new(0.0, Vec2::new(800.0, 600.0), &stars, &mut r);
    assert_eq!(effect.waves.len(), 3);
    assert_eq!(effect.particles.len(), 80);
    assert_eq!(effect.sparkles.len(), 15);
    assert_eq!(effect.waves[1].offset_ms, 400.0);
    assert_eq!(effect.waves[0].max_radius, 1200.0);
    for s in &effect.sparkles {
        let near = stars.iter().any(|o| o.distance(s.position) <= 55.0 + 1e-3);
        assert!(near, "sparkle spawned away from every star");
    }
}

#[test]
fn sparkles_burn_out_after_a_hundred_frames() {
    let mut r = rng();
    let mut effect = CompletionEffect::new(0.0, Vec2::new(400.0, 400.0), &[Vec2::splat(200.0)], &mut r);
    for frame in 1..=99 {
        assert!(effect.advance(frame as f64));
    }
    assert_eq!(effect.sparkles.len(), 5);
    assert!(effect.advance(100.0));
    assert!(effect.advance(101.0));
    assert!(effect.sparkles.is_empty());
}

#[test]
fn waves_grow_and_fade() {
    let wave = Wave {
        offset_ms: 400.0,
        max_radius: 1000.0,
    };
    assert_eq!(wave.at(300.0), None);
    assert_eq!(wave.at(400.0), None);

    let (r, o) = wave.at(1400.0).unwrap();
    assert!((r - 750.0).abs() < 1e-3);
    assert!((o - 0.2).abs() < 1e-6);

    let (r, o) = wave.at(3000.0).unwrap();
    assert_eq!(r, 1000.0);
    assert_eq!(o, 0.0);
}

#[test]
fn lines_flash_then_fade_without_touching_their_style() {
    let mut r = rng();
    let mut effect = CompletionEffect::new(0.0, Vec2::new(800.0, 600.0), &[], &mut r);
    let base = LineStyle::default();

    // First flash peaks at 10% of the duration.
    effect.advance(350.0);
    assert!((effect.glow_factor() - 1.0).abs() < 1e-6);
    let (lit, aura) = effect.line_style(&base);
    assert!((lit.width - 4.0).abs() < 1e-6);
    assert!((lit.opacity - 0.3).abs() < 1e-6);
    assert_eq!(lit.color, Rgba::rgb(1.0, 1.0, 220.0 / 255.0));
    let aura = aura.expect("strong flash draws an aura pass");
    assert!((aura.shadow_blur - 8.0).abs() < 1e-6);
    assert_eq!(base, LineStyle::default());

    // Between the flashes both pulses are at a third of their strength.
    effect.advance(525.0);
    let (lit, aura) = effect.line_style(&base);
    assert!((lit.width - 2.0).abs() < 1e-4);
    assert!(aura.is_none());

    // Half way through the fade.
    effect.advance(2275.0);
    assert_eq!(effect.glow_factor(), 0.0);
    let (faded, _) = effect.line_style(&base);
    assert!((faded.opacity - 0.15).abs() < 1e-5);
    assert_eq!(faded.width, base.width);
    assert_eq!(faded.color, base.color);

    effect.advance(3000.0);
    assert_eq!(effect.line_style(&base).0.opacity, 0.0);
}

#[test]
fn decor_envelope() {
    assert_eq!(CompletionEffect::decor_opacity(0.05), None);
    assert_eq!(CompletionEffect::decor_opacity(0.1), None);
    assert!((CompletionEffect::decor_opacity(0.2).unwrap() - 0.2).abs() < 1e-6);
    assert_eq!(CompletionEffect::decor_opacity(0.5), Some(0.4));
    assert!((CompletionEffect::decor_opacity(0.825).unwrap() - 0.3).abs() < 1e-5);
    assert_eq!(CompletionEffect::decor_opacity(0.95), None);
}

#[test]
fn completion_draws_lines_first_with_the_flash_style() {
    let mut field = StarField::default();
    let mut r = rng();
    field.initialize(800.0, 600.0, &mut r);
    let lines = vec![StarLine::new(StarId(0), StarId(1))];

    let mut effect = CompletionEffect::new(0.0, Vec2::new(800.0, 600.0), &[], &mut r);
    effect.advance(350.0);
    let mut surface = RecordingSurface::new(800.0, 600.0);
    effect.draw(&mut surface, field.stars(), &lines);

    let polylines: Vec<&DrawCommand> = surface
        .commands()
        .iter()
        .take_while(|c| matches!(c, DrawCommand::Polyline { closed: false, .. }))
        .collect();
    assert_eq!(polylines.len(), 2, "aura pass then the lit line");
    for cmd in polylines {
        assert!((cmd.paint().unwrap().width - 4.0).abs() < 1e-6);
    }
    assert_eq!(lines[0].style, LineStyle::default());

    // Decor is hidden this early; visible at mid-run.
    let closed = |s: &RecordingSurface| {
        s.commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polyline { closed: true, .. }))
            .count()
    };
    assert_eq!(closed(&surface), 0);
    effect.advance(1750.0);
    let mut surface = RecordingSurface::new(800.0, 600.0);
    effect.draw(&mut surface, field.stars(), &lines);
    assert_eq!(closed(&surface), 4);
}
