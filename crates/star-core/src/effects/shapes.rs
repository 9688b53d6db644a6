//! Easing curves and the decorative geometry of the completion effect.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Quadratic ease-out: fast start, slow end.
#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Triangular pulse: 1 at `peak`, falling linearly to 0 at `peak ± half_width`.
#[inline]
pub fn triangle_pulse(x: f64, peak: f64, half_width: f64) -> f32 {
    if half_width <= 0.0 {
        return 0.0;
    }
    (1.0 - (x - peak).abs() / half_width).max(0.0) as f32
}

#[inline]
fn vertex(center: Vec2, radius: f32, angle: f32) -> Vec2 {
    center + Vec2::new(angle.cos(), angle.sin()) * radius
}

/// Regular pentagon, first vertex pointing up before `rotation`.
pub fn pentagon(center: Vec2, radius: f32, rotation: f32) -> [Vec2; 5] {
    std::array::from_fn(|i| vertex(center, radius, i as f32 * TAU / 5.0 - FRAC_PI_2 + rotation))
}

/// Pentagon whose edges fold inward at their midpoints by `depth`, giving a
/// soft five-pointed star. Vertices and fold points alternate.
pub fn indented_pentagon(center: Vec2, radius: f32, depth: f32, rotation: f32) -> [Vec2; 10] {
    let corners = pentagon(center, radius, rotation);
    let mut points = [Vec2::ZERO; 10];
    for i in 0..5 {
        let a = corners[i];
        let b = corners[(i + 1) % 5];
        let mid = (a + b) * 0.5;
        let inward = (mid - center).normalize_or_zero();
        points[2 * i] = a;
        points[2 * i + 1] = mid - inward * depth;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints() {
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
        assert!((ease_out_quad(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn pentagon_starts_at_top() {
        let p = pentagon(Vec2::ZERO, 10.0, 0.0);
        assert!(p[0].x.abs() < 1e-4);
        assert!((p[0].y + 10.0).abs() < 1e-4);
    }

    #[test]
    fn indents_sit_inside_the_edge_midpoints() {
        let center = Vec2::new(50.0, 50.0);
        let plain = pentagon(center, 20.0, 0.3);
        let folded = indented_pentagon(center, 20.0, 2.0, 0.3);
        for i in 0..5 {
            let mid = (plain[i] + plain[(i + 1) % 5]) * 0.5;
            let fold = folded[2 * i + 1];
            assert!((mid.distance(center) - fold.distance(center) - 2.0).abs() < 1e-3);
        }
    }

    #[test]
    fn pulse_is_triangular() {
        assert_eq!(triangle_pulse(350.0, 350.0, 262.5), 1.0);
        assert_eq!(triangle_pulse(0.0, 350.0, 262.5), 0.0);
        assert!((triangle_pulse(350.0 + 131.25, 350.0, 262.5) - 0.5).abs() < 1e-6);
    }
}
