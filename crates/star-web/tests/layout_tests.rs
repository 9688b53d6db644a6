// Host-side tests for the canvas backing-size rule.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod layout {
    include!("../src/layout.rs");
}

use layout::*;

#[test]
fn unchanged_box_leaves_the_canvas_alone() {
    // Checked on every animation frame.
    assert_eq!(backing_size_update(1200.0, 500.0, (1200, 500)), None);
    assert_eq!(backing_size_update(1200.7, 500.2, (1200, 500)), None);
}

#[test]
fn resized_box_reports_the_new_size() {
    assert_eq!(
        backing_size_update(800.0, 600.0, (1200, 500)),
        Some((800, 600))
    );
    assert_eq!(
        backing_size_update(1200.0, 501.0, (1200, 500)),
        Some((1200, 501))
    );
}

#[test]
fn collapsed_box_keeps_the_previous_size() {
    assert_eq!(backing_size_update(0.0, 500.0, (1200, 500)), None);
    assert_eq!(backing_size_update(640.0, 0.4, (1200, 500)), None);
    assert_eq!(backing_size_update(-5.0, -5.0, (300, 150)), None);
}
