#![allow(clippy::float_cmp)]

use super::*;
use crate::calibration::DiagonalSpan;
use crate::session::Mode;

// =============================================================
// Helpers
// =============================================================

fn live_core() -> EngineCore {
    let mut core = EngineCore::new();
    core.on_capture_ready(1920, 1080);
    core
}

fn full_display() -> DisplayRect {
    DisplayRect::new(0.0, 0.0, 1920.0, 1080.0)
}

fn tap(core: &mut EngineCore, x: f64, y: f64) -> Vec<Action> {
    core.on_tap(Point::new(x, y), full_display())
}

fn is_notice(actions: &[Action]) -> bool {
    matches!(actions, [Action::Notice(_)])
}

// =============================================================
// Capture
// =============================================================

#[test]
fn capture_ready_reports_calibration() {
    let mut core = EngineCore::new();
    let actions = core.on_capture_ready(1920, 1080);
    assert_eq!(
        actions,
        vec![
            Action::ResizeCanvas { width: 1920, height: 1080 },
            Action::CalibrationChanged { pixels_per_meter: 150.0, multiplier: 1.0 },
            Action::RenderNeeded,
        ]
    );
}

#[test]
fn capture_ready_with_strategy() {
    let mut core = EngineCore::with_strategy(Box::new(DiagonalSpan { span_m: 5.0 }));
    let actions = core.on_capture_ready(300, 400);
    assert!(matches!(actions[1], Action::CalibrationChanged { pixels_per_meter, .. } if (pixels_per_meter - 100.0).abs() < 1e-9));
}

#[test]
fn empty_capture_is_a_notice() {
    let mut core = EngineCore::new();
    assert!(is_notice(&core.on_capture_ready(0, 720)));
}

#[test]
fn empty_capture_after_live_keeps_frame_and_canvas_size() {
    let mut core = live_core();
    let actions = core.on_capture_ready(0, 0);
    assert!(is_notice(&actions));
    assert!(!actions.iter().any(|a| matches!(a, Action::ResizeCanvas { .. })));
    assert_eq!(core.session.capture(), Some(Resolution::new(1920, 1080)));
    assert_eq!(core.snapshot().pixels_per_meter, 150.0);

    // Taps still map against the accepted frame.
    assert_eq!(tap(&mut core, 960.0, 540.0)[0], Action::PointAdded { index: 0, count: 1 });
    assert_eq!(core.session.points(), &[Point::new(960.0, 540.0)]);
}

#[test]
fn capture_error_shows_manual_entry() {
    let mut core = live_core();
    tap(&mut core, 10.0, 10.0);

    let actions = core.on_capture_error("NotAllowedError");
    assert_eq!(actions.len(), 2);
    assert!(matches!(&actions[0], Action::Notice(msg) if msg.contains("NotAllowedError")));
    assert_eq!(actions[1], Action::ShowManualEntry);
    assert_eq!(core.session.mode(), Mode::Manual);
    assert!(core.snapshot().points.is_empty());
}

// =============================================================
// Taps
// =============================================================

#[test]
fn tap_adds_point() {
    let mut core = live_core();
    let actions = tap(&mut core, 100.0, 50.0);
    assert_eq!(actions, vec![Action::PointAdded { index: 0, count: 1 }, Action::RenderNeeded]);
    assert_eq!(core.session.points(), &[Point::new(100.0, 50.0)]);
}

#[test]
fn tap_is_scaled_into_capture_space() {
    let mut core = live_core();
    core.on_tap(Point::new(480.0, 270.0), DisplayRect::new(0.0, 0.0, 960.0, 540.0));
    assert_eq!(core.session.points(), &[Point::new(960.0, 540.0)]);
}

#[test]
fn tap_before_capture_is_a_notice() {
    let mut core = EngineCore::new();
    assert!(is_notice(&tap(&mut core, 1.0, 1.0)));
    assert!(core.session.points().is_empty());
}

#[test]
fn tap_on_collapsed_canvas_does_nothing() {
    let mut core = live_core();
    let actions = core.on_tap(Point::new(1.0, 1.0), DisplayRect::new(0.0, 0.0, 0.0, 0.0));
    assert!(actions.is_empty());
    assert!(core.session.points().is_empty());
}

#[test]
fn ninth_tap_is_a_notice_and_engine_stays_usable() {
    let mut core = live_core();
    for i in 0..8 {
        tap(&mut core, f64::from(i) * 10.0, f64::from(i % 2) * 10.0);
    }
    let actions = tap(&mut core, 500.0, 500.0);
    assert!(matches!(&actions[..], [Action::Notice(msg)] if msg.contains("at most 8 points")));
    assert_eq!(core.session.points().len(), 8);

    core.on_reset();
    assert_eq!(tap(&mut core, 1.0, 1.0)[0], Action::PointAdded { index: 0, count: 1 });
}

#[test]
fn mark_center_adds_center_point() {
    let mut core = live_core();
    core.on_mark_center();
    assert_eq!(core.session.points(), &[Point::new(960.0, 540.0)]);
}

// =============================================================
// Calibration / category
// =============================================================

#[test]
fn multiplier_input_updates_calibration() {
    let mut core = live_core();
    let actions = core.on_multiplier_input(1.5);
    assert_eq!(actions[0], Action::CalibrationChanged { pixels_per_meter: 100.0, multiplier: 1.5 });
}

#[test]
fn out_of_range_multiplier_is_a_notice() {
    let mut core = live_core();
    assert!(is_notice(&core.on_multiplier_input(0.0)));
    assert_eq!(core.snapshot().multiplier, 1.0);
}

#[test]
fn category_selection() {
    let mut core = EngineCore::new();
    assert_eq!(core.on_category_selected("ceiling"), vec![Action::CategoryChanged(Category::Ceiling)]);
    assert!(is_notice(&core.on_category_selected("garage")));
    assert_eq!(core.session.category(), Category::Ceiling);
}

// =============================================================
// Calculate
// =============================================================

#[test]
fn calculate_needs_three_points() {
    let mut core = live_core();
    tap(&mut core, 0.0, 0.0);
    tap(&mut core, 150.0, 0.0);
    assert_eq!(core.calculate_label(), "At least 3 points (2/3)");
    assert!(is_notice(&core.on_calculate()));
}

#[test]
fn calculate_shows_result() {
    let mut core = live_core();
    for (x, y) in [(0.0, 0.0), (300.0, 0.0), (300.0, 150.0), (0.0, 150.0)] {
        tap(&mut core, x, y);
    }
    assert_eq!(core.calculate_label(), "Calculate materials");

    let actions = core.on_calculate();
    let [Action::ShowResult(result)] = &actions[..] else {
        panic!("expected a result, got {actions:?}");
    };
    assert!((result.area_m2 - 2.0).abs() < 1e-9);
    assert!((result.perimeter_m - 6.0).abs() < 1e-9);
    assert_eq!(result.category, Category::Floor);
}

#[test]
fn manual_submit() {
    let mut core = EngineCore::new();
    let actions = core.on_manual_submit("4", "3", "wall");
    let [Action::ShowResult(result)] = &actions[..] else {
        panic!("expected a result, got {actions:?}");
    };
    assert_eq!(result.area_m2, 12.0);
    assert_eq!(result.perimeter_m, 14.0);
    assert_eq!(result.category, Category::Wall);

    assert!(is_notice(&core.on_manual_submit("4", "", "wall")));
    assert!(is_notice(&core.on_manual_submit("4", "3", "attic")));
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn reset_restores_neutral_multiplier() {
    let mut core = live_core();
    tap(&mut core, 5.0, 5.0);
    core.on_multiplier_input(2.0);

    let actions = core.on_reset();
    assert_eq!(actions[0], Action::CalibrationChanged { pixels_per_meter: 150.0, multiplier: 1.0 });
    assert!(core.snapshot().points.is_empty());
}

#[test]
fn stop_ends_session() {
    let mut core = live_core();
    tap(&mut core, 5.0, 5.0);
    core.on_stop();

    let snap = core.snapshot();
    assert!(snap.points.is_empty());
    assert_eq!(snap.mode, Mode::Idle);
    assert!(snap.capture.is_none());
    assert_eq!(snap.pixels_per_meter, 100.0);
}
