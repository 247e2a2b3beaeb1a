// Host-side tests for the animation rules.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod anim {
    include!("../src/core/anim.rs");
}
mod layout {
    include!("../src/core/layout.rs");
}

use anim::*;
use constants::*;
use glam::Vec2;
use layout::Viewport;
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::TAU;

// gen::<f64>() yields 0.0 for a zero source and ~1.0 for an all-ones source
fn always_trigger() -> StepRng {
    StepRng::new(0, 0)
}

fn never_trigger() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

fn approx(a: Vec2, b: Vec2) -> bool {
    (a - b).abs().max_element() < 1e-3
}

#[test]
fn move_rule_hits_both_targets_exactly() {
    let from = Vec2::new(-30.0, 12.0);
    let to = Vec2::new(80.0, -44.0);
    let rule = MoveRule::new(200.0, 600.0, from, to).unwrap();
    assert_eq!(rule.position_at(200.0), from);
    assert_eq!(rule.position_at(600.0), to);
    for offset in [600.5, 700.0, 1e6] {
        assert_eq!(rule.position_at(offset), to, "past the window at {offset}");
    }
}

#[test]
fn move_rule_parks_before_window_instead_of_extrapolating() {
    let rule = MoveRule::new(200.0, 600.0, Vec2::ZERO, Vec2::new(100.0, 100.0)).unwrap();
    for offset in [-50.0, 0.0, 199.0] {
        assert_eq!(rule.position_at(offset), Vec2::splat(PARK_COORD));
    }
}

#[test]
fn move_scenario_on_a_1000px_viewport() {
    let vp = Viewport::from_height(1000.0).unwrap();
    assert_eq!(vp.width, 750.0);
    let rule = MoveRule::new(
        300.0,
        1000.0,
        Vec2::new(475.0, -400.0),
        Vec2::new(-475.0, 250.0),
    )
    .unwrap();
    assert!(approx(rule.position_at(650.0), Vec2::new(0.0, -75.0)));
    assert_eq!(rule.position_at(1000.0), Vec2::new(-475.0, 250.0));
    assert_eq!(rule.position_at(100.0), Vec2::splat(PARK_COORD));
}

#[test]
fn rotate_rule_is_linear_and_zero_outside() {
    let rule = RotateRule::new(100.0, 500.0).unwrap();
    assert_eq!(rule.angle_at(99.0), 0.0);
    assert_eq!(rule.angle_at(501.0), 0.0);
    assert_eq!(rule.angle_at(100.0), 0.0);
    assert_eq!(rule.angle_at(500.0), TAU);
    assert!((rule.angle_at(300.0) - TAU / 2.0).abs() < 1e-5);
    assert!((rule.angle_at(200.0) - TAU / 4.0).abs() < 1e-5);
}

#[test]
fn rotate_sets_both_axes() {
    let rule: AnimationRule = RotateRule::new(0.0, 100.0).unwrap().into();
    let mut t = Transform::default();
    let mut pulse = PulseState::Idle;
    rule.evaluate(50.0, &mut t, &mut pulse, &mut never_trigger());
    assert!((t.rotation.x - TAU / 2.0).abs() < 1e-5);
    assert_eq!(t.rotation.x, t.rotation.y);
}

#[test]
fn degenerate_windows_are_rejected() {
    assert_eq!(
        ScrollWindow::new(5.0, 5.0),
        Err(RuleError::EmptyWindow(5.0))
    );
    assert_eq!(
        ScrollWindow::new(9.0, 3.0),
        Err(RuleError::InvertedWindow {
            start: 9.0,
            end: 3.0
        })
    );
    assert_eq!(ScrollWindow::new(f32::NAN, 3.0), Err(RuleError::NonFinite));
    assert!(MoveRule::new(1.0, 1.0, Vec2::ZERO, Vec2::ONE).is_err());
    assert!(RotateRule::new(2.0, 1.0).is_err());
}

#[test]
fn window_percent_is_unclamped() {
    let w = ScrollWindow::new(100.0, 300.0).unwrap();
    assert_eq!(w.percent(100.0), 0.0);
    assert_eq!(w.percent(300.0), 1.0);
    assert_eq!(w.percent(500.0), 2.0);
    assert_eq!(w.percent(0.0), -0.5);
}

#[test]
fn pulse_stays_in_bounds_and_completes_cycles() {
    let rule = PulseScaleRule::new(4400.0);
    let mut state = PulseState::Idle;
    let mut scale = Vec2::ONE;
    let mut rng = always_trigger();
    let mut cycles = 0;
    for _ in 0..2000 {
        let before = state;
        let before_scale = scale;
        rule.step(5000.0, &mut state, &mut scale, &mut rng);
        assert!(scale.x >= PULSE_MIN_SCALE && scale.x <= PULSE_MAX_SCALE);
        assert_eq!(scale.x, scale.y);
        if before == PulseState::Idle && state == PulseState::Shrinking {
            // a new cycle only starts from full size
            assert_eq!(before_scale, Vec2::ONE);
        }
        if before == PulseState::Growing && state == PulseState::Idle {
            assert_eq!(scale, Vec2::ONE);
            cycles += 1;
        }
    }
    assert!(cycles >= 2, "expected repeated pulses, got {cycles}");
}

#[test]
fn pulse_never_starts_without_a_trigger() {
    let rule = PulseScaleRule::new(0.0);
    let mut state = PulseState::Idle;
    let mut scale = Vec2::ONE;
    let mut rng = never_trigger();
    for _ in 0..500 {
        rule.step(10.0, &mut state, &mut scale, &mut rng);
    }
    assert_eq!(state, PulseState::Idle);
    assert_eq!(scale, Vec2::ONE);
}

#[test]
fn pulse_below_threshold_forces_unit_scale() {
    let vp = Viewport::from_height(1000.0).unwrap();
    let rule = PulseScaleRule::new(vp.h(PULSE_START_RATIO));
    let mut state = PulseState::Growing;
    let mut scale = Vec2::splat(0.85);
    let mut rng = always_trigger();
    for frame in 0..1000 {
        rule.step(1000.0 + frame as f32, &mut state, &mut scale, &mut rng);
        assert_eq!(scale, Vec2::ONE, "frame {frame}");
        assert_eq!(state, PulseState::Idle);
    }
}

#[test]
fn pulse_with_seeded_rng_is_reproducible() {
    let rule = PulseScaleRule::new(0.0);
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = PulseState::Idle;
        let mut scale = Vec2::ONE;
        let mut trace = Vec::new();
        for _ in 0..3000 {
            rule.step(1.0, &mut state, &mut scale, &mut rng);
            trace.push(scale.x);
        }
        trace
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn follow_tracks_offset() {
    let rule = AnimationRule::Follow { base_y: -20.0 };
    let mut t = Transform::at(5.0, 0.0);
    let mut pulse = PulseState::Idle;
    rule.evaluate(300.0, &mut t, &mut pulse, &mut never_trigger());
    assert_eq!(t.position.x, 5.0);
    assert_eq!(t.position.y, 280.0);
}

#[test]
fn transform_matrix_places_quad_corners() {
    let mut t = Transform::at(10.0, 20.0);
    t.scale = Vec2::splat(0.5);
    let corner = t.matrix().transform_point3(glam::Vec3::new(2.0, 2.0, 0.0));
    assert!((corner - glam::Vec3::new(11.0, 21.0, 0.0)).length() < 1e-5);
}
