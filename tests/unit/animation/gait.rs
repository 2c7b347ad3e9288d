use super::*;

#[test]
fn first_frame_uses_zero_phase_values() {
    let g = Gait::at(0.0);
    assert_eq!(g.phase, 0.0);
    assert_eq!(g.stride, 0.0);
    assert_eq!(g.sway(), 0.0);
    assert_eq!(g.bob(), 1.0);
    assert_eq!(g.head_tilt(), 0.0);
    assert_eq!(g.support_lift(), 1.0);
}

#[test]
fn negative_or_nan_elapsed_behaves_like_zero() {
    assert_eq!(Gait::at(-4.0), Gait::at(0.0));
    assert_eq!(Gait::at(f64::NAN), Gait::at(0.0));
}

#[test]
fn phase_is_linear_in_elapsed() {
    let g = Gait::at(1.5);
    assert!((g.phase - 3.3).abs() < 1e-12);
    assert!((g.stride - 3.3f64.sin()).abs() < 1e-12);
}

#[test]
fn harmonics_stay_bounded() {
    for i in 0..5000 {
        let g = Gait::at(i as f64 * 0.011);
        assert!(g.stride.abs() <= 1.0);
        assert!(g.sway().abs() <= 1.0);
        assert!(g.bob().abs() <= 1.0);
        assert!(g.head_tilt().abs() <= 0.12);
        assert!(g.free_arm_swing().abs() <= PI * 0.08);
        assert!(g.tool_jostle().abs() <= 1.0f64.sin() + 1e-12);
    }
}

#[test]
fn stride_period_matches_angular_speed() {
    let period = 2.0 * PI / GAIT_ANGULAR_SPEED;
    let a = Gait::at(0.7);
    let b = Gait::at(0.7 + period);
    assert!((a.stride - b.stride).abs() < 1e-9);
}
