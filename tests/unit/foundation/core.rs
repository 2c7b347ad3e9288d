use super::*;

#[test]
fn from_width_keeps_sixteen_by_nine() {
    for w in [1.0, 320.0, 959.5, 960.0, 1920.0, 3840.25] {
        let v = Viewport::from_width(w, 1.0).unwrap();
        assert!((v.height - w / (16.0 / 9.0)).abs() < 1e-9);
        assert!((v.width / v.height - ASPECT_RATIO).abs() < 1e-9);
    }
}

#[test]
fn viewport_rejects_non_positive_sizes() {
    assert!(Viewport::from_width(0.0, 1.0).is_err());
    assert!(Viewport::from_width(-5.0, 1.0).is_err());
    assert!(Viewport::from_width(f64::NAN, 1.0).is_err());
    assert!(Viewport::new(10.0, 0.0, 1.0).is_err());
}

#[test]
fn density_below_one_falls_back_to_one() {
    assert_eq!(Viewport::from_width(960.0, 0.5).unwrap().density, 1.0);
    assert_eq!(Viewport::from_width(960.0, f64::NAN).unwrap().density, 1.0);
    assert_eq!(Viewport::from_width(960.0, 2.0).unwrap().density, 2.0);
}

#[test]
fn canvas_rounds_physical_pixels() {
    let v = Viewport::new(960.0, 540.0, 1.5).unwrap();
    assert_eq!(
        v.canvas(),
        Canvas {
            width: 1440,
            height: 810
        }
    );

    let v = Viewport::from_width(1000.0, 1.0).unwrap();
    assert_eq!(v.canvas().height, 563);
}

#[test]
fn hand_built_viewport_can_be_undrawable() {
    let v = Viewport {
        width: 0.0,
        height: 540.0,
        density: 1.0,
    };
    assert!(!v.is_drawable());
    assert!(Viewport::new(960.0, 540.0, 1.0).unwrap().is_drawable());
}

#[test]
fn timestamp_secs_since_saturates() {
    let a = Timestamp::from_millis(1500);
    let b = Timestamp::from_millis(500);
    assert!((a.secs_since(b) - 1.0).abs() < 1e-12);
    assert_eq!(b.secs_since(a), 0.0);
    assert_eq!(Timestamp::from_secs_f64(-3.0), Timestamp::ZERO);
}

#[test]
fn clamp_elapsed_rejects_garbage() {
    assert_eq!(clamp_elapsed(-1.0), 0.0);
    assert_eq!(clamp_elapsed(f64::NAN), 0.0);
    assert_eq!(clamp_elapsed(f64::INFINITY), 0.0);
    assert_eq!(clamp_elapsed(2.5), 2.5);
}

#[test]
fn transform_to_affine_identity_and_translation() {
    let t = Transform2D::default();
    assert_eq!(t.to_affine(), Affine::IDENTITY);

    let t = Transform2D::translate(10.0, -2.5);
    assert_eq!(t.to_affine(), Affine::translate(Vec2::new(10.0, -2.5)));
}

#[test]
fn translate_rotate_applies_rotation_after_translation() {
    let t = Transform2D::translate_rotate(5.0, 0.0, std::f64::consts::FRAC_PI_2);
    let p = t.to_affine() * Point::new(1.0, 0.0);
    assert!((p.x - 5.0).abs() < 1e-12);
    assert!((p.y - 1.0).abs() < 1e-12);
}

#[test]
fn transform_serializes_as_translate_and_rotation() {
    let t = Transform2D::translate_rotate(1.5, -2.0, 0.25);
    let json = serde_json::to_value(t).unwrap();
    assert_eq!(json["rotation_rad"], 0.25);
    assert_eq!(json.as_object().unwrap().len(), 2);
}

#[test]
fn premultiply_rounds() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.to_array(), [128, 64, 0, 128]);
}
