use super::*;
use crate::foundation::core::Point;
use crate::scene::primitives::{self, Gradient};

fn list(ops: Vec<DrawOp>) -> DisplayList {
    DisplayList {
        viewport: Viewport::new(100.0, 56.25, 2.0).unwrap(),
        elapsed: 0.25,
        ops,
    }
}

#[test]
fn save_restore_brackets_transforms() {
    let mut p = Painter::new();
    p.set_transform(Affine::scale(2.0));
    p.save();
    p.translate(10.0, 0.0);
    p.fill(Part::Face, primitives::rect(0.0, 0.0, 1.0, 1.0), Color::hex(0x000000));
    p.restore();
    p.fill(Part::Face, primitives::rect(0.0, 0.0, 1.0, 1.0), Color::hex(0x000000));

    let ops = p.finish();
    let a = ops[0].as_fill().unwrap().transform * Point::ORIGIN;
    let b = ops[1].as_fill().unwrap().transform * Point::ORIGIN;
    assert_eq!(a, Point::new(20.0, 0.0));
    assert_eq!(b, Point::ORIGIN);
}

#[test]
fn concat_applies_in_local_space() {
    let mut p = Painter::new();
    p.translate(5.0, 0.0);
    p.rotate(std::f64::consts::FRAC_PI_2);
    let pt = p.transform() * Point::new(1.0, 0.0);
    assert!((pt.x - 5.0).abs() < 1e-12);
    assert!((pt.y - 1.0).abs() < 1e-12);
}

#[test]
fn unbalanced_restore_is_ignored() {
    let mut p = Painter::new();
    p.translate(3.0, 4.0);
    p.restore();
    assert_eq!(p.transform() * Point::ORIGIN, Point::new(3.0, 4.0));
    assert_eq!(p.depth(), 0);
}

#[test]
fn with_transform_restores_even_when_nested() {
    let mut p = Painter::new();
    p.with_transform(Affine::translate((1.0, 0.0)), |p| {
        p.with_transform(Affine::translate((0.0, 1.0)), |p| {
            assert_eq!(p.depth(), 2);
            assert_eq!(p.transform() * Point::ORIGIN, Point::new(1.0, 1.0));
        });
        assert_eq!(p.depth(), 1);
    });
    assert_eq!(p.depth(), 0);
    assert_eq!(p.transform(), Affine::IDENTITY);
}

#[test]
fn reset_drops_transform_state_but_keeps_ops() {
    let mut p = Painter::new();
    p.save();
    p.translate(9.0, 9.0);
    p.clear(Rect::new(0.0, 0.0, 1.0, 1.0));
    p.reset();
    assert_eq!(p.depth(), 0);
    assert_eq!(p.transform(), Affine::IDENTITY);
    assert_eq!(p.ops().len(), 1);
}

#[test]
fn counts_and_layers() {
    let mut p = Painter::new();
    p.fill(Part::Sky, primitives::rect(0.0, 0.0, 1.0, 1.0), Color::hex(0x9ed8ff));
    for _ in 0..3 {
        p.fill(Part::Cloud, primitives::circle(Point::ZERO, 1.0), Color::hex(0xffffff));
    }
    p.fill(Part::Shadow, primitives::circle(Point::ZERO, 1.0), Color::hex(0x000000));
    let dl = list(p.finish());
    assert_eq!(dl.count(Part::Cloud), 3);
    assert_eq!(dl.count(Part::Dust), 0);
    assert_eq!(dl.first(Part::Sky).unwrap().paint.leading_color(), Color::hex(0x9ed8ff));
    assert_eq!(Part::Dust.layer(), Layer::Background);
    assert_eq!(Part::Shadow.layer(), Layer::Figure);
    assert_eq!(Part::HelmetHighlight.layer(), Layer::Figure);
}

#[test]
fn summary_reports_device_bounds() {
    let mut p = Painter::new();
    p.set_transform(Affine::scale(2.0));
    p.clear(Rect::new(0.0, 0.0, 100.0, 56.25));
    p.fill(
        Part::Ground,
        primitives::rect(0.0, 40.0, 100.0, 16.25),
        Gradient::linear(Point::new(0.0, 40.0), Point::new(0.0, 56.25), &[(0.0, Color::hex(0xd1b48c))]),
    );
    let summary = list(p.finish()).summary();
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].part, None);
    assert_eq!(summary[0].paint, "clear");
    assert_eq!(summary[0].bounds, [0.0, 0.0, 200.0, 112.5]);
    assert_eq!(summary[1].part, Some(Part::Ground));
    assert_eq!(summary[1].paint, "linear");
    assert_eq!(summary[1].bounds[1], 80.0);

    let json = serde_json::to_value(&summary[1]).unwrap();
    assert_eq!(json["part"], "ground");
}

#[test]
fn fingerprint_tracks_content() {
    let build = |x: f64| {
        let mut p = Painter::new();
        p.fill(Part::Dust, primitives::circle(Point::new(x, 1.0), 1.0), Color::hex(0xffffff));
        list(p.finish())
    };
    assert_eq!(build(1.0).fingerprint(), build(1.0).fingerprint());
    assert_ne!(build(1.0).fingerprint(), build(1.5).fingerprint());

    let mut other_part = build(1.0);
    if let DrawOp::Fill(f) = &mut other_part.ops[0] {
        f.part = Part::Eye;
    }
    assert_ne!(build(1.0).fingerprint(), other_part.fingerprint());
}
