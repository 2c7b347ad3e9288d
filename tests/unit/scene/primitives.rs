use kurbo::Shape;

use super::*;

#[test]
fn oversized_radius_clamps_to_half_the_short_side() {
    let clamped = rounded_rect(10.0, 20.0, 40.0, 12.0, 500.0);
    let exact = rounded_rect(10.0, 20.0, 40.0, 12.0, 6.0);
    assert_eq!(clamped, exact);
    assert_eq!(clamp_corner_radius(40.0, 12.0, 500.0), 6.0);
}

#[test]
fn negative_and_nan_radius_become_square_corners() {
    let square = rounded_rect(0.0, 0.0, 8.0, 8.0, 0.0);
    assert_eq!(rounded_rect(0.0, 0.0, 8.0, 8.0, -3.0), square);
    assert_eq!(rounded_rect(0.0, 0.0, 8.0, 8.0, f64::NAN), square);
}

#[test]
fn rounded_rect_stays_inside_its_box() {
    let bb = rounded_rect(5.0, 5.0, 30.0, 10.0, 4.0).bounding_box();
    assert!((bb.x0 - 5.0).abs() < 1e-9 && (bb.x1 - 35.0).abs() < 1e-9);
    assert!((bb.y0 - 5.0).abs() < 1e-9 && (bb.y1 - 15.0).abs() < 1e-9);
}

#[test]
fn negative_size_collapses_instead_of_mirroring() {
    let bb = rounded_rect(10.0, 10.0, -20.0, 5.0, 2.0).bounding_box();
    assert_eq!(bb.width(), 0.0);
    assert!(bb.x0 >= 10.0 - 1e-9);
}

#[test]
fn zero_width_stroke_is_empty() {
    let l = line(Point::ZERO, Point::new(10.0, 0.0));
    assert!(stroke(&l, 0.0).elements().is_empty());
    let bb = stroke(&l, 2.0).bounding_box();
    assert!((bb.height() - 2.0).abs() < 1e-3);
}

#[test]
fn stroke_ends_flush_with_the_line() {
    let l = line(Point::ZERO, Point::new(10.0, 0.0));
    let bb = stroke(&l, 2.0).bounding_box();
    assert!(bb.x0.abs() < 1e-3, "{bb:?}");
    assert!((bb.x1 - 10.0).abs() < 1e-3, "{bb:?}");
}

#[test]
fn union_keeps_every_subpath() {
    let a = circle(Point::ZERO, 1.0);
    let b = circle(Point::new(5.0, 0.0), 1.0);
    let n = a.elements().len() + b.elements().len();
    assert_eq!(union([a, b]).elements().len(), n);
}

#[test]
fn dome_spans_upper_half_only() {
    let bb = arc_segment(Point::ZERO, 10.0, std::f64::consts::PI, std::f64::consts::PI)
        .bounding_box();
    assert!((bb.y0 + 10.0).abs() < 0.1);
    assert!(bb.y1.abs() < 0.1);
    assert!((bb.width() - 20.0).abs() < 0.1);
}

#[test]
fn linear_gradient_pads_and_interpolates() {
    let a = Color::hex(0x000000);
    let b = Color::hex(0xffffff);
    let g = Gradient::linear(Point::ZERO, Point::new(0.0, 100.0), &[(0.0, a), (1.0, b)]);
    assert_eq!(g.color_at(Point::new(50.0, -10.0)), a);
    assert_eq!(g.color_at(Point::new(0.0, 250.0)), b);
    let mid = g.color_at(Point::new(7.0, 50.0));
    assert!((i32::from(mid.r) - 128).abs() <= 1);
}

#[test]
fn three_stop_gradient_hits_middle_stop() {
    let stops = [
        (0.0, Color::hex(0x9ed8ff)),
        (0.45, Color::hex(0xcbe9ff)),
        (1.0, Color::hex(0xf6f3ec)),
    ];
    let g = Gradient::linear(Point::ZERO, Point::new(0.0, 1.0), &stops);
    assert_eq!(g.color_at(Point::new(0.0, 0.45)), Color::hex(0xcbe9ff));
}

#[test]
fn stops_are_sorted_and_clamped() {
    let g = Gradient::linear(
        Point::ZERO,
        Point::new(1.0, 0.0),
        &[(1.5, Color::hex(0x00ff00)), (-1.0, Color::hex(0xff0000))],
    );
    assert_eq!(g.stops[0].offset, 0.0);
    assert_eq!(g.stops[1].offset, 1.0);
    assert_eq!(g.stops[0].color, Color::hex(0xff0000));
}

#[test]
fn radial_gradient_is_solid_inside_inner_radius() {
    let glow = Color::hex(0xfff7c9);
    let g = Gradient::radial(Point::new(10.0, 10.0), 2.0, 10.0, &[(0.0, glow), (1.0, glow.with_alpha(0.0))]);
    assert_eq!(g.color_at(Point::new(11.0, 10.0)), glow);
    assert_eq!(g.color_at(Point::new(30.0, 10.0)).a, 0);
    assert_eq!(g.param_at(Point::new(16.0, 10.0)), 0.5);
}

#[test]
fn degenerate_linear_gradient_uses_first_stop() {
    let g = Gradient::linear(Point::ZERO, Point::ZERO, &[(0.0, Color::hex(0x123456)), (1.0, Color::hex(0xffffff))]);
    assert_eq!(g.color_at(Point::new(3.0, 4.0)), Color::hex(0x123456));
}

#[test]
fn paint_kinds() {
    assert_eq!(Paint::from(Color::hex(0x111111)).kind(), "solid");
    let lin = Gradient::linear(Point::ZERO, Point::new(1.0, 1.0), &[(0.0, Color::hex(0x222222))]);
    assert_eq!(Paint::from(lin).kind(), "linear");
    let rad = Gradient::radial(Point::ZERO, 0.0, 1.0, &[]);
    let paint = Paint::from(rad);
    assert_eq!(paint.kind(), "radial");
    assert_eq!(paint.leading_color(), Color::TRANSPARENT);
}
