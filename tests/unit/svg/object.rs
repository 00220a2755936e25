use super::*;
use kurbo::PathEl;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Circle of radius `r` built from four cubic quarter arcs.
fn circle(r: f64) -> SvgObject {
    const K: f64 = 0.552_284_749_8;
    let k = K * r;
    let mut o = SvgObject::default();
    o.move_to(pt(r, 0.0), true);
    o.bezier3_to(pt(r, k), pt(k, r), pt(0.0, r), true);
    o.bezier3_to(pt(-k, r), pt(-r, k), pt(-r, 0.0), true);
    o.bezier3_to(pt(-r, -k), pt(-k, -r), pt(0.0, -r), true);
    o.bezier3_to(pt(k, -r), pt(r, -k), pt(r, 0.0), true);
    o.close_path(true, false);
    o.finalize();
    o
}

fn square(side: f64) -> SvgObject {
    let mut o = SvgObject::default();
    o.move_to(pt(0.0, 0.0), true);
    o.hz_line_to(side, true);
    o.vt_line_to(side, true);
    o.hz_line_to(0.0, true);
    o.close_path(true, false);
    o.finalize();
    o
}

#[test]
fn four_bezier_circle_perimeter_is_close_to_two_pi_r() {
    let r = 10.0;
    let o = circle(r);
    assert_eq!(o.num_curves(), 4);
    let expected = std::f64::consts::TAU * r;
    let err = (o.approximate_perimeter - expected).abs() / expected;
    assert!(err < 0.005, "relative error {err}");
}

#[test]
fn circle_bbox_is_tight() {
    let o = circle(2.0);
    assert!((o.bbox.x0 + 2.0).abs() < 1e-9 && (o.bbox.x1 - 2.0).abs() < 1e-9);
    assert!((o.bbox.y0 + 2.0).abs() < 1e-9 && (o.bbox.y1 - 2.0).abs() < 1e-9);
}

#[test]
fn empty_object_has_zero_bbox_and_perimeter() {
    let mut o = SvgObject::create_default();
    o.finalize();
    assert!(o.is_empty());
    assert_eq!(o.bbox, Rect::ZERO);
    assert_eq!(o.approximate_perimeter, 0.0);
}

#[test]
fn bezpath_closes_closed_contours() {
    let o = square(4.0);
    let els: Vec<_> = o.to_bezpath().elements().to_vec();
    assert_eq!(els.first(), Some(&PathEl::MoveTo(pt(0.0, 0.0))));
    assert_eq!(els.last(), Some(&PathEl::ClosePath));
    assert_eq!(els.len(), 6);
}

#[test]
fn trimmed_half_square_keeps_two_sides() {
    let o = square(4.0);
    let half = o.trimmed(0.5);
    assert_eq!(half.num_curves(), 2);
    assert!((half.approximate_perimeter - 8.0).abs() < 1e-9);
    assert_eq!(half.cursor, pt(4.0, 4.0));
}

#[test]
fn trimmed_splits_the_boundary_curve() {
    let o = square(4.0);
    let part = o.trimmed(0.3);
    assert_eq!(part.num_curves(), 2);
    assert!((part.approximate_perimeter - 4.8).abs() < 1e-9);
    assert!(part.cursor.distance(pt(4.0, 0.8)) < 1e-9);
}

#[test]
fn trimmed_extremes() {
    let o = circle(1.0);
    assert!(o.trimmed(0.0).is_empty());
    let full = o.trimmed(1.0);
    assert_eq!(full.num_curves(), o.num_curves());
    assert!((full.approximate_perimeter - o.approximate_perimeter).abs() < 1e-9);
}

#[test]
fn transformed_moves_bbox() {
    let o = square(2.0).transformed(Affine::translate((10.0, 5.0)) * Affine::scale(3.0));
    assert_eq!(o.bbox, Rect::new(10.0, 5.0, 16.0, 11.0));
    assert_eq!(o.approximate_perimeter, 24.0);
}
