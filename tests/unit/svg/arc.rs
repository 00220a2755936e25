use super::*;
use crate::svg::curve::CurveKind;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn started_at(p: Point) -> SvgObject {
    let mut o = SvgObject::default();
    o.move_to(p, true);
    o
}

fn assert_on_circle(o: &SvgObject, center: Point, r: f64) {
    for c in o.curves() {
        for i in 0..=8 {
            let d = c.eval(f64::from(i) / 8.0).distance(center);
            assert!((d - r).abs() < r * 1e-3, "point off circle: d={d} r={r}");
        }
    }
}

#[test]
fn zero_radius_is_a_single_line() {
    let mut arc = started_at(pt(0.0, 0.0));
    arc.arc_to(Vec2::ZERO, 0.0, false, true, pt(5.0, 5.0), true);

    let mut line = started_at(pt(0.0, 0.0));
    line.line_to(pt(5.0, 5.0), true);

    assert_eq!(arc.paths, line.paths);
    assert!(matches!(arc.paths[0].curves[0].kind, CurveKind::Line { .. }));
}

#[test]
fn coincident_endpoints_add_nothing() {
    let mut o = started_at(pt(3.0, 4.0));
    o.arc_to(Vec2::new(2.0, 2.0), 0.0, true, true, pt(3.0, 4.0), true);
    assert_eq!(o.num_curves(), 0);

    o.arc_to(Vec2::new(2.0, 2.0), 0.0, true, true, pt(0.0, 0.0), false);
    assert_eq!(o.num_curves(), 0);
}

#[test]
fn quarter_arc_is_one_segment() {
    let mut o = started_at(pt(1.0, 0.0));
    o.arc_to(Vec2::new(1.0, 1.0), 0.0, false, true, pt(0.0, 1.0), true);
    assert_eq!(o.num_curves(), 1);
    assert_on_circle(&o, Point::ORIGIN, 1.0);
}

#[test]
fn semicircle_is_two_segments_ending_exactly_at_dst() {
    let mut o = started_at(pt(0.0, 0.0));
    o.arc_to(Vec2::new(1.0, 1.0), 0.0, false, true, pt(2.0, 0.0), true);
    assert_eq!(o.num_curves(), 2);
    assert_eq!(o.cursor, pt(2.0, 0.0));
    assert_on_circle(&o, pt(1.0, 0.0), 1.0);
    assert!((o.paths[0].curves[0].end().y.abs() - 1.0).abs() < 1e-12);
}

#[test]
fn large_arc_flag_picks_the_long_way_round() {
    let mut o = started_at(pt(1.0, 0.0));
    o.arc_to(Vec2::new(1.0, 1.0), 0.0, true, true, pt(0.0, 1.0), true);
    assert_eq!(o.num_curves(), 3);
    assert_on_circle(&o, pt(1.0, 1.0), 1.0);
}

#[test]
fn segment_count_matches_sweep() {
    assert_eq!(arc_segment_count(FRAC_PI_2), 1);
    assert_eq!(arc_segment_count(-FRAC_PI_2 * 1.01), 2);
    assert_eq!(arc_segment_count(TAU * 0.99), 4);
    assert_eq!(arc_segment_count(1e-6), 1);
}

#[test]
fn small_radii_are_scaled_to_span_the_chord() {
    let mut o = started_at(pt(0.0, 0.0));
    o.arc_to(Vec2::new(1.0, 1.0), 0.0, false, false, pt(4.0, 0.0), true);
    assert_eq!(o.num_curves(), 2);
    assert_on_circle(&o, pt(2.0, 0.0), 2.0);
}

#[test]
fn rotated_ellipse_ends_at_dst() {
    let mut o = started_at(pt(0.0, 0.0));
    o.arc_to(Vec2::new(3.0, 1.0), 30.0, false, true, pt(2.0, 1.5), false);
    assert_eq!(o.cursor, pt(2.0, 1.5));
    assert!(o.curves().all(|c| c.degree() == 3));
    let arc = center_parameterization(
        pt(0.0, 0.0),
        pt(2.0, 1.5),
        Vec2::new(3.0, 1.0),
        30.0,
        false,
        true,
    )
    .unwrap();
    assert_eq!(o.num_curves(), arc_segment_count(arc.delta_theta));
}
