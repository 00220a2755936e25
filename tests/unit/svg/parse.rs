use super::*;
use crate::foundation::core::Rect;
use crate::svg::curve::CurveKind;
use crate::svg::write::to_path_string;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn parses_square_with_close() {
    let o = parse_path("M-1,-1 L-1,1 L1,1 L1,-1 Z").unwrap();
    assert_eq!(o.num_paths(), 1);
    assert_eq!(o.num_curves(), 4);
    assert_eq!(o.bbox, Rect::new(-1.0, -1.0, 1.0, 1.0));
}

#[test]
fn implicit_lines_after_move_and_repeated_commands() {
    let o = parse_path("m10 10 5 0 0 5 l-5 0 -1 -1").unwrap();
    assert_eq!(o.num_curves(), 4);
    assert_eq!(o.cursor, pt(9.0, 14.0));
}

#[test]
fn compact_numbers_are_split_on_sign_and_dot() {
    let o = parse_path("M0-1.5.5-30L3e1-2E0").unwrap();
    let c = o.paths[0].curves[0];
    assert_eq!(c.p0, pt(0.0, -1.5));
    // ".5" starts a new pair after "-1.5": implicit line to (0.5, -30).
    assert_eq!(c.end(), pt(0.5, -30.0));
    assert_eq!(o.paths[0].curves[1].end(), pt(30.0, -2.0));
}

#[test]
fn every_command_family_is_supported() {
    let o = parse_path("M0 0 H10 V10 h-2 v-2 Q4 4 2 8 T0 0 C1 1 2 2 3 3 S5 5 6 6 A2 2 0 0 1 10 6 Z")
        .unwrap();
    let degrees: Vec<u8> = o.curves().map(|c| c.degree()).collect();
    assert_eq!(&degrees[..4], &[1, 1, 1, 1]);
    assert_eq!(&degrees[4..8], &[2, 2, 3, 3]);
    assert!(degrees[8..].iter().take(1).all(|&d| d == 3));
    assert_eq!(o.num_paths(), 1);
}

#[test]
fn arc_flags_may_run_together() {
    let spaced = parse_path("M0 0 A1 1 0 0 1 2 0").unwrap();
    let packed = parse_path("M0 0A1 1 0 012 0").unwrap();
    assert_eq!(spaced.paths, packed.paths);
    assert_eq!(packed.num_curves(), 2);
}

#[test]
fn second_subpath_after_close_is_a_hole() {
    let o = parse_path("M0 0 H10 V10 H0 Z M2 2 H4 V4 H2 Z").unwrap();
    assert_eq!(o.num_paths(), 2);
    assert!(!o.paths[0].is_hole);
    assert!(o.paths[1].is_hole);
}

#[test]
fn close_on_empty_subpath_is_ignored() {
    let o = parse_path("M5 5 Z").unwrap();
    assert!(o.is_empty());
}

#[test]
fn errors_carry_byte_offsets() {
    let err = parse_path("L0 0").unwrap_err();
    assert!(matches!(err, MathAnimError::Parse { offset: 0, .. }));

    let err = parse_path("M0 0 L1").unwrap_err();
    assert!(matches!(err, MathAnimError::Parse { offset: 7, .. }));

    let err = parse_path("M0 0 X1 1").unwrap_err();
    assert!(matches!(err, MathAnimError::Parse { offset: 5, .. }));

    let err = parse_path("M0 0 A1 1 0 2 1 3 3").unwrap_err();
    assert!(matches!(err, MathAnimError::Parse { offset: 12, .. }));

    let err = parse_path("M1e 0").unwrap_err();
    assert!(matches!(err, MathAnimError::Parse { offset: 2, .. }));
}

#[test]
fn written_path_reparses_to_the_same_curves() {
    let o = parse_path("M0 0 Q5 10 10 0 C12 2 14 2 16 0 L16 -4 Z M20 20 L25 20 L25 25").unwrap();
    let text = to_path_string(&o);
    assert!(text.starts_with("M 0.000000 0.000000 Q"));

    let back = parse_path(&text).unwrap();
    assert_eq!(back.num_paths(), o.num_paths());
    for (a, b) in o.curves().zip(back.curves()) {
        assert_eq!(a.degree(), b.degree());
        let (pa, pb) = (a.to_cubic_points(), b.to_cubic_points());
        for i in 0..4 {
            assert!(pa[i].distance(pb[i]) < 1e-6);
        }
    }
    assert!(matches!(
        back.paths[0].curves[3].kind,
        CurveKind::Line { p1 } if p1 == pt(0.0, 0.0)
    ));
}
