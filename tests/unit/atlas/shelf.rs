use super::*;

#[test]
fn places_left_to_right_then_wraps() {
    let mut s = TextureConstraint::new();
    let atlas = (10, 10);
    assert_eq!(s.place((4, 3), atlas), Some((0, 0)));
    assert_eq!(s.place((4, 5), atlas), Some((4, 0)));
    // 8 + 4 > 10: new line under the tallest quad.
    assert_eq!(s.place((4, 2), atlas), Some((0, 5)));
    assert_eq!(s.line_height, 2);
}

#[test]
fn vertical_overflow_leaves_state_untouched() {
    let mut s = TextureConstraint::new();
    let atlas = (10, 10);
    assert!(s.place((10, 8), atlas).is_some());
    let before = s;
    assert_eq!(s.place((5, 5), atlas), None);
    assert_eq!(s, before);
    // A short quad still fits under the first line.
    assert_eq!(s.place((5, 2), atlas), Some((0, 8)));
}

#[test]
fn oversized_quads_never_fit() {
    let mut s = TextureConstraint::new();
    assert_eq!(s.place((11, 1), (10, 10)), None);
    assert_eq!(s.place((1, 11), (10, 10)), None);
}

#[test]
fn reset_returns_to_origin() {
    let mut s = TextureConstraint::new();
    s.place((3, 3), (10, 10));
    s.reset();
    assert_eq!(s, TextureConstraint::new());
}
