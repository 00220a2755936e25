use super::*;
use crate::foundation::core::Point;
use crate::svg::parse::parse_path;

fn sample() -> SvgObject {
    let mut o = parse_path("M0 0 Q5 10 10 0 L10 -5 Z M20 0 C21 1 22 1 23 0").unwrap();
    o.fill_type = FillType::EvenOdd;
    o.fill_color = Rgba::new(0.25, 0.5, 0.75, 1.0);
    o
}

fn assert_same_geometry(a: &SvgObject, b: &SvgObject) {
    assert_eq!(a.num_paths(), b.num_paths());
    assert_eq!(a.num_curves(), b.num_curves());
    for (ca, cb) in a.curves().zip(b.curves()) {
        let (pa, pb) = (ca.to_cubic_points(), cb.to_cubic_points());
        for i in 0..4 {
            assert!(pa[i].distance(pb[i]) < 1e-6, "{:?} vs {:?}", pa[i], pb[i]);
        }
    }
}

#[test]
fn record_layout_is_little_endian() {
    let mut o = SvgObject::create_default();
    o.move_to(Point::new(0.0, 0.0), true);
    o.line_to(Point::new(1.0, 0.0), true);
    o.fill_type = FillType::EvenOdd;

    let mut buf = Vec::new();
    write_svg_object(&mut buf, &o).unwrap();

    let text = to_path_string(&o);
    assert_eq!(buf[0], 1);
    assert_eq!(&buf[1..5], &1.0f32.to_le_bytes());
    assert_eq!(&buf[17..25], &(text.len() as u64).to_le_bytes());
    assert_eq!(&buf[25..], text.as_bytes());
}

#[test]
fn record_round_trip_keeps_style_and_geometry() {
    let o = sample();
    let mut buf = Vec::new();
    write_svg_object(&mut buf, &o).unwrap();
    let back = read_svg_object(&mut buf.as_slice()).unwrap();

    assert_eq!(back.fill_type, FillType::EvenOdd);
    assert_eq!(back.fill_color, o.fill_color);
    assert_same_geometry(&o, &back);
    assert!((back.approximate_perimeter - o.approximate_perimeter).abs() < 1e-5);
}

#[test]
fn truncated_record_is_a_serde_error() {
    let mut buf = Vec::new();
    write_svg_object(&mut buf, &sample()).unwrap();
    buf.truncate(buf.len() - 3);
    let err = read_svg_object(&mut buf.as_slice()).unwrap_err();
    assert!(matches!(err, MathAnimError::Serde(_)));
}

#[test]
fn unknown_fill_tag_is_rejected() {
    let mut buf = Vec::new();
    write_svg_object(&mut buf, &sample()).unwrap();
    buf[0] = 9;
    assert!(read_svg_object(&mut buf.as_slice()).is_err());
}

#[test]
fn soft_read_falls_back_to_default() {
    let garbage = [7u8, 1, 2];
    let o = read_svg_object_or_default(&mut garbage.as_slice());
    assert!(o.is_empty());
    assert_eq!(o.fill_color, Rgba::WHITE);
}

#[test]
fn file_container_round_trip() {
    let objs = vec![sample(), SvgObject::create_default()];
    let mut buf = Vec::new();
    write_svg_file(&mut buf, &objs).unwrap();
    assert_eq!(&buf[..4], b"MASV");

    let back = read_svg_file(&mut buf.as_slice()).unwrap();
    assert_eq!(back.len(), 2);
    assert_same_geometry(&objs[0], &back[0]);
    assert!(back[1].is_empty());
}

#[test]
fn file_with_bad_magic_or_version_is_rejected() {
    let mut buf = Vec::new();
    write_svg_file(&mut buf, &[]).unwrap();

    let mut bad_magic = buf.clone();
    bad_magic[0] = b'X';
    assert!(read_svg_file(&mut bad_magic.as_slice()).is_err());

    let mut bad_version = buf;
    bad_version[4] = 2;
    let err = read_svg_file(&mut bad_version.as_slice()).unwrap_err();
    assert!(err.to_string().contains("version 2"));
}

#[test]
fn json_form_holds_path_text() {
    let o = sample();
    let v = serde_json::to_value(&o).unwrap();
    assert_eq!(v["fill_type"], "EvenOdd");
    assert!(v["path"].as_str().unwrap().starts_with("M 0.000000 0.000000 Q"));

    let back: SvgObject = serde_json::from_value(v).unwrap();
    assert_same_geometry(&o, &back);
    assert_eq!(back.fill_color, o.fill_color);
}

#[test]
fn json_with_bad_path_fails() {
    let err = serde_json::from_str::<SvgObject>(r#"{"path":"L 1 1"}"#).unwrap_err();
    assert!(err.to_string().contains("parse error at byte 0"));
}
