use std::fmt::Write as _;

use crate::foundation::core::Point;
use crate::svg::curve::CurveKind;
use crate::svg::object::SvgObject;

fn push_point(out: &mut String, p: Point) {
    // Writing into a String cannot fail.
    let _ = write!(out, " {:.6} {:.6}", p.x, p.y);
}

/// Render an object as SVG path data using only absolute `M L Q C Z` commands.
///
/// Coordinates use 6-decimal fixed precision. Contours ending on their start point are closed
/// with `Z`, so [`crate::svg::parse::parse_path`] reproduces the same curves.
pub fn to_path_string(obj: &SvgObject) -> String {
    let mut out = String::new();
    for path in &obj.paths {
        let Some(start) = path.first_point() else {
            continue;
        };
        if !out.is_empty() {
            out.push(' ');
        }
        out.push('M');
        push_point(&mut out, start);
        for c in &path.curves {
            match c.kind {
                CurveKind::Line { p1 } => {
                    out.push_str(" L");
                    push_point(&mut out, p1);
                }
                CurveKind::Bezier2 { p1, p2 } => {
                    out.push_str(" Q");
                    push_point(&mut out, p1);
                    push_point(&mut out, p2);
                }
                CurveKind::Bezier3 { p1, p2, p3 } => {
                    out.push_str(" C");
                    push_point(&mut out, p1);
                    push_point(&mut out, p2);
                    push_point(&mut out, p3);
                }
            }
        }
        if path.is_closed() {
            out.push_str(" Z");
        }
    }
    out
}
