//! SVG document import through `usvg`.
//!
//! `usvg` resolves styles, `<use>` references and basic shapes into plain paths; every visible
//! path becomes one member object with its absolute transform baked in.

use anyhow::Context;

use crate::foundation::core::{FillType, Point, Rgba, Vec2};
use crate::foundation::error::MathAnimResult;
use crate::svg::group::SvgGroup;
use crate::svg::object::SvgObject;

fn map_point(ts: &usvg::Transform, p: usvg::tiny_skia_path::Point) -> Point {
    let (x, y) = (f64::from(p.x), f64::from(p.y));
    Point::new(
        f64::from(ts.sx) * x + f64::from(ts.kx) * y + f64::from(ts.tx),
        f64::from(ts.ky) * x + f64::from(ts.sy) * y + f64::from(ts.ty),
    )
}

fn object_from_path(path: &usvg::Path) -> SvgObject {
    use usvg::tiny_skia_path::PathSegment;

    let ts = path.abs_transform();
    let mut obj = SvgObject::create_default();
    for seg in path.data().segments() {
        match seg {
            PathSegment::MoveTo(p) => obj.move_to(map_point(&ts, p), true),
            PathSegment::LineTo(p) => obj.line_to(map_point(&ts, p), true),
            PathSegment::QuadTo(p1, p2) => {
                obj.bezier2_to(map_point(&ts, p1), map_point(&ts, p2), true);
            }
            PathSegment::CubicTo(p1, p2, p3) => obj.bezier3_to(
                map_point(&ts, p1),
                map_point(&ts, p2),
                map_point(&ts, p3),
                true,
            ),
            PathSegment::Close => {
                if obj.path_open && obj.paths.last().is_some_and(|p| !p.is_empty()) {
                    let is_hole = obj.paths.len() > 1;
                    obj.close_path(true, is_hole);
                }
            }
        }
    }

    if let Some(fill) = path.fill() {
        let alpha = fill.opacity().get();
        obj.fill_color = match fill.paint() {
            usvg::Paint::Color(c) => {
                let mut rgba = Rgba::from_rgba8(c.red, c.green, c.blue, 255);
                rgba.a = alpha;
                rgba
            }
            // Gradients and patterns fall back to their opacity over white.
            _ => Rgba::new(1.0, 1.0, 1.0, alpha),
        };
        obj.fill_type = match fill.rule() {
            usvg::FillRule::NonZero => FillType::NonZero,
            usvg::FillRule::EvenOdd => FillType::EvenOdd,
        };
    }
    obj.finalize();
    obj
}

fn collect(group: &usvg::Group, out: &mut SvgGroup) {
    for child in group.children() {
        match child {
            usvg::Node::Group(g) => collect(g.as_ref(), out),
            usvg::Node::Path(p) if p.is_visible() => {
                let obj = object_from_path(p);
                if obj.is_empty() {
                    continue;
                }
                let name = if p.id().is_empty() {
                    format!("path{}", out.len())
                } else {
                    p.id().to_owned()
                };
                out.push_object(&name, obj, Vec2::ZERO);
            }
            _ => {}
        }
    }
}

impl SvgGroup {
    /// Parse an SVG document into a group with one member per visible, non-empty path.
    ///
    /// Geometry is in document user units with transforms applied; call
    /// [`SvgGroup::normalize`] for unit coordinates.
    pub fn from_svg_str(text: &str) -> MathAnimResult<SvgGroup> {
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_str(text, &opts).context("parse svg tree")?;
        let mut group = SvgGroup::new();
        collect(tree.root(), &mut group);
        group.calculate_bbox();
        tracing::debug!(objects = group.len(), "imported svg document");
        Ok(group)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/import.rs"]
mod tests;
