//! Morphing between two objects with different contour and curve counts.
//!
//! The object with fewer curves is split until both sides have the same structure (same number of
//! contours, same number of curves per contour); the matched curves are then blended pairwise.

use crate::foundation::core::Point;
use crate::foundation::math::round_half_up;
use crate::svg::curve::{Curve, CurveKind};
use crate::svg::object::SvgObject;
use crate::svg::path::Path;

/// A curve of the flattened object together with the contour it came from.
#[derive(Clone, Copy)]
struct Located {
    curve: Curve,
    path: usize,
}

fn flatten(obj: &SvgObject) -> Vec<Located> {
    obj.paths
        .iter()
        .enumerate()
        .flat_map(|(pi, path)| path.curves.iter().map(move |c| Located { curve: *c, path: pi }))
        .collect()
}

/// How many non-split curves the split curve at `split_idx` absorbs.
///
/// Pieces may run past the end of the current non-split contour; the caller opens a new output
/// contour pair at that point.
fn piece_count(split_len: usize, split_idx: usize, non_split_len: usize, ns_idx: usize) -> usize {
    let rem_s = split_len - split_idx;
    let rem_n = non_split_len - ns_idx;
    if rem_s == 1 {
        return rem_n;
    }
    // Leave at least one non-split curve for every remaining split curve.
    let max_k = rem_n - (rem_s - 1);
    (round_half_up(rem_n as f64 / rem_s as f64) as usize).clamp(1, max_k)
}

/// Cut `curve` into `k` consecutive pieces of equal parameter length.
fn split_into(curve: Curve, k: usize, out: &mut Vec<Curve>) {
    let mut rest = curve;
    for j in 0..k {
        if j + 1 == k {
            out.push(rest);
            break;
        }
        let s = 1.0 / (k - j) as f64;
        out.push(rest.split(0.0, s));
        rest = rest.split(s, 1.0);
    }
}

/// Restructure `split_obj` and `non_split_obj` so they have equal contour and curve counts.
///
/// `split_obj` must not have more curves than `non_split_obj`, and both must be non-empty.
fn equalize(split_obj: &SvgObject, non_split_obj: &SvgObject) -> (Vec<Path>, Vec<Path>) {
    let split = flatten(split_obj);
    let non_split = flatten(non_split_obj);
    debug_assert!(!split.is_empty() && split.len() <= non_split.len());

    let mut out_split: Vec<Path> = Vec::new();
    let mut out_non_split: Vec<Path> = Vec::new();
    let mut open: Option<(usize, usize)> = None;
    let mut pieces = Vec::new();
    let mut ns_idx = 0;

    for (si, located) in split.iter().enumerate() {
        let k = piece_count(split.len(), si, non_split.len(), ns_idx);
        pieces.clear();
        split_into(located.curve, k, &mut pieces);

        for (piece, ns) in pieces.iter().zip(&non_split[ns_idx..ns_idx + k]) {
            let key = (located.path, ns.path);
            if open != Some(key) {
                out_split.push(Path {
                    curves: Vec::new(),
                    is_hole: split_obj.paths[located.path].is_hole,
                });
                out_non_split.push(Path {
                    curves: Vec::new(),
                    is_hole: non_split_obj.paths[ns.path].is_hole,
                });
                open = Some(key);
            }
            if let (Some(a), Some(b)) = (out_split.last_mut(), out_non_split.last_mut()) {
                a.curves.push(*piece);
                b.curves.push(ns.curve);
            }
        }
        ns_idx += k;
    }
    debug_assert_eq!(ns_idx, non_split.len());

    (out_split, out_non_split)
}

fn lerp_curve(a: &Curve, b: &Curve, t: f64) -> Curve {
    match (a.kind, b.kind) {
        (CurveKind::Line { p1: a1 }, CurveKind::Line { p1: b1 }) => {
            Curve::line(a.p0.lerp(b.p0, t), a1.lerp(b1, t))
        }
        (CurveKind::Bezier2 { p1: a1, p2: a2 }, CurveKind::Bezier2 { p1: b1, p2: b2 }) => {
            Curve::bezier2(a.p0.lerp(b.p0, t), a1.lerp(b1, t), a2.lerp(b2, t))
        }
        _ => {
            let pa = a.to_cubic_points();
            let pb = b.to_cubic_points();
            Curve::from_cubic_points(std::array::from_fn(|i| pa[i].lerp(pb[i], t)))
        }
    }
}

/// Copy of `shape` with every point collapsed onto `center`, styled like `style`.
fn collapsed(shape: &SvgObject, center: Point, style: &SvgObject) -> SvgObject {
    SvgObject {
        paths: shape
            .paths
            .iter()
            .map(|p| Path {
                curves: p.curves.iter().map(|c| c.map_points(|_| center)).collect(),
                is_hole: p.is_hole,
            })
            .collect(),
        fill_color: style.fill_color,
        fill_type: style.fill_type,
        ..SvgObject::default()
    }
}

/// Blend `src` into `dst` at `t` in `[0, 1]`.
///
/// Curve counts are equalized by splitting the object with fewer curves, then matched curves are
/// interpolated point-wise. `is_hole` and the fill rule switch over at `t = 0.5`; the fill color
/// blends linearly. An empty operand grows out of (or shrinks into) the other's bbox center.
#[tracing::instrument(
    level = "debug",
    skip(src, dst),
    fields(src_curves = src.num_curves(), dst_curves = dst.num_curves())
)]
pub fn interpolate(src: &SvgObject, dst: &SvgObject, t: f64) -> SvgObject {
    let t = t.clamp(0.0, 1.0);
    let fill_color = src.fill_color.lerp(dst.fill_color, t);
    let fill_type = if t < 0.5 { src.fill_type } else { dst.fill_type };

    let src_owned;
    let dst_owned;
    let (src, dst) = match (src.is_empty(), dst.is_empty()) {
        (true, true) => {
            let mut out = SvgObject {
                fill_color,
                fill_type,
                ..SvgObject::default()
            };
            out.finalize();
            return out;
        }
        (true, false) => {
            src_owned = collapsed(dst, dst.bbox.center(), src);
            (&src_owned, dst)
        }
        (false, true) => {
            dst_owned = collapsed(src, src.bbox.center(), dst);
            (src, &dst_owned)
        }
        (false, false) => (src, dst),
    };

    let swapped = src.num_curves() > dst.num_curves();
    let (src_paths, dst_paths) = if swapped {
        let (d, s) = equalize(dst, src);
        (s, d)
    } else {
        equalize(src, dst)
    };

    assert_eq!(
        src_paths.len(),
        dst_paths.len(),
        "interpolation produced unequal path counts"
    );
    for (a, b) in src_paths.iter().zip(&dst_paths) {
        assert_eq!(a.len(), b.len(), "interpolation produced unequal curve counts");
    }

    let paths = src_paths
        .iter()
        .zip(&dst_paths)
        .map(|(a, b)| Path {
            curves: a
                .curves
                .iter()
                .zip(&b.curves)
                .map(|(ca, cb)| lerp_curve(ca, cb, t))
                .collect(),
            is_hole: if t < 0.5 { a.is_hole } else { b.is_hole },
        })
        .collect();

    let mut out = SvgObject {
        paths,
        fill_color,
        fill_type,
        ..SvgObject::default()
    };
    if let Some(end) = out.paths.last().and_then(Path::last_point) {
        out.cursor = end;
    }
    out.finalize();
    tracing::debug!(
        paths = out.num_paths(),
        curves = out.num_curves(),
        "interpolated svg object"
    );
    out
}

#[cfg(test)]
#[path = "../../tests/unit/svg/interpolate.rs"]
mod tests;
