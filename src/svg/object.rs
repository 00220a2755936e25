use crate::foundation::core::{Affine, BezPath, FillType, Point, Rect, Rgba};
use crate::svg::curve::{Curve, CurveKind};
use crate::svg::path::Path;

/// A set of contours plus fill styling; the unit of cacheable vector geometry.
///
/// Build one with the construction API (`move_to`, `line_to`, ...), then call
/// [`SvgObject::finalize`] (or the two `calculate_*` methods) before reading `bbox` or
/// `approximate_perimeter`.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgObject {
    /// Contours in drawing order.
    pub paths: Vec<Path>,
    /// Fill color.
    pub fill_color: Rgba,
    /// Fill rule.
    pub fill_type: FillType,
    /// Union of all curve boxes; [`Rect::ZERO`] when empty.
    pub bbox: Rect,
    /// Sum of per-curve perimeter estimates.
    pub approximate_perimeter: f64,
    /// Construction cursor.
    pub cursor: Point,
    pub(crate) path_open: bool,
    pub(crate) path_start: Point,
}

impl Default for SvgObject {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            fill_color: Rgba::WHITE,
            fill_type: FillType::NonZero,
            bbox: Rect::ZERO,
            approximate_perimeter: 0.0,
            cursor: Point::ORIGIN,
            path_open: false,
            path_start: Point::ORIGIN,
        }
    }
}

impl SvgObject {
    /// Empty object with default styling.
    pub fn create_default() -> Self {
        Self::default()
    }

    /// Number of contours.
    pub fn num_paths(&self) -> usize {
        self.paths.len()
    }

    /// Total number of curves across all contours.
    pub fn num_curves(&self) -> usize {
        self.paths.iter().map(Path::len).sum()
    }

    /// `true` when no contour holds a curve.
    pub fn is_empty(&self) -> bool {
        self.num_curves() == 0
    }

    /// Every curve in drawing order.
    pub fn curves(&self) -> impl Iterator<Item = &Curve> + '_ {
        self.paths.iter().flat_map(|p| p.curves.iter())
    }

    /// Recompute and store the tight bounding box.
    pub fn calculate_bbox(&mut self) -> Rect {
        self.bbox = self
            .paths
            .iter()
            .filter_map(Path::bbox)
            .reduce(|acc, r| acc.union(r))
            .unwrap_or(Rect::ZERO);
        self.bbox
    }

    /// Recompute and store the perimeter estimate.
    pub fn calculate_approximate_perimeter(&mut self) -> f64 {
        self.approximate_perimeter = self.paths.iter().map(Path::approximate_perimeter).sum();
        self.approximate_perimeter
    }

    /// Recompute every derived field.
    pub fn finalize(&mut self) {
        self.calculate_bbox();
        self.calculate_approximate_perimeter();
    }

    /// Convert to a `kurbo` path for rasterizers.
    ///
    /// Contours that end on their start point are emitted closed.
    pub fn to_bezpath(&self) -> BezPath {
        let mut out = BezPath::new();
        for path in &self.paths {
            let Some(start) = path.first_point() else {
                continue;
            };
            out.move_to(start);
            for c in &path.curves {
                match c.kind {
                    CurveKind::Line { p1 } => out.line_to(p1),
                    CurveKind::Bezier2 { p1, p2 } => out.quad_to(p1, p2),
                    CurveKind::Bezier3 { p1, p2, p3 } => out.curve_to(p1, p2, p3),
                }
            }
            if path.is_closed() {
                out.close_path();
            }
        }
        out
    }

    /// Copy with every control point mapped through `affine`.
    pub fn transformed(&self, affine: Affine) -> SvgObject {
        let mut out = SvgObject {
            paths: self
                .paths
                .iter()
                .map(|p| Path {
                    curves: p.curves.iter().map(|c| c.map_points(|q| affine * q)).collect(),
                    is_hole: p.is_hole,
                })
                .collect(),
            fill_color: self.fill_color,
            fill_type: self.fill_type,
            cursor: affine * self.cursor,
            path_open: false,
            path_start: affine * self.path_start,
            ..SvgObject::default()
        };
        out.finalize();
        out
    }

    /// The leading `percent` of the object's outline, for draw-on effects.
    ///
    /// Length is measured with the perimeter estimate; the boundary curve is cut at the matching
    /// fraction of its parameter range.
    pub fn trimmed(&self, percent: f64) -> SvgObject {
        let percent = percent.clamp(0.0, 1.0);
        let total: f64 = self.paths.iter().map(Path::approximate_perimeter).sum();
        let mut remaining = total * percent;

        let mut out = SvgObject {
            fill_color: self.fill_color,
            fill_type: self.fill_type,
            ..SvgObject::default()
        };

        'paths: for path in &self.paths {
            let mut trimmed = Path {
                curves: Vec::with_capacity(path.len()),
                is_hole: path.is_hole,
            };
            for c in &path.curves {
                let len = c.approximate_perimeter();
                if len <= remaining {
                    trimmed.curves.push(*c);
                    remaining -= len;
                    continue;
                }
                if remaining > 0.0 && len > 0.0 {
                    trimmed.curves.push(c.split(0.0, remaining / len));
                }
                if !trimmed.is_empty() {
                    out.paths.push(trimmed);
                }
                break 'paths;
            }
            if !trimmed.is_empty() {
                out.paths.push(trimmed);
            }
        }

        if let Some(end) = out.paths.last().and_then(Path::last_point) {
            out.cursor = end;
        }
        out.finalize();
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/object.rs"]
mod tests;
