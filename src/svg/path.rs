use crate::foundation::core::{Point, Rect};
use crate::svg::curve::Curve;

/// One contour of an [`crate::svg::object::SvgObject`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    /// Contiguous curves; each `p0` is the previous curve's end.
    pub curves: Vec<Curve>,
    /// Subtractive region under the owning object's fill rule.
    pub is_hole: bool,
}

impl Path {
    /// Empty, non-hole path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of curves.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// `true` when the path holds no curves.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Start point of the first curve.
    pub fn first_point(&self) -> Option<Point> {
        self.curves.first().map(|c| c.p0)
    }

    /// End point of the last curve.
    pub fn last_point(&self) -> Option<Point> {
        self.curves.last().map(Curve::end)
    }

    /// Union of all curve boxes, `None` for an empty path.
    pub fn bbox(&self) -> Option<Rect> {
        self.curves
            .iter()
            .map(Curve::bbox)
            .reduce(|acc, r| acc.union(r))
    }

    /// Sum of per-curve perimeter estimates.
    pub fn approximate_perimeter(&self) -> f64 {
        self.curves.iter().map(Curve::approximate_perimeter).sum()
    }

    /// `true` when the last curve ends where the first begins.
    pub fn is_closed(&self) -> bool {
        match (self.first_point(), self.last_point()) {
            (Some(a), Some(b)) => crate::foundation::math::points_coincide(a, b),
            _ => false,
        }
    }
}
