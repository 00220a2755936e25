//! Single path segments and their geometry.

use kurbo::{CubicBez, Line, ParamCurve, ParamCurveExtrema, PathSeg, QuadBez};

use crate::foundation::core::{Point, Rect};

/// Segment-specific points following the shared start point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurveKind {
    /// Straight line to `p1`.
    Line {
        /// End point.
        p1: Point,
    },
    /// Quadratic bezier with control `p1`, ending at `p2`.
    Bezier2 {
        /// Control point.
        p1: Point,
        /// End point.
        p2: Point,
    },
    /// Cubic bezier with controls `p1`, `p2`, ending at `p3`.
    Bezier3 {
        /// First control point.
        p1: Point,
        /// Second control point.
        p2: Point,
        /// End point.
        p3: Point,
    },
}

/// One line, quadratic or cubic segment.
///
/// Within a [`crate::svg::path::Path`], `p0` equals the end point of the preceding curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Curve {
    /// Start point, shared by every kind.
    pub p0: Point,
    /// Kind-specific control and end points.
    pub kind: CurveKind,
}

impl Curve {
    /// Straight segment `p0 -> p1`.
    pub fn line(p0: Point, p1: Point) -> Self {
        Self {
            p0,
            kind: CurveKind::Line { p1 },
        }
    }

    /// Quadratic segment.
    pub fn bezier2(p0: Point, p1: Point, p2: Point) -> Self {
        Self {
            p0,
            kind: CurveKind::Bezier2 { p1, p2 },
        }
    }

    /// Cubic segment.
    pub fn bezier3(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self {
            p0,
            kind: CurveKind::Bezier3 { p1, p2, p3 },
        }
    }

    /// Cubic segment from a `[p0, p1, p2, p3]` array.
    pub fn from_cubic_points(p: [Point; 4]) -> Self {
        Self::bezier3(p[0], p[1], p[2], p[3])
    }

    /// Final point of the segment.
    pub fn end(&self) -> Point {
        match self.kind {
            CurveKind::Line { p1 } => p1,
            CurveKind::Bezier2 { p2, .. } => p2,
            CurveKind::Bezier3 { p3, .. } => p3,
        }
    }

    /// Control point adjacent to the end point, used for smooth-curve reflection.
    ///
    /// Lines report their start point.
    pub fn last_control(&self) -> Point {
        match self.kind {
            CurveKind::Line { .. } => self.p0,
            CurveKind::Bezier2 { p1, .. } => p1,
            CurveKind::Bezier3 { p2, .. } => p2,
        }
    }

    /// Bezier degree: 1, 2 or 3.
    pub fn degree(&self) -> u8 {
        match self.kind {
            CurveKind::Line { .. } => 1,
            CurveKind::Bezier2 { .. } => 2,
            CurveKind::Bezier3 { .. } => 3,
        }
    }

    /// The same segment as a kurbo [`PathSeg`].
    pub fn to_seg(&self) -> PathSeg {
        match self.kind {
            CurveKind::Line { p1 } => PathSeg::Line(Line::new(self.p0, p1)),
            CurveKind::Bezier2 { p1, p2 } => PathSeg::Quad(QuadBez::new(self.p0, p1, p2)),
            CurveKind::Bezier3 { p1, p2, p3 } => {
                PathSeg::Cubic(CubicBez::new(self.p0, p1, p2, p3))
            }
        }
    }

    /// Evaluate the curve at parameter `t`.
    pub fn eval(&self, t: f64) -> Point {
        self.to_seg().eval(t)
    }

    /// Exact cubic control points (degree elevation for lines and quadratics).
    pub fn to_cubic_points(&self) -> [Point; 4] {
        let c = self.to_cubic();
        [c.p0, c.p1, c.p2, c.p3]
    }

    fn to_cubic(&self) -> CubicBez {
        match self.kind {
            CurveKind::Line { p1 } => CubicBez::new(
                self.p0,
                self.p0.lerp(p1, 1.0 / 3.0),
                self.p0.lerp(p1, 2.0 / 3.0),
                p1,
            ),
            CurveKind::Bezier2 { p1, p2 } => QuadBez::new(self.p0, p1, p2).raise(),
            CurveKind::Bezier3 { p1, p2, p3 } => CubicBez::new(self.p0, p1, p2, p3),
        }
    }

    /// Fast perimeter estimate.
    ///
    /// Lines are exact. Beziers use the mean of the chord length and the control-polygon length,
    /// which brackets the true arc length from both sides.
    pub fn approximate_perimeter(&self) -> f64 {
        match self.kind {
            CurveKind::Line { p1 } => self.p0.distance(p1),
            CurveKind::Bezier2 { p1, p2 } => {
                let chord = self.p0.distance(p2);
                let net = self.p0.distance(p1) + p1.distance(p2);
                (chord + net) * 0.5
            }
            CurveKind::Bezier3 { p1, p2, p3 } => {
                let chord = self.p0.distance(p3);
                let net = self.p0.distance(p1) + p1.distance(p2) + p2.distance(p3);
                (chord + net) * 0.5
            }
        }
    }

    /// Tight axis-aligned bounding box.
    pub fn bbox(&self) -> Rect {
        self.to_seg().bounding_box()
    }

    /// The exact sub-curve covering `[t0, t1]`.
    ///
    /// Lines stay lines; quadratics are degree-elevated and returned as cubics.
    pub fn split(&self, t0: f64, t1: f64) -> Curve {
        match self.kind {
            CurveKind::Line { p1 } => {
                let l = Line::new(self.p0, p1).subsegment(t0..t1);
                Curve::line(l.p0, l.p1)
            }
            CurveKind::Bezier2 { .. } | CurveKind::Bezier3 { .. } => {
                let c = self.to_cubic().subsegment(t0..t1);
                Curve::bezier3(c.p0, c.p1, c.p2, c.p3)
            }
        }
    }

    /// Apply `f` to every point of the curve.
    pub fn map_points(&self, mut f: impl FnMut(Point) -> Point) -> Curve {
        let p0 = f(self.p0);
        let kind = match self.kind {
            CurveKind::Line { p1 } => CurveKind::Line { p1: f(p1) },
            CurveKind::Bezier2 { p1, p2 } => CurveKind::Bezier2 {
                p1: f(p1),
                p2: f(p2),
            },
            CurveKind::Bezier3 { p1, p2, p3 } => CurveKind::Bezier3 {
                p1: f(p1),
                p2: f(p2),
                p3: f(p3),
            },
        };
        Curve { p0, kind }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/curve.rs"]
mod tests;
