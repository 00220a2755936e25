//! Path-construction API mirroring the SVG path grammar (M, L, H, V, Q, T, C, S, Z).
//!
//! Every operation takes an `absolute` flag; relative coordinates resolve against the cursor.
//! Elliptical arcs (A) live in [`crate::svg::arc`].

use crate::foundation::core::Point;
use crate::foundation::math::points_coincide;
use crate::svg::curve::Curve;
use crate::svg::object::SvgObject;
use crate::svg::path::Path;

impl SvgObject {
    pub(crate) fn resolve(&self, point: Point, absolute: bool) -> Point {
        if absolute {
            point
        } else {
            self.cursor + point.to_vec2()
        }
    }

    /// Start a new contour at `point` and move the cursor there.
    ///
    /// A relative start needs an existing contour to be relative to.
    pub fn begin_path(&mut self, point: Point, absolute: bool) {
        debug_assert!(
            absolute || !self.paths.is_empty(),
            "relative begin_path without an existing path"
        );
        let p = self.resolve(point, absolute);

        let reuse_last = self.path_open && self.paths.last().is_some_and(Path::is_empty);
        if !reuse_last {
            self.paths.push(Path::new());
        }
        self.path_open = true;
        self.cursor = p;
        self.path_start = p;
    }

    /// Close the current contour.
    ///
    /// With `line_to_endpoint`, a final line back to the contour start is emitted unless the
    /// cursor is already there. Closing a contour without curves is a programming error.
    pub fn close_path(&mut self, line_to_endpoint: bool, is_hole: bool) {
        let cursor = self.cursor;
        let Some(path) = self.paths.last_mut() else {
            debug_assert!(false, "close_path without an active path");
            return;
        };
        debug_assert!(!path.is_empty(), "close_path on a path with zero curves");
        let Some(start) = path.first_point() else {
            return;
        };

        if line_to_endpoint && !points_coincide(cursor, start) {
            path.curves.push(Curve::line(cursor, start));
        }
        path.is_hole = is_hole;
        self.cursor = start;
        self.path_start = start;
        self.path_open = false;
    }

    /// Start a new contour at `point`, closing the open one first.
    ///
    /// Consecutive moves with no curves in between only move the cursor.
    pub fn move_to(&mut self, point: Point, absolute: bool) {
        let p = self.resolve(point, absolute);
        if self.paths.is_empty() {
            self.begin_path(p, true);
            return;
        }

        if self.path_open {
            if self.paths.last().is_some_and(Path::is_empty) {
                self.cursor = p;
                self.path_start = p;
                return;
            }
            let is_hole = self.paths.len() > 1;
            self.close_path(false, is_hole);
        }
        self.begin_path(p, true);
    }

    fn ensure_open_path(&mut self) {
        debug_assert!(
            !self.paths.is_empty(),
            "drawing command without an active path"
        );
        if !self.path_open {
            let at = self.cursor;
            self.begin_path(at, true);
        }
    }

    fn push_curve(&mut self, curve: Curve) {
        self.ensure_open_path();
        self.cursor = curve.end();
        if let Some(path) = self.paths.last_mut() {
            if path.is_empty() {
                self.path_start = curve.p0;
            }
            path.curves.push(curve);
        }
    }

    /// Straight line to `point`.
    pub fn line_to(&mut self, point: Point, absolute: bool) {
        let p = self.resolve(point, absolute);
        let from = self.cursor;
        self.push_curve(Curve::line(from, p));
    }

    /// Horizontal line; `y` is held from the cursor.
    pub fn hz_line_to(&mut self, x: f64, absolute: bool) {
        let x = if absolute { x } else { self.cursor.x + x };
        let y = self.cursor.y;
        self.line_to(Point::new(x, y), true);
    }

    /// Vertical line; `x` is held from the cursor.
    pub fn vt_line_to(&mut self, y: f64, absolute: bool) {
        let y = if absolute { y } else { self.cursor.y + y };
        let x = self.cursor.x;
        self.line_to(Point::new(x, y), true);
    }

    /// Quadratic bezier with control `p1`, ending at `p2`.
    pub fn bezier2_to(&mut self, p1: Point, p2: Point, absolute: bool) {
        let c = self.resolve(p1, absolute);
        let e = self.resolve(p2, absolute);
        let from = self.cursor;
        self.push_curve(Curve::bezier2(from, c, e));
    }

    /// Cubic bezier with controls `p1`, `p2`, ending at `p3`.
    pub fn bezier3_to(&mut self, p1: Point, p2: Point, p3: Point, absolute: bool) {
        let c1 = self.resolve(p1, absolute);
        let c2 = self.resolve(p2, absolute);
        let e = self.resolve(p3, absolute);
        let from = self.cursor;
        self.push_curve(Curve::bezier3(from, c1, c2, e));
    }

    /// Control point for a smooth continuation of degree `degree`.
    fn reflected_control(&self, degree: u8) -> Point {
        let prev = if self.path_open {
            self.paths.last().and_then(|p| p.curves.last())
        } else {
            None
        };
        match prev {
            Some(c) if c.degree() == degree => self.cursor + (self.cursor - c.last_control()),
            _ => self.cursor,
        }
    }

    /// Quadratic bezier whose control reflects the previous quadratic's control.
    pub fn smooth_bezier2_to(&mut self, p2: Point, absolute: bool) {
        let c = self.reflected_control(2);
        let e = self.resolve(p2, absolute);
        let from = self.cursor;
        self.push_curve(Curve::bezier2(from, c, e));
    }

    /// Cubic bezier whose first control reflects the previous cubic's second control.
    pub fn smooth_bezier3_to(&mut self, p2: Point, p3: Point, absolute: bool) {
        let c1 = self.reflected_control(3);
        let c2 = self.resolve(p2, absolute);
        let e = self.resolve(p3, absolute);
        let from = self.cursor;
        self.push_curve(Curve::bezier3(from, c1, c2, e));
    }

    /// Append a pre-built curve and move the cursor to its end.
    pub fn add_curve_manually(&mut self, curve: Curve) {
        self.push_curve(curve);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/builder.rs"]
mod tests;
