//! Elliptical arc (SVG `A`) to cubic bezier conversion.
//!
//! Endpoint parameterization is converted to center parameterization following the SVG
//! implementation notes (B.2.4), then the sweep is cut into pieces of at most 90 degrees.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::foundation::core::{Affine, Point, Vec2};
use crate::foundation::math::points_coincide;
use crate::svg::object::SvgObject;

/// Center parameterization of an elliptical arc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ArcCenter {
    pub(crate) center: Point,
    pub(crate) radii: Vec2,
    pub(crate) theta1: f64,
    pub(crate) delta_theta: f64,
}

/// Signed angle from `u` to `v`.
fn angle_between(u: Vec2, v: Vec2) -> f64 {
    u.cross(v).atan2(u.dot(v))
}

/// Convert an SVG endpoint arc into its center form.
///
/// Radii are made positive and scaled up when too small to span the chord. Returns `None` for
/// degenerate radii, which callers treat as a straight line.
pub(crate) fn center_parameterization(
    from: Point,
    to: Point,
    radius: Vec2,
    x_axis_rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
) -> Option<ArcCenter> {
    let mut rx = radius.x.abs();
    let mut ry = radius.y.abs();
    if rx * rx < f64::EPSILON || ry * ry < f64::EPSILON {
        return None;
    }

    let (sin_phi, cos_phi) = x_axis_rotation_deg.to_radians().sin_cos();

    // Midpoint frame aligned with the ellipse axes.
    let half = (from - to) * 0.5;
    let x1p = cos_phi * half.x + sin_phi * half.y;
    let y1p = -sin_phi * half.x + cos_phi * half.y;

    let lambda = (x1p / rx).powi(2) + (y1p / ry).powi(2);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    let den = (rx * y1p).powi(2) + (ry * x1p).powi(2);
    if den == 0.0 {
        return None;
    }
    let num = (rx * ry).powi(2) - den;
    let mut k = (num / den).max(0.0).sqrt();
    if large_arc == sweep {
        k = -k;
    }
    let cxp = k * rx * y1p / ry;
    let cyp = -k * ry * x1p / rx;

    let center = Point::new(
        cos_phi * cxp - sin_phi * cyp + (from.x + to.x) * 0.5,
        sin_phi * cxp + cos_phi * cyp + (from.y + to.y) * 0.5,
    );

    let u = Vec2::new((x1p - cxp) / rx, (y1p - cyp) / ry);
    let v = Vec2::new((-x1p - cxp) / rx, (-y1p - cyp) / ry);
    let theta1 = angle_between(Vec2::new(1.0, 0.0), u);
    let mut delta_theta = angle_between(u, v);
    if sweep && delta_theta < 0.0 {
        delta_theta += TAU;
    } else if !sweep && delta_theta > 0.0 {
        delta_theta -= TAU;
    }

    Some(ArcCenter {
        center,
        radii: Vec2::new(rx, ry),
        theta1,
        delta_theta,
    })
}

/// Number of cubic pieces used for a sweep of `delta_theta` radians: `ceil(|Δθ| / (π/2))`.
///
/// Sweeps within rounding noise of a multiple of 90 degrees do not get an extra sliver segment.
pub(crate) fn arc_segment_count(delta_theta: f64) -> usize {
    const SLACK: f64 = 1e-9;
    (((delta_theta.abs() / FRAC_PI_2) - SLACK).ceil() as usize).max(1)
}

impl SvgObject {
    /// Elliptical arc from the cursor to `dst`, emitted as cubic beziers.
    ///
    /// Coincident endpoints add nothing; a zero radius degrades to [`SvgObject::line_to`].
    pub fn arc_to(
        &mut self,
        radius: Vec2,
        x_axis_rotation_deg: f64,
        large_arc: bool,
        sweep: bool,
        dst: Point,
        absolute: bool,
    ) {
        let from = self.cursor;
        let to = self.resolve(dst, absolute);
        if points_coincide(from, to) {
            return;
        }

        let Some(arc) =
            center_parameterization(from, to, radius, x_axis_rotation_deg, large_arc, sweep)
        else {
            self.line_to(to, true);
            return;
        };
        debug_assert!(
            arc.center.x.is_finite() && arc.center.y.is_finite() && arc.delta_theta.is_finite(),
            "arc_to produced a non-finite center"
        );

        let segments = arc_segment_count(arc.delta_theta);
        let step = arc.delta_theta / segments as f64;
        let handle = (4.0 / 3.0) * (step / 4.0).tan();
        let unit_to_arc = Affine::translate(arc.center.to_vec2())
            * Affine::rotate(x_axis_rotation_deg.to_radians())
            * Affine::scale_non_uniform(arc.radii.x, arc.radii.y);

        let mut theta = arc.theta1;
        for i in 0..segments {
            let (s0, c0) = theta.sin_cos();
            let (s1, c1) = (theta + step).sin_cos();
            let p1 = Point::new(c0 - handle * s0, s0 + handle * c0);
            let p2 = Point::new(c1 + handle * s1, s1 - handle * c1);
            // Snap the final point to remove accumulated drift.
            let end = if i + 1 == segments {
                to
            } else {
                unit_to_arc * Point::new(c1, s1)
            };
            self.bezier3_to(unit_to_arc * p1, unit_to_arc * p2, end, true);
            theta += step;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/svg/arc.rs"]
mod tests;
