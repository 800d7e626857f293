use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Curve, CurveDomain};

/// D-shaped poloidal cross-section of the plasma.
///
/// For poloidal angle `θ`:
///
/// ```text
/// R(θ) = R0 + a · cos(θ + δ · sin θ)
/// Z(θ) = a · κ · sin θ
/// ```
///
/// with major radius `R0`, minor radius `a`, elongation `κ` and
/// triangularity `δ`. Increasing `θ` runs counter-clockwise in the (R, Z)
/// half plane, starting at the outboard equatorial point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlasmaBoundary {
    major_radius: f64,
    minor_radius: f64,
    elongation: f64,
    triangularity: f64,
}

impl PlasmaBoundary {
    /// Creates a boundary from its four shape parameters.
    #[must_use]
    pub fn new(major_radius: f64, minor_radius: f64, elongation: f64, triangularity: f64) -> Self {
        Self {
            major_radius,
            minor_radius,
            elongation,
            triangularity,
        }
    }

    /// Point on the boundary at `theta` radians.
    #[must_use]
    pub fn point(&self, theta: f64) -> Point2 {
        let a = self.minor_radius;
        Point2::new(
            self.major_radius + a * (theta + self.triangularity * theta.sin()).cos(),
            a * self.elongation * theta.sin(),
        )
    }

    /// Derivative of the boundary with respect to `theta`.
    #[must_use]
    pub fn derivative(&self, theta: f64) -> Vector2 {
        let a = self.minor_radius;
        let delta = self.triangularity;
        Vector2::new(
            -a * (1.0 + delta * theta.cos()) * (theta + delta * theta.sin()).sin(),
            a * self.elongation * theta.cos(),
        )
    }

    /// Unit normal pointing away from the plasma at `theta` radians.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] where the derivative vanishes.
    pub fn outward_normal(&self, theta: f64) -> Result<Vector2> {
        let d = self.derivative(theta);
        let len = d.norm();
        if len < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "plasma boundary has no normal at theta = {theta}"
            ))
            .into());
        }
        // Counter-clockwise tangent rotated a quarter turn clockwise.
        Ok(Vector2::new(d.y, -d.x) / len)
    }

    /// Samples `count` points over the arc from `start_angle` to `stop_angle`
    /// degrees, endpoints included. Returns `(theta_radians, point)` pairs.
    #[must_use]
    pub fn sample_arc(&self, start_angle: f64, stop_angle: f64, count: usize) -> Vec<(f64, Point2)> {
        let start = start_angle.to_radians();
        let stop = stop_angle.to_radians();
        let last = count.saturating_sub(1).max(1) as f64;
        (0..count)
            .map(|i| {
                let theta = start + (stop - start) * i as f64 / last;
                (theta, self.point(theta))
            })
            .collect()
    }

    /// Samples `count` points around the full loop, without repeating the start.
    #[must_use]
    pub fn sample_loop(&self, count: usize) -> Vec<Point2> {
        (0..count)
            .map(|i| self.point(TAU * i as f64 / count as f64))
            .collect()
    }

    /// Major radius `R0`.
    #[must_use]
    pub fn major_radius(&self) -> f64 {
        self.major_radius
    }

    /// Minor radius `a`.
    #[must_use]
    pub fn minor_radius(&self) -> f64 {
        self.minor_radius
    }

    /// Elongation `κ`.
    #[must_use]
    pub fn elongation(&self) -> f64 {
        self.elongation
    }

    /// Triangularity `δ`.
    #[must_use]
    pub fn triangularity(&self) -> f64 {
        self.triangularity
    }
}

impl Curve for PlasmaBoundary {
    fn evaluate(&self, t: f64) -> Result<Point2> {
        Ok(self.point(t))
    }

    fn tangent(&self, t: f64) -> Result<Vector2> {
        Ok(self.derivative(t))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;

    fn boundary() -> PlasmaBoundary {
        PlasmaBoundary::new(275.0, 150.0, 2.0, 0.55)
    }

    #[test]
    fn equatorial_points() {
        let b = boundary();
        let outer = b.point(0.0);
        assert_relative_eq!(outer.x, 425.0);
        assert_relative_eq!(outer.y, 0.0);
        let inner = b.point(PI);
        assert_relative_eq!(inner.x, 125.0, epsilon = 1e-9);
        assert_relative_eq!(inner.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn top_point_is_shifted_by_triangularity() {
        let b = boundary();
        let top = b.point(FRAC_PI_2);
        assert_relative_eq!(top.x, 275.0 - 150.0 * 0.55_f64.sin(), epsilon = 1e-9);
        assert_relative_eq!(top.y, 300.0, epsilon = 1e-9);
    }

    #[test]
    fn normal_points_outward() {
        let b = boundary();
        let n0 = b.outward_normal(0.0).unwrap();
        assert_relative_eq!(n0.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(n0.y, 0.0, epsilon = 1e-12);

        let top = b.outward_normal(FRAC_PI_2).unwrap();
        assert_relative_eq!(top.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(top.y, 1.0, epsilon = 1e-12);

        let bottom = b.outward_normal(-FRAC_PI_2).unwrap();
        assert_relative_eq!(bottom.y, -1.0, epsilon = 1e-12);

        let inner = b.outward_normal(PI).unwrap();
        assert_relative_eq!(inner.x, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let b = boundary();
        let h = 1e-6;
        for &theta in &[0.3, 1.2, 2.5, 4.0, 5.5] {
            let fd = (b.point(theta + h) - b.point(theta - h)) / (2.0 * h);
            let d = b.derivative(theta);
            assert_relative_eq!(d.x, fd.x, epsilon = 1e-4);
            assert_relative_eq!(d.y, fd.y, epsilon = 1e-4);
        }
    }

    #[test]
    fn arc_sampling_includes_endpoints() {
        let samples = boundary().sample_arc(-90.0, 90.0, 5);
        assert_eq!(samples.len(), 5);
        assert_relative_eq!(samples[0].0, -FRAC_PI_2);
        assert_relative_eq!(samples[2].0, 0.0);
        assert_relative_eq!(samples[4].0, FRAC_PI_2);
        assert_relative_eq!(samples[4].1.y, 300.0, epsilon = 1e-9);
    }

    #[test]
    fn loop_sampling_does_not_repeat_start() {
        let points = boundary().sample_loop(8);
        assert_eq!(points.len(), 8);
        assert!((points[0] - points[7]).norm() > 1.0);
    }

    #[test]
    fn boundary_is_a_closed_curve() {
        let b = boundary();
        assert!(b.is_closed());
        let domain = b.domain();
        let start = b.evaluate(domain.t_min).unwrap();
        let end = b.evaluate(domain.t_max).unwrap();
        assert_relative_eq!(start.x, end.x, epsilon = 1e-9);
        assert_relative_eq!(start.y, end.y, epsilon = 1e-9);
    }
}
