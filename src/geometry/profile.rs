use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::{contains_point, first_self_intersection, signed_area_2d};
use crate::math::{Point2, TOLERANCE};

/// A closed, simple polygon in the poloidal half plane, ready to be revolved.
///
/// Points are `(R, Z)` pairs with `R >= 0`; the last point connects back to
/// the first. Orientation is not normalised.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    points: Vec<Point2>,
}

impl Profile {
    /// Creates a closed profile from its vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if there are fewer than three
    /// points, a coordinate is not finite, a point lies on the negative side
    /// of the axis, the enclosed area vanishes, or two edges cross.
    pub fn closed(points: Vec<Point2>) -> Result<Self> {
        if points.len() < 3 {
            return Err(GeometryError::Degenerate(format!(
                "profile needs at least 3 points, got {}",
                points.len()
            ))
            .into());
        }
        if let Some(p) = points.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(GeometryError::Degenerate(format!(
                "profile point ({}, {}) is not finite",
                p.x, p.y
            ))
            .into());
        }
        if let Some(p) = points.iter().find(|p| p.x < -TOLERANCE.sqrt()) {
            return Err(GeometryError::Degenerate(format!(
                "profile point ({}, {}) crosses the revolution axis",
                p.x, p.y
            ))
            .into());
        }
        if signed_area_2d(&points).abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("profile encloses no area".into()).into());
        }
        if let Some((i, j)) = first_self_intersection(&points) {
            return Err(GeometryError::Degenerate(format!(
                "profile edges {i} and {j} intersect"
            ))
            .into());
        }
        Ok(Self { points })
    }

    /// Axis-aligned rectangle `[r_min, r_max] x [z_min, z_max]`.
    ///
    /// # Errors
    ///
    /// See [`Profile::closed`].
    pub fn rectangle(r_min: f64, r_max: f64, z_min: f64, z_max: f64) -> Result<Self> {
        Self::closed(vec![
            Point2::new(r_min, z_min),
            Point2::new(r_max, z_min),
            Point2::new(r_max, z_max),
            Point2::new(r_min, z_max),
        ])
    }

    /// The polygon vertices.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Enclosed area (always positive).
    #[must_use]
    pub fn area(&self) -> f64 {
        signed_area_2d(&self.points).abs()
    }

    /// Whether `p` lies strictly inside the profile (even-odd rule).
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        contains_point(&self.points, p)
    }

    /// Minimum and maximum corners `(r_min, z_min)`, `(r_max, z_max)`.
    #[must_use]
    pub fn bounds(&self) -> (Point2, Point2) {
        let mut min = self.points[0];
        let mut max = self.points[0];
        for p in &self.points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::TokamakError;

    fn is_degenerate(err: &TokamakError) -> bool {
        matches!(err, TokamakError::Geometry(GeometryError::Degenerate(_)))
    }

    #[test]
    fn rectangle_area_and_bounds() {
        let profile = Profile::rectangle(10.0, 60.0, -100.0, 100.0).unwrap();
        assert_relative_eq!(profile.area(), 10_000.0);
        let (min, max) = profile.bounds();
        assert_relative_eq!(min.x, 10.0);
        assert_relative_eq!(max.y, 100.0);
        assert!(profile.contains(&Point2::new(30.0, 0.0)));
        assert!(!profile.contains(&Point2::new(5.0, 0.0)));
    }

    #[test]
    fn rectangle_touching_axis_is_valid() {
        assert!(Profile::rectangle(0.0, 75.0, -50.0, 50.0).is_ok());
    }

    #[test]
    fn too_few_points() {
        let err = Profile::closed(vec![Point2::new(1.0, 0.0), Point2::new(2.0, 0.0)]).unwrap_err();
        assert!(is_degenerate(&err));
    }

    #[test]
    fn negative_radius_is_rejected() {
        let err = Profile::rectangle(-10.0, 10.0, 0.0, 5.0).unwrap_err();
        assert!(is_degenerate(&err));
    }

    #[test]
    fn zero_area_is_rejected() {
        let err = Profile::closed(vec![
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 0.0),
        ])
        .unwrap_err();
        assert!(is_degenerate(&err));
    }

    #[test]
    fn self_intersecting_profile_is_rejected() {
        let err = Profile::closed(vec![
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 1.0),
        ])
        .unwrap_err();
        assert!(is_degenerate(&err));
    }
}
