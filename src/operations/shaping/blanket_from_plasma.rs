use crate::error::{ConfigurationError, Result};
use crate::geometry::{PlasmaBoundary, Profile};
use crate::kernel::SolidKernel;
use crate::math::Point2;

/// Creates a shell that follows the plasma boundary at an offset.
///
/// Thickness and offset are each given as three control values (arc start,
/// arc middle, arc end) and interpolated piecewise linearly along the arc.
/// The inner face lies at `offset` from the boundary along its outward
/// normal, the outer face at `offset + thickness`.
///
/// Angles are in degrees and run in either direction; the arc
/// `90 -> -90` traces the outboard half from top to bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlanketFromPlasma {
    boundary: PlasmaBoundary,
    start_angle: f64,
    stop_angle: f64,
    thickness: [f64; 3],
    offset: [f64; 3],
    connect_to_center: bool,
    rotation_angle: f64,
    num_points: usize,
}

impl BlanketFromPlasma {
    /// Creates a blanket over `[start_angle, stop_angle]` with zero offset,
    /// revolved a full turn.
    #[must_use]
    pub fn new(boundary: PlasmaBoundary, start_angle: f64, stop_angle: f64, thickness: [f64; 3]) -> Self {
        Self {
            boundary,
            start_angle,
            stop_angle,
            thickness,
            offset: [0.0; 3],
            connect_to_center: false,
            rotation_angle: 360.0,
            num_points: 50,
        }
    }

    /// Sets the distance between the plasma boundary and the inner face.
    #[must_use]
    pub fn with_offset(mut self, offset: [f64; 3]) -> Self {
        self.offset = offset;
        self
    }

    /// Closes the profile with horizontal runs to the axis at both arc ends.
    #[must_use]
    pub fn with_connect_to_center(mut self, connect_to_center: bool) -> Self {
        self.connect_to_center = connect_to_center;
        self
    }

    /// Sets the revolution angle in degrees.
    #[must_use]
    pub fn with_rotation_angle(mut self, rotation_angle: f64) -> Self {
        self.rotation_angle = rotation_angle;
        self
    }

    /// Sets how many points are sampled along the arc.
    #[must_use]
    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    /// The cross-section of the shell.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two arc points are requested, the
    /// boundary has no normal somewhere on the arc, or the resulting polygon
    /// is degenerate.
    pub fn profile(&self) -> Result<Profile> {
        if self.num_points < 2 {
            return Err(ConfigurationError::ParameterOutOfRange {
                parameter: "num_points",
                value: self.num_points as f64,
                min: 2.0,
                max: f64::INFINITY,
            }
            .into());
        }

        let samples = self
            .boundary
            .sample_arc(self.start_angle, self.stop_angle, self.num_points);
        let last = (samples.len() - 1) as f64;
        let mut inner = Vec::with_capacity(samples.len());
        let mut outer = Vec::with_capacity(samples.len());
        for (i, (theta, point)) in samples.into_iter().enumerate() {
            let t = i as f64 / last;
            let normal = self.boundary.outward_normal(theta)?;
            let offset = interpolate(self.offset, t);
            let thickness = interpolate(self.thickness, t);
            inner.push(point + normal * offset);
            outer.push(point + normal * (offset + thickness));
        }

        let mut points = Vec::with_capacity(inner.len() + outer.len() + 4);
        if self.connect_to_center {
            points.push(Point2::new(0.0, outer[0].y));
            points.extend(outer.iter().copied());
            points.push(Point2::new(0.0, outer[outer.len() - 1].y));
            points.push(Point2::new(0.0, inner[inner.len() - 1].y));
            points.extend(inner.iter().rev().copied());
            points.push(Point2::new(0.0, inner[0].y));
        } else {
            points.extend(outer.iter().copied());
            points.extend(inner.iter().rev().copied());
        }
        Profile::closed(points)
    }

    /// Executes the operation, creating the shell in the kernel.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is invalid or the kernel fails.
    pub fn execute<K: SolidKernel>(&self, kernel: &mut K) -> Result<K::Shape> {
        let profile = self.profile()?;
        kernel.revolve(&profile, self.rotation_angle)
    }
}

/// Piecewise-linear interpolation through three control values at t = 0, 0.5, 1.
fn interpolate(values: [f64; 3], t: f64) -> f64 {
    if t < 0.5 {
        values[0] + (values[1] - values[0]) * 2.0 * t
    } else {
        values[1] + (values[2] - values[1]) * (2.0 * t - 1.0)
    }
}
