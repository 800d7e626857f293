use crate::error::{ConfigurationError, Result};
use crate::geometry::{PlasmaBoundary, Profile};
use crate::kernel::SolidKernel;

/// Creates the plasma solid by revolving its D-shaped cross-section.
///
/// By default the full poloidal loop is used. A partial arc
/// `[start_angle, stop_angle]` (degrees) is closed by the chord joining its
/// endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MakePlasma {
    boundary: PlasmaBoundary,
    start_angle: f64,
    stop_angle: f64,
    rotation_angle: f64,
    num_points: usize,
}

impl MakePlasma {
    /// Creates a new `MakePlasma` operation for the full loop, revolved 360°.
    #[must_use]
    pub fn new(boundary: PlasmaBoundary) -> Self {
        Self {
            boundary,
            start_angle: 0.0,
            stop_angle: 360.0,
            rotation_angle: 360.0,
            num_points: 100,
        }
    }

    /// Restricts the cross-section to a poloidal arc.
    #[must_use]
    pub fn with_arc(mut self, start_angle: f64, stop_angle: f64) -> Self {
        self.start_angle = start_angle;
        self.stop_angle = stop_angle;
        self
    }

    /// Sets the revolution angle in degrees.
    #[must_use]
    pub fn with_rotation_angle(mut self, rotation_angle: f64) -> Self {
        self.rotation_angle = rotation_angle;
        self
    }

    /// Sets how many boundary points are sampled.
    #[must_use]
    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    /// The sampled cross-section.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than three points are requested or the
    /// sampled polygon is degenerate.
    pub fn profile(&self) -> Result<Profile> {
        if self.num_points < 3 {
            return Err(ConfigurationError::ParameterOutOfRange {
                parameter: "num_points",
                value: self.num_points as f64,
                min: 3.0,
                max: f64::INFINITY,
            }
            .into());
        }
        let points = if (self.stop_angle - self.start_angle).abs() >= 360.0 {
            self.boundary.sample_loop(self.num_points)
        } else {
            self.boundary
                .sample_arc(self.start_angle, self.stop_angle, self.num_points)
                .into_iter()
                .map(|(_, p)| p)
                .collect()
        };
        Profile::closed(points)
    }

    /// Executes the operation, creating the plasma solid in the kernel.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is invalid or the kernel fails.
    pub fn execute<K: SolidKernel>(&self, kernel: &mut K) -> Result<K::Shape> {
        let profile = self.profile()?;
        kernel.revolve(&profile, self.rotation_angle)
    }
}
