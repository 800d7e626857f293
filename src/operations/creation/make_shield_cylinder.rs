use crate::error::{ConfigurationError, Result};
use crate::geometry::Profile;
use crate::kernel::SolidKernel;

/// Creates a hollow cylindrical shell around the vertical axis.
///
/// Internally constructs a rectangular profile `[inner, inner + thickness] x
/// [z_min, z_min + height]` and revolves it. An inner radius of zero yields a
/// solid cylinder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MakeShieldCylinder {
    inner_radius: f64,
    thickness: f64,
    height: f64,
    z_min: f64,
    rotation_angle: f64,
}

impl MakeShieldCylinder {
    /// Creates a full-turn shell centred on the midplane.
    #[must_use]
    pub fn new(inner_radius: f64, thickness: f64, height: f64) -> Self {
        Self {
            inner_radius,
            thickness,
            height,
            z_min: -height / 2.0,
            rotation_angle: 360.0,
        }
    }

    /// Places the lower face at `z_min` instead of centring on the midplane.
    #[must_use]
    pub fn with_lower_edge(mut self, z_min: f64) -> Self {
        self.z_min = z_min;
        self
    }

    /// Sets the revolution angle in degrees.
    #[must_use]
    pub fn with_rotation_angle(mut self, rotation_angle: f64) -> Self {
        self.rotation_angle = rotation_angle;
        self
    }

    /// The rectangular profile that gets revolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the thickness or height is not positive, or the
    /// inner radius is negative.
    pub fn profile(&self) -> Result<Profile> {
        if self.inner_radius < 0.0 {
            return Err(ConfigurationError::ParameterOutOfRange {
                parameter: "inner_radius",
                value: self.inner_radius,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        for (parameter, value) in [("thickness", self.thickness), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigurationError::ParameterOutOfRange {
                    parameter,
                    value,
                    min: 0.0,
                    max: f64::INFINITY,
                }
                .into());
            }
        }
        Profile::rectangle(
            self.inner_radius,
            self.inner_radius + self.thickness,
            self.z_min,
            self.z_min + self.height,
        )
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
