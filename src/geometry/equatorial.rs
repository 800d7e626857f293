use crate::build::{Build, PairedBuild};
use crate::error::{ConfigurationError, Result};

use super::PlasmaBoundary;

/// Plasma shape parameters derived from a pair of builds.
///
/// The plasma's radial extent is read from the radial build
/// (`inner_equatorial_point` to `outer_equatorial_point`); its half height,
/// read from the vertical build, sets the elongation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialGeometry {
    major_radius: f64,
    minor_radius: f64,
    elongation: f64,
    triangularity: f64,
}

impl EquatorialGeometry {
    /// Derives the plasma geometry from a radial and a vertical build.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::ParameterOutOfRange`] if `triangularity`
    /// lies outside `[-1, 1]`.
    pub fn new(radial: &Build, vertical: &Build, triangularity: f64) -> Result<Self> {
        if !(-1.0..=1.0).contains(&triangularity) {
            return Err(ConfigurationError::ParameterOutOfRange {
                parameter: "triangularity",
                value: triangularity,
                min: -1.0,
                max: 1.0,
            }
            .into());
        }
        let inner_equatorial = radial.prefix_thickness_before_plasma();
        let outer_equatorial = inner_equatorial + radial.plasma_thickness();
        let major_radius = (inner_equatorial + outer_equatorial) / 2.0;
        let minor_radius = major_radius - inner_equatorial;
        let elongation = (vertical.plasma_thickness() / 2.0) / minor_radius;
        Ok(Self {
            major_radius,
            minor_radius,
            elongation,
            triangularity,
        })
    }

    /// Derives the plasma geometry from a paired build.
    ///
    /// # Errors
    ///
    /// See [`EquatorialGeometry::new`].
    pub fn from_paired(paired: &PairedBuild, triangularity: f64) -> Result<Self> {
        Self::new(paired.radial(), paired.vertical(), triangularity)
    }

    /// Radius of the inboard equatorial plasma edge.
    #[must_use]
    pub fn inner_equatorial_point(&self) -> f64 {
        self.major_radius - self.minor_radius
    }

    /// Radius of the outboard equatorial plasma edge.
    #[must_use]
    pub fn outer_equatorial_point(&self) -> f64 {
        self.major_radius + self.minor_radius
    }

    #[must_use]
    pub fn major_radius(&self) -> f64 {
        self.major_radius
    }

    #[must_use]
    pub fn minor_radius(&self) -> f64 {
        self.minor_radius
    }

    #[must_use]
    pub fn elongation(&self) -> f64 {
        self.elongation
    }

    #[must_use]
    pub fn triangularity(&self) -> f64 {
        self.triangularity
    }

    /// The D-shaped plasma boundary with these parameters.
    #[must_use]
    pub fn boundary(&self) -> PlasmaBoundary {
        PlasmaBoundary::new(
            self.major_radius,
            self.minor_radius,
            self.elongation,
            self.triangularity,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::build::tests::{conventional_radial, spherical_radial};
    use crate::build::{BuildEntry, ReactorFamily};

    #[test]
    fn reference_build_radii() {
        let radial = Build::new(spherical_radial()).unwrap();
        let paired = PairedBuild::from_plasma(radial, ReactorFamily::Spherical, 2.0).unwrap();
        let geometry = EquatorialGeometry::from_paired(&paired, 0.55).unwrap();
        assert_relative_eq!(geometry.inner_equatorial_point(), 125.0);
        assert_relative_eq!(geometry.outer_equatorial_point(), 425.0);
        assert_relative_eq!(geometry.major_radius(), 275.0);
        assert_relative_eq!(geometry.minor_radius(), 150.0);
        assert_relative_eq!(geometry.elongation(), 2.0);
        assert_relative_eq!(geometry.triangularity(), 0.55);
    }

    #[test]
    fn elongation_from_explicit_vertical_build() {
        let radial = Build::new(spherical_radial()).unwrap();
        let vertical = Build::new(vec![
            BuildEntry::solid(15.0),
            BuildEntry::plasma(700.0),
            BuildEntry::solid(15.0),
        ])
        .unwrap();
        let geometry = EquatorialGeometry::new(&radial, &vertical, -0.55).unwrap();
        assert_relative_eq!(geometry.elongation(), 350.0 / 150.0);
    }

    #[test]
    fn conventional_from_plasma_round_trips_elongation() {
        let radial = Build::new(conventional_radial()).unwrap();
        let paired = PairedBuild::from_plasma(radial, ReactorFamily::Conventional, 1.7).unwrap();
        let geometry = EquatorialGeometry::from_paired(&paired, 0.3).unwrap();
        assert_relative_eq!(geometry.major_radius(), 450.0);
        assert_relative_eq!(geometry.elongation(), 1.7, epsilon = 1e-12);
    }

    #[test]
    fn triangularity_out_of_range_is_rejected() {
        let radial = Build::new(spherical_radial()).unwrap();
        let vertical = radial.clone();
        assert!(EquatorialGeometry::new(&radial, &vertical, 1.5).is_err());
    }

    #[test]
    fn boundary_carries_parameters() {
        let radial = Build::new(spherical_radial()).unwrap();
        let paired = PairedBuild::from_plasma(radial, ReactorFamily::Spherical, 2.0).unwrap();
        let boundary = EquatorialGeometry::from_paired(&paired, 0.55)
            .unwrap()
            .boundary();
        assert_relative_eq!(boundary.major_radius(), 275.0);
        assert_relative_eq!(boundary.elongation(), 2.0);
    }
}
