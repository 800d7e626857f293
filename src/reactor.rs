//! Reactor configuration and the end-to-end layering pipeline.

use tracing::debug;

use crate::assembly::{Assembly, ColorTable, ReactorParameters};
use crate::build::{Build, PairedBuild, ReactorFamily};
use crate::error::{ConfigurationError, Result};
use crate::geometry::EquatorialGeometry;
use crate::kernel::SolidKernel;
use crate::operations::boolean::{validate_cut_shapes, TrimStage};
use crate::operations::creation::MakePlasma;
use crate::operations::layering::{CenterColumnShield, LoftedLayers};

pub const DEFAULT_ELONGATION: f64 = 2.0;
pub const DEFAULT_TRIANGULARITY: f64 = 0.55;
pub const DEFAULT_ROTATION_ANGLE: f64 = 180.0;
pub const DEFAULT_PLASMA_POINTS: usize = 100;
pub const DEFAULT_LAYER_POINTS: usize = 50;

/// Fewest boundary samples accepted for any curve.
const MIN_PROFILE_POINTS: usize = 8;

/// A parametric tokamak described by its radial and vertical builds.
///
/// `S` is the shape handle type of the kernel the reactor will be built on;
/// extra cut and intersect shapes must come from that kernel.
#[derive(Debug, Clone)]
pub struct Reactor<S> {
    paired: PairedBuild,
    triangularity: f64,
    rotation_angle: f64,
    extra_cut_shapes: Vec<S>,
    extra_intersect_shapes: Vec<S>,
    colors: ColorTable,
    plasma_points: usize,
    layer_points: usize,
}

impl<S: Clone> Reactor<S> {
    /// A spherical tokamak from explicit radial and vertical builds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MisalignedBuilds`] if the builds do not
    /// line up.
    pub fn spherical(radial: Build, vertical: Build) -> Result<Self> {
        PairedBuild::new(radial, vertical, ReactorFamily::Spherical).map(Self::from_paired)
    }

    /// A spherical tokamak whose vertical build mirrors the radial outboard.
    ///
    /// # Errors
    ///
    /// Returns an error if `elongation` is not positive.
    pub fn spherical_from_plasma(radial: Build, elongation: f64) -> Result<Self> {
        PairedBuild::from_plasma(radial, ReactorFamily::Spherical, elongation).map(Self::from_paired)
    }

    /// A conventional tokamak from explicit radial and vertical builds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MisalignedBuilds`] if the builds do not
    /// line up or the radial inboard does not mirror the outboard.
    pub fn conventional(radial: Build, vertical: Build) -> Result<Self> {
        PairedBuild::new(radial, vertical, ReactorFamily::Conventional).map(Self::from_paired)
    }

    /// A conventional tokamak whose vertical build mirrors the radial inboard.
    ///
    /// # Errors
    ///
    /// Returns an error if `elongation` is not positive or the radial
    /// inboard does not mirror the outboard.
    pub fn conventional_from_plasma(radial: Build, elongation: f64) -> Result<Self> {
        PairedBuild::from_plasma(radial, ReactorFamily::Conventional, elongation)
            .map(Self::from_paired)
    }

    /// A reactor over already paired builds, with default settings.
    #[must_use]
    pub fn from_paired(paired: PairedBuild) -> Self {
        Self {
            paired,
            triangularity: DEFAULT_TRIANGULARITY,
            rotation_angle: DEFAULT_ROTATION_ANGLE,
            extra_cut_shapes: Vec::new(),
            extra_intersect_shapes: Vec::new(),
            colors: ColorTable::new(),
            plasma_points: DEFAULT_PLASMA_POINTS,
            layer_points: DEFAULT_LAYER_POINTS,
        }
    }

    #[must_use]
    pub fn with_triangularity(mut self, triangularity: f64) -> Self {
        self.triangularity = triangularity;
        self
    }

    /// Sets the revolution angle in degrees, in (0, 360].
    #[must_use]
    pub fn with_rotation_angle(mut self, rotation_angle: f64) -> Self {
        self.rotation_angle = rotation_angle;
        self
    }

    /// Solids subtracted from every layer and registered as parts.
    #[must_use]
    pub fn with_extra_cut_shapes(mut self, shapes: Vec<S>) -> Self {
        self.extra_cut_shapes = shapes;
        self
    }

    /// Solids whose overlap with the layers becomes a separate part.
    #[must_use]
    pub fn with_extra_intersect_shapes(mut self, shapes: Vec<S>) -> Self {
        self.extra_intersect_shapes = shapes;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: ColorTable) -> Self {
        self.colors = colors;
        self
    }

    /// Sampling density of the plasma loop and of each lofted arc.
    #[must_use]
    pub fn with_profile_points(mut self, plasma_points: usize, layer_points: usize) -> Self {
        self.plasma_points = plasma_points;
        self.layer_points = layer_points;
        self
    }

    #[must_use]
    pub fn paired_build(&self) -> &PairedBuild {
        &self.paired
    }

    #[must_use]
    pub fn family(&self) -> ReactorFamily {
        self.paired.family()
    }

    /// Plasma geometry derived from the builds.
    ///
    /// # Errors
    ///
    /// Returns an error if the triangularity lies outside `[-1, 1]`.
    pub fn geometry(&self) -> Result<EquatorialGeometry> {
        EquatorialGeometry::from_paired(&self.paired, self.triangularity)
    }

    /// Derived scalars attached to the assembly.
    ///
    /// # Errors
    ///
    /// See [`Reactor::geometry`].
    pub fn parameters(&self) -> Result<ReactorParameters> {
        self.geometry().map(|g| ReactorParameters::from(&g))
    }

    /// Builds every layer in `kernel` and returns the named parts.
    ///
    /// Parameters and cut shapes are validated before the kernel is touched.
    /// Nothing is returned on failure; shapes already created stay in the
    /// kernel.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] for invalid settings or cut shapes, a
    /// geometry error for degenerate profiles or empty intersections, or any
    /// kernel error.
    pub fn execute<K: SolidKernel<Shape = S>>(&self, kernel: &mut K) -> Result<Assembly<S>> {
        self.validate()?;
        validate_cut_shapes(kernel, &self.extra_cut_shapes)?;
        let geometry = self.geometry()?;
        debug!(
            family = %self.paired.family(),
            major_radius = geometry.major_radius(),
            minor_radius = geometry.minor_radius(),
            elongation = geometry.elongation(),
            triangularity = geometry.triangularity(),
            "derived plasma geometry"
        );

        let plasma = MakePlasma::new(geometry.boundary())
            .with_rotation_angle(self.rotation_angle)
            .with_num_points(self.plasma_points)
            .execute(kernel)?;

        let mut layers = CenterColumnShield::new(&self.paired)
            .with_rotation_angle(self.rotation_angle)
            .execute(kernel)?;
        let cylinders = layers.len();
        layers.extend(
            LoftedLayers::new(&self.paired, geometry.boundary())
                .with_rotation_angle(self.rotation_angle)
                .with_num_points(self.layer_points)
                .execute(kernel)?,
        );
        debug!(cylinders, lofted = layers.len() - cylinders, "layers built");

        TrimStage::new(layers, plasma, ReactorParameters::from(&geometry))
            .with_extra_cut_shapes(self.extra_cut_shapes.clone())
            .with_extra_intersect_shapes(self.extra_intersect_shapes.clone())
            .with_colors(self.colors.clone())
            .execute(kernel)
    }

    fn validate(&self) -> Result<()> {
        if !(self.rotation_angle > 0.0 && self.rotation_angle <= 360.0) {
            return Err(ConfigurationError::ParameterOutOfRange {
                parameter: "rotation_angle",
                value: self.rotation_angle,
                min: 0.0,
                max: 360.0,
            }
            .into());
        }
        for (parameter, points) in [
            ("plasma_points", self.plasma_points),
            ("layer_points", self.layer_points),
        ] {
            if points < MIN_PROFILE_POINTS {
                return Err(ConfigurationError::ParameterOutOfRange {
                    parameter,
                    value: points as f64,
                    min: MIN_PROFILE_POINTS as f64,
                    max: f64::INFINITY,
                }
                .into());
            }
        }
        Ok(())
    }
}
