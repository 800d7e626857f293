//! The solid-modelling capabilities the layering pipeline relies on.
//!
//! The pipeline never looks inside a solid. It builds profiles, asks a kernel
//! to revolve them, and combines the results with boolean operations. Any
//! backend that can do those five things can host the pipeline.

#[cfg(test)]
pub(crate) mod recording;
pub mod voxel;

use std::fmt;

use crate::error::Result;
use crate::geometry::Profile;

pub use voxel::{Aabb, GridSpec, ShapeId, VoxelKernel};

/// What a shape handle refers to, as reported by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// A solid usable as a boolean operand.
    Solid,
    /// A planar sketch that has not been turned into a solid.
    Profile,
    /// A handle the kernel no longer (or never did) know about.
    Missing,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid => write!(f, "solid"),
            Self::Profile => write!(f, "profile"),
            Self::Missing => write!(f, "missing shape"),
        }
    }
}

/// Capability interface of a solid-modelling kernel.
///
/// Revolution is about the vertical Z axis; the profile's `x` coordinate is
/// the distance from the axis and its `y` coordinate the height. A partial
/// revolution sweeps from azimuth 0 towards positive azimuth.
pub trait SolidKernel {
    /// Opaque handle to a shape owned by the kernel.
    type Shape: Clone + fmt::Debug;

    /// Revolves a closed profile about the Z axis by `angle` degrees (0, 360].
    ///
    /// # Errors
    ///
    /// Returns a geometry error if the kernel cannot build the solid.
    fn revolve(&mut self, profile: &Profile, angle: f64) -> Result<Self::Shape>;

    /// Boolean union `a ∪ b`.
    ///
    /// # Errors
    ///
    /// Returns a geometry error if the operation fails.
    fn union(&mut self, a: &Self::Shape, b: &Self::Shape) -> Result<Self::Shape>;

    /// Boolean difference `a − b`.
    ///
    /// # Errors
    ///
    /// Returns a geometry error if the operation fails.
    fn cut(&mut self, a: &Self::Shape, b: &Self::Shape) -> Result<Self::Shape>;

    /// Boolean intersection `a ∩ b`.
    ///
    /// # Errors
    ///
    /// Returns a geometry error if the operation fails.
    fn intersect(&mut self, a: &Self::Shape, b: &Self::Shape) -> Result<Self::Shape>;

    /// Splits a shape into its connected solids, in the kernel's enumeration
    /// order. An empty shape yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns a geometry error if the decomposition fails.
    fn connected_components(&mut self, shape: &Self::Shape) -> Result<Vec<Self::Shape>>;

    /// Reports what `shape` refers to.
    fn shape_kind(&self, shape: &Self::Shape) -> ShapeKind;
}
