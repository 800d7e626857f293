//! The named, colored output of a reactor pipeline.

use std::collections::HashMap;

use crate::error::{ConfigurationError, Result};
use crate::geometry::EquatorialGeometry;

/// RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Grey used for parts without an entry in the color table.
    pub const DEFAULT: Self = Self {
        r: 0.5,
        g: 0.5,
        b: 0.5,
        a: 1.0,
    };

    /// Creates an opaque color.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidColor`] if a component lies
    /// outside `[0, 1]`.
    pub fn rgb(r: f64, g: f64, b: f64) -> Result<Self> {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color with transparency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidColor`] if a component lies
    /// outside `[0, 1]`.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Result<Self> {
        if let Some(v) = [r, g, b, a].into_iter().find(|v| !(0.0..=1.0).contains(v)) {
            return Err(ConfigurationError::InvalidColor(format!(
                "component {v} lies outside [0, 1]"
            ))
            .into());
        }
        Ok(Self { r, g, b, a })
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<&[f64]> for Color {
    type Error = crate::error::TokamakError;

    fn try_from(values: &[f64]) -> Result<Self> {
        match *values {
            [r, g, b] => Self::rgb(r, g, b),
            [r, g, b, a] => Self::rgba(r, g, b, a),
            _ => Err(ConfigurationError::InvalidColor(format!(
                "expected 3 or 4 components, got {}",
                values.len()
            ))
            .into()),
        }
    }
}

/// Caller-supplied colors keyed by part name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorTable {
    colors: HashMap<String, Color>,
}

impl ColorTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `color` to the part called `name`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, color: Color) -> Self {
        self.insert(name, color);
        self
    }

    /// Assigns `color` to the part called `name`, replacing any earlier entry.
    pub fn insert(&mut self, name: impl Into<String>, color: Color) {
        self.colors.insert(name.into(), color);
    }

    /// The color for `name`, or [`Color::DEFAULT`].
    #[must_use]
    pub fn resolve(&self, name: &str) -> Color {
        self.colors.get(name).copied().unwrap_or_default()
    }
}

/// Scalars derived from the builds, attached to every assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactorParameters {
    pub elongation: f64,
    pub triangularity: f64,
    pub major_radius: f64,
    pub minor_radius: f64,
}

impl From<&EquatorialGeometry> for ReactorParameters {
    fn from(geometry: &EquatorialGeometry) -> Self {
        Self {
            elongation: geometry.elongation(),
            triangularity: geometry.triangularity(),
            major_radius: geometry.major_radius(),
            minor_radius: geometry.minor_radius(),
        }
    }
}

/// A named solid with its display color.
#[derive(Debug, Clone, PartialEq)]
pub struct Part<S> {
    pub name: String,
    pub shape: S,
    pub color: Color,
}

/// Ordered parts in pipeline order, plus the derived reactor parameters.
#[derive(Debug, Clone)]
pub struct Assembly<S> {
    parts: Vec<Part<S>>,
    parameters: ReactorParameters,
}

impl<S> Assembly<S> {
    pub(crate) fn new(parameters: ReactorParameters) -> Self {
        Self {
            parts: Vec::new(),
            parameters,
        }
    }

    pub(crate) fn add(&mut self, name: String, shape: S, colors: &ColorTable) -> Result<()> {
        if self.get(&name).is_some() {
            return Err(ConfigurationError::DuplicatePartName(name).into());
        }
        let color = colors.resolve(&name);
        self.parts.push(Part { name, shape, color });
        Ok(())
    }

    /// All parts in registration order.
    #[must_use]
    pub fn parts(&self) -> &[Part<S>] {
        &self.parts
    }

    /// The part called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Part<S>> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Part names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.parts.iter().map(|p| p.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    #[must_use]
    pub fn parameters(&self) -> &ReactorParameters {
        &self.parameters
    }

    /// Consumes the assembly, returning its parts.
    #[must_use]
    pub fn into_parts(self) -> Vec<Part<S>> {
        self.parts
    }
}
