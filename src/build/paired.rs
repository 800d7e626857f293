use std::fmt;

use crate::error::{ConfigurationError, Result};

use super::{Build, BuildEntry};

/// Reactor family; selects the layering and vertical-synthesis policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactorFamily {
    /// Spherical tokamak: cylindrical inboard column, lofted outboard blanket.
    Spherical,
    /// Conventional tokamak: lofted layers wrap the whole plasma, inboard-only
    /// layers stay cylindrical.
    Conventional,
}

impl fmt::Display for ReactorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spherical => write!(f, "spherical tokamak"),
            Self::Conventional => write!(f, "conventional tokamak"),
        }
    }
}

/// A radial and a vertical build checked to line up entry by entry.
///
/// Vertical builds read bottom to top: entries before the plasma lie below the
/// midplane. The vertical entry `k` places below and above the plasma pairs
/// with the radial outboard entry `k` places away from the plasma.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedBuild {
    radial: Build,
    vertical: Build,
    family: ReactorFamily,
}

impl PairedBuild {
    /// Pairs two builds after checking that they line up for `family`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MisalignedBuilds`] if the vertical build
    /// does not hold one entry per radial outboard entry on each side of the
    /// plasma, or, for conventional reactors, if the radial inboard side does
    /// not mirror the outboard side.
    pub fn new(radial: Build, vertical: Build, family: ReactorFamily) -> Result<Self> {
        let outboard = radial.outboard().len();
        let below = vertical.plasma_index();
        let above = vertical.outboard().len();
        if below != outboard || above != outboard {
            return Err(ConfigurationError::MisalignedBuilds(format!(
                "vertical build has {below} entries below and {above} above the plasma, \
                 expected {outboard} on each side to match the radial outboard"
            ))
            .into());
        }

        if family == ReactorFamily::Conventional {
            check_mirrored_inboard(&radial)?;
        }

        Ok(Self {
            radial,
            vertical,
            family,
        })
    }

    /// Pairs a radial build with a vertical build synthesised from it.
    ///
    /// The plasma height is `2 * minor_radius * elongation`. Spherical
    /// reactors mirror the radial outboard entries above and below the
    /// midplane; conventional reactors mirror the matching inboard entries.
    ///
    /// # Errors
    ///
    /// Returns an error if `elongation` is not positive, or if a conventional
    /// radial build has fewer inboard than outboard entries.
    pub fn from_plasma(radial: Build, family: ReactorFamily, elongation: f64) -> Result<Self> {
        if !elongation.is_finite() || elongation <= 0.0 {
            return Err(ConfigurationError::ParameterOutOfRange {
                parameter: "elongation",
                value: elongation,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        let minor_radius = radial.plasma_thickness() / 2.0;
        let plasma = BuildEntry::plasma(2.0 * minor_radius * elongation);

        let mirrored: Vec<BuildEntry> = match family {
            ReactorFamily::Spherical => radial.outboard().copied().collect(),
            ReactorFamily::Conventional => {
                let outboard = radial.outboard().len();
                if radial.plasma_index() < outboard {
                    return Err(ConfigurationError::MisalignedBuilds(format!(
                        "radial build has {} inboard entries but {outboard} outboard entries",
                        radial.plasma_index()
                    ))
                    .into());
                }
                radial.inboard().take(outboard).copied().collect()
            }
        };

        let vertical_entries: Vec<BuildEntry> = mirrored
            .iter()
            .rev()
            .copied()
            .chain(std::iter::once(plasma))
            .chain(mirrored.iter().copied())
            .collect();
        let vertical = Build::new(vertical_entries)?;

        Self::new(radial, vertical, family)
    }

    /// The radial build.
    #[must_use]
    pub fn radial(&self) -> &Build {
        &self.radial
    }

    /// The vertical build.
    #[must_use]
    pub fn vertical(&self) -> &Build {
        &self.vertical
    }

    /// The reactor family the builds were checked against.
    #[must_use]
    pub fn family(&self) -> ReactorFamily {
        self.family
    }

    /// Vertical thicknesses `(below, above)` at `distance` entries from the plasma.
    ///
    /// `distance` starts at 1 and runs up to the radial outboard length.
    #[must_use]
    pub fn vertical_pair(&self, distance: usize) -> (f64, f64) {
        let entries = self.vertical.entries();
        let index = self.vertical.plasma_index();
        (
            entries[index - distance].thickness,
            entries[index + distance].thickness,
        )
    }
}

fn check_mirrored_inboard(radial: &Build) -> Result<()> {
    let outboard = radial.outboard().len();
    if radial.plasma_index() < outboard {
        return Err(ConfigurationError::MisalignedBuilds(format!(
            "radial build has {} inboard entries but {outboard} outboard entries",
            radial.plasma_index()
        ))
        .into());
    }
    for (distance, (inner, outer)) in radial.inboard().zip(radial.outboard()).enumerate() {
        if inner.kind != outer.kind {
            return Err(ConfigurationError::MisalignedBuilds(format!(
                "radial entries {} places from the plasma differ: inboard {:?}, outboard {:?}",
                distance + 1,
                inner.kind,
                outer.kind
            ))
            .into());
        }
    }
    Ok(())
}
