//! One-dimensional reactor builds.
//!
//! A build is an ordered list of layers along one direction (the equatorial
//! radius or the vertical axis). Exactly one entry is the plasma; every other
//! entry is either a solid layer or an empty gap.

mod paired;

pub use paired::{PairedBuild, ReactorFamily};

use crate::error::{ConfigurationError, Result};

/// Tag of a build entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    /// Empty space between layers.
    Gap,
    /// A physical layer that becomes a solid.
    Solid,
    /// The plasma region.
    Plasma,
}

/// A single build element: a tag and a thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildEntry {
    pub kind: LayerType,
    pub thickness: f64,
}

impl BuildEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(kind: LayerType, thickness: f64) -> Self {
        Self { kind, thickness }
    }

    /// Creates a gap entry.
    #[must_use]
    pub fn gap(thickness: f64) -> Self {
        Self::new(LayerType::Gap, thickness)
    }

    /// Creates a solid entry.
    #[must_use]
    pub fn solid(thickness: f64) -> Self {
        Self::new(LayerType::Solid, thickness)
    }

    /// Creates a plasma entry.
    #[must_use]
    pub fn plasma(thickness: f64) -> Self {
        Self::new(LayerType::Plasma, thickness)
    }
}

impl From<(LayerType, f64)> for BuildEntry {
    fn from((kind, thickness): (LayerType, f64)) -> Self {
        Self::new(kind, thickness)
    }
}

/// Returns the index of the unique plasma entry.
///
/// # Errors
///
/// Returns [`ConfigurationError::PlasmaCount`] if the build holds zero or
/// several plasma entries.
pub fn plasma_index(entries: &[BuildEntry]) -> Result<usize> {
    let mut found = None;
    let mut count = 0;
    for (i, entry) in entries.iter().enumerate() {
        if entry.kind == LayerType::Plasma {
            count += 1;
            if found.is_none() {
                found = Some(i);
            }
        }
    }
    match (count, found) {
        (1, Some(index)) => Ok(index),
        _ => Err(ConfigurationError::PlasmaCount { count }.into()),
    }
}

/// Sum of every entry (gap or solid) strictly before the plasma.
///
/// # Errors
///
/// Returns [`ConfigurationError::PlasmaCount`] if the plasma is not unique.
pub fn prefix_thickness_before_plasma(entries: &[BuildEntry]) -> Result<f64> {
    let index = plasma_index(entries)?;
    Ok(entries[..index].iter().map(|e| e.thickness).sum())
}

/// Thickness of the inboard stack up to the plasma-facing gap.
///
/// Walks the entries before the plasma and stops at a gap that directly
/// precedes the plasma, so the result is the outer radius of the last inboard
/// solid. A build without such a gap yields the same value as
/// [`prefix_thickness_before_plasma`]. Sizes the cylinder that trims lofted
/// shells away from the inboard column.
///
/// # Errors
///
/// Returns [`ConfigurationError::PlasmaCount`] if the plasma is not unique.
pub fn prefix_thickness_before_plasma_inclusive_adjacent_gap(
    entries: &[BuildEntry],
) -> Result<f64> {
    let index = plasma_index(entries)?;
    let end = match index.checked_sub(1).map(|i| entries[i].kind) {
        Some(LayerType::Gap) => index - 1,
        _ => index,
    };
    Ok(entries[..end].iter().map(|e| e.thickness).sum())
}

/// Thickness of the unique plasma entry.
///
/// # Errors
///
/// Returns [`ConfigurationError::PlasmaCount`] if the plasma is not unique.
pub fn plasma_thickness(entries: &[BuildEntry]) -> Result<f64> {
    let index = plasma_index(entries)?;
    Ok(entries[index].thickness)
}

/// A validated build: positive finite thicknesses and a single plasma entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Build {
    entries: Vec<BuildEntry>,
    plasma_index: usize,
}

impl Build {
    /// Validates and wraps a list of entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidThickness`] for a non-positive or
    /// non-finite thickness and [`ConfigurationError::PlasmaCount`] unless
    /// exactly one entry is plasma.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<BuildEntry>,
    {
        let entries: Vec<BuildEntry> = entries.into_iter().map(Into::into).collect();
        for (index, entry) in entries.iter().enumerate() {
            if !entry.thickness.is_finite() || entry.thickness <= 0.0 {
                return Err(ConfigurationError::InvalidThickness {
                    index,
                    thickness: entry.thickness,
                }
                .into());
            }
        }
        let plasma_index = plasma_index(&entries)?;
        Ok(Self {
            entries,
            plasma_index,
        })
    }

    /// All entries in build order.
    #[must_use]
    pub fn entries(&self) -> &[BuildEntry] {
        &self.entries
    }

    /// Number of entries, plasma included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: a valid build holds at least the plasma.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the plasma entry.
    #[must_use]
    pub fn plasma_index(&self) -> usize {
        self.plasma_index
    }

    /// Thickness of the plasma entry.
    #[must_use]
    pub fn plasma_thickness(&self) -> f64 {
        self.entries[self.plasma_index].thickness
    }

    /// Sum of every entry before the plasma.
    #[must_use]
    pub fn prefix_thickness_before_plasma(&self) -> f64 {
        self.entries[..self.plasma_index]
            .iter()
            .map(|e| e.thickness)
            .sum()
    }

    /// See [`prefix_thickness_before_plasma_inclusive_adjacent_gap`].
    #[must_use]
    pub fn prefix_thickness_before_plasma_inclusive_adjacent_gap(&self) -> f64 {
        let end = match self.inboard().next().map(|e| e.kind) {
            Some(LayerType::Gap) => self.plasma_index - 1,
            _ => self.plasma_index,
        };
        self.entries[..end].iter().map(|e| e.thickness).sum()
    }

    /// Sum of all thicknesses, plasma included.
    #[must_use]
    pub fn total_thickness(&self) -> f64 {
        self.entries.iter().map(|e| e.thickness).sum()
    }

    /// Distance from the start of the build to the plasma centre.
    #[must_use]
    pub fn thickness_below_midplane(&self) -> f64 {
        self.prefix_thickness_before_plasma() + self.plasma_thickness() / 2.0
    }

    /// Distance from the plasma centre to the end of the build.
    #[must_use]
    pub fn thickness_above_midplane(&self) -> f64 {
        self.outboard().map(|e| e.thickness).sum::<f64>() + self.plasma_thickness() / 2.0
    }

    /// Entries before the plasma, nearest to the plasma first.
    pub fn inboard(&self) -> impl ExactSizeIterator<Item = &BuildEntry> + '_ {
        self.entries[..self.plasma_index].iter().rev()
    }

    /// Entries after the plasma, nearest to the plasma first.
    pub fn outboard(&self) -> impl ExactSizeIterator<Item = &BuildEntry> + '_ {
        self.entries[self.plasma_index + 1..].iter()
    }

    /// Number of solid entries before and after the plasma.
    #[must_use]
    pub fn solid_counts(&self) -> (usize, usize) {
        let count = |entries: &[BuildEntry]| {
            entries
                .iter()
                .filter(|e| e.kind == LayerType::Solid)
                .count()
        };
        (
            count(&self.entries[..self.plasma_index]),
            count(&self.entries[self.plasma_index + 1..]),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::TokamakError;

    /// The spherical reference radial build.
    pub(crate) fn spherical_radial() -> Vec<BuildEntry> {
        vec![
            BuildEntry::gap(10.0),
            BuildEntry::solid(50.0),
            BuildEntry::solid(15.0),
            BuildEntry::gap(50.0),
            BuildEntry::plasma(300.0),
            BuildEntry::gap(60.0),
            BuildEntry::solid(15.0),
            BuildEntry::solid(60.0),
            BuildEntry::solid(10.0),
        ]
    }

    /// The conventional reference radial build.
    pub(crate) fn conventional_radial() -> Vec<BuildEntry> {
        vec![
            BuildEntry::gap(10.0),
            BuildEntry::solid(30.0),
            BuildEntry::solid(50.0),
            BuildEntry::solid(10.0),
            BuildEntry::solid(120.0),
            BuildEntry::solid(20.0),
            BuildEntry::gap(60.0),
            BuildEntry::plasma(300.0),
            BuildEntry::gap(60.0),
            BuildEntry::solid(20.0),
            BuildEntry::solid(120.0),
            BuildEntry::solid(10.0),
        ]
    }

    fn plasma_count_of(err: TokamakError) -> usize {
        match err {
            TokamakError::Configuration(ConfigurationError::PlasmaCount { count }) => count,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn plasma_index_in_any_position() {
        for position in 0..5 {
            let mut entries = vec![BuildEntry::solid(1.0); 4];
            entries.insert(position, BuildEntry::plasma(2.0));
            assert_eq!(plasma_index(&entries).unwrap(), position);
        }
    }

    #[test]
    fn plasma_index_rejects_missing_plasma() {
        let entries = vec![BuildEntry::gap(1.0), BuildEntry::solid(2.0)];
        assert_eq!(plasma_count_of(plasma_index(&entries).unwrap_err()), 0);
    }

    #[test]
    fn plasma_index_rejects_two_plasmas() {
        let entries = vec![
            BuildEntry::plasma(1.0),
            BuildEntry::solid(2.0),
            BuildEntry::plasma(1.0),
        ];
        assert_eq!(plasma_count_of(plasma_index(&entries).unwrap_err()), 2);
        assert!(prefix_thickness_before_plasma(&entries).is_err());
        assert!(plasma_thickness(&entries).is_err());
    }

    #[test]
    fn prefix_sums_of_reference_build() {
        let entries = spherical_radial();
        assert_relative_eq!(prefix_thickness_before_plasma(&entries).unwrap(), 125.0);
        assert_relative_eq!(
            prefix_thickness_before_plasma_inclusive_adjacent_gap(&entries).unwrap(),
            75.0
        );
        assert_relative_eq!(plasma_thickness(&entries).unwrap(), 300.0);
    }

    #[test]
    fn adjacent_gap_prefix_without_gap_matches_plain_prefix() {
        let entries = vec![
            BuildEntry::gap(5.0),
            BuildEntry::solid(20.0),
            BuildEntry::plasma(100.0),
            BuildEntry::solid(20.0),
        ];
        assert_relative_eq!(
            prefix_thickness_before_plasma_inclusive_adjacent_gap(&entries).unwrap(),
            25.0
        );
    }

    #[test]
    fn adjacent_gap_prefix_with_plasma_first() {
        let entries = vec![BuildEntry::plasma(100.0), BuildEntry::solid(20.0)];
        assert_relative_eq!(
            prefix_thickness_before_plasma_inclusive_adjacent_gap(&entries).unwrap(),
            0.0
        );
    }

    #[test]
    fn build_rejects_non_positive_thickness() {
        let err = Build::new(vec![
            BuildEntry::solid(1.0),
            BuildEntry::gap(0.0),
            BuildEntry::plasma(3.0),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            TokamakError::Configuration(ConfigurationError::InvalidThickness { index: 1, .. })
        ));
        assert!(Build::new(vec![BuildEntry::plasma(f64::NAN)]).is_err());
    }

    #[test]
    fn build_accepts_tuples() {
        let build = Build::new([(LayerType::Gap, 2.0), (LayerType::Plasma, 8.0)]).unwrap();
        assert_eq!(build.plasma_index(), 1);
        assert_eq!(build.len(), 2);
    }

    #[test]
    fn build_accessors_agree_with_free_functions() {
        let build = Build::new(spherical_radial()).unwrap();
        assert_relative_eq!(build.prefix_thickness_before_plasma(), 125.0);
        assert_relative_eq!(
            build.prefix_thickness_before_plasma_inclusive_adjacent_gap(),
            75.0
        );
        assert_relative_eq!(build.total_thickness(), 570.0);
        assert_relative_eq!(build.thickness_below_midplane(), 275.0);
        assert_relative_eq!(build.thickness_above_midplane(), 295.0);
        assert_eq!(build.solid_counts(), (2, 3));
        assert_eq!(build.inboard().len(), 4);
        assert_eq!(build.outboard().len(), 4);
        assert_eq!(build.inboard().next().unwrap().kind, LayerType::Gap);
    }

    #[test]
    fn prefix_functions_do_not_mutate() {
        let entries = spherical_radial();
        let before = entries.clone();
        let _ = prefix_thickness_before_plasma(&entries).unwrap();
        let _ = prefix_thickness_before_plasma_inclusive_adjacent_gap(&entries).unwrap();
        assert_eq!(entries, before);
    }
}
