use tracing::trace;

use crate::build::{LayerType, PairedBuild, ReactorFamily};
use crate::error::Result;
use crate::geometry::PlasmaBoundary;
use crate::kernel::SolidKernel;
use crate::operations::creation::MakeShieldCylinder;
use crate::operations::shaping::BlanketFromPlasma;

/// One offset shell along a poloidal arc.
///
/// Triples hold the values at the arc start, middle and end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellPlan {
    pub start_angle: f64,
    pub stop_angle: f64,
    pub thickness: [f64; 3],
    pub offset: [f64; 3],
    pub connect_to_center: bool,
}

/// A lofted layer: one shell, or two halves that get unioned.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPlan {
    /// Position of the layer in the radial outboard build, 1 = next to the plasma.
    pub distance: usize,
    pub shells: Vec<ShellPlan>,
}

/// Running offsets from the plasma boundary, per side.
#[derive(Debug, Default, Clone, Copy)]
struct Cumulative {
    below: f64,
    above: f64,
    outer: f64,
    inner: f64,
}

/// Builds the shells that wrap the plasma, one per solid radial outboard entry.
///
/// Gaps produce no geometry but push every later shell further out.
///
/// - Spherical: each shell covers the outboard half (`-90°..90°`) and is
///   closed to the axis; the inboard column is then carved out of it with a
///   cutting cylinder whose radius is the inboard build up to, but not
///   including, a gap facing the plasma.
/// - Conventional: each layer is the union of an outboard half (`90°..-90°`)
///   and an inboard half (`-90°..-270°`) using the mirrored inboard
///   thickness.
pub struct LoftedLayers<'a> {
    paired: &'a PairedBuild,
    boundary: PlasmaBoundary,
    rotation_angle: f64,
    num_points: usize,
}

impl<'a> LoftedLayers<'a> {
    /// Creates a new `LoftedLayers` operation revolved a full turn.
    #[must_use]
    pub fn new(paired: &'a PairedBuild, boundary: PlasmaBoundary) -> Self {
        Self {
            paired,
            boundary,
            rotation_angle: 360.0,
            num_points: 50,
        }
    }

    /// Sets the revolution angle in degrees.
    #[must_use]
    pub fn with_rotation_angle(mut self, rotation_angle: f64) -> Self {
        self.rotation_angle = rotation_angle;
        self
    }

    /// Sets how many points are sampled along each arc.
    #[must_use]
    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    /// Shell parameters of every layer, innermost first.
    #[must_use]
    pub fn plan(&self) -> Vec<LayerPlan> {
        let radial = self.paired.radial();
        let mut cumulative = Cumulative::default();
        let mut layers = Vec::new();

        match self.paired.family() {
            ReactorFamily::Spherical => {
                for (i, entry) in radial.outboard().enumerate() {
                    let distance = i + 1;
                    let (below, above) = self.paired.vertical_pair(distance);
                    if entry.kind == LayerType::Solid {
                        layers.push(LayerPlan {
                            distance,
                            shells: vec![ShellPlan {
                                start_angle: -90.0,
                                stop_angle: 90.0,
                                thickness: [below, entry.thickness, above],
                                offset: [cumulative.below, cumulative.outer, cumulative.above],
                                connect_to_center: true,
                            }],
                        });
                    }
                    cumulative.below += below;
                    cumulative.outer += entry.thickness;
                    cumulative.above += above;
                }
            }
            ReactorFamily::Conventional => {
                for (i, (outer, inner)) in radial.outboard().zip(radial.inboard()).enumerate() {
                    let distance = i + 1;
                    let (below, above) = self.paired.vertical_pair(distance);
                    if outer.kind == LayerType::Solid {
                        layers.push(LayerPlan {
                            distance,
                            shells: vec![
                                ShellPlan {
                                    start_angle: 90.0,
                                    stop_angle: -90.0,
                                    thickness: [above, outer.thickness, below],
                                    offset: [cumulative.above, cumulative.outer, cumulative.below],
                                    connect_to_center: false,
                                },
                                ShellPlan {
                                    start_angle: -90.0,
                                    stop_angle: -270.0,
                                    thickness: [below, inner.thickness, above],
                                    offset: [cumulative.below, cumulative.inner, cumulative.above],
                                    connect_to_center: false,
                                },
                            ],
                        });
                    }
                    cumulative.below += below;
                    cumulative.above += above;
                    cumulative.outer += outer.thickness;
                    cumulative.inner += inner.thickness;
                }
            }
        }
        layers
    }

    /// Executes the operation, creating one solid per planned layer.
    ///
    /// # Errors
    ///
    /// Returns an error if a shell profile is invalid or the kernel fails.
    pub fn execute<K: SolidKernel>(&self, kernel: &mut K) -> Result<Vec<K::Shape>> {
        let plan = self.plan();
        if plan.is_empty() {
            return Ok(Vec::new());
        }

        let cutting_cylinder = match self.paired.family() {
            ReactorFamily::Spherical => self.cutting_cylinder(kernel)?,
            ReactorFamily::Conventional => None,
        };

        let mut shapes = Vec::with_capacity(plan.len());
        for layer in &plan {
            trace!(distance = layer.distance, shells = layer.shells.len(), "lofted layer");
            let mut shape: Option<K::Shape> = None;
            for shell in &layer.shells {
                let part = self.shell(shell).execute(kernel)?;
                shape = Some(match shape {
                    Some(acc) => kernel.union(&acc, &part)?,
                    None => part,
                });
            }
            let Some(mut shape) = shape else {
                continue;
            };
            if let Some(cylinder) = &cutting_cylinder {
                shape = kernel.cut(&shape, cylinder)?;
            }
            shapes.push(shape);
        }
        Ok(shapes)
    }

    fn shell(&self, shell: &ShellPlan) -> BlanketFromPlasma {
        BlanketFromPlasma::new(self.boundary, shell.start_angle, shell.stop_angle, shell.thickness)
            .with_offset(shell.offset)
            .with_connect_to_center(shell.connect_to_center)
            .with_rotation_angle(self.rotation_angle)
            .with_num_points(self.num_points)
    }

    /// Full-turn solid cylinder covering the inboard column, twice as tall as
    /// the vertical build. `None` when there is no inboard material to carve.
    fn cutting_cylinder<K: SolidKernel>(&self, kernel: &mut K) -> Result<Option<K::Shape>> {
        let radius = self
            .paired
            .radial()
            .prefix_thickness_before_plasma_inclusive_adjacent_gap();
        if radius <= 0.0 {
            return Ok(None);
        }
        let height = 2.0 * self.paired.vertical().total_thickness();
        MakeShieldCylinder::new(0.0, radius, height)
            .execute(kernel)
            .map(Some)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::build::tests::{conventional_radial, spherical_radial};
    use crate::build::{Build, BuildEntry};
    use crate::geometry::EquatorialGeometry;
    use crate::kernel::recording::RecordingKernel;

    fn paired(family: ReactorFamily) -> PairedBuild {
        let entries = match family {
            ReactorFamily::Spherical => spherical_radial(),
            ReactorFamily::Conventional => conventional_radial(),
        };
        PairedBuild::from_plasma(Build::new(entries).unwrap(), family, 2.0).unwrap()
    }

    fn boundary(paired: &PairedBuild) -> PlasmaBoundary {
        EquatorialGeometry::from_paired(paired, 0.55)
            .unwrap()
            .boundary()
    }

    #[test]
    fn spherical_plan_accumulates_offsets() {
        let paired = paired(ReactorFamily::Spherical);
        let plan = LoftedLayers::new(&paired, boundary(&paired)).plan();

        assert_eq!(plan.len(), 3);
        assert_eq!(
            plan.iter().map(|l| l.distance).collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
        let first = plan[0].shells[0];
        assert_eq!(first.thickness, [15.0, 15.0, 15.0]);
        assert_eq!(first.offset, [60.0, 60.0, 60.0]);
        assert!(first.connect_to_center);
        assert_relative_eq!(first.start_angle, -90.0);
        assert_relative_eq!(first.stop_angle, 90.0);
        assert_eq!(plan[1].shells[0].offset, [75.0, 75.0, 75.0]);
        assert_eq!(plan[2].shells[0].thickness, [10.0, 10.0, 10.0]);
        assert_eq!(plan[2].shells[0].offset, [135.0, 135.0, 135.0]);
    }

    #[test]
    fn conventional_plan_has_two_halves() {
        let paired = paired(ReactorFamily::Conventional);
        let plan = LoftedLayers::new(&paired, boundary(&paired)).plan();

        assert_eq!(plan.len(), 3);
        let layer = &plan[1];
        assert_eq!(layer.distance, 3);
        let [outer, inner] = [layer.shells[0], layer.shells[1]];
        assert_relative_eq!(outer.start_angle, 90.0);
        assert_relative_eq!(outer.stop_angle, -90.0);
        assert_eq!(outer.thickness, [120.0, 120.0, 120.0]);
        assert_eq!(outer.offset, [80.0, 80.0, 80.0]);
        assert_relative_eq!(inner.start_angle, -90.0);
        assert_relative_eq!(inner.stop_angle, -270.0);
        assert_eq!(inner.thickness, [120.0, 120.0, 120.0]);
        assert_eq!(inner.offset, [80.0, 80.0, 80.0]);
        assert!(!inner.connect_to_center);
    }

    #[test]
    fn conventional_vertical_build_drives_caps() {
        let radial = Build::new(conventional_radial()).unwrap();
        let vertical = Build::new([
            BuildEntry::solid(5.0),
            BuildEntry::solid(7.0),
            BuildEntry::solid(30.0),
            BuildEntry::gap(40.0),
            BuildEntry::plasma(600.0),
            BuildEntry::gap(45.0),
            BuildEntry::solid(25.0),
            BuildEntry::solid(110.0),
            BuildEntry::solid(9.0),
        ])
        .unwrap();
        let paired = PairedBuild::new(radial, vertical, ReactorFamily::Conventional).unwrap();
        let plan = LoftedLayers::new(&paired, boundary(&paired)).plan();

        let first = &plan[0].shells;
        // Outer half runs top to bottom, inner half bottom to top.
        assert_eq!(first[0].thickness, [25.0, 20.0, 30.0]);
        assert_eq!(first[0].offset, [45.0, 60.0, 40.0]);
        assert_eq!(first[1].thickness, [30.0, 20.0, 25.0]);
        assert_eq!(first[1].offset, [40.0, 60.0, 45.0]);
    }

    #[test]
    fn spherical_layers_are_cut_by_the_column() {
        let paired = paired(ReactorFamily::Spherical);
        let mut kernel = RecordingKernel::new();
        let shapes = LoftedLayers::new(&paired, boundary(&paired))
            .execute(&mut kernel)
            .unwrap();

        assert_eq!(shapes.len(), 3);
        assert_eq!(
            kernel.calls,
            vec![
                "revolve rev1 360",
                "revolve rev2 360",
                "cut rev2 rev1",
                "revolve rev3 360",
                "cut rev3 rev1",
                "revolve rev4 360",
                "cut rev4 rev1",
            ]
        );
        let (min, max) = kernel.revolved[0].0.bounds();
        assert_relative_eq!(min.x, 0.0);
        assert_relative_eq!(max.x, 75.0);
        assert_relative_eq!(max.y - min.y, 2.0 * paired.vertical().total_thickness());
    }

    #[test]
    fn conventional_layers_union_both_halves() {
        let paired = paired(ReactorFamily::Conventional);
        let mut kernel = RecordingKernel::new();
        let shapes = LoftedLayers::new(&paired, boundary(&paired))
            .with_rotation_angle(90.0)
            .execute(&mut kernel)
            .unwrap();

        assert_eq!(shapes.len(), 3);
        assert_eq!(kernel.calls_starting_with("union").len(), 3);
        assert!(kernel.calls_starting_with("cut").is_empty());
        assert_eq!(shapes[0].expr, "(rev1|rev2)");
        assert!(kernel.revolved.iter().all(|(_, angle)| (*angle - 90.0).abs() < 1e-12));
    }
}
