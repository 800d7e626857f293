use tracing::trace;

use crate::build::{LayerType, PairedBuild, ReactorFamily};
use crate::error::Result;
use crate::kernel::SolidKernel;
use crate::operations::creation::MakeShieldCylinder;

/// One concentric cylinder of the inboard column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShieldCylinder {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub z_min: f64,
    pub height: f64,
}

impl ShieldCylinder {
    /// Radial thickness of the shell.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }
}

/// Builds the stack of cylinders between the axis and the plasma.
///
/// Walking the radial build outward from the axis, each solid becomes a
/// cylinder starting at the running radius; gaps only advance the radius.
///
/// - Spherical: every solid before the plasma is emitted, each spanning the
///   whole vertical build from `-thickness_below_midplane`.
/// - Conventional: only the innermost `before - after` solids are emitted
///   (solid count before the plasma minus solid count after it), centred on
///   the midplane. The remaining inboard solids are covered by the lofted
///   layers.
pub struct CenterColumnShield<'a> {
    paired: &'a PairedBuild,
    rotation_angle: f64,
}

impl<'a> CenterColumnShield<'a> {
    /// Creates a new `CenterColumnShield` operation revolved a full turn.
    #[must_use]
    pub fn new(paired: &'a PairedBuild) -> Self {
        Self {
            paired,
            rotation_angle: 360.0,
        }
    }

    /// Sets the revolution angle in degrees.
    #[must_use]
    pub fn with_rotation_angle(mut self, rotation_angle: f64) -> Self {
        self.rotation_angle = rotation_angle;
        self
    }

    /// Radii and vertical extent of every cylinder, innermost first.
    #[must_use]
    pub fn plan(&self) -> Vec<ShieldCylinder> {
        let radial = self.paired.radial();
        let vertical = self.paired.vertical();
        let height = vertical.total_thickness();
        let (z_min, limit) = match self.paired.family() {
            ReactorFamily::Spherical => (-vertical.thickness_below_midplane(), usize::MAX),
            ReactorFamily::Conventional => {
                let (before, after) = radial.solid_counts();
                (-height / 2.0, before.saturating_sub(after))
            }
        };

        let mut cylinders = Vec::new();
        let mut radius = 0.0;
        for entry in &radial.entries()[..radial.plasma_index()] {
            if entry.kind == LayerType::Solid {
                if cylinders.len() == limit {
                    break;
                }
                cylinders.push(ShieldCylinder {
                    inner_radius: radius,
                    outer_radius: radius + entry.thickness,
                    z_min,
                    height,
                });
            }
            radius += entry.thickness;
        }
        cylinders
    }

    /// Executes the operation, creating one solid per planned cylinder.
    ///
    /// # Errors
    ///
    /// Returns an error if a cylinder profile is invalid or the kernel fails.
    pub fn execute<K: SolidKernel>(&self, kernel: &mut K) -> Result<Vec<K::Shape>> {
        self.plan()
            .into_iter()
            .map(|cylinder| {
                trace!(
                    inner = cylinder.inner_radius,
                    outer = cylinder.outer_radius,
                    "center column cylinder"
                );
                MakeShieldCylinder::new(cylinder.inner_radius, cylinder.thickness(), cylinder.height)
                    .with_lower_edge(cylinder.z_min)
                    .with_rotation_angle(self.rotation_angle)
                    .execute(kernel)
            })
            .collect()
    }
}
