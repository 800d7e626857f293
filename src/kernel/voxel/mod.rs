//! Sampled-occupancy reference kernel.
//!
//! Every solid is the set of grid cells whose centres it contains. Booleans
//! are exact set operations on those cells, and connected components are
//! 6-connected cell clusters, so results are deterministic and cheap to
//! compare. Resolution is bounded by the grid: features thinner than a cell
//! may vanish or fragment.

mod grid;
mod occupancy;

use std::collections::VecDeque;
use std::f64::consts::TAU;

use slotmap::SlotMap;

use self::occupancy::Occupancy;
use super::{ShapeKind, SolidKernel};
use crate::error::{ConfigurationError, GeometryError, Result};
use crate::geometry::Profile;
use crate::math::polygon_2d::scanline_crossings;
use crate::math::{Point3, TOLERANCE};

pub use grid::GridSpec;

slotmap::new_key_type! {
    /// Handle to a shape stored in a [`VoxelKernel`].
    pub struct ShapeId;
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

#[derive(Debug, Clone)]
enum ShapeData {
    Solid(Occupancy),
    Profile(Profile),
}

/// Reference [`SolidKernel`] backed by a fixed sampling grid.
#[derive(Debug)]
pub struct VoxelKernel {
    grid: GridSpec,
    shapes: SlotMap<ShapeId, ShapeData>,
}

impl VoxelKernel {
    /// Creates an empty kernel sampling on `grid`.
    #[must_use]
    pub fn new(grid: GridSpec) -> Self {
        Self {
            grid,
            shapes: SlotMap::with_key(),
        }
    }

    /// The sampling grid.
    #[must_use]
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Stores a sketch. The handle is not a solid and is rejected by booleans.
    pub fn add_profile(&mut self, profile: Profile) -> ShapeId {
        self.shapes.insert(ShapeData::Profile(profile))
    }

    /// Creates an axis-aligned box solid between two corners.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::ParameterOutOfRange`] if the box is empty
    /// along any axis.
    pub fn make_box(&mut self, min: Point3, max: Point3) -> Result<ShapeId> {
        for axis in 0..3 {
            if max[axis] - min[axis] < TOLERANCE {
                return Err(ConfigurationError::ParameterOutOfRange {
                    parameter: "box extent",
                    value: max[axis] - min[axis],
                    min: TOLERANCE,
                    max: f64::INFINITY,
                }
                .into());
            }
        }
        let [nx, ny, nz] = self.grid.dims();
        let mut occ = Occupancy::new(self.grid.cell_count());
        for k in 0..nz {
            let z = self.grid.center(2, k);
            if z < min.z || z > max.z {
                continue;
            }
            for j in 0..ny {
                let y = self.grid.center(1, j);
                if y < min.y || y > max.y {
                    continue;
                }
                for i in 0..nx {
                    let x = self.grid.center(0, i);
                    if x >= min.x && x <= max.x {
                        occ.set(self.grid.index(i, j, k));
                    }
                }
            }
        }
        Ok(self.shapes.insert(ShapeData::Solid(occ)))
    }

    /// Drops a shape. Returns `false` if the handle was already gone.
    pub fn remove(&mut self, id: ShapeId) -> bool {
        self.shapes.remove(id).is_some()
    }

    /// Number of cells a solid fills.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a live solid.
    pub fn cell_count(&self, id: ShapeId) -> Result<usize> {
        Ok(self.solid(id)?.count())
    }

    /// Sampled volume of a solid.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a live solid.
    pub fn volume(&self, id: ShapeId) -> Result<f64> {
        Ok(self.solid(id)?.count() as f64 * self.grid.cell_volume())
    }

    /// Bounding box of the filled cells, or `None` for an empty solid.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a live solid.
    pub fn bounding_box(&self, id: ShapeId) -> Result<Option<Aabb>> {
        let occ = self.solid(id)?;
        let mut lo = [usize::MAX; 3];
        let mut hi = [0usize; 3];
        let mut any = false;
        for index in occ.iter_ones() {
            any = true;
            let c = self.grid.coords(index);
            for axis in 0..3 {
                lo[axis] = lo[axis].min(c[axis]);
                hi[axis] = hi[axis].max(c[axis]);
            }
        }
        if !any {
            return Ok(None);
        }
        let cell = self.grid.cell();
        let max = self.grid.cell_min(hi);
        Ok(Some(Aabb {
            min: self.grid.cell_min(lo),
            max: Point3::new(max.x + cell, max.y + cell, max.z + cell),
        }))
    }

    /// Whether the cell holding `p` belongs to the solid.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not a live solid.
    pub fn contains_point(&self, id: ShapeId, p: &Point3) -> Result<bool> {
        let occ = self.solid(id)?;
        Ok(self
            .grid
            .locate(p)
            .is_some_and(|[i, j, k]| occ.get(self.grid.index(i, j, k))))
    }

    fn solid(&self, id: ShapeId) -> Result<&Occupancy> {
        match self.shapes.get(id) {
            Some(ShapeData::Solid(occ)) => Ok(occ),
            Some(ShapeData::Profile(_)) => Err(GeometryError::NotASolid(ShapeKind::Profile).into()),
            None => Err(GeometryError::UnknownShape.into()),
        }
    }

    fn insert_solid(&mut self, occ: Occupancy) -> ShapeId {
        self.shapes.insert(ShapeData::Solid(occ))
    }

    /// 6-connected cell clusters, ordered by their lowest cell index.
    fn label_components(&self, occ: &Occupancy) -> Vec<Occupancy> {
        let [nx, ny, nz] = self.grid.dims();
        let mut visited = Occupancy::new(occ.len());
        let mut components = Vec::new();
        let mut queue = VecDeque::new();

        for seed in occ.iter_ones() {
            if visited.get(seed) {
                continue;
            }
            let mut component = Occupancy::new(occ.len());
            visited.set(seed);
            queue.push_back(seed);
            while let Some(index) = queue.pop_front() {
                component.set(index);
                let [i, j, k] = self.grid.coords(index);
                let mut neighbours = [None; 6];
                if i > 0 {
                    neighbours[0] = Some(index - 1);
                }
                if i + 1 < nx {
                    neighbours[1] = Some(index + 1);
                }
                if j > 0 {
                    neighbours[2] = Some(index - nx);
                }
                if j + 1 < ny {
                    neighbours[3] = Some(index + nx);
                }
                if k > 0 {
                    neighbours[4] = Some(index - nx * ny);
                }
                if k + 1 < nz {
                    neighbours[5] = Some(index + nx * ny);
                }
                for next in neighbours.into_iter().flatten() {
                    if occ.get(next) && !visited.get(next) {
                        visited.set(next);
                        queue.push_back(next);
                    }
                }
            }
            components.push(component);
        }
        components
    }
}

impl SolidKernel for VoxelKernel {
    type Shape = ShapeId;

    fn revolve(&mut self, profile: &Profile, angle: f64) -> Result<ShapeId> {
        if !(angle > 0.0 && angle <= 360.0) {
            return Err(ConfigurationError::ParameterOutOfRange {
                parameter: "rotation_angle",
                value: angle,
                min: 0.0,
                max: 360.0,
            }
            .into());
        }
        let sweep = angle.to_radians();
        let full_turn = angle >= 360.0 - TOLERANCE;
        let [nx, ny, nz] = self.grid.dims();
        let mut occ = Occupancy::new(self.grid.cell_count());

        for k in 0..nz {
            let crossings = scanline_crossings(profile.points(), self.grid.center(2, k));
            if crossings.is_empty() {
                continue;
            }
            for j in 0..ny {
                let y = self.grid.center(1, j);
                for i in 0..nx {
                    let x = self.grid.center(0, i);
                    if !full_turn {
                        let mut azimuth = y.atan2(x);
                        if azimuth < 0.0 {
                            azimuth += TAU;
                        }
                        if azimuth > sweep {
                            continue;
                        }
                    }
                    let r = x.hypot(y);
                    if crossings.partition_point(|&c| c < r) % 2 == 1 {
                        occ.set(self.grid.index(i, j, k));
                    }
                }
            }
        }

        tracing::trace!(cells = occ.count(), angle, "revolved profile");
        Ok(self.insert_solid(occ))
    }

    fn union(&mut self, a: &ShapeId, b: &ShapeId) -> Result<ShapeId> {
        let occ = self.solid(*a)?.union(self.solid(*b)?);
        Ok(self.insert_solid(occ))
    }

    fn cut(&mut self, a: &ShapeId, b: &ShapeId) -> Result<ShapeId> {
        let occ = self.solid(*a)?.difference(self.solid(*b)?);
        Ok(self.insert_solid(occ))
    }

    fn intersect(&mut self, a: &ShapeId, b: &ShapeId) -> Result<ShapeId> {
        let occ = self.solid(*a)?.intersection(self.solid(*b)?);
        Ok(self.insert_solid(occ))
    }

    fn connected_components(&mut self, shape: &ShapeId) -> Result<Vec<ShapeId>> {
        let components = self.label_components(self.solid(*shape)?);
        Ok(components
            .into_iter()
            .map(|occ| self.insert_solid(occ))
            .collect())
    }

    fn shape_kind(&self, shape: &ShapeId) -> ShapeKind {
        match self.shapes.get(*shape) {
            Some(ShapeData::Solid(_)) => ShapeKind::Solid,
            Some(ShapeData::Profile(_)) => ShapeKind::Profile,
            None => ShapeKind::Missing,
        }
    }
}
