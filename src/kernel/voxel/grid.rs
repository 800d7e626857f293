use crate::error::{ConfigurationError, Result};
use crate::math::Point3;

/// Upper bound on the number of cells a grid may hold.
const MAX_CELLS: usize = 1 << 27;

/// Axis-aligned sampling grid shared by every shape of a [`VoxelKernel`].
///
/// Cells are cubes of edge `cell`; a cell belongs to a solid when its centre
/// does. Space outside the grid is empty.
///
/// [`VoxelKernel`]: super::VoxelKernel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    min: Point3,
    cell: f64,
    dims: [usize; 3],
}

impl GridSpec {
    /// Creates a grid covering the box `[min, max]` with cubic cells of edge `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::ParameterOutOfRange`] if `cell` is not
    /// positive, the box is empty, or the grid would exceed the cell budget.
    pub fn new(min: Point3, max: Point3, cell: f64) -> Result<Self> {
        if !cell.is_finite() || cell <= 0.0 {
            return Err(ConfigurationError::ParameterOutOfRange {
                parameter: "cell",
                value: cell,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        let mut dims = [0usize; 3];
        for (axis, dim) in dims.iter_mut().enumerate() {
            let extent = max[axis] - min[axis];
            if !extent.is_finite() || extent <= 0.0 {
                return Err(ConfigurationError::ParameterOutOfRange {
                    parameter: "grid extent",
                    value: extent,
                    min: 0.0,
                    max: f64::INFINITY,
                }
                .into());
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let count = (extent / cell).ceil() as usize;
            *dim = count;
        }
        let total = dims[0].saturating_mul(dims[1]).saturating_mul(dims[2]);
        if total > MAX_CELLS {
            return Err(ConfigurationError::ParameterOutOfRange {
                parameter: "grid cells",
                value: total as f64,
                min: 1.0,
                max: MAX_CELLS as f64,
            }
            .into());
        }
        Ok(Self { min, cell, dims })
    }

    /// A grid centred on the origin reaching `half_extent` along every axis.
    ///
    /// # Errors
    ///
    /// See [`GridSpec::new`].
    pub fn cube(half_extent: f64, cell: f64) -> Result<Self> {
        Self::new(
            Point3::new(-half_extent, -half_extent, -half_extent),
            Point3::new(half_extent, half_extent, half_extent),
            cell,
        )
    }

    /// Number of cells along x, y and z.
    #[must_use]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// Edge length of a cell.
    #[must_use]
    pub fn cell(&self) -> f64 {
        self.cell
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    /// Volume of one cell.
    #[must_use]
    pub fn cell_volume(&self) -> f64 {
        self.cell * self.cell * self.cell
    }

    /// Linear index of cell `(i, j, k)`; x varies fastest.
    #[must_use]
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        (k * self.dims[1] + j) * self.dims[0] + i
    }

    /// Cell coordinates of a linear index.
    #[must_use]
    pub fn coords(&self, index: usize) -> [usize; 3] {
        let i = index % self.dims[0];
        let rest = index / self.dims[0];
        [i, rest % self.dims[1], rest / self.dims[1]]
    }

    /// Centre coordinate of cell `i` along `axis`.
    #[must_use]
    pub fn center(&self, axis: usize, i: usize) -> f64 {
        self.min[axis] + (i as f64 + 0.5) * self.cell
    }

    /// Minimum corner of cell `(i, j, k)`.
    #[must_use]
    pub fn cell_min(&self, [i, j, k]: [usize; 3]) -> Point3 {
        Point3::new(
            self.min.x + i as f64 * self.cell,
            self.min.y + j as f64 * self.cell,
            self.min.z + k as f64 * self.cell,
        )
    }

    /// Cell holding `p`, if it lies inside the grid.
    #[must_use]
    pub fn locate(&self, p: &Point3) -> Option<[usize; 3]> {
        let mut out = [0usize; 3];
        for (axis, slot) in out.iter_mut().enumerate() {
            let t = (p[axis] - self.min[axis]) / self.cell;
            if !t.is_finite() || t < 0.0 {
                return None;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let i = t.floor() as usize;
            if i >= self.dims[axis] {
                return None;
            }
            *slot = i;
        }
        Some(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn dims_round_up() {
        let grid = GridSpec::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 5.0, 2.5), 2.0)
            .unwrap();
        assert_eq!(grid.dims(), [5, 3, 2]);
        assert_eq!(grid.cell_count(), 30);
        assert_relative_eq!(grid.cell_volume(), 8.0);
    }

    #[test]
    fn index_and_coords_round_trip() {
        let grid = GridSpec::cube(10.0, 1.0).unwrap();
        let index = grid.index(3, 7, 11);
        assert_eq!(grid.coords(index), [3, 7, 11]);
    }

    #[test]
    fn centers_and_location() {
        let grid = GridSpec::cube(10.0, 2.0).unwrap();
        assert_relative_eq!(grid.center(0, 0), -9.0);
        assert_eq!(grid.locate(&Point3::new(-9.5, 0.1, 9.9)), Some([0, 5, 9]));
        assert_eq!(grid.locate(&Point3::new(10.5, 0.0, 0.0)), None);
    }

    #[test]
    fn invalid_grids_are_rejected() {
        assert!(GridSpec::cube(10.0, 0.0).is_err());
        assert!(GridSpec::cube(-1.0, 1.0).is_err());
        assert!(GridSpec::cube(1.0e6, 1.0).is_err());
    }
}
