use tracing::{debug, trace};

use crate::assembly::{Assembly, ColorTable, ReactorParameters};
use crate::error::{ConfigurationError, GeometryError, Result};
use crate::kernel::{ShapeKind, SolidKernel};

/// Checks that every extra cut shape is a solid, without any boolean work.
///
/// # Errors
///
/// Returns [`ConfigurationError::InvalidCutShape`] with the 1-based index of
/// the first shape the kernel does not report as a solid.
pub fn validate_cut_shapes<K: SolidKernel>(kernel: &K, shapes: &[K::Shape]) -> Result<()> {
    for (i, shape) in shapes.iter().enumerate() {
        let kind = kernel.shape_kind(shape);
        if kind != ShapeKind::Solid {
            return Err(ConfigurationError::InvalidCutShape { index: i + 1, kind }.into());
        }
    }
    Ok(())
}

/// Combines the layers with caller-supplied shapes and names every part.
///
/// Registration order:
/// 1. `add_extra_cut_shape_<k>` for each extra cut shape.
/// 2. `extra_intersect_shapes_<k>`: each extra intersect shape intersected
///    with the union of all layers (folded in list order).
/// 3. Each layer cut by every cutter in turn (cut shapes, then intersect
///    results), named `layer_<i>`, or `layer_<i>_part_<j>` when the result
///    falls apart into several pieces. Without cutters layers pass through
///    untouched.
/// 4. `plasma`, never cut.
pub struct TrimStage<S> {
    layers: Vec<S>,
    plasma: S,
    parameters: ReactorParameters,
    extra_cut_shapes: Vec<S>,
    extra_intersect_shapes: Vec<S>,
    colors: ColorTable,
}

impl<S: Clone> TrimStage<S> {
    /// Creates a new `TrimStage` with no extra shapes and default colors.
    #[must_use]
    pub fn new(layers: Vec<S>, plasma: S, parameters: ReactorParameters) -> Self {
        Self {
            layers,
            plasma,
            parameters,
            extra_cut_shapes: Vec::new(),
            extra_intersect_shapes: Vec::new(),
            colors: ColorTable::new(),
        }
    }

    /// Solids subtracted from every layer.
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

    /// Executes the stage, producing the finished assembly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidCutShape`] before any kernel call
    /// if an extra cut shape is not a solid,
    /// [`GeometryError::EmptyIntersection`] if an extra intersect shape does
    /// not overlap the layers, or any kernel error.
    pub fn execute<K: SolidKernel<Shape = S>>(self, kernel: &mut K) -> Result<Assembly<S>> {
        validate_cut_shapes(kernel, &self.extra_cut_shapes)?;

        let mut assembly = Assembly::new(self.parameters);
        for (i, shape) in self.extra_cut_shapes.iter().enumerate() {
            assembly.add(format!("add_extra_cut_shape_{}", i + 1), shape.clone(), &self.colors)?;
        }

        let mut cutters = self.extra_cut_shapes;
        if !self.extra_intersect_shapes.is_empty() {
            let compound = union_all(kernel, &self.layers)?;
            for (i, shape) in self.extra_intersect_shapes.iter().enumerate() {
                let index = i + 1;
                let Some(compound) = &compound else {
                    return Err(GeometryError::EmptyIntersection { index }.into());
                };
                let overlap = kernel.intersect(shape, compound)?;
                if kernel.connected_components(&overlap)?.is_empty() {
                    return Err(GeometryError::EmptyIntersection { index }.into());
                }
                assembly.add(format!("extra_intersect_shapes_{index}"), overlap.clone(), &self.colors)?;
                cutters.push(overlap);
            }
        }
        debug!(layers = self.layers.len(), cutters = cutters.len(), "trimming layers");

        for (i, layer) in self.layers.into_iter().enumerate() {
            let index = i + 1;
            if cutters.is_empty() {
                assembly.add(format!("layer_{index}"), layer, &self.colors)?;
                continue;
            }

            let mut shape = layer;
            for cutter in &cutters {
                shape = kernel.cut(&shape, cutter)?;
            }
            let mut pieces = kernel.connected_components(&shape)?;
            trace!(layer = index, pieces = pieces.len(), "layer trimmed");
            if pieces.len() > 1 {
                for (j, piece) in pieces.into_iter().enumerate() {
                    assembly.add(format!("layer_{index}_part_{}", j + 1), piece, &self.colors)?;
                }
            } else {
                // A fully consumed layer keeps its slot with the empty cut result.
                let piece = pieces.pop().unwrap_or(shape);
                assembly.add(format!("layer_{index}"), piece, &self.colors)?;
            }
        }

        assembly.add("plasma".to_owned(), self.plasma, &self.colors)?;
        debug!(parts = assembly.len(), "assembly complete");
        Ok(assembly)
    }
}

/// Left fold of `shapes` with union; `None` for an empty list.
fn union_all<K: SolidKernel>(kernel: &mut K, shapes: &[K::Shape]) -> Result<Option<K::Shape>> {
    let Some((first, rest)) = shapes.split_first() else {
        return Ok(None);
    };
    let mut acc = first.clone();
    for shape in rest {
        acc = kernel.union(&acc, shape)?;
    }
    Ok(Some(acc))
}
