//! Symbolic kernel that records every call, for order-sensitive tests.

use std::collections::HashMap;

use super::{ShapeKind, SolidKernel};
use crate::error::Result;
use crate::geometry::Profile;

/// A shape is its construction expression, e.g. `(rev1-rev3)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Sym {
    pub(crate) expr: String,
    pub(crate) kind: ShapeKind,
}

impl Sym {
    pub(crate) fn solid(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            kind: ShapeKind::Solid,
        }
    }

    pub(crate) fn profile(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            kind: ShapeKind::Profile,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingKernel {
    pub(crate) calls: Vec<String>,
    /// Component counts keyed by exact expression; anything else has one component.
    pub(crate) splits: HashMap<String, usize>,
    pub(crate) revolved: Vec<(Profile, f64)>,
}

impl RecordingKernel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_split(mut self, expr: &str, count: usize) -> Self {
        self.splits.insert(expr.to_owned(), count);
        self
    }

    pub(crate) fn calls_starting_with(&self, prefix: &str) -> Vec<&str> {
        self.calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .map(String::as_str)
            .collect()
    }
}

impl SolidKernel for RecordingKernel {
    type Shape = Sym;

    fn revolve(&mut self, profile: &Profile, angle: f64) -> Result<Sym> {
        self.revolved.push((profile.clone(), angle));
        let expr = format!("rev{}", self.revolved.len());
        self.calls.push(format!("revolve {expr} {angle}"));
        Ok(Sym::solid(expr))
    }

    fn union(&mut self, a: &Sym, b: &Sym) -> Result<Sym> {
        self.calls.push(format!("union {} {}", a.expr, b.expr));
        Ok(Sym::solid(format!("({}|{})", a.expr, b.expr)))
    }

    fn cut(&mut self, a: &Sym, b: &Sym) -> Result<Sym> {
        self.calls.push(format!("cut {} {}", a.expr, b.expr));
        Ok(Sym::solid(format!("({}-{})", a.expr, b.expr)))
    }

    fn intersect(&mut self, a: &Sym, b: &Sym) -> Result<Sym> {
        self.calls.push(format!("intersect {} {}", a.expr, b.expr));
        Ok(Sym::solid(format!("({}&{})", a.expr, b.expr)))
    }

    fn connected_components(&mut self, shape: &Sym) -> Result<Vec<Sym>> {
        self.calls.push(format!("components {}", shape.expr));
        let count = self.splits.get(&shape.expr).copied().unwrap_or(1);
        if count == 1 {
            return Ok(vec![shape.clone()]);
        }
        Ok((1..=count)
            .map(|j| Sym::solid(format!("{}#{j}", shape.expr)))
            .collect())
    }

    fn shape_kind(&self, shape: &Sym) -> ShapeKind {
        shape.kind
    }
}
