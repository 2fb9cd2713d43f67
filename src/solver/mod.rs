//! Pressure solver interface and its variants.
//!
//! Every variant performs one pass over the pressure field per call and
//! returns the *local* residual sum of squares
//! `Σ (laplacian(p) − rs)²` over the interior fluid cells of the grid. The
//! caller reduces that value across subdomains before judging convergence.

use crate::boundary::Boundary;
use crate::core::LaplaceOperator;
use crate::fields::FieldSet;
use crate::grid::Grid;

/// Common interface of the pressure Poisson solvers.
pub trait PressureSolver: Send {
    /// Update `fields`' pressure in place and return the local residual sum
    /// of squares. `boundaries` are only consulted by variants that manage
    /// boundary application themselves; multigrid uses its own per-level lists.
    fn solve(&mut self, fields: &mut FieldSet, grid: &Grid, boundaries: &[Box<dyn Boundary>]) -> f64;

    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;
}

/// Σ (laplacian(p) − rs)² over the interior fluid cells of `grid`.
pub fn residual_sum_squares(fields: &FieldSet, grid: &Grid) -> f64 {
    LaplaceOperator::new(grid).residual_sum_squares(fields)
}

pub mod jacobi;
pub use jacobi::{Jacobi, WeightedJacobi};

pub mod sor;
pub use sor::{GaussSeidel, Sor};

pub mod richardson;
pub use richardson::Richardson;

pub mod cg;
pub use cg::ConjugateGradient;

pub mod transfer;
pub use transfer::{RestrictionStencil, prolongate, restrict};

pub mod multigrid;
pub use multigrid::{MultiGrid, MultiGridVCycle};
