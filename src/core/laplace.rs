//! The Laplacian restricted to a grid's interior fluid cells.
//!
//! Krylov methods see the pressure Poisson problem through this operator:
//! `matvec` is the 5-point stencil and `dot` only sums cells that pass the
//! interior guard. Ghost entries of the input supply the boundary values.

use crate::core::stencil::Discretization;
use crate::core::traits::{InnerProduct, MatVec};
use crate::fields::FieldSet;
use crate::grid::Grid;
use crate::matrix::DenseField;

pub struct LaplaceOperator<'g> {
    grid: &'g Grid,
    disc: Discretization,
}

impl<'g> LaplaceOperator<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self { grid, disc: Discretization::for_grid(grid) }
    }

    pub fn discretization(&self) -> Discretization {
        self.disc
    }

    /// r = rs − A p on every interior fluid cell.
    pub fn residual_into(&self, fields: &FieldSet, r: &mut DenseField) {
        let p = fields.p_matrix();
        for (i, j) in self.grid.interior_fluid() {
            r[(i, j)] = fields.rs(i, j) - self.disc.laplacian(p, i, j);
        }
    }

    /// Σ (A p − rs)² over interior fluid cells.
    pub fn residual_sum_squares(&self, fields: &FieldSet) -> f64 {
        let p = fields.p_matrix();
        self.grid
            .interior_fluid()
            .map(|(i, j)| {
                let val = self.disc.laplacian(p, i, j) - fields.rs(i, j);
                val * val
            })
            .sum()
    }
}

impl MatVec<DenseField> for LaplaceOperator<'_> {
    fn matvec(&self, x: &DenseField, y: &mut DenseField) {
        for (i, j) in self.grid.interior_fluid() {
            y[(i, j)] = self.disc.laplacian(x, i, j);
        }
    }
}

impl InnerProduct<DenseField> for LaplaceOperator<'_> {
    type Scalar = f64;

    fn dot(&self, x: &DenseField, y: &DenseField) -> f64 {
        self.grid.interior_fluid().map(|(i, j)| x[(i, j)] * y[(i, j)]).sum()
    }

    fn norm(&self, x: &DenseField) -> f64 {
        self.dot(x, x).sqrt()
    }
}
