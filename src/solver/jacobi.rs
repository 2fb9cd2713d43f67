//! Jacobi relaxation: every update reads from a snapshot of the pre-sweep field.

use crate::boundary::Boundary;
use crate::core::Discretization;
use crate::fields::FieldSet;
use crate::grid::Grid;
use crate::solver::{PressureSolver, residual_sum_squares};
use std::fmt;

/// Plain Jacobi: `p = coeff · (helper(p_old) − rs)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Jacobi;

impl Jacobi {
    pub fn new() -> Self {
        Self
    }
}

impl PressureSolver for Jacobi {
    fn solve(&mut self, fields: &mut FieldSet, grid: &Grid, _boundaries: &[Box<dyn Boundary>]) -> f64 {
        let disc = Discretization::for_grid(grid);
        let coeff = disc.diagonal_coeff();

        let p_old = fields.p_matrix().clone();
        for (i, j) in grid.interior_fluid() {
            *fields.p_mut(i, j) = coeff * (disc.sor_helper(&p_old, i, j) - fields.rs(i, j));
        }

        residual_sum_squares(fields, grid)
    }

    fn name(&self) -> &'static str {
        "jacobi"
    }
}

/// Damped Jacobi: the SOR blend evaluated against the pre-sweep snapshot.
#[derive(Clone, Copy, Debug)]
pub struct WeightedJacobi {
    omega: f64,
}

impl WeightedJacobi {
    pub fn new(omega: f64) -> Self {
        Self { omega }
    }

    pub fn omega(&self) -> f64 {
        self.omega
    }
}

impl fmt::Display for WeightedJacobi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeightedJacobi(omega={})", self.omega)
    }
}

impl PressureSolver for WeightedJacobi {
    fn solve(&mut self, fields: &mut FieldSet, grid: &Grid, _boundaries: &[Box<dyn Boundary>]) -> f64 {
        let disc = Discretization::for_grid(grid);
        let coeff = self.omega * disc.diagonal_coeff();

        let p_old = fields.p_matrix().clone();
        for (i, j) in grid.interior_fluid() {
            *fields.p_mut(i, j) =
                (1.0 - self.omega) * p_old[(i, j)] + coeff * (disc.sor_helper(&p_old, i, j) - fields.rs(i, j));
        }

        residual_sum_squares(fields, grid)
    }

    fn name(&self) -> &'static str {
        "weighted jacobi"
    }
}
