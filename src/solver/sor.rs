//! In-place relaxation: later cells in the fluid order see already-updated
//! neighbours.

use crate::boundary::Boundary;
use crate::core::Discretization;
use crate::fields::FieldSet;
use crate::grid::Grid;
use crate::solver::{PressureSolver, residual_sum_squares};
use std::fmt;

/// Successive over-relaxation: `p = (1 − ω) p + ω coeff (helper(p) − rs)`.
#[derive(Clone, Copy, Debug)]
pub struct Sor {
    omega: f64,
}

impl Sor {
    pub fn new(omega: f64) -> Self {
        Self { omega }
    }

    pub fn omega(&self) -> f64 {
        self.omega
    }

    pub fn set_omega(&mut self, omega: f64) {
        self.omega = omega;
    }
}

impl fmt::Display for Sor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SOR(omega={})", self.omega)
    }
}

impl PressureSolver for Sor {
    fn solve(&mut self, fields: &mut FieldSet, grid: &Grid, _boundaries: &[Box<dyn Boundary>]) -> f64 {
        let disc = Discretization::for_grid(grid);
        // = omega * h^2 / 4 when dx == dy == h
        let coeff = self.omega * disc.diagonal_coeff();

        let (p, rs) = fields.split_mut();
        for (i, j) in grid.interior_fluid() {
            let relaxed = coeff * (disc.sor_helper(p, i, j) - rs[(i, j)]);
            p[(i, j)] = (1.0 - self.omega) * p[(i, j)] + relaxed;
        }

        residual_sum_squares(fields, grid)
    }

    fn name(&self) -> &'static str {
        "sor"
    }
}

/// Gauss-Seidel: the Jacobi formula applied in place.
#[derive(Clone, Copy, Debug, Default)]
pub struct GaussSeidel;

impl GaussSeidel {
    pub fn new() -> Self {
        Self
    }
}

impl PressureSolver for GaussSeidel {
    fn solve(&mut self, fields: &mut FieldSet, grid: &Grid, _boundaries: &[Box<dyn Boundary>]) -> f64 {
        let disc = Discretization::for_grid(grid);
        let coeff = disc.diagonal_coeff();

        let (p, rs) = fields.split_mut();
        for (i, j) in grid.interior_fluid() {
            p[(i, j)] = coeff * (disc.sor_helper(p, i, j) - rs[(i, j)]);
        }

        residual_sum_squares(fields, grid)
    }

    fn name(&self) -> &'static str {
        "gauss-seidel"
    }
}
