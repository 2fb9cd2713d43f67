//! Richardson iteration: an explicit step along the residual,
//! `p = p_old + ω (rs − laplacian(p_old))`.
//!
//! With this sign convention the Laplacian is negative definite, so the
//! iteration only contracts for `−h²/4 < ω < 0` (`dx == dy == h`).

use crate::boundary::Boundary;
use crate::core::Discretization;
use crate::error::ConfigWarning;
use crate::fields::FieldSet;
use crate::grid::Grid;
use crate::solver::{PressureSolver, residual_sum_squares};
use std::fmt;
use tracing::warn;

#[derive(Clone, Copy, Debug)]
pub struct Richardson {
    omega: f64,
    warning: Option<ConfigWarning>,
}

impl Richardson {
    /// A zero relaxation factor never moves the field; it is replaced by
    /// `1.0` and the correction is recorded in [`warning`](Self::warning).
    pub fn new(omega: f64) -> Self {
        if omega == 0.0 {
            let warning = ConfigWarning::ZeroRichardsonOmega { corrected_to: 1.0 };
            warn!(%warning, "invalid omega for the richardson scheme");
            return Self { omega: 1.0, warning: Some(warning) };
        }
        Self { omega, warning: None }
    }

    pub fn omega(&self) -> f64 {
        self.omega
    }

    /// Correction applied at construction, if any.
    pub fn warning(&self) -> Option<ConfigWarning> {
        self.warning
    }
}

impl fmt::Display for Richardson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Richardson(omega={})", self.omega)
    }
}

impl PressureSolver for Richardson {
    fn solve(&mut self, fields: &mut FieldSet, grid: &Grid, _boundaries: &[Box<dyn Boundary>]) -> f64 {
        let disc = Discretization::for_grid(grid);

        let p_old = fields.p_matrix().clone();
        for (i, j) in grid.interior_fluid() {
            *fields.p_mut(i, j) = p_old[(i, j)] + self.omega * (fields.rs(i, j) - disc.laplacian(&p_old, i, j));
        }

        residual_sum_squares(fields, grid)
    }

    fn name(&self) -> &'static str {
        "richardson"
    }
}
