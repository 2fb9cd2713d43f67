//! Conjugate Gradient (unpreconditioned) per Saad §6.1, one step per call.
//!
//! The matrix is never formed: `A d` is the 5-point Laplacian of `d` on the
//! interior fluid cells (see [`LaplaceOperator`]). The residual and search
//! direction persist between calls, so one instance belongs to exactly one
//! grid and field shape.
//!
//! # Caller obligations
//! The grid must contain at least one interior fluid cell and the residual
//! must be non-trivial. `α = (r·r)/(d·Ad)` and `β = (r'·r')/(r·r)` are not
//! guarded; a degenerate system yields non-finite pressures that only the
//! caller's residual monitoring will notice.

use crate::boundary::Boundary;
use crate::core::LaplaceOperator;
use crate::core::traits::{InnerProduct, MatVec};
use crate::fields::FieldSet;
use crate::grid::Grid;
use crate::matrix::DenseField;
use crate::solver::{PressureSolver, residual_sum_squares};
use tracing::debug;

/// Calls between restarts. On the restart call the residual is recomputed
/// from the updated pressure and the next call starts a fresh direction.
pub const RESTART_INTERVAL: usize = 50;

#[derive(Clone, Debug)]
pub struct ConjugateGradient {
    d: DenseField,
    residual: DenseField,
    iter: usize,
    last_restart_drift: Option<f64>,
}

impl ConjugateGradient {
    /// State shaped like `fields`.
    pub fn new(fields: &FieldSet) -> Self {
        let p = fields.p_matrix();
        Self::with_shape(p.imax(), p.jmax())
    }

    pub fn with_shape(imax: usize, jmax: usize) -> Self {
        Self {
            d: DenseField::zeros(imax, jmax),
            residual: DenseField::zeros(imax, jmax),
            iter: 0,
            last_restart_drift: None,
        }
    }

    /// Calls since the last restart.
    pub fn iteration(&self) -> usize {
        self.iter
    }

    /// Largest difference between the incrementally updated and the freshly
    /// recomputed residual at the most recent restart.
    pub fn last_restart_drift(&self) -> Option<f64> {
        self.last_restart_drift
    }

    pub fn residual(&self) -> &DenseField {
        &self.residual
    }

    pub fn direction(&self) -> &DenseField {
        &self.d
    }
}

impl PressureSolver for ConjugateGradient {
    fn solve(&mut self, fields: &mut FieldSet, grid: &Grid, _boundaries: &[Box<dyn Boundary>]) -> f64 {
        let op = LaplaceOperator::new(grid);

        op.residual_into(fields, &mut self.residual);
        if self.iter == 0 {
            self.d.copy_from(&self.residual);
        }

        // q = A d
        let mut q = DenseField::zeros(self.d.imax(), self.d.jmax());
        op.matvec(&self.d, &mut q);

        let rr_old = op.dot(&self.residual, &self.residual);
        let alpha = rr_old / op.dot(&self.d, &q);

        {
            let p = fields.p_matrix_mut();
            for (i, j) in grid.interior_fluid() {
                p[(i, j)] += alpha * self.d[(i, j)];
                self.residual[(i, j)] -= alpha * q[(i, j)];
            }
        }

        let restart = self.iter + 1 == RESTART_INTERVAL;
        if restart {
            let incremental = self.residual.clone();
            op.residual_into(fields, &mut self.residual);
            let drift = grid
                .interior_fluid()
                .map(|(i, j)| (incremental[(i, j)] - self.residual[(i, j)]).abs())
                .fold(0.0_f64, f64::max);
            debug!(drift, "conjugate gradient restart");
            self.last_restart_drift = Some(drift);
        }

        let rr_new = op.dot(&self.residual, &self.residual);
        let beta = rr_new / rr_old;
        for (i, j) in grid.interior_fluid() {
            self.d[(i, j)] = self.residual[(i, j)] + beta * self.d[(i, j)];
        }

        self.iter = if restart { 0 } else { self.iter + 1 };

        residual_sum_squares(fields, grid)
    }

    fn name(&self) -> &'static str {
        "conjugate gradient"
    }
}
