//! Pressure Poisson iteration driver.
//!
//! Each iteration applies the boundary conditions, performs one solver pass
//! and reduces the local residual sum and the fluid-cell count across the
//! communicator:
//!
//! ```text
//! res = sqrt( all_reduce(Σ r²) / all_reduce(#fluid) )
//! ```
//!
//! The loop stops when `res <= tol` or after `max_iters` passes. The
//! boundaries are applied once more before returning so the ghost cells
//! match the final interior.

use crate::boundary::{BoundaryList, apply_all, boundaries_for};
use crate::config::SolverOptions;
use crate::error::PError;
use crate::fields::FieldSet;
use crate::grid::Grid;
use crate::parallel::Comm;
use crate::solver::{PressureSolver, residual_sum_squares};
use crate::utils::convergence::{Convergence, SolveStats};
use tracing::{debug, info, warn};

/// Solver, boundaries and stopping criteria of one (sub)domain.
pub struct PressureContext {
    solver: Box<dyn PressureSolver>,
    boundaries: BoundaryList,
    pub conv: Convergence<f64>,
}

impl PressureContext {
    pub fn new(solver: Box<dyn PressureSolver>, boundaries: BoundaryList, tol: f64, max_iters: usize) -> Self {
        Self { solver, boundaries, conv: Convergence::new(tol, max_iters) }
    }

    /// Build the solver from `options` and the boundary list from its
    /// boundary values.
    pub fn from_options(options: &SolverOptions, grid: &Grid, tol: f64, max_iters: usize) -> Result<Self, PError> {
        let solver = options.build(grid)?;
        let boundaries = boundaries_for(grid, &options.boundary_values);
        Ok(Self::new(solver, boundaries, tol, max_iters))
    }

    pub fn solver_name(&self) -> &'static str {
        self.solver.name()
    }

    pub fn boundaries(&self) -> &BoundaryList {
        &self.boundaries
    }

    /// Apply the boundaries, run one solver pass and return the local
    /// residual sum of squares.
    pub fn iterate(&mut self, fields: &mut FieldSet, grid: &Grid) -> f64 {
        apply_all(&self.boundaries, fields);
        self.solver.solve(fields, grid, &self.boundaries)
    }

    /// Iterate until convergence or until the iteration budget is spent.
    ///
    /// Returns `Ok` with `converged == false` when the budget runs out and
    /// `Err(NonFiniteResidual)` as soon as the residual stops being finite.
    /// A communicator without any fluid cells reports a zero residual.
    pub fn solve_context<C: Comm>(
        &mut self,
        fields: &mut FieldSet,
        grid: &Grid,
        comm: &C,
    ) -> Result<SolveStats<f64>, PError> {
        let fluid = comm.all_reduce(grid.interior_fluid_count() as f64);
        let rms = |sum: f64| if fluid > 0.0 { (sum / fluid).sqrt() } else { 0.0 };

        if self.conv.max_iters == 0 {
            apply_all(&self.boundaries, fields);
            let res = rms(comm.all_reduce(residual_sum_squares(fields, grid)));
            let (_, stats) = self.conv.check(res, 0);
            return Ok(stats);
        }

        let mut it = 0;
        loop {
            let local = self.iterate(fields, grid);
            it += 1;
            let res = rms(comm.all_reduce(local));
            debug!(solver = self.solver.name(), it, res, "pressure iteration");

            if !res.is_finite() {
                warn!(solver = self.solver.name(), it, "pressure residual is not finite");
                return Err(PError::NonFiniteResidual { iteration: it });
            }

            let (stop, stats) = self.conv.check(res, it);
            if stop {
                apply_all(&self.boundaries, fields);
                if stats.converged {
                    info!(solver = self.solver.name(), iterations = it, res, "pressure converged");
                } else {
                    warn!(
                        solver = self.solver.name(),
                        iterations = it,
                        res,
                        tol = self.conv.tol,
                        "pressure did not converge"
                    );
                }
                return Ok(stats);
            }
        }
    }
}

/// A context together with the grid and fields it owns.
pub struct Subdomain {
    pub grid: Grid,
    pub fields: FieldSet,
    pub context: PressureContext,
}

impl Subdomain {
    pub fn new(grid: Grid, fields: FieldSet, context: PressureContext) -> Self {
        Self { grid, fields, context }
    }

    /// One iteration of the owned context; see [`PressureContext::iterate`].
    pub fn iterate(&mut self) -> f64 {
        self.context.iterate(&mut self.fields, &self.grid)
    }
}
