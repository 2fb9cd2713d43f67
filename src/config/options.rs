//! Command-line or API options for the pressure solvers.
//!
//! [`SolverOptions`] names one [`SolverKind`] together with the relaxation
//! factor, the multigrid parameters and the boundary values the multigrid
//! levels are built with. Parameters that a kind does not use are ignored.

use crate::boundary::BoundaryValues;
use crate::error::PError;
use crate::grid::Grid;
use crate::solver::transfer::RestrictionStencil;
use crate::solver::{
    ConjugateGradient, GaussSeidel, Jacobi, MultiGridVCycle, PressureSolver, Richardson, Sor, WeightedJacobi,
};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Available pressure solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverKind {
    Jacobi,
    /// Jacobi blended with the previous iterate by `omega`.
    WeightedJacobi,
    /// Successive over-relaxation with `omega`.
    Sor,
    GaussSeidel,
    /// Explicit residual step of length `omega`.
    Richardson,
    ConjugateGradient,
    MultiGridVCycle,
}

impl FromStr for SolverKind {
    type Err = PError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jacobi" => Ok(SolverKind::Jacobi),
            "wjacobi" | "weighted_jacobi" => Ok(SolverKind::WeightedJacobi),
            "sor" => Ok(SolverKind::Sor),
            "gs" | "gauss_seidel" => Ok(SolverKind::GaussSeidel),
            "richardson" => Ok(SolverKind::Richardson),
            "cg" => Ok(SolverKind::ConjugateGradient),
            "mg" | "multigrid" => Ok(SolverKind::MultiGridVCycle),
            _ => Err(PError::UnknownSolver(s.to_string())),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverKind::Jacobi => "jacobi",
            SolverKind::WeightedJacobi => "weighted_jacobi",
            SolverKind::Sor => "sor",
            SolverKind::GaussSeidel => "gauss_seidel",
            SolverKind::Richardson => "richardson",
            SolverKind::ConjugateGradient => "cg",
            SolverKind::MultiGridVCycle => "multigrid",
        };
        f.pad(name)
    }
}

/// Multigrid hierarchy and cycle parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultigridOptions {
    /// Number of levels, finest included.
    pub levels: usize,
    /// Smoothing sweeps before restriction.
    pub pre_smooth: usize,
    /// Smoothing sweeps after the coarse correction.
    pub post_smooth: usize,
    /// Damping of the Jacobi smoother. Undamped Jacobi leaves the
    /// checkerboard error mode in place, so keep this below 1.
    pub smoother_omega: f64,
    pub restriction: RestrictionStencil,
}

impl Default for MultigridOptions {
    fn default() -> Self {
        Self {
            levels: 3,
            pre_smooth: 2,
            post_smooth: 2,
            smoother_omega: 0.8,
            restriction: RestrictionStencil::FullWeighting,
        }
    }
}

/// Solver type & parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOptions {
    pub kind: SolverKind,

    /// Relaxation factor ω for weighted Jacobi, SOR and Richardson.
    pub omega: f64,

    pub multigrid: MultigridOptions,

    /// Values for the boundary lists of the multigrid levels.
    pub boundary_values: BoundaryValues,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            kind: SolverKind::Sor,
            omega: 1.7,
            multigrid: MultigridOptions::default(),
            boundary_values: BoundaryValues::default(),
        }
    }
}

impl SolverOptions {
    pub fn new(kind: SolverKind) -> Self {
        Self { kind, ..Default::default() }
    }

    pub fn with_omega(mut self, omega: f64) -> Self {
        self.omega = omega;
        self
    }

    pub fn with_multigrid(mut self, multigrid: MultigridOptions) -> Self {
        self.multigrid = multigrid;
        self
    }

    pub fn with_boundary_values(mut self, values: BoundaryValues) -> Self {
        self.boundary_values = values;
        self
    }

    /// Instantiate the configured solver for `grid`.
    pub fn build(&self, grid: &Grid) -> Result<Box<dyn PressureSolver>, PError> {
        grid.domain().validate()?;
        debug!(kind = %self.kind, omega = self.omega, "building pressure solver");

        let solver: Box<dyn PressureSolver> = match self.kind {
            SolverKind::Jacobi => Box::new(Jacobi::new()),
            SolverKind::WeightedJacobi => Box::new(WeightedJacobi::new(self.omega)),
            SolverKind::Sor => Box::new(Sor::new(self.omega)),
            SolverKind::GaussSeidel => Box::new(GaussSeidel::new()),
            SolverKind::Richardson => Box::new(Richardson::new(self.omega)),
            SolverKind::ConjugateGradient => {
                if grid.interior_fluid_count() == 0 {
                    return Err(PError::Unsupported("conjugate gradient needs at least one interior fluid cell"));
                }
                Box::new(ConjugateGradient::with_shape(grid.imax(), grid.jmax()))
            }
            SolverKind::MultiGridVCycle => {
                Box::new(MultiGridVCycle::from_finest(grid, &self.multigrid, &self.boundary_values)?)
            }
        };
        Ok(solver)
    }
}
