use thiserror::Error;

// Unified error type for presto. Solvers never return it from `solve`;
// it covers construction-time validation and the pressure iteration driver.

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PError {
    #[error("multigrid needs at least one level")]
    InvalidLevels,
    #[error("level {level} grid ({imax}x{jmax}) cannot be coarsened by a factor of 2")]
    UncoarsenableGrid { level: usize, imax: usize, jmax: usize },
    #[error("hierarchy has {supplied} grids but {requested} levels were requested")]
    HierarchyTooShallow { requested: usize, supplied: usize },
    #[error("grid spacing must be positive and finite (dx = {dx}, dy = {dy})")]
    InvalidSpacing { dx: f64, dy: f64 },
    #[error("unknown pressure solver: {0}")]
    UnknownSolver(String),
    #[error("pressure residual became non-finite at iteration {iteration}")]
    NonFiniteResidual { iteration: usize },
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// Non-fatal configuration corrections made by a solver constructor.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigWarning {
    #[error("relaxation factor 0 never updates the field; using {corrected_to} instead")]
    ZeroRichardsonOmega { corrected_to: f64 },
}
