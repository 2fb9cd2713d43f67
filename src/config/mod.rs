//! Solver selection and parameters.

pub mod options;
pub use options::{MultigridOptions, SolverKind, SolverOptions};
