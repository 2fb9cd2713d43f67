//! Convergence bookkeeping shared by the iteration driver.

pub mod convergence;
pub use convergence::{Convergence, SolveStats};
