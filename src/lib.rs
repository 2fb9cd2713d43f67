//! presto: pressure Poisson solvers for staggered-grid incompressible flow.
//!
//! The crate solves `laplacian(p) = rs` on the fluid cells of a
//! ghost-bordered 2D grid with a family of interchangeable iterative solvers
//! (Jacobi, weighted Jacobi, SOR, Gauss-Seidel, Richardson, Conjugate
//! Gradient and a geometric multigrid V-cycle), plus the boundary conditions
//! and the iteration driver that surround them in a flow solver.

pub mod parallel;

pub mod boundary;
pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod fields;
pub mod grid;
pub mod matrix;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use boundary::*;
pub use config::*;
pub use context::*;
pub use self::core::*;
pub use error::*;
pub use fields::FieldSet;
pub use grid::*;
pub use matrix::*;
pub use solver::*;
pub use utils::*;

// Re-export SolveStats at the crate root for convenience
pub use utils::convergence::SolveStats;
