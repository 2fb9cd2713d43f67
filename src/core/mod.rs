//! Core numerical building blocks: the operator traits, the 5-point stencil
//! and the grid-restricted Laplace operator built on it.

pub mod laplace;
pub mod stencil;
pub mod traits;

pub use laplace::LaplaceOperator;
pub use stencil::Discretization;
