//! Iteration driver around a pressure solver.
//!
//! A [`PressureContext`] owns one solver and the boundary list of its grid
//! and runs the pressure loop until the RMS residual falls below the
//! tolerance. A [`Subdomain`] bundles a context with the grid and fields it
//! works on so several can be iterated side by side.

pub mod pressure_context;
pub use pressure_context::{PressureContext, Subdomain};
