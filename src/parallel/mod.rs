//! Reductions across subdomains.
//!
//! Every solver returns a *local* residual sum; the iteration driver turns
//! it into a global one through a [`Comm`]. Within one process the
//! reduction is the identity; with MPI it is a sum over all ranks.

pub trait Comm {
    fn rank(&self) -> usize;
    fn size(&self) -> usize;
    fn barrier(&self);
    /// Sum of `x` over all participants.
    fn all_reduce(&self, x: f64) -> f64;
}

/// Single process, single subdomain.
#[derive(Clone, Copy, Debug, Default)]
pub struct SerialComm;

impl Comm for SerialComm {
    fn rank(&self) -> usize {
        0
    }
    fn size(&self) -> usize {
        1
    }
    fn barrier(&self) {}
    fn all_reduce(&self, x: f64) -> f64 {
        x
    }
}

#[cfg(feature = "mpi")]
pub mod mpi_comm;
#[cfg(feature = "mpi")]
pub use mpi_comm::MpiComm;

#[cfg(feature = "rayon")]
pub mod rayon_comm;
#[cfg(feature = "rayon")]
pub use rayon_comm::{RayonComm, solve_subdomains};
