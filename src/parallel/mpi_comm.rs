//! MPI-based communicator for distributed subdomains.
//!
//! Only compiled with the `mpi` feature. The `Universe` is kept alive for the
//! lifetime of the communicator; dropping it finalizes MPI.
//!
//! ```no_run
//! # #[cfg(feature = "mpi")]
//! # fn main() -> Result<(), presto::PError> {
//! use presto::parallel::{Comm, MpiComm};
//! let comm = MpiComm::new()?;
//! println!("Rank: {} / {}", comm.rank(), comm.size());
//! comm.barrier();
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "mpi"))]
//! # fn main() {}
//! ```

use crate::error::PError;
use mpi::collective::SystemOperation;
use mpi::environment::Universe;
use mpi::topology::SimpleCommunicator;
use mpi::traits::*;

/// MPI world communicator with cached rank and size.
pub struct MpiComm {
    world: SimpleCommunicator,
    rank: usize,
    size: usize,
    _universe: Universe,
}

impl MpiComm {
    /// Initializes MPI. Fails if MPI was already initialized in this process.
    pub fn new() -> Result<Self, PError> {
        let universe = mpi::initialize().ok_or(PError::Unsupported("MPI is already initialized"))?;
        let world = universe.world();
        let rank = world.rank() as usize;
        let size = world.size() as usize;
        Ok(MpiComm { world, rank, size, _universe: universe })
    }
}

impl super::Comm for MpiComm {
    fn rank(&self) -> usize {
        self.rank
    }
    fn size(&self) -> usize {
        self.size
    }
    fn barrier(&self) {
        self.world.barrier();
    }
    fn all_reduce(&self, x: f64) -> f64 {
        let mut y = x;
        self.world.all_reduce_into(&x, &mut y, SystemOperation::sum());
        y
    }
}
