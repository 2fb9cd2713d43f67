// rayon-based shared-memory parallelism

use crate::context::Subdomain;
use rayon::prelude::*;
use tracing::trace;

/// Communicator for subdomains owned by one process.
///
/// All subdomains live in the same address space, so reductions are summed
/// by [`solve_subdomains`] before they reach the communicator and
/// `all_reduce` is the identity.
#[derive(Clone, Copy, Debug)]
pub struct RayonComm {
    threads: usize,
}

impl RayonComm {
    /// Sizes the global rayon pool to the number of logical CPUs, unless a
    /// pool has already been built.
    pub fn new() -> Self {
        let threads = num_cpus::get();
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .ok();
        RayonComm { threads: rayon::current_num_threads() }
    }

    /// Worker threads available to [`solve_subdomains`].
    pub fn threads(&self) -> usize {
        self.threads
    }
}

impl Default for RayonComm {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Comm for RayonComm {
    fn rank(&self) -> usize {
        0
    }
    fn size(&self) -> usize {
        1
    }
    fn barrier(&self) {
        rayon::scope(|_| {});
    }
    fn all_reduce(&self, x: f64) -> f64 {
        x
    }
}

/// One pressure iteration on every subdomain, in parallel.
///
/// Each subdomain owns its grid, fields and solver; nothing is shared
/// between workers. Returns the sum of the local residuals.
pub fn solve_subdomains(subdomains: &mut [Subdomain]) -> f64 {
    let total = subdomains
        .par_iter_mut()
        .map(|s| s.iterate())
        .sum::<f64>();
    trace!(subdomains = subdomains.len(), total, "subdomain sweep");
    total
}
