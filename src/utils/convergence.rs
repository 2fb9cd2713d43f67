//! Convergence tracking & tolerance checks for the pressure iteration.

/// Stopping criteria & stats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Convergence<T> {
    /// Absolute bound on the RMS residual.
    pub tol: T,
    pub max_iters: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolveStats<T> {
    pub iterations: usize,
    pub final_residual: T,
    pub converged: bool,
}

impl<T: Copy + num_traits::Float> Convergence<T> {
    pub fn new(tol: T, max_iters: usize) -> Self {
        Self { tol, max_iters }
    }

    /// Returns (should_stop, stats) given the current residual `res` after
    /// `i` iterations. The test is absolute: pressure residuals are already
    /// normalised by the fluid-cell count.
    pub fn check(&self, res: T, i: usize) -> (bool, SolveStats<T>) {
        let converged = res <= self.tol;
        let stop = converged || i >= self.max_iters;
        (
            stop,
            SolveStats {
                iterations: i,
                final_residual: res,
                converged,
            },
        )
    }
}
