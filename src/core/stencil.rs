//! 5-point finite-difference stencils on a uniform staggered grid.
//!
//! This is the only place the discrete Laplacian is written down; every
//! solver, the multigrid residual included, evaluates it through
//! [`Discretization::laplacian`].

use crate::grid::Grid;
use crate::matrix::DenseField;

/// Grid spacing the stencils are evaluated with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Discretization {
    dx: f64,
    dy: f64,
}

impl Discretization {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.dx(), grid.dy())
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Discrete Laplacian of `p` at interior index `(i, j)`.
    #[inline]
    pub fn laplacian(&self, p: &DenseField, i: usize, j: usize) -> f64 {
        let (idx2, idy2) = self.inverse_squares();
        (p[(i + 1, j)] - 2.0 * p[(i, j)] + p[(i - 1, j)]) * idx2
            + (p[(i, j + 1)] - 2.0 * p[(i, j)] + p[(i, j - 1)]) * idy2
    }

    /// Spacing-weighted sum of the four neighbours of `(i, j)`: the
    /// off-diagonal part of [`laplacian`](Self::laplacian).
    #[inline]
    pub fn sor_helper(&self, p: &DenseField, i: usize, j: usize) -> f64 {
        let (idx2, idy2) = self.inverse_squares();
        (p[(i + 1, j)] + p[(i - 1, j)]) * idx2 + (p[(i, j + 1)] + p[(i, j - 1)]) * idy2
    }

    /// `1 / (2 (1/dx² + 1/dy²))`, the inverse of the stencil's diagonal
    /// magnitude. Equals `h² / 4` when `dx == dy == h`.
    #[inline]
    pub fn diagonal_coeff(&self) -> f64 {
        let (idx2, idy2) = self.inverse_squares();
        1.0 / (2.0 * (idx2 + idy2))
    }

    #[inline]
    fn inverse_squares(&self) -> (f64, f64) {
        (1.0 / (self.dx * self.dx), 1.0 / (self.dy * self.dy))
    }
}
