//! Pressure and right-hand-side storage for one grid level.

use crate::grid::Grid;
use crate::matrix::DenseField;

/// Pressure `p` and Poisson right-hand side `rs`, both ghost-bordered.
///
/// Solvers mutate `p` in place; `rs` is produced by the momentum step and
/// only read here.
#[derive(Clone, Debug)]
pub struct FieldSet {
    p: DenseField,
    rs: DenseField,
}

impl FieldSet {
    pub fn new(imax: usize, jmax: usize) -> Self {
        Self { p: DenseField::zeros(imax, jmax), rs: DenseField::zeros(imax, jmax) }
    }

    /// Zeroed fields shaped like `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.imax(), grid.jmax())
    }

    pub fn from_parts(p: DenseField, rs: DenseField) -> Self {
        assert_eq!((p.imax(), p.jmax()), (rs.imax(), rs.jmax()), "p and rs shapes differ");
        Self { p, rs }
    }

    #[inline]
    pub fn p(&self, i: usize, j: usize) -> f64 {
        self.p[(i, j)]
    }

    #[inline]
    pub fn p_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        &mut self.p[(i, j)]
    }

    #[inline]
    pub fn rs(&self, i: usize, j: usize) -> f64 {
        self.rs[(i, j)]
    }

    #[inline]
    pub fn rs_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        &mut self.rs[(i, j)]
    }

    pub fn p_matrix(&self) -> &DenseField {
        &self.p
    }

    pub fn p_matrix_mut(&mut self) -> &mut DenseField {
        &mut self.p
    }

    pub fn rs_matrix(&self) -> &DenseField {
        &self.rs
    }

    pub fn rs_matrix_mut(&mut self) -> &mut DenseField {
        &mut self.rs
    }

    /// Split borrow for in-place sweeps that read `rs` while writing `p`.
    pub fn split_mut(&mut self) -> (&mut DenseField, &DenseField) {
        (&mut self.p, &self.rs)
    }
}
