//! Ghost-bordered 2D field on top of Faer.
//!
//! A `DenseField` stores `(imax + 2) × (jmax + 2)` values: the `imax × jmax`
//! interior plus one ghost layer on every side. Indices `0` and `imax + 1`
//! (`jmax + 1`) are ghost slots; stencils are only evaluated for
//! `1 ≤ i ≤ imax`, `1 ≤ j ≤ jmax`.

use faer::Mat;
use std::ops::{Index, IndexMut};

#[derive(Clone, Debug)]
pub struct DenseField {
    data: Mat<f64>,
}

impl DenseField {
    /// Zero field with `imax × jmax` interior cells.
    pub fn zeros(imax: usize, jmax: usize) -> Self {
        Self { data: Mat::zeros(imax + 2, jmax + 2) }
    }

    /// Constant field, ghost layer included.
    pub fn filled(imax: usize, jmax: usize, value: f64) -> Self {
        Self::from_fn(imax, jmax, |_, _| value)
    }

    /// Build from `f(i, j)` over every index, ghost layer included.
    pub fn from_fn<F>(imax: usize, jmax: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        Self { data: Mat::from_fn(imax + 2, jmax + 2, |i, j| f(i, j)) }
    }

    /// Number of interior cells in x.
    pub fn imax(&self) -> usize {
        self.data.nrows() - 2
    }

    /// Number of interior cells in y.
    pub fn jmax(&self) -> usize {
        self.data.ncols() - 2
    }

    /// Number of cells in x including the ghost layer.
    pub fn imaxb(&self) -> usize {
        self.data.nrows()
    }

    /// Number of cells in y including the ghost layer.
    pub fn jmaxb(&self) -> usize {
        self.data.ncols()
    }

    pub fn fill(&mut self, value: f64) {
        for j in 0..self.jmaxb() {
            for i in 0..self.imaxb() {
                self.data[(i, j)] = value;
            }
        }
    }

    /// Overwrite every entry with `other`'s. Shapes must match.
    pub fn copy_from(&mut self, other: &DenseField) {
        assert_eq!(self.imaxb(), other.imaxb());
        assert_eq!(self.jmaxb(), other.jmaxb());
        for j in 0..self.jmaxb() {
            for i in 0..self.imaxb() {
                self.data[(i, j)] = other.data[(i, j)];
            }
        }
    }

    /// Borrow the backing Faer matrix.
    pub fn as_mat(&self) -> &Mat<f64> {
        &self.data
    }

    /// Largest absolute difference to `other` over the interior.
    pub fn max_interior_diff(&self, other: &DenseField) -> f64 {
        assert_eq!(self.imax(), other.imax());
        assert_eq!(self.jmax(), other.jmax());
        let mut diff = 0.0_f64;
        for j in 1..=self.jmax() {
            for i in 1..=self.imax() {
                diff = diff.max((self[(i, j)] - other[(i, j)]).abs());
            }
        }
        diff
    }
}

impl Index<(usize, usize)> for DenseField {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[(i, j)]
    }
}

impl IndexMut<(usize, usize)> for DenseField {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[(i, j)]
    }
}

impl From<Mat<f64>> for DenseField {
    /// Wrap a matrix that already carries its ghost layer.
    fn from(data: Mat<f64>) -> Self {
        assert!(data.nrows() >= 2 && data.ncols() >= 2, "field needs a ghost layer");
        Self { data }
    }
}
