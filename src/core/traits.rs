//! Seams between the Krylov solver and the discrete operator it works on.
//!
//! [`LaplaceOperator`](super::LaplaceOperator) implements both over the
//! interior fluid cells of a grid; ghost and obstacle entries never
//! contribute.

/// Applies the operator to `x`, writing into `y`. Entries of `y` outside
/// the operator's cell set are left as they were.
pub trait MatVec<V> {
    fn matvec(&self, x: &V, y: &mut V);
}

/// Inner product restricted to the operator's cell set.
pub trait InnerProduct<V> {
    type Scalar: Copy + PartialOrd + From<f64>;

    fn dot(&self, x: &V, y: &V) -> Self::Scalar;

    /// `sqrt(dot(x, x))`.
    fn norm(&self, x: &V) -> Self::Scalar;
}
