//! Matrix module: ghost-bordered dense fields.

pub mod field;
pub use field::DenseField;
