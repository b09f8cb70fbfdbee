//! Primitive algebra: vector norms and products, inversion, composition.
//!
//! Everything else in the crate builds on these helpers. Static nalgebra types
//! are used where the dimension is fixed by construction; slices and
//! `DMatrix` where it is a runtime property and must be validated.

mod matrix;
mod vector;

pub use matrix::{
    concatenate_matrices, inverse_matrix, inverse_matrix4, inverse_matrix_with, is_same_transform,
    matrix_product,
};
pub use vector::{angle_between_vectors, cross, dot, unit_vector, vector_norm};

pub(crate) use matrix::{all_close, check_nonsingular};
pub(crate) use vector::unit3;

#[cfg(test)]
mod tests;
