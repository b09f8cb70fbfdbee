//! Homogeneous 4×4 matrices: elementary builders, compose/decompose, and
//! point-set registration.
//!
//! Composition order is fixed: `Perspective · Translate · Rotate · Shear · Scale`.
//! Decomposition undoes it in reverse: perspective row first, then the
//! translation column, then Gram–Schmidt over the columns of the linear block
//! (X, then Y, then Z) to split rotation, shear, and scale.

mod decompose;
mod elementary;
mod register;

pub use decompose::{compose_matrix, decompose_matrix, decompose_matrix_with, Decomposition};
pub use elementary::{
    projection_matrix, reflection_from_matrix, reflection_matrix, scale_matrix,
    translation_from_matrix, translation_matrix, Projection,
};
pub use register::superimposition_matrix;

#[cfg(test)]
mod tests;
