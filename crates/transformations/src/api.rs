//! Flat re-export of every public operation.
//!
//! Callers that do not care about the module split can `use transformations::api::*`.
//! The grouping below follows the module layout.

// Vector and matrix algebra
pub use crate::algebra::{
    angle_between_vectors, concatenate_matrices, cross, dot, inverse_matrix, inverse_matrix4,
    inverse_matrix_with, is_same_transform, matrix_product, unit_vector, vector_norm,
};
// Rotations
pub use crate::rotation::{
    axis_angle_from_matrix, euler_from_matrix, euler_from_quaternion, is_same_quaternion,
    matrix_from_axis_angle, matrix_from_euler, matrix_from_quaternion, quaternion_about_axis,
    quaternion_conjugate, quaternion_from_euler, quaternion_from_matrix, quaternion_imag,
    quaternion_inverse, quaternion_multiply, quaternion_real, quaternion_slerp, AxisAngle,
    AxisSequence,
};
// Elementary transforms and composition
pub use crate::affine::{
    compose_matrix, decompose_matrix, decompose_matrix_with, projection_matrix,
    reflection_from_matrix, reflection_matrix, scale_matrix, superimposition_matrix,
    translation_from_matrix, translation_matrix, Decomposition, Projection,
};
// Geometry helpers
pub use crate::geom::{
    fix_rigid, flips_winding, is_rigid, planar_matrix, planar_matrix_to_3d,
    quaternion_from_uniform, random_quaternion, random_rotation_matrix, random_vector,
    scale_and_translate, spherical_matrix, transform_around, transform_points, Homogeneous,
};
// Errors and tolerances
pub use crate::cfg::{TolCfg, EPS, RIGID_TOL, SINGULAR_RTOL};
pub use crate::error::{Result, TransformError};
