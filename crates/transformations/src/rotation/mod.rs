//! Rotation representations and the converters between them.
//!
//! Conventions
//! - Quaternions are `nalgebra::Quaternion<f64>` built as `Quaternion::new(w, x, y, z)`
//!   (scalar first). `q` and `-q` denote the same rotation; where a function has
//!   to pick one it returns the representative with `w >= 0`.
//! - Rotation matrices are right-handed and embedded in 4×4 homogeneous
//!   matrices with zero translation unless a point is given.
//! - Euler angles are `[f64; 3]` interpreted under an explicit [`AxisSequence`].
//!
//! Code cross-refs: `affine::Decomposition` (rotation block), `geom::rand`.

mod axis_angle;
mod euler;
mod quaternion;

pub use axis_angle::{axis_angle_from_matrix, matrix_from_axis_angle, AxisAngle};
pub use euler::{
    euler_from_matrix, euler_from_quaternion, matrix_from_euler, quaternion_from_euler,
    AxisSequence,
};
pub use quaternion::{
    is_same_quaternion, matrix_from_quaternion, quaternion_about_axis, quaternion_conjugate,
    quaternion_from_matrix, quaternion_imag, quaternion_inverse, quaternion_multiply,
    quaternion_real, quaternion_slerp,
};

pub(crate) use quaternion::rotation_from_nonzero;
