//! Homogeneous transformation matrices and rotation representations.
//!
//! Layout
//! - `algebra`: norms, products, inversion, and matrix comparison.
//! - `rotation`: Euler angles, quaternions, and axis-angle, with converters.
//! - `affine`: elementary 4×4 builders, compose/decompose, registration.
//! - `geom`: rigidity checks, planar/spherical builders, point transforms, and
//!   random rotations.
//!
//! Conventions
//! - Column vectors; a matrix applies to a point as `M · [x, y, z, 1]ᵀ`.
//! - Point sets are `n × d` matrices, one point per row.
//! - Every operation is a pure function of its inputs. Fallible operations return
//!   [`Result`] with a typed [`TransformError`]; nothing panics on bad input.

pub mod affine;
pub mod algebra;
pub mod api;
pub mod cfg;
pub mod error;
pub mod geom;
pub mod rotation;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::TolCfg;
pub use error::{Result, TransformError};
pub use nalgebra::{Matrix3 as Mat3, Matrix4 as Mat4, Quaternion, Vector3 as Vec3};
pub use rotation::AxisSequence;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::affine::{compose_matrix, decompose_matrix, Decomposition};
    pub use crate::geom::{is_rigid, random_rotation_matrix, transform_around, transform_points};
    pub use crate::rotation::{
        euler_from_matrix, matrix_from_euler, matrix_from_quaternion, quaternion_from_matrix,
        AxisSequence,
    };
    pub use crate::{Result, TolCfg, TransformError};
    pub use nalgebra::{Matrix3 as Mat3, Matrix4 as Mat4, Quaternion, Vector3 as Vec3};
}
