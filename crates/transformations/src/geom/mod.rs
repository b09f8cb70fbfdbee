//! Derived geometry: rigidity checks, planar and spherical builders, point
//! transforms, and random rotations.
//!
//! These are the entry points mesh/scene code calls directly; they delegate
//! to `rotation` and `affine` and hold no state between calls.

mod planar;
mod points;
pub mod rand;
mod rigid;

pub use planar::{planar_matrix, planar_matrix_to_3d, spherical_matrix};
pub use points::{transform_around, transform_points, Homogeneous};
pub use self::rand::{
    quaternion_from_uniform, random_quaternion, random_rotation_matrix, random_vector,
};
pub use rigid::{fix_rigid, flips_winding, is_rigid, scale_and_translate};
