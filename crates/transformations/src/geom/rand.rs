//! Random vectors, quaternions, and rotations.
//!
//! Every sampler takes the random source explicitly; seed a `StdRng` for
//! reproducible draws.

use nalgebra::{DVector, Matrix4, Quaternion};
use rand::Rng;
use std::f64::consts::TAU;

use crate::rotation::rotation_from_nonzero;

/// Vector of `n` values drawn uniformly from `[0, 1)`.
pub fn random_vector<R: Rng + ?Sized>(n: usize, rng: &mut R) -> DVector<f64> {
    DVector::from_fn(n, |_, _| rng.gen::<f64>())
}

/// Shoemake's subgroup algorithm: maps three independent `[0, 1]` variates to
/// a unit quaternion. Uniform inputs give a rotation uniform over SO(3).
pub fn quaternion_from_uniform(u: [f64; 3]) -> Quaternion<f64> {
    let r1 = (1.0 - u[0]).sqrt();
    let r2 = u[0].sqrt();
    let t1 = TAU * u[1];
    let t2 = TAU * u[2];
    Quaternion::new(t2.cos() * r2, t1.sin() * r1, t1.cos() * r1, t2.sin() * r2)
}

/// Unit quaternion drawn uniformly over the rotation group.
pub fn random_quaternion<R: Rng + ?Sized>(rng: &mut R) -> Quaternion<f64> {
    quaternion_from_uniform([rng.gen(), rng.gen(), rng.gen()])
}

/// Homogeneous rotation matrix drawn uniformly over SO(3).
pub fn random_rotation_matrix<R: Rng + ?Sized>(rng: &mut R) -> Matrix4<f64> {
    let q = random_quaternion(rng);
    // |q|² = (1 - u) + u, bounded away from zero
    rotation_from_nonzero(&q, q.coords.norm_squared())
}
