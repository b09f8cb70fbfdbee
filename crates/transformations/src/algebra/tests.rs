use super::*;
use crate::error::TransformError;
use nalgebra::{DMatrix, Matrix4, Vector3};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[test]
fn unit_vector_normalizes_and_rejects_zero() {
    let u = unit_vector(&[3.0, 0.0, 4.0]).unwrap();
    assert!((u.norm() - 1.0).abs() < 1e-12);
    assert!((u[0] - 0.6).abs() < 1e-12 && (u[2] - 0.8).abs() < 1e-12);
    assert_eq!(unit_vector(&[0.0, 0.0, 0.0]), Err(TransformError::ZeroVector));
    assert!(matches!(
        unit_vector(&[f64::NAN, 1.0]),
        Err(TransformError::NonFinite { .. })
    ));
}

#[test]
fn products_check_lengths() {
    assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap(), 32.0);
    assert!(matches!(
        dot(&[1.0, 2.0], &[1.0, 2.0, 3.0]),
        Err(TransformError::DimensionMismatch { .. })
    ));
    let c = cross(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]).unwrap();
    assert_eq!(c, Vector3::new(0.0, 0.0, 1.0));
    assert!(matches!(
        cross(&[1.0, 0.0], &[0.0, 1.0]),
        Err(TransformError::DimensionMismatch { .. })
    ));
}

#[test]
fn angle_between_directed_and_undirected() {
    let a = [1.0, -2.0, 3.0];
    let b = [-1.0, 2.0, -3.0];
    let directed = angle_between_vectors(&a, &b, true).unwrap();
    assert!((directed - std::f64::consts::PI).abs() < 1e-7);
    let undirected = angle_between_vectors(&a, &b, false).unwrap();
    assert!(undirected.abs() < 1e-7);
    let right = angle_between_vectors(&[1.0, 0.0], &[0.0, 3.0], true).unwrap();
    assert!((right - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn inverse_roundtrip_randomized_seeded() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in 2..=5 {
        let m = DMatrix::from_fn(n, n, |i, j| {
            rng.gen_range(-1.0..1.0) + if i == j { 4.0 } else { 0.0 }
        });
        let inv = inverse_matrix(&m).unwrap();
        let id = &m * &inv;
        assert!((id - DMatrix::identity(n, n)).amax() < 1e-12);
    }
}

#[test]
fn inverse_rejects_singular_and_non_square() {
    let ones = DMatrix::from_element(4, 4, 1.0);
    assert!(matches!(
        inverse_matrix(&ones),
        Err(TransformError::SingularMatrix { .. })
    ));
    assert!(matches!(
        inverse_matrix(&DMatrix::zeros(3, 3)),
        Err(TransformError::SingularMatrix { .. })
    ));
    assert!(matches!(
        inverse_matrix(&DMatrix::zeros(3, 4)),
        Err(TransformError::DimensionMismatch { .. })
    ));
}

#[test]
fn singular_tolerance_scales_with_units() {
    // A well-conditioned matrix expressed in tiny units is still invertible.
    let m = Matrix4::from_diagonal(&nalgebra::Vector4::new(1e-5, 2e-5, 3e-5, 1e-5));
    assert!(inverse_matrix4(&m).is_ok());
    let mut nearly = Matrix4::identity();
    nearly[(2, 2)] = 1e-14;
    assert!(matches!(
        inverse_matrix4(&nearly),
        Err(TransformError::SingularMatrix { .. })
    ));
}

#[test]
fn matrix_product_checks_shapes() {
    let a = DMatrix::from_element(2, 3, 1.0);
    let b = DMatrix::from_element(3, 2, 2.0);
    let p = matrix_product(&a, &b).unwrap();
    assert_eq!(p, DMatrix::from_element(2, 2, 6.0));
    assert!(matrix_product(&a, &a).is_err());
}

#[test]
fn concatenation_is_associative_not_commutative() {
    let t = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));
    let r = Matrix4::new_rotation(Vector3::new(0.0, 0.0, 0.7));
    let s = Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 1.0, 0.5));
    let left = concatenate_matrices(&[concatenate_matrices(&[t, r]), s]);
    let right = concatenate_matrices(&[t, concatenate_matrices(&[r, s])]);
    assert!(is_same_transform(&left, &right));
    assert!(!is_same_transform(&(t * r), &(r * t)));
    assert_eq!(concatenate_matrices(&[]), Matrix4::identity());
}

#[test]
fn same_transform_ignores_homogeneous_scale() {
    let t = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));
    assert!(is_same_transform(&t, &(t * 2.5)));
    assert!(!is_same_transform(&t, &Matrix4::zeros()));
}
