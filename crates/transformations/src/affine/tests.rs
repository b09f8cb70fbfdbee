use super::*;
use crate::algebra::is_same_transform;
use crate::cfg::TolCfg;
use crate::error::TransformError;
use crate::geom::{flips_winding, random_rotation_matrix};
use crate::rotation::AxisSequence;
use ::rand::{rngs::StdRng, Rng, SeedableRng};
use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};
use proptest::prelude::*;

fn apply(m: &Matrix4<f64>, p: &Vector3<f64>) -> Vector3<f64> {
    let h = m * p.push(1.0);
    h.xyz() / h.w
}

fn random_points(rng: &mut StdRng, n: usize) -> Vec<Vector3<f64>> {
    (0..n)
        .map(|_| Vector3::from_fn(|_, _| rng.gen::<f64>() * 10.0 - 5.0))
        .collect()
}

#[test]
fn default_decomposition_composes_to_identity() {
    assert_eq!(compose_matrix(&Decomposition::default()).unwrap(), Matrix4::identity());
    let parts = decompose_matrix(&Matrix4::identity()).unwrap();
    assert_eq!(parts, Decomposition::default());
}

#[test]
fn decompose_reads_translation_and_scale() {
    let parts = decompose_matrix(&translation_matrix(&Vector3::new(1.0, 2.0, 3.0))).unwrap();
    assert_eq!(parts.translation, Vector3::new(1.0, 2.0, 3.0));
    let parts = decompose_matrix(&scale_matrix(0.25, Some(&Vector3::new(1.0, 2.0, 3.0)), None).unwrap())
        .unwrap();
    assert!((parts.scale - Vector3::repeat(0.25)).amax() < 1e-12);
    let parts = decompose_matrix(&matrix_from_euler_sxyz([0.3, -0.2, 1.1])).unwrap();
    let angles = parts.euler(AxisSequence::Sxyz);
    assert!((angles[0] - 0.3).abs() < 1e-12);
    assert!((angles[1] + 0.2).abs() < 1e-12);
    assert!((angles[2] - 1.1).abs() < 1e-12);
}

fn matrix_from_euler_sxyz(angles: [f64; 3]) -> Matrix4<f64> {
    crate::rotation::matrix_from_euler(angles, AxisSequence::Sxyz)
}

#[test]
fn shear_is_recovered_in_gram_schmidt_order() {
    let parts = Decomposition {
        translation: Vector3::new(-1.0, 0.5, 2.0),
        scale: Vector3::new(1.5, 0.7, 2.2),
        shear: Vector3::new(0.3, -0.2, 0.4),
        ..Decomposition::default()
    }
    .with_euler([0.4, 0.9, -1.3], AxisSequence::Rzxz);
    let m = compose_matrix(&parts).unwrap();
    let back = decompose_matrix(&m).unwrap();
    assert!((back.shear - parts.shear).amax() < 1e-12);
    assert!((back.scale - parts.scale).amax() < 1e-12);
    assert!((back.rotation - parts.rotation).amax() < 1e-12);
    assert!((back.translation - parts.translation).amax() < 1e-12);
    let q = back.quaternion().unwrap();
    assert!(q.w >= 0.0);
}

#[test]
fn negative_determinant_moves_into_scale() {
    let m = Matrix4::from_diagonal(&Vector4::new(-1.0, 2.0, 3.0, 1.0));
    assert!(flips_winding(&m));
    let parts = decompose_matrix(&m).unwrap();
    assert!(parts.scale.iter().all(|s| *s < 0.0));
    assert!((parts.rotation.determinant() - 1.0).abs() < 1e-12);
    assert!(is_same_transform(&compose_matrix(&parts).unwrap(), &m));
}

#[test]
fn perspective_row_survives_round_trip() {
    let parts = Decomposition {
        translation: Vector3::new(0.5, -1.0, 2.0),
        scale: Vector3::new(1.0, 2.0, 0.5),
        ..Decomposition::default()
    }
    .with_euler([0.1, 0.2, 0.3], AxisSequence::Sxyz);
    let mut m = compose_matrix(&parts).unwrap();
    m.set_row(3, &nalgebra::RowVector4::new(0.1, -0.2, 0.05, 1.0));
    let back = decompose_matrix(&m).unwrap();
    assert!(back.perspective != Vector4::new(0.0, 0.0, 0.0, 1.0));
    assert!(is_same_transform(&compose_matrix(&back).unwrap(), &m));
}

#[test]
fn decompose_rejects_degenerate_matrices() {
    assert!(matches!(
        decompose_matrix(&Matrix4::zeros()),
        Err(TransformError::SingularMatrix { .. })
    ));
    let flat = Matrix4::from_diagonal(&Vector4::new(1.0, 1.0, 0.0, 1.0));
    assert!(matches!(
        decompose_matrix(&flat),
        Err(TransformError::SingularMatrix { .. })
    ));
    let mut nan = Matrix4::identity();
    nan[(1, 2)] = f64::NAN;
    assert_eq!(
        decompose_matrix(&nan),
        Err(TransformError::NonFinite { what: "matrix" })
    );
}

#[test]
fn decompose_tolerance_is_configurable() {
    let thin = Matrix4::from_diagonal(&Vector4::new(1.0, 1.0, 1e-14, 1.0));
    assert!(decompose_matrix(&thin).is_err());
    let lenient = TolCfg {
        singular_rtol: 1e-30,
        ..TolCfg::default()
    };
    let parts = decompose_matrix_with(&thin, lenient).unwrap();
    assert!((parts.scale.z - 1e-14).abs() < 1e-20);
}

#[test]
fn compose_rejects_vanishing_w() {
    let parts = Decomposition {
        perspective: Vector4::new(0.0, 0.0, 0.0, 0.0),
        ..Decomposition::default()
    };
    assert!(matches!(
        compose_matrix(&parts),
        Err(TransformError::SingularMatrix { .. })
    ));
}

#[test]
fn translation_column_round_trips() {
    let v = Vector3::new(0.25, -7.0, 3.5);
    assert_eq!(translation_from_matrix(&translation_matrix(&v)), v);
}

#[test]
fn reflection_is_an_involution_and_recoverable() {
    let point = Vector3::new(1.0, 2.0, 3.0);
    let normal = Vector3::new(0.0, 1.0, 1.0);
    let m = reflection_matrix(&point, &normal).unwrap();
    assert!((m * m - Matrix4::identity()).amax() < 1e-12);
    assert!(flips_winding(&m));
    // points on the plane are fixed
    let on_plane = point + Vector3::x() * 4.0;
    assert!((apply(&m, &on_plane) - on_plane).amax() < 1e-12);

    let (p, n) = reflection_from_matrix(&m).unwrap();
    assert!((n.dot(&normal.normalize()).abs() - 1.0).abs() < 1e-12);
    let rebuilt = reflection_matrix(&p, &n).unwrap();
    assert!(is_same_transform(&rebuilt, &m));
}

#[test]
fn reflection_from_matrix_rejects_other_transforms() {
    assert!(reflection_from_matrix(&Matrix4::identity()).is_err());
    let point_mirror = Matrix4::from_diagonal(&Vector4::new(-1.0, -1.0, -1.0, 1.0));
    assert!(reflection_from_matrix(&point_mirror).is_err());
    assert_eq!(
        reflection_matrix(&Vector3::zeros(), &Vector3::zeros()),
        Err(TransformError::ZeroVector)
    );
}

#[test]
fn scale_fixes_origin_and_acts_along_direction() {
    let origin = Vector3::new(1.0, -2.0, 0.5);
    let m = scale_matrix(3.0, Some(&origin), None).unwrap();
    assert!((apply(&m, &origin) - origin).amax() < 1e-12);
    let p = origin + Vector3::new(1.0, 1.0, 1.0);
    assert!((apply(&m, &p) - (origin + Vector3::repeat(3.0))).amax() < 1e-12);

    let m = scale_matrix(-1.0, Some(&origin), Some(&Vector3::new(0.0, 0.0, 2.0))).unwrap();
    // a factor of -1 along a direction is a mirror
    let mirror = reflection_matrix(&origin, &Vector3::z()).unwrap();
    assert!(is_same_transform(&m, &mirror));
    let q = origin + Vector3::new(2.0, 3.0, 0.0);
    assert!((apply(&m, &q) - q).amax() < 1e-12);
}

#[test]
fn orthogonal_and_parallel_projections_land_on_plane() {
    let point = Vector3::new(0.0, 0.0, 1.0);
    let normal = Vector3::new(0.0, 1.0, 1.0);
    let n = normal.normalize();
    let ortho = projection_matrix(&point, &normal, Projection::Orthogonal).unwrap();
    assert!((ortho * ortho - ortho).amax() < 1e-12);

    let direction = Vector3::new(1.0, 0.5, 2.0);
    let par = projection_matrix(&point, &normal, Projection::Parallel { direction }).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    for x in random_points(&mut rng, 20) {
        let y = apply(&ortho, &x);
        assert!((y.dot(&n) - point.dot(&n)).abs() < 1e-9);
        assert!((y - x).cross(&n).amax() < 1e-9);

        let y = apply(&par, &x);
        assert!((y.dot(&n) - point.dot(&n)).abs() < 1e-9);
        assert!((y - x).cross(&direction).amax() < 1e-9);
    }
}

#[test]
fn perspective_projection_follows_rays_from_eye() {
    let point = Vector3::new(0.0, 0.0, 0.0);
    let normal = Vector3::new(1.0, 0.0, 0.0);
    let eye = Vector3::new(4.0, 1.0, -2.0);
    let m = projection_matrix(&point, &normal, Projection::Perspective { eye, pseudo: false })
        .unwrap();
    let mut rng = StdRng::seed_from_u64(4);
    for x in random_points(&mut rng, 20) {
        if (x.x - eye.x).abs() < 0.1 {
            continue;
        }
        let y = apply(&m, &x);
        assert!(y.x.abs() < 1e-9);
        assert!((y - eye).cross(&(x - eye)).amax() < 1e-9);
    }
    let pseudo = projection_matrix(&point, &normal, Projection::Perspective { eye, pseudo: true })
        .unwrap();
    assert!(pseudo != m);
}

#[test]
fn projection_rejects_degenerate_geometry() {
    let normal = Vector3::z();
    assert!(matches!(
        projection_matrix(
            &Vector3::zeros(),
            &normal,
            Projection::Parallel { direction: Vector3::x() }
        ),
        Err(TransformError::Degenerate { .. })
    ));
    assert!(matches!(
        projection_matrix(
            &Vector3::zeros(),
            &normal,
            Projection::Perspective { eye: Vector3::new(3.0, 1.0, 0.0), pseudo: false }
        ),
        Err(TransformError::Degenerate { .. })
    ));
    assert_eq!(
        projection_matrix(&Vector3::zeros(), &Vector3::zeros(), Projection::Orthogonal),
        Err(TransformError::ZeroVector)
    );
}

#[test]
fn superimposition_recovers_similarity() {
    let mut rng = StdRng::seed_from_u64(11);
    let v0 = random_points(&mut rng, 12);
    let rotation = random_rotation_matrix(&mut rng);
    let mut truth = rotation * Matrix4::new_scaling(1.7);
    truth[(3, 3)] = 1.0;
    truth.fixed_view_mut::<3, 1>(0, 3).copy_from(&Vector3::new(2.0, -3.0, 0.5));
    let v1: Vec<_> = v0.iter().map(|p| apply(&truth, p)).collect();

    let m = superimposition_matrix(&v0, &v1, true).unwrap();
    assert!((m - truth).amax() < 1e-9);

    let mut rigid = rotation;
    rigid.fixed_view_mut::<3, 1>(0, 3).copy_from(&Vector3::new(2.0, -3.0, 0.5));
    let v2: Vec<_> = v0.iter().map(|p| apply(&rigid, p)).collect();
    let m = superimposition_matrix(&v0, &v2, false).unwrap();
    assert!((m - rigid).amax() < 1e-9);
}

#[test]
fn superimposition_never_returns_a_reflection() {
    let mut rng = StdRng::seed_from_u64(12);
    let v0 = random_points(&mut rng, 8);
    let v1: Vec<_> = v0.iter().map(|p| Vector3::new(-p.x, p.y, p.z)).collect();
    let m = superimposition_matrix(&v0, &v1, false).unwrap();
    let l: Matrix3<f64> = m.fixed_view::<3, 3>(0, 0).into_owned();
    assert!((l.determinant() - 1.0).abs() < 1e-9);
}

#[test]
fn superimposition_rejects_bad_inputs() {
    let a = vec![Vector3::zeros(), Vector3::x(), Vector3::y()];
    assert!(matches!(
        superimposition_matrix(&a, &a[..2], false),
        Err(TransformError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        superimposition_matrix(&a[..2], &a[..2], false),
        Err(TransformError::Degenerate { .. })
    ));
    let line: Vec<_> = (0..5).map(|i| Vector3::repeat(f64::from(i))).collect();
    assert!(matches!(
        superimposition_matrix(&line, &line, false),
        Err(TransformError::Degenerate { .. })
    ));
}

fn parts_strategy() -> impl Strategy<Value = Decomposition> {
    (
        prop::array::uniform3(-10.0..10.0f64),
        prop::array::uniform3(-3.0..3.0f64),
        prop::array::uniform3(0.3..3.0f64),
        prop::array::uniform3(-0.8..0.8f64),
    )
        .prop_map(|(t, angles, s, h)| {
            Decomposition {
                translation: Vector3::from(t),
                scale: Vector3::from(s),
                shear: Vector3::from(h),
                ..Decomposition::default()
            }
            .with_euler(angles, AxisSequence::Sxyz)
        })
}

proptest! {
    #[test]
    fn decompose_inverts_compose(parts in parts_strategy()) {
        let m = compose_matrix(&parts).unwrap();
        let back = decompose_matrix(&m).unwrap();
        prop_assert!((back.translation - parts.translation).amax() < 1e-9);
        prop_assert!((back.scale - parts.scale).amax() < 1e-9);
        prop_assert!((back.shear - parts.shear).amax() < 1e-9);
        prop_assert!((back.rotation - parts.rotation).amax() < 1e-9);
        prop_assert!(is_same_transform(&compose_matrix(&back).unwrap(), &m));
    }

    #[test]
    fn superimposition_of_identical_sets_is_identity(
        coords in prop::collection::vec(prop::array::uniform3(-5.0..5.0f64), 4..12),
    ) {
        let pts: Vec<_> = coords.into_iter().map(Vector3::from).collect();
        prop_assume!(superimposition_matrix(&pts, &pts, false).is_ok());
        let m = superimposition_matrix(&pts, &pts, false).unwrap();
        prop_assert!((m - Matrix4::identity()).amax() < 1e-8);
    }
}
