use nalgebra::{Matrix3, Matrix4, Quaternion, RowVector4, Vector3, Vector4};

use crate::algebra::check_nonsingular;
use crate::cfg::{TolCfg, EPS};
use crate::error::{Result, TransformError};
use crate::rotation::{euler_from_matrix, matrix_from_euler, quaternion_from_matrix, AxisSequence};

/// Named components of a homogeneous 4×4 matrix.
///
/// Invariants (as produced by [`decompose_matrix`]):
/// - `rotation` is a proper rotation (det +1); a reflection is carried by
///   negating all of `scale`.
/// - `shear = (xy, xz, yz)` as attributed by Gram–Schmidt over X, Y, Z.
/// - `perspective` is the bottom row of the matrix, `[0, 0, 0, 1]` when affine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposition {
    pub translation: Vector3<f64>,
    pub rotation: Matrix3<f64>,
    pub scale: Vector3<f64>,
    pub shear: Vector3<f64>,
    pub perspective: Vector4<f64>,
}

impl Default for Decomposition {
    /// Identity element for every component.
    fn default() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: Matrix3::identity(),
            scale: Vector3::repeat(1.0),
            shear: Vector3::zeros(),
            perspective: Vector4::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

impl Decomposition {
    /// Replace the rotation by the one given in Euler angles.
    #[must_use]
    pub fn with_euler(mut self, angles: [f64; 3], axes: AxisSequence) -> Self {
        self.rotation = matrix_from_euler(angles, axes)
            .fixed_view::<3, 3>(0, 0)
            .into_owned();
        self
    }

    fn rotation4(&self) -> Matrix4<f64> {
        self.rotation.to_homogeneous()
    }

    /// Rotation as a unit quaternion (`w >= 0`).
    pub fn quaternion(&self) -> Result<Quaternion<f64>> {
        quaternion_from_matrix(&self.rotation4())
    }

    /// Rotation as Euler angles under `axes`.
    pub fn euler(&self, axes: AxisSequence) -> [f64; 3] {
        euler_from_matrix(&self.rotation4(), axes)
    }
}

/// Build `Perspective · Translate · Rotate · Shear · Scale`, normalized so that
/// the `[3, 3]` term is 1.
pub fn compose_matrix(parts: &Decomposition) -> Result<Matrix4<f64>> {
    let mut p = Matrix4::identity();
    p.set_row(3, &parts.perspective.transpose());
    let t = Matrix4::new_translation(&parts.translation);
    let r = parts.rotation4();
    let mut z = Matrix4::identity();
    z[(0, 1)] = parts.shear.x;
    z[(0, 2)] = parts.shear.y;
    z[(1, 2)] = parts.shear.z;
    let s = Matrix4::new_nonuniform_scaling(&parts.scale);

    let m = p * t * r * z * s;
    let w = m[(3, 3)];
    if !w.is_finite() {
        return Err(TransformError::NonFinite { what: "matrix" });
    }
    if w.abs() <= EPS {
        return Err(TransformError::SingularMatrix { det: w, tol: EPS });
    }
    Ok(m / w)
}

/// Split `m` into translation, rotation, scale, shear, and perspective.
pub fn decompose_matrix(m: &Matrix4<f64>) -> Result<Decomposition> {
    decompose_matrix_with(m, TolCfg::default())
}

/// [`decompose_matrix`] with an explicit tolerance configuration.
pub fn decompose_matrix_with(m: &Matrix4<f64>, cfg: TolCfg) -> Result<Decomposition> {
    if !m.iter().all(|v| v.is_finite()) {
        return Err(TransformError::NonFinite { what: "matrix" });
    }
    let w = m[(3, 3)];
    if w.abs() <= EPS {
        tracing::debug!(w, "homogeneous term vanishes; cannot normalize");
        return Err(TransformError::SingularMatrix { det: w, tol: EPS });
    }
    let m = m / w;

    // N: the affine part, i.e. m with the bottom row reset
    let mut n = m;
    n.set_row(3, &RowVector4::new(0.0, 0.0, 0.0, 1.0));
    let linear = n.fixed_view::<3, 3>(0, 0).into_owned();
    check_nonsingular(linear.determinant(), linear.amax(), 3, cfg)?;

    let bottom = m.row(3).into_owned();
    let perspective = if bottom.columns(0, 3).iter().any(|v| v.abs() > EPS) {
        // m = P · N, so the perspective row is bottom · N⁻¹
        let n_inv = n.try_inverse().ok_or(TransformError::SingularMatrix {
            det: linear.determinant(),
            tol: cfg.det_tol(linear.amax(), 3),
        })?;
        (bottom * n_inv).transpose()
    } else {
        Vector4::new(0.0, 0.0, 0.0, 1.0)
    };
    let translation = n.fixed_view::<3, 1>(0, 3).into_owned();

    let mut x = linear.column(0).into_owned();
    let mut y = linear.column(1).into_owned();
    let mut z = linear.column(2).into_owned();
    let mut scale = Vector3::zeros();
    let mut shear = Vector3::zeros();

    scale.x = x.norm();
    x /= scale.x;
    shear.x = x.dot(&y);
    y -= x * shear.x;
    scale.y = y.norm();
    y /= scale.y;
    shear.x /= scale.y;
    shear.y = x.dot(&z);
    z -= x * shear.y;
    shear.z = y.dot(&z);
    z -= y * shear.z;
    scale.z = z.norm();
    z /= scale.z;
    shear.y /= scale.z;
    shear.z /= scale.z;

    let mut rotation = Matrix3::from_columns(&[x, y, z]);
    if x.dot(&y.cross(&z)) < 0.0 {
        scale = -scale;
        rotation = -rotation;
    }
    Ok(Decomposition {
        translation,
        rotation,
        scale,
        shear,
        perspective,
    })
}
