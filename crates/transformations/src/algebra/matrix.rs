use nalgebra::{DMatrix, Matrix4};

use crate::cfg::{TolCfg, EPS};
use crate::error::{Result, TransformError};

/// Reject `det` if it is below the tolerance scaled to the matrix magnitude.
pub(crate) fn check_nonsingular(det: f64, amax: f64, n: usize, cfg: TolCfg) -> Result<()> {
    if !det.is_finite() || !amax.is_finite() {
        return Err(TransformError::NonFinite { what: "matrix" });
    }
    let tol = cfg.det_tol(amax, n);
    if amax == 0.0 || det.abs() <= tol {
        tracing::debug!(det, tol, n, "rejecting singular matrix");
        return Err(TransformError::SingularMatrix { det, tol });
    }
    Ok(())
}

/// Elementwise `|a - b| <= atol + rtol * |b|`.
pub(crate) fn all_close(a: &[f64], b: &[f64], rtol: f64, atol: f64) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| (x - y).abs() <= atol + rtol * y.abs())
}

/// Inverse of a square matrix of any size, with the default tolerance.
pub fn inverse_matrix(m: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    inverse_matrix_with(m, TolCfg::default())
}

/// Inverse of a square matrix with an explicit tolerance configuration.
pub fn inverse_matrix_with(m: &DMatrix<f64>, cfg: TolCfg) -> Result<DMatrix<f64>> {
    if !m.is_square() {
        return Err(TransformError::dims(
            "square matrix",
            format!("{}x{}", m.nrows(), m.ncols()),
        ));
    }
    let n = m.nrows();
    let det = m.determinant();
    check_nonsingular(det, m.amax(), n, cfg)?;
    let tol = cfg.det_tol(m.amax(), n);
    m.clone()
        .try_inverse()
        .ok_or(TransformError::SingularMatrix { det, tol })
}

/// Inverse of a 4×4 homogeneous matrix.
pub fn inverse_matrix4(m: &Matrix4<f64>) -> Result<Matrix4<f64>> {
    let cfg = TolCfg::default();
    let det = m.determinant();
    check_nonsingular(det, m.amax(), 4, cfg)?;
    m.try_inverse().ok_or(TransformError::SingularMatrix {
        det,
        tol: cfg.det_tol(m.amax(), 4),
    })
}

/// Row-by-column product `a · b` of dynamically sized matrices.
pub fn matrix_product(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    if a.ncols() != b.nrows() {
        return Err(TransformError::dims(
            format!("{} rows on the right operand", a.ncols()),
            format!("{}x{}", b.nrows(), b.ncols()),
        ));
    }
    Ok(a * b)
}

/// Product of a sequence of transforms, applied right to left (`ms[0] · ms[1] · …`).
/// The empty sequence yields the identity.
pub fn concatenate_matrices(ms: &[Matrix4<f64>]) -> Matrix4<f64> {
    ms.iter().fold(Matrix4::identity(), |acc, m| acc * m)
}

/// True if `a` and `b` describe the same transform after normalizing the
/// homogeneous `[3, 3]` term.
pub fn is_same_transform(a: &Matrix4<f64>, b: &Matrix4<f64>) -> bool {
    let (wa, wb) = (a[(3, 3)], b[(3, 3)]);
    if wa.abs() <= EPS || wb.abs() <= EPS {
        return false;
    }
    let a = a / wa;
    let b = b / wb;
    all_close(a.as_slice(), b.as_slice(), 1e-5, 1e-8)
}
