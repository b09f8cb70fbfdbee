//! Applying homogeneous matrices to point sets.
//!
//! Point sets are `DMatrix<f64>` with one point per row (`n × 2` or `n × 3`).
//! Matrices may be static (`Matrix3`, `Matrix4`) or dynamic (`DMatrix`); the
//! [`Homogeneous`] trait validates the pairing at the boundary.

use nalgebra::{DMatrix, Matrix3, Matrix4};

use crate::error::{Result, TransformError};

/// A square homogeneous matrix acting on 2D or 3D points.
pub trait Homogeneous: Sized {
    /// Dimension of the points the matrix acts on (2 or 3).
    fn point_dim(&self) -> Result<usize>;
    fn to_dmatrix(&self) -> DMatrix<f64>;
    fn from_dmatrix(m: &DMatrix<f64>) -> Result<Self>;
}

fn shape(m: &DMatrix<f64>) -> String {
    format!("{}x{}", m.nrows(), m.ncols())
}

impl Homogeneous for Matrix3<f64> {
    fn point_dim(&self) -> Result<usize> {
        Ok(2)
    }
    fn to_dmatrix(&self) -> DMatrix<f64> {
        DMatrix::from_column_slice(3, 3, self.as_slice())
    }
    fn from_dmatrix(m: &DMatrix<f64>) -> Result<Self> {
        if m.shape() != (3, 3) {
            return Err(TransformError::dims("3x3 matrix", shape(m)));
        }
        Ok(Matrix3::from_column_slice(m.as_slice()))
    }
}

impl Homogeneous for Matrix4<f64> {
    fn point_dim(&self) -> Result<usize> {
        Ok(3)
    }
    fn to_dmatrix(&self) -> DMatrix<f64> {
        DMatrix::from_column_slice(4, 4, self.as_slice())
    }
    fn from_dmatrix(m: &DMatrix<f64>) -> Result<Self> {
        if m.shape() != (4, 4) {
            return Err(TransformError::dims("4x4 matrix", shape(m)));
        }
        Ok(Matrix4::from_column_slice(m.as_slice()))
    }
}

impl Homogeneous for DMatrix<f64> {
    fn point_dim(&self) -> Result<usize> {
        match self.shape() {
            (3, 3) => Ok(2),
            (4, 4) => Ok(3),
            _ => Err(TransformError::dims("3x3 or 4x4 matrix", shape(self))),
        }
    }
    fn to_dmatrix(&self) -> DMatrix<f64> {
        self.clone()
    }
    fn from_dmatrix(m: &DMatrix<f64>) -> Result<Self> {
        Ok(m.clone())
    }
}

/// Apply `matrix` to every row of `points`.
///
/// With `translate = false` only the linear block is applied (directions, not
/// positions). No perspective divide is performed.
pub fn transform_points<M: Homogeneous>(
    points: &DMatrix<f64>,
    matrix: &M,
    translate: bool,
) -> Result<DMatrix<f64>> {
    let dim = matrix.point_dim()?;
    if points.ncols() != dim {
        return Err(TransformError::dims(
            format!("{dim}D points (n x {dim})"),
            shape(points),
        ));
    }
    let m = matrix.to_dmatrix();
    let mut out = points * m.view((0, 0), (dim, dim)).transpose();
    if translate {
        for i in 0..out.nrows() {
            for j in 0..dim {
                out[(i, j)] += m[(j, dim)];
            }
        }
    }
    Ok(out)
}

/// `T(point) · matrix · T(-point)`: the same transform, centered on `point`.
pub fn transform_around<M: Homogeneous>(matrix: &M, point: &[f64]) -> Result<M> {
    let dim = matrix.point_dim()?;
    if point.len() != dim {
        return Err(TransformError::dims(
            format!("{dim}D point"),
            format!("{}D point", point.len()),
        ));
    }
    let mut to = DMatrix::identity(dim + 1, dim + 1);
    let mut back = DMatrix::identity(dim + 1, dim + 1);
    for (i, p) in point.iter().enumerate() {
        to[(i, dim)] = *p;
        back[(i, dim)] = -p;
    }
    M::from_dmatrix(&(to * matrix.to_dmatrix() * back))
}
