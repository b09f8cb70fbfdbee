//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TransformError>;

/// Typed failures. Inputs are validated before the core computation runs, so a
/// caller sees one of these instead of a NaN-laden matrix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// Matrix is not invertible within the (scaled) determinant tolerance.
    #[error("matrix is singular: |det| = {det:e} <= tol {tol:e}")]
    SingularMatrix {
        /// Determinant that was tested.
        det: f64,
        /// Absolute tolerance it was tested against.
        tol: f64,
    },

    /// Normalization of a zero-length vector or quaternion.
    #[error("cannot normalize a zero-length vector")]
    ZeroVector,

    /// Incompatible vector/matrix/point dimensionality.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Human-readable description of the accepted shape.
        expected: String,
        /// Shape that was provided.
        actual: String,
    },

    /// Unrecognized Euler axis-sequence code.
    #[error("invalid axis sequence {0:?}")]
    InvalidAxisSequence(String),

    /// NaN or infinite value where a finite one is required.
    #[error("{what} must be finite")]
    NonFinite {
        /// Name of the offending input.
        what: &'static str,
    },

    /// Geometrically degenerate input.
    #[error("degenerate input: {reason}")]
    Degenerate {
        /// Why the input was rejected.
        reason: String,
    },
}

impl TransformError {
    pub(crate) fn dims(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::Degenerate {
            reason: reason.into(),
        }
    }
}
