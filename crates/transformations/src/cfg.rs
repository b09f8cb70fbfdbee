//! Tolerance defaults.
//!
//! Policy
//! - Defaults are fixed constants so call sites stay tolerance-free. Callers who
//!   need to retry with different thresholds go through `TolCfg` and the
//!   `*_with` variants instead of juggling epsilons per call.

/// Branch threshold for Euler extraction and near-zero quaternion checks.
pub const EPS: f64 = 4.0 * f64::EPSILON;
/// Relative determinant tolerance: `|det M| <= SINGULAR_RTOL * amax(M)^n` is singular.
pub const SINGULAR_RTOL: f64 = 1e-12;
/// Default absolute tolerance for `is_rigid`.
pub const RIGID_TOL: f64 = 1e-8;

/// Tolerance configuration for operations that can reject near-degenerate input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TolCfg {
    /// Relative determinant tolerance (scaled by the matrix magnitude).
    pub singular_rtol: f64,
    /// Norms at or below this are treated as zero.
    pub zero_norm: f64,
}

impl Default for TolCfg {
    fn default() -> Self {
        Self {
            singular_rtol: SINGULAR_RTOL,
            zero_norm: EPS,
        }
    }
}

impl TolCfg {
    /// Absolute determinant threshold for an `n × n` matrix whose largest
    /// absolute entry is `amax`.
    #[inline]
    pub fn det_tol(&self, amax: f64, n: usize) -> f64 {
        self.singular_rtol * amax.powi(n as i32)
    }
}
