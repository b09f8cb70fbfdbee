//! Euler angles under the 24 canonical axis sequences.
//!
//! A code reads `<frame><axis><axis><axis>`: `s` for a static (extrinsic)
//! frame, `r` for a rotating (intrinsic) frame. Internally every sequence is
//! encoded as `(first axis, parity, repetition, frame)`; the same three angles
//! under a different sequence denote a different rotation.
//!
//! Gimbal lock: when the middle angle aligns the first and third axes the
//! extraction cannot separate them. The third angle is then reported as zero
//! and the whole rotation is carried by the first; the rebuilt matrix still
//! matches.

use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix4, Quaternion};

use super::quaternion::matrix_from_quaternion;
use crate::cfg::EPS;
use crate::error::{Result, TransformError};

const NEXT_AXIS: [usize; 4] = [1, 2, 0, 1];

/// Closed set of Euler axis sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxisSequence {
    #[default]
    Sxyz,
    Sxyx,
    Sxzy,
    Sxzx,
    Syzx,
    Syzy,
    Syxz,
    Syxy,
    Szxy,
    Szxz,
    Szyx,
    Szyz,
    Rzyx,
    Rxyx,
    Ryzx,
    Rxzx,
    Rxzy,
    Ryzy,
    Rzxy,
    Ryxy,
    Ryxz,
    Rzxz,
    Rxyz,
    Rzyz,
}

/// Inner-axis encoding of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Encoding {
    first: usize,
    parity: bool,
    repetition: bool,
    rotating: bool,
}

impl AxisSequence {
    pub const ALL: [AxisSequence; 24] = [
        Self::Sxyz,
        Self::Sxyx,
        Self::Sxzy,
        Self::Sxzx,
        Self::Syzx,
        Self::Syzy,
        Self::Syxz,
        Self::Syxy,
        Self::Szxy,
        Self::Szxz,
        Self::Szyx,
        Self::Szyz,
        Self::Rzyx,
        Self::Rxyx,
        Self::Ryzx,
        Self::Rxzx,
        Self::Rxzy,
        Self::Ryzy,
        Self::Rzxy,
        Self::Ryxy,
        Self::Ryxz,
        Self::Rzxz,
        Self::Rxyz,
        Self::Rzyz,
    ];

    /// Four-letter code, e.g. `"sxyz"`.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Sxyz => "sxyz",
            Self::Sxyx => "sxyx",
            Self::Sxzy => "sxzy",
            Self::Sxzx => "sxzx",
            Self::Syzx => "syzx",
            Self::Syzy => "syzy",
            Self::Syxz => "syxz",
            Self::Syxy => "syxy",
            Self::Szxy => "szxy",
            Self::Szxz => "szxz",
            Self::Szyx => "szyx",
            Self::Szyz => "szyz",
            Self::Rzyx => "rzyx",
            Self::Rxyx => "rxyx",
            Self::Ryzx => "ryzx",
            Self::Rxzx => "rxzx",
            Self::Rxzy => "rxzy",
            Self::Ryzy => "ryzy",
            Self::Rzxy => "rzxy",
            Self::Ryxy => "ryxy",
            Self::Ryxz => "ryxz",
            Self::Rzxz => "rzxz",
            Self::Rxyz => "rxyz",
            Self::Rzyz => "rzyz",
        }
    }

    /// True for rotating-frame (intrinsic) sequences.
    #[inline]
    pub fn is_rotating(self) -> bool {
        self.encoding().rotating
    }

    /// True for sequences whose first and last axes coincide (e.g. `szxz`).
    #[inline]
    pub fn is_repeating(self) -> bool {
        self.encoding().repetition
    }

    fn encoding(self) -> Encoding {
        let (first, parity, repetition, rotating) = match self {
            Self::Sxyz => (0, 0, 0, 0),
            Self::Sxyx => (0, 0, 1, 0),
            Self::Sxzy => (0, 1, 0, 0),
            Self::Sxzx => (0, 1, 1, 0),
            Self::Syzx => (1, 0, 0, 0),
            Self::Syzy => (1, 0, 1, 0),
            Self::Syxz => (1, 1, 0, 0),
            Self::Syxy => (1, 1, 1, 0),
            Self::Szxy => (2, 0, 0, 0),
            Self::Szxz => (2, 0, 1, 0),
            Self::Szyx => (2, 1, 0, 0),
            Self::Szyz => (2, 1, 1, 0),
            Self::Rzyx => (0, 0, 0, 1),
            Self::Rxyx => (0, 0, 1, 1),
            Self::Ryzx => (0, 1, 0, 1),
            Self::Rxzx => (0, 1, 1, 1),
            Self::Rxzy => (1, 0, 0, 1),
            Self::Ryzy => (1, 0, 1, 1),
            Self::Rzxy => (1, 1, 0, 1),
            Self::Ryxy => (1, 1, 1, 1),
            Self::Ryxz => (2, 0, 0, 1),
            Self::Rzxz => (2, 0, 1, 1),
            Self::Rxyz => (2, 1, 0, 1),
            Self::Rzyz => (2, 1, 1, 1),
        };
        Encoding {
            first,
            parity: parity == 1,
            repetition: repetition == 1,
            rotating: rotating == 1,
        }
    }
}

impl FromStr for AxisSequence {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.code() == code)
            .ok_or_else(|| TransformError::InvalidAxisSequence(s.to_string()))
    }
}

impl TryFrom<&str> for AxisSequence {
    type Error = TransformError;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for AxisSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Homogeneous rotation matrix from Euler angles (radians) under `axes`.
pub fn matrix_from_euler(angles: [f64; 3], axes: AxisSequence) -> Matrix4<f64> {
    let e = axes.encoding();
    let p = usize::from(e.parity);
    let i = e.first;
    let j = NEXT_AXIS[i + p];
    let k = NEXT_AXIS[i + 1 - p];

    let [mut ai, mut aj, mut ak] = angles;
    if e.rotating {
        std::mem::swap(&mut ai, &mut ak);
    }
    if e.parity {
        (ai, aj, ak) = (-ai, -aj, -ak);
    }
    let (si, ci) = ai.sin_cos();
    let (sj, cj) = aj.sin_cos();
    let (sk, ck) = ak.sin_cos();
    let (cc, cs) = (ci * ck, ci * sk);
    let (sc, ss) = (si * ck, si * sk);

    let mut m = Matrix4::identity();
    if e.repetition {
        m[(i, i)] = cj;
        m[(i, j)] = sj * si;
        m[(i, k)] = sj * ci;
        m[(j, i)] = sj * sk;
        m[(j, j)] = -cj * ss + cc;
        m[(j, k)] = -cj * cs - sc;
        m[(k, i)] = -sj * ck;
        m[(k, j)] = cj * sc + cs;
        m[(k, k)] = cj * cc - ss;
    } else {
        m[(i, i)] = cj * ck;
        m[(i, j)] = sj * sc - cs;
        m[(i, k)] = sj * cc + ss;
        m[(j, i)] = cj * sk;
        m[(j, j)] = sj * ss + cc;
        m[(j, k)] = sj * cs - sc;
        m[(k, i)] = -sj;
        m[(k, j)] = cj * si;
        m[(k, k)] = cj * ci;
    }
    m
}

/// Euler angles of the rotation block of `m` under `axes`.
///
/// Rebuilding with [`matrix_from_euler`] and the same `axes` reproduces the
/// rotation block; the angles themselves are not unique at gimbal lock.
pub fn euler_from_matrix(m: &Matrix4<f64>, axes: AxisSequence) -> [f64; 3] {
    let e = axes.encoding();
    let p = usize::from(e.parity);
    let i = e.first;
    let j = NEXT_AXIS[i + p];
    let k = NEXT_AXIS[i + 1 - p];

    let [mut ax, mut ay, mut az] = if e.repetition {
        let sy = m[(i, j)].hypot(m[(i, k)]);
        if sy > EPS {
            [
                m[(i, j)].atan2(m[(i, k)]),
                sy.atan2(m[(i, i)]),
                m[(j, i)].atan2(-m[(k, i)]),
            ]
        } else {
            [(-m[(j, k)]).atan2(m[(j, j)]), sy.atan2(m[(i, i)]), 0.0]
        }
    } else {
        let cy = m[(i, i)].hypot(m[(j, i)]);
        if cy > EPS {
            [
                m[(k, j)].atan2(m[(k, k)]),
                (-m[(k, i)]).atan2(cy),
                m[(j, i)].atan2(m[(i, i)]),
            ]
        } else {
            [(-m[(j, k)]).atan2(m[(j, j)]), (-m[(k, i)]).atan2(cy), 0.0]
        }
    };
    if e.parity {
        (ax, ay, az) = (-ax, -ay, -az);
    }
    if e.rotating {
        std::mem::swap(&mut ax, &mut az);
    }
    [ax, ay, az]
}

/// Euler angles of the rotation described by `q`.
pub fn euler_from_quaternion(q: &Quaternion<f64>, axes: AxisSequence) -> Result<[f64; 3]> {
    Ok(euler_from_matrix(&matrix_from_quaternion(q)?, axes))
}

/// Quaternion (scalar first) for Euler angles under `axes`.
pub fn quaternion_from_euler(angles: [f64; 3], axes: AxisSequence) -> Quaternion<f64> {
    let e = axes.encoding();
    let p = usize::from(e.parity);
    // indices into [w, x, y, z]
    let i = e.first + 1;
    let j = NEXT_AXIS[i + p - 1] + 1;
    let k = NEXT_AXIS[i - p] + 1;

    let [mut ai, mut aj, mut ak] = angles;
    if e.rotating {
        std::mem::swap(&mut ai, &mut ak);
    }
    if e.parity {
        aj = -aj;
    }
    let (si, ci) = (ai / 2.0).sin_cos();
    let (sj, cj) = (aj / 2.0).sin_cos();
    let (sk, ck) = (ak / 2.0).sin_cos();
    let (cc, cs) = (ci * ck, ci * sk);
    let (sc, ss) = (si * ck, si * sk);

    let mut q = [0.0; 4];
    if e.repetition {
        q[0] = cj * (cc - ss);
        q[i] = cj * (cs + sc);
        q[j] = sj * (cc + ss);
        q[k] = sj * (cs - sc);
    } else {
        q[0] = cj * cc + sj * ss;
        q[i] = cj * sc - sj * cs;
        q[j] = cj * ss + sj * cc;
        q[k] = cj * cs - sj * sc;
    }
    if e.parity {
        q[j] = -q[j];
    }
    Quaternion::new(q[0], q[1], q[2], q[3])
}
