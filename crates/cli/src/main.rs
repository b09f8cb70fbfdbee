use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nalgebra::{Matrix3, Matrix4};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;
use transformations::affine::decompose_matrix;
use transformations::geom::{is_rigid, random_rotation_matrix};
use transformations::rotation::{
    euler_from_matrix, matrix_from_euler, quaternion_from_matrix, AxisSequence,
};

mod output;

#[derive(Parser)]
#[command(name = "xform")]
#[command(about = "Inspect and build homogeneous transformation matrices")]
struct Cmd {
    /// Write JSON here instead of stdout
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Split a 4x4 matrix into translation, rotation, scale, shear, perspective
    Decompose {
        /// 16 entries, row-major
        #[arg(long, num_args = 16, allow_negative_numbers = true)]
        matrix: Vec<f64>,
    },
    /// Euler angles of the rotation in a 4x4 matrix
    Euler {
        /// 16 entries, row-major
        #[arg(long, num_args = 16, allow_negative_numbers = true)]
        matrix: Vec<f64>,
        #[arg(long, default_value = "sxyz")]
        axes: AxisSequence,
    },
    /// Rotation matrix from Euler angles (radians)
    FromEuler {
        #[arg(long, num_args = 3, allow_negative_numbers = true)]
        angles: Vec<f64>,
        #[arg(long, default_value = "sxyz")]
        axes: AxisSequence,
    },
    /// Uniformly random rotation, reproducible from the seed
    RandomRotation {
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Print version and build info
    Report,
}

#[derive(Serialize)]
struct DecomposeOut {
    translation: [f64; 3],
    rotation: [[f64; 3]; 3],
    scale: [f64; 3],
    shear: [f64; 3],
    perspective: [f64; 4],
    quaternion: [f64; 4],
    euler_sxyz: [f64; 3],
}

#[derive(Serialize)]
struct EulerOut {
    axes: String,
    angles: [f64; 3],
}

#[derive(Serialize)]
struct MatrixOut {
    matrix: [[f64; 4]; 4],
    quaternion: [f64; 4],
    rigid: bool,
}

#[derive(Serialize)]
struct ReportOut {
    name: &'static str,
    version: &'static str,
    code_rev: String,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    run(Cmd::parse())
}

fn run(cmd: Cmd) -> Result<()> {
    let out = cmd.out.as_deref();
    match cmd.action {
        Action::Decompose { matrix } => {
            tracing::info!("decompose");
            output::emit(&decompose(&matrix)?, out)?;
        }
        Action::Euler { matrix, axes } => {
            tracing::info!(%axes, "euler");
            let m = parse_matrix(&matrix)?;
            let angles = euler_from_matrix(&m, axes);
            output::emit(&EulerOut { axes: axes.to_string(), angles }, out)?;
        }
        Action::FromEuler { angles, axes } => {
            tracing::info!(%axes, ?angles, "from-euler");
            let angles: [f64; 3] = angles
                .try_into()
                .map_err(|v: Vec<f64>| anyhow::anyhow!("expected 3 angles, got {}", v.len()))?;
            output::emit(&matrix_out(&matrix_from_euler(angles, axes))?, out)?;
        }
        Action::RandomRotation { seed } => {
            tracing::info!(seed, "random-rotation");
            let m = random_rotation_matrix(&mut StdRng::seed_from_u64(seed));
            output::emit(&matrix_out(&m)?, out)?;
        }
        Action::Report => {
            let report = ReportOut {
                name: "transformations",
                version: transformations::VERSION,
                code_rev: output::current_git_rev(),
            };
            output::emit(&report, out)?;
        }
    }
    Ok(())
}

fn parse_matrix(entries: &[f64]) -> Result<Matrix4<f64>> {
    anyhow::ensure!(
        entries.len() == 16,
        "expected 16 matrix entries, got {}",
        entries.len()
    );
    Ok(Matrix4::from_row_slice(entries))
}

fn rows3(m: &Matrix3<f64>) -> [[f64; 3]; 3] {
    std::array::from_fn(|i| std::array::from_fn(|j| m[(i, j)]))
}

fn rows4(m: &Matrix4<f64>) -> [[f64; 4]; 4] {
    std::array::from_fn(|i| std::array::from_fn(|j| m[(i, j)]))
}

fn decompose(entries: &[f64]) -> Result<DecomposeOut> {
    let m = parse_matrix(entries)?;
    let parts = decompose_matrix(&m).context("decomposing matrix")?;
    let q = parts.quaternion()?;
    Ok(DecomposeOut {
        translation: parts.translation.into(),
        rotation: rows3(&parts.rotation),
        scale: parts.scale.into(),
        shear: parts.shear.into(),
        perspective: parts.perspective.into(),
        quaternion: [q.w, q.i, q.j, q.k],
        euler_sxyz: parts.euler(AxisSequence::Sxyz),
    })
}

fn matrix_out(m: &Matrix4<f64>) -> Result<MatrixOut> {
    let q = quaternion_from_matrix(m).context("extracting quaternion")?;
    Ok(MatrixOut {
        matrix: rows4(m),
        quaternion: [q.w, q.i, q.j, q.k],
        rigid: is_rigid(m, transformations::cfg::RIGID_TOL),
    })
}
