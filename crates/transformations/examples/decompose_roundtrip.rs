//! Compose a transform from parts, decompose it again, and print both.
//!
//! Usage:
//!   cargo run -p transformations --example decompose_roundtrip -- [seed]
//!
//! Draws a random rotation from the seed, adds fixed scale/shear/translation,
//! and shows that decomposition recovers each part.

use nalgebra::Vector3;
use rand::{rngs::StdRng, SeedableRng};
use transformations::affine::{compose_matrix, decompose_matrix, Decomposition};
use transformations::geom::random_quaternion;
use transformations::rotation::{euler_from_quaternion, AxisSequence};

fn main() -> transformations::Result<()> {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2025u64);
    let mut rng = StdRng::seed_from_u64(seed);
    let angles = euler_from_quaternion(&random_quaternion(&mut rng), AxisSequence::Sxyz)?;
    let parts = Decomposition {
        translation: Vector3::new(1.0, 2.0, 3.0),
        scale: Vector3::new(0.5, 1.0, 2.0),
        shear: Vector3::new(0.1, 0.0, -0.2),
        ..Decomposition::default()
    }
    .with_euler(angles, AxisSequence::Sxyz);

    let m = compose_matrix(&parts)?;
    println!("seed={seed} matrix:{m}");
    let back = decompose_matrix(&m)?;
    println!("translation: {:?}", back.translation.as_slice());
    println!("scale:       {:?}", back.scale.as_slice());
    println!("shear:       {:?}", back.shear.as_slice());
    println!("euler sxyz:  {:?} (drawn {angles:?})", back.euler(AxisSequence::Sxyz));
    Ok(())
}
