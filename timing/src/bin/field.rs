//! Constant-time verification for field inversion and the 3-point ladder.
//!
//! Each bench pits a degenerate input (one, the zero scalar) against a
//! random one; timing must not tell them apart.
//!
//! Run with: `cargo run --release -p velu-timing --bin field`

use dudect_bencher::rand::Rng;
use dudect_bencher::{ctbench_main, BenchRng, Class, CtRunner};
use velu_core::montgomery::scalar_mul_3pt;
use velu_core::{Field, PrimeField, ProjectivePoint};
use velu_sike::params::{start_curve, SECRET_BITS_A, SECRET_BYTES_A, XPA, XQA, XRA};
use velu_sike::Fp434;

const ITERATIONS: usize = 10_000;
const LADDER_ITERATIONS: usize = 1_000;

/// A full-width field element derived from a random word.
fn spread(w: u64) -> Fp434 {
    let r = Fp434::from_u64(w | 1);
    r * r.square() * XPA.a
}

/// Inversion of `1` versus a random element.
fn bench_invert(runner: &mut CtRunner, rng: &mut BenchRng) {
    let mut inputs = Vec::with_capacity(ITERATIONS);
    for _ in 0..ITERATIONS {
        if rng.gen::<bool>() {
            inputs.push((Class::Left, Fp434::ONE));
        } else {
            inputs.push((Class::Right, spread(rng.gen())));
        }
    }

    for (class, x) in inputs {
        runner.run_one(class, || {
            let _ = x.invert();
        });
    }
}

/// Side A kernel ladder with the zero scalar versus a random one.
fn bench_ladder(runner: &mut CtRunner, rng: &mut BenchRng) {
    let a24 = start_curve().a24_plus();
    let p = ProjectivePoint::from_affine(XPA);
    let q = ProjectivePoint::from_affine(XQA);
    let r = ProjectivePoint::from_affine(XRA);

    let mut inputs = Vec::with_capacity(LADDER_ITERATIONS);
    for _ in 0..LADDER_ITERATIONS {
        let mut scalar = [0u8; SECRET_BYTES_A];
        if rng.gen::<bool>() {
            inputs.push((Class::Left, scalar));
        } else {
            rng.fill(&mut scalar[..]);
            inputs.push((Class::Right, scalar));
        }
    }

    for (class, scalar) in inputs {
        runner.run_one(class, || {
            let _ = scalar_mul_3pt(&p, &q, &r, &a24, &scalar, SECRET_BITS_A);
        });
    }
}

ctbench_main!(bench_invert, bench_ladder);
