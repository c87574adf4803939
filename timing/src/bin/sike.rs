//! Constant-time verification for SIKEp434 decapsulation.
//!
//! Tests that decapsulation timing is independent of ciphertext validity
//! (implicit rejection must be constant-time).
//!
//! Run with: `cargo run --release -p velu-timing --bin sike`

use dudect_bencher::rand::Rng;
use dudect_bencher::{ctbench_main, BenchRng, Class, CtRunner};
use once_cell::sync::Lazy;
use velu_core::Kem;
use velu_sike::params::{CIPHERTEXT_SIZE, PUBLIC_KEY_SIZE};
use velu_sike::{Ciphertext, DecapsulationKey, EncapsulationKey, SikeP434};

/// Pre-generated key pair and ciphertexts for testing.
struct TestData {
    dk: DecapsulationKey,
    ct_valid: Ciphertext,
    ct_invalid: Ciphertext,
}

static TEST_DATA: Lazy<TestData> = Lazy::new(|| {
    let (dk, ek): (DecapsulationKey, EncapsulationKey) =
        SikeP434::keygen(&mut rand::rng()).expect("keygen failed");

    let (ct_valid, _ss) = SikeP434::encaps(&ek, &mut rand::rng()).expect("encaps failed");

    // Corrupt only the masked message so the ephemeral key stays canonical.
    let mut ct_invalid_bytes = [0u8; CIPHERTEXT_SIZE];
    ct_invalid_bytes.copy_from_slice(ct_valid.as_bytes());
    ct_invalid_bytes[PUBLIC_KEY_SIZE] ^= 0xff;
    ct_invalid_bytes[CIPHERTEXT_SIZE - 1] ^= 0xaa;
    let ct_invalid = Ciphertext::from_bytes(&ct_invalid_bytes).expect("invalid ct construction");

    TestData {
        dk,
        ct_valid,
        ct_invalid,
    }
});

/// Number of iterations per batch. Each decapsulation walks two isogeny trees.
const ITERATIONS: usize = 500;

/// Compares timing between:
/// - Left: valid ciphertext (re-encryption matches)
/// - Right: invalid ciphertext (implicit rejection triggered)
fn bench_decaps_p434(runner: &mut CtRunner, rng: &mut BenchRng) {
    let data = &*TEST_DATA;

    let mut classes = Vec::with_capacity(ITERATIONS);
    for _ in 0..ITERATIONS {
        if rng.gen::<bool>() {
            classes.push(Class::Left);
        } else {
            classes.push(Class::Right);
        }
    }

    for class in classes {
        let ct = match class {
            Class::Left => &data.ct_valid,
            Class::Right => &data.ct_invalid,
        };

        runner.run_one(class, || {
            let _ = SikeP434::decaps(&data.dk, ct);
        });
    }
}

ctbench_main!(bench_decaps_p434);
