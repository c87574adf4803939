//! Supersingularity check for CSIDH public keys.
//!
//! A curve over 𝔽p is supersingular exactly when it has `p + 1` points.
//! Finding a point whose order divides `p + 1` and exceeds `4√p` proves
//! that, since the order of any point divides the group order and the
//! Hasse interval contains a single multiple of that order.

use crate::action::random_fp;
use crate::fp::Fp511;
use crate::keys::PublicKey;
use crate::params::{FOUR_SQRT_P, NUM_PRIMES, PRIMES};
use crate::uint::U512;
use rand_core::TryCryptoRng;
use velu_core::montgomery::{scalar_mul, xdbl, A24Plus};
use velu_core::{ProjectiveCurve, ProjectivePoint, Result};

/// Outcome of testing one random point.
enum Verdict {
    Supersingular,
    Ordinary,
    Inconclusive,
}

fn mul_vartime(
    p: &ProjectivePoint<Fp511>,
    curve: &A24Plus<Fp511>,
    k: &U512,
) -> ProjectivePoint<Fp511> {
    scalar_mul(p, curve, &k.to_le_bytes(), k.bits())
}

/// For each `i` in `lower..upper`, set `points[i]` to the multiple of
/// `points[lower]` that clears every prime of the range except ℓᵢ.
fn cofactor_multiples(
    points: &mut [ProjectivePoint<Fp511>; NUM_PRIMES],
    curve: &A24Plus<Fp511>,
    lower: usize,
    upper: usize,
) {
    if upper - lower == 1 {
        return;
    }
    let mid = lower + (upper - lower + 1) / 2;

    let mut cu = U512::ONE;
    for &l in &PRIMES[lower..mid] {
        cu = cu.mul_small(l);
    }
    let mut cl = U512::ONE;
    for &l in &PRIMES[mid..upper] {
        cl = cl.mul_small(l);
    }

    points[mid] = mul_vartime(&points[lower], curve, &cu);
    points[lower] = mul_vartime(&points[lower], curve, &cl);

    cofactor_multiples(points, curve, mid, upper);
    cofactor_multiples(points, curve, lower, mid);
}

fn classify_point(curve: &A24Plus<Fp511>, x: Fp511) -> Verdict {
    let start = ProjectivePoint::from_affine(x);
    let mut points = [ProjectivePoint::IDENTITY; NUM_PRIMES];
    points[0] = xdbl(&xdbl(&start, curve), curve);
    cofactor_multiples(&mut points, curve, 0, NUM_PRIMES);

    let mut order = U512::ONE;
    for i in (0..NUM_PRIMES).rev() {
        if bool::from(points[i].is_identity()) {
            continue;
        }
        let killed = mul_vartime(&points[i], curve, &U512::from_u64(PRIMES[i]));
        if !bool::from(killed.is_identity()) {
            return Verdict::Ordinary;
        }
        order = order.mul_small(PRIMES[i]);
        if order.gt_vartime(&FOUR_SQRT_P) {
            return Verdict::Supersingular;
        }
    }
    Verdict::Inconclusive
}

/// Check that `pk` describes a supersingular curve.
///
/// Returns `Ok(false)` for ordinary curves. Samples fresh points until the
/// answer is certain; each sample settles it with overwhelming probability.
/// Runs in variable time, which is safe since only public data is involved.
pub fn validate<R: TryCryptoRng + ?Sized>(pk: &PublicKey, rng: &mut R) -> Result<bool> {
    let curve = ProjectiveCurve::from_affine(*pk.coefficient()).a24_plus();
    let mut samples = 0u32;
    loop {
        samples += 1;
        let x = random_fp(rng)?;
        match classify_point(&curve, x) {
            Verdict::Supersingular => {
                log::debug!("csidh public key accepted after {samples} sample(s)");
                return Ok(true);
            }
            Verdict::Ordinary => {
                log::debug!("csidh public key rejected: curve is not supersingular");
                return Ok(false);
            }
            Verdict::Inconclusive => {
                log::trace!("csidh validation sample {samples} inconclusive");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::BASE_CURVE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use velu_core::PrimeField;

    #[test]
    fn test_base_curve_is_supersingular() {
        let mut rng = StdRng::seed_from_u64(11);
        let pk = PublicKey::from_coefficient(BASE_CURVE);
        assert!(validate(&pk, &mut rng).unwrap());
    }

    #[test]
    fn test_ordinary_curve_rejected() {
        let mut rng = StdRng::seed_from_u64(12);
        let pk = PublicKey::from_coefficient(Fp511::from_u64(5));
        assert!(!validate(&pk, &mut rng).unwrap());
    }
}
