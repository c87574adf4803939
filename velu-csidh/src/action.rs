//! The CSIDH class-group action.
//!
//! Exponents are split by sign into two sides. Points whose x-coordinate
//! lands on the curve drive the positive side, points on the quadratic twist
//! the negative side. Each pass over the primes runs the same sequence of
//! ladders and isogeny computations whatever the exponents are; whether a
//! step takes effect is decided by constant-time selection.

use crate::fp::Fp511;
use crate::keys::PrivateKey;
use crate::params::{NUM_PRIMES, PRIMES, SCALAR_BITS};
use crate::uint::U512;
use rand_core::TryCryptoRng;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use velu_core::montgomery::scalar_mul;
use velu_core::{
    Error, Field, Isogeny, OddIsogeny, PrimeField, ProjectiveCurve, ProjectivePoint, Result,
};
use zeroize::Zeroize;

/// Sample a uniform field element by rejection.
pub(crate) fn random_fp<R: TryCryptoRng + ?Sized>(rng: &mut R) -> Result<Fp511> {
    let mut buf = [0u8; 64];
    loop {
        rng.try_fill_bytes(&mut buf)
            .map_err(|_| Error::RandomnessFailure)?;
        buf[63] &= 0x7f;
        let x: Option<Fp511> = Fp511::from_bytes(&buf).into();
        if let Some(x) = x {
            return Ok(x);
        }
    }
}

/// Remaining work for one sign of the exponent vector.
#[derive(Zeroize)]
struct Side {
    /// Remaining exponent magnitude per prime.
    remaining: [u8; NUM_PRIMES],
    /// Cofactor clearing every prime this side no longer needs, times 4.
    cofactor: U512,
}

impl Side {
    fn new(exponents: &[i8; NUM_PRIMES], negative: bool) -> Self {
        let mut remaining = [0u8; NUM_PRIMES];
        let mut cofactor = U512::from_u64(4);
        for (i, (&e, r)) in exponents.iter().zip(remaining.iter_mut()).enumerate() {
            let flip = Choice::from(negative as u8);
            let signed = i8::conditional_select(&e, &e.wrapping_neg(), flip);
            // Keep only this side's sign.
            let on_side = Choice::from(((signed as u8) >> 7) ^ 1);
            *r = u8::conditional_select(&0, &(signed as u8), on_side);
            let idle = r.ct_eq(&0);
            cofactor = U512::conditional_select(&cofactor, &cofactor.mul_small(PRIMES[i]), idle);
        }
        Self {
            remaining,
            cofactor,
        }
    }

    fn done(&self) -> bool {
        self.remaining.iter().all(|&r| r == 0)
    }
}

/// Apply the class-group element encoded by `sk` to the curve with affine
/// coefficient `a`, returning the affine coefficient of the result.
///
/// Terminates after an expected constant number of resampling rounds.
pub fn group_action<R: TryCryptoRng + ?Sized>(
    a: &Fp511,
    sk: &PrivateKey,
    rng: &mut R,
) -> Result<Fp511> {
    let mut sides = [
        Side::new(sk.exponents(), false),
        Side::new(sk.exponents(), true),
    ];
    let mut curve = ProjectiveCurve::from_affine(*a);

    while !(sides[0].done() && sides[1].done()) {
        let x = random_fp(rng)?;
        let rhs = x * (x.square() + curve.a * x + Fp511::ONE);
        let side = if bool::from(rhs.is_square()) { 0 } else { 1 };
        if sides[side].done() {
            continue;
        }
        let state = &mut sides[side];

        let mut point = scalar_mul(
            &ProjectivePoint::from_affine(x),
            &curve.a24_plus(),
            &state.cofactor.to_le_bytes(),
            SCALAR_BITS,
        );

        for i in (0..NUM_PRIMES).rev() {
            let mut cof = U512::ONE;
            for j in 0..i {
                let pending = !state.remaining[j].ct_eq(&0);
                cof = U512::conditional_select(&cof, &cof.mul_small(PRIMES[j]), pending);
            }
            let kernel = scalar_mul(&point, &curve.a24_plus(), &cof.to_le_bytes(), SCALAR_BITS);

            let pending = !state.remaining[i].ct_eq(&0);
            let apply = pending & !kernel.is_identity();

            let phi = OddIsogeny::generate(&curve, &kernel, PRIMES[i]);
            curve = ProjectiveCurve::conditional_select(&curve, &phi.codomain(), apply);
            point = ProjectivePoint::conditional_select(&point, &phi.evaluate(&point), apply);

            state.remaining[i] = state.remaining[i].wrapping_sub(apply.unwrap_u8());
            let finished = apply & state.remaining[i].ct_eq(&0);
            state.cofactor = U512::conditional_select(
                &state.cofactor,
                &state.cofactor.mul_small(PRIMES[i]),
                finished,
            );
        }

        curve = ProjectiveCurve::from_affine(curve.to_affine());
    }

    sides.zeroize();
    Ok(curve.a)
}
