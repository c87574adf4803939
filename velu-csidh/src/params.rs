//! CSIDH-512 parameter set.
//!
//! `p = 4 · ℓ₀ · ℓ₁ ⋯ ℓ₇₃ - 1`, a 511-bit prime with `p ≡ 3 (mod 4)`.

use crate::fp::Fp511;
use crate::uint::U512;
use once_cell::race::OnceBool;
use velu_core::limbs::ct_lt;
use velu_core::{Field, PrimeField};

/// Number of small primes in the class-group action.
pub const NUM_PRIMES: usize = 74;

/// The small odd primes ℓᵢ dividing `(p + 1) / 4`, in increasing order.
pub const PRIMES: [u64; NUM_PRIMES] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307,
    311, 313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 587,
];

/// Largest exponent magnitude in a private key.
pub const MAX_EXPONENT: i8 = 5;

/// Private key size in bytes: one signed nibble per prime.
pub const PRIVATE_KEY_SIZE: usize = NUM_PRIMES / 2;

/// Public key size in bytes: the affine Montgomery coefficient.
pub const PUBLIC_KEY_SIZE: usize = 64;

/// Shared secret size in bytes.
pub const SHARED_SECRET_SIZE: usize = 64;

/// Bit length used for all secret-dependent ladders.
pub const SCALAR_BITS: usize = 512;

/// Field modulus, little-endian limbs.
pub const MODULUS: [u64; 8] = [
    0x1b81b90533c6c87b,
    0xc2721bf457aca835,
    0x516730cc1f0b4f25,
    0xa7aac6c567f35507,
    0x5afbfcc69322c9cd,
    0xb42d083aedc88c42,
    0xfc8ab0d15e3e4c4a,
    0x65b48e8f740f89bf,
];

/// `2^512 mod p`.
pub const R: [u64; 8] = [
    0xc8fc8df598726f0a,
    0x7b1bc81750a6af95,
    0x5d319e67c1e961b4,
    0xb0aa7275301955f1,
    0x4a080672d9ba6c64,
    0x97a5ef8a246ee77b,
    0x06ea9e5d4383676a,
    0x3496e2e117e0ec80,
];

/// `2^1024 mod p`.
pub const R2: [u64; 8] = [
    0x36905b572ffc1724,
    0x67086f4525f1f27d,
    0x4faf3fbfd22370ca,
    0x192ea214bcc584b1,
    0x5dae03ee2f5de3d0,
    0x1e9248731776b371,
    0xad5f166e20e4f52d,
    0x4ed759aea6f3917e,
];

/// `-p^(-1) mod 2^64`.
pub const INV: u64 = 0x66c1301f632e294d;

/// `⌊√(16p)⌋ = ⌊4√p⌋`. A point whose known order exceeds this proves the
/// curve supersingular.
pub const FOUR_SQRT_P: U512 = U512::from_limbs([
    0x17895e71e1a20b3f,
    0x38d0cd95f8636a56,
    0x142b9541e59682cd,
    0x856f1399d91d6592,
    0x0000000000000002,
    0,
    0,
    0,
]);

/// Montgomery coefficient of the starting curve `y² = x³ + x`.
pub const BASE_CURVE: Fp511 = Fp511::ZERO;

/// `s = ⌊√(16p)⌋`, i.e. `s² ≤ 16p < (s + 1)²`.
fn sqrt_bound_holds(s: &U512) -> bool {
    let sixteen_p = U512::from_limbs(MODULUS).mul_wide(&U512::from_u64(16));
    let next = s.add_small(1);
    let below = !ct_lt(&sixteen_p, &s.mul_wide(s));
    let above = ct_lt(&sixteen_p, &next.mul_wide(&next));
    bool::from(below & above)
}

static SELF_CHECK: OnceBool = OnceBool::new();

/// Verify the constant tables once per process.
///
/// # Panics
/// Panics if the tables are inconsistent; this indicates a corrupted build.
pub fn self_check() {
    SELF_CHECK.get_or_init(|| {
        let mut order = U512::from_u64(4);
        for &l in PRIMES.iter() {
            order = order.mul_small(l);
        }
        let p_plus_one = U512::from_limbs(MODULUS).add_small(1);
        assert!(order == p_plus_one, "csidh: p + 1 != 4 * prod(primes)");
        assert_eq!(
            INV.wrapping_mul(MODULUS[0]),
            u64::MAX,
            "csidh: bad Montgomery inverse"
        );
        assert!(
            Fp511::from_u64(1) == Fp511::ONE,
            "csidh: inconsistent Montgomery constants"
        );
        assert!(
            sqrt_bound_holds(&FOUR_SQRT_P),
            "csidh: bad supersingularity bound"
        );
        log::debug!("csidh-512 parameter self-check passed");
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_check_passes() {
        self_check();
        self_check();
    }

    #[test]
    fn test_primes_sorted_and_odd() {
        assert!(PRIMES.windows(2).all(|w| w[0] < w[1]));
        assert!(PRIMES.iter().all(|l| l % 2 == 1));
        assert_eq!(PRIVATE_KEY_SIZE, 37);
    }

    #[test]
    fn test_threshold_bit_length() {
        assert_eq!(FOUR_SQRT_P.bits(), 258);
    }

    #[test]
    fn test_threshold_is_floor_sqrt() {
        assert!(sqrt_bound_holds(&FOUR_SQRT_P));
        assert!(!sqrt_bound_holds(&FOUR_SQRT_P.add_small(1)));
        let below = U512::from_limbs([
            0x17895e71e1a20b3e,
            0x38d0cd95f8636a56,
            0x142b9541e59682cd,
            0x856f1399d91d6592,
            0x0000000000000002,
            0,
            0,
            0,
        ]);
        assert!(!sqrt_bound_holds(&below));
    }
}
