//! The SIKEp434 base field and its quadratic extension.

use crate::params::{FP_BYTES, INV, MODULUS, R, R2};

velu_core::define_prime_field! {
    /// Element of 𝔽p for `p = 2^216 · 3^137 - 1`, in Montgomery form.
    name: Fp434,
    limbs: 7,
    bytes: FP_BYTES,
    modulus: MODULUS,
    r: R,
    r2: R2,
    inv: INV,
}

/// Element of 𝔽p² = 𝔽p(i).
pub type Fp2 = velu_core::Fp2<Fp434>;

#[cfg(test)]
mod tests {
    use super::*;
    use velu_core::{Field, PrimeField};

    #[test]
    fn test_minus_one_is_not_square() {
        assert!(!bool::from((-Fp434::ONE).is_square()));
    }

    #[test]
    fn test_ext_inverse() {
        let x = Fp2::new(Fp434::from_u64(3), Fp434::from_u64(1));
        assert_eq!(x * x.invert(), Fp2::ONE);
    }

    #[test]
    fn test_encoding_width() {
        let mut bytes = [0u8; 2 * FP_BYTES];
        (-Fp2::ONE).to_bytes(&mut bytes);
        // p - 1 ends in ...fffe, top byte 0x02.
        assert_eq!(bytes[0], 0xfe);
        assert_eq!(bytes[FP_BYTES - 1], 0x02);
        assert!(bytes[FP_BYTES..].iter().all(|&b| b == 0));
        assert_eq!(Fp2::from_bytes(&bytes).unwrap(), -Fp2::ONE);
    }
}
