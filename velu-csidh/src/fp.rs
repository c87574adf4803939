//! The CSIDH-512 base field.

use crate::params::{INV, MODULUS, R, R2};

velu_core::define_prime_field! {
    /// Element of 𝔽p for the CSIDH-512 prime, in Montgomery form.
    name: Fp511,
    limbs: 8,
    bytes: 64,
    modulus: MODULUS,
    r: R,
    r2: R2,
    inv: INV,
}

#[cfg(test)]
mod tests {
    use super::*;
    use velu_core::{Field, PrimeField};

    #[test]
    fn test_minus_one_is_not_square() {
        assert!(!bool::from((-Fp511::ONE).is_square()));
    }

    #[test]
    fn test_invert() {
        let x = Fp511::from_u64(0xdead_beef);
        assert_eq!(x * x.invert(), Fp511::ONE);
    }

    #[test]
    fn test_p_minus_one_encoding() {
        let mut bytes = [0u8; 64];
        (-Fp511::ONE).to_bytes(&mut bytes);
        assert_eq!(bytes[0], 0x7a);
        assert_eq!(bytes[63], 0x65);
    }
}
