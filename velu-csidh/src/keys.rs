//! CSIDH-512 key types and their byte encodings.

use crate::fp::Fp511;
use crate::params::{MAX_EXPONENT, NUM_PRIMES, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE};
use rand_core::TryCryptoRng;
use subtle::ConstantTimeEq;
use velu_core::{Error, Field, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Private key: one exponent in `[-5, 5]` per prime.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    exponents: [i8; NUM_PRIMES],
}

impl PrivateKey {
    /// Sample a private key.
    ///
    /// Each exponent is a uniformly random byte, read as signed and kept
    /// only when it lies in `[-5, 5]`.
    pub fn generate<R: TryCryptoRng + ?Sized>(rng: &mut R) -> Result<Self> {
        let mut exponents = [0i8; NUM_PRIMES];
        let mut buf = [0u8; 64];
        let mut i = 0;
        while i < NUM_PRIMES {
            rng.try_fill_bytes(&mut buf)
                .map_err(|_| Error::RandomnessFailure)?;
            for &b in buf.iter() {
                let e = b as i8;
                if i < NUM_PRIMES && (-MAX_EXPONENT..=MAX_EXPONENT).contains(&e) {
                    exponents[i] = e;
                    i += 1;
                }
            }
        }
        buf.zeroize();
        Ok(Self { exponents })
    }

    /// Build a key from explicit exponents.
    ///
    /// Fails with [`Error::EncodingError`] if any exponent exceeds 5 in magnitude.
    pub fn from_exponents(exponents: [i8; NUM_PRIMES]) -> Result<Self> {
        if exponents.iter().any(|e| e.unsigned_abs() > MAX_EXPONENT as u8) {
            return Err(Error::EncodingError);
        }
        Ok(Self { exponents })
    }

    /// The exponent vector.
    pub fn exponents(&self) -> &[i8; NUM_PRIMES] {
        &self.exponents
    }

    /// Decode 37 bytes of packed signed nibbles.
    ///
    /// Exponent `2j` sits in the low nibble of byte `j`, exponent `2j + 1`
    /// in the high nibble.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(Error::InvalidKeyLength {
                expected: PRIVATE_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let mut exponents = [0i8; NUM_PRIMES];
        for (j, &b) in bytes.iter().enumerate() {
            // Sign-extend each 4-bit field.
            exponents[2 * j] = ((b << 4) as i8) >> 4;
            exponents[2 * j + 1] = (b as i8) >> 4;
        }
        let key = Self::from_exponents(exponents);
        exponents.zeroize();
        key
    }

    /// Encode as 37 bytes of packed signed nibbles.
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_SIZE] {
        let mut out = [0u8; PRIVATE_KEY_SIZE];
        for (j, byte) in out.iter_mut().enumerate() {
            let lo = self.exponents[2 * j] as u8 & 0x0f;
            let hi = self.exponents[2 * j + 1] as u8 & 0x0f;
            *byte = lo | (hi << 4);
        }
        out
    }
}

/// Public key: the affine Montgomery coefficient `A` of a supersingular curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey {
    a: Fp511,
}

impl PublicKey {
    pub(crate) fn from_coefficient(a: Fp511) -> Self {
        Self { a }
    }

    /// The curve coefficient.
    pub fn coefficient(&self) -> &Fp511 {
        &self.a
    }

    /// Decode 64 little-endian bytes.
    ///
    /// Rejects values not below `p` and the singular coefficients `±2`.
    /// This does not prove supersingularity; use [`validate()`](crate::validate()) for that.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(Error::InvalidKeyLength {
                expected: PUBLIC_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let a: Option<Fp511> = Fp511::from_bytes(bytes).into();
        let a = a.ok_or(Error::InvalidPublicKey)?;
        let two = Fp511::ONE.double();
        if bool::from(a.ct_eq(&two) | a.ct_eq(&-two)) {
            return Err(Error::InvalidPublicKey);
        }
        Ok(Self { a })
    }

    /// Encode as 64 little-endian bytes.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        let mut out = [0u8; PUBLIC_KEY_SIZE];
        self.a.to_bytes(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let sk = PrivateKey::generate(&mut rng).unwrap();
        assert!(sk.exponents().iter().all(|e| (-5..=5).contains(e)));
        assert!(sk.exponents().iter().any(|&e| e != 0));
    }

    #[test]
    fn test_nibble_layout() {
        let mut exps = [0i8; NUM_PRIMES];
        exps[0] = -1;
        exps[1] = 3;
        exps[73] = -5;
        let sk = PrivateKey::from_exponents(exps).unwrap();
        let bytes = sk.to_bytes();
        assert_eq!(bytes[0], 0x3f);
        assert_eq!(bytes[36], 0xb0);

        let back = PrivateKey::from_bytes(&bytes).unwrap();
        assert_eq!(back.exponents(), &exps);
    }

    #[test]
    fn test_reject_out_of_range_nibble() {
        let mut bytes = [0u8; PRIVATE_KEY_SIZE];
        bytes[4] = 0x06;
        assert_eq!(
            PrivateKey::from_bytes(&bytes).err(),
            Some(Error::EncodingError)
        );
        bytes[4] = 0x0a; // -6
        assert!(PrivateKey::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_private_key_length() {
        assert_eq!(
            PrivateKey::from_bytes(&[0u8; 36]).err(),
            Some(Error::InvalidKeyLength {
                expected: 37,
                actual: 36
            })
        );
    }

    #[test]
    fn test_public_key_rejects_bad_values() {
        let mut two = [0u8; 64];
        two[0] = 2;
        assert_eq!(PublicKey::from_bytes(&two), Err(Error::InvalidPublicKey));

        let mut minus_two = [0u8; 64];
        (-Fp511::ONE.double()).to_bytes(&mut minus_two);
        assert_eq!(
            PublicKey::from_bytes(&minus_two),
            Err(Error::InvalidPublicKey)
        );

        let max = [0xffu8; 64];
        assert_eq!(PublicKey::from_bytes(&max), Err(Error::InvalidPublicKey));

        let zero = [0u8; 64];
        let pk = PublicKey::from_bytes(&zero).unwrap();
        assert_eq!(pk.to_bytes(), zero);
    }
}
