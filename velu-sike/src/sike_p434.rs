//! SIKEp434 key encapsulation mechanism.

use crate::kem::{decapsulate, encapsulate};
use crate::keys::{KeyVariant, PrivateKey, PublicKey};
use crate::params::{
    CIPHERTEXT_SIZE, DECAPSULATION_KEY_SIZE, KEM_SIZE, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE,
};
use rand_core::TryCryptoRng;
use velu_core::{Error, Kem, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// SIKEp434 decapsulation key: private key export followed by the public key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DecapsulationKey {
    bytes: [u8; DECAPSULATION_KEY_SIZE],
}

impl DecapsulationKey {
    /// Create a decapsulation key from bytes.
    ///
    /// The embedded public key must be canonically encoded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != DECAPSULATION_KEY_SIZE {
            return Err(Error::InvalidKeyLength {
                expected: DECAPSULATION_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        PublicKey::from_bytes(KeyVariant::Sike, &bytes[PRIVATE_KEY_SIZE..])?;
        let mut key = [0u8; DECAPSULATION_KEY_SIZE];
        key.copy_from_slice(bytes);
        Ok(Self { bytes: key })
    }

    /// Get the key as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn split(&self) -> Result<(PrivateKey, PublicKey)> {
        let sk = PrivateKey::from_bytes(KeyVariant::Sike, &self.bytes[..PRIVATE_KEY_SIZE])?;
        let pk = PublicKey::from_bytes(KeyVariant::Sike, &self.bytes[PRIVATE_KEY_SIZE..])?;
        Ok((sk, pk))
    }
}

/// SIKEp434 encapsulation key.
#[derive(Clone)]
pub struct EncapsulationKey {
    bytes: [u8; PUBLIC_KEY_SIZE],
}

impl EncapsulationKey {
    /// Create an encapsulation key from bytes.
    ///
    /// Fails with [`Error::InvalidPublicKey`] for non-canonical coordinates.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let pk = PublicKey::from_bytes(KeyVariant::Sike, bytes)?;
        Ok(Self {
            bytes: pk.to_bytes(),
        })
    }

    /// Get the key as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// SIKEp434 ciphertext.
#[derive(Clone)]
pub struct Ciphertext {
    bytes: [u8; CIPHERTEXT_SIZE],
}

impl Ciphertext {
    /// Create a ciphertext from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != CIPHERTEXT_SIZE {
            return Err(Error::InvalidCiphertextLength {
                expected: CIPHERTEXT_SIZE,
                actual: bytes.len(),
            });
        }
        let mut ct = [0u8; CIPHERTEXT_SIZE];
        ct.copy_from_slice(bytes);
        Ok(Self { bytes: ct })
    }

    /// Get the ciphertext as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// SIKEp434 shared secret.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: [u8; KEM_SIZE],
}

impl AsRef<[u8]> for SharedSecret {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// SIKEp434 key encapsulation mechanism.
///
/// Targets NIST security level 1.
pub struct SikeP434;

impl Kem for SikeP434 {
    type DecapsulationKey = DecapsulationKey;
    type EncapsulationKey = EncapsulationKey;
    type Ciphertext = Ciphertext;
    type SharedSecret = SharedSecret;

    const DECAPSULATION_KEY_SIZE: usize = DECAPSULATION_KEY_SIZE;
    const ENCAPSULATION_KEY_SIZE: usize = PUBLIC_KEY_SIZE;
    const CIPHERTEXT_SIZE: usize = CIPHERTEXT_SIZE;
    const SHARED_SECRET_SIZE: usize = KEM_SIZE;

    fn keygen<R: TryCryptoRng + ?Sized>(
        rng: &mut R,
    ) -> Result<(Self::DecapsulationKey, Self::EncapsulationKey)> {
        let sk = PrivateKey::generate(KeyVariant::Sike, rng)?;
        let pk = sk.public_key().to_bytes();

        let mut dk = DecapsulationKey {
            bytes: [0u8; DECAPSULATION_KEY_SIZE],
        };
        sk.export(&mut dk.bytes[..PRIVATE_KEY_SIZE])?;
        dk.bytes[PRIVATE_KEY_SIZE..].copy_from_slice(&pk);
        Ok((dk, EncapsulationKey { bytes: pk }))
    }

    fn encaps<R: TryCryptoRng + ?Sized>(
        ek: &Self::EncapsulationKey,
        rng: &mut R,
    ) -> Result<(Self::Ciphertext, Self::SharedSecret)> {
        let pk = PublicKey::from_bytes(KeyVariant::Sike, &ek.bytes)?;
        let (ct, ss) = encapsulate(&pk, rng)?;
        Ok((Ciphertext { bytes: ct }, SharedSecret { bytes: *ss }))
    }

    fn decaps(dk: &Self::DecapsulationKey, ct: &Self::Ciphertext) -> Result<Self::SharedSecret> {
        let (sk, pk) = dk.split()?;
        let ss = decapsulate(&sk, &pk, &ct.bytes)?;
        Ok(SharedSecret { bytes: *ss })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_key_sizes() {
        assert_eq!(SikeP434::DECAPSULATION_KEY_SIZE, 382);
        assert_eq!(SikeP434::ENCAPSULATION_KEY_SIZE, 330);
        assert_eq!(SikeP434::CIPHERTEXT_SIZE, 354);
        assert_eq!(SikeP434::SHARED_SECRET_SIZE, 16);
    }

    #[test]
    fn test_round_trip() {
        let mut rng = StdRng::seed_from_u64(434);
        let (dk, ek) = SikeP434::keygen(&mut rng).unwrap();
        let (ct, ss) = SikeP434::encaps(&ek, &mut rng).unwrap();
        let ss2 = SikeP434::decaps(&dk, &ct).unwrap();
        assert_eq!(ss.as_ref(), ss2.as_ref());
        assert_eq!(&dk.as_bytes()[PRIVATE_KEY_SIZE..], ek.as_bytes());
    }

    #[test]
    fn test_encapsulation_key_invalid_length() {
        let bytes = [0u8; 100];
        let result = EncapsulationKey::from_bytes(&bytes);
        assert!(matches!(result, Err(Error::InvalidKeyLength { .. })));
    }

    #[test]
    fn test_encapsulation_key_non_canonical() {
        let bytes = [0xffu8; PUBLIC_KEY_SIZE];
        let result = EncapsulationKey::from_bytes(&bytes);
        assert!(matches!(result, Err(Error::InvalidPublicKey)));
    }

    #[test]
    fn test_ciphertext_invalid_length() {
        let result = Ciphertext::from_bytes(&[0u8; CIPHERTEXT_SIZE + 1]);
        assert!(matches!(
            result,
            Err(Error::InvalidCiphertextLength { .. })
        ));
    }
}
