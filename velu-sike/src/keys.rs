//! SIDH and SIKE key types and their byte encodings.

use crate::fp::Fp2;
use crate::params::{
    self, FP2_BYTES, MSG_LEN, PUBLIC_KEY_SIZE, SECRET_BITS_A, SECRET_BITS_B, SECRET_BYTES_A,
    SECRET_BYTES_B, SHARED_SECRET_SIZE,
};
use crate::walk::{public_points, shared_j, SideA, SideB};
use rand_core::TryCryptoRng;
use velu_core::{Error, Field, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Which role a key plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyVariant {
    /// SIDH side A: 4-isogenies, 216-bit even scalar.
    SidhA,
    /// SIDH side B: 3-isogenies, scalar a multiple of 3 below `3 · 2^215`.
    SidhB,
    /// SIKE recipient: a side B key plus the implicit-rejection string `S`.
    Sike,
}

impl KeyVariant {
    /// Size of an exported private key of this variant.
    pub const fn private_key_size(self) -> usize {
        match self {
            Self::SidhA => SECRET_BYTES_A,
            Self::SidhB => SECRET_BYTES_B,
            Self::Sike => SECRET_BYTES_B + MSG_LEN,
        }
    }

    pub(crate) const fn is_side_a(self) -> bool {
        matches!(self, Self::SidhA)
    }

    const fn scalar_len(self) -> usize {
        if self.is_side_a() {
            SECRET_BYTES_A
        } else {
            SECRET_BYTES_B
        }
    }

    const fn scalar_bits(self) -> usize {
        if self.is_side_a() {
            SECRET_BITS_A
        } else {
            SECRET_BITS_B
        }
    }
}

/// Private key: a secret scalar and, for [`KeyVariant::Sike`], the string `S`.
///
/// Side A keys use the first 27 scalar bytes; the last byte stays zero.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    #[zeroize(skip)]
    variant: KeyVariant,
    scalar: [u8; SECRET_BYTES_B],
    s: [u8; MSG_LEN],
}

impl PrivateKey {
    /// Sample a private key.
    ///
    /// Side A scalars are uniform below `2^216` with bit 0 cleared. Side B
    /// scalars are `3m` for `m` uniform below `2^215`.
    pub fn generate<R: TryCryptoRng + ?Sized>(variant: KeyVariant, rng: &mut R) -> Result<Self> {
        let mut key = Self {
            variant,
            scalar: [0u8; SECRET_BYTES_B],
            s: [0u8; MSG_LEN],
        };

        match variant {
            KeyVariant::SidhA => {
                rng.try_fill_bytes(&mut key.scalar[..SECRET_BYTES_A])
                    .map_err(|_| Error::RandomnessFailure)?;
                key.scalar[0] &= 0xfe;
            }
            KeyVariant::SidhB | KeyVariant::Sike => {
                rng.try_fill_bytes(&mut key.scalar[..SECRET_BYTES_A])
                    .map_err(|_| Error::RandomnessFailure)?;
                key.scalar[SECRET_BYTES_A - 1] &= 0x7f;
                triple(&mut key.scalar);
            }
        }

        if variant == KeyVariant::Sike {
            rng.try_fill_bytes(&mut key.s)
                .map_err(|_| Error::RandomnessFailure)?;
        }

        Ok(key)
    }

    /// Decode `scalar || S` (the `S` part only for [`KeyVariant::Sike`]).
    ///
    /// Bits above the scalar's bit length are cleared.
    pub fn from_bytes(variant: KeyVariant, bytes: &[u8]) -> Result<Self> {
        let expected = variant.private_key_size();
        if bytes.len() != expected {
            return Err(Error::InvalidKeyLength {
                expected,
                actual: bytes.len(),
            });
        }

        let len = variant.scalar_len();
        let mut key = Self {
            variant,
            scalar: [0u8; SECRET_BYTES_B],
            s: [0u8; MSG_LEN],
        };
        key.scalar[..len].copy_from_slice(&bytes[..len]);
        let spare = 8 * len - variant.scalar_bits();
        key.scalar[len - 1] &= 0xff >> spare;
        if variant == KeyVariant::Sike {
            key.s.copy_from_slice(&bytes[len..]);
        }
        Ok(key)
    }

    /// Encode into `out`, which must be exactly [`KeyVariant::private_key_size`] bytes.
    pub fn export(&self, out: &mut [u8]) -> Result<()> {
        let expected = self.size();
        if out.len() != expected {
            return Err(Error::InvalidKeyLength {
                expected,
                actual: out.len(),
            });
        }
        let len = self.variant.scalar_len();
        out[..len].copy_from_slice(&self.scalar[..len]);
        if self.variant == KeyVariant::Sike {
            out[len..].copy_from_slice(&self.s);
        }
        Ok(())
    }

    /// Exported size in bytes.
    pub fn size(&self) -> usize {
        self.variant.private_key_size()
    }

    /// The key's role.
    pub fn variant(&self) -> KeyVariant {
        self.variant
    }

    pub(crate) fn scalar(&self) -> &[u8] {
        &self.scalar[..self.variant.scalar_len()]
    }

    pub(crate) fn rejection_string(&self) -> &[u8; MSG_LEN] {
        &self.s
    }

    /// Walk the secret isogeny from `E₆` and publish the images of the
    /// other side's torsion basis.
    pub fn public_key(&self) -> PublicKey {
        params::self_check();
        let coords = if self.variant.is_side_a() {
            public_points::<SideA>(self.scalar())
        } else {
            public_points::<SideB>(self.scalar())
        };
        PublicKey {
            variant: self.variant,
            coords,
        }
    }
}

/// Multiply a little-endian scalar by 3 in place.
fn triple(scalar: &mut [u8]) {
    let mut carry = 0u16;
    for byte in scalar.iter_mut() {
        let t = 3 * u16::from(*byte) + carry;
        *byte = t as u8;
        carry = t >> 8;
    }
}

/// Public key: affine `x(φ(P))`, `x(φ(Q))`, `x(φ(Q - P))` on the image curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey {
    variant: KeyVariant,
    coords: [Fp2; 3],
}

impl PublicKey {
    /// Decode three 110-byte 𝔽p² elements.
    ///
    /// Rejects any component that is not a canonical encoding.
    pub fn from_bytes(variant: KeyVariant, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(Error::InvalidKeyLength {
                expected: PUBLIC_KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let mut coords = [Fp2::ZERO; 3];
        for (x, chunk) in coords.iter_mut().zip(bytes.chunks_exact(FP2_BYTES)) {
            let decoded: Option<Fp2> = Fp2::from_bytes(chunk).into();
            *x = decoded.ok_or(Error::InvalidPublicKey)?;
        }
        Ok(Self { variant, coords })
    }

    /// Encode as 330 bytes.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        let mut out = [0u8; PUBLIC_KEY_SIZE];
        for (x, chunk) in self.coords.iter().zip(out.chunks_exact_mut(FP2_BYTES)) {
            x.to_bytes(chunk);
        }
        out
    }

    /// The key's role.
    pub fn variant(&self) -> KeyVariant {
        self.variant
    }

    pub(crate) fn coords(&self) -> &[Fp2; 3] {
        &self.coords
    }
}

/// Raw SIDH shared secret: the encoded j-invariant of the common curve.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SidhSharedSecret {
    bytes: [u8; SHARED_SECRET_SIZE],
}

impl AsRef<[u8]> for SidhSharedSecret {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Combine a private key with a public key from the opposite side.
///
/// Fails with [`Error::WrongKeyVariant`] when both keys belong to the same side.
pub fn derive_secret(sk: &PrivateKey, pk: &PublicKey) -> Result<SidhSharedSecret> {
    if sk.variant.is_side_a() == pk.variant.is_side_a() {
        log::debug!(
            "sidh: refusing to combine {:?} private key with {:?} public key",
            sk.variant,
            pk.variant
        );
        return Err(Error::WrongKeyVariant);
    }
    params::self_check();

    let mut j = if sk.variant.is_side_a() {
        shared_j::<SideA>(sk.scalar(), pk.coords())
    } else {
        shared_j::<SideB>(sk.scalar(), pk.coords())
    };
    let mut bytes = [0u8; SHARED_SECRET_SIZE];
    j.to_bytes(&mut bytes);
    j.zeroize();
    Ok(SidhSharedSecret { bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_triple() {
        let mut s = [0xffu8, 0xff, 0x00];
        triple(&mut s);
        // 0xffff * 3 = 0x02fffd
        assert_eq!(s, [0xfd, 0xff, 0x02]);
    }

    #[test]
    fn test_generate_shapes() {
        let mut rng = StdRng::seed_from_u64(1);

        let a = PrivateKey::generate(KeyVariant::SidhA, &mut rng).unwrap();
        assert_eq!(a.scalar()[0] & 1, 0);
        assert_eq!(a.scalar().len(), SECRET_BYTES_A);

        let b = PrivateKey::generate(KeyVariant::SidhB, &mut rng).unwrap();
        let sum: u32 = b.scalar().iter().map(|&x| u32::from(x)).sum();
        // 256 ≡ 1 (mod 3), so the byte sum has the same residue.
        assert_eq!(sum % 3, 0);
        assert!(b.scalar()[SECRET_BYTES_B - 1] <= 1);
        assert_eq!(b.rejection_string(), &[0u8; MSG_LEN]);

        let k = PrivateKey::generate(KeyVariant::Sike, &mut rng).unwrap();
        assert_ne!(k.rejection_string(), &[0u8; MSG_LEN]);
    }

    #[test]
    fn test_private_key_export_layout() {
        let mut bytes = [0u8; SECRET_BYTES_B + MSG_LEN];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8 + 1;
        }
        let sk = PrivateKey::from_bytes(KeyVariant::Sike, &bytes).unwrap();
        assert_eq!(sk.size(), 52);
        assert_eq!(&sk.rejection_string()[..], &bytes[SECRET_BYTES_B..]);

        let mut out = [0u8; 52];
        sk.export(&mut out).unwrap();
        // Byte 27 (value 28) loses everything above bit 216.
        assert_eq!(out[27], 0);
        assert_eq!(out[..27], bytes[..27]);
        assert_eq!(out[28..], bytes[28..]);
    }

    #[test]
    fn test_private_key_lengths() {
        assert_eq!(
            PrivateKey::from_bytes(KeyVariant::SidhA, &[0u8; 28]).err(),
            Some(Error::InvalidKeyLength {
                expected: 27,
                actual: 28
            })
        );
        let sk = PrivateKey::from_bytes(KeyVariant::SidhB, &[0u8; 28]).unwrap();
        let mut short = [0u8; 27];
        assert!(matches!(
            sk.export(&mut short),
            Err(Error::InvalidKeyLength { .. })
        ));
    }

    #[test]
    fn test_public_key_rejects_non_canonical() {
        let mut bytes = [0u8; PUBLIC_KEY_SIZE];
        assert!(PublicKey::from_bytes(KeyVariant::SidhA, &bytes).is_ok());
        bytes[FP2_BYTES + 54] = 0xff;
        assert_eq!(
            PublicKey::from_bytes(KeyVariant::SidhA, &bytes),
            Err(Error::InvalidPublicKey)
        );
        assert!(matches!(
            PublicKey::from_bytes(KeyVariant::SidhA, &bytes[1..]),
            Err(Error::InvalidKeyLength { .. })
        ));
    }

    #[test]
    fn test_same_side_rejected() {
        let sk = PrivateKey::from_bytes(KeyVariant::SidhB, &[3u8; 28]).unwrap();
        let pk = PublicKey::from_bytes(KeyVariant::Sike, &[0u8; PUBLIC_KEY_SIZE]).unwrap();
        assert_eq!(derive_secret(&sk, &pk).err(), Some(Error::WrongKeyVariant));
    }
}
