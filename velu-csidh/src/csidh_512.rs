//! CSIDH-512 key agreement.

use crate::action::group_action;
use crate::keys::{PrivateKey, PublicKey};
use crate::params::{self, BASE_CURVE, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, SHARED_SECRET_SIZE};
use crate::validate::validate;
use rand_core::TryCryptoRng;
use velu_core::{Error, Field, KeyAgreement, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// CSIDH-512 shared secret: the encoded coefficient of the common curve.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: [u8; SHARED_SECRET_SIZE],
}

impl AsRef<[u8]> for SharedSecret {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl PrivateKey {
    /// Act on the base curve to obtain the matching public key.
    pub fn public_key<R: TryCryptoRng + ?Sized>(&self, rng: &mut R) -> Result<PublicKey> {
        params::self_check();
        let a = group_action(&BASE_CURVE, self, rng)?;
        Ok(PublicKey::from_coefficient(a))
    }
}

/// CSIDH-512 non-interactive key agreement.
///
/// Keys are static: a public key can be reused with any number of peers,
/// which is why [`KeyAgreement::agree`] validates the peer key first.
pub struct Csidh512;

impl KeyAgreement for Csidh512 {
    type PrivateKey = PrivateKey;
    type PublicKey = PublicKey;
    type SharedSecret = SharedSecret;

    const PRIVATE_KEY_SIZE: usize = PRIVATE_KEY_SIZE;
    const PUBLIC_KEY_SIZE: usize = PUBLIC_KEY_SIZE;
    const SHARED_SECRET_SIZE: usize = SHARED_SECRET_SIZE;

    fn keygen<R: TryCryptoRng + ?Sized>(rng: &mut R) -> Result<(PrivateKey, PublicKey)> {
        let sk = PrivateKey::generate(rng)?;
        let pk = sk.public_key(rng)?;
        Ok((sk, pk))
    }

    fn agree<R: TryCryptoRng + ?Sized>(
        sk: &PrivateKey,
        peer: &PublicKey,
        rng: &mut R,
    ) -> Result<SharedSecret> {
        params::self_check();
        if !validate(peer, rng)? {
            return Err(Error::InvalidPublicKey);
        }
        let shared = group_action(peer.coefficient(), sk, rng)?;
        let mut bytes = [0u8; SHARED_SECRET_SIZE];
        shared.to_bytes(&mut bytes);
        Ok(SharedSecret { bytes })
    }
}
