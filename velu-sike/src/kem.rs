//! SIKE public-key encryption and the implicit-rejection KEM.
//!
//! - `encrypt`: `ct = pk_A(r) || (HMAC(j, F) ⊕ m)` for a fresh side A key `r`
//! - `encapsulate`: as above with `r = HMAC(m || pk, G)`, secret `HMAC(m || ct, H)`
//! - `decapsulate`: decrypt, re-encrypt, and on mismatch derive the secret
//!   from `S || ct` instead of `m || ct`

use crate::fp::Fp2;
use crate::hash::{labeled, F, G, H};
use crate::keys::{derive_secret, KeyVariant, PrivateKey, PublicKey};
use crate::params::{
    CIPHERTEXT_SIZE, FP2_BYTES, KEM_SIZE, MSG_LEN, PUBLIC_KEY_SIZE, SECRET_BYTES_A,
};
use rand_core::TryCryptoRng;
use subtle::{ConditionallySelectable, ConstantTimeEq};
use velu_core::{Error, Field, Result};
use zeroize::Zeroizing;

/// Mask `msg` under the SIDH secret shared by `ephemeral` and `pk`.
fn encrypt_with(
    ephemeral: &PrivateKey,
    pk: &PublicKey,
    msg: &[u8; MSG_LEN],
) -> Result<[u8; CIPHERTEXT_SIZE]> {
    let j = derive_secret(ephemeral, pk)?;
    let mut ct = [0u8; CIPHERTEXT_SIZE];
    ct[..PUBLIC_KEY_SIZE].copy_from_slice(&ephemeral.public_key().to_bytes());

    let masked = &mut ct[PUBLIC_KEY_SIZE..];
    labeled(&[j.as_ref()], &F, masked);
    for (c, m) in masked.iter_mut().zip(msg) {
        *c ^= m;
    }
    Ok(ct)
}

/// Recover the candidate message from `masked` given the ephemeral public key.
fn unmask(
    sk: &PrivateKey,
    ephemeral: &PublicKey,
    masked: &[u8],
) -> Result<Zeroizing<[u8; MSG_LEN]>> {
    let j = derive_secret(sk, ephemeral)?;
    let mut msg = Zeroizing::new([0u8; MSG_LEN]);
    labeled(&[j.as_ref()], &F, &mut msg[..]);
    for (m, c) in msg.iter_mut().zip(masked) {
        *m ^= c;
    }
    Ok(msg)
}

fn check_ciphertext(ct: &[u8]) -> Result<()> {
    if ct.len() != CIPHERTEXT_SIZE {
        return Err(Error::InvalidCiphertextLength {
            expected: CIPHERTEXT_SIZE,
            actual: ct.len(),
        });
    }
    Ok(())
}

/// Encrypt a `MSG_LEN`-byte message to a side B public key.
///
/// Fails with [`Error::InvalidMessageLength`] for any other message length
/// and [`Error::WrongKeyVariant`] for a side A key.
pub fn encrypt<R: TryCryptoRng + ?Sized>(
    pk: &PublicKey,
    msg: &[u8],
    rng: &mut R,
) -> Result<[u8; CIPHERTEXT_SIZE]> {
    let msg: &[u8; MSG_LEN] = msg.try_into().map_err(|_| Error::InvalidMessageLength {
        expected: MSG_LEN,
        actual: msg.len(),
    })?;
    if pk.variant().is_side_a() {
        return Err(Error::WrongKeyVariant);
    }
    let ephemeral = PrivateKey::generate(KeyVariant::SidhA, rng)?;
    encrypt_with(&ephemeral, pk, msg)
}

/// Decrypt a ciphertext produced by [`encrypt`].
///
/// Fails with [`Error::InvalidPublicKey`] when the embedded ephemeral key
/// is not canonically encoded.
pub fn decrypt(sk: &PrivateKey, ct: &[u8]) -> Result<Zeroizing<[u8; MSG_LEN]>> {
    check_ciphertext(ct)?;
    if sk.variant().is_side_a() {
        return Err(Error::WrongKeyVariant);
    }
    let ephemeral = PublicKey::from_bytes(KeyVariant::SidhA, &ct[..PUBLIC_KEY_SIZE])?;
    unmask(sk, &ephemeral, &ct[PUBLIC_KEY_SIZE..])
}

/// Ephemeral side A key for message `msg` sent to `pk`.
fn ephemeral_key(msg: &[u8], pk: &[u8; PUBLIC_KEY_SIZE]) -> Result<PrivateKey> {
    let mut r = Zeroizing::new([0u8; SECRET_BYTES_A]);
    labeled(&[msg, pk], &G, &mut r[..]);
    r[0] &= 0xfe;
    PrivateKey::from_bytes(KeyVariant::SidhA, &r[..])
}

/// Deterministic encapsulation of a chosen message.
pub(crate) fn encapsulate_with_message(
    pk: &PublicKey,
    msg: &[u8; MSG_LEN],
) -> Result<([u8; CIPHERTEXT_SIZE], Zeroizing<[u8; KEM_SIZE]>)> {
    if pk.variant() != KeyVariant::Sike {
        return Err(Error::WrongKeyVariant);
    }
    let ephemeral = ephemeral_key(msg, &pk.to_bytes())?;
    let ct = encrypt_with(&ephemeral, pk, msg)?;
    let mut ss = Zeroizing::new([0u8; KEM_SIZE]);
    labeled(&[msg, &ct], &H, &mut ss[..]);
    Ok((ct, ss))
}

/// Encapsulate a fresh shared secret to a [`KeyVariant::Sike`] public key.
pub fn encapsulate<R: TryCryptoRng + ?Sized>(
    pk: &PublicKey,
    rng: &mut R,
) -> Result<([u8; CIPHERTEXT_SIZE], Zeroizing<[u8; KEM_SIZE]>)> {
    let mut msg = Zeroizing::new([0u8; MSG_LEN]);
    rng.try_fill_bytes(&mut msg[..])
        .map_err(|_| Error::RandomnessFailure)?;
    encapsulate_with_message(pk, &msg)
}

/// Decapsulate with implicit rejection.
///
/// Any ciphertext of the right length yields a secret. If re-encryption
/// does not reproduce the ephemeral key, the secret is derived from the
/// private key's string `S` instead of the decrypted message, so a
/// tampered ciphertext gives an unrelated but deterministic value.
pub fn decapsulate(
    sk: &PrivateKey,
    pk: &PublicKey,
    ct: &[u8],
) -> Result<Zeroizing<[u8; KEM_SIZE]>> {
    check_ciphertext(ct)?;
    if sk.variant() != KeyVariant::Sike || pk.variant() != KeyVariant::Sike {
        return Err(Error::WrongKeyVariant);
    }

    // A non-canonical ephemeral key decodes to zero here and then fails
    // the re-encryption check below.
    let mut coords = [0u8; PUBLIC_KEY_SIZE];
    for (out, chunk) in coords
        .chunks_exact_mut(FP2_BYTES)
        .zip(ct[..PUBLIC_KEY_SIZE].chunks_exact(FP2_BYTES))
    {
        Fp2::from_bytes(chunk).unwrap_or(Fp2::ZERO).to_bytes(out);
    }
    let ephemeral = PublicKey::from_bytes(KeyVariant::SidhA, &coords)?;

    let msg = unmask(sk, &ephemeral, &ct[PUBLIC_KEY_SIZE..])?;
    let expected = ephemeral_key(&msg[..], &pk.to_bytes())?.public_key().to_bytes();
    let valid = expected[..].ct_eq(&ct[..PUBLIC_KEY_SIZE]);

    let mut key = Zeroizing::new([0u8; MSG_LEN]);
    for ((k, m), s) in key.iter_mut().zip(msg.iter()).zip(sk.rejection_string()) {
        *k = u8::conditional_select(s, m, valid);
    }
    let mut ss = Zeroizing::new([0u8; KEM_SIZE]);
    labeled(&[&key[..], ct], &H, &mut ss[..]);
    Ok(ss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sike_pair(seed: u64) -> (PrivateKey, PublicKey) {
        let mut rng = StdRng::seed_from_u64(seed);
        let sk = PrivateKey::generate(KeyVariant::Sike, &mut rng).unwrap();
        let pk = sk.public_key();
        (sk, pk)
    }

    #[test]
    fn test_pke_round_trip() {
        let (sk, pk) = sike_pair(11);
        let mut rng = StdRng::seed_from_u64(12);
        let msg: [u8; MSG_LEN] = core::array::from_fn(|i| (7 * i) as u8);
        let ct = encrypt(&pk, &msg, &mut rng).unwrap();
        assert_eq!(*decrypt(&sk, &ct).unwrap(), msg);
    }

    #[test]
    fn test_kem_accept_and_reject() {
        let (sk, pk) = sike_pair(21);
        let mut rng = StdRng::seed_from_u64(22);
        let (mut ct, ss) = encapsulate(&pk, &mut rng).unwrap();
        assert_eq!(*decapsulate(&sk, &pk, &ct).unwrap(), *ss);

        ct[PUBLIC_KEY_SIZE + 3] ^= 0x10;
        let rejected = decapsulate(&sk, &pk, &ct).unwrap();
        assert_ne!(*rejected, *ss);

        let mut expected = [0u8; KEM_SIZE];
        labeled(&[sk.rejection_string(), &ct], &H, &mut expected);
        assert_eq!(*rejected, expected);
    }

    #[test]
    fn test_non_canonical_ephemeral_is_rejected_implicitly() {
        let (sk, pk) = sike_pair(31);
        let mut ct = [0u8; CIPHERTEXT_SIZE];
        ct[..FP2_BYTES].fill(0xff);
        let ss = decapsulate(&sk, &pk, &ct).unwrap();

        let mut expected = [0u8; KEM_SIZE];
        labeled(&[sk.rejection_string(), &ct], &H, &mut expected);
        assert_eq!(*ss, expected);
    }

    #[test]
    fn test_length_and_variant_errors() {
        let (sk, pk) = sike_pair(41);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            encrypt(&pk, &[0u8; MSG_LEN - 1], &mut rng).err(),
            Some(Error::InvalidMessageLength {
                expected: MSG_LEN,
                actual: MSG_LEN - 1
            })
        );
        assert_eq!(
            decapsulate(&sk, &pk, &[0u8; 10]).err(),
            Some(Error::InvalidCiphertextLength {
                expected: CIPHERTEXT_SIZE,
                actual: 10
            })
        );

        let sidh = PublicKey::from_bytes(KeyVariant::SidhB, &pk.to_bytes()).unwrap();
        assert_eq!(
            encapsulate(&sidh, &mut rng).err(),
            Some(Error::WrongKeyVariant)
        );
    }
}
