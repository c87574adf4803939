//! Cryptographic primitive traits.

use crate::Result;
use rand_core::TryCryptoRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key Encapsulation Mechanism (KEM) trait.
///
/// # Example
///
/// ```ignore
/// use velu_core::Kem;
///
/// let (dk, ek) = MyKem::keygen(&mut rng)?;
/// let (ct, ss_sender) = MyKem::encaps(&ek, &mut rng)?;
/// let ss_receiver = MyKem::decaps(&dk, &ct)?;
/// ```
pub trait Kem {
    /// Decapsulation key (private key).
    type DecapsulationKey: Zeroize + ZeroizeOnDrop;

    /// Encapsulation key (public key).
    type EncapsulationKey: Clone;

    /// Ciphertext produced by encapsulation.
    type Ciphertext: Clone;

    /// Shared secret produced by encapsulation/decapsulation.
    type SharedSecret: Zeroize + ZeroizeOnDrop + AsRef<[u8]>;

    /// Size of the decapsulation key in bytes.
    const DECAPSULATION_KEY_SIZE: usize;

    /// Size of the encapsulation key in bytes.
    const ENCAPSULATION_KEY_SIZE: usize;

    /// Size of the ciphertext in bytes.
    const CIPHERTEXT_SIZE: usize;

    /// Size of the shared secret in bytes.
    const SHARED_SECRET_SIZE: usize;

    /// Generate a new key pair.
    ///
    /// # Returns
    ///
    /// A tuple of (decapsulation_key, encapsulation_key).
    fn keygen<R: TryCryptoRng + ?Sized>(
        rng: &mut R,
    ) -> Result<(Self::DecapsulationKey, Self::EncapsulationKey)>;

    /// Encapsulate a shared secret using the encapsulation key.
    ///
    /// # Returns
    ///
    /// A tuple of (ciphertext, shared_secret).
    fn encaps<R: TryCryptoRng + ?Sized>(
        ek: &Self::EncapsulationKey,
        rng: &mut R,
    ) -> Result<(Self::Ciphertext, Self::SharedSecret)>;

    /// Decapsulate a shared secret using the decapsulation key.
    ///
    /// # Security
    ///
    /// Implementations MUST use implicit rejection: an invalid ciphertext
    /// yields a pseudorandom shared secret derived from a secret value in
    /// the private key, never an error.
    fn decaps(dk: &Self::DecapsulationKey, ct: &Self::Ciphertext) -> Result<Self::SharedSecret>;
}

/// Non-interactive key agreement over a group action.
///
/// # Example
///
/// ```ignore
/// use velu_core::KeyAgreement;
///
/// let (alice_sk, alice_pk) = Scheme::keygen(&mut rng)?;
/// let (bob_sk, bob_pk) = Scheme::keygen(&mut rng)?;
/// let s1 = Scheme::agree(&alice_sk, &bob_pk, &mut rng)?;
/// let s2 = Scheme::agree(&bob_sk, &alice_pk, &mut rng)?;
/// assert_eq!(s1.as_ref(), s2.as_ref());
/// ```
pub trait KeyAgreement {
    /// Private key.
    type PrivateKey: Zeroize + ZeroizeOnDrop;

    /// Public key.
    type PublicKey: Clone;

    /// Shared secret.
    type SharedSecret: Zeroize + ZeroizeOnDrop + AsRef<[u8]>;

    /// Size of the private key in bytes.
    const PRIVATE_KEY_SIZE: usize;

    /// Size of the public key in bytes.
    const PUBLIC_KEY_SIZE: usize;

    /// Size of the shared secret in bytes.
    const SHARED_SECRET_SIZE: usize;

    /// Generate a new key pair.
    fn keygen<R: TryCryptoRng + ?Sized>(rng: &mut R)
        -> Result<(Self::PrivateKey, Self::PublicKey)>;

    /// Combine our private key with the peer's public key.
    ///
    /// Implementations validate `peer` first and fail with
    /// [`crate::Error::InvalidPublicKey`] when it is malformed.
    fn agree<R: TryCryptoRng + ?Sized>(
        sk: &Self::PrivateKey,
        peer: &Self::PublicKey,
        rng: &mut R,
    ) -> Result<Self::SharedSecret>;
}
