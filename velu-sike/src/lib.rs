//! # SIDH and SIKEp434
//!
//! Supersingular isogeny key agreement over `p = 2^216 · 3^137 - 1`, and
//! the SIKE key encapsulation mechanism built on it.
//!
//! | Item                | Size      |
//! |---------------------|-----------|
//! | Public key          | 330 bytes |
//! | SIDH shared secret  | 110 bytes |
//! | SIKE private key    | 52 bytes  |
//! | SIKE ciphertext     | 354 bytes |
//! | SIKE shared secret  | 16 bytes  |
//!
//! ## Example
//!
//! ```ignore
//! use velu_sike::{Kem, SikeP434};
//! use rand::rngs::OsRng;
//!
//! let (dk, ek) = SikeP434::keygen(&mut OsRng)?;
//! let (ct, ss_sender) = SikeP434::encaps(&ek, &mut OsRng)?;
//! let ss_receiver = SikeP434::decaps(&dk, &ct)?;
//! assert_eq!(ss_sender.as_ref(), ss_receiver.as_ref());
//! ```
//!
//! ## Security
//!
//! SIDH and SIKE are broken by the 2022 Castryck–Decru key-recovery attack.
//! This crate exists for study and interoperability testing only.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod fp;
mod hash;
mod kem;
mod keys;
pub mod params;
mod sike_p434;
mod walk;

pub use fp::{Fp2, Fp434};
pub use kem::{decapsulate, decrypt, encapsulate, encrypt};
pub use keys::{derive_secret, KeyVariant, PrivateKey, PublicKey, SidhSharedSecret};
pub use sike_p434::{Ciphertext, DecapsulationKey, EncapsulationKey, SharedSecret, SikeP434};
pub use velu_core::Kem;
