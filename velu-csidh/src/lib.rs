//! # CSIDH-512
//!
//! Commutative Supersingular Isogeny Diffie-Hellman over the 511-bit prime
//! `p = 4 · 3 · 5 ⋯ 373 · 587 - 1`.
//!
//! | Item          | Size     |
//! |---------------|----------|
//! | Private key   | 37 bytes |
//! | Public key    | 64 bytes |
//! | Shared secret | 64 bytes |
//!
//! ## Example
//!
//! ```ignore
//! use velu_csidh::{Csidh512, KeyAgreement};
//! use rand::rngs::OsRng;
//!
//! let (alice_sk, alice_pk) = Csidh512::keygen(&mut OsRng)?;
//! let (bob_sk, bob_pk) = Csidh512::keygen(&mut OsRng)?;
//!
//! let s1 = Csidh512::agree(&alice_sk, &bob_pk, &mut OsRng)?;
//! let s2 = Csidh512::agree(&bob_sk, &alice_pk, &mut OsRng)?;
//! assert_eq!(s1.as_ref(), s2.as_ref());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod action;
mod csidh_512;
mod fp;
mod keys;
pub mod params;
mod uint;
mod validate;

pub use action::group_action;
pub use csidh_512::{Csidh512, SharedSecret};
pub use fp::Fp511;
pub use keys::{PrivateKey, PublicKey};
pub use uint::U512;
pub use validate::validate;
pub use velu_core::KeyAgreement;
