//! # Velu
//!
//! Isogeny-based key agreement built on Vélu-style isogeny formulas over
//! Montgomery curves.
//!
//! ## Features
//!
//! - `std` (default): Enable standard library support
//! - `csidh` (default): Enable CSIDH-512 non-interactive key agreement
//! - `sike-p434` (default): Enable SIDH and the SIKEp434 KEM
//!
//! ## Supported Algorithms
//!
//! - **CSIDH-512**: commutative group action with public-key validation
//! - **SIKEp434**: SIDH key agreement and the implicit-rejection KEM
//!
//! ## Example
//!
//! ```ignore
//! use velu::csidh::{Csidh512, KeyAgreement};
//!
//! let (alice_sk, alice_pk) = Csidh512::keygen(&mut rng)?;
//! let (bob_sk, bob_pk) = Csidh512::keygen(&mut rng)?;
//!
//! let s1 = Csidh512::agree(&alice_sk, &bob_pk, &mut rng)?;
//! let s2 = Csidh512::agree(&bob_sk, &alice_pk, &mut rng)?;
//!
//! assert_eq!(s1.as_ref(), s2.as_ref());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub use velu_core::{Error, Result};

/// Core traits for key establishment.
pub mod traits {
    pub use velu_core::{Kem, KeyAgreement};
}

/// CSIDH-512 commutative key agreement.
#[cfg(feature = "csidh")]
pub mod csidh {
    pub use velu_core::KeyAgreement;
    pub use velu_csidh::*;
}

/// SIDH key agreement and the SIKEp434 KEM.
#[cfg(feature = "sike-p434")]
pub mod sike {
    pub use velu_core::Kem;
    pub use velu_sike::*;
}
