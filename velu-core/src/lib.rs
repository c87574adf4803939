//! # Velu Core
//!
//! Shared arithmetic and traits for the velu isogeny-based schemes.
//!
//! This crate provides:
//! - Common error types
//! - Cryptographic primitive traits (`Kem`, `KeyAgreement`)
//! - A macro generating constant-time Montgomery prime fields
//! - The quadratic extension 𝔽p² over any such field
//! - x-only Montgomery curve arithmetic and 3-, 4- and odd-degree isogenies

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod field;
mod fp2;
pub mod isogeny;
pub mod limbs;
pub mod montgomery;
mod traits;

pub use error::{Error, Result};
pub use field::{Field, PrimeField};
pub use fp2::Fp2;
pub use isogeny::{FourIsogeny, Isogeny, OddIsogeny, ThreeIsogeny};
pub use montgomery::{A24Plus, A24PlusMinus, ProjectiveCurve, ProjectivePoint};
pub use traits::{Kem, KeyAgreement};

/// Re-export zeroize for convenience.
pub use zeroize::{Zeroize, ZeroizeOnDrop};

/// Re-export zeroize for use inside generated field types.
#[doc(hidden)]
pub use zeroize;

/// Re-export subtle for constant-time operations.
pub use subtle;
