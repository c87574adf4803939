//! Field traits and the prime-field generator macro.
//!
//! Schemes instantiate their base field with [`define_prime_field!`], which
//! wires a fixed modulus and its Montgomery constants to the constant-time
//! limb routines in [`crate::limbs`]. Curve and isogeny code is written
//! against [`Field`] so it runs unchanged over 𝔽p and 𝔽p².

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::Zeroize;

/// Arithmetic shared by prime fields and their quadratic extension.
///
/// All operations are constant time in their operands.
pub trait Field:
    Copy
    + Default
    + Debug
    + Eq
    + ConditionallySelectable
    + ConstantTimeEq
    + Zeroize
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// Additive identity.
    const ZERO: Self;

    /// Multiplicative identity.
    const ONE: Self;

    /// Length of the canonical little-endian encoding in bytes.
    const ENCODED_LEN: usize;

    /// `self * self`.
    fn square(&self) -> Self;

    /// `self + self`.
    fn double(&self) -> Self {
        *self + *self
    }

    /// Multiplicative inverse; zero maps to zero.
    fn invert(&self) -> Self;

    /// Constant-time test for zero.
    fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Write the canonical little-endian encoding into `out[..ENCODED_LEN]`.
    ///
    /// # Panics
    /// Panics if `out` is shorter than [`Field::ENCODED_LEN`].
    fn to_bytes(&self, out: &mut [u8]);

    /// Decode a canonical little-endian encoding.
    ///
    /// Fails when the length differs from [`Field::ENCODED_LEN`] or a
    /// component is not reduced below the modulus.
    fn from_bytes(bytes: &[u8]) -> CtOption<Self>;
}

/// A prime field 𝔽p held in Montgomery form.
pub trait PrimeField: Field {
    /// Embed a small integer.
    fn from_u64(value: u64) -> Self;

    /// Quadratic-residue test (zero counts as a square).
    ///
    /// Computes the Legendre symbol by a fixed exponentiation.
    fn is_square(&self) -> Choice;
}

/// Generate a prime field type over a fixed modulus.
///
/// The generated type stores its value as `N` little-endian `u64` limbs in
/// Montgomery form, always reduced below the modulus, and implements
/// [`Field`] and [`PrimeField`].
///
/// # Parameters
/// - `name`: Type name (e.g., `Fp511`)
/// - `limbs`: Limb count `N`, with `64 * N` at least the modulus bit length
/// - `bytes`: Encoded length in bytes
/// - `modulus`: The prime `p` as `[u64; N]`, little-endian
/// - `r`: `2^(64N) mod p` (Montgomery form of one)
/// - `r2`: `2^(128N) mod p`
/// - `inv`: `-p^(-1) mod 2^64`
#[macro_export]
macro_rules! define_prime_field {
    (
        $(#[$attr:meta])*
        name: $name:ident,
        limbs: $n:expr,
        bytes: $bytes:expr,
        modulus: $modulus:expr,
        r: $r:expr,
        r2: $r2:expr,
        inv: $inv:expr $(,)?
    ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Default)]
        pub struct $name([u64; $n]);

        impl $name {
            /// The prime modulus as little-endian limbs.
            pub const MODULUS: [u64; $n] = $modulus;

            /// Montgomery radix modulo p, i.e. the representation of one.
            pub const R: [u64; $n] = $r;

            /// Square of the Montgomery radix modulo p.
            pub const R2: [u64; $n] = $r2;

            /// `-p^(-1) mod 2^64`.
            pub const INV: u64 = $inv;

            /// Wrap limbs that are already in Montgomery form and below the modulus.
            pub const fn from_montgomery(limbs: [u64; $n]) -> Self {
                Self(limbs)
            }

            /// The Montgomery-form limbs.
            pub const fn to_montgomery(&self) -> [u64; $n] {
                self.0
            }

            /// Enter the Montgomery domain from a value below the modulus.
            pub fn from_canonical(limbs: [u64; $n]) -> Self {
                Self($crate::limbs::mont_mul(
                    &limbs,
                    &Self::R2,
                    &Self::MODULUS,
                    Self::INV,
                ))
            }

            /// Leave the Montgomery domain.
            pub fn to_canonical(&self) -> [u64; $n] {
                let mut one = [0u64; $n];
                one[0] = 1;
                $crate::limbs::mont_mul(&self.0, &one, &Self::MODULUS, Self::INV)
            }

            /// Exponentiation by a public exponent.
            ///
            /// Runs a fixed square-and-multiply over every bit of `exp`, so
            /// timing depends on the exponent only, never on `self`.
            pub fn pow_vartime(&self, exp: &[u64; $n]) -> Self {
                let mut acc = <Self as $crate::Field>::ONE;
                for limb in exp.iter().rev() {
                    for bit in (0..64).rev() {
                        acc = $crate::Field::square(&acc);
                        if (limb >> bit) & 1 == 1 {
                            acc = acc * *self;
                        }
                    }
                }
                acc
            }
        }

        impl $crate::Field for $name {
            const ZERO: Self = Self([0u64; $n]);
            const ONE: Self = Self($r);
            const ENCODED_LEN: usize = $bytes;

            #[inline]
            fn square(&self) -> Self {
                Self($crate::limbs::mont_mul(
                    &self.0,
                    &self.0,
                    &Self::MODULUS,
                    Self::INV,
                ))
            }

            fn invert(&self) -> Self {
                // Fermat: a^(p-2).
                let mut two = [0u64; $n];
                two[0] = 2;
                let (exp, _) = $crate::limbs::sub(&Self::MODULUS, &two);
                self.pow_vartime(&exp)
            }

            fn to_bytes(&self, out: &mut [u8]) {
                $crate::limbs::to_le_bytes(&self.to_canonical(), &mut out[..$bytes]);
            }

            fn from_bytes(bytes: &[u8]) -> $crate::subtle::CtOption<Self> {
                if bytes.len() != $bytes {
                    return $crate::subtle::CtOption::new(
                        <Self as $crate::Field>::ZERO,
                        $crate::subtle::Choice::from(0),
                    );
                }
                let limbs: [u64; $n] = $crate::limbs::from_le_bytes(bytes);
                let canonical = $crate::limbs::ct_lt(&limbs, &Self::MODULUS);
                $crate::subtle::CtOption::new(Self::from_canonical(limbs), canonical)
            }
        }

        impl $crate::PrimeField for $name {
            fn from_u64(value: u64) -> Self {
                let mut limbs = [0u64; $n];
                limbs[0] = value;
                Self::from_canonical(limbs)
            }

            fn is_square(&self) -> $crate::subtle::Choice {
                // Euler's criterion with exponent (p - 1) / 2 = p >> 1.
                let exp = $crate::limbs::shr1(&Self::MODULUS);
                let legendre = self.pow_vartime(&exp);
                $crate::subtle::ConstantTimeEq::ct_eq(
                    &legendre,
                    &<Self as $crate::Field>::ONE,
                ) | $crate::Field::is_zero(self)
            }
        }

        impl core::ops::Add for $name {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self($crate::limbs::add_mod(&self.0, &rhs.0, &Self::MODULUS))
            }
        }

        impl core::ops::Sub for $name {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self($crate::limbs::sub_mod(&self.0, &rhs.0, &Self::MODULUS))
            }
        }

        impl core::ops::Mul for $name {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self($crate::limbs::mont_mul(
                    &self.0,
                    &rhs.0,
                    &Self::MODULUS,
                    Self::INV,
                ))
            }
        }

        impl core::ops::Neg for $name {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self($crate::limbs::sub_mod(&[0u64; $n], &self.0, &Self::MODULUS))
            }
        }

        impl $crate::subtle::ConstantTimeEq for $name {
            fn ct_eq(&self, other: &Self) -> $crate::subtle::Choice {
                $crate::subtle::ConstantTimeEq::ct_eq(&self.0[..], &other.0[..])
            }
        }

        impl $crate::subtle::ConditionallySelectable for $name {
            fn conditional_select(a: &Self, b: &Self, choice: $crate::subtle::Choice) -> Self {
                Self($crate::limbs::select(&b.0, &a.0, choice))
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $crate::subtle::ConstantTimeEq::ct_eq(self, other).into()
            }
        }

        impl Eq for $name {}

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}(0x", stringify!($name))?;
                for limb in self.to_canonical().iter().rev() {
                    write!(f, "{limb:016x}")?;
                }
                write!(f, ")")
            }
        }

        impl $crate::zeroize::Zeroize for $name {
            fn zeroize(&mut self) {
                $crate::zeroize::Zeroize::zeroize(&mut self.0);
            }
        }
    };
}
