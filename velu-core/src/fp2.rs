//! Quadratic extension 𝔽p² = 𝔽p(i) with i² = -1.
//!
//! Valid for primes p ≡ 3 (mod 4), where -1 is a non-residue. Elements are
//! encoded as the base-field encoding of `a` followed by that of `b`.

use crate::field::{Field, PrimeField};
use core::ops::{Add, Mul, Neg, Sub};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::Zeroize;

/// Element `a + b·i` of 𝔽p².
#[derive(Clone, Copy, Debug, Default)]
pub struct Fp2<F> {
    /// Real part.
    pub a: F,
    /// Imaginary part.
    pub b: F,
}

impl<F: PrimeField> Fp2<F> {
    /// Build `a + b·i`.
    pub const fn new(a: F, b: F) -> Self {
        Self { a, b }
    }

    /// Embed a base-field element.
    pub fn from_base(a: F) -> Self {
        Self { a, b: F::ZERO }
    }

    /// `a - b·i`.
    pub fn conjugate(&self) -> Self {
        Self {
            a: self.a,
            b: -self.b,
        }
    }

    /// Norm `a² + b²` down to the base field.
    pub fn norm(&self) -> F {
        self.a.square() + self.b.square()
    }
}

impl<F: PrimeField> Add for Fp2<F> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            a: self.a + rhs.a,
            b: self.b + rhs.b,
        }
    }
}

impl<F: PrimeField> Sub for Fp2<F> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            a: self.a - rhs.a,
            b: self.b - rhs.b,
        }
    }
}

impl<F: PrimeField> Mul for Fp2<F> {
    type Output = Self;

    /// Karatsuba: three base-field multiplications.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let t0 = self.a * rhs.a;
        let t1 = self.b * rhs.b;
        let t2 = (self.a + self.b) * (rhs.a + rhs.b);
        Self {
            a: t0 - t1,
            b: t2 - t0 - t1,
        }
    }
}

impl<F: PrimeField> Neg for Fp2<F> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            a: -self.a,
            b: -self.b,
        }
    }
}

impl<F: PrimeField> ConstantTimeEq for Fp2<F> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.a.ct_eq(&other.a) & self.b.ct_eq(&other.b)
    }
}

impl<F: PrimeField> ConditionallySelectable for Fp2<F> {
    fn conditional_select(x: &Self, y: &Self, choice: Choice) -> Self {
        Self {
            a: F::conditional_select(&x.a, &y.a, choice),
            b: F::conditional_select(&x.b, &y.b, choice),
        }
    }
}

impl<F: PrimeField> PartialEq for Fp2<F> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<F: PrimeField> Eq for Fp2<F> {}

impl<F: PrimeField> Zeroize for Fp2<F> {
    fn zeroize(&mut self) {
        self.a.zeroize();
        self.b.zeroize();
    }
}

impl<F: PrimeField> Field for Fp2<F> {
    const ZERO: Self = Self {
        a: F::ZERO,
        b: F::ZERO,
    };
    const ONE: Self = Self {
        a: F::ONE,
        b: F::ZERO,
    };
    const ENCODED_LEN: usize = 2 * F::ENCODED_LEN;

    /// `(a + b)(a - b) + 2ab·i`: two base-field multiplications.
    #[inline]
    fn square(&self) -> Self {
        let t0 = self.a + self.b;
        let t1 = self.a - self.b;
        let t2 = self.a.double();
        Self {
            a: t0 * t1,
            b: t2 * self.b,
        }
    }

    /// Conjugate over norm; costs one base-field inversion.
    fn invert(&self) -> Self {
        let inv_norm = self.norm().invert();
        Self {
            a: self.a * inv_norm,
            b: -(self.b * inv_norm),
        }
    }

    fn to_bytes(&self, out: &mut [u8]) {
        let n = F::ENCODED_LEN;
        self.a.to_bytes(&mut out[..n]);
        self.b.to_bytes(&mut out[n..2 * n]);
    }

    fn from_bytes(bytes: &[u8]) -> CtOption<Self> {
        let n = F::ENCODED_LEN;
        if bytes.len() != 2 * n {
            return CtOption::new(Self::ZERO, Choice::from(0));
        }
        let a = F::from_bytes(&bytes[..n]);
        let b = F::from_bytes(&bytes[n..]);
        a.and_then(|a| b.map(|b| Self { a, b }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::test_field::Fp127;

    type Ext = Fp2<Fp127>;

    fn elem(a: u64, b: u64) -> Ext {
        Fp2::new(Fp127::from_u64(a), Fp127::from_u64(b))
    }

    #[test]
    fn test_i_squared_is_minus_one() {
        let i = elem(0, 1);
        assert_eq!(i * i, -Ext::ONE);
        assert_eq!(i.square(), -Ext::ONE);
    }

    #[test]
    fn test_mul_matches_schoolbook() {
        // (3 + 5i)(7 + 11i) = 21 - 55 + (33 + 35)i
        let r = elem(3, 5) * elem(7, 11);
        assert_eq!(r, Fp2::new(-Fp127::from_u64(34), Fp127::from_u64(68)));
    }

    #[test]
    fn test_invert() {
        let x = elem(12345, 67890);
        assert_eq!(x * x.invert(), Ext::ONE);
        assert_eq!(Ext::ZERO.invert(), Ext::ZERO);
    }

    #[test]
    fn test_conjugate_norm() {
        let x = elem(4, 9);
        let n = x * x.conjugate();
        assert_eq!(n, Fp2::from_base(x.norm()));
    }

    #[test]
    fn test_bytes_roundtrip() {
        let x = elem(0x0102_0304, 0x0506_0708);
        let mut buf = [0u8; 32];
        x.to_bytes(&mut buf);
        assert_eq!(buf[0], 0x04);
        assert_eq!(buf[16], 0x08);
        let y = Ext::from_bytes(&buf).unwrap();
        assert_eq!(x, y);
        assert!(bool::from(Ext::from_bytes(&buf[..31]).is_none()));
    }
}
