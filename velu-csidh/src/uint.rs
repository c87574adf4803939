//! 512-bit unsigned integers for cofactor scalars.
//!
//! Only the handful of operations the group action and validation need:
//! multiplication by a word-sized prime, constant-time selection and
//! little-endian export for the ladder.

use subtle::{Choice, ConditionallySelectable};
use velu_core::limbs::{self, mac};
use zeroize::Zeroize;

/// A 512-bit unsigned integer as little-endian `u64` limbs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroize)]
pub struct U512([u64; 8]);

impl U512 {
    /// One.
    pub const ONE: Self = Self::from_u64(1);

    /// Wrap little-endian limbs.
    pub const fn from_limbs(limbs: [u64; 8]) -> Self {
        Self(limbs)
    }

    /// Embed a word.
    pub const fn from_u64(v: u64) -> Self {
        Self([v, 0, 0, 0, 0, 0, 0, 0])
    }

    /// `self * m`, truncated to 512 bits. Constant time in both operands.
    pub fn mul_small(&self, m: u64) -> Self {
        let mut r = [0u64; 8];
        let mut carry = 0;
        for (ri, &a) in r.iter_mut().zip(self.0.iter()) {
            (*ri, carry) = mac(0, a, m, carry);
        }
        Self(r)
    }

    /// Full 1024-bit product, little-endian limbs.
    pub fn mul_wide(&self, other: &Self) -> [u64; 16] {
        let mut r = [0u64; 16];
        for (i, &a) in self.0.iter().enumerate() {
            let mut carry = 0;
            for (j, &b) in other.0.iter().enumerate() {
                (r[i + j], carry) = mac(r[i + j], a, b, carry);
            }
            r[i + 8] = carry;
        }
        r
    }

    /// `self + v`, truncated to 512 bits.
    pub fn add_small(&self, v: u64) -> Self {
        let (r, _) = limbs::add(&self.0, &Self::from_u64(v).0);
        Self(r)
    }

    /// Little-endian bytes for the Montgomery ladder.
    pub fn to_le_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        limbs::to_le_bytes(&self.0, &mut out);
        out
    }

    /// Position of the highest set bit plus one. Variable time.
    pub fn bits(&self) -> usize {
        self.0
            .iter()
            .rposition(|&l| l != 0)
            .map_or(0, |i| 64 * i + 64 - self.0[i].leading_zeros() as usize)
    }

    /// `self > other`. Variable time; for public values only.
    pub fn gt_vartime(&self, other: &Self) -> bool {
        bool::from(limbs::ct_lt(&other.0, &self.0))
    }
}

impl ConditionallySelectable for U512 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(limbs::select(&b.0, &a.0, choice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_wide() {
        let x = U512::from_limbs([0, 0, 0, 0, 0, 0, 0, u64::MAX]);
        let mut expected = [0u64; 16];
        expected[14] = 1;
        expected[15] = u64::MAX - 1;
        assert_eq!(x.mul_wide(&x), expected);

        let y = U512::from_u64(3).mul_wide(&U512::from_u64(5));
        assert_eq!(y[0], 15);
        assert!(y[1..].iter().all(|&l| l == 0));
    }

    #[test]
    fn test_mul_small_carries() {
        let x = U512::from_limbs([u64::MAX, 0, 0, 0, 0, 0, 0, 0]);
        let y = x.mul_small(3);
        assert_eq!(y, U512::from_limbs([u64::MAX - 2, 2, 0, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn test_bits() {
        assert_eq!(U512::default().bits(), 0);
        assert_eq!(U512::ONE.bits(), 1);
        assert_eq!(U512::from_limbs([0, 0, 1, 0, 0, 0, 0, 0]).bits(), 129);
    }

    #[test]
    fn test_select_and_compare() {
        let a = U512::from_u64(7);
        let b = U512::from_u64(9);
        assert_eq!(U512::conditional_select(&a, &b, Choice::from(1)), b);
        assert_eq!(U512::conditional_select(&a, &b, Choice::from(0)), a);
        assert!(b.gt_vartime(&a));
        assert!(!a.gt_vartime(&a));
    }

    #[test]
    fn test_le_bytes() {
        let bytes = U512::from_u64(0x0102).to_le_bytes();
        assert_eq!(&bytes[..3], &[0x02, 0x01, 0x00]);
    }
}
