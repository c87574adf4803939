//! Fixed-width multi-precision arithmetic on little-endian `u64` limbs.
//!
//! Every routine runs the same instruction sequence for all inputs of a
//! given width: carries and borrows are propagated arithmetically and
//! reductions use masks, never branches.

use subtle::{Choice, ConditionallySelectable};

/// Add with carry: returns `(a + b + carry) mod 2^64` and the outgoing carry.
#[inline(always)]
pub const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let t = (a as u128) + (b as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

/// Subtract with borrow: returns `(a - b - borrow) mod 2^64` and the outgoing borrow (0 or 1).
#[inline(always)]
pub const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let t = (a as u128).wrapping_sub((b as u128) + (borrow as u128));
    (t as u64, (t >> 127) as u64)
}

/// Multiply-accumulate: returns the low and high words of `acc + b * c + carry`.
#[inline(always)]
pub const fn mac(acc: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let t = (acc as u128) + (b as u128) * (c as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

/// `a + b`, returning the sum and the final carry.
#[inline]
pub fn add<const N: usize>(a: &[u64; N], b: &[u64; N]) -> ([u64; N], u64) {
    let mut r = [0u64; N];
    let mut carry = 0;
    for i in 0..N {
        (r[i], carry) = adc(a[i], b[i], carry);
    }
    (r, carry)
}

/// `a - b`, returning the difference and the final borrow.
#[inline]
pub fn sub<const N: usize>(a: &[u64; N], b: &[u64; N]) -> ([u64; N], u64) {
    let mut r = [0u64; N];
    let mut borrow = 0;
    for i in 0..N {
        (r[i], borrow) = sbb(a[i], b[i], borrow);
    }
    (r, borrow)
}

/// Select `a` when `choice` is set, `b` otherwise.
#[inline]
pub fn select<const N: usize>(a: &[u64; N], b: &[u64; N], choice: Choice) -> [u64; N] {
    let mut r = [0u64; N];
    for i in 0..N {
        r[i] = u64::conditional_select(&b[i], &a[i], choice);
    }
    r
}

/// `(a + b) mod p` for `a, b < p`.
#[inline]
pub fn add_mod<const N: usize>(a: &[u64; N], b: &[u64; N], p: &[u64; N]) -> [u64; N] {
    let (sum, carry) = add(a, b);
    let (reduced, borrow) = sub(&sum, p);
    // Keep the unreduced sum only if it did not overflow and was already below p.
    let keep_sum = Choice::from((borrow & (carry ^ 1)) as u8);
    select(&sum, &reduced, keep_sum)
}

/// `(a - b) mod p` for `a, b < p`.
#[inline]
pub fn sub_mod<const N: usize>(a: &[u64; N], b: &[u64; N], p: &[u64; N]) -> [u64; N] {
    let (diff, borrow) = sub(a, b);
    let mask = 0u64.wrapping_sub(borrow);
    let mut r = [0u64; N];
    let mut carry = 0;
    for i in 0..N {
        (r[i], carry) = adc(diff[i], p[i] & mask, carry);
    }
    r
}

/// Montgomery multiplication: `a * b * 2^(-64N) mod p` for `a, b < p`.
///
/// Coarsely integrated operand scanning; `inv` is `-p^(-1) mod 2^64`.
#[inline]
pub fn mont_mul<const N: usize>(a: &[u64; N], b: &[u64; N], p: &[u64; N], inv: u64) -> [u64; N] {
    let mut t = [0u64; N];
    let mut t_n = 0u64;

    for i in 0..N {
        // t += a * b[i]
        let mut carry = 0;
        for j in 0..N {
            (t[j], carry) = mac(t[j], a[j], b[i], carry);
        }
        let (s, t_n1) = adc(t_n, carry, 0);
        t_n = s;

        // t = (t + m * p) / 2^64
        let m = t[0].wrapping_mul(inv);
        let (_, mut carry) = mac(t[0], m, p[0], 0);
        for j in 1..N {
            (t[j - 1], carry) = mac(t[j], m, p[j], carry);
        }
        let (s, c) = adc(t_n, carry, 0);
        t[N - 1] = s;
        t_n = t_n1 + c;
    }

    // t < 2p here; subtract p once unless that underflows.
    let (reduced, borrow) = sub(&t, p);
    let keep_t = Choice::from((borrow & (t_n ^ 1)) as u8);
    select(&t, &reduced, keep_t)
}

/// Returns a set choice when `a < b`.
#[inline]
pub fn ct_lt<const N: usize>(a: &[u64; N], b: &[u64; N]) -> Choice {
    let (_, borrow) = sub(a, b);
    Choice::from(borrow as u8)
}

/// Shift right by one bit.
#[inline]
pub fn shr1<const N: usize>(a: &[u64; N]) -> [u64; N] {
    let mut r = [0u64; N];
    for i in 0..N {
        r[i] = a[i] >> 1;
        if i + 1 < N {
            r[i] |= a[i + 1] << 63;
        }
    }
    r
}

/// Decode little-endian bytes into limbs. Missing high bytes are zero.
///
/// # Panics
/// Panics if `bytes` is longer than `8 * N`.
#[inline]
pub fn from_le_bytes<const N: usize>(bytes: &[u8]) -> [u64; N] {
    assert!(bytes.len() <= 8 * N, "encoding wider than limb array");
    let mut r = [0u64; N];
    for (i, b) in bytes.iter().enumerate() {
        r[i / 8] |= (*b as u64) << (8 * (i % 8));
    }
    r
}

/// Encode limbs as little-endian bytes, filling `out` exactly.
///
/// # Panics
/// Panics if `out` is longer than `8 * N`.
#[inline]
pub fn to_le_bytes<const N: usize>(a: &[u64; N], out: &mut [u8]) {
    assert!(out.len() <= 8 * N, "encoding wider than limb array");
    for (i, b) in out.iter_mut().enumerate() {
        *b = (a[i / 8] >> (8 * (i % 8))) as u8;
    }
}
