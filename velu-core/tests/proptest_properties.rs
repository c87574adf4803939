//! Property-based tests for the field, extension field and curve layers.
//!
//! Runs over the Mersenne prime 2^127 - 1, small enough to keep the ladder
//! properties fast while still exercising multi-limb carries.

use proptest::prelude::*;
use velu_core::montgomery::{
    batch3_invert, pow2k, scalar_mul, scalar_mul_3pt, xadd, xdbl, xdbladd,
};
use velu_core::{Field, Fp2, PrimeField, ProjectiveCurve, ProjectivePoint};

velu_core::define_prime_field! {
    /// 𝔽p with p = 2^127 - 1.
    name: Fp127,
    limbs: 2,
    bytes: 16,
    modulus: [0xffff_ffff_ffff_ffff, 0x7fff_ffff_ffff_ffff],
    r: [2, 0],
    r2: [4, 0],
    inv: 1,
}

type Ext = Fp2<Fp127>;

/// Elements below 2^126, always canonical.
fn arb_fp() -> impl Strategy<Value = Fp127> {
    (any::<u64>(), any::<u64>()).prop_map(|(lo, hi)| Fp127::from_canonical([lo, hi >> 2]))
}

fn arb_nonzero_fp() -> impl Strategy<Value = Fp127> {
    arb_fp().prop_filter("nonzero", |x| !bool::from(x.is_zero()))
}

fn arb_ext() -> impl Strategy<Value = Ext> {
    (arb_fp(), arb_fp()).prop_map(|(a, b)| Fp2::new(a, b))
}

fn curve() -> ProjectiveCurve<Fp127> {
    ProjectiveCurve::from_affine(Fp127::from_u64(6))
}

/// `x([n]P)` for a small multiplier.
fn mul_small(p: &ProjectivePoint<Fp127>, n: u16) -> ProjectivePoint<Fp127> {
    scalar_mul(p, &curve().a24_plus(), &n.to_le_bytes(), 16)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Ring laws: commutativity, associativity, distributivity.
    #[test]
    fn field_ring_laws(a in arb_fp(), b in arb_fp(), c in arb_fp()) {
        prop_assert_eq!(a + b, b + a);
        prop_assert_eq!(a * b, b * a);
        prop_assert_eq!((a + b) + c, a + (b + c));
        prop_assert_eq!((a * b) * c, a * (b * c));
        prop_assert_eq!(a * (b + c), a * b + a * c);
        prop_assert_eq!(a - a, Fp127::ZERO);
        prop_assert_eq!(a + (-a), Fp127::ZERO);
        prop_assert_eq!(a.square(), a * a);
    }

    /// Inversion and the canonical encoding.
    #[test]
    fn field_invert_and_encode(a in arb_nonzero_fp()) {
        prop_assert_eq!(a * a.invert(), Fp127::ONE);

        let mut buf = [0u8; 16];
        a.to_bytes(&mut buf);
        let back = Fp127::from_bytes(&buf).unwrap();
        prop_assert_eq!(back, a);
    }

    /// Squares are recognised as squares.
    #[test]
    fn field_squares_are_squares(a in arb_fp()) {
        prop_assert!(bool::from(a.square().is_square()));
    }

    /// Extension field: Karatsuba product, squaring and inversion agree.
    #[test]
    fn ext_field_laws(x in arb_ext(), y in arb_ext()) {
        prop_assert_eq!(x * y, y * x);
        prop_assert_eq!(x.square(), x * x);
        let expected = Fp2::new(x.a * y.a - x.b * y.b, x.a * y.b + x.b * y.a);
        prop_assert_eq!(x * y, expected);
        if !bool::from(x.is_zero()) {
            prop_assert_eq!(x * x.invert(), Ext::ONE);
        }
    }

    /// The combined ladder step equals separate doubling and addition.
    #[test]
    fn xdbladd_equivalence(px in arb_fp(), qx in arb_fp()) {
        let a24 = curve().a24_plus();
        let p = ProjectivePoint::from_affine(px);
        let q = ProjectivePoint::from_affine(qx);
        let diff = xadd(&p, &q, &ProjectivePoint::from_affine(px + qx));
        let (dbl, sum) = xdbladd(&p, &q, &diff, &a24);
        prop_assert_eq!(dbl, xdbl(&p, &a24));
        prop_assert_eq!(sum, xadd(&p, &q, &diff));
    }

    /// `[a]([b]P) = [ab]P`.
    #[test]
    fn scalar_mul_composes(x in arb_nonzero_fp(), a in 1u8.., b in 1u8..) {
        let p = ProjectivePoint::from_affine(x);
        let lhs = mul_small(&mul_small(&p, a as u16), b as u16);
        let rhs = mul_small(&p, a as u16 * b as u16);
        prop_assert_eq!(lhs.to_affine(), rhs.to_affine());
    }

    /// Leading zero bits do not change the ladder result.
    #[test]
    fn scalar_mul_ignores_leading_zeros(x in arb_nonzero_fp(), k in any::<u8>()) {
        let a24 = curve().a24_plus();
        let p = ProjectivePoint::from_affine(x);
        let short = scalar_mul(&p, &a24, &[k], 8);
        let long = scalar_mul(&p, &a24, &[k, 0, 0, 0], 32);
        prop_assert_eq!(short.to_affine(), long.to_affine());
    }

    /// With `P = [m]Q`, the three-point ladder yields `[m + k]Q`.
    ///
    /// `m` keeps every partial sum `m + (k mod 2^i)` away from a power of
    /// two, where an intermediate difference would be the identity.
    #[test]
    fn three_point_ladder(x in arb_nonzero_fp(), m in 1100u16..1700, k in any::<u8>()) {
        let a24 = curve().a24_plus();
        let q = ProjectivePoint::from_affine(x);
        let p = mul_small(&q, m);
        let qmp = mul_small(&q, m - 1);
        let p = ProjectivePoint::from_affine(p.to_affine());
        let qmp = ProjectivePoint::from_affine(qmp.to_affine());

        let r = scalar_mul_3pt(&p, &q, &qmp, &a24, &[k, 0], 16);
        prop_assert_eq!(r.to_affine(), mul_small(&q, m + k as u16).to_affine());
    }

    /// `pow2k` agrees with the ladder on `2^k`.
    #[test]
    fn pow2k_matches_ladder(x in arb_nonzero_fp(), k in 0u32..8) {
        let a24 = curve().a24_plus();
        let p = ProjectivePoint::from_affine(x);
        let expected = mul_small(&p, 1u16 << k);
        prop_assert_eq!(pow2k(&p, &a24, k).to_affine(), expected.to_affine());
    }

    /// The j-invariant ignores the projective scaling of `(A : C)`.
    #[test]
    fn j_invariant_projective(a in arb_fp(), lambda in arb_nonzero_fp()) {
        let affine = ProjectiveCurve::from_affine(a);
        let scaled = ProjectiveCurve { a: a * lambda, c: lambda };
        prop_assert_eq!(affine.j_invariant(), scaled.j_invariant());
    }

    /// Three-for-one inversion.
    #[test]
    fn batch_inversion(a in arb_nonzero_fp(), b in arb_nonzero_fp(), c in arb_nonzero_fp()) {
        let (ia, ib, ic) = batch3_invert(&a, &b, &c);
        prop_assert_eq!(ia, a.invert());
        prop_assert_eq!(ib, b.invert());
        prop_assert_eq!(ic, c.invert());
    }
}
