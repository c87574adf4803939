//! x-only arithmetic on Montgomery curves `C·y² = C·x³ + A·x² + C·x`.
//!
//! Points live on the Kummer line as projective `(X : Z)` with `Z = 0` the
//! point at infinity. Curve coefficients are projective `(A : C)`; the
//! doubling and tripling formulas consume the equivalent forms
//! [`A24Plus`] `(A + 2C : 4C)` and [`A24PlusMinus`] `(A + 2C : A - 2C)`,
//! which are kept as distinct types.
//!
//! Formulas follow Algorithms 3-10 of the SIKE round-3 submission
//! document and the CSIDH paper.

use crate::field::Field;
use subtle::{Choice, ConditionallySelectable};

/// Projective x-coordinate `(X : Z)` of a curve point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectivePoint<F> {
    /// X coordinate.
    pub x: F,
    /// Z coordinate.
    pub z: F,
}

impl<F: Field> ProjectivePoint<F> {
    /// The point at infinity, `(1 : 0)`.
    pub const IDENTITY: Self = Self {
        x: F::ONE,
        z: F::ZERO,
    };

    /// `(x : 1)`.
    pub fn from_affine(x: F) -> Self {
        Self { x, z: F::ONE }
    }

    /// Set when this is the point at infinity.
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Affine x-coordinate `X / Z`. Costs one inversion.
    pub fn to_affine(&self) -> F {
        self.x * self.z.invert()
    }
}

impl<F: Field> ConditionallySelectable for ProjectivePoint<F> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: F::conditional_select(&a.x, &b.x, choice),
            z: F::conditional_select(&a.z, &b.z, choice),
        }
    }
}

/// Projective curve coefficients `(A : C)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectiveCurve<F> {
    /// A coefficient.
    pub a: F,
    /// C coefficient.
    pub c: F,
}

/// Equivalent curve form `(A + 2C : 4C)`, used by doubling and 4-isogenies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct A24Plus<F> {
    /// `A + 2C`.
    pub a24: F,
    /// `4C`.
    pub c24: F,
}

/// Equivalent curve form `(A + 2C : A - 2C)`, used by tripling and 3-isogenies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct A24PlusMinus<F> {
    /// `A + 2C`.
    pub a24p: F,
    /// `A - 2C`.
    pub a24m: F,
}

impl<F: Field> ProjectiveCurve<F> {
    /// Curve with affine coefficient `A` and `C = 1`.
    pub fn from_affine(a: F) -> Self {
        Self { a, c: F::ONE }
    }

    /// Affine coefficient `A / C`. Costs one inversion.
    pub fn to_affine(&self) -> F {
        self.a * self.c.invert()
    }

    /// `(A + 2C : 4C)`.
    pub fn a24_plus(&self) -> A24Plus<F> {
        let c2 = self.c.double();
        A24Plus {
            a24: self.a + c2,
            c24: c2.double(),
        }
    }

    /// `(A + 2C : A - 2C)`.
    pub fn a24_plus_minus(&self) -> A24PlusMinus<F> {
        let c2 = self.c.double();
        A24PlusMinus {
            a24p: self.a + c2,
            a24m: self.a - c2,
        }
    }

    /// The j-invariant `256 (A² - 3C²)³ / (C⁴ (A² - 4C²))`.
    ///
    /// Independent of the projective representative, so two parties that
    /// reach isomorphic curves by different routes agree on it.
    pub fn j_invariant(&self) -> F {
        let a2 = self.a.square();
        let c2 = self.c.square();
        let t0 = a2 - c2.double() - c2; // A² - 3C²
        let j = t0 - c2; // A² - 4C²
        let j = j * c2.square();
        let t0 = t0.double().double();
        let t0 = t0 * t0.square();
        let t0 = t0.double().double();
        t0 * j.invert()
    }

    /// Recover `(A : 1)` from affine `x(P)`, `x(Q)` and `x(Q - P)`.
    pub fn recover_a(xp: &F, xq: &F, xqmp: &F) -> Self {
        let t1 = *xp + *xq;
        let t0 = *xp * *xq;
        let a = *xqmp * t1 + t0;
        let t0 = t0 * *xqmp;
        let a = a - F::ONE;
        let t0 = t0.double().double();
        let t1 = t1 + *xqmp;
        let a = a.square() * t0.invert() - t1;
        Self::from_affine(a)
    }
}

impl<F: Field> ConditionallySelectable for ProjectiveCurve<F> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            a: F::conditional_select(&a.a, &b.a, choice),
            c: F::conditional_select(&a.c, &b.c, choice),
        }
    }
}

impl<F: Field> A24Plus<F> {
    /// Back to `(A : C)`, returned as the equivalent `(4A : 4C)`.
    pub fn to_curve(&self) -> ProjectiveCurve<F> {
        ProjectiveCurve {
            a: self.a24.double().double() - self.c24.double(),
            c: self.c24,
        }
    }
}

impl<F: Field> A24PlusMinus<F> {
    /// Back to `(A : C)`, returned as the equivalent `(4A : 4C)`.
    pub fn to_curve(&self) -> ProjectiveCurve<F> {
        ProjectiveCurve {
            a: (self.a24p + self.a24m).double(),
            c: self.a24p - self.a24m,
        }
    }
}

/// Differential addition: `x(P + Q)` from `x(P)`, `x(Q)` and `x(Q - P)`.
#[inline]
pub fn xadd<F: Field>(
    p: &ProjectivePoint<F>,
    q: &ProjectivePoint<F>,
    diff: &ProjectivePoint<F>,
) -> ProjectivePoint<F> {
    let t0 = (p.x + p.z) * (q.x - q.z);
    let t1 = (p.x - p.z) * (q.x + q.z);
    ProjectivePoint {
        x: diff.z * (t0 + t1).square(),
        z: diff.x * (t0 - t1).square(),
    }
}

/// Doubling: `x([2]P)`.
#[inline]
pub fn xdbl<F: Field>(p: &ProjectivePoint<F>, curve: &A24Plus<F>) -> ProjectivePoint<F> {
    let t0 = (p.x - p.z).square();
    let t1 = (p.x + p.z).square();
    let z = curve.c24 * t0;
    let x = z * t1;
    let t1 = t1 - t0;
    let t0 = curve.a24 * t1;
    ProjectivePoint {
        x,
        z: (z + t0) * t1,
    }
}

/// Combined ladder step: returns `(x([2]P), x(P + Q))` given `x(Q - P)`.
///
/// Produces exactly the coordinates of separate [`xdbl`] and [`xadd`] calls.
#[inline]
pub fn xdbladd<F: Field>(
    p: &ProjectivePoint<F>,
    q: &ProjectivePoint<F>,
    diff: &ProjectivePoint<F>,
    curve: &A24Plus<F>,
) -> (ProjectivePoint<F>, ProjectivePoint<F>) {
    let t0 = p.x + p.z;
    let t1 = p.x - p.z;
    let x2 = t0.square();
    let t2 = q.x - q.z;
    let xpq = q.x + q.z;
    let t0 = t0 * t2;
    let z2 = t1.square();
    let t1 = t1 * xpq;
    let t2 = x2 - z2;
    let z2 = curve.c24 * z2;
    let x2 = z2 * x2;
    let xpq = curve.a24 * t2;
    let zpq = t0 - t1;
    let z2 = (z2 + xpq) * t2;
    let xpq = t0 + t1;
    (
        ProjectivePoint { x: x2, z: z2 },
        ProjectivePoint {
            x: diff.z * xpq.square(),
            z: diff.x * zpq.square(),
        },
    )
}

/// Tripling: `x([3]P)`.
#[inline]
pub fn xtpl<F: Field>(p: &ProjectivePoint<F>, curve: &A24PlusMinus<F>) -> ProjectivePoint<F> {
    let t0 = p.x - p.z;
    let t2 = t0.square();
    let t1 = p.x + p.z;
    let t3 = t1.square();
    let t4 = t1 + t0;
    let t0 = t1 - t0;
    let t1 = t4.square() - t3 - t2;
    let t5 = t3 * curve.a24p;
    let t3 = t3 * t5;
    let t6 = t2 * curve.a24m;
    let t2 = t2 * t6;
    let t3 = t2 - t3;
    let t2 = t5 - t6;
    let t1 = t2 * t1;
    let t2 = (t3 + t1).square();
    let t1 = (t3 - t1).square();
    ProjectivePoint {
        x: t2 * t4,
        z: t1 * t0,
    }
}

/// `x([2^k]P)` by `k` repeated doublings.
pub fn pow2k<F: Field>(p: &ProjectivePoint<F>, curve: &A24Plus<F>, k: u32) -> ProjectivePoint<F> {
    let mut r = *p;
    for _ in 0..k {
        r = xdbl(&r, curve);
    }
    r
}

/// `x([3^k]P)` by `k` repeated triplings.
pub fn pow3k<F: Field>(
    p: &ProjectivePoint<F>,
    curve: &A24PlusMinus<F>,
    k: u32,
) -> ProjectivePoint<F> {
    let mut r = *p;
    for _ in 0..k {
        r = xtpl(&r, curve);
    }
    r
}

#[inline]
fn scalar_bit(scalar: &[u8], i: usize) -> Choice {
    Choice::from((scalar[i >> 3] >> (i & 7)) & 1)
}

/// Montgomery ladder: `x([k]P)` for a little-endian scalar `k`.
///
/// Always runs `bits` ladder steps, swapping rungs with
/// [`ConditionallySelectable::conditional_swap`], so timing is independent
/// of the scalar value.
///
/// # Panics
/// Panics if `bits > 8 * scalar.len()`.
pub fn scalar_mul<F: Field>(
    p: &ProjectivePoint<F>,
    curve: &A24Plus<F>,
    scalar: &[u8],
    bits: usize,
) -> ProjectivePoint<F> {
    assert!(bits <= 8 * scalar.len(), "scalar shorter than bit length");

    let mut r0 = ProjectivePoint::IDENTITY;
    let mut r1 = *p;
    let mut prev = Choice::from(0);
    for i in (0..bits).rev() {
        let bit = scalar_bit(scalar, i);
        ProjectivePoint::conditional_swap(&mut r0, &mut r1, bit ^ prev);
        prev = bit;
        (r0, r1) = xdbladd(&r0, &r1, p, curve);
    }
    ProjectivePoint::conditional_swap(&mut r0, &mut r1, prev);
    r0
}

/// Right-to-left three-point ladder: `x(P + [k]Q)` from `x(P)`, `x(Q)`, `x(Q - P)`.
///
/// Always runs `bits` steps; leading zero bits execute the same swap and
/// ladder pattern as set bits.
///
/// # Panics
/// Panics if `bits > 8 * scalar.len()`.
pub fn scalar_mul_3pt<F: Field>(
    p: &ProjectivePoint<F>,
    q: &ProjectivePoint<F>,
    qmp: &ProjectivePoint<F>,
    curve: &A24Plus<F>,
    scalar: &[u8],
    bits: usize,
) -> ProjectivePoint<F> {
    assert!(bits <= 8 * scalar.len(), "scalar shorter than bit length");

    let mut r0 = *q;
    let mut r1 = *p;
    let mut r2 = *qmp;
    let mut prev = Choice::from(0);
    for i in 0..bits {
        let bit = scalar_bit(scalar, i);
        ProjectivePoint::conditional_swap(&mut r1, &mut r2, bit ^ prev);
        prev = bit;
        (r0, r2) = xdbladd(&r0, &r2, &r1, curve);
    }
    ProjectivePoint::conditional_swap(&mut r1, &mut r2, prev);
    r1
}

/// Invert three elements with a single field inversion.
///
/// All inputs must be nonzero.
pub fn batch3_invert<F: Field>(x1: &F, x2: &F, x3: &F) -> (F, F, F) {
    let x1x2 = *x1 * *x2;
    let t = (x1x2 * *x3).invert();
    (t * *x2 * *x3, t * *x1 * *x3, t * x1x2)
}
