//! Small-degree isogenies on the Kummer line.
//!
//! Each isogeny is generated from a kernel point of exact order 3, 4 or an
//! odd prime ℓ and then pushes further points through. The codomain comes
//! back in whichever projective form the next step consumes.

use crate::field::Field;
use crate::montgomery::{xadd, xdbl, A24Plus, A24PlusMinus, ProjectiveCurve, ProjectivePoint};

/// An isogeny with precomputed kernel constants.
pub trait Isogeny<F: Field> {
    /// Projective form of the codomain curve.
    type Codomain;

    /// The image curve.
    fn codomain(&self) -> Self::Codomain;

    /// Push a point through the isogeny.
    fn evaluate(&self, p: &ProjectivePoint<F>) -> ProjectivePoint<F>;
}

/// Degree-3 isogeny (SIKE Algorithms 15 and 16).
#[derive(Clone, Copy, Debug)]
pub struct ThreeIsogeny<F> {
    k1: F,
    k2: F,
    codomain: A24PlusMinus<F>,
}

impl<F: Field> ThreeIsogeny<F> {
    /// Generate from a kernel point of order 3.
    pub fn generate(kernel: &ProjectivePoint<F>) -> Self {
        let k1 = kernel.x - kernel.z;
        let t0 = k1.square();
        let k2 = kernel.x + kernel.z;
        let t1 = k2.square();
        let t2 = t0 + t1;
        let t3 = (k1 + k2).square() - t2;
        let t2 = t1 + t3;
        let t3 = t3 + t0;
        let t4 = (t3 + t0).double() + t1;
        let a24m = t2 * t4;
        let a24p = t3 * ((t1 + t2).double() + t0);
        Self {
            k1,
            k2,
            codomain: A24PlusMinus { a24p, a24m },
        }
    }
}

impl<F: Field> Isogeny<F> for ThreeIsogeny<F> {
    type Codomain = A24PlusMinus<F>;

    fn codomain(&self) -> A24PlusMinus<F> {
        self.codomain
    }

    fn evaluate(&self, p: &ProjectivePoint<F>) -> ProjectivePoint<F> {
        let t0 = (p.x + p.z) * self.k1;
        let t1 = (p.x - p.z) * self.k2;
        ProjectivePoint {
            x: p.x * (t0 + t1).square(),
            z: p.z * (t1 - t0).square(),
        }
    }
}

/// Degree-4 isogeny (SIKE Algorithms 13 and 14).
///
/// The kernel point must not have `x = ±1`.
#[derive(Clone, Copy, Debug)]
pub struct FourIsogeny<F> {
    k1: F,
    k2: F,
    k3: F,
    codomain: A24Plus<F>,
}

impl<F: Field> FourIsogeny<F> {
    /// Generate from a kernel point of order 4.
    pub fn generate(kernel: &ProjectivePoint<F>) -> Self {
        let k2 = kernel.x - kernel.z;
        let k3 = kernel.x + kernel.z;
        let k1 = kernel.z.square().double();
        let c24 = k1.square();
        let k1 = k1.double();
        let a24 = kernel.x.square().double().square();
        Self {
            k1,
            k2,
            k3,
            codomain: A24Plus { a24, c24 },
        }
    }
}

impl<F: Field> Isogeny<F> for FourIsogeny<F> {
    type Codomain = A24Plus<F>;

    fn codomain(&self) -> A24Plus<F> {
        self.codomain
    }

    fn evaluate(&self, p: &ProjectivePoint<F>) -> ProjectivePoint<F> {
        let t0 = p.x + p.z;
        let t1 = p.x - p.z;
        let xq = t0 * self.k2;
        let zq = t1 * self.k3;
        let t0 = t0 * t1 * self.k1;
        let t1 = (xq + zq).square();
        let zq = (xq - zq).square();
        ProjectivePoint {
            x: (t0 + t1) * t1,
            z: zq * (zq - t0),
        }
    }
}

/// Walks `K, [2]K, ..., [count]K` by differential additions.
struct KernelMultiples<F: Field> {
    kernel: ProjectivePoint<F>,
    prev: ProjectivePoint<F>,
    current: ProjectivePoint<F>,
    curve: A24Plus<F>,
    index: u64,
    count: u64,
}

impl<F: Field> KernelMultiples<F> {
    fn new(kernel: &ProjectivePoint<F>, curve: &A24Plus<F>, count: u64) -> Self {
        Self {
            kernel: *kernel,
            prev: ProjectivePoint::IDENTITY,
            current: *kernel,
            curve: *curve,
            index: 0,
            count,
        }
    }
}

impl<F: Field> Iterator for KernelMultiples<F> {
    type Item = ProjectivePoint<F>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.count {
            return None;
        }
        let next = match self.index {
            0 => self.kernel,
            1 => xdbl(&self.kernel, &self.curve),
            _ => xadd(&self.current, &self.kernel, &self.prev),
        };
        if self.index > 0 {
            self.prev = self.current;
        }
        self.current = next;
        self.index += 1;
        Some(next)
    }
}

/// `base^exp` for a public exponent.
fn pow_public<F: Field>(base: &F, exp: u64) -> F {
    let mut acc = F::ONE;
    for bit in (0..64 - exp.leading_zeros()).rev() {
        acc = acc.square();
        if (exp >> bit) & 1 == 1 {
            acc = acc * *base;
        }
    }
    acc
}

/// Isogeny of odd prime degree ℓ via the Edwards-form codomain formulas of
/// Meyer and Reith.
///
/// Holds the kernel generator; each evaluation regenerates the
/// `⌊ℓ/2⌋` kernel multiples, so cost is linear in ℓ per call.
#[derive(Clone, Copy, Debug)]
pub struct OddIsogeny<F: Field> {
    kernel: ProjectivePoint<F>,
    curve: A24Plus<F>,
    degree: u64,
    codomain: ProjectiveCurve<F>,
}

impl<F: Field> OddIsogeny<F> {
    /// Generate from a kernel point of order `degree` on `curve`.
    ///
    /// # Panics
    /// Panics if `degree` is even or less than 3.
    pub fn generate(curve: &ProjectiveCurve<F>, kernel: &ProjectivePoint<F>, degree: u64) -> Self {
        assert!(degree >= 3 && degree % 2 == 1, "degree must be an odd prime");

        let a24 = curve.a24_plus();
        let mut prod_minus = F::ONE;
        let mut prod_plus = F::ONE;
        for m in KernelMultiples::new(kernel, &a24, degree / 2) {
            prod_minus = prod_minus * (m.x - m.z);
            prod_plus = prod_plus * (m.x + m.z);
        }

        // Twisted Edwards coefficients (a : d) = (A + 2C : A - 2C).
        let c2 = curve.c.double();
        let ed_a = curve.a + c2;
        let ed_d = curve.a - c2;
        let ed_a = pow_public(&ed_a, degree) * prod_plus.square().square().square();
        let ed_d = pow_public(&ed_d, degree) * prod_minus.square().square().square();

        Self {
            kernel: *kernel,
            curve: a24,
            degree,
            codomain: ProjectiveCurve {
                a: (ed_a + ed_d).double(),
                c: ed_a - ed_d,
            },
        }
    }

    /// Degree of the isogeny.
    pub fn degree(&self) -> u64 {
        self.degree
    }
}

impl<F: Field> Isogeny<F> for OddIsogeny<F> {
    type Codomain = ProjectiveCurve<F>;

    fn codomain(&self) -> ProjectiveCurve<F> {
        self.codomain
    }

    fn evaluate(&self, p: &ProjectivePoint<F>) -> ProjectivePoint<F> {
        let sum = p.x + p.z;
        let diff = p.x - p.z;
        let mut qx = F::ONE;
        let mut qz = F::ONE;
        for m in KernelMultiples::new(&self.kernel, &self.curve, self.degree / 2) {
            let t1 = (m.x - m.z) * sum;
            let t0 = (m.x + m.z) * diff;
            qx = qx * (t0 + t1);
            qz = qz * (t0 - t1);
        }
        ProjectivePoint {
            x: p.x * qx.square(),
            z: p.z * qz.square(),
        }
    }
}
