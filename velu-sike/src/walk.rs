//! Strategy-driven walks through the isogeny tree.
//!
//! A secret kernel of order `2^216` (side A) or `3^137` (side B) is
//! factored into a chain of 4- or 3-isogenies. The strategy tables say how
//! many multiplications to perform before pushing the stacked points
//! through the next small isogeny.

use crate::fp::Fp2;
use crate::params::{
    start_curve, SECRET_BITS_A, SECRET_BITS_B, STRATEGY_A, STRATEGY_B, XPA, XPB, XQA, XQB, XRA,
    XRB,
};
use velu_core::montgomery::{batch3_invert, pow2k, pow3k, scalar_mul_3pt};
use velu_core::{
    A24Plus, A24PlusMinus, FourIsogeny, Isogeny, ProjectiveCurve, ProjectivePoint, ThreeIsogeny,
};
use zeroize::Zeroize;

/// Deepest the stack gets for either strategy is 12.
const MAX_DEPTH: usize = 16;

/// One party's view of the walk.
pub(crate) trait Side {
    /// Curve form consumed by this side's multiplication and produced by its isogeny.
    type Form: Copy;

    /// The small isogeny this side composes.
    type Step: Isogeny<Fp2, Codomain = Self::Form>;

    /// Multiplications between pushes, see [`traverse`].
    const STRATEGY: &'static [u32];

    /// Ladder length for secret scalars.
    const SECRET_BITS: usize;

    /// Convert `(A : C)` into this side's form.
    fn form(curve: &ProjectiveCurve<Fp2>) -> Self::Form;

    /// Multiply by the small prime power `k` times.
    fn multiply(p: &ProjectivePoint<Fp2>, form: &Self::Form, k: u32) -> ProjectivePoint<Fp2>;

    /// Build the step isogeny from a kernel point of prime-power order.
    fn step(kernel: &ProjectivePoint<Fp2>) -> Self::Step;

    /// Back to `(A : C)`.
    fn curve(form: &Self::Form) -> ProjectiveCurve<Fp2>;

    /// `x(P)`, `x(Q)`, `x(Q - P)` for the torsion this side walks.
    fn own_basis() -> [Fp2; 3];

    /// The other side's basis, pushed through to form the public key.
    fn peer_basis() -> [Fp2; 3];
}

/// Alice: 4-isogenies over the `2^216`-torsion.
pub(crate) struct SideA;

/// Bob: 3-isogenies over the `3^137`-torsion.
pub(crate) struct SideB;

impl Side for SideA {
    type Form = A24Plus<Fp2>;
    type Step = FourIsogeny<Fp2>;

    const STRATEGY: &'static [u32] = &STRATEGY_A;
    const SECRET_BITS: usize = SECRET_BITS_A;

    fn form(curve: &ProjectiveCurve<Fp2>) -> A24Plus<Fp2> {
        curve.a24_plus()
    }

    fn multiply(p: &ProjectivePoint<Fp2>, form: &A24Plus<Fp2>, k: u32) -> ProjectivePoint<Fp2> {
        pow2k(p, form, 2 * k)
    }

    fn step(kernel: &ProjectivePoint<Fp2>) -> FourIsogeny<Fp2> {
        FourIsogeny::generate(kernel)
    }

    fn curve(form: &A24Plus<Fp2>) -> ProjectiveCurve<Fp2> {
        form.to_curve()
    }

    fn own_basis() -> [Fp2; 3] {
        [XPA, XQA, XRA]
    }

    fn peer_basis() -> [Fp2; 3] {
        [XPB, XQB, XRB]
    }
}

impl Side for SideB {
    type Form = A24PlusMinus<Fp2>;
    type Step = ThreeIsogeny<Fp2>;

    const STRATEGY: &'static [u32] = &STRATEGY_B;
    const SECRET_BITS: usize = SECRET_BITS_B;

    fn form(curve: &ProjectiveCurve<Fp2>) -> A24PlusMinus<Fp2> {
        curve.a24_plus_minus()
    }

    fn multiply(
        p: &ProjectivePoint<Fp2>,
        form: &A24PlusMinus<Fp2>,
        k: u32,
    ) -> ProjectivePoint<Fp2> {
        pow3k(p, form, k)
    }

    fn step(kernel: &ProjectivePoint<Fp2>) -> ThreeIsogeny<Fp2> {
        ThreeIsogeny::generate(kernel)
    }

    fn curve(form: &A24PlusMinus<Fp2>) -> ProjectiveCurve<Fp2> {
        form.to_curve()
    }

    fn own_basis() -> [Fp2; 3] {
        [XPB, XQB, XRB]
    }

    fn peer_basis() -> [Fp2; 3] {
        [XPA, XQA, XRA]
    }
}

/// Walk from `curve` along the isogeny with the given kernel.
///
/// Every point in `extra` is replaced by its image on the final curve,
/// which is returned. The sequence of field operations depends only on
/// the strategy table.
pub(crate) fn traverse<S: Side>(
    curve: &ProjectiveCurve<Fp2>,
    kernel: &ProjectivePoint<Fp2>,
    extra: &mut [ProjectivePoint<Fp2>],
) -> ProjectiveCurve<Fp2> {
    let n = S::STRATEGY.len();
    let mut form = S::form(curve);
    let mut stack = [(ProjectivePoint::IDENTITY, 0usize); MAX_DEPTH];
    let mut depth = 0;
    let mut r = *kernel;
    let mut row = 0;
    let mut next = 0;

    for j in 1..=n {
        while row <= n - j {
            stack[depth] = (r, row);
            depth += 1;
            let k = S::STRATEGY[next];
            next += 1;
            r = S::multiply(&r, &form, k);
            row += k as usize;
        }

        let phi = S::step(&r);
        form = phi.codomain();
        for (p, _) in stack[..depth].iter_mut() {
            *p = phi.evaluate(p);
        }
        for p in extra.iter_mut() {
            *p = phi.evaluate(p);
        }

        depth -= 1;
        (r, row) = stack[depth];
    }

    let phi = S::step(&r);
    for p in extra.iter_mut() {
        *p = phi.evaluate(p);
    }

    for (p, _) in stack.iter_mut() {
        p.x.zeroize();
        p.z.zeroize();
    }
    r.x.zeroize();
    r.z.zeroize();

    S::curve(&phi.codomain())
}

/// Affine x-coordinates of the peer basis pushed through the secret isogeny.
pub(crate) fn public_points<S: Side>(scalar: &[u8]) -> [Fp2; 3] {
    let curve = start_curve();
    let [xp, xq, xr] = S::own_basis();
    let mut kernel = scalar_mul_3pt(
        &ProjectivePoint::from_affine(xp),
        &ProjectivePoint::from_affine(xq),
        &ProjectivePoint::from_affine(xr),
        &curve.a24_plus(),
        scalar,
        S::SECRET_BITS,
    );

    let mut images = S::peer_basis().map(ProjectivePoint::from_affine);
    traverse::<S>(&curve, &kernel, &mut images);
    kernel.x.zeroize();
    kernel.z.zeroize();

    let [p, q, r] = images;
    let (zp, zq, zr) = batch3_invert(&p.z, &q.z, &r.z);
    [p.x * zp, q.x * zq, r.x * zr]
}

/// j-invariant of the curve reached by walking from the peer's public curve.
pub(crate) fn shared_j<S: Side>(scalar: &[u8], peer: &[Fp2; 3]) -> Fp2 {
    let [xp, xq, xr] = *peer;
    let curve = ProjectiveCurve::recover_a(&xp, &xq, &xr);
    let mut kernel = scalar_mul_3pt(
        &ProjectivePoint::from_affine(xp),
        &ProjectivePoint::from_affine(xq),
        &ProjectivePoint::from_affine(xr),
        &curve.a24_plus(),
        scalar,
        S::SECRET_BITS,
    );

    let end = traverse::<S>(&curve, &kernel, &mut []);
    kernel.x.zeroize();
    kernel.z.zeroize();
    end.j_invariant()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{E_A, E_B};

    /// Replays the walk control flow and reports the deepest stack.
    fn max_depth(strategy: &[u32]) -> usize {
        let n = strategy.len();
        let mut stack = [0usize; 64];
        let (mut depth, mut max, mut row, mut next) = (0, 0, 0, 0);
        for j in 1..=n {
            while row <= n - j {
                stack[depth] = row;
                depth += 1;
                max = max.max(depth);
                row += strategy[next] as usize;
                next += 1;
            }
            depth -= 1;
            row = stack[depth];
        }
        assert_eq!(next, n);
        max
    }

    #[test]
    fn test_strategy_fits_stack() {
        assert!(max_depth(&STRATEGY_A) <= MAX_DEPTH);
        assert!(max_depth(&STRATEGY_B) <= MAX_DEPTH);
        assert_eq!(STRATEGY_A.len() + 1, E_A as usize / 2);
        assert_eq!(STRATEGY_B.len() + 1, E_B as usize);
    }

    #[test]
    fn test_side_a_shared_matches_side_b() {
        let mut sa = [0u8; 27];
        sa[0] = 0x2a;
        sa[13] = 0x91;
        let mut sb = [0u8; 28];
        sb[0] = 0x03;
        sb[20] = 0x77;

        let pka = public_points::<SideA>(&sa);
        let pkb = public_points::<SideB>(&sb);
        assert_eq!(shared_j::<SideA>(&sa, &pkb), shared_j::<SideB>(&sb, &pka));
    }
}
