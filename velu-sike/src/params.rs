//! SIKEp434 parameter set.
//!
//! `p = 2^216 · 3^137 - 1`. Alice (side A) walks 4-isogenies through the
//! 2^216-torsion, Bob (side B) 3-isogenies through the 3^137-torsion,
//! both starting from `E₆: y² = x³ + 6x² + x`.

use crate::fp::{Fp2, Fp434};
use once_cell::race::OnceBool;
use subtle::ConstantTimeEq;
use velu_core::montgomery::{pow2k, pow3k};
use velu_core::{Field, ProjectiveCurve, ProjectivePoint};

/// Field modulus, little-endian limbs.
pub const MODULUS: [u64; 7] = [
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xfdc1767ae2ffffff,
    0x7bc65c783158aea3,
    0x6cfc5fd681c52056,
    0x0002341f27177344,
];

/// `2^448 mod p`.
pub const R: [u64; 7] = [
    0x000000000000742c,
    0x0000000000000000,
    0x0000000000000000,
    0xb90ff404fc000000,
    0xd801a4fb559facd4,
    0xe93254545f77410c,
    0x0000eceea7bd2eda,
];

/// `2^896 mod p`.
pub const R2: [u64; 7] = [
    0x28e55b65dcd69b30,
    0xacec7367768798c2,
    0xab27973f8311688d,
    0x175cc6af8d6c7c0b,
    0xabcd92bf2dde347e,
    0x69e16a61c7686d9a,
    0x000025a89bcdd12a,
];

/// `-p^(-1) mod 2^64`; the low limb of `p` is all ones.
pub const INV: u64 = 1;

/// Bytes in an encoded 𝔽p element.
pub const FP_BYTES: usize = 55;

/// Bytes in an encoded 𝔽p² element.
pub const FP2_BYTES: usize = 2 * FP_BYTES;

/// Power of two in `p + 1`; side A computes `2^216`-isogenies.
pub const E_A: u32 = 216;

/// Power of three in `p + 1`; side B computes `3^137`-isogenies.
pub const E_B: u32 = 137;

/// Secret scalar bit length for side A.
pub const SECRET_BITS_A: usize = 216;

/// Secret scalar bit length for side B, `⌊log₂ 3^137⌋`.
pub const SECRET_BITS_B: usize = 217;

/// Secret scalar size in bytes for side A.
pub const SECRET_BYTES_A: usize = SECRET_BITS_A.div_ceil(8);

/// Secret scalar size in bytes for side B.
pub const SECRET_BYTES_B: usize = SECRET_BITS_B.div_ceil(8);

/// Public key size: three 𝔽p² x-coordinates.
pub const PUBLIC_KEY_SIZE: usize = 3 * FP2_BYTES;

/// SIDH shared secret size: one 𝔽p² j-invariant.
pub const SHARED_SECRET_SIZE: usize = FP2_BYTES;

/// KEM shared secret size in bytes.
pub const KEM_SIZE: usize = 16;

/// PKE message length; also the size of the implicit-rejection string `S`.
pub const MSG_LEN: usize = KEM_SIZE + 8;

/// KEM ciphertext size: ephemeral public key followed by the masked message.
pub const CIPHERTEXT_SIZE: usize = PUBLIC_KEY_SIZE + MSG_LEN;

/// KEM private key export size: Bob scalar followed by `S`.
pub const PRIVATE_KEY_SIZE: usize = SECRET_BYTES_B + MSG_LEN;

/// KEM decapsulation key size: private key export followed by the public key.
pub const DECAPSULATION_KEY_SIZE: usize = PRIVATE_KEY_SIZE + PUBLIC_KEY_SIZE;

/// Montgomery coefficient `A = 6` of the starting curve.
pub const START_A: Fp434 = Fp434::from_montgomery([
    0x000000000002b90a,
    0x0000000000000000,
    0x0000000000000000,
    0x5adccb2822000000,
    0x187d24f39f0cafb4,
    0x9d353a4d394145a0,
    0x00012559a0403298,
]);

/// x(P_A), generator of the 2^216-torsion with [2^215]P_A != (0, 0).
pub const XPA: Fp2 = Fp2::new(
    Fp434::from_montgomery([
        0x05adf455c5c345bf,
        0x91935c5cc767ac2b,
        0xafe4e879951f0257,
        0x70e792dc89fa27b1,
        0xf797f526bb48c8cd,
        0x2181db6131af621f,
        0x00000a1c08b1ecc4,
    ]),
    Fp434::from_montgomery([
        0x74840eb87cda7788,
        0x2971aa0ecf9f9d0b,
        0xcb5732bdf41715d5,
        0x8cd8e51f7aacffaa,
        0xa7f424730d7e419f,
        0xd671eb919a179e8c,
        0x0000ffa26c5a924a,
    ]),
);

/// x(Q_A), with [2^215]Q_A = (0, 0).
pub const XQA: Fp2 = Fp2::new(
    Fp434::from_montgomery([
        0xfec6e64588b7273b,
        0xd2a626d74cbbf1c6,
        0xf8f58f07a78098c7,
        0xe23941f470841b03,
        0x1b63eda2045538dd,
        0x735cfeb0ffd49215,
        0x0001c4cb77542876,
    ]),
    Fp434::from_montgomery([
        0xadb0f733c17ffdd6,
        0x6affbd037da0a050,
        0x680ec43db144e02f,
        0x1e2e5d5ff524e374,
        0xe2dda115260e2995,
        0xa6e4b552e2ede508,
        0x00018eccddf4b53e,
    ]),
);

/// x(Q_A - P_A).
pub const XRA: Fp2 = Fp2::new(
    Fp434::from_montgomery([
        0xa2075b4e8c7885fc,
        0xa909294709f178b8,
        0xbe7d4da7f4cca9f6,
        0x7729f9a5e99410b5,
        0x0e71ce2c1a75e6df,
        0xafc6090dcc8dd91a,
        0x00010ad1937cae4b,
    ]),
    Fp434::from_montgomery([
        0x262e034d27834901,
        0xc16303f506ea719a,
        0xa27c95b76aaf9ad7,
        0xd8dc6f9ab991b77a,
        0x2898d8d50d08ed3f,
        0xd8b55ecc73b90b3d,
        0x000035e03e6fed0d,
    ]),
);

/// x(P_B), generator of the 3^137-torsion.
pub const XPB: Fp2 = Fp2::new(
    Fp434::from_montgomery([
        0xded01231bfb695da,
        0xa2299bf8c48b6a7d,
        0x45a970bf278d1d2b,
        0xe0d1b87cc8a2515a,
        0x25cdf8138b1550a9,
        0x72738a0d9e44e214,
        0x000162cd632c1f4f,
    ]),
    Fp434::from_montgomery([
        0xba2ca6a22a042f30,
        0x27bc4a0f4cc644e6,
        0x2abeddd27e05c679,
        0xb5163098adaa6ba6,
        0xa562a954150d8a42,
        0xaebde6bd5467f39f,
        0x0000927b87de8593,
    ]),
);

/// x(Q_B), independent of P_B.
pub const XQB: Fp2 = Fp2::new(
    Fp434::from_montgomery([
        0x2d8fca79bcfb4068,
        0x8ce615c0aba9962c,
        0xfd870aabfa3449cc,
        0xf875a8fad793f97d,
        0xc2dbc0177d40961b,
        0x9513bdfb7e423a3b,
        0x000026b9090c0b00,
    ]),
    Fp434::from_montgomery([
        0x109ed8b7b317ceef,
        0x9bc9812137d33fc7,
        0xe562c16267d5ebf9,
        0x3644094c154868c6,
        0x912f331bdfa83430,
        0xd2d92a03c4208914,
        0x00016cf676b998e4,
    ]),
);

/// x(Q_B - P_B).
pub const XRB: Fp2 = Fp2::new(
    Fp434::from_montgomery([
        0x041645591f768bef,
        0xb3f6696d250ea7b2,
        0x8877bb319bdc3d17,
        0x90879832b3299973,
        0x2d3f5181472a19d8,
        0x824abc766964bf08,
        0x0000c50dc8bec309,
    ]),
    Fp434::from_montgomery([
        0xc16dce19b28e668c,
        0x1fbb1b31c8b01ac0,
        0xc134d3e1c8ef10d5,
        0xe488c9ad8d933a33,
        0x4daceea1661c1405,
        0x5f31d57fc8782907,
        0x0000a104e8be2c77,
    ]),
);

/// Alice's tree strategy: each entry `k` means `2k` doublings between pushes.
pub const STRATEGY_A: [u32; 107] = [
    36, 23, 17, 10, 8, 5, 3, 2, 1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 3, 2, 1, 1, 1, 1, 1, 3, 2, 2, 1, 1, 1,
    1, 1, 1, 6, 3, 3, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 8, 6, 3, 2, 1, 1, 1, 1, 1, 1, 2, 1, 1,
    1, 1, 3, 2, 1, 1, 1, 1, 1, 12, 9, 6, 3, 2, 1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 3, 2, 1, 1, 1, 1, 1,
    1, 4, 3, 2, 1, 1, 1, 1, 1, 1, 1, 1,
];

/// Bob's tree strategy: each entry `k` means `k` triplings between pushes.
pub const STRATEGY_B: [u32; 136] = [
    42, 31, 22, 14, 9, 6, 4, 3, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 3, 2, 1, 1, 1, 1, 1, 1,
    5, 3, 2, 1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 8, 5, 3, 2, 1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 3, 2, 1, 1, 1,
    1, 1, 12, 6, 4, 3, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 4, 3, 2, 1, 1, 1, 1, 1, 1, 1, 1,
    14, 9, 6, 4, 3, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 3, 2, 1, 1, 1, 1, 1, 1, 5, 3, 2, 1,
    1, 1, 1, 1, 1, 2, 1, 1, 1,
];

// Entry sums, checked at startup to catch a corrupted table.
const STRATEGY_A_DEPTH: usize = 278;
const STRATEGY_B_DEPTH: usize = 363;

/// The starting curve `E₆`.
pub fn start_curve() -> ProjectiveCurve<Fp2> {
    ProjectiveCurve::from_affine(Fp2::from_base(START_A))
}

static SELF_CHECK: OnceBool = OnceBool::new();

/// Verify the constant tables once per process.
///
/// # Panics
/// Panics if the tables are inconsistent; this indicates a corrupted build.
pub fn self_check() {
    SELF_CHECK.get_or_init(|| {
        assert_eq!(
            INV.wrapping_mul(MODULUS[0]),
            u64::MAX,
            "sike: bad Montgomery inverse"
        );
        assert!(
            <Fp434 as velu_core::PrimeField>::from_u64(6) == START_A,
            "sike: inconsistent Montgomery constants"
        );
        assert_eq!(
            STRATEGY_A.iter().sum::<u32>() as usize,
            STRATEGY_A_DEPTH,
            "sike: corrupt strategy A"
        );
        assert_eq!(
            STRATEGY_B.iter().sum::<u32>() as usize,
            STRATEGY_B_DEPTH,
            "sike: corrupt strategy B"
        );

        let curve = start_curve();
        let a24 = curve.a24_plus();
        let order_two = |x: &Fp2| pow2k(&ProjectivePoint::from_affine(*x), &a24, E_A - 1);
        let pa = order_two(&XPA);
        let qa = order_two(&XQA);
        assert!(
            bool::from(qa.x.is_zero() & !qa.z.is_zero() & !pa.x.is_zero() & !pa.z.is_zero()),
            "sike: bad side A basis"
        );

        let a24pm = curve.a24_plus_minus();
        let order_three = |x: &Fp2| pow3k(&ProjectivePoint::from_affine(*x), &a24pm, E_B - 1);
        let pb = order_three(&XPB);
        let qb = order_three(&XQB);
        let distinct = !(pb.x * qb.z).ct_eq(&(qb.x * pb.z));
        let nonzero = !pb.z.is_zero() & !qb.z.is_zero();
        let killed = pow3k(&pb, &a24pm, 1).z.is_zero() & pow3k(&qb, &a24pm, 1).z.is_zero();
        assert!(
            bool::from(distinct & nonzero & killed),
            "sike: bad side B basis"
        );

        log::debug!("sike-p434 parameter self-check passed");
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(SECRET_BYTES_A, 27);
        assert_eq!(SECRET_BYTES_B, 28);
        assert_eq!(PUBLIC_KEY_SIZE, 330);
        assert_eq!(CIPHERTEXT_SIZE, 354);
        assert_eq!(PRIVATE_KEY_SIZE, 52);
    }

    #[test]
    fn test_self_check_passes() {
        self_check();
    }

    #[test]
    fn test_start_curve_j_invariant() {
        let j = start_curve().j_invariant();
        let expected = Fp2::from_base(<Fp434 as velu_core::PrimeField>::from_u64(287_496));
        assert_eq!(j, expected);
    }
}
