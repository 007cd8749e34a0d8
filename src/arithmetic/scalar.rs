//! Scalar field arithmetic modulo n = 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001

#![allow(clippy::too_many_arguments)]

use core::fmt;
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use ff::{Field, FromUniformBytes, PrimeField};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::util::{adc, mac, sbb};

/// The number of 64-bit limbs used to represent a [`Scalar`].
const LIMBS: usize = 4;

/// Constant representing the modulus
/// n = 0x73eda753 299d7d48 3339d808 09a1d805 53bda402 fffe5bfe ffffffff 00000001
const MODULUS: [u64; LIMBS] = [
    0xffff_ffff_0000_0001,
    0x53bd_a402_fffe_5bfe,
    0x3339_d808_09a1_d805,
    0x73ed_a753_299d_7d48,
];

/// INV = -n^-1 mod 2^64
const INV: u64 = 0xffff_fffe_ffff_ffff;

/// R = 2^256 mod n
const R: Scalar = Scalar([
    0x0000_0001_ffff_fffe,
    0x5884_b7fa_0003_4802,
    0x998c_4fef_ecbc_4ff5,
    0x1824_b159_acc5_056f,
]);

/// R^2 = 2^512 mod n
const R2: Scalar = Scalar([
    0xc999_e990_f3f2_9c6d,
    0x2b6c_edcb_8792_5c23,
    0x05d3_1496_7254_398f,
    0x0748_d9d9_9f59_ff11,
]);

/// R^3 = 2^768 mod n
const R3: Scalar = Scalar([
    0xc62c_1807_439b_73af,
    0x1b3e_0d18_8cf0_6990,
    0x73d1_3c71_c7b5_f418,
    0x6e2a_5bb9_c8db_33e9,
]);

/// 1 / 2 mod n
const TWO_INV: Scalar = Scalar([
    0x0000_0000_ffff_ffff,
    0xac42_5bfd_0001_a401,
    0xccc6_27f7_f65e_27fa,
    0x0c12_58ac_d662_82b7,
]);

/// GENERATOR = 7, a multiplicative generator of the entire field. In
/// particular it is a quadratic non-residue.
const GENERATOR: Scalar = Scalar([
    0x0000_000e_ffff_fff1,
    0x17e3_63d3_0018_9c0f,
    0xff9c_5787_6f84_57b0,
    0x3513_3220_8fc5_a8c4,
]);

/// The largest e such that 2^e divides n - 1.
const S: u32 = 32;

/// GENERATOR^t, where t = (n - 1) >> S is odd: a primitive 2^S-th root of
/// unity.
const ROOT_OF_UNITY: Scalar = Scalar([
    0xb9b5_8d8c_5f0e_466a,
    0x5b1b_4c80_1819_d7ec,
    0x0af5_3ae3_52a3_1e64,
    0x5bf3_adda_19e9_b27b,
]);

/// ROOT_OF_UNITY^-1
const ROOT_OF_UNITY_INV: Scalar = Scalar([
    0x4256_481a_dcf3_219a,
    0x45f3_7b7f_96b6_cad3,
    0xf9c3_f1d7_5f7a_3b27,
    0x2d2f_c049_658a_fd43,
]);

/// GENERATOR^{2^S}, the generator of the group of order t.
const DELTA: Scalar = Scalar([
    0x70e3_10d3_d146_f96a,
    0x4b64_c089_19e2_99e6,
    0x51e1_1418_6a8b_970d,
    0x6185_d066_27c0_67cb,
]);

/// An element in the prime-order scalar field of the curve.
///
/// The internal representation is four 64-bit limbs in little-endian order.
/// Elements are always in Montgomery form; i.e., Scalar(a) = aR mod n, with
/// R = 2^256.
#[derive(Clone, Copy)]
pub struct Scalar(pub(crate) [u64; LIMBS]);

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.to_bytes();
        write!(f, "Scalar(0x")?;
        for b in bytes.iter().rev() {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Scalar {}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Scalar([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl Eq for Scalar {}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl From<u64> for Scalar {
    fn from(val: u64) -> Self {
        Scalar([val, 0, 0, 0]).mul(&R2)
    }
}

impl Scalar {
    /// Returns the zero scalar (additive identity).
    pub const fn zero() -> Self {
        Scalar([0, 0, 0, 0])
    }

    /// Returns the one scalar (multiplicative identity).
    pub const fn one() -> Self {
        R
    }

    /// Determine if this scalar is zero.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::zero())
    }

    /// Converts from a canonical little-endian integer, represented by four
    /// 64-bit limbs, into the Montgomery domain.
    pub const fn from_raw(val: [u64; LIMBS]) -> Self {
        (&Scalar(val)).mul(&R2)
    }

    /// Attempts to parse the given byte array as a little-endian canonical
    /// scalar.
    ///
    /// Returns `None` if the byte array does not contain an integer in the
    /// range `[0, n)`.
    pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<Self> {
        let mut tmp = Scalar([0; LIMBS]);

        tmp.0[0] = u64::from_le_bytes(<[u8; 8]>::try_from(&bytes[0..8]).expect("8 bytes"));
        tmp.0[1] = u64::from_le_bytes(<[u8; 8]>::try_from(&bytes[8..16]).expect("8 bytes"));
        tmp.0[2] = u64::from_le_bytes(<[u8; 8]>::try_from(&bytes[16..24]).expect("8 bytes"));
        tmp.0[3] = u64::from_le_bytes(<[u8; 8]>::try_from(&bytes[24..32]).expect("8 bytes"));

        // If the value is in the range [0, n) then subtracting n underflows,
        // producing a final borrow of 2^64 - 1.
        let (_, borrow) = sbb(tmp.0[0], MODULUS[0], 0);
        let (_, borrow) = sbb(tmp.0[1], MODULUS[1], borrow);
        let (_, borrow) = sbb(tmp.0[2], MODULUS[2], borrow);
        let (_, borrow) = sbb(tmp.0[3], MODULUS[3], borrow);
        let is_some = (borrow as u8) & 1;

        // Convert to Montgomery form by computing (a.R^0 * R^2) / R = a.R
        CtOption::new(tmp.mul(&R2), Choice::from(is_some))
    }

    /// Returns the little-endian canonical encoding of this scalar.
    ///
    /// The same bytes, read most-significant-bit first, drive the scalar
    /// multiplication ladder on curve points.
    pub fn to_bytes(&self) -> [u8; 32] {
        // Turn into canonical form by computing (a.R) / R = a
        let tmp =
            Scalar::montgomery_reduce(self.0[0], self.0[1], self.0[2], self.0[3], 0, 0, 0, 0);

        let mut res = [0; 32];
        res[0..8].copy_from_slice(&tmp.0[0].to_le_bytes());
        res[8..16].copy_from_slice(&tmp.0[1].to_le_bytes());
        res[16..24].copy_from_slice(&tmp.0[2].to_le_bytes());
        res[24..32].copy_from_slice(&tmp.0[3].to_le_bytes());

        res
    }

    /// Converts a 512-bit little-endian integer into a scalar by reducing it
    /// modulo n. Used to produce uniform scalars from a hash output.
    pub fn from_bytes_wide(bytes: &[u8; 64]) -> Self {
        Scalar::from_u512([
            u64::from_le_bytes(<[u8; 8]>::try_from(&bytes[0..8]).expect("8 bytes")),
            u64::from_le_bytes(<[u8; 8]>::try_from(&bytes[8..16]).expect("8 bytes")),
            u64::from_le_bytes(<[u8; 8]>::try_from(&bytes[16..24]).expect("8 bytes")),
            u64::from_le_bytes(<[u8; 8]>::try_from(&bytes[24..32]).expect("8 bytes")),
            u64::from_le_bytes(<[u8; 8]>::try_from(&bytes[32..40]).expect("8 bytes")),
            u64::from_le_bytes(<[u8; 8]>::try_from(&bytes[40..48]).expect("8 bytes")),
            u64::from_le_bytes(<[u8; 8]>::try_from(&bytes[48..56]).expect("8 bytes")),
            u64::from_le_bytes(<[u8; 8]>::try_from(&bytes[56..64]).expect("8 bytes")),
        ])
    }

    /// Reduces a 512-bit number by decomposing it into two 256-bit digits:
    /// the low half enters Montgomery form through R^2 as usual, the high
    /// half carries an extra factor of 2^256 and so goes through R^3.
    fn from_u512(limbs: [u64; 8]) -> Self {
        let d0 = Scalar([limbs[0], limbs[1], limbs[2], limbs[3]]);
        let d1 = Scalar([limbs[4], limbs[5], limbs[6], limbs[7]]);

        d0.mul(&R2).add(&d1.mul(&R3))
    }

    /// Returns a uniformly random scalar, reduced from 64 bytes of entropy.
    pub fn random(mut rng: impl RngCore) -> Self {
        let mut buf = [0u8; 64];
        rng.fill_bytes(&mut buf);
        Self::from_bytes_wide(&buf)
    }

    /// If the scalar is not yet reduced below n, subtracts the modulus.
    pub(crate) const fn subtract_modulus(&self) -> Self {
        let (r0, borrow) = sbb(self.0[0], MODULUS[0], 0);
        let (r1, borrow) = sbb(self.0[1], MODULUS[1], borrow);
        let (r2, borrow) = sbb(self.0[2], MODULUS[2], borrow);
        let (r3, borrow) = sbb(self.0[3], MODULUS[3], borrow);

        // If underflow occurred on the final limb, borrow is all ones and we
        // keep the original value; otherwise keep the difference.
        let r0 = (self.0[0] & borrow) | (r0 & !borrow);
        let r1 = (self.0[1] & borrow) | (r1 & !borrow);
        let r2 = (self.0[2] & borrow) | (r2 & !borrow);
        let r3 = (self.0[3] & borrow) | (r3 & !borrow);

        Scalar([r0, r1, r2, r3])
    }

    /// Returns self + rhs mod n.
    pub const fn add(&self, rhs: &Self) -> Self {
        let (d0, carry) = adc(self.0[0], rhs.0[0], 0);
        let (d1, carry) = adc(self.0[1], rhs.0[1], carry);
        let (d2, carry) = adc(self.0[2], rhs.0[2], carry);
        let (d3, _) = adc(self.0[3], rhs.0[3], carry);

        // Both inputs are below n < 2^255, so the sum fits in four limbs and
        // a single conditional subtraction normalizes it.
        (&Scalar([d0, d1, d2, d3])).subtract_modulus()
    }

    /// Returns 2 * self, via a single carry chain.
    pub const fn double(&self) -> Self {
        self.add(self)
    }

    /// Returns self - rhs mod n.
    pub const fn sub(&self, rhs: &Self) -> Self {
        let (d0, borrow) = sbb(self.0[0], rhs.0[0], 0);
        let (d1, borrow) = sbb(self.0[1], rhs.0[1], borrow);
        let (d2, borrow) = sbb(self.0[2], rhs.0[2], borrow);
        let (d3, borrow) = sbb(self.0[3], rhs.0[3], borrow);

        // If underflow occurred on the final limb, borrow is all ones; use it
        // as a mask to conditionally add the modulus back.
        let (d0, carry) = adc(d0, MODULUS[0] & borrow, 0);
        let (d1, carry) = adc(d1, MODULUS[1] & borrow, carry);
        let (d2, carry) = adc(d2, MODULUS[2] & borrow, carry);
        let (d3, _) = adc(d3, MODULUS[3] & borrow, carry);

        Scalar([d0, d1, d2, d3])
    }

    /// Returns -self mod n.
    pub const fn neg(&self) -> Self {
        let (d0, borrow) = sbb(MODULUS[0], self.0[0], 0);
        let (d1, borrow) = sbb(MODULUS[1], self.0[1], borrow);
        let (d2, borrow) = sbb(MODULUS[2], self.0[2], borrow);
        let (d3, _) = sbb(MODULUS[3], self.0[3], borrow);

        // Mask off the result if self was zero, so that -0 = 0 and not n.
        let mask =
            (((self.0[0] | self.0[1] | self.0[2] | self.0[3]) == 0) as u64).wrapping_sub(1);

        Scalar([d0 & mask, d1 & mask, d2 & mask, d3 & mask])
    }

    /// Montgomery Reduction
    ///
    /// Takes the 512-bit product of two Montgomery-form operands and divides
    /// out one factor of R, word by word.
    ///
    /// References:
    /// - Handbook of Applied Cryptography, Chapter 14
    ///   Algorithm 14.32
    ///   http://cacr.uwaterloo.ca/hac/about/chap14.pdf
    pub(crate) const fn montgomery_reduce(
        r0: u64,
        r1: u64,
        r2: u64,
        r3: u64,
        r4: u64,
        r5: u64,
        r6: u64,
        r7: u64,
    ) -> Self {
        let k = r0.wrapping_mul(INV);
        let (_, carry) = mac(r0, k, MODULUS[0], 0);
        let (r1, carry) = mac(r1, k, MODULUS[1], carry);
        let (r2, carry) = mac(r2, k, MODULUS[2], carry);
        let (r3, carry) = mac(r3, k, MODULUS[3], carry);
        let (r4, carry2) = adc(r4, 0, carry);

        let k = r1.wrapping_mul(INV);
        let (_, carry) = mac(r1, k, MODULUS[0], 0);
        let (r2, carry) = mac(r2, k, MODULUS[1], carry);
        let (r3, carry) = mac(r3, k, MODULUS[2], carry);
        let (r4, carry) = mac(r4, k, MODULUS[3], carry);
        let (r5, carry2) = adc(r5, carry2, carry);

        let k = r2.wrapping_mul(INV);
        let (_, carry) = mac(r2, k, MODULUS[0], 0);
        let (r3, carry) = mac(r3, k, MODULUS[1], carry);
        let (r4, carry) = mac(r4, k, MODULUS[2], carry);
        let (r5, carry) = mac(r5, k, MODULUS[3], carry);
        let (r6, carry2) = adc(r6, carry2, carry);

        let k = r3.wrapping_mul(INV);
        let (_, carry) = mac(r3, k, MODULUS[0], 0);
        let (r4, carry) = mac(r4, k, MODULUS[1], carry);
        let (r5, carry) = mac(r5, k, MODULUS[2], carry);
        let (r6, carry) = mac(r6, k, MODULUS[3], carry);
        let (r7, _) = adc(r7, carry2, carry);

        // The result may be within n of the correct value.
        (&Scalar([r4, r5, r6, r7])).subtract_modulus()
    }

    /// Returns self * rhs mod n.
    pub const fn mul(&self, rhs: &Self) -> Self {
        // Schoolbook multiplication into a 512-bit intermediate.
        let (r0, carry) = mac(0, self.0[0], rhs.0[0], 0);
        let (r1, carry) = mac(0, self.0[0], rhs.0[1], carry);
        let (r2, carry) = mac(0, self.0[0], rhs.0[2], carry);
        let (r3, r4) = mac(0, self.0[0], rhs.0[3], carry);

        let (r1, carry) = mac(r1, self.0[1], rhs.0[0], 0);
        let (r2, carry) = mac(r2, self.0[1], rhs.0[1], carry);
        let (r3, carry) = mac(r3, self.0[1], rhs.0[2], carry);
        let (r4, r5) = mac(r4, self.0[1], rhs.0[3], carry);

        let (r2, carry) = mac(r2, self.0[2], rhs.0[0], 0);
        let (r3, carry) = mac(r3, self.0[2], rhs.0[1], carry);
        let (r4, carry) = mac(r4, self.0[2], rhs.0[2], carry);
        let (r5, r6) = mac(r5, self.0[2], rhs.0[3], carry);

        let (r3, carry) = mac(r3, self.0[3], rhs.0[0], 0);
        let (r4, carry) = mac(r4, self.0[3], rhs.0[1], carry);
        let (r5, carry) = mac(r5, self.0[3], rhs.0[2], carry);
        let (r6, r7) = mac(r6, self.0[3], rhs.0[3], carry);

        Scalar::montgomery_reduce(r0, r1, r2, r3, r4, r5, r6, r7)
    }

    /// Returns self * self mod n.
    pub const fn square(&self) -> Self {
        // Off-diagonal products, each needed twice; compute once and shift.
        let (r1, carry) = mac(0, self.0[0], self.0[1], 0);
        let (r2, carry) = mac(0, self.0[0], self.0[2], carry);
        let (r3, r4) = mac(0, self.0[0], self.0[3], carry);

        let (r3, carry) = mac(r3, self.0[1], self.0[2], 0);
        let (r4, r5) = mac(r4, self.0[1], self.0[3], carry);

        let (r5, r6) = mac(r5, self.0[2], self.0[3], 0);

        let r7 = r6 >> 63;
        let r6 = (r6 << 1) | (r5 >> 63);
        let r5 = (r5 << 1) | (r4 >> 63);
        let r4 = (r4 << 1) | (r3 >> 63);
        let r3 = (r3 << 1) | (r2 >> 63);
        let r2 = (r2 << 1) | (r1 >> 63);
        let r1 = r1 << 1;

        // Diagonal products, interleaved with the doubled terms.
        let (r0, carry) = mac(0, self.0[0], self.0[0], 0);
        let (r1, carry) = adc(r1, 0, carry);
        let (r2, carry) = mac(r2, self.0[1], self.0[1], carry);
        let (r3, carry) = adc(r3, 0, carry);
        let (r4, carry) = mac(r4, self.0[2], self.0[2], carry);
        let (r5, carry) = adc(r5, 0, carry);
        let (r6, carry) = mac(r6, self.0[3], self.0[3], carry);
        let (r7, _) = adc(r7, 0, carry);

        Scalar::montgomery_reduce(r0, r1, r2, r3, r4, r5, r6, r7)
    }

    /// Exponentiates self by the given little-endian exponent.
    ///
    /// **This operation is variable time with respect to the exponent.** All
    /// in-crate callers pass fixed public exponents.
    pub fn pow_vartime(&self, by: &[u64; LIMBS]) -> Self {
        let mut res = Self::one();
        for e in by.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();

                if ((*e >> i) & 1) == 1 {
                    res = res.mul(self);
                }
            }
        }
        res
    }

    /// Computes the multiplicative inverse of this scalar, returning `None`
    /// in the case that it is zero.
    pub fn invert(&self) -> CtOption<Self> {
        // Exponentiate by n - 2. The exponent is a public constant.
        let t = self.pow_vartime(&[
            0xffff_fffe_ffff_ffff,
            0x53bd_a402_fffe_5bfe,
            0x3339_d808_09a1_d805,
            0x73ed_a753_299d_7d48,
        ]);

        CtOption::new(t, !self.is_zero())
    }

    /// Computes a square root of this scalar, if one exists.
    pub fn sqrt(&self) -> CtOption<Self> {
        // Tonelli-Shanks, since n ≡ 1 mod 2^32. The exponent is
        // (t - 1) / 2 for t the odd part of n - 1.
        ff::helpers::sqrt_tonelli_shanks(
            self,
            [
                0x7fff_2dff_7fff_ffff,
                0x04d0_ec02_a9de_d201,
                0x94ce_bea4_199c_ec04,
                0x0000_0000_39f6_d3a9,
            ],
        )
    }
}

impl Field for Scalar {
    const ZERO: Self = Self::zero();
    const ONE: Self = Self::one();

    fn random(rng: impl RngCore) -> Self {
        Self::random(rng)
    }

    fn square(&self) -> Self {
        self.square()
    }

    fn double(&self) -> Self {
        self.double()
    }

    fn invert(&self) -> CtOption<Self> {
        self.invert()
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        ff::helpers::sqrt_ratio_generic(num, div)
    }

    fn sqrt(&self) -> CtOption<Self> {
        self.sqrt()
    }

    fn is_zero_vartime(&self) -> bool {
        self.0 == Self::zero().0
    }
}

impl PrimeField for Scalar {
    type Repr = [u8; 32];

    fn from_repr(repr: Self::Repr) -> CtOption<Self> {
        Self::from_bytes(&repr)
    }

    fn to_repr(&self) -> Self::Repr {
        self.to_bytes()
    }

    fn is_odd(&self) -> Choice {
        Choice::from(self.to_bytes()[0] & 1)
    }

    const MODULUS: &'static str =
        "0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001";
    const NUM_BITS: u32 = 255;
    const CAPACITY: u32 = 254;
    const TWO_INV: Self = TWO_INV;
    const MULTIPLICATIVE_GENERATOR: Self = GENERATOR;
    const S: u32 = S;
    const ROOT_OF_UNITY: Self = ROOT_OF_UNITY;
    const ROOT_OF_UNITY_INV: Self = ROOT_OF_UNITY_INV;
    const DELTA: Self = DELTA;
}

impl FromUniformBytes<64> for Scalar {
    /// Converts a 512-bit little-endian integer into a `Scalar` by reducing
    /// it modulo n.
    fn from_uniform_bytes(bytes: &[u8; 64]) -> Self {
        Self::from_bytes_wide(bytes)
    }
}

impl Add<&Scalar> for &Scalar {
    type Output = Scalar;

    fn add(self, other: &Scalar) -> Scalar {
        Scalar::add(self, other)
    }
}

impl Add<&Scalar> for Scalar {
    type Output = Scalar;

    fn add(self, other: &Scalar) -> Scalar {
        Scalar::add(&self, other)
    }
}

impl Add<Scalar> for Scalar {
    type Output = Scalar;

    fn add(self, other: Scalar) -> Scalar {
        Scalar::add(&self, &other)
    }
}

impl AddAssign<Scalar> for Scalar {
    fn add_assign(&mut self, rhs: Scalar) {
        *self = Scalar::add(self, &rhs);
    }
}

impl AddAssign<&Scalar> for Scalar {
    fn add_assign(&mut self, rhs: &Scalar) {
        *self = Scalar::add(self, rhs);
    }
}

impl Sub<&Scalar> for &Scalar {
    type Output = Scalar;

    fn sub(self, other: &Scalar) -> Scalar {
        Scalar::sub(self, other)
    }
}

impl Sub<&Scalar> for Scalar {
    type Output = Scalar;

    fn sub(self, other: &Scalar) -> Scalar {
        Scalar::sub(&self, other)
    }
}

impl Sub<Scalar> for Scalar {
    type Output = Scalar;

    fn sub(self, other: Scalar) -> Scalar {
        Scalar::sub(&self, &other)
    }
}

impl SubAssign<Scalar> for Scalar {
    fn sub_assign(&mut self, rhs: Scalar) {
        *self = Scalar::sub(self, &rhs);
    }
}

impl SubAssign<&Scalar> for Scalar {
    fn sub_assign(&mut self, rhs: &Scalar) {
        *self = Scalar::sub(self, rhs);
    }
}

impl Mul<&Scalar> for &Scalar {
    type Output = Scalar;

    fn mul(self, other: &Scalar) -> Scalar {
        Scalar::mul(self, other)
    }
}

impl Mul<&Scalar> for Scalar {
    type Output = Scalar;

    fn mul(self, other: &Scalar) -> Scalar {
        Scalar::mul(&self, other)
    }
}

impl Mul<Scalar> for Scalar {
    type Output = Scalar;

    fn mul(self, other: Scalar) -> Scalar {
        Scalar::mul(&self, &other)
    }
}

impl MulAssign<Scalar> for Scalar {
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = Scalar::mul(self, &rhs);
    }
}

impl MulAssign<&Scalar> for Scalar {
    fn mul_assign(&mut self, rhs: &Scalar) {
        *self = Scalar::mul(self, rhs);
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        Scalar::neg(&self)
    }
}

impl Neg for &Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        Scalar::neg(self)
    }
}

impl Sum for Scalar {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, item| acc.add(&item))
    }
}

impl<'a> Sum<&'a Scalar> for Scalar {
    fn sum<I: Iterator<Item = &'a Scalar>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, item| acc.add(item))
    }
}

impl Product for Scalar {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, item| acc.mul(&item))
    }
}

impl<'a> Product<&'a Scalar> for Scalar {
    fn product<I: Iterator<Item = &'a Scalar>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, item| acc.mul(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::util::test_helpers::{biguint_to_u64_array, u64_array_to_biguint};
    use num_bigint::BigUint;
    use proptest::prelude::*;

    fn modulus_big() -> BigUint {
        u64_array_to_biguint(&MODULUS)
    }

    fn scalar_from_big(x: &BigUint) -> Scalar {
        Scalar::from_raw(biguint_to_u64_array(&(x % modulus_big())))
    }

    fn to_big(a: &Scalar) -> BigUint {
        BigUint::from_bytes_le(&a.to_bytes())
    }

    #[test]
    fn one_plus_one() {
        let two = Scalar::one().add(&Scalar::one());
        assert_eq!(two, Scalar::from(2));

        let mut expected = [0u8; 32];
        expected[0] = 2;
        assert_eq!(two.to_bytes(), expected);
    }

    #[test]
    fn serialization_round_trip() {
        let a = Scalar::from_raw([
            0x1fff_3231_233f_fffd,
            0x4884_b7fa_0003_4802,
            0x998c_4fef_ecbc_4ff3,
            0x1824_b159_acc5_0562,
        ]);
        assert_eq!(Scalar::from_bytes(&a.to_bytes()).unwrap(), a);
    }

    #[test]
    fn from_bytes_rejects_modulus() {
        let mut bytes = [0u8; 32];
        for (i, limb) in MODULUS.iter().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_le_bytes());
        }
        assert!(bool::from(Scalar::from_bytes(&bytes).is_none()));

        // n - 1 is accepted.
        bytes[0] -= 1;
        assert_eq!(Scalar::from_bytes(&bytes).unwrap(), Scalar::one().neg());
    }

    #[test]
    fn negation() {
        let a = Scalar::from(5);
        assert_eq!(a.add(&a.neg()), Scalar::zero());
        assert_eq!(Scalar::zero().neg(), Scalar::zero());
    }

    #[test]
    fn doubling() {
        let a = Scalar::from(7);
        assert_eq!(a.double(), a.add(&a));
        assert_eq!(Scalar::zero().double(), Scalar::zero());
    }

    #[test]
    fn inversion() {
        assert!(bool::from(Scalar::zero().invert().is_none()));
        let a = Scalar::from(12345);
        assert_eq!(a.invert().unwrap().mul(&a), Scalar::one());
    }

    #[test]
    fn fermat() {
        let a = Scalar::from(0xdead_beef_cafe);
        let mut exp = MODULUS;
        exp[0] -= 1;
        assert_eq!(a.pow_vartime(&exp), Scalar::one());
    }

    #[test]
    fn sqrt_of_residue() {
        let nine = Scalar::from(9);
        let root = nine.sqrt().unwrap();
        assert_eq!(root.square(), nine);
    }

    #[test]
    fn sqrt_of_nonresidue() {
        // The multiplicative generator is a quadratic non-residue.
        assert!(bool::from(Scalar::from(7).sqrt().is_none()));
    }

    #[test]
    fn prime_field_constants_are_consistent() {
        assert_eq!(GENERATOR, Scalar::from(7));
        assert_eq!(TWO_INV.mul(&Scalar::from(2)), Scalar::one());
        assert_eq!(
            ROOT_OF_UNITY.mul(&ROOT_OF_UNITY_INV),
            Scalar::one()
        );

        // ROOT_OF_UNITY has exact order 2^S.
        assert_eq!(
            ROOT_OF_UNITY.pow_vartime(&[1u64 << S, 0, 0, 0]),
            Scalar::one()
        );
        assert_ne!(
            ROOT_OF_UNITY.pow_vartime(&[1u64 << (S - 1), 0, 0, 0]),
            Scalar::one()
        );

        assert_eq!(
            GENERATOR.pow_vartime(&[1u64 << S, 0, 0, 0]),
            DELTA
        );

        assert_eq!(Scalar::from_raw([1, 0, 0, 0]), Scalar::one());
    }

    #[test]
    fn wide_reduction() {
        // 2^512 - 1 reduced mod n.
        let reduced = Scalar::from_bytes_wide(&[0xff; 64]);
        let expected = (BigUint::from(1u8) << 512usize) - 1u8;
        assert_eq!(to_big(&reduced), expected % modulus_big());
    }

    proptest! {
        #[test]
        fn mul_matches_biguint(
            x in proptest::array::uniform4(any::<u64>()),
            y in proptest::array::uniform4(any::<u64>()),
        ) {
            let xb = u64_array_to_biguint(&x);
            let yb = u64_array_to_biguint(&y);
            let a = scalar_from_big(&xb);
            let b = scalar_from_big(&yb);
            let n = modulus_big();
            prop_assert_eq!(to_big(&a.mul(&b)), (&xb % &n) * (&yb % &n) % &n);
        }

        #[test]
        fn add_sub_matches_biguint(
            x in proptest::array::uniform4(any::<u64>()),
            y in proptest::array::uniform4(any::<u64>()),
        ) {
            let xb = u64_array_to_biguint(&x);
            let yb = u64_array_to_biguint(&y);
            let a = scalar_from_big(&xb);
            let b = scalar_from_big(&yb);
            let n = modulus_big();
            prop_assert_eq!(to_big(&a.add(&b)), ((&xb % &n) + (&yb % &n)) % &n);
            prop_assert_eq!(to_big(&a.sub(&b)), ((&xb % &n) + (&n - (&yb % &n))) % &n);
        }

        #[test]
        fn square_matches_mul(x in proptest::array::uniform4(any::<u64>())) {
            let a = scalar_from_big(&u64_array_to_biguint(&x));
            prop_assert_eq!(a.square(), a.mul(&a));
        }
    }
}
