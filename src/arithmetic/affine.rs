//! Affine points and the standard BLS12-381 point encodings

#![allow(clippy::op_ref)]

use core::fmt;
use core::ops::{Mul, Neg};

use group::{prime::PrimeCurveAffine, GroupEncoding, UncompressedEncoding};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::field::FieldElement;
use super::projective::ProjectivePoint;
use super::scalar::Scalar;
use super::CURVE_EQUATION_B;

/// A non-trivial third root of unity in the base field, defining the
/// endomorphism (x, y) -> (BETA * x, y) used by the fast subgroup check.
const BETA: FieldElement = FieldElement::from_raw_unchecked([
    0x30f1_361b_798a_64e8,
    0xf3b8_ddab_7ece_5a2a,
    0x16a8_ca3a_c615_77f7,
    0xc26a_2ff8_74fd_029b,
    0x3636_b766_6070_1c6e,
    0x051b_a4ab_241b_6160,
]);

/// A point on the BLS12-381 G1 curve in affine coordinates.
///
/// The identity is represented by the canonical coordinates (0, 1) together
/// with the `infinity` flag, which is authoritative for equality and
/// serialization.
///
/// Values produced by the checked decoders are guaranteed to be in the
/// r-order subgroup; the `_unchecked` decoders can break that invariant.
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) infinity: Choice,
}

impl AffinePoint {
    /// Returns the identity of the group: the point at infinity.
    pub fn identity() -> Self {
        AffinePoint {
            x: FieldElement::zero(),
            y: FieldElement::one(),
            infinity: Choice::from(1u8),
        }
    }

    /// Returns the base point of the G1 group, as fixed by the BLS12-381
    /// standard.
    pub fn generator() -> Self {
        AffinePoint {
            x: FieldElement::from_raw_unchecked([
                0x5cb3_8790_fd53_0c16,
                0x7817_fc67_9976_fff5,
                0x154f_95c7_143b_a1c1,
                0xf0ae_6acd_f3d0_e747,
                0xedce_6ecc_21db_f440,
                0x1201_7741_9e0b_fb75,
            ]),
            y: FieldElement::from_raw_unchecked([
                0xbaac_93d5_0ce7_2271,
                0x8c22_631a_7918_fd8e,
                0xdd59_5f13_5707_25ce,
                0x51ac_5829_5040_5194,
                0x0e1c_8c3f_ad00_59c0,
                0x0bbc_3efc_5008_a26a,
            ]),
            infinity: Choice::from(0u8),
        }
    }

    /// Returns true if this point is the identity (the point at infinity).
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    /// Returns true if this point is on the curve. This should always return
    /// true unless an "unchecked" API was used.
    pub fn is_on_curve(&self) -> Choice {
        // y^2 - x^3 ?= 4
        (self.y.square().sub(&self.x.square().mul(&self.x))).ct_eq(&CURVE_EQUATION_B)
            | self.infinity
    }

    /// Applies the curve endomorphism (x, y) -> (BETA * x, y), which acts on
    /// the r-order subgroup as multiplication by a primitive cube root of
    /// unity in the scalar field.
    pub(crate) fn endomorphism(&self) -> Self {
        AffinePoint {
            x: self.x.mul(&BETA),
            y: self.y,
            infinity: self.infinity,
        }
    }

    /// Returns true if this point is free of an h-torsion component, and so
    /// lies in the r-order subgroup. This should always return true unless
    /// an "unchecked" API was used.
    pub fn is_torsion_free(&self) -> Choice {
        // Algorithm from Section 6 of https://eprint.iacr.org/2021/1130
        // (updated proof of correctness in https://eprint.iacr.org/2022/352):
        // the point is in the subgroup iff endomorphism(P) == -[x^2] P for
        // the curve seed x.
        let minus_x_squared_times_p = ProjectivePoint::from(self).mul_by_x().mul_by_x().neg();
        let endomorphism_p = self.endomorphism();
        minus_x_squared_times_p.ct_eq(&ProjectivePoint::from(endomorphism_p))
    }

    /// Serializes this point into the standard 48-byte compressed form.
    ///
    /// Byte 0 carries three flag bits: bit 7 marks the compressed encoding,
    /// bit 6 the identity, and bit 5 whether the y-coordinate is the
    /// lexicographically larger of the two roots. The remaining 381 bits
    /// hold the x-coordinate, big-endian (zero for the identity).
    pub fn to_compressed(&self) -> [u8; 48] {
        // Strictly speaking, self.x is zero already when self.infinity is
        // true, but we do not want to rely on that invariant here.
        let mut res =
            FieldElement::conditional_select(&self.x, &FieldElement::zero(), self.infinity)
                .to_bytes();

        res[0] |= 1u8 << 7;

        res[0] |= u8::conditional_select(&0u8, &(1u8 << 6), self.infinity);

        res[0] |= u8::conditional_select(
            &0u8,
            &(1u8 << 5),
            (!self.infinity) & self.y.lexicographically_largest(),
        );

        res
    }

    /// Serializes this point into the standard 96-byte uncompressed form:
    /// x followed by y, big-endian, with the infinity flag in bit 6 of
    /// byte 0 (and a zeroed body for the identity).
    pub fn to_uncompressed(&self) -> [u8; 96] {
        let mut res = [0; 96];

        res[0..48].copy_from_slice(
            &FieldElement::conditional_select(&self.x, &FieldElement::zero(), self.infinity)
                .to_bytes()[..],
        );
        res[48..96].copy_from_slice(
            &FieldElement::conditional_select(&self.y, &FieldElement::zero(), self.infinity)
                .to_bytes()[..],
        );

        res[0] |= u8::conditional_select(&0u8, &(1u8 << 6), self.infinity);

        res
    }

    /// Attempts to deserialize a compressed point, verifying that the result
    /// is in the r-order subgroup.
    pub fn from_compressed(bytes: &[u8; 48]) -> CtOption<Self> {
        // The point is already known to be on the curve: the y-coordinate
        // recovery in from_compressed_unchecked only succeeds on curve
        // points. Only the subgroup check remains.
        Self::from_compressed_unchecked(bytes)
            .and_then(|p| CtOption::new(p, p.is_torsion_free()))
    }

    /// Attempts to deserialize a compressed point, without checking that the
    /// result is in the correct subgroup.
    ///
    /// **This is dangerous to call unless you trust the bytes you are
    /// reading; otherwise, API invariants may be broken.** Please consider
    /// using [`AffinePoint::from_compressed`] instead.
    pub fn from_compressed_unchecked(bytes: &[u8; 48]) -> CtOption<Self> {
        // Obtain the three flags from the start of the byte sequence.
        let compression_flag_set = Choice::from((bytes[0] >> 7) & 1);
        let infinity_flag_set = Choice::from((bytes[0] >> 6) & 1);
        let sort_flag_set = Choice::from((bytes[0] >> 5) & 1);

        // Attempt to obtain the x-coordinate.
        let x = {
            let mut tmp = [0; 48];
            tmp.copy_from_slice(&bytes[0..48]);

            // Mask away the flag bits.
            tmp[0] &= 0b0001_1111;

            FieldElement::from_bytes(&tmp)
        };

        x.and_then(|x| {
            // If the infinity flag is set, return the identity provided the
            // other flags and the body are consistent with it.
            CtOption::new(
                AffinePoint::identity(),
                infinity_flag_set & // Infinity flag should be set
                compression_flag_set & // Compression flag should be set
                (!sort_flag_set) & // Sort flag should not be set
                x.is_zero(), // The x-coordinate should be zero
            )
            .or_else(|| {
                // Recover a y-coordinate given x by y = sqrt(x^3 + 4).
                (x.square().mul(&x).add(&CURVE_EQUATION_B))
                    .sqrt()
                    .and_then(|y| {
                        // Switch to the root dictated by the sort flag.
                        let y = FieldElement::conditional_select(
                            &y,
                            &y.neg(),
                            y.lexicographically_largest() ^ sort_flag_set,
                        );

                        CtOption::new(
                            AffinePoint {
                                x,
                                y,
                                infinity: infinity_flag_set,
                            },
                            (!infinity_flag_set) & // Infinity flag should not be set
                            compression_flag_set, // Compression flag should be set
                        )
                    })
            })
        })
    }

    /// Attempts to deserialize an uncompressed point, verifying that the
    /// result is on the curve and in the r-order subgroup.
    pub fn from_uncompressed(bytes: &[u8; 96]) -> CtOption<Self> {
        Self::from_uncompressed_unchecked(bytes)
            .and_then(|p| CtOption::new(p, p.is_on_curve() & p.is_torsion_free()))
    }

    /// Attempts to deserialize an uncompressed point, without checking that
    /// the result is on the curve or in the correct subgroup.
    ///
    /// **This is dangerous to call unless you trust the bytes you are
    /// reading; otherwise, API invariants may be broken.** Please consider
    /// using [`AffinePoint::from_uncompressed`] instead.
    pub fn from_uncompressed_unchecked(bytes: &[u8; 96]) -> CtOption<Self> {
        // Obtain the three flags from the start of the byte sequence.
        let compression_flag_set = Choice::from((bytes[0] >> 7) & 1);
        let infinity_flag_set = Choice::from((bytes[0] >> 6) & 1);
        let sort_flag_set = Choice::from((bytes[0] >> 5) & 1);

        // Attempt to obtain the x-coordinate.
        let x = {
            let mut tmp = [0; 48];
            tmp.copy_from_slice(&bytes[0..48]);

            // Mask away the flag bits.
            tmp[0] &= 0b0001_1111;

            FieldElement::from_bytes(&tmp)
        };

        // Attempt to obtain the y-coordinate.
        let y = {
            let mut tmp = [0; 48];
            tmp.copy_from_slice(&bytes[48..96]);

            FieldElement::from_bytes(&tmp)
        };

        x.and_then(|x| {
            y.and_then(|y| {
                let p = AffinePoint::conditional_select(
                    &AffinePoint {
                        x,
                        y,
                        infinity: infinity_flag_set,
                    },
                    &AffinePoint::identity(),
                    infinity_flag_set,
                );

                CtOption::new(
                    p,
                    // If the infinity flag is set, the coordinates should
                    // have been zero.
                    ((!infinity_flag_set) | (infinity_flag_set & x.is_zero() & y.is_zero())) &
                    // The compression flag should not have been set, as this
                    // is an uncompressed element.
                    (!compression_flag_set) &
                    // The sort flag has no meaning here and should not have
                    // been set.
                    (!sort_flag_set),
                )
            })
        })
    }
}

impl Default for AffinePoint {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for AffinePoint {}

impl ConditionallySelectable for AffinePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        AffinePoint {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl ConstantTimeEq for AffinePoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        // Two points are equal when both are the identity, or when neither
        // is and their coordinates match; the flag dominates the (canonical)
        // identity coordinates.
        (self.infinity & other.infinity)
            | ((!self.infinity)
                & (!other.infinity)
                & self.x.ct_eq(&other.x)
                & self.y.ct_eq(&other.y))
    }
}

impl Eq for AffinePoint {}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl From<ProjectivePoint> for AffinePoint {
    fn from(p: ProjectivePoint) -> AffinePoint {
        AffinePoint::from(&p)
    }
}

impl From<&ProjectivePoint> for AffinePoint {
    fn from(p: &ProjectivePoint) -> AffinePoint {
        // The identity has z = 0, whose "inverse" is mapped to zero; the
        // selection below then routes it to the canonical identity.
        let zinv = p.z.invert().unwrap_or(FieldElement::zero());
        let x = p.x.mul(&zinv);
        let y = p.y.mul(&zinv);

        let tmp = AffinePoint {
            x,
            y,
            infinity: Choice::from(0u8),
        };

        AffinePoint::conditional_select(&tmp, &AffinePoint::identity(), zinv.is_zero())
    }
}

impl Neg for &AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        AffinePoint {
            x: self.x,
            y: FieldElement::conditional_select(&self.y.neg(), &FieldElement::one(), self.infinity),
            infinity: self.infinity,
        }
    }
}

impl Neg for AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        -&self
    }
}

impl Mul<&Scalar> for &AffinePoint {
    type Output = ProjectivePoint;

    fn mul(self, other: &Scalar) -> ProjectivePoint {
        ProjectivePoint::from(self) * other
    }
}

impl Mul<&Scalar> for AffinePoint {
    type Output = ProjectivePoint;

    fn mul(self, other: &Scalar) -> ProjectivePoint {
        ProjectivePoint::from(&self) * other
    }
}

impl Mul<Scalar> for AffinePoint {
    type Output = ProjectivePoint;

    fn mul(self, other: Scalar) -> ProjectivePoint {
        ProjectivePoint::from(&self) * &other
    }
}

impl PrimeCurveAffine for AffinePoint {
    type Scalar = Scalar;
    type Curve = ProjectivePoint;

    fn identity() -> Self {
        AffinePoint::identity()
    }

    fn generator() -> Self {
        AffinePoint::generator()
    }

    fn is_identity(&self) -> Choice {
        AffinePoint::is_identity(self)
    }

    fn to_curve(&self) -> ProjectivePoint {
        self.into()
    }
}

impl GroupEncoding for AffinePoint {
    type Repr = CompressedPoint;

    fn from_bytes(bytes: &Self::Repr) -> CtOption<Self> {
        Self::from_compressed(&bytes.0)
    }

    fn from_bytes_unchecked(bytes: &Self::Repr) -> CtOption<Self> {
        Self::from_compressed_unchecked(&bytes.0)
    }

    fn to_bytes(&self) -> Self::Repr {
        CompressedPoint(self.to_compressed())
    }
}

impl UncompressedEncoding for AffinePoint {
    type Uncompressed = UncompressedPoint;

    fn from_uncompressed(bytes: &Self::Uncompressed) -> CtOption<Self> {
        Self::from_uncompressed(&bytes.0)
    }

    fn from_uncompressed_unchecked(bytes: &Self::Uncompressed) -> CtOption<Self> {
        Self::from_uncompressed_unchecked(&bytes.0)
    }

    fn to_uncompressed(&self) -> Self::Uncompressed {
        UncompressedPoint(self.to_uncompressed())
    }
}

/// The standard 48-byte compressed encoding of a G1 point.
#[derive(Clone, Copy)]
pub struct CompressedPoint(pub(crate) [u8; 48]);

impl fmt::Debug for CompressedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0[..].fmt(f)
    }
}

impl Default for CompressedPoint {
    fn default() -> Self {
        CompressedPoint([0; 48])
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for CompressedPoint {}

impl AsRef<[u8]> for CompressedPoint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for CompressedPoint {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl ConstantTimeEq for CompressedPoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Eq for CompressedPoint {}

impl PartialEq for CompressedPoint {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

/// The standard 96-byte uncompressed encoding of a G1 point.
#[derive(Clone, Copy)]
pub struct UncompressedPoint(pub(crate) [u8; 96]);

impl fmt::Debug for UncompressedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0[..].fmt(f)
    }
}

impl Default for UncompressedPoint {
    fn default() -> Self {
        UncompressedPoint([0; 96])
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for UncompressedPoint {}

impl AsRef<[u8]> for UncompressedPoint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for UncompressedPoint {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl ConstantTimeEq for UncompressedPoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Eq for UncompressedPoint {}

impl PartialEq for UncompressedPoint {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const COMPRESSED_GENERATOR: [u8; 48] = hex!(
        "97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905
         a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb"
    );

    const UNCOMPRESSED_GENERATOR: [u8; 96] = hex!(
        "17f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905
         a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb
         08b3f481e3aaa0f1a09e30ed741d8ae4fcf5e095d5d00af6
         00db18cb2c04b3edd03cc744a2888ae40caa232946c5e7e1"
    );

    #[test]
    fn beta_is_a_nontrivial_cube_root_of_unity() {
        assert_eq!(
            BETA,
            FieldElement::from_bytes(&hex!(
                "00000000000000005f19672fdf76ce51ba69c6076a0f77ea
                 ddb3a93be6f89688de17d813620a00022e01fffffffefffe"
            ))
            .unwrap()
        );
        assert_ne!(BETA, FieldElement::one());
        assert_ne!(BETA.mul(&BETA), FieldElement::one());
        assert_eq!(BETA.mul(&BETA).mul(&BETA), FieldElement::one());
    }

    #[test]
    fn endomorphism_fixes_y() {
        let g = AffinePoint::generator();
        let phi_g = g.endomorphism();
        assert_eq!(phi_g.y, g.y);
        assert!(bool::from(phi_g.is_on_curve()));
        assert_ne!(phi_g, g);
    }

    #[test]
    fn identity_and_generator_are_on_curve() {
        assert!(bool::from(AffinePoint::identity().is_on_curve()));
        assert!(bool::from(AffinePoint::generator().is_on_curve()));
    }

    #[test]
    fn point_equality() {
        let a = AffinePoint::generator();
        let b = AffinePoint::identity();

        assert_eq!(a, a);
        assert_eq!(b, b);
        assert_ne!(a, b);

        // The flag dominates the coordinates.
        let c = AffinePoint {
            x: a.x,
            y: a.y,
            infinity: Choice::from(1u8),
        };
        assert_eq!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn conditional_selection() {
        let a = AffinePoint::generator();
        let b = AffinePoint::identity();

        assert_eq!(AffinePoint::conditional_select(&a, &b, Choice::from(0u8)), a);
        assert_eq!(AffinePoint::conditional_select(&a, &b, Choice::from(1u8)), b);
    }

    #[test]
    fn negation() {
        let a = AffinePoint::generator();
        assert_eq!(-(-a), a);
        assert_eq!(
            ProjectivePoint::from(a) + (-a),
            ProjectivePoint::identity()
        );

        // Negating the identity leaves its canonical coordinates intact.
        let neg_id = -AffinePoint::identity();
        assert!(bool::from(neg_id.is_identity()));
        assert_eq!(neg_id.y, FieldElement::one());
    }

    #[test]
    fn torsion_check_accepts_subgroup_points() {
        assert!(bool::from(AffinePoint::identity().is_torsion_free()));
        assert!(bool::from(AffinePoint::generator().is_torsion_free()));
    }

    #[test]
    fn torsion_check_rejects_h_torsion_component() {
        // A point on the curve but not in the r-order subgroup.
        let a = AffinePoint {
            x: FieldElement::from_raw_unchecked([
                0x0aba_f895_b97e_43c8,
                0xba4c_6432_eb9b_61b0,
                0x1250_6f52_adfe_307f,
                0x7502_8c34_3933_6b72,
                0x8474_4f05_b8e9_bd71,
                0x113d_554f_b095_54f7,
            ]),
            y: FieldElement::from_raw_unchecked([
                0x73e9_0e88_f5cf_01c0,
                0x3700_7b65_dd31_97e2,
                0x5cf9_a199_2f0d_7c78,
                0x4f83_c10b_9eb3_330d,
                0xf6a6_3f6f_07f6_0961,
                0x0c53_b5b9_7e63_4df3,
            ]),
            infinity: Choice::from(0u8),
        };
        assert!(bool::from(a.is_on_curve()));
        assert!(!bool::from(a.is_torsion_free()));
    }

    #[test]
    fn compressed_generator_round_trip() {
        let bytes = AffinePoint::generator().to_compressed();
        assert_eq!(bytes, COMPRESSED_GENERATOR);
        // Compression flag set, infinity flag clear.
        assert_eq!(bytes[0] >> 7, 1);
        assert_eq!((bytes[0] >> 6) & 1, 0);

        assert_eq!(
            AffinePoint::from_compressed(&bytes).unwrap(),
            AffinePoint::generator()
        );
    }

    #[test]
    fn compressed_identity_round_trip() {
        let bytes = AffinePoint::identity().to_compressed();
        let mut expected = [0u8; 48];
        expected[0] = 0xc0;
        assert_eq!(bytes, expected);

        let p = AffinePoint::from_compressed(&bytes).unwrap();
        assert!(bool::from(p.is_identity()));
    }

    #[test]
    fn compressed_sort_flag_selects_root() {
        let g = AffinePoint::generator();
        let neg_g = -g;

        // G and -G share an x-coordinate and differ only in the sort bit.
        let a = g.to_compressed();
        let b = neg_g.to_compressed();
        assert_eq!(a[1..], b[1..]);
        assert_ne!(a[0], b[0]);

        assert_eq!(AffinePoint::from_compressed(&b).unwrap(), neg_g);
    }

    #[test]
    fn compressed_rejects_bad_flags() {
        // Infinity flag together with the sort flag.
        let mut bytes = [0u8; 48];
        bytes[0] = 0xe0;
        assert!(bool::from(AffinePoint::from_compressed(&bytes).is_none()));

        // Infinity flag without the compression flag.
        bytes[0] = 0x40;
        assert!(bool::from(AffinePoint::from_compressed(&bytes).is_none()));

        // Infinity flag with a non-zero body.
        bytes[0] = 0xc0;
        bytes[47] = 1;
        assert!(bool::from(AffinePoint::from_compressed(&bytes).is_none()));

        // Compression flag clear on a finite point.
        let mut bytes = AffinePoint::generator().to_compressed();
        bytes[0] &= !(1u8 << 7);
        assert!(bool::from(AffinePoint::from_compressed(&bytes).is_none()));
    }

    #[test]
    fn compressed_rejects_out_of_range_x() {
        // An all-ones body exceeds the field modulus.
        let mut bytes = [0xff; 48];
        bytes[0] = 0x9f;
        assert!(bool::from(
            AffinePoint::from_compressed_unchecked(&bytes).is_none()
        ));
    }

    #[test]
    fn compressed_rejects_nonresidue_x() {
        // x = 1 gives x^3 + 4 = 5, which is not a square in the base field.
        let mut bytes = [0u8; 48];
        bytes[47] = 1;
        bytes[0] |= 1u8 << 7;
        assert!(bool::from(
            AffinePoint::from_compressed_unchecked(&bytes).is_none()
        ));
    }

    #[test]
    fn compressed_unchecked_accepts_non_subgroup_point() {
        // x = 5 lies on the curve but generates a point outside the r-order
        // subgroup, so only the unchecked decoder accepts it.
        let mut bytes = [0u8; 48];
        bytes[47] = 5;
        bytes[0] = 0xa0;

        let p = AffinePoint::from_compressed_unchecked(&bytes).unwrap();
        assert!(bool::from(p.is_on_curve()));
        assert!(!bool::from(p.is_torsion_free()));

        assert!(bool::from(AffinePoint::from_compressed(&bytes).is_none()));
    }

    #[test]
    fn uncompressed_generator_round_trip() {
        let bytes = AffinePoint::generator().to_uncompressed();
        assert_eq!(bytes, UNCOMPRESSED_GENERATOR);

        assert_eq!(
            AffinePoint::from_uncompressed(&bytes).unwrap(),
            AffinePoint::generator()
        );
    }

    #[test]
    fn uncompressed_identity_round_trip() {
        let bytes = AffinePoint::identity().to_uncompressed();
        let mut expected = [0u8; 96];
        expected[0] = 0x40;
        assert_eq!(bytes, expected);

        let p = AffinePoint::from_uncompressed(&bytes).unwrap();
        assert!(bool::from(p.is_identity()));
    }

    #[test]
    fn uncompressed_rejects_bad_flags() {
        // Compression flag set on an uncompressed encoding.
        let mut bytes = AffinePoint::generator().to_uncompressed();
        bytes[0] |= 1u8 << 7;
        assert!(bool::from(
            AffinePoint::from_uncompressed(&bytes).is_none()
        ));

        // Sort flag set.
        let mut bytes = AffinePoint::generator().to_uncompressed();
        bytes[0] |= 1u8 << 5;
        assert!(bool::from(
            AffinePoint::from_uncompressed(&bytes).is_none()
        ));

        // Infinity flag with a non-zero body.
        let mut bytes = AffinePoint::generator().to_uncompressed();
        bytes[0] |= 1u8 << 6;
        assert!(bool::from(
            AffinePoint::from_uncompressed(&bytes).is_none()
        ));
    }

    #[test]
    fn uncompressed_rejects_off_curve_point() {
        // Perturb the y-coordinate of the generator.
        let mut bytes = AffinePoint::generator().to_uncompressed();
        bytes[95] ^= 1;
        assert!(bool::from(
            AffinePoint::from_uncompressed(&bytes).is_none()
        ));
        // The unchecked decoder parses it, the on-curve check is what must
        // reject it.
        assert!(bool::from(
            AffinePoint::from_uncompressed_unchecked(&bytes).is_some()
        ));
    }

    #[test]
    fn group_encoding_round_trip() {
        use group::GroupEncoding;

        let g = AffinePoint::generator();
        let bytes = GroupEncoding::to_bytes(&g);
        assert_eq!(bytes.as_ref(), &COMPRESSED_GENERATOR[..]);
        assert_eq!(AffinePoint::from_bytes(&bytes).unwrap(), g);

        let uncompressed = UncompressedEncoding::to_uncompressed(&g);
        assert_eq!(
            <AffinePoint as UncompressedEncoding>::from_uncompressed(&uncompressed).unwrap(),
            g
        );
    }
}
