//! A pure-Rust implementation of group operations on the BLS12-381 G1 curve.
//!
//! Curve equation: `y² = x³ + 4` over the 381-bit base field.

pub(crate) mod affine;
pub(crate) mod field;
pub(crate) mod projective;
pub(crate) mod scalar;
mod util;

use self::field::FieldElement;

/// b = 4
pub(crate) const CURVE_EQUATION_B: FieldElement = FieldElement::from_raw_unchecked([
    0xaa27_0000_000c_fff3,
    0x53cc_0032_fc34_000a,
    0x478f_e97a_6b0a_807f,
    0xb1d3_7ebe_e6ba_24d7,
    0x8ec9_733b_bf78_ab2f,
    0x09d6_4551_3d83_de7e,
]);

/// Absolute value of the BLS12-381 curve seed `x`. The seed itself is
/// negative; the sign is applied outside the addition ladders that consume
/// this constant.
pub(crate) const BLS_X: u64 = 0xd201_0000_0001_0000;

/// `true` since the BLS12-381 seed is `-0xd201000000010000`.
pub(crate) const BLS_X_IS_NEGATIVE: bool = true;
