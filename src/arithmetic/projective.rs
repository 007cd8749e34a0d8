//! Projective points

#![allow(clippy::op_ref)]

use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use group::{
    prime::{PrimeCurve, PrimeGroup},
    Curve, Group, GroupEncoding,
};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::affine::{AffinePoint, CompressedPoint};
use super::field::FieldElement;
use super::scalar::Scalar;
use super::{BLS_X, BLS_X_IS_NEGATIVE, CURVE_EQUATION_B};

/// A point on the BLS12-381 G1 curve in projective coordinates.
///
/// The identity (the point at infinity) is encoded by Z = 0; any other
/// point (X : Y : Z) corresponds to the affine point (X/Z, Y/Z).
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
}

/// Multiplies by 3 * b = 12 with three doublings and one addition.
#[inline]
fn mul_by_3b(a: &FieldElement) -> FieldElement {
    let a = a.double(); // 2
    let a = a.double(); // 4
    a.double().add(&a) // 12
}

impl ProjectivePoint {
    /// Returns the additive identity of the group, also known as the "neutral
    /// element" or "point at infinity".
    pub const fn identity() -> Self {
        ProjectivePoint {
            x: FieldElement::zero(),
            y: FieldElement::one(),
            z: FieldElement::zero(),
        }
    }

    /// Returns the base point of the G1 group, as fixed by the BLS12-381
    /// standard.
    pub fn generator() -> Self {
        AffinePoint::generator().into()
    }

    /// Returns an element chosen uniformly at random from the r-order
    /// subgroup: a random x-coordinate is lifted to the curve, the cofactor
    /// is cleared, and the procedure retries until the result is not the
    /// identity.
    pub fn random(mut rng: impl RngCore) -> Self {
        loop {
            let x = FieldElement::random(&mut rng);
            let flip_sign = rng.next_u32() % 2 != 0;

            // Obtain the corresponding y-coordinate given x as
            // y = sqrt(x^3 + 4), either root with equal probability.
            let p = (x.square().mul(&x).add(&CURVE_EQUATION_B))
                .sqrt()
                .map(|y| AffinePoint {
                    x,
                    y: if flip_sign { y.neg() } else { y },
                    infinity: Choice::from(0u8),
                });

            if let Some(p) = Option::<AffinePoint>::from(p) {
                let p = ProjectivePoint::from(p).clear_cofactor();

                if bool::from(!p.is_identity()) {
                    return p;
                }
            }
        }
    }

    /// Returns true if this point is the identity (the point at infinity).
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Returns true if this point is on the curve. This should always return
    /// true unless an "unchecked" API was used.
    pub fn is_on_curve(&self) -> Choice {
        // Y^2 Z = X^3 + b Z^3
        (self.y.square().mul(&self.z)).ct_eq(
            &(self
                .x
                .square()
                .mul(&self.x)
                .add(&self.z.square().mul(&self.z).mul(&CURVE_EQUATION_B))),
        ) | self.z.is_zero()
    }

    /// Returns the affine representation of this point.
    pub fn to_affine(&self) -> AffinePoint {
        AffinePoint::from(self)
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        ProjectivePoint {
            x: self.x,
            y: self.y.neg(),
            z: self.z,
        }
    }

    /// Doubles this point.
    pub fn double(&self) -> Self {
        // We implement the exception-free point doubling formula for a = 0
        // from Renes-Costello-Batina 2015 (https://eprint.iacr.org/2015/1060
        // Algorithm 9).

        let t0 = self.y.square();
        let z3 = t0.add(&t0);
        let z3 = z3.add(&z3);
        let z3 = z3.add(&z3);
        let t1 = self.y.mul(&self.z);
        let t2 = self.z.square();
        let t2 = mul_by_3b(&t2);
        let x3 = t2.mul(&z3);
        let y3 = t0.add(&t2);
        let z3 = t1.mul(&z3);
        let t1 = t2.add(&t2);
        let t2 = t1.add(&t2);
        let t0 = t0.sub(&t2);
        let y3 = t0.mul(&y3);
        let y3 = x3.add(&y3);
        let t1 = self.x.mul(&self.y);
        let x3 = t0.mul(&t1);
        let x3 = x3.add(&x3);

        let tmp = ProjectivePoint {
            x: x3,
            y: y3,
            z: z3,
        };

        // The formula maps the identity to a non-canonical representation of
        // it, so substitute the canonical one.
        ProjectivePoint::conditional_select(&tmp, &ProjectivePoint::identity(), self.is_identity())
    }

    /// Adds this point to another point.
    pub fn add(&self, rhs: &Self) -> Self {
        // We implement the complete addition formula for a = 0 from
        // Renes-Costello-Batina 2015 (https://eprint.iacr.org/2015/1060
        // Algorithm 7). It is branchless and valid for all inputs, including
        // equal or opposite points and the identity.

        let t0 = self.x.mul(&rhs.x);
        let t1 = self.y.mul(&rhs.y);
        let t2 = self.z.mul(&rhs.z);
        let t3 = self.x.add(&self.y);
        let t4 = rhs.x.add(&rhs.y);
        let t3 = t3.mul(&t4);
        let t4 = t0.add(&t1);
        let t3 = t3.sub(&t4);
        let t4 = self.y.add(&self.z);
        let x3 = rhs.y.add(&rhs.z);
        let t4 = t4.mul(&x3);
        let x3 = t1.add(&t2);
        let t4 = t4.sub(&x3);
        let x3 = self.x.add(&self.z);
        let y3 = rhs.x.add(&rhs.z);
        let x3 = x3.mul(&y3);
        let y3 = t0.add(&t2);
        let y3 = x3.sub(&y3);
        let x3 = t0.add(&t0);
        let t0 = x3.add(&t0);
        let t2 = mul_by_3b(&t2);
        let z3 = t1.add(&t2);
        let t1 = t1.sub(&t2);
        let y3 = mul_by_3b(&y3);
        let x3 = t4.mul(&y3);
        let t2 = t3.mul(&t1);
        let x3 = t2.sub(&x3);
        let y3 = y3.mul(&t0);
        let t1 = t1.mul(&z3);
        let y3 = t1.add(&y3);
        let t0 = t0.mul(&t3);
        let z3 = z3.mul(&t4);
        let z3 = z3.add(&t0);

        ProjectivePoint {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Adds this point to a point in the affine model.
    pub fn add_mixed(&self, rhs: &AffinePoint) -> Self {
        // Renes-Costello-Batina 2015 Algorithm 8, the mixed variant of the
        // complete addition with the right-hand Z fixed to one. The formula
        // assumes the affine operand is not the identity; that case is fixed
        // up with a constant-time selection afterwards.

        let t0 = self.x.mul(&rhs.x);
        let t1 = self.y.mul(&rhs.y);
        let t3 = rhs.x.add(&rhs.y);
        let t4 = self.x.add(&self.y);
        let t3 = t3.mul(&t4);
        let t4 = t0.add(&t1);
        let t3 = t3.sub(&t4);
        let t4 = rhs.y.mul(&self.z);
        let t4 = t4.add(&self.y);
        let y3 = rhs.x.mul(&self.z);
        let y3 = y3.add(&self.x);
        let x3 = t0.add(&t0);
        let t0 = x3.add(&t0);
        let t2 = mul_by_3b(&self.z);
        let z3 = t1.add(&t2);
        let t1 = t1.sub(&t2);
        let y3 = mul_by_3b(&y3);
        let x3 = t4.mul(&y3);
        let t2 = t3.mul(&t1);
        let x3 = t2.sub(&x3);
        let y3 = y3.mul(&t0);
        let t1 = t1.mul(&z3);
        let y3 = t1.add(&y3);
        let t0 = t0.mul(&t3);
        let z3 = z3.mul(&t4);
        let z3 = z3.add(&t0);

        let tmp = ProjectivePoint {
            x: x3,
            y: y3,
            z: z3,
        };

        ProjectivePoint::conditional_select(&tmp, self, rhs.is_identity())
    }

    /// Returns `self - other`.
    fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Returns `self - other`, where `other` is in the affine model.
    fn sub_mixed(&self, other: &AffinePoint) -> Self {
        self.add_mixed(&other.neg())
    }

    /// Returns `[k] self` for the canonical little-endian scalar encoding
    /// `by`.
    ///
    /// Processes all 256 bits most-significant first, with one doubling and
    /// one constant-time conditional assignment per bit, so the operation
    /// sequence does not depend on the scalar value.
    fn multiply(&self, by: &[u8; 32]) -> Self {
        let mut acc = ProjectivePoint::identity();

        for byte in by.iter().rev() {
            for i in (0..8).rev() {
                acc = acc.double();
                let bit = Choice::from((byte >> i) & 1u8);
                acc.conditional_assign(&acc.add(self), bit);
            }
        }

        acc
    }

    /// Multiplies `self` by the absolute value of the curve seed using
    /// double-and-add, then flips the sign (the seed is negative). The seed
    /// is a public constant, so the branch pattern of the ladder reveals
    /// nothing secret.
    pub(crate) fn mul_by_x(&self) -> Self {
        let mut xself = ProjectivePoint::identity();

        // The low bit of the seed is zero, so start one doubling in.
        let mut x = BLS_X >> 1;
        let mut acc = *self;
        while x != 0 {
            acc = acc.double();

            if x % 2 == 1 {
                xself = xself.add(&acc);
            }
            x >>= 1;
        }

        if BLS_X_IS_NEGATIVE {
            xself = xself.neg();
        }
        xself
    }

    /// Multiplies by (1 - x), where x is the BLS12-381 curve seed. Since
    /// 1 - x is the G1 cofactor, this maps any point on the curve into the
    /// r-order subgroup.
    pub fn clear_cofactor(&self) -> Self {
        self.sub(&self.mul_by_x())
    }

    /// Converts a batch of projective points into affine form with a single
    /// field inversion (Montgomery's trick).
    ///
    /// # Panics
    ///
    /// Panics if `p.len() != q.len()`.
    pub fn batch_normalize(p: &[Self], q: &mut [AffinePoint]) {
        assert_eq!(p.len(), q.len());

        let mut acc = FieldElement::one();
        for (p, q) in p.iter().zip(q.iter_mut()) {
            // The `x` field of the output is used as scratch space for the
            // product of the previous z-coordinates.
            q.x = acc;

            // Identities contribute nothing to the accumulator, so their
            // (zero) z-coordinate never poisons the running product.
            acc = FieldElement::conditional_select(&acc.mul(&p.z), &acc, p.is_identity());
        }

        // All accumulated z-coordinates are nonzero, so the total product is
        // invertible.
        acc = acc.invert().expect("product of nonzero field elements");

        for (p, q) in p.iter().rev().zip(q.iter_mut().rev()) {
            let skip = p.is_identity();

            // tmp = 1/z for this point.
            let tmp = q.x.mul(&acc);

            // Cancel this point's z-coordinate out of the accumulator.
            acc = FieldElement::conditional_select(&acc.mul(&p.z), &acc, skip);

            *q = AffinePoint::conditional_select(
                &AffinePoint {
                    x: p.x.mul(&tmp),
                    y: p.y.mul(&tmp),
                    infinity: Choice::from(0u8),
                },
                &AffinePoint::identity(),
                skip,
            );
        }
    }
}

impl Default for ProjectivePoint {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for ProjectivePoint {}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        ProjectivePoint {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl ConstantTimeEq for ProjectivePoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        // Is (x1/z1, y1/z1) equal to (x2/z2, y2/z2)? Cross-multiply to avoid
        // the inversions, and handle the identity encodings branchlessly.

        let x1 = self.x.mul(&other.z);
        let x2 = other.x.mul(&self.z);

        let y1 = self.y.mul(&other.z);
        let y2 = other.y.mul(&self.z);

        let self_is_zero = self.z.is_zero();
        let other_is_zero = other.z.is_zero();

        (self_is_zero & other_is_zero)
            | ((!self_is_zero) & (!other_is_zero) & x1.ct_eq(&x2) & y1.ct_eq(&y2))
    }
}

impl Eq for ProjectivePoint {}

impl PartialEq for ProjectivePoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl From<AffinePoint> for ProjectivePoint {
    fn from(p: AffinePoint) -> Self {
        Self::from(&p)
    }
}

impl From<&AffinePoint> for ProjectivePoint {
    fn from(p: &AffinePoint) -> Self {
        ProjectivePoint {
            x: p.x,
            y: p.y,
            z: FieldElement::conditional_select(
                &FieldElement::one(),
                &FieldElement::zero(),
                p.is_identity(),
            ),
        }
    }
}

impl Group for ProjectivePoint {
    type Scalar = Scalar;

    fn random(rng: impl RngCore) -> Self {
        ProjectivePoint::random(rng)
    }

    fn identity() -> Self {
        ProjectivePoint::identity()
    }

    fn generator() -> Self {
        ProjectivePoint::generator()
    }

    fn is_identity(&self) -> Choice {
        ProjectivePoint::is_identity(self)
    }

    #[must_use]
    fn double(&self) -> Self {
        ProjectivePoint::double(self)
    }
}

impl PrimeGroup for ProjectivePoint {}

impl Curve for ProjectivePoint {
    type AffineRepr = AffinePoint;

    fn batch_normalize(p: &[Self], q: &mut [Self::AffineRepr]) {
        ProjectivePoint::batch_normalize(p, q);
    }

    fn to_affine(&self) -> Self::AffineRepr {
        ProjectivePoint::to_affine(self)
    }
}

impl PrimeCurve for ProjectivePoint {
    type Affine = AffinePoint;
}

impl GroupEncoding for ProjectivePoint {
    type Repr = CompressedPoint;

    fn from_bytes(bytes: &Self::Repr) -> CtOption<Self> {
        <AffinePoint as GroupEncoding>::from_bytes(bytes).map(Self::from)
    }

    fn from_bytes_unchecked(bytes: &Self::Repr) -> CtOption<Self> {
        <AffinePoint as GroupEncoding>::from_bytes_unchecked(bytes).map(Self::from)
    }

    fn to_bytes(&self) -> Self::Repr {
        self.to_affine().to_bytes()
    }
}

impl Add<&ProjectivePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(self, other)
    }
}

impl Add<&ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(&self, other)
    }
}

impl Add<ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(&self, &other)
    }
}

impl AddAssign<ProjectivePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: ProjectivePoint) {
        *self = ProjectivePoint::add(self, &rhs);
    }
}

impl AddAssign<&ProjectivePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: &ProjectivePoint) {
        *self = ProjectivePoint::add(self, rhs);
    }
}

impl Sub<&ProjectivePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::sub(self, other)
    }
}

impl Sub<&ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::sub(&self, other)
    }
}

impl Sub<ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::sub(&self, &other)
    }
}

impl SubAssign<ProjectivePoint> for ProjectivePoint {
    fn sub_assign(&mut self, rhs: ProjectivePoint) {
        *self = ProjectivePoint::sub(self, &rhs);
    }
}

impl SubAssign<&ProjectivePoint> for ProjectivePoint {
    fn sub_assign(&mut self, rhs: &ProjectivePoint) {
        *self = ProjectivePoint::sub(self, rhs);
    }
}

impl Add<&AffinePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &AffinePoint) -> ProjectivePoint {
        ProjectivePoint::add_mixed(self, other)
    }
}

impl Add<&AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &AffinePoint) -> ProjectivePoint {
        ProjectivePoint::add_mixed(&self, other)
    }
}

impl Add<AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: AffinePoint) -> ProjectivePoint {
        ProjectivePoint::add_mixed(&self, &other)
    }
}

impl AddAssign<AffinePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: AffinePoint) {
        *self = ProjectivePoint::add_mixed(self, &rhs);
    }
}

impl AddAssign<&AffinePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: &AffinePoint) {
        *self = ProjectivePoint::add_mixed(self, rhs);
    }
}

impl Sub<&AffinePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: &AffinePoint) -> ProjectivePoint {
        ProjectivePoint::sub_mixed(self, other)
    }
}

impl Sub<&AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: &AffinePoint) -> ProjectivePoint {
        ProjectivePoint::sub_mixed(&self, other)
    }
}

impl Sub<AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: AffinePoint) -> ProjectivePoint {
        ProjectivePoint::sub_mixed(&self, &other)
    }
}

impl SubAssign<AffinePoint> for ProjectivePoint {
    fn sub_assign(&mut self, rhs: AffinePoint) {
        *self = ProjectivePoint::sub_mixed(self, &rhs);
    }
}

impl SubAssign<&AffinePoint> for ProjectivePoint {
    fn sub_assign(&mut self, rhs: &AffinePoint) {
        *self = ProjectivePoint::sub_mixed(self, rhs);
    }
}

impl Sum for ProjectivePoint {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(ProjectivePoint::identity(), |a, b| a + b)
    }
}

impl<'a> Sum<&'a ProjectivePoint> for ProjectivePoint {
    fn sum<I: Iterator<Item = &'a ProjectivePoint>>(iter: I) -> Self {
        iter.cloned().sum()
    }
}

impl Mul<&Scalar> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, other: &Scalar) -> ProjectivePoint {
        self.multiply(&other.to_bytes())
    }
}

impl Mul<&Scalar> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, other: &Scalar) -> ProjectivePoint {
        self.multiply(&other.to_bytes())
    }
}

impl Mul<Scalar> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, other: Scalar) -> ProjectivePoint {
        self.multiply(&other.to_bytes())
    }
}

impl MulAssign<Scalar> for ProjectivePoint {
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = self.multiply(&rhs.to_bytes());
    }
}

impl MulAssign<&Scalar> for ProjectivePoint {
    fn mul_assign(&mut self, rhs: &Scalar) {
        *self = self.multiply(&rhs.to_bytes());
    }
}

impl Neg for ProjectivePoint {
    type Output = ProjectivePoint;

    fn neg(self) -> ProjectivePoint {
        ProjectivePoint::neg(&self)
    }
}

impl Neg for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn neg(self) -> ProjectivePoint {
        ProjectivePoint::neg(self)
    }
}
