//! Group law tests exercising the public API.

use bls381::{AffinePoint, ProjectivePoint, Scalar};
use ff::Field;
use group::Group;
use rand_core::SeedableRng;
use rand_xorshift::XorShiftRng;

fn test_rng() -> XorShiftRng {
    XorShiftRng::from_seed([
        0x57, 0x62, 0xbe, 0x5d, 0x76, 0x3d, 0x31, 0x8d, 0x17, 0xdb, 0x37, 0x32, 0x54, 0x06, 0xbc,
        0xe5,
    ])
}

#[test]
fn affine_to_projective() {
    let basepoint_affine = AffinePoint::generator();
    let basepoint_projective = ProjectivePoint::generator();

    assert_eq!(
        ProjectivePoint::from(basepoint_affine),
        basepoint_projective,
    );
    assert_eq!(basepoint_projective.to_affine(), basepoint_affine);
    assert!(!bool::from(basepoint_projective.to_affine().is_identity()));

    assert!(bool::from(
        ProjectivePoint::identity().to_affine().is_identity()
    ));
}

#[test]
fn projective_identity_addition() {
    let identity = ProjectivePoint::identity();
    let generator = ProjectivePoint::generator();

    assert_eq!(identity + &generator, generator);
    assert_eq!(generator + &identity, generator);
}

#[test]
fn projective_mixed_addition() {
    let identity = ProjectivePoint::identity();
    let basepoint_affine = AffinePoint::generator();
    let basepoint_projective = ProjectivePoint::generator();

    assert_eq!(identity + &basepoint_affine, basepoint_projective);
    assert_eq!(
        basepoint_projective + &basepoint_affine,
        basepoint_projective + &basepoint_projective
    );
}

#[test]
fn projective_add_vs_double() {
    let generator = ProjectivePoint::generator();
    assert_eq!(generator + &generator, generator.double());
}

#[test]
fn projective_add_and_sub() {
    let basepoint_affine = AffinePoint::generator();
    let basepoint_projective = ProjectivePoint::generator();

    assert_eq!(
        (basepoint_projective + &basepoint_projective) - &basepoint_projective,
        basepoint_projective
    );
    assert_eq!(
        (basepoint_projective + &basepoint_affine) - &basepoint_affine,
        basepoint_projective
    );
}

#[test]
fn associativity_on_random_points() {
    let mut rng = test_rng();
    for _ in 0..8 {
        let p = ProjectivePoint::random(&mut rng);
        let q = ProjectivePoint::random(&mut rng);
        let r = ProjectivePoint::random(&mut rng);

        assert_eq!((p + q) + r, p + (q + r));
        assert_eq!(p + q, q + p);
    }
}

#[test]
fn inverse_law() {
    let mut rng = test_rng();
    for _ in 0..8 {
        let p = ProjectivePoint::random(&mut rng);
        assert!(bool::from((p + (-p)).is_identity()));
        assert!(bool::from((p - p).is_identity()));
    }
}

#[test]
fn scalar_linearity() {
    let mut rng = test_rng();
    let p = ProjectivePoint::random(&mut rng);
    let a = Scalar::random(&mut rng);
    let b = Scalar::random(&mut rng);

    // (a + b) P = aP + bP
    assert_eq!(p * (a + b), p * a + p * b);
    // a(bP) = (ab)P
    assert_eq!((p * b) * a, p * (a * b));
}

#[test]
fn subgroup_order_annihilates() {
    let mut rng = test_rng();

    // (r - 1) P + P = identity for any P in the subgroup.
    let r_minus_1 = -Scalar::ONE;
    let g = ProjectivePoint::generator();
    assert!(bool::from((g * r_minus_1 + g).is_identity()));

    let p = ProjectivePoint::random(&mut rng);
    assert!(bool::from((p * r_minus_1 + p).is_identity()));
}

#[test]
fn clear_cofactor_produces_torsion_free_points() {
    let mut rng = test_rng();
    for _ in 0..8 {
        let p = ProjectivePoint::random(&mut rng);
        // Random subgroup points survive cofactor clearing (scaled by 1 - x).
        let cleared = p.clear_cofactor();
        assert!(bool::from(cleared.is_on_curve()));
        assert!(bool::from(cleared.to_affine().is_torsion_free()));
    }
}

#[test]
fn batch_normalize_matches_to_affine() {
    let mut rng = test_rng();

    let points: [ProjectivePoint; 5] = [
        ProjectivePoint::random(&mut rng),
        ProjectivePoint::identity(),
        ProjectivePoint::random(&mut rng),
        ProjectivePoint::random(&mut rng).double(),
        ProjectivePoint::identity(),
    ];

    let mut affine = [AffinePoint::identity(); 5];
    ProjectivePoint::batch_normalize(&points, &mut affine);

    for (p, a) in points.iter().zip(affine.iter()) {
        assert_eq!(p.to_affine(), *a);
    }
}

#[test]
fn sum_of_points() {
    let g = ProjectivePoint::generator();
    let points = [g, g.double(), g.double().double()];
    let total: ProjectivePoint = points.iter().sum();
    assert_eq!(total, g * Scalar::from(7));
}

#[test]
fn group_trait_random_is_in_subgroup() {
    let mut rng = test_rng();
    let p = <ProjectivePoint as Group>::random(&mut rng);
    assert!(bool::from(p.is_on_curve()));
    assert!(bool::from(p.to_affine().is_torsion_free()));
    assert!(!bool::from(p.is_identity()));
}
