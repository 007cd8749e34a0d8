//! Point encoding tests exercising the public API.

use bls381::{AffinePoint, ProjectivePoint, Scalar};
use group::{GroupEncoding, UncompressedEncoding};
use hex_literal::hex;
use rand_core::SeedableRng;
use rand_xorshift::XorShiftRng;

const COMPRESSED_GENERATOR: [u8; 48] = hex!(
    "97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905
     a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb"
);

const COMPRESSED_TWO_G: [u8; 48] = hex!(
    "a572cbea904d67468808c8eb50a9450c9721db3091280125
     43902d0ac358a62ae28f75bb8f1c7c42c39a8c5529bf0f4e"
);

fn test_rng() -> XorShiftRng {
    XorShiftRng::from_seed([
        0x5b, 0x62, 0xbe, 0x5d, 0x76, 0x3d, 0x31, 0x8d, 0x17, 0xdb, 0x37, 0x32, 0x54, 0x06, 0xbc,
        0xe5,
    ])
}

#[test]
fn generator_encoding_vectors() {
    assert_eq!(AffinePoint::generator().to_compressed(), COMPRESSED_GENERATOR);
    assert_eq!(
        (ProjectivePoint::generator().double())
            .to_affine()
            .to_compressed(),
        COMPRESSED_TWO_G
    );
}

#[test]
fn identity_encoding_vectors() {
    let mut compressed = [0u8; 48];
    compressed[0] = 0xc0;
    assert_eq!(AffinePoint::identity().to_compressed(), compressed);
    assert!(bool::from(
        AffinePoint::from_compressed(&compressed)
            .unwrap()
            .is_identity()
    ));

    let mut uncompressed = [0u8; 96];
    uncompressed[0] = 0x40;
    assert_eq!(AffinePoint::identity().to_uncompressed(), uncompressed);
    assert!(bool::from(
        AffinePoint::from_uncompressed(&uncompressed)
            .unwrap()
            .is_identity()
    ));
}

#[test]
fn sort_flag_with_infinity_flag_is_rejected() {
    let mut bytes = [0u8; 48];
    bytes[0] = 0xe0;
    assert!(bool::from(AffinePoint::from_compressed(&bytes).is_none()));
}

#[test]
fn compressed_round_trip_random_points() {
    let mut rng = test_rng();
    for _ in 0..8 {
        let p = ProjectivePoint::random(&mut rng).to_affine();
        let bytes = p.to_compressed();
        assert_eq!(AffinePoint::from_compressed(&bytes).unwrap(), p);
        assert_eq!(
            AffinePoint::from_compressed_unchecked(&bytes).unwrap(),
            p
        );
    }
}

#[test]
fn uncompressed_round_trip_random_points() {
    let mut rng = test_rng();
    for _ in 0..8 {
        let p = ProjectivePoint::random(&mut rng).to_affine();
        let bytes = p.to_uncompressed();
        assert_eq!(AffinePoint::from_uncompressed(&bytes).unwrap(), p);
    }
}

#[test]
fn compressed_negation_differs_only_in_sort_bit() {
    let mut rng = test_rng();
    let p = ProjectivePoint::random(&mut rng).to_affine();
    let a = p.to_compressed();
    let b = (-p).to_compressed();

    assert_eq!(a[1..], b[1..]);
    assert_eq!(a[0] ^ b[0], 1u8 << 5);
}

#[test]
fn group_encoding_traits() {
    let mut rng = test_rng();
    let p = ProjectivePoint::random(&mut rng);

    // Compressed, via the GroupEncoding seam.
    let repr = p.to_bytes();
    assert_eq!(ProjectivePoint::from_bytes(&repr).unwrap(), p);

    // Uncompressed, via the UncompressedEncoding seam on the affine type.
    let affine = p.to_affine();
    let repr = UncompressedEncoding::to_uncompressed(&affine);
    assert_eq!(
        <AffinePoint as UncompressedEncoding>::from_uncompressed(&repr).unwrap(),
        affine
    );
}

#[test]
fn from_compressed_enforces_subgroup_membership() {
    // The x-coordinate 5 yields a curve point outside the r-order subgroup.
    let mut bytes = [0u8; 48];
    bytes[47] = 5;
    bytes[0] = 0xa0;

    assert!(bool::from(
        AffinePoint::from_compressed_unchecked(&bytes).is_some()
    ));
    assert!(bool::from(AffinePoint::from_compressed(&bytes).is_none()));
}

#[test]
fn scalar_multiples_round_trip() {
    let g = ProjectivePoint::generator();
    for k in 1u64..=16 {
        let p = (g * Scalar::from(k)).to_affine();
        assert_eq!(
            AffinePoint::from_compressed(&p.to_compressed()).unwrap(),
            p
        );
        assert_eq!(
            AffinePoint::from_uncompressed(&p.to_uncompressed()).unwrap(),
            p
        );
    }
}
