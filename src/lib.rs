#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

mod arithmetic;

pub use arithmetic::{
    affine::{AffinePoint, CompressedPoint, UncompressedPoint},
    field::FieldElement,
    projective::ProjectivePoint,
    scalar::Scalar,
};

pub use ff;
pub use group;

/// Base field modulus serialized as hexadecimal.
///
/// ```text
/// p = 1a0111ea 397fe69a 4b1ba7b6 434bacd7 64774b84 f38512bf 6730d2a0 f6b0f624
///     1eabfffe b153ffff b9feffff ffffaaab
/// ```
pub const MODULUS_HEX: &str =
    "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab";

/// Order of the G1 group (i.e. scalar modulus) serialized as hexadecimal.
///
/// ```text
/// r = 73eda753 299d7d48 3339d808 09a1d805 53bda402 fffe5bfe ffffffff 00000001
/// ```
pub const ORDER_HEX: &str = "73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001";
