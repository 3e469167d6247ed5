// -*- mode: rust; -*-
//
// This file is part of curve25519-vartime.
// See LICENSE for licensing information.

//! Various constants, such as the Ed25519 basepoint and the `d`
//! parameter of the curve, as well as the lazily initialized lookup
//! tables of precomputed basepoint multiples.

#![allow(non_snake_case)]

use std::sync::OnceLock;

use crate::backend::serial::curve_models::AffineNielsPoint;
use crate::edwards::CompressedEdwardsY;
use crate::scalar::Scalar;
use crate::window::NafLookupTable8;

pub use crate::backend::serial::u64::constants::ED25519_BASEPOINT_POINT;
pub(crate) use crate::backend::serial::u64::constants::{EDWARDS_D, EDWARDS_D2, R, SQRT_M1};

/// The Ed25519 basepoint, in `CompressedEdwardsY` format.
///
/// This is the little-endian byte encoding of \\( 4/5 \pmod p \\),
/// which is the \\(y\\)-coordinate of the basepoint.
///
/// The sign bit is 0 since the basepoint has \\(x\\) chosen to be positive.
pub const ED25519_BASEPOINT_COMPRESSED: CompressedEdwardsY = CompressedEdwardsY([
    0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
]);

/// `BASEPOINT_ORDER` is the order of the Ed25519 basepoint, i.e.
/// $$
/// \ell = 2\^{252} + 27742317777372353535851937790883648493.
/// $$
pub const BASEPOINT_ORDER: Scalar = Scalar {
    bytes: [
        0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58,
        0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
    ],
};

/// Odd multiples of the basepoint `[B, 3B, 5B, 7B, 9B, 11B, ..., 127B]`,
/// for use in the width-8 NAF terms of the variable-time basepoint
/// multiplications.
///
/// Built once on first use and immutable afterwards.
pub(crate) fn affine_odd_multiples_of_basepoint() -> &'static NafLookupTable8<AffineNielsPoint> {
    static TABLE: OnceLock<NafLookupTable8<AffineNielsPoint>> = OnceLock::new();
    TABLE.get_or_init(|| NafLookupTable8::from(&ED25519_BASEPOINT_POINT))
}

/// Odd multiples of `[2^128]B`, the basepoint shifted by 128 doublings:
/// `[[2^128]B, [3 2^128]B, ..., [127 2^128]B]`.
///
/// These serve the high half of a 128-bit split basepoint scalar, so that
/// both halves share the same ≈128 doublings of the evaluation loop.
///
/// Built once on first use and immutable afterwards.
pub(crate) fn affine_odd_multiples_of_b_shl_128() -> &'static NafLookupTable8<AffineNielsPoint> {
    static TABLE: OnceLock<NafLookupTable8<AffineNielsPoint>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let B_shl_128 = ED25519_BASEPOINT_POINT.mult_by_pow_2(128);
        NafLookupTable8::from(&B_shl_128)
    })
}
