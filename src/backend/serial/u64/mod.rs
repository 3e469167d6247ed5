// -*- mode: rust; -*-
//
// This file is part of curve25519-vartime.
// See LICENSE for licensing information.

//! The `u64` backend: radix-2^51 field arithmetic and radix-2^52 scalar
//! arithmetic, both using 128-bit products.

pub mod constants;
pub mod field;
pub mod scalar;
