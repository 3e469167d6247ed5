// -*- mode: rust; -*-
//
// This file is part of curve25519-vartime.
// See LICENSE for licensing information.

//! Pluggable arithmetic backends.
//!
//! Only the serial backend is provided: u64 limbs with u128 products,
//! which lower to `MUL`/`MULX` on x86-64 and to the equivalent wide
//! multiplies on aarch64.

pub mod serial;
