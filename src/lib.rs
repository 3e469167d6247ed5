// -*- mode: rust; -*-
//
// This file is part of curve25519-vartime.
// See LICENSE for licensing information.

#![deny(missing_docs)]
#![allow(clippy::needless_range_loop)]

//! # curve25519-vartime
//!
//! Variable-time group operations on the twisted Edwards form of
//! Curve25519, built for accelerated Ed25519 signature verification.
//!
//! The main entry point is [`edwards::EdwardsPoint::mul_abglsv_pornin`],
//! which evaluates \\( \[δa\]A + \[δb\]B − \[δ\]C \\) for an internally
//! chosen nonzero \\(δ\\), using a short lattice vector to halve the
//! doublings of the classical double-base scalar multiplication.
//!
//! # Warning
//!
//! Functions in the `vartime` family execute in time dependent on their
//! inputs.  They are appropriate for *public* inputs only (public keys,
//! signatures, hashed challenges) and must never see secret scalars.

//------------------------------------------------------------------------
// External dependencies
//------------------------------------------------------------------------

// Internal macros. Must come first because they're used in other modules.
#[macro_use]
pub(crate) mod macros;

// The public API surface.

pub mod constants;
pub mod edwards;
pub mod scalar;
pub mod traits;

// Finite field arithmetic mod p = 2^255 - 19.
pub(crate) mod field;

// Arithmetic backends (serial u64 only).
pub(crate) mod backend;

// Lookup tables of precomputed point multiples.
pub(crate) mod window;

// Two-dimensional lattice reduction over the scalar ring.
pub(crate) mod lattice;
