// -*- mode: rust; -*-
//
// This file is part of curve25519-vartime.
// See LICENSE for licensing information.

//! The serial backend: field and scalar arithmetic on u64 limbs, and
//! scalar multiplication with the mixed-model strategy described in the
//! `curve_models` documentation.

pub mod u64;

pub mod curve_models;

pub mod scalar_mul;
