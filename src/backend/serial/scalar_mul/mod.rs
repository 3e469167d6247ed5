// -*- mode: rust; -*-
//
// This file is part of curve25519-vartime.
// See LICENSE for licensing information.

//! Implementations of scalar multiplication algorithms.
//!
//! All of these implementations use serial code for field arithmetic
//! with the multi-model strategy described in the `curve_models`
//! documentation.

pub mod variable_base;

pub mod vartime_double_base;

pub mod abglsv_pornin;
