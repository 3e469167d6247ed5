// -*- mode: rust; -*-
//
// This file is part of curve25519-vartime.
// See LICENSE for licensing information.

//! The ABGLSV-Pornin multiplication: a variable-time four-term
//! multiscalar multiplication with lattice-reduced scalars, used as the
//! fast path of single-signature verification.

#![allow(non_snake_case)]

use crate::backend::serial::curve_models::{ProjectiveNielsPoint, ProjectivePoint};
use crate::constants;
use crate::edwards::EdwardsPoint;
use crate::lattice::find_short_vector;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::window::NafLookupTable5;

/// Compute \\(\[δa\]A + \[δb\]B − \[δ\]C\\) in variable time, where
/// \\(δ\\) is a nonzero scalar selected internally, and \\(B\\) is the
/// Ed25519 basepoint.
pub fn mul(a: &Scalar, A: &EdwardsPoint, b: &Scalar, C: &EdwardsPoint) -> EdwardsPoint {
    // Starting with the target equation
    //
    //     [a]A + [b]B - C
    //
    // multiply through by a scalar d_1, chosen with a partner d_0 such
    // that d_0 = a d_1 (mod l) and both are about 128 bits:
    //
    //     [d_0]A + [(b d_1 mod l)]B - [d_1]C.
    //
    // The basepoint scalar db = b d_1 mod l splits into halves e_0 and
    // e_1 with db = e_0 + 2^128 e_1, each served by its own precomputed
    // table (odd multiples of B and of [2^128]B), giving
    //
    //     [d_0]A + [e_0]B + [e_1][2^128]B - [d_1]C
    //
    // in which every scalar is about 128 bits, so the interleaved
    // evaluation runs half the doublings of the double-base method.
    // Finding (d_0, d_1) is a lattice problem in dimension 2.
    let (d0, d1) = find_short_vector(a);

    // Move the signs of d_0 and d_1 into the bases and scalars.
    let p_A = if d0.is_negative() { -A } else { *A };
    let (s_b, neg_C) = if d1.is_negative() {
        // (-b, C)
        (-b, *C)
    } else {
        // (b, -C)
        (*b, -C)
    };
    let d_0 = d0.to_scalar();
    let d_1 = d1.to_scalar();

    // Calculate the remaining scalars.  db is reduced mod l < 2^253, so
    // both of its 128-bit halves are canonical scalars as raw bit loads.
    let db = &s_b * &d_1;
    let db_bytes = db.to_bytes();
    let mut e_bytes = [0u8; 32];
    e_bytes[..16].copy_from_slice(&db_bytes[..16]);
    let e_0 = Scalar::from_bits(e_bytes);
    e_bytes[..16].copy_from_slice(&db_bytes[16..]);
    let e_1 = Scalar::from_bits(e_bytes);
    debug_assert!(e_0.is_canonical());
    debug_assert!(e_1.is_canonical());

    // Now we can compute
    //
    //     [d_0]A' + [e_0]B + [e_1][2^128]B + [d_1]C'
    //
    // using Straus's method, inlined here so the third term can use the
    // precomputed multiples of [2^128]B.
    let d_0_naf = d_0.non_adjacent_form(5);
    let e_0_naf = e_0.non_adjacent_form(8);
    let e_1_naf = e_1.non_adjacent_form(8);
    let d_1_naf = d_1.non_adjacent_form(5);

    // Find the starting index.
    let mut i: usize = 255;
    for j in (0..256).rev() {
        i = j;
        if d_0_naf[i] != 0 || e_0_naf[i] != 0 || e_1_naf[i] != 0 || d_1_naf[i] != 0 {
            break;
        }
    }

    let table_A = NafLookupTable5::<ProjectiveNielsPoint>::from(&p_A);
    let table_B = constants::affine_odd_multiples_of_basepoint();
    let table_B_shl_128 = constants::affine_odd_multiples_of_b_shl_128();
    let table_neg_C = NafLookupTable5::<ProjectiveNielsPoint>::from(&neg_C);

    let mut r = ProjectivePoint::identity();
    loop {
        let mut t = r.double();

        if d_0_naf[i] > 0 {
            t = &t.to_extended() + &table_A.select(d_0_naf[i] as usize);
        } else if d_0_naf[i] < 0 {
            t = &t.to_extended() - &table_A.select(-d_0_naf[i] as usize);
        }

        if e_0_naf[i] > 0 {
            t = &t.to_extended() + &table_B.select(e_0_naf[i] as usize);
        } else if e_0_naf[i] < 0 {
            t = &t.to_extended() - &table_B.select(-e_0_naf[i] as usize);
        }

        if e_1_naf[i] > 0 {
            t = &t.to_extended() + &table_B_shl_128.select(e_1_naf[i] as usize);
        } else if e_1_naf[i] < 0 {
            t = &t.to_extended() - &table_B_shl_128.select(-e_1_naf[i] as usize);
        }

        if d_1_naf[i] > 0 {
            t = &t.to_extended() + &table_neg_C.select(d_1_naf[i] as usize);
        } else if d_1_naf[i] < 0 {
            t = &t.to_extended() - &table_neg_C.select(-d_1_naf[i] as usize);
        }

        r = t.to_projective();

        if i == 0 {
            break;
        }
        i -= 1;
    }

    r.to_extended()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::IsIdentity;

    /// Compute `delta * ([a]A + [b]B - C)` with independent single-scalar
    /// multiplications, reading `delta` back off the lattice reducer.
    fn scaled_reference(
        a: &Scalar,
        A: &EdwardsPoint,
        b: &Scalar,
        C: &EdwardsPoint,
    ) -> EdwardsPoint {
        let (_, d1) = find_short_vector(a);
        let mut delta = d1.to_scalar();
        if d1.is_negative() {
            delta = -&delta;
        }
        let naive = &(&(A * a) + &EdwardsPoint::mul_base(b)) - C;
        &naive * &delta
    }

    fn check(a: &Scalar, A: &EdwardsPoint, b: &Scalar, C: &EdwardsPoint) {
        assert_eq!(
            mul(a, A, b, C).compress(),
            scaled_reference(a, A, b, C).compress()
        );
    }

    #[test]
    fn unit_scalars_basepoint() {
        // a = 1, A = B, b = 1, C = identity: the short vector is (1, 1),
        // so the result is exactly [2]B.
        let B = constants::ED25519_BASEPOINT_POINT;
        let id = EdwardsPoint::identity();
        let result = mul(&Scalar::one(), &B, &Scalar::one(), &id);
        assert_eq!(result, B.double());
    }

    #[test]
    fn zero_scalars() {
        // a = 0 yields the trivial short vector (0, 1), so the output is
        // not scaled at all.
        let mut rng = rand::thread_rng();
        let x = Scalar::random(&mut rng);
        let y = Scalar::random(&mut rng);
        let A = EdwardsPoint::mul_base(&x);
        let C = EdwardsPoint::mul_base(&y);
        let b = Scalar::random(&mut rng);
        let zero = Scalar::zero();

        // a = 0, b = 0: -C
        assert_eq!(mul(&zero, &A, &zero, &C), -&C);

        // a = 0: [b]B - C
        assert_eq!(
            mul(&zero, &A, &b, &C),
            &EdwardsPoint::mul_base(&b) - &C
        );

        // b = 0: delta * ([a]A - C)
        let a = Scalar::random(&mut rng);
        check(&a, &A, &zero, &C);
    }

    #[test]
    fn identity_points() {
        // With A = C = identity the result is [delta b]B; with a = 0 the
        // scaling disappears and it is exactly [b]B.
        let id = EdwardsPoint::identity();
        let mut rng = rand::thread_rng();
        let b = Scalar::random(&mut rng);
        assert_eq!(
            mul(&Scalar::zero(), &id, &b, &id),
            EdwardsPoint::mul_base(&b)
        );
        let a = Scalar::random(&mut rng);
        check(&a, &id, &b, &id);
    }

    #[test]
    fn minus_one_challenge() {
        // a = l - 1 reduces to the short vector (1, -1), exercising the
        // negative-d_1 sign handling.
        let minus_one = -&Scalar::one();
        let B = constants::ED25519_BASEPOINT_POINT;
        check(&minus_one, &B, &Scalar::one(), &B);
    }

    #[test]
    fn high_bit_basepoint_scalar() {
        // b just below 2^253 exercises the top of the e_1 expansion and
        // the starting-index search.
        let mut bytes = [0u8; 32];
        bytes[31] = 0x10; // 2^252
        bytes[0] = 1;
        let b = Scalar::from_bits(bytes);
        let id = EdwardsPoint::identity();
        assert_eq!(
            mul(&Scalar::zero(), &id, &b, &id),
            EdwardsPoint::mul_base(&b)
        );
    }

    #[test]
    fn matches_scaled_reference() {
        let mut rng = rand::thread_rng();
        for _ in 0..64 {
            let a = Scalar::random(&mut rng);
            let b = Scalar::random(&mut rng);
            let A = EdwardsPoint::mul_base(&Scalar::random(&mut rng));
            let C = EdwardsPoint::mul_base(&Scalar::random(&mut rng));
            check(&a, &A, &b, &C);
        }
    }

    #[test]
    fn verification_equation_hits_identity() {
        // Whenever [a]A + [b]B - C is the identity, the scaled output
        // must be as well; this is the property verifiers rely on.
        let mut rng = rand::thread_rng();
        for _ in 0..64 {
            let a = Scalar::random(&mut rng);
            let b = Scalar::random(&mut rng);
            let x = Scalar::random(&mut rng);
            let A = EdwardsPoint::mul_base(&x);
            let C = EdwardsPoint::mul_base(&(&(&a * &x) + &b));
            assert!(mul(&a, &A, &b, &C).is_identity());

            // ... and a perturbed C must miss it.
            let C_bad = &C + &constants::ED25519_BASEPOINT_POINT;
            assert!(!mul(&a, &A, &b, &C_bad).is_identity());
        }
    }

    #[test]
    fn rfc8032_test_vector_1() {
        use sha2::{Digest, Sha512};

        // RFC 8032 §7.1, test 1: empty message.
        let pk_bytes: [u8; 32] =
            hex::decode("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a")
                .unwrap()
                .try_into()
                .unwrap();
        let sig_bytes: [u8; 64] =
            hex::decode(
                "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
                 5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
            )
            .unwrap()
            .try_into()
            .unwrap();
        let message: &[u8] = b"";

        let A = crate::edwards::CompressedEdwardsY(pk_bytes).decompress().unwrap();
        let R_bytes: [u8; 32] = sig_bytes[..32].try_into().unwrap();
        let R = crate::edwards::CompressedEdwardsY(R_bytes).decompress().unwrap();
        let s_bytes: [u8; 32] = sig_bytes[32..].try_into().unwrap();
        let s = Scalar::from_canonical_bytes(s_bytes).unwrap();

        // k = SHA-512(R || A || M) mod l
        let k = Scalar::from_hash(
            Sha512::new()
                .chain_update(R_bytes)
                .chain_update(pk_bytes)
                .chain_update(message),
        );

        // The verification equation [s]B = R + [k]A becomes
        // [-k]A + [s]B - R = identity.
        let minus_k = -&k;
        assert!(mul(&minus_k, &A, &s, &R).is_identity());

        // Flipping a bit of the message must break it.
        let k_bad = Scalar::from_hash(
            Sha512::new()
                .chain_update(R_bytes)
                .chain_update(pk_bytes)
                .chain_update(b"x"),
        );
        assert!(!mul(&(-&k_bad), &A, &s, &R).is_identity());
    }
}
