// -*- mode: rust; -*-
//
// This file is part of curve25519-vartime.
// See LICENSE for licensing information.

//! Lattice reduction for scalar decomposition.
//!
//! Given a scalar \\(a\\), signature verification wants a pair of *short*
//! signed integers \\((d\_0, d\_1)\\) with
//! $$
//! d\_0 \equiv a d\_1 \pmod \ell, \qquad d\_1 \neq 0,
//! $$
//! because replacing a 253-bit scalar by two ≈128-bit ones halves the
//! doublings of the multiscalar multiplication that uses them.  Such a
//! pair is exactly a short vector in the two-dimensional lattice
//! $$
//! L = \\{ (x, y) \in \mathbb Z\^2 : x \equiv a y \pmod \ell \\},
//! $$
//! which is spanned by \\((\ell, 0)\\) and \\((a, 1)\\) and has
//! determinant \\(\ell\\), so its shortest vector has norm about
//! \\(\sqrt\ell \approx 2\^{126}\\).
//!
//! We run Lagrange–Gauss reduction on that basis, in the division-free
//! variant of Pornin (<https://eprint.iacr.org/2020/454>): instead of
//! dividing inner products to find the reduction quotient, each step
//! shifts the shorter vector left by the bit-length difference of the
//! inner product and the smaller norm.  Everything is computed on
//! fixed-width two's-complement integers: 512 bits for the norms and
//! inner product (bounded by \\(\ell\^2 < 2\^{506}\\)), 256 bits for the
//! vector coordinates (bounded by \\(3\ell < 2\^{254}\\) throughout).
//!
//! This is variable-time in `a`, which is fine for its only caller:
//! `a` is a challenge scalar derived from public signature data.

use crate::constants;
use crate::scalar::Scalar;

/// Upper bound on the squared-norm bit-length at which the reduction
/// stops: once \\(\lVert v \rVert\^2 < 2^{253}\\), both components of
/// \\(v\\) fit comfortably in 128 bits.
const SHORT_BITLEN: u32 = 253;

/// Reduction step cap.  The shift-based descent shortens the basis by
/// several bits per step, so well under a thousand steps reach the
/// minimum; the cap only bounds the loop for totality.  A cap exit still
/// returns a vector of the lattice, so the congruence promised by
/// [`find_short_vector`] holds unconditionally.
const MAX_ITERATIONS: usize = 4096;

/// One component of a short lattice vector: a sign and a nonnegative
/// magnitude.
///
/// The magnitude is wider than the ≈128 bits the reduction normally
/// produces, so oversized residual outputs (e.g. from a cap exit) are
/// still representable.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SignedInt {
    negative: bool,
    magnitude: Int256,
}

impl SignedInt {
    /// Return true if the represented value is negative.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Widen the magnitude into a scalar reduced mod \\(\ell\\).
    ///
    /// The sign is metadata: callers fold it into the points or scalars
    /// they combine this value with.
    pub fn to_scalar(&self) -> Scalar {
        let mut bytes = [0u8; 32];
        for i in 0..4 {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&self.magnitude.0[i].to_le_bytes());
        }
        Scalar::from_bytes_mod_order(bytes)
    }

    #[cfg(test)]
    pub fn magnitude_bits(&self) -> u32 {
        self.magnitude.bitlen()
    }

    fn from_coordinate(c: &Int256) -> SignedInt {
        SignedInt {
            negative: c.is_negative(),
            magnitude: c.abs(),
        }
    }
}

/// Find a short nonzero vector \\((d\_0, d\_1)\\) in the lattice
/// \\(\\{(x, y) : x \equiv a y \pmod \ell\\}\\).
///
/// The outputs satisfy \\(d\_0 \equiv a d\_1 \pmod \ell\\) (as signed
/// values) and \\(d\_1 \neq 0\\); except for negligibly rare inputs both
/// magnitudes are below \\(2\^{128}\\).
///
/// The zero scalar yields the trivial short vector \\((0, 1)\\).
pub(crate) fn find_short_vector(a: &Scalar) -> (SignedInt, SignedInt) {
    let a = a.reduce();

    // Basis of L:  u = (l, 0),  v = (a, 1).
    let ell = Int256::from_bytes(constants::BASEPOINT_ORDER.as_bytes());
    let a_int = Int256::from_bytes(a.as_bytes());

    let mut u0 = ell;
    let mut u1 = Int256::ZERO;
    let mut v0 = a_int;
    let mut v1 = Int256::ONE;

    // Squared norms and inner product of the basis:
    //   nu = <u, u>,  nv = <v, v>,  sp = <u, v>.
    let mut nu = Int512::mul(&ell, &ell);
    let mut nv = Int512::mul(&a_int, &a_int).add(&Int512::ONE);
    let mut sp = Int512::mul(&ell, &a_int);

    let mut iterations = 0;
    loop {
        // Keep v the shorter of the two rows.
        if nu.less_than(&nv) {
            core::mem::swap(&mut u0, &mut v0);
            core::mem::swap(&mut u1, &mut v1);
            core::mem::swap(&mut nu, &mut nv);
        }

        let len_nv = nv.bitlen();
        if len_nv <= SHORT_BITLEN {
            break;
        }
        iterations += 1;
        if iterations > MAX_ITERATIONS {
            break;
        }

        // Approximate the Gauss reduction quotient by a power of two:
        // s = len(<u,v>) - len(<v,v>), so that 2^s * nv <= 2 * |sp|.
        let s = sp.bitlen().saturating_sub(len_nv);

        // u <- u -/+ 2^s v, and the same update on the cached products:
        //   nu <- nu + 2^{2s} nv -/+ 2^{s+1} sp
        //   sp <- sp -/+ 2^s nv
        if sp.is_negative() {
            u0 = u0.add(&v0.shl(s));
            u1 = u1.add(&v1.shl(s));
            nu = nu.add(&nv.shl(2 * s)).add(&sp.shl(s + 1));
            sp = sp.add(&nv.shl(s));
        } else {
            u0 = u0.sub(&v0.shl(s));
            u1 = u1.sub(&v1.shl(s));
            nu = nu.add(&nv.shl(2 * s)).sub(&sp.shl(s + 1));
            sp = sp.sub(&nv.shl(s));
        }
    }

    // v is a nonzero lattice vector of squared norm < 2^253 (short), or
    // at worst (cap exit) of squared norm below the initial nv < l^2,
    // which still bounds both coordinates below l.  In either case
    // v1 = 0 would force v0 to be a multiple of l smaller than l in
    // magnitude, i.e. v = 0, contradicting that the rows always form a
    // basis of L.
    debug_assert!(!v1.is_zero());

    (SignedInt::from_coordinate(&v0), SignedInt::from_coordinate(&v1))
}

// ------------------------------------------------------------------------
// Fixed-width two's-complement integers
// ------------------------------------------------------------------------

/// A 256-bit signed integer in two's complement, four little-endian
/// 64-bit limbs.  Holds the lattice vector coordinates.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Int256([u64; 4]);

impl Int256 {
    const ZERO: Int256 = Int256([0; 4]);
    const ONE: Int256 = Int256([1, 0, 0, 0]);

    fn from_bytes(bytes: &[u8; 32]) -> Int256 {
        let mut limbs = [0u64; 4];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
            *limb = u64::from_le_bytes(word);
        }
        Int256(limbs)
    }

    fn is_negative(&self) -> bool {
        (self.0[3] >> 63) == 1
    }

    fn is_zero(&self) -> bool {
        self.0 == [0u64; 4]
    }

    fn add(&self, other: &Int256) -> Int256 {
        let mut out = [0u64; 4];
        let mut carry = 0u64;
        for i in 0..4 {
            let (sum, c1) = self.0[i].overflowing_add(other.0[i]);
            let (sum, c2) = sum.overflowing_add(carry);
            out[i] = sum;
            carry = (c1 as u64) + (c2 as u64);
        }
        Int256(out)
    }

    fn sub(&self, other: &Int256) -> Int256 {
        self.add(&other.neg())
    }

    fn neg(&self) -> Int256 {
        let mut out = [0u64; 4];
        let mut carry = 1u64;
        for i in 0..4 {
            let (limb, c) = (!self.0[i]).overflowing_add(carry);
            out[i] = limb;
            carry = c as u64;
        }
        Int256(out)
    }

    fn abs(&self) -> Int256 {
        if self.is_negative() {
            self.neg()
        } else {
            *self
        }
    }

    /// Left shift by `s < 256` bits.
    fn shl(&self, s: u32) -> Int256 {
        debug_assert!(s < 256);
        let limb_shift = (s / 64) as usize;
        let bit_shift = s % 64;
        let mut out = [0u64; 4];
        for i in (limb_shift..4).rev() {
            let mut limb = self.0[i - limb_shift] << bit_shift;
            if bit_shift > 0 && i > limb_shift {
                limb |= self.0[i - limb_shift - 1] >> (64 - bit_shift);
            }
            out[i] = limb;
        }
        Int256(out)
    }

    /// Bit length of the absolute value; 0 for zero.
    #[cfg(test)]
    fn bitlen(&self) -> u32 {
        let m = self.abs();
        for i in (0..4).rev() {
            if m.0[i] != 0 {
                return (i as u32) * 64 + (64 - m.0[i].leading_zeros());
            }
        }
        0
    }
}

/// A 512-bit signed integer in two's complement, eight little-endian
/// 64-bit limbs.  Holds the squared norms and inner products, which are
/// bounded by \\(\ell\^2 < 2\^{506}\\) throughout the reduction.
#[derive(Copy, Clone, Debug)]
struct Int512([u64; 8]);

impl Int512 {
    const ONE: Int512 = Int512([1, 0, 0, 0, 0, 0, 0, 0]);

    /// The full signed product of two `Int256`s.
    fn mul(a: &Int256, b: &Int256) -> Int512 {
        let a_abs = a.abs();
        let b_abs = b.abs();

        let mut out = [0u64; 8];
        for i in 0..4 {
            let mut carry = 0u128;
            for j in 0..4 {
                let acc = (out[i + j] as u128)
                    + (a_abs.0[i] as u128) * (b_abs.0[j] as u128)
                    + carry;
                out[i + j] = acc as u64;
                carry = acc >> 64;
            }
            out[i + 4] = carry as u64;
        }

        let product = Int512(out);
        if a.is_negative() != b.is_negative() {
            product.neg()
        } else {
            product
        }
    }

    fn is_negative(&self) -> bool {
        (self.0[7] >> 63) == 1
    }

    fn add(&self, other: &Int512) -> Int512 {
        let mut out = [0u64; 8];
        let mut carry = 0u64;
        for i in 0..8 {
            let (sum, c1) = self.0[i].overflowing_add(other.0[i]);
            let (sum, c2) = sum.overflowing_add(carry);
            out[i] = sum;
            carry = (c1 as u64) + (c2 as u64);
        }
        Int512(out)
    }

    fn sub(&self, other: &Int512) -> Int512 {
        self.add(&other.neg())
    }

    fn neg(&self) -> Int512 {
        let mut out = [0u64; 8];
        let mut carry = 1u64;
        for i in 0..8 {
            let (limb, c) = (!self.0[i]).overflowing_add(carry);
            out[i] = limb;
            carry = c as u64;
        }
        Int512(out)
    }

    fn abs(&self) -> Int512 {
        if self.is_negative() {
            self.neg()
        } else {
            *self
        }
    }

    /// Left shift by `s < 512` bits.
    fn shl(&self, s: u32) -> Int512 {
        debug_assert!(s < 512);
        let limb_shift = (s / 64) as usize;
        let bit_shift = s % 64;
        let mut out = [0u64; 8];
        for i in (limb_shift..8).rev() {
            let mut limb = self.0[i - limb_shift] << bit_shift;
            if bit_shift > 0 && i > limb_shift {
                limb |= self.0[i - limb_shift - 1] >> (64 - bit_shift);
            }
            out[i] = limb;
        }
        Int512(out)
    }

    /// Bit length of the absolute value; 0 for zero.
    fn bitlen(&self) -> u32 {
        let m = self.abs();
        for i in (0..8).rev() {
            if m.0[i] != 0 {
                return (i as u32) * 64 + (64 - m.0[i].leading_zeros());
            }
        }
        0
    }

    /// Signed comparison `self < other`.
    fn less_than(&self, other: &Int512) -> bool {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => true,
            (false, true) => false,
            // Same sign: two's complement limbs compare like unsigned.
            _ => {
                for i in (0..8).rev() {
                    if self.0[i] != other.0[i] {
                        return self.0[i] < other.0[i];
                    }
                }
                false
            }
        }
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    /// The signed value of a reduction output, as a scalar mod l.
    fn signed_scalar(x: &SignedInt) -> Scalar {
        let magnitude = x.to_scalar();
        if x.is_negative() {
            -&magnitude
        } else {
            magnitude
        }
    }

    fn check_short_vector(a: &Scalar) {
        let (d0, d1) = find_short_vector(a);

        // d_0 == a * d_1 (mod l)
        let d0_s = signed_scalar(&d0);
        let d1_s = signed_scalar(&d1);
        assert_eq!(d0_s, a.reduce() * d1_s);

        // d_1 != 0
        assert_ne!(d1_s, Scalar::zero());

        // Both components are about half the scalar size.
        assert!(d0.magnitude_bits() <= 128);
        assert!(d1.magnitude_bits() <= 128);
    }

    #[test]
    fn zero_scalar_gives_trivial_vector() {
        let (d0, d1) = find_short_vector(&Scalar::zero());
        assert_eq!(signed_scalar(&d0), Scalar::zero());
        assert_eq!(signed_scalar(&d1), Scalar::one());
        assert!(!d1.is_negative());
    }

    #[test]
    fn one_scalar_gives_unit_vector() {
        let (d0, d1) = find_short_vector(&Scalar::one());
        assert_eq!(signed_scalar(&d0), signed_scalar(&d1));
        assert_eq!(d0.magnitude_bits(), 1);
        assert_eq!(d1.magnitude_bits(), 1);
    }

    #[test]
    fn edge_scalars() {
        // l - 1 == -1 (mod l)
        let minus_one = -&Scalar::one();
        check_short_vector(&minus_one);

        // 2^128 and 2^252
        let mut bytes = [0u8; 32];
        bytes[16] = 1;
        check_short_vector(&Scalar::from_bits(bytes));
        let mut bytes = [0u8; 32];
        bytes[31] = 0x10;
        check_short_vector(&Scalar::from_bits(bytes));

        // small scalars
        for x in 1..16u64 {
            check_short_vector(&Scalar::from(x));
        }
    }

    #[test]
    fn random_scalars() {
        let mut rng = rand::thread_rng();
        for _ in 0..256 {
            check_short_vector(&Scalar::random(&mut rng));
        }
    }

    #[test]
    fn int256_shift_and_negate() {
        let one = Int256::ONE;
        let x = one.shl(130);
        assert_eq!(x.0, [0, 0, 4, 0]);
        assert_eq!(x.neg().add(&x).0, [0, 0, 0, 0]);
        assert!(x.neg().is_negative());
        assert_eq!(x.neg().abs().0, x.0);
    }

    #[test]
    fn int512_mul_signs() {
        let a = Int256::ONE.shl(100);
        let minus_a = a.neg();
        let aa = Int512::mul(&a, &a);
        assert_eq!(aa.bitlen(), 201);
        assert!(!aa.is_negative());
        assert!(Int512::mul(&a, &minus_a).is_negative());
        assert!(!Int512::mul(&minus_a, &minus_a).is_negative());
    }
}
