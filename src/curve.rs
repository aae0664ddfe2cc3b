/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Elliptic curve groups, affine point arithmetic, and SEC1 point octets.
//!
//! The groups used by this crate are short-Weierstrass curves
//! `y^2 = x^3 + ax + b` over a prime field, exposed as process-wide
//! constants. Scalars are plain big-endian unsigned integers.
//!
//! Arithmetic here is variable-time. Deployments where an attacker can
//! time signing should substitute a constant-time backend.

use num_bigint::{BigInt, BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::thread_rng;

use crate::errors::SerializationError;

lazy_static! {
    ///The Koblitz curve used by Bitcoin.
    pub static ref SECP256K1: Group = Group::new(
        "secp256k1",
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
        "0",
        "7",
        "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
        "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
        "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"
    );

    ///NIST P-256.
    pub static ref SECP256R1: Group = Group::new(
        "secp256r1",
        "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
        "ffffffff00000001000000000000000000000000fffffffffffffffffffffffc",
        "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b",
        "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296",
        "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5",
        "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551"
    );

    ///NIST P-384.
    pub static ref SECP384R1: Group = Group::new(
        "secp384r1",
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff0000000000000000ffffffff",
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff0000000000000000fffffffc",
        "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875ac656398d8a2ed19d2a85c8edd3ec2aef",
        "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a385502f25dbf55296c3a545e3872760ab7",
        "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c00a60b1ce1d7e819d7a431d7c90ea0e5f",
        "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf581a0db248b0a77aecec196accc52973"
    );

    ///A small Koblitz curve, paired with RIPEMD-160 in tests.
    pub static ref SECP160K1: Group = Group::new(
        "secp160k1",
        "fffffffffffffffffffffffffffffffeffffac73",
        "0",
        "7",
        "3b4c382ce37aa192a4019e763036f4f5dd4d7ebb",
        "938cf935318fdced6bc28286531733c3f03c4fee",
        "0100000000000000000001b8fa16dfab9aca16b6b3"
    );
}

///A short-Weierstrass elliptic curve group over a prime field.
///
///Instances are process-wide constants; points hold a reference to the
///group they belong to. Two groups are equal when their names are equal.
#[derive(Debug)]
pub struct Group {
    name: &'static str,
    prime: BigUint,
    a: BigUint,
    b: BigUint,
    generator: (BigUint, BigUint),
    order: BigUint,
    byte_length: usize,

} impl Group {
    fn new(
        name: &'static str, prime: &str, a: &str, b: &str,
        gx: &str, gy: &str, order: &str
    ) -> Self {
        let prime = parse_hex(prime);
        let byte_length = ((prime.bits() + 7) / 8) as usize;
        return Self{
            name,
            prime,
            a: parse_hex(a),
            b: parse_hex(b),
            generator: (parse_hex(gx), parse_hex(gy)),
            order: parse_hex(order),
            byte_length
        }
    }

    ///The group's name, as listed in SEC2.
    pub fn name(&self) -> &'static str {
        return self.name
    }

    ///The order `n` of the group; scalars live in `[0, n)`.
    pub fn order(&self) -> &BigUint {
        return &self.order
    }

    ///The width in bytes of a field element, and of a fixed-width scalar.
    pub fn byte_length(&self) -> usize {
        return self.byte_length
    }

    ///The base point `G`.
    pub fn generator(&'static self) -> Point {
        return Point{
            group: self,
            coords: Some(self.generator.clone())
        }
    }

    ///The identity element.
    pub fn infinity(&'static self) -> Point {
        return Point{ group: self, coords: None }
    }

    ///Build a point from affine coordinates, or `None` if the coordinates
    ///are not reduced or do not satisfy the curve equation.
    pub fn point(&'static self, x: BigUint, y: BigUint) -> Option<Point> {
        if x >= self.prime || y >= self.prime {
            return None
        }
        if (&y * &y) % &self.prime != self.equation_rhs(&x) {
            return None
        }
        return Some(Point{ group: self, coords: Some((x, y)) })
    }

    ///Decode a SEC1 point octet string: `00` (identity), `02`/`03` `|| X`
    ///(compressed), or `04 || X || Y` (uncompressed).
    pub fn decode_point(&'static self, octets: &[u8]) -> Result<Point, SerializationError> {
        match octets.first().copied() {
            Some(0) if octets.len() == 1 => {
                return Ok(self.infinity())
            },
            Some(prefix @ (2 | 3)) if octets.len() == 1 + self.byte_length => {
                let x = BigUint::from_bytes_be(&octets[1..]);
                if x >= self.prime {
                    return Err(SerializationError::DecodingError)
                }
                let mut y = field_sqrt(&self.equation_rhs(&x), &self.prime)
                    .ok_or(SerializationError::DecodingError)?;
                if y.bit(0) != (prefix == 3) {
                    if y.is_zero() {
                        return Err(SerializationError::DecodingError)
                    }
                    y = &self.prime - &y;
                }
                return Ok(Point{ group: self, coords: Some((x, y)) })
            },
            Some(4) if octets.len() == 1 + 2 * self.byte_length => {
                let x = BigUint::from_bytes_be(&octets[1..1 + self.byte_length]);
                let y = BigUint::from_bytes_be(&octets[1 + self.byte_length..]);
                return self.point(x, y).ok_or(SerializationError::DecodingError)
            },
            _ => return Err(SerializationError::DecodingError)
        }
    }

    ///Return a uniformly random scalar in `[1, order)`.
    pub fn random_scalar(&self) -> BigUint {
        return thread_rng().gen_biguint_range(&BigUint::one(), &self.order)
    }

    ///`x^3 + ax + b mod p`
    fn equation_rhs(&self, x: &BigUint) -> BigUint {
        let x_squared = (x * x) % &self.prime;
        return (&x_squared * x + &self.a * x + &self.b) % &self.prime
    }

} impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        return self.name == other.name
    }

} impl Eq for Group {}

///An element of an elliptic curve group, the identity included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    group: &'static Group,
    coords: Option<(BigUint, BigUint)>,

} impl Point {
    ///The group this point belongs to.
    pub fn group(&self) -> &'static Group {
        return self.group
    }

    ///Whether this point is the identity element.
    pub fn is_infinity(&self) -> bool {
        return self.coords.is_none()
    }

    ///The affine x coordinate, or `None` for the identity.
    pub fn x(&self) -> Option<&BigUint> {
        return self.coords.as_ref().map(|(x, _)| x)
    }

    ///The affine y coordinate, or `None` for the identity.
    pub fn y(&self) -> Option<&BigUint> {
        return self.coords.as_ref().map(|(_, y)| y)
    }

    ///Point addition.
    pub fn add(&self, other: &Point) -> Point {
        debug_assert!(self.group == other.group);
        let (x1, y1) = match &self.coords {
            Some(coords) => coords,
            None => return other.clone()
        };
        let (x2, y2) = match &other.coords {
            Some(coords) => coords,
            None => return self.clone()
        };
        let prime = &self.group.prime;

        if x1 == x2 {
            if ((y1 + y2) % prime).is_zero() {
                return self.group.infinity()
            }
            return self.double()
        }

        let slope = (field_sub(y2, y1, prime)
            * field_inverse(&field_sub(x2, x1, prime), prime)
                .expect("nonzero field elements are invertible")) % prime;
        return self.chord_point(&slope, x1, y1, x2)
    }

    ///Point doubling.
    pub fn double(&self) -> Point {
        let (x, y) = match &self.coords {
            Some(coords) => coords,
            None => return self.clone()
        };
        if y.is_zero() {
            return self.group.infinity()
        }
        let prime = &self.group.prime;

        let numerator = (BigUint::from(3u8) * x * x + &self.group.a) % prime;
        let denominator = (BigUint::from(2u8) * y) % prime;
        let slope = (numerator * field_inverse(&denominator, prime)
            .expect("nonzero field elements are invertible")) % prime;
        return self.chord_point(&slope, x, y, x)
    }

    ///Scalar multiplication by repeated doubling.
    pub fn multiply(&self, scalar: &BigUint) -> Point {
        let mut result = self.group.infinity();
        let mut addend = self.clone();
        for bit in 0..scalar.bits() {
            if scalar.bit(bit) {
                result = result.add(&addend);
            }
            addend = addend.double();
        }
        return result
    }

    ///The additive inverse.
    pub fn negate(&self) -> Point {
        let (x, y) = match &self.coords {
            Some(coords) => coords,
            None => return self.clone()
        };
        if y.is_zero() {
            return self.clone()
        }
        return Point{
            group: self.group,
            coords: Some((x.clone(), &self.group.prime - y))
        }
    }

    ///The compressed SEC1 octet string: `02`/`03` by y parity, then the
    ///x coordinate at the group's fixed width. The identity encodes as `00`.
    pub fn to_octet(&self) -> Vec<u8> {
        let (x, y) = match &self.coords {
            Some(coords) => coords,
            None => return vec!(0u8)
        };
        let mut octets = Vec::with_capacity(1 + self.group.byte_length);
        octets.push(if y.bit(0) { 3 } else { 2 });
        octets.extend_from_slice(&left_pad(&x.to_bytes_be(), self.group.byte_length));
        return octets
    }

    ///`(slope^2 - x1 - x2, slope * (x1 - x3) - y1)`
    fn chord_point(&self, slope: &BigUint, x1: &BigUint, y1: &BigUint, x2: &BigUint) -> Point {
        let prime = &self.group.prime;
        let x3 = field_sub(&field_sub(&((slope * slope) % prime), x1, prime), x2, prime);
        let y3 = field_sub(&((slope * field_sub(x1, &x3, prime)) % prime), y1, prime);
        return Point{ group: self.group, coords: Some((x3, y3)) }
    }
}

///`x - y mod p`, for reduced operands.
fn field_sub(x: &BigUint, y: &BigUint, prime: &BigUint) -> BigUint {
    return ((prime + x) - y) % prime
}

///Modular inverse by the extended Euclidean algorithm.
fn field_inverse(value: &BigUint, prime: &BigUint) -> Option<BigUint> {
    let mut r0 = BigInt::from(prime.clone());
    let mut r1 = BigInt::from(value % prime);
    let mut t0 = BigInt::zero();
    let mut t1 = BigInt::one();
    while !r1.is_zero() {
        let quotient = &r0 / &r1;
        let r2 = &r0 - &quotient * &r1;
        let t2 = &t0 - &quotient * &t1;
        r0 = r1;
        r1 = r2;
        t0 = t1;
        t1 = t2;
    }
    if !r0.is_one() {
        return None
    }
    let prime = BigInt::from(prime.clone());
    let mut inverse = t0 % &prime;
    if inverse < BigInt::zero() {
        inverse += &prime;
    }
    return inverse.to_biguint()
}

///Modular square root, or `None` if `value` is not a quadratic residue.
///All supported primes are congruent to 3 mod 4.
fn field_sqrt(value: &BigUint, prime: &BigUint) -> Option<BigUint> {
    let root = value.modpow(&((prime + BigUint::one()) >> 2), prime);
    if (&root * &root) % prime != *value {
        return None
    }
    return Some(root)
}

///Left-pad `bytes` with zeroes up to `width`; longer inputs pass through.
pub(crate) fn left_pad(bytes: &[u8], width: usize) -> Vec<u8> {
    if bytes.len() >= width {
        return bytes.to_vec()
    }
    let mut padded = vec![0u8; width - bytes.len()];
    padded.extend_from_slice(bytes);
    return padded
}

fn parse_hex(digits: &str) -> BigUint {
    return BigUint::parse_bytes(digits.as_bytes(), 16)
        .expect("valid curve constant")
}
