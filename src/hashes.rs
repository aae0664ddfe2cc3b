/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Deterministic maps between byte strings, integers modulo a group
//! order, and curve points, plus the seeded shuffle built on them.
//!
//! Every map here must be bit-exact across implementations: a single
//! differing byte in the canonical encoding yields unrelated scalars,
//! and with them invalid signatures.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, ToPrimitive, Zero};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha384};
use simple_asn1::ASN1Block;

use crate::curve::{Group, Point, SECP256K1, SECP256R1, SECP384R1};
use crate::errors::HasherError;

lazy_static! {
    ///secp256k1 paired with SHA-256.
    pub static ref SECP256K1_SHA256: Hasher =
        Hasher::new(&SECP256K1, DigestAlgorithm::Sha256).expect("compatible pairing");
    ///secp256r1 (NIST P-256) paired with SHA-256.
    pub static ref SECP256R1_SHA256: Hasher =
        Hasher::new(&SECP256R1, DigestAlgorithm::Sha256).expect("compatible pairing");
    ///secp384r1 (NIST P-384) paired with SHA-384.
    pub static ref SECP384R1_SHA384: Hasher =
        Hasher::new(&SECP384R1, DigestAlgorithm::Sha384).expect("compatible pairing");
}

///The digest algorithms a `Hasher` can be built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha256,
    Sha384,
    Ripemd160,

} impl DigestAlgorithm {
    ///Output length in bytes.
    pub fn output_length(&self) -> usize {
        return match self{
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Ripemd160 => 20
        }
    }

    ///Hash `bytes` once.
    pub fn digest(&self, bytes: &[u8]) -> Vec<u8> {
        return match self{
            Self::Sha256 => Sha256::digest(bytes).to_vec(),
            Self::Sha384 => Sha384::digest(bytes).to_vec(),
            Self::Ripemd160 => Ripemd160::digest(bytes).to_vec()
        }
    }
}

///A value which can be canonically hashed:
///text, a nonnegative integer, or a curve point.
#[derive(Debug, Clone)]
pub enum HashValue {
    Text(String),
    Int(BigUint),
    Point(Point),

} impl From<&str> for HashValue {
    fn from(text: &str) -> Self {
        return Self::Text(text.to_string())
    }

} impl From<BigUint> for HashValue {
    fn from(int: BigUint) -> Self {
        return Self::Int(int)
    }

} impl From<u64> for HashValue {
    fn from(int: u64) -> Self {
        return Self::Int(BigUint::from(int))
    }

} impl From<Point> for HashValue {
    fn from(point: Point) -> Self {
        return Self::Point(point)
    }
}

///Mutable state for the deterministic draw stream: a seed scalar and a
///counter which advances on every draw, rejected draws included.
#[derive(Debug, Clone)]
pub(crate) struct DrawState {
    seed: BigUint,
    counter: BigUint,

} impl DrawState {
    pub(crate) fn new(seed: BigUint) -> Self {
        return Self{ seed, counter: BigUint::zero() }
    }
}

///An immutable pairing of a curve group and a digest algorithm.
///
///The digest's output length must equal the group's scalar length, so
///that every value drawn during signing has the same width regardless of
///ring position. The rejection ceiling is the largest multiple of the
///group order representable in one digest; candidates at or above it are
///re-hashed, which removes the modular bias of a bare reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hasher {
    group: &'static Group,
    algorithm: DigestAlgorithm,
    ceiling: BigUint,

} impl Hasher {
    pub fn new(group: &'static Group, algorithm: DigestAlgorithm) -> Result<Self, HasherError> {
        if algorithm.output_length() != group.byte_length() {
            return Err(HasherError::IncompatibleDigest)
        }
        let max_digest = (BigUint::one() << (8 * algorithm.output_length())) - BigUint::one();
        let multiples = &max_digest / group.order();
        //the 160-bit orders exceed the digest range; every digest is then
        //already canonical and no draw is ever rejected
        let ceiling = match multiples.is_zero() {
            true => max_digest + BigUint::one(),
            false => multiples * group.order()
        };
        return Ok(Self{ group, algorithm, ceiling })
    }

    ///The group this hasher reduces into.
    pub fn group(&self) -> &'static Group {
        return self.group
    }

    ///The digest algorithm backing this hasher.
    pub fn algorithm(&self) -> DigestAlgorithm {
        return self.algorithm
    }

    ///Uniform hash of `bytes` into `[0, order)`.
    ///
    ///Digests are drawn by feedback: each rejected digest is itself
    ///re-hashed, not the original input. The first digest below the
    ///rejection ceiling is reduced and returned.
    pub fn hash_string(&self, bytes: &[u8]) -> BigUint {
        let mut digest = self.algorithm.digest(bytes);
        loop {
            let candidate = BigUint::from_bytes_be(&digest);
            if candidate < self.ceiling {
                return candidate % self.group.order()
            }
            digest = self.algorithm.digest(&digest);
        }
    }

    ///Canonical hash of a heterogeneous tuple.
    ///
    ///Each value becomes a DER primitive (text as UTF8String, integers as
    ///INTEGER, points as an OCTET STRING of their compressed octets); the
    ///tuple is wrapped in a SEQUENCE and the DER bytes go through
    ///`hash_string`. DER is the only canonicalization used by this crate.
    pub fn hash_array(&self, values: &[HashValue]) -> Result<BigUint, HasherError> {
        let mut encoded = Vec::with_capacity(values.len());
        for value in values {
            encoded.push(match value{
                HashValue::Text(text) => ASN1Block::UTF8String(0, text.clone()),
                HashValue::Int(int) => ASN1Block::Integer(0, BigInt::from(int.clone())),
                HashValue::Point(point) => {
                    if point.group() != self.group {
                        return Err(HasherError::UnhashableValue)
                    }
                    ASN1Block::OctetString(0, point.to_octet())
                }
            });
        }
        let der = simple_asn1::to_der(&ASN1Block::Sequence(0, encoded))
            .expect("primitive blocks always encode");
        return Ok(self.hash_string(&der))
    }

    ///Map a point to a point of unknown discrete logarithm:
    ///`hash_array([x, y]) * G`. Each public key gets an independent
    ///generator this way, which is what makes key images linkable without
    ///being forgeable.
    pub fn hash_point(&self, point: &Point) -> Result<Point, HasherError> {
        if point.group() != self.group {
            return Err(HasherError::UnhashableValue)
        }
        let (x, y) = match (point.x(), point.y()) {
            (Some(x), Some(y)) => (x, y),
            _ => return Err(HasherError::UnhashableValue)
        };
        let factor = self.hash_array(&[
            HashValue::Int(x.clone()),
            HashValue::Int(y.clone())
        ])?;
        return Ok(self.group.generator().multiply(&factor))
    }

    ///Deterministic bottom-up Fisher-Yates driven by `seed`.
    pub fn shuffle<T: Clone>(&self, items: &[T], seed: &BigUint) -> Vec<T> {
        return self.shuffle_drawn(items, &mut DrawState::new(seed.clone()))
    }

    ///Fisher-Yates over an already-advanced draw state.
    pub(crate) fn shuffle_drawn<T: Clone>(&self, items: &[T], state: &mut DrawState) -> Vec<T> {
        let mut items = items.to_vec();
        for i in (1..items.len()).rev() {
            let swap = self.next_rand(&BigUint::from(i + 1), state)
                .to_usize().expect("swap index fits a usize");
            items.swap(i, swap);
        }
        return items
    }

    ///Draw a scalar in `[0, order)`, advancing the state.
    pub(crate) fn next_scalar(&self, state: &mut DrawState) -> BigUint {
        return self.next_rand(self.group.order(), state)
    }

    ///Draw the next value in `[0, modulus)` without modular bias.
    ///
    ///Hashes `[seed, counter]` until the result falls below
    ///`order - (order mod modulus)`; the counter advances on every draw.
    fn next_rand(&self, modulus: &BigUint, state: &mut DrawState) -> BigUint {
        let bound = self.group.order() - (self.group.order() % modulus);
        loop {
            let drawn = self.hash_array(&[
                HashValue::Int(state.seed.clone()),
                HashValue::Int(state.counter.clone())
            ]).expect("integers are always hashable");
            state.counter += BigUint::one();
            if drawn < bound {
                return drawn % modulus
            }
        }
    }
}
