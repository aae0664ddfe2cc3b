/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Private and public keys bound to a hasher.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::curve::{left_pad, Point};
use crate::errors::{KeyError, SerializationError};
use crate::hashes::Hasher;
use crate::signature::Signature;

///A private key: a scalar in `[1, order)` together with the hasher that
///fixes its group and digest.
///
///The key image `value * H(value * G)` is a function of the scalar and
///hasher alone, so two signatures by the same key are linkable no matter
///which rings they were produced with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    value: BigUint,
    hasher: Hasher,

} impl PrivateKey {
    ///Create a key from a scalar, rejecting zero and anything at or above
    ///the group order.
    pub fn new(value: BigUint, hasher: Hasher) -> Result<Self, KeyError> {
        if value.is_zero() || &value >= hasher.group().order() {
            return Err(KeyError::InvalidScalar)
        }
        return Ok(Self{ value, hasher })
    }

    ///Generate a key uniformly from the system RNG.
    pub fn generate(hasher: Hasher) -> Self {
        let value = hasher.group().random_scalar();
        return Self{ value, hasher }
    }

    pub fn hasher(&self) -> &Hasher {
        return &self.hasher
    }

    pub(crate) fn value(&self) -> &BigUint {
        return &self.value
    }

    ///The public key `value * G`.
    pub fn public_key(&self) -> PublicKey {
        return PublicKey{
            point: self.hasher.group().generator().multiply(&self.value),
            hasher: self.hasher.clone()
        }
    }

    ///The key image `value * H(value * G)`: deterministic per key,
    ///independent of any ring.
    pub fn key_image(&self) -> Point {
        let base = self.hasher.hash_point(self.public_key().point())
            .expect("a public key is never the identity");
        return base.multiply(&self.value)
    }

    ///Produce a ring signature over `message` with this key hidden among
    ///`foreign_keys`. Returns the signature together with the shuffled
    ///ring it verifies against; the ring order is part of the signature
    ///and both must be transmitted.
    pub fn sign(&self, message: &str, foreign_keys: &[PublicKey]) -> Result<(Signature, Vec<PublicKey>), KeyError> {
        return crate::signature::sign(self, message, foreign_keys)
    }

    ///The scalar as a big-endian integer at the group's fixed width.
    pub fn to_octet(&self) -> Vec<u8> {
        return left_pad(&self.value.to_bytes_be(), self.hasher.group().byte_length())
    }

    pub fn from_octet(octets: &[u8], hasher: Hasher) -> Result<Self, SerializationError> {
        return Self::new(BigUint::from_bytes_be(octets), hasher)
            .map_err(|_| SerializationError::DecodingError)
    }

    ///Lowercase hex of `to_octet`.
    pub fn to_hex(&self) -> String {
        return hex::encode(self.to_octet())
    }

    pub fn from_hex(digits: &str, hasher: Hasher) -> Result<Self, SerializationError> {
        let octets = hex::decode(digits)
            .map_err(|_| SerializationError::DecodingError)?;
        return Self::from_octet(&octets, hasher)
    }
}

///A public key: an on-curve, non-identity point together with a hasher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    point: Point,
    hasher: Hasher,

} impl PublicKey {
    ///Create a key from a point, rejecting the identity and points of a
    ///group other than the hasher's.
    pub fn new(point: Point, hasher: Hasher) -> Result<Self, KeyError> {
        if point.is_infinity() || point.group() != hasher.group() {
            return Err(KeyError::InvalidPoint)
        }
        return Ok(Self{ point, hasher })
    }

    pub fn point(&self) -> &Point {
        return &self.point
    }

    pub fn hasher(&self) -> &Hasher {
        return &self.hasher
    }

    ///The canonical compressed SEC1 octets.
    pub fn to_octet(&self) -> Vec<u8> {
        return self.point.to_octet()
    }

    ///Decode SEC1 octets; the uncompressed `04` form is accepted, the
    ///compressed form is canonical on output.
    pub fn from_octet(octets: &[u8], hasher: Hasher) -> Result<Self, SerializationError> {
        let point = hasher.group().decode_point(octets)?;
        if point.is_infinity() {
            return Err(SerializationError::DecodingError)
        }
        return Ok(Self{ point, hasher })
    }

    ///Lowercase hex of `to_octet`.
    pub fn to_hex(&self) -> String {
        return hex::encode(self.to_octet())
    }

    pub fn from_hex(digits: &str, hasher: Hasher) -> Result<Self, SerializationError> {
        let octets = hex::decode(digits)
            .map_err(|_| SerializationError::DecodingError)?;
        return Self::from_octet(&octets, hasher)
    }
}
