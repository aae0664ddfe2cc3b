/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    error::Error,
    fmt::Display
};

///Encoding/serialization errors
///
///Encoding itself cannot fail in this crate; only decoding is fallible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializationError {
    ///Failure to deserialize.
    DecodingError,

} impl Display for SerializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self{
            Self::DecodingError => "Decoding error."
        })
    }

} impl Error for SerializationError {}

///Hasher errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HasherError {
    ///The digest's output length differs from the group's encoded scalar length.
    IncompatibleDigest,
    ///The given value cannot be hashed by this hasher,
    ///such as a point belonging to a different group.
    UnhashableValue,

} impl Display for HasherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self{
            Self::IncompatibleDigest => "The digest length does not match the group's scalar length.",
            Self::UnhashableValue => "This value cannot be hashed."
        })
    }

} impl Error for HasherError {}

///Key errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    ///The private scalar is zero, or not below the group order.
    InvalidScalar,
    ///The public point is the identity, or belongs to a different group
    ///than the hasher's.
    InvalidPoint,
    ///The foreign keys were built with a different hasher.
    MismatchedHasher,

} impl Display for KeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self{
            Self::InvalidScalar => "The scalar is out of range for the group.",
            Self::InvalidPoint => "The point cannot be used as a public key.",
            Self::MismatchedHasher => "The keys do not share a single hasher."
        })
    }

} impl Error for KeyError {}
