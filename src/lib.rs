/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!Linkable spontaneous anonymous group (ring) signatures.
//!
//!A holder of one private key in an ad-hoc set of public keys produces a
//!signature proving that *some* ring member signed, without revealing
//!which one, together with a key image which is identical across every
//!signature made with the same key. Verifiers can therefore detect a key
//!signing twice without ever learning which key it was.
//!
//!Signing is deterministic: the ring order and every scalar drawn during
//!signing derive from the private key, the message, and the foreign keys,
//!so the same inputs always reproduce the same signature bytes.

#[macro_use]
extern crate lazy_static;


//"normal" public modules
pub mod errors;
pub mod curve;
pub mod hashes;

pub mod keys;
pub mod signature;


pub mod common {
    //! A collection of commonly-used things in this crate.
    //! Errors, curve groups, hashers, keys, and signatures are all included.
    //!
    //! This is intended for situations where you don't want to bother with
    //! manually specifying everything you need.
    //! Relying on something like this is generally considered bad practice,
    //! and is intended for use in tests, examples, mockups, etc.
    //!
    //! Use `common::*` if you wish to automatically import everything.

    pub use crate::{
        errors::*, curve::*, hashes::*, keys::*, signature::*
    };
}
