/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use simple_asn1::ASN1Block;

use crate::curve::Point;
use crate::errors::{KeyError, SerializationError};
use crate::hashes::{DrawState, HashValue, Hasher};
use crate::keys::{PrivateKey, PublicKey};

///A linkable ring signature.
///
///Holds the signer's key image, the challenge at ring position zero, and
///one response per ring member. The ring itself is not embedded; a
///signature verifies only against the exact ordered ring returned by
///`PrivateKey::sign`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    key_image: Point,
    challenge: BigUint,
    responses: Vec<BigUint>,
    hasher: Hasher,

} impl Signature {
    ///The signer's key image. Equal across all signatures made with the
    ///same private key, which is what makes double-signing detectable.
    pub fn key_image(&self) -> &Point {
        return &self.key_image
    }

    ///The challenge at ring position zero.
    pub fn challenge(&self) -> &BigUint {
        return &self.challenge
    }

    ///One response per ring member.
    pub fn responses(&self) -> &[BigUint] {
        return &self.responses
    }

    pub fn hasher(&self) -> &Hasher {
        return &self.hasher
    }

    ///Check this signature against a message and an ordered ring.
    ///
    ///Walks the whole ring recomputing the challenge chain and accepts
    ///only if it closes on the starting challenge. Any mismatch -
    ///lengths, hashers, a broken chain - is an ordinary `false`, never
    ///an error.
    pub fn verify(&self, message: &str, ring: &[PublicKey]) -> bool {
        if ring.is_empty() || ring.len() != self.responses.len() {
            return false
        }
        if ring.iter().any(|member| member.hasher() != &self.hasher) {
            return false
        }

        let generator = self.hasher.group().generator();
        let mut challenge = self.challenge.clone();
        for (member, response) in ring.iter().zip(&self.responses) {
            let member_base = match self.hasher.hash_point(member.point()) {
                Ok(point) => point,
                Err(_) => return false
            };
            let left = generator.multiply(response)
                .add(&member.point().multiply(&challenge));
            let right = member_base.multiply(response)
                .add(&self.key_image.multiply(&challenge));
            challenge = match challenge_scalar(&self.hasher, message, &left, &right) {
                Ok(challenge) => challenge,
                Err(_) => return false
            };
        }
        return challenge == self.challenge
    }

    ///Canonical DER: `SEQUENCE { key image OCTET STRING,
    ///challenge INTEGER, responses SEQUENCE OF INTEGER }`.
    pub fn to_der(&self) -> Vec<u8> {
        let responses = self.responses.iter()
            .map(|response| ASN1Block::Integer(0, BigInt::from(response.clone())))
            .collect();
        let sequence = ASN1Block::Sequence(0, vec!(
            ASN1Block::OctetString(0, self.key_image.to_octet()),
            ASN1Block::Integer(0, BigInt::from(self.challenge.clone())),
            ASN1Block::Sequence(0, responses)
        ));
        return simple_asn1::to_der(&sequence)
            .expect("primitive blocks always encode")
    }

    ///Decode a DER signature, validating structure, scalar ranges, and
    ///curve membership of the key image.
    pub fn from_der(octets: &[u8], hasher: Hasher) -> Result<Self, SerializationError> {
        let blocks = simple_asn1::from_der(octets)
            .map_err(|_| SerializationError::DecodingError)?;
        let fields = match blocks.as_slice() {
            [ASN1Block::Sequence(_, fields)] => fields,
            _ => return Err(SerializationError::DecodingError)
        };
        let (image_octets, challenge, response_blocks) = match fields.as_slice() {
            [
                ASN1Block::OctetString(_, image_octets),
                ASN1Block::Integer(_, challenge),
                ASN1Block::Sequence(_, response_blocks)
            ] => (image_octets, challenge, response_blocks),
            _ => return Err(SerializationError::DecodingError)
        };

        let key_image = hasher.group().decode_point(image_octets)?;
        if key_image.is_infinity() {
            return Err(SerializationError::DecodingError)
        }
        if response_blocks.is_empty() {
            return Err(SerializationError::DecodingError)
        }
        let challenge = decode_scalar(challenge, &hasher)?;
        let responses = response_blocks.iter()
            .map(|block| match block{
                ASN1Block::Integer(_, response) => decode_scalar(response, &hasher),
                _ => Err(SerializationError::DecodingError)
            })
            .collect::<Result<Vec<BigUint>, SerializationError>>()?;

        return Ok(Self{ key_image, challenge, responses, hasher })
    }

    ///Lowercase hex of `to_der`.
    pub fn to_hex(&self) -> String {
        return hex::encode(self.to_der())
    }

    pub fn from_hex(digits: &str, hasher: Hasher) -> Result<Self, SerializationError> {
        let octets = hex::decode(digits)
            .map_err(|_| SerializationError::DecodingError)?;
        return Self::from_der(&octets, hasher)
    }
}

///Ring signing.
///
///The ring order, the signer's nonce, and the decoy responses are all
///drawn from a single deterministic stream seeded by the private scalar,
///the message, and the foreign points, so the same inputs always produce
///the same signature and the signer's position is unpredictable to
///anyone without the private scalar.
pub(crate) fn sign(
    key: &PrivateKey, message: &str, foreign_keys: &[PublicKey]
) -> Result<(Signature, Vec<PublicKey>), KeyError> {
    if foreign_keys.iter().any(|foreign| foreign.hasher() != key.hasher()) {
        return Err(KeyError::MismatchedHasher)
    }
    let hasher = key.hasher();
    let generator = hasher.group().generator();
    let own_key = key.public_key();

    //the seed binds the private scalar, the message, and the foreign
    //points in caller order
    let mut seed_values = vec!(
        HashValue::Int(key.value().clone()),
        HashValue::Text(message.to_string())
    );
    seed_values.extend(foreign_keys.iter()
        .map(|foreign| HashValue::Point(foreign.point().clone())));
    let seed = hasher.hash_array(&seed_values)
        .expect("ring keys share this hasher");

    let mut all_keys = Vec::with_capacity(foreign_keys.len() + 1);
    all_keys.push(own_key.clone());
    all_keys.extend_from_slice(foreign_keys);

    let mut state = DrawState::new(seed);
    let ring = hasher.shuffle_drawn(&all_keys, &mut state);
    let position = ring.iter().position(|member| member == &own_key)
        .expect("the signer's key was shuffled into the ring");
    let members = ring.len();
    let key_image = key.key_image();

    //nonce and decoy responses continue the stream the shuffle advanced
    let nonce = hasher.next_scalar(&mut state);
    let mut responses = vec![BigUint::zero(); members];
    for step in 1..members {
        responses[(position + step) % members] = hasher.next_scalar(&mut state);
    }

    //commitment pair at the signer's position opens the chain
    let own_base = hasher.hash_point(own_key.point())
        .expect("ring members are never the identity");
    let mut challenges = vec![BigUint::zero(); members];
    challenges[(position + 1) % members] = challenge_scalar(
        hasher,
        message,
        &generator.multiply(&nonce),
        &own_base.multiply(&nonce)
    ).expect("challenge points share the ring's group");

    //travel around the ring
    for step in 1..members {
        let index = (position + step) % members;
        let next = (index + 1) % members;
        let member_base = hasher.hash_point(ring[index].point())
            .expect("ring members are never the identity");
        let left = generator.multiply(&responses[index])
            .add(&ring[index].point().multiply(&challenges[index]));
        let right = member_base.multiply(&responses[index])
            .add(&key_image.multiply(&challenges[index]));
        challenges[next] = challenge_scalar(hasher, message, &left, &right)
            .expect("challenge points share the ring's group");
    }

    //close the ring: only the true signer can solve for this response
    responses[position] = close_response(
        &nonce, &challenges[position], key.value(), hasher.group().order());

    let signature = Signature{
        key_image,
        challenge: challenges[0].clone(),
        responses,
        hasher: hasher.clone()
    };
    return Ok((signature, ring))
}

///`hash_array([message, left, right])`
fn challenge_scalar(
    hasher: &Hasher, message: &str, left: &Point, right: &Point
) -> Result<BigUint, crate::errors::HasherError> {
    return hasher.hash_array(&[
        HashValue::Text(message.to_string()),
        HashValue::Point(left.clone()),
        HashValue::Point(right.clone())
    ])
}

///`(nonce - challenge * value) mod order`
fn close_response(
    nonce: &BigUint, challenge: &BigUint, value: &BigUint, order: &BigUint
) -> BigUint {
    let product = (challenge * value) % order;
    return ((nonce + order) - product) % order
}

///Accept a decoded integer only when it lies in `[0, order)`.
fn decode_scalar(value: &BigInt, hasher: &Hasher) -> Result<BigUint, SerializationError> {
    let value = value.to_biguint()
        .ok_or(SerializationError::DecodingError)?;
    if &value >= hasher.group().order() {
        return Err(SerializationError::DecodingError)
    }
    return Ok(value)
}
