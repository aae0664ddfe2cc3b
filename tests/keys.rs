// SPDX short identifier: Unlicense

use num_bigint::BigUint;

use ringsig::common::*;

const GENERATOR_COMPRESSED: &str =
    "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const GENERATOR_X: &str =
    "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const GENERATOR_Y: &str =
    "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

fn decimal(digits: &str) -> BigUint {
    return BigUint::parse_bytes(digits.as_bytes(), 10).unwrap()
}

#[test]
fn scalar_range_is_enforced() {
    let order = SECP256K1.order().clone();

    assert_eq!(
        PrivateKey::new(BigUint::from(0u8), SECP256K1_SHA256.clone()),
        Err(KeyError::InvalidScalar));
    assert_eq!(
        PrivateKey::new(order.clone(), SECP256K1_SHA256.clone()),
        Err(KeyError::InvalidScalar));
    assert!(PrivateKey::new(order + BigUint::from(1u8), SECP256K1_SHA256.clone()).is_err());

    assert!(PrivateKey::new(BigUint::from(1u8), SECP256K1_SHA256.clone()).is_ok());
    assert!(PrivateKey::new(
        SECP256K1.order() - BigUint::from(1u8), SECP256K1_SHA256.clone()).is_ok());
}

#[test]
fn public_key_of_one_is_the_generator() {
    let key = PrivateKey::new(BigUint::from(1u8), SECP256K1_SHA256.clone()).unwrap();
    assert_eq!(key.public_key().point(), &SECP256K1.generator());
    assert_eq!(key.public_key().to_hex(), GENERATOR_COMPRESSED);
}

#[test]
fn key_image_of_one_matches_the_known_value() {
    let key = PrivateKey::new(BigUint::from(1u8), SECP256K1_SHA256.clone()).unwrap();
    let image = key.key_image();

    assert_eq!(image.x().unwrap(), &decimal(
        "19808304348355547845585283516832906889081321816618757912787193259813413622341"));
    assert_eq!(image.y().unwrap(), &decimal(
        "6456680440731674563715553325029463353567815591885844101408227481418612066782"));

    //the image of scalar one is the hash of the generator itself
    assert_eq!(
        image,
        SECP256K1_SHA256.hash_point(&SECP256K1.generator()).unwrap());
}

#[test]
fn private_key_octets_are_fixed_width() {
    let key = PrivateKey::new(BigUint::from(1u8), SECP256K1_SHA256.clone()).unwrap();
    assert_eq!(key.to_octet().len(), 32);
    assert_eq!(
        key.to_hex(),
        "0000000000000000000000000000000000000000000000000000000000000001");

    let wide = PrivateKey::new(BigUint::from(1u8), SECP384R1_SHA384.clone()).unwrap();
    assert_eq!(wide.to_octet().len(), 48);
}

#[test]
fn private_key_round_trips() {
    for hasher in [&*SECP256K1_SHA256, &*SECP256R1_SHA256, &*SECP384R1_SHA384] {
        let key = PrivateKey::generate(hasher.clone());
        assert_eq!(PrivateKey::from_hex(&key.to_hex(), hasher.clone()).unwrap(), key);
        assert_eq!(PrivateKey::from_octet(&key.to_octet(), hasher.clone()).unwrap(), key);
    }
}

#[test]
fn out_of_range_octets_are_rejected() {
    //2^256 - 1 is above the secp256k1 order
    assert_eq!(
        PrivateKey::from_octet(&[0xff; 32], SECP256K1_SHA256.clone()),
        Err(SerializationError::DecodingError));
    assert!(PrivateKey::from_octet(&[0x00; 32], SECP256K1_SHA256.clone()).is_err());
    assert!(PrivateKey::from_hex("zz", SECP256K1_SHA256.clone()).is_err());
}

#[test]
fn public_key_round_trips() {
    for hasher in [&*SECP256K1_SHA256, &*SECP256R1_SHA256, &*SECP384R1_SHA384] {
        let key = PrivateKey::generate(hasher.clone()).public_key();
        let octets = key.to_octet();
        assert_eq!(octets.len(), 1 + hasher.group().byte_length());
        assert!(octets[0] == 0x02 || octets[0] == 0x03);
        assert_eq!(PublicKey::from_octet(&octets, hasher.clone()).unwrap(), key);
        assert_eq!(PublicKey::from_hex(&key.to_hex(), hasher.clone()).unwrap(), key);
    }
}

#[test]
fn uncompressed_octets_are_accepted() {
    let uncompressed = format!("04{GENERATOR_X}{GENERATOR_Y}");
    let key = PublicKey::from_hex(&uncompressed, SECP256K1_SHA256.clone()).unwrap();

    assert_eq!(key.point(), &SECP256K1.generator());
    //output is always compressed
    assert_eq!(key.to_hex(), GENERATOR_COMPRESSED);
}

#[test]
fn invalid_public_octets_are_rejected() {
    //the identity
    assert!(PublicKey::from_octet(&[0x00], SECP256K1_SHA256.clone()).is_err());
    //bad prefix and bad lengths
    assert!(PublicKey::from_octet(&[0x05; 33], SECP256K1_SHA256.clone()).is_err());
    assert!(PublicKey::from_octet(&[0x02; 30], SECP256K1_SHA256.clone()).is_err());
    assert!(PublicKey::from_octet(&[], SECP256K1_SHA256.clone()).is_err());

    //a point which is not on the curve
    let mut off_curve = hex::decode(format!("04{GENERATOR_X}{GENERATOR_Y}")).unwrap();
    let last = off_curve.len() - 1;
    off_curve[last] ^= 0x01;
    assert!(PublicKey::from_octet(&off_curve, SECP256K1_SHA256.clone()).is_err());
}

#[test]
fn public_key_construction_is_checked() {
    assert_eq!(
        PublicKey::new(SECP256K1.infinity(), SECP256K1_SHA256.clone()),
        Err(KeyError::InvalidPoint));
    assert_eq!(
        PublicKey::new(SECP256R1.generator(), SECP256K1_SHA256.clone()),
        Err(KeyError::InvalidPoint));
    assert!(PublicKey::new(SECP256K1.generator(), SECP256K1_SHA256.clone()).is_ok());
}

#[test]
fn generated_keys_are_in_range() {
    for _ in 0..16 {
        let key = PrivateKey::generate(SECP256K1_SHA256.clone());
        let recovered = PrivateKey::from_octet(&key.to_octet(), SECP256K1_SHA256.clone());
        assert_eq!(recovered.unwrap(), key);
    }
}
