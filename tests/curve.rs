// SPDX short identifier: Unlicense

use num_bigint::BigUint;

use ringsig::common::*;

fn pad(bytes: &[u8], width: usize) -> Vec<u8> {
    let mut padded = vec![0u8; width - bytes.len()];
    padded.extend_from_slice(bytes);
    return padded
}

#[test]
fn groups_have_expected_widths() {
    assert_eq!(SECP256K1.byte_length(), 32);
    assert_eq!(SECP256R1.byte_length(), 32);
    assert_eq!(SECP384R1.byte_length(), 48);
    assert_eq!(SECP160K1.byte_length(), 20);
}

#[test]
fn generators_are_on_their_curves() {
    for group in [&*SECP256K1, &*SECP256R1, &*SECP384R1, &*SECP160K1] {
        let generator = group.generator();
        let rebuilt = group.point(
            generator.x().unwrap().clone(),
            generator.y().unwrap().clone());
        assert_eq!(rebuilt, Some(generator));
    }
}

#[test]
fn the_order_annihilates_the_generator() {
    for group in [&*SECP256K1, &*SECP256R1, &*SECP384R1, &*SECP160K1] {
        assert!(group.generator().multiply(group.order()).is_infinity());
    }
}

#[test]
fn multiplication_matches_repeated_addition() {
    let generator = SECP256K1.generator();

    assert_eq!(generator.multiply(&BigUint::from(1u8)), generator);
    assert_eq!(generator.multiply(&BigUint::from(2u8)), generator.double());
    assert_eq!(
        generator.multiply(&BigUint::from(3u8)),
        generator.double().add(&generator));
    assert_eq!(
        generator.multiply(&BigUint::from(5u8)),
        generator.multiply(&BigUint::from(2u8)).add(&generator.multiply(&BigUint::from(3u8))));

    assert!(generator.multiply(&BigUint::from(0u8)).is_infinity());
}

#[test]
fn negation_inverts_points() {
    let generator = SECP256K1.generator();

    assert!(generator.add(&generator.negate()).is_infinity());
    assert_eq!(
        generator.multiply(&(SECP256K1.order() - BigUint::from(1u8))),
        generator.negate());

    //the identity is its own inverse
    assert!(SECP256K1.infinity().negate().is_infinity());
    assert_eq!(generator.add(&SECP256K1.infinity()), generator);
}

#[test]
fn point_octets_round_trip() {
    for group in [&*SECP256K1, &*SECP256R1, &*SECP384R1, &*SECP160K1] {
        for scalar in [1u32, 2, 7, 100_000] {
            let point = group.generator().multiply(&BigUint::from(scalar));
            let octets = point.to_octet();
            assert_eq!(octets.len(), 1 + group.byte_length());
            assert_eq!(group.decode_point(&octets).unwrap(), point);
        }
    }
}

#[test]
fn uncompressed_octets_decode() {
    let point = SECP256K1.generator().multiply(&BigUint::from(9u8));
    let mut octets = vec!(0x04);
    octets.extend(pad(&point.x().unwrap().to_bytes_be(), 32));
    octets.extend(pad(&point.y().unwrap().to_bytes_be(), 32));

    assert_eq!(SECP256K1.decode_point(&octets).unwrap(), point);

    //a corrupted coordinate no longer satisfies the curve equation
    let last = octets.len() - 1;
    octets[last] ^= 0x01;
    assert!(SECP256K1.decode_point(&octets).is_err());
}

#[test]
fn the_identity_octet_decodes() {
    let identity = SECP256K1.decode_point(&[0x00]).unwrap();
    assert!(identity.is_infinity());
    assert_eq!(identity.to_octet(), vec!(0x00));
}

#[test]
fn malformed_octets_are_rejected() {
    assert!(SECP256K1.decode_point(&[]).is_err());
    assert!(SECP256K1.decode_point(&[0x05; 33]).is_err());
    assert!(SECP256K1.decode_point(&[0x02; 32]).is_err());
    assert!(SECP256K1.decode_point(&[0x04; 65]).is_err());
    //an x coordinate at the field prime is not reduced
    assert!(SECP256K1.decode_point(&[&[0x02][..], &[0xff; 32][..]].concat()).is_err());
}

#[test]
fn random_scalars_are_in_range() {
    for group in [&*SECP256K1, &*SECP384R1] {
        for _ in 0..16 {
            let scalar = group.random_scalar();
            assert!(scalar >= BigUint::from(1u8));
            assert!(&scalar < group.order());
        }
    }
}
