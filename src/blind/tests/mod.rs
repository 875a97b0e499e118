// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

use super::*;
use crate::params::Q;
use ml_kem::{EncodedSizeUser, KemCore, MlKem1024, MlKem512, MlKem768};
use rand_core::OsRng;

mod test_encoding;

fn fresh_key<K: KemCore>() -> PublicKey {
    let (_, ek) = K::generate(&mut OsRng);
    PublicKey::from_bytes(&ek.as_bytes()).expect("ML-KEM keys always split")
}

fn random_symbytes() -> [u8; SYMBYTES] {
    let mut out = [0u8; SYMBYTES];
    OsRng.fill_bytes(&mut out);
    out
}

fn flip_bit(bytes: &[u8; SYMBYTES], bit: usize) -> [u8; SYMBYTES] {
    let mut out = *bytes;
    out[bit / 8] ^= 1 << (bit % 8);
    out
}

fn differing_bytes(a: &[u8], b: &[u8]) -> usize {
    assert_eq!(a.len(), b.len());
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

fn assert_round_trip<B: Blinding>(public_key: &PublicKey) {
    let password = random_symbytes();
    let session_id = random_symbytes();
    let blinded = B::blind(public_key, &password, &session_id, &mut OsRng).unwrap();
    let recovered = B::unblind(&blinded, &password, &session_id).unwrap();
    assert_eq!(&recovered, public_key);
}

#[test]
fn test_split_halves_into_zeroizing_buffers() {
    let buf: [u8; 2 * SYMBYTES] = core::array::from_fn(|i| i as u8);
    let (left, right): (Zeroizing<[u8; SYMBYTES]>, Zeroizing<[u8; SYMBYTES]>) =
        split_halves(&buf);
    assert_eq!(&left[..], &buf[..SYMBYTES]);
    assert_eq!(&right[..], &buf[SYMBYTES..]);
}

#[test]
fn test_public_key_split() {
    let public_key = fresh_key::<MlKem768>();
    assert_eq!(public_key.rank(), 3);
    assert_eq!(public_key.vector.len(), 3 * POLYBYTES);
    assert_eq!(
        PublicKey::from_bytes(&public_key.to_bytes()).unwrap(),
        public_key
    );
}

#[test]
fn test_public_key_rejects_bad_lengths() {
    assert_eq!(
        PublicKey::from_bytes(&[0u8; SYMBYTES]),
        Err(PakeKemError::Deserialization)
    );
    assert_eq!(
        PublicKey::from_bytes(&[0u8; POLYBYTES + SYMBYTES + 1]),
        Err(PakeKemError::Deserialization)
    );
}

#[test]
fn test_half_ideal_cipher_round_trip() {
    for _ in 0..8 {
        assert_round_trip::<HalfIdealCipher>(&fresh_key::<MlKem512>());
        assert_round_trip::<HalfIdealCipher>(&fresh_key::<MlKem768>());
        assert_round_trip::<HalfIdealCipher>(&fresh_key::<MlKem1024>());
    }
}

#[test]
fn test_two_feistel_round_trip() {
    for _ in 0..8 {
        assert_round_trip::<TwoFeistel>(&fresh_key::<MlKem512>());
        assert_round_trip::<TwoFeistel>(&fresh_key::<MlKem768>());
        assert_round_trip::<TwoFeistel>(&fresh_key::<MlKem1024>());
    }
}

#[test]
fn test_two_feistel_round_trip_with_chosen_nonce() {
    let public_key = fresh_key::<MlKem768>();
    let password = random_symbytes();
    let session_id = [0u8; SYMBYTES];
    let nonce = random_symbytes();

    let blinded = TwoFeistel::blind_with_nonce(&public_key, &password, &session_id, &nonce).unwrap();
    assert_ne!(blinded.nonce, nonce);
    assert_eq!(
        TwoFeistel::unblind(&blinded, &password, &session_id).unwrap(),
        public_key
    );
}

#[test]
fn test_half_ideal_cipher_is_deterministic() {
    let public_key = fresh_key::<MlKem768>();
    let password = random_symbytes();
    let session_id = random_symbytes();

    let first = HalfIdealCipher::blind(&public_key, &password, &session_id, &mut OsRng).unwrap();
    let second = HalfIdealCipher::blind(&public_key, &password, &session_id, &mut OsRng).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_blinding_changes_every_part() {
    let public_key = fresh_key::<MlKem768>();
    let password = random_symbytes();
    let session_id = random_symbytes();

    let hic = HalfIdealCipher::blind(&public_key, &password, &session_id, &mut OsRng).unwrap();
    assert_ne!(hic.vector, public_key.vector);
    assert_ne!(hic.seed, public_key.seed);

    let feistel = TwoFeistel::blind(&public_key, &password, &session_id, &mut OsRng).unwrap();
    assert_ne!(feistel.vector, public_key.vector);
    assert_ne!(feistel.seed, public_key.seed);
}

#[test]
fn test_blinded_vector_is_canonical() {
    let public_key = fresh_key::<MlKem768>();
    let blinded = HalfIdealCipher::blind(
        &public_key,
        &random_symbytes(),
        &random_symbytes(),
        &mut OsRng,
    )
    .unwrap();
    let t = PolyVec::from_bytes(&blinded.vector).unwrap();
    assert_eq!(t.to_bytes(), blinded.vector);
    assert!(t.polys.iter().all(|p| p.coeffs.iter().all(|&c| c < Q)));
}

#[test]
fn test_password_diffusion() {
    let public_key = fresh_key::<MlKem768>();
    let password = random_symbytes();
    let session_id = random_symbytes();
    let nonce = random_symbytes();

    for bit in [0, 7, 100, 255] {
        let other = flip_bit(&password, bit);

        let a = HalfIdealCipher::to_bytes(
            &HalfIdealCipher::blind(&public_key, &password, &session_id, &mut OsRng).unwrap(),
        );
        let b = HalfIdealCipher::to_bytes(
            &HalfIdealCipher::blind(&public_key, &other, &session_id, &mut OsRng).unwrap(),
        );
        assert!(differing_bytes(&a, &b) * 10 > a.len() * 9);

        let a = TwoFeistel::to_bytes(
            &TwoFeistel::blind_with_nonce(&public_key, &password, &session_id, &nonce).unwrap(),
        );
        let b = TwoFeistel::to_bytes(
            &TwoFeistel::blind_with_nonce(&public_key, &other, &session_id, &nonce).unwrap(),
        );
        assert!(differing_bytes(&a, &b) * 10 > a.len() * 9);
    }
}

#[test]
fn test_session_id_diffusion() {
    let public_key = fresh_key::<MlKem768>();
    let password = random_symbytes();
    let session_id = random_symbytes();

    let a = HalfIdealCipher::blind(&public_key, &password, &session_id, &mut OsRng).unwrap();
    let b = HalfIdealCipher::blind(&public_key, &password, &flip_bit(&session_id, 3), &mut OsRng)
        .unwrap();
    assert!(differing_bytes(&a.vector, &b.vector) * 10 > a.vector.len() * 9);
}

#[test]
fn test_two_feistel_nonce_changes_output() {
    let public_key = fresh_key::<MlKem768>();
    let password = random_symbytes();
    let session_id = random_symbytes();

    let a = TwoFeistel::blind_with_nonce(&public_key, &password, &session_id, &[1u8; SYMBYTES])
        .unwrap();
    let b = TwoFeistel::blind_with_nonce(&public_key, &password, &session_id, &[2u8; SYMBYTES])
        .unwrap();
    assert_ne!(a, b);
    assert_ne!(a.vector, b.vector);

    let c = TwoFeistel::blind(&public_key, &password, &session_id, &mut OsRng).unwrap();
    let d = TwoFeistel::blind(&public_key, &password, &session_id, &mut OsRng).unwrap();
    assert_ne!(c, d);
}

#[test]
fn test_wrong_password_recovers_a_different_key() {
    let public_key = fresh_key::<MlKem768>();
    let password = random_symbytes();
    let session_id = random_symbytes();
    let wrong = flip_bit(&password, 0);

    let hic = HalfIdealCipher::blind(&public_key, &password, &session_id, &mut OsRng).unwrap();
    let recovered = HalfIdealCipher::unblind(&hic, &wrong, &session_id).unwrap();
    assert_ne!(recovered.vector, public_key.vector);
    assert_ne!(recovered.seed, public_key.seed);

    let feistel = TwoFeistel::blind(&public_key, &password, &session_id, &mut OsRng).unwrap();
    let recovered = TwoFeistel::unblind(&feistel, &password, &flip_bit(&session_id, 9)).unwrap();
    assert_ne!(recovered.vector, public_key.vector);
    assert_ne!(recovered.seed, public_key.seed);
}
