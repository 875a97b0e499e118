// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

use super::*;
use crate::errors::check_length;
use crate::hash::{hash_g, hash_h};
use zeroize::Zeroizing;

/// The two-round Feistel construction over `(nonce, pk)`.
///
/// Round one masks the key with `G(pw || sid || nonce)`; round two masks the
/// nonce with `H(pw || sid || t')`, so the nonce mask depends on the already
/// masked vector. A fresh nonce is required for every call: two blindings
/// under the same password and session id with the same nonce reveal the XOR
/// of their seeds.
#[derive(Debug)]
pub struct TwoFeistel;

/// An encapsulation key blinded with [`TwoFeistel`]: `nonce' || t' || rho'`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TwoFeistelKey {
    pub(crate) nonce: [u8; SYMBYTES],
    pub(crate) vector: Vec<u8>,
    pub(crate) seed: [u8; SYMBYTES],
}

impl TwoFeistel {
    /// Blinds `public_key` with a caller-chosen nonce
    pub fn blind_with_nonce(
        public_key: &PublicKey,
        password: &Password,
        session_id: &SessionId,
        nonce: &[u8; SYMBYTES],
    ) -> Result<TwoFeistelKey> {
        let mask_pk = Zeroizing::new(hash_g(&[password, session_id, nonce]));
        let (vector_seed, seed_mask) = split_halves(&mask_pk);

        let vector = mask_vector(&public_key.vector, &vector_seed, Direction::Blind)?;
        let mut seed = public_key.seed;
        xor_assign(&mut seed, &seed_mask[..]);

        let nonce_mask = Zeroizing::new(hash_h(&[password, session_id, &vector[..]]));
        let mut masked_nonce = *nonce;
        xor_assign(&mut masked_nonce, &nonce_mask[..]);

        Ok(TwoFeistelKey {
            nonce: masked_nonce,
            vector,
            seed,
        })
    }
}

impl Blinding for TwoFeistel {
    const OVERHEAD: usize = SYMBYTES;

    type Blinded = TwoFeistelKey;

    fn blind<R: RngCore + CryptoRng>(
        public_key: &PublicKey,
        password: &Password,
        session_id: &SessionId,
        rng: &mut R,
    ) -> Result<Self::Blinded> {
        let mut nonce = Zeroizing::new([0u8; SYMBYTES]);
        rng.fill_bytes(&mut nonce[..]);
        Self::blind_with_nonce(public_key, password, session_id, &nonce)
    }

    fn unblind(
        blinded: &Self::Blinded,
        password: &Password,
        session_id: &SessionId,
    ) -> Result<PublicKey> {
        let nonce_mask = Zeroizing::new(hash_h(&[password, session_id, &blinded.vector[..]]));
        let mut nonce = Zeroizing::new(blinded.nonce);
        xor_assign(&mut nonce, &nonce_mask[..]);

        let mask_pk = Zeroizing::new(hash_g(&[password, session_id, &nonce[..]]));
        let (vector_seed, seed_mask) = split_halves(&mask_pk);

        let vector = mask_vector(&blinded.vector, &vector_seed, Direction::Unblind)?;
        let mut seed = blinded.seed;
        xor_assign(&mut seed, &seed_mask[..]);

        Ok(PublicKey { vector, seed })
    }

    fn to_bytes(blinded: &Self::Blinded) -> Vec<u8> {
        [&blinded.nonce[..], &blinded.vector[..], &blinded.seed[..]].concat()
    }

    fn from_bytes(bytes: &[u8], public_key_len: usize) -> Result<Self::Blinded> {
        check_length(Self::encoded_len(public_key_len), bytes.len())?;
        let (nonce_bytes, key_bytes) = bytes.split_at(SYMBYTES);
        let key = PublicKey::from_bytes(key_bytes)?;
        let mut nonce = [0u8; SYMBYTES];
        nonce.copy_from_slice(nonce_bytes);

        Ok(TwoFeistelKey {
            nonce,
            vector: key.vector,
            seed: key.seed,
        })
    }
}
