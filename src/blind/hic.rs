// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

use super::*;
use crate::cipher::IdealCipher256;
use crate::errors::check_length;
use crate::hash::hash_h;
use zeroize::Zeroizing;

/// The half-ideal-cipher construction.
///
/// The vector part is masked with a vector derived from `H(pw || sid || rho)`,
/// then `rho` is enciphered under `H(pw || sid || t')`. The transform is a
/// deterministic function of the key, password and session id.
#[derive(Debug)]
pub struct HalfIdealCipher;

/// An encapsulation key blinded with [`HalfIdealCipher`]: `t' || rho'`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HalfIdealCipherKey {
    pub(crate) vector: Vec<u8>,
    pub(crate) seed: [u8; SYMBYTES],
}

impl Blinding for HalfIdealCipher {
    const OVERHEAD: usize = 0;

    type Blinded = HalfIdealCipherKey;

    fn blind<R: RngCore + CryptoRng>(
        public_key: &PublicKey,
        password: &Password,
        session_id: &SessionId,
        _rng: &mut R,
    ) -> Result<Self::Blinded> {
        let mask_seed = Zeroizing::new(hash_h(&[password, session_id, &public_key.seed]));
        let vector = mask_vector(&public_key.vector, &mask_seed, Direction::Blind)?;

        let key = Zeroizing::new(hash_h(&[password, session_id, &vector[..]]));
        let mut seed = public_key.seed;
        IdealCipher256::encrypt_block(&mut seed, &key);

        Ok(HalfIdealCipherKey { vector, seed })
    }

    fn unblind(
        blinded: &Self::Blinded,
        password: &Password,
        session_id: &SessionId,
    ) -> Result<PublicKey> {
        let key = Zeroizing::new(hash_h(&[password, session_id, &blinded.vector[..]]));
        let mut seed = blinded.seed;
        IdealCipher256::decrypt_block(&mut seed, &key);

        let mask_seed = Zeroizing::new(hash_h(&[password, session_id, &seed]));
        let vector = mask_vector(&blinded.vector, &mask_seed, Direction::Unblind)?;

        Ok(PublicKey { vector, seed })
    }

    fn to_bytes(blinded: &Self::Blinded) -> Vec<u8> {
        [&blinded.vector[..], &blinded.seed[..]].concat()
    }

    fn from_bytes(bytes: &[u8], public_key_len: usize) -> Result<Self::Blinded> {
        check_length(Self::encoded_len(public_key_len), bytes.len())?;
        let key = PublicKey::from_bytes(bytes)?;
        Ok(HalfIdealCipherKey {
            vector: key.vector,
            seed: key.seed,
        })
    }
}
