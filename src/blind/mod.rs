// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! Password-keyed blinding of KEM encapsulation keys
//!
//! An ML-KEM encapsulation key is the packed vector `t` followed by the seed
//! `rho`. Both constructions here mask `t` additively with a vector expanded
//! from a password-dependent seed, and differ in how `rho` is hidden:
//! [`HalfIdealCipher`] runs it through a 256-bit block cipher keyed by the
//! masked `t`, while [`TwoFeistel`] XORs it with a hash output and adds a
//! second Feistel round over a fresh nonce.

mod feistel;
mod hic;
#[cfg(test)]
mod tests;

pub use feistel::{TwoFeistel, TwoFeistelKey};
pub use hic::{HalfIdealCipher, HalfIdealCipherKey};

use crate::errors::PakeKemError;
use crate::params::{POLYBYTES, SYMBYTES};
use crate::poly::PolyVec;
use crate::sample::gen_vector;
use core::fmt::Debug;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

type Result<T> = core::result::Result<T, PakeKemError>;

/// A fixed-length password
pub type Password = [u8; SYMBYTES];

/// A fixed-length session identifier
pub type SessionId = [u8; SYMBYTES];

/// An encapsulation key viewed as its packed vector part and its seed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) vector: Vec<u8>,
    pub(crate) seed: [u8; SYMBYTES],
}

impl PublicKey {
    /// Splits serialized key bytes into the vector and seed parts
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() <= SYMBYTES || (bytes.len() - SYMBYTES) % POLYBYTES != 0 {
            return Err(PakeKemError::Deserialization);
        }
        let (vector, seed_bytes) = bytes.split_at(bytes.len() - SYMBYTES);
        let mut seed = [0u8; SYMBYTES];
        seed.copy_from_slice(seed_bytes);

        Ok(Self {
            vector: vector.to_vec(),
            seed,
        })
    }

    /// Serializes as `vector || seed`
    pub fn to_bytes(&self) -> Vec<u8> {
        [&self.vector[..], &self.seed[..]].concat()
    }

    /// Number of polynomials in the vector part
    pub fn rank(&self) -> usize {
        self.vector.len() / POLYBYTES
    }
}

/// A reversible transform hiding an encapsulation key under a password and
/// session id
pub trait Blinding {
    /// Bytes the blinded encoding adds on top of the encapsulation key
    const OVERHEAD: usize;

    /// The blinded key as sent over the wire
    type Blinded: Clone + Debug + PartialEq + Eq;

    /// Masks `public_key`. Constructions that need randomness draw it from `rng`.
    fn blind<R: RngCore + CryptoRng>(
        public_key: &PublicKey,
        password: &Password,
        session_id: &SessionId,
        rng: &mut R,
    ) -> Result<Self::Blinded>;

    /// Recovers the encapsulation key. With the wrong password or session id
    /// this still succeeds, yielding an unrelated key.
    fn unblind(
        blinded: &Self::Blinded,
        password: &Password,
        session_id: &SessionId,
    ) -> Result<PublicKey>;

    /// Wire encoding of a blinded key
    fn to_bytes(blinded: &Self::Blinded) -> Vec<u8>;

    /// Parses a blinded key for an encapsulation key of `public_key_len` bytes
    fn from_bytes(bytes: &[u8], public_key_len: usize) -> Result<Self::Blinded>;

    /// Length of the wire encoding for an encapsulation key of `public_key_len` bytes
    fn encoded_len(public_key_len: usize) -> usize {
        public_key_len + Self::OVERHEAD
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Blind,
    Unblind,
}

/// Adds or removes the vector expanded from `seed`, returning the packed result
pub(crate) fn mask_vector(
    vector: &[u8],
    seed: &[u8; SYMBYTES],
    direction: Direction,
) -> Result<Vec<u8>> {
    let mut t = PolyVec::from_bytes(vector)?;
    let mask = gen_vector(seed, t.rank());
    match direction {
        Direction::Blind => t.add_assign(&mask),
        Direction::Unblind => t.sub_assign(&mask),
    }
    Ok(t.to_bytes())
}

pub(crate) type Half = Zeroizing<[u8; SYMBYTES]>;

pub(crate) fn xor_assign(dst: &mut [u8; SYMBYTES], mask: &[u8]) {
    for (d, m) in dst.iter_mut().zip(mask) {
        *d ^= m;
    }
}

/// Splits a double-width hash output into its two halves, copied straight
/// into zeroizing buffers
pub(crate) fn split_halves(buf: &[u8; 2 * SYMBYTES]) -> (Half, Half) {
    let mut left = Zeroizing::new([0u8; SYMBYTES]);
    let mut right = Zeroizing::new([0u8; SYMBYTES]);
    left.copy_from_slice(&buf[..SYMBYTES]);
    right.copy_from_slice(&buf[SYMBYTES..]);
    (left, right)
}
