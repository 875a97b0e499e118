// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! The messages used in the protocol

use crate::blind::Blinding;
use crate::errors::{check_length, PakeKemError};
use crate::params::SYMBYTES;
use crate::CipherSuite;
use core::fmt;
use ml_kem::{Ciphertext, EncodedSizeUser, KemCore};
use typenum::Unsigned;

type Result<T> = core::result::Result<T, PakeKemError>;

pub(crate) fn encapsulation_key_len<K: KemCore>() -> usize {
    <<K::EncapsulationKey as EncodedSizeUser>::EncodedSize as Unsigned>::USIZE
}

pub(crate) fn decapsulation_key_len<K: KemCore>() -> usize {
    <<K::DecapsulationKey as EncodedSizeUser>::EncodedSize as Unsigned>::USIZE
}

pub(crate) fn ciphertext_len<K: KemCore>() -> usize {
    <K::CiphertextSize as Unsigned>::USIZE
}

/// The first message in the protocol, created by the initiator: its fresh
/// encapsulation key, blinded under the password and session id
pub struct MessageOne<CS: CipherSuite> {
    pub(crate) blinded_key: <CS::Blinding as Blinding>::Blinded,
}

impl<CS: CipherSuite> fmt::Debug for MessageOne<CS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageOne")
            .field("blinded_key", &self.blinded_key)
            .finish()
    }
}

impl<CS: CipherSuite> MessageOne<CS> {
    /// Length of the wire encoding for this cipher suite
    pub fn encoded_len() -> usize {
        CS::Blinding::encoded_len(encapsulation_key_len::<CS::Kem>())
    }

    /// Serializes the message
    pub fn to_bytes(&self) -> Vec<u8> {
        CS::Blinding::to_bytes(&self.blinded_key)
    }

    /// Deserializes the message, rejecting input of the wrong length before
    /// doing any other work
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            blinded_key: CS::Blinding::from_bytes(bytes, encapsulation_key_len::<CS::Kem>())?,
        })
    }
}

/// The second message in the protocol, created by the responder: the key
/// confirmation tag followed by the KEM ciphertext
pub struct MessageTwo<CS: CipherSuite> {
    pub(crate) tag: [u8; SYMBYTES],
    pub(crate) ct: Ciphertext<CS::Kem>,
}

impl<CS: CipherSuite> fmt::Debug for MessageTwo<CS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageTwo")
            .field("tag", &self.tag)
            .field("ct", &&self.ct[..])
            .finish()
    }
}

impl<CS: CipherSuite> MessageTwo<CS> {
    /// Length of the wire encoding for this cipher suite
    pub fn encoded_len() -> usize {
        SYMBYTES + ciphertext_len::<CS::Kem>()
    }

    /// Serializes the message as `tag || ciphertext`
    pub fn to_bytes(&self) -> Vec<u8> {
        [&self.tag[..], &self.ct[..]].concat()
    }

    /// Deserializes the message, rejecting input of the wrong length before
    /// doing any other work
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_length(Self::encoded_len(), bytes.len())?;
        let (tag_bytes, ct_bytes) = bytes.split_at(SYMBYTES);
        let mut tag = [0u8; SYMBYTES];
        tag.copy_from_slice(tag_bytes);
        let ct = Ciphertext::<CS::Kem>::try_from(ct_bytes)
            .map_err(|_| PakeKemError::Deserialization)?;

        Ok(Self { tag, ct })
    }
}
