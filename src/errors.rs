// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

use thiserror::Error;

/// The library's error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PakeKemError {
    /// Error for when a buffer crossing the API boundary has the wrong length
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// The length required by the cipher suite
        expected: usize,
        /// The length that was supplied
        actual: usize,
    },
    /// Error for when bytes of the right length do not describe a valid object
    #[error("Issue with deserialization")]
    Deserialization,
    /// Error for when the KEM fails to encapsulate to a public key
    #[error("KEM encapsulation failed")]
    Encapsulation,
    /// Error for when the KEM fails to decapsulate a ciphertext
    #[error("KEM decapsulation failed")]
    Decapsulation,
    /// Error for when the key confirmation tag does not match. The cause is
    /// never reported.
    #[error("Key confirmation failed")]
    AuthenticationFailure,
}

pub(crate) fn check_length(expected: usize, actual: usize) -> Result<(), PakeKemError> {
    match expected == actual {
        true => Ok(()),
        false => Err(PakeKemError::InvalidLength { expected, actual }),
    }
}
