// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! Thin wrappers over the SHA-3 family, fed with the concatenation of several
//! parts so that callers never build the hash input by hand

use crate::params::SYMBYTES;
use sha3::digest::{ExtendableOutput, Update};
use sha3::{Digest, Sha3_256, Sha3_512, Shake128, Shake128Reader};

/// `hash_h`: SHA3-256 over the concatenation of `parts`
pub(crate) fn hash_h(parts: &[&[u8]]) -> [u8; SYMBYTES] {
    let mut hasher = Sha3_256::new();
    for part in parts {
        Digest::update(&mut hasher, part);
    }
    let mut out = [0u8; SYMBYTES];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// `hash_g`: SHA3-512 over the concatenation of `parts`
pub(crate) fn hash_g(parts: &[&[u8]]) -> [u8; 2 * SYMBYTES] {
    let mut hasher = Sha3_512::new();
    for part in parts {
        Digest::update(&mut hasher, part);
    }
    let mut out = [0u8; 2 * SYMBYTES];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// SHAKE128 absorbing `seed || x || y`, ready to be squeezed
pub(crate) fn xof(seed: &[u8; SYMBYTES], x: u8, y: u8) -> Shake128Reader {
    let mut hasher = Shake128::default();
    hasher.update(seed);
    hasher.update(&[x, y]);
    hasher.finalize_xof()
}
