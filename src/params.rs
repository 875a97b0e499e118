// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! Fixed parameters shared by every ML-KEM parameter set

/// Length of passwords, session ids, seeds, nonces, tags and session keys
pub const SYMBYTES: usize = 32;

/// Number of coefficients in a polynomial
pub(crate) const N: usize = 256;

/// The prime modulus of the ring
pub(crate) const Q: u16 = 3329;

/// Bytes taken by one polynomial packed as 12-bit coefficients
pub(crate) const POLYBYTES: usize = 384;

/// Rate of SHAKE128 in bytes
pub(crate) const XOF_BLOCKBYTES: usize = 168;

/// Blocks squeezed up front when sampling a polynomial, enough for a full
/// polynomial with high probability
pub(crate) const GEN_VECTOR_NBLOCKS: usize =
    (12 * N / 8 * (1 << 12) / Q as usize + XOF_BLOCKBYTES) / XOF_BLOCKBYTES;

/// Second byte appended to the seed when expanding a mask vector
pub(crate) const VECTOR_DOMAIN: u8 = 0;

// Rejection sampling consumes three bytes at a time and never carries a
// partial triple between squeezes.
const _: () = assert!(XOF_BLOCKBYTES % 3 == 0);
