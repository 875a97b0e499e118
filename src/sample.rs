// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! Deterministic expansion of a seed into a uniformly random lattice vector

use crate::hash::xof;
use crate::params::{GEN_VECTOR_NBLOCKS, N, Q, SYMBYTES, VECTOR_DOMAIN, XOF_BLOCKBYTES};
use crate::poly::PolyVec;
use sha3::digest::XofReader;
use zeroize::Zeroize;

/// Fills `coeffs` with the 12-bit values from `buf` that are below Q, two per
/// three bytes, and returns how many were written
fn rej_uniform(coeffs: &mut [u16], buf: &[u8]) -> usize {
    let mut ctr = 0;
    for chunk in buf.chunks_exact(3) {
        if ctr >= coeffs.len() {
            break;
        }
        let d1 = ((chunk[0] as u16) | (chunk[1] as u16) << 8) & 0xfff;
        let d2 = ((chunk[1] as u16) >> 4 | (chunk[2] as u16) << 4) & 0xfff;

        if d1 < Q {
            coeffs[ctr] = d1;
            ctr += 1;
        }
        if ctr < coeffs.len() && d2 < Q {
            coeffs[ctr] = d2;
            ctr += 1;
        }
    }
    ctr
}

/// Expands `seed` into `rank` polynomials with coefficients uniform mod Q.
/// Row `i` is sampled from SHAKE128(seed || i || 0).
pub(crate) fn gen_vector(seed: &[u8; SYMBYTES], rank: usize) -> PolyVec {
    let mut vector = PolyVec::zero(rank);
    let mut buf = [0u8; GEN_VECTOR_NBLOCKS * XOF_BLOCKBYTES];

    for (i, poly) in vector.polys.iter_mut().enumerate() {
        let mut reader = xof(seed, i as u8, VECTOR_DOMAIN);
        reader.read(&mut buf);
        let mut ctr = rej_uniform(&mut poly.coeffs, &buf);

        while ctr < N {
            let block = &mut buf[..XOF_BLOCKBYTES];
            reader.read(block);
            ctr += rej_uniform(&mut poly.coeffs[ctr..], block);
        }
    }

    buf.zeroize();
    vector
}
