// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! Vectors of polynomials over Z_Q, packed as 12-bit coefficients exactly as
//! they appear in an ML-KEM encapsulation key

use crate::errors::PakeKemError;
use crate::params::{N, POLYBYTES, Q};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Maps `a < 2Q` to `a mod Q` without branching
const fn csubq(a: u16) -> u16 {
    let r = a.wrapping_sub(Q);
    r.wrapping_add(Q & 0u16.wrapping_sub(r >> 15))
}

#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub(crate) struct Poly {
    pub(crate) coeffs: [u16; N],
}

impl Poly {
    pub(crate) const fn zero() -> Self {
        Self { coeffs: [0; N] }
    }

    /// Unpacks 12-bit coefficients. Values in `[Q, 4096)` are reduced, so the
    /// result is always canonical.
    fn from_bytes(bytes: &[u8]) -> Self {
        let mut poly = Self::zero();
        for (pair, chunk) in poly.coeffs.chunks_exact_mut(2).zip(bytes.chunks_exact(3)) {
            let (b0, b1, b2) = (chunk[0] as u16, chunk[1] as u16, chunk[2] as u16);
            pair[0] = csubq((b0 | (b1 << 8)) & 0xfff);
            pair[1] = csubq(((b1 >> 4) | (b2 << 4)) & 0xfff);
        }
        poly
    }

    fn to_bytes(&self, out: &mut [u8]) {
        for (chunk, pair) in out.chunks_exact_mut(3).zip(self.coeffs.chunks_exact(2)) {
            let (t0, t1) = (pair[0], pair[1]);
            chunk[0] = t0 as u8;
            chunk[1] = ((t0 >> 8) | (t1 << 4)) as u8;
            chunk[2] = (t1 >> 4) as u8;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub(crate) struct PolyVec {
    pub(crate) polys: Vec<Poly>,
}

impl PolyVec {
    pub(crate) fn zero(rank: usize) -> Self {
        Self {
            polys: vec![Poly::zero(); rank],
        }
    }

    pub(crate) fn rank(&self) -> usize {
        self.polys.len()
    }

    /// Unpacks `bytes.len() / POLYBYTES` polynomials
    pub(crate) fn from_bytes(bytes: &[u8]) -> Result<Self, PakeKemError> {
        if bytes.is_empty() || bytes.len() % POLYBYTES != 0 {
            return Err(PakeKemError::Deserialization);
        }
        Ok(Self {
            polys: bytes.chunks_exact(POLYBYTES).map(Poly::from_bytes).collect(),
        })
    }

    pub(crate) fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.rank() * POLYBYTES];
        for (chunk, poly) in out.chunks_exact_mut(POLYBYTES).zip(&self.polys) {
            poly.to_bytes(chunk);
        }
        out
    }

    /// `self = (self + other) mod Q`
    pub(crate) fn add_assign(&mut self, other: &Self) {
        debug_assert_eq!(self.rank(), other.rank());
        for (a, b) in self.polys.iter_mut().zip(&other.polys) {
            for (x, y) in a.coeffs.iter_mut().zip(&b.coeffs) {
                *x = csubq(*x + *y);
            }
        }
    }

    /// `self = (self - other) mod Q`
    pub(crate) fn sub_assign(&mut self, other: &Self) {
        debug_assert_eq!(self.rank(), other.rank());
        for (a, b) in self.polys.iter_mut().zip(&other.polys) {
            for (x, y) in a.coeffs.iter_mut().zip(&b.coeffs) {
                *x = csubq(*x + Q - *y);
            }
        }
    }
}
