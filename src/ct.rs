// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! Constant-time comparison and selection over byte strings

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Compares two equal-length byte strings without branching on their
/// contents. Returns a set [`Choice`] when they are equal.
pub(crate) fn verify(a: &[u8], b: &[u8]) -> Choice {
    debug_assert_eq!(a.len(), b.len());
    a.ct_eq(b)
}

/// Overwrites `dst` with `src` when `condition` is set, leaving it untouched
/// otherwise. Every byte is touched in both cases.
pub(crate) fn cmov(dst: &mut [u8], src: &[u8], condition: Choice) {
    debug_assert_eq!(dst.len(), src.len());
    for (d, s) in dst.iter_mut().zip(src) {
        d.conditional_assign(s, condition);
    }
}
