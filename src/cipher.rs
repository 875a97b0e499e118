// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed
// licenses.

//! A 256-bit "ideal cipher" instantiated with Rijndael using a 256-bit block
//! and a 256-bit key.
//!
//! The core below follows the Rijndael proposal with a variable number of
//! columns `NB`; only `NB = 8` is exposed. With `NB = 4` the same code is
//! AES-256, which is how it is checked against FIPS-197.

use crate::params::SYMBYTES;
use zeroize::Zeroize;

/// Words in a 256-bit key
const NK: usize = 8;

/// Rounds for a 256-bit key, independent of the block width up to 256 bits
const ROUNDS: usize = 14;

/// Reduction polynomial of GF(2^8), x^8 + x^4 + x^3 + x + 1, without the x^8 term
const REDUCTION: u8 = 0x1b;

const fn xtime(a: u8) -> u8 {
    (a << 1) ^ (REDUCTION & 0u8.wrapping_sub(a >> 7))
}

const fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    let mut i = 0;
    while i < 8 {
        product ^= a & 0u8.wrapping_sub(b & 1);
        a = xtime(a);
        b >>= 1;
        i += 1;
    }
    product
}

/// Multiplicative inverse as a^254, mapping 0 to 0
const fn gf_inv(a: u8) -> u8 {
    let mut result = 1u8;
    let mut base = a;
    let mut exponent = 254u8;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = gf_mul(result, base);
        }
        base = gf_mul(base, base);
        exponent >>= 1;
    }
    result
}

const fn build_sbox() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let b = gf_inv(i as u8);
        table[i] = b
            ^ b.rotate_left(1)
            ^ b.rotate_left(2)
            ^ b.rotate_left(3)
            ^ b.rotate_left(4)
            ^ 0x63;
        i += 1;
    }
    table
}

const fn invert(table: &[u8; 256]) -> [u8; 256] {
    let mut inverse = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        inverse[table[i] as usize] = i as u8;
        i += 1;
    }
    inverse
}

const SBOX: [u8; 256] = build_sbox();
const INV_SBOX: [u8; 256] = invert(&SBOX);

/// Row offsets used by ShiftRows for a block of `nb` columns
const fn shift_offsets(nb: usize) -> [usize; 4] {
    if nb == 8 {
        [0, 1, 3, 4]
    } else {
        [0, 1, 2, 3]
    }
}

type State<const NB: usize> = [[u8; 4]; NB];

struct Rijndael<const NB: usize> {
    round_keys: [State<NB>; ROUNDS + 1],
}

impl<const NB: usize> Drop for Rijndael<NB> {
    fn drop(&mut self) {
        self.round_keys.zeroize();
    }
}

impl<const NB: usize> Rijndael<NB> {
    fn new(key: &[u8; 4 * NK]) -> Self {
        let mut round_keys = [[[0u8; 4]; NB]; ROUNDS + 1];
        let mut rcon = 1u8;
        let mut prev = [0u8; 4];

        for i in 0..NB * (ROUNDS + 1) {
            let word = if i < NK {
                [key[4 * i], key[4 * i + 1], key[4 * i + 2], key[4 * i + 3]]
            } else {
                let mut temp = prev;
                if i % NK == 0 {
                    temp.rotate_left(1);
                    sub_word(&mut temp);
                    temp[0] ^= rcon;
                    rcon = xtime(rcon);
                } else if i % NK == 4 {
                    sub_word(&mut temp);
                }
                let back = i - NK;
                let earlier = round_keys[back / NB][back % NB];
                [
                    earlier[0] ^ temp[0],
                    earlier[1] ^ temp[1],
                    earlier[2] ^ temp[2],
                    earlier[3] ^ temp[3],
                ]
            };
            round_keys[i / NB][i % NB] = word;
            prev = word;
        }
        prev.zeroize();

        Self { round_keys }
    }

    fn encrypt(&self, state: &mut State<NB>) {
        self.add_round_key(state, 0);
        for round in 1..ROUNDS {
            sub_bytes(state, &SBOX);
            shift_rows(state);
            mix_columns(state);
            self.add_round_key(state, round);
        }
        sub_bytes(state, &SBOX);
        shift_rows(state);
        self.add_round_key(state, ROUNDS);
    }

    fn decrypt(&self, state: &mut State<NB>) {
        self.add_round_key(state, ROUNDS);
        for round in (1..ROUNDS).rev() {
            inv_shift_rows(state);
            sub_bytes(state, &INV_SBOX);
            self.add_round_key(state, round);
            inv_mix_columns(state);
        }
        inv_shift_rows(state);
        sub_bytes(state, &INV_SBOX);
        self.add_round_key(state, 0);
    }

    fn add_round_key(&self, state: &mut State<NB>, round: usize) {
        for (column, key) in state.iter_mut().zip(&self.round_keys[round]) {
            for (byte, k) in column.iter_mut().zip(key) {
                *byte ^= k;
            }
        }
    }
}

fn sub_word(word: &mut [u8; 4]) {
    for byte in word.iter_mut() {
        *byte = SBOX[*byte as usize];
    }
}

fn sub_bytes<const NB: usize>(state: &mut State<NB>, table: &[u8; 256]) {
    for column in state.iter_mut() {
        for byte in column.iter_mut() {
            *byte = table[*byte as usize];
        }
    }
}

fn shift_rows<const NB: usize>(state: &mut State<NB>) {
    let offsets = shift_offsets(NB);
    let original = *state;
    for (row, offset) in offsets.iter().enumerate().skip(1) {
        for c in 0..NB {
            state[c][row] = original[(c + offset) % NB][row];
        }
    }
}

fn inv_shift_rows<const NB: usize>(state: &mut State<NB>) {
    let offsets = shift_offsets(NB);
    let original = *state;
    for (row, offset) in offsets.iter().enumerate().skip(1) {
        for c in 0..NB {
            state[(c + offset) % NB][row] = original[c][row];
        }
    }
}

fn mix_columns<const NB: usize>(state: &mut State<NB>) {
    for column in state.iter_mut() {
        let [a0, a1, a2, a3] = *column;
        column[0] = gf_mul(a0, 2) ^ gf_mul(a1, 3) ^ a2 ^ a3;
        column[1] = a0 ^ gf_mul(a1, 2) ^ gf_mul(a2, 3) ^ a3;
        column[2] = a0 ^ a1 ^ gf_mul(a2, 2) ^ gf_mul(a3, 3);
        column[3] = gf_mul(a0, 3) ^ a1 ^ a2 ^ gf_mul(a3, 2);
    }
}

fn inv_mix_columns<const NB: usize>(state: &mut State<NB>) {
    for column in state.iter_mut() {
        let [a0, a1, a2, a3] = *column;
        column[0] = gf_mul(a0, 14) ^ gf_mul(a1, 11) ^ gf_mul(a2, 13) ^ gf_mul(a3, 9);
        column[1] = gf_mul(a0, 9) ^ gf_mul(a1, 14) ^ gf_mul(a2, 11) ^ gf_mul(a3, 13);
        column[2] = gf_mul(a0, 13) ^ gf_mul(a1, 9) ^ gf_mul(a2, 14) ^ gf_mul(a3, 11);
        column[3] = gf_mul(a0, 11) ^ gf_mul(a1, 13) ^ gf_mul(a2, 9) ^ gf_mul(a3, 14);
    }
}

fn load<const NB: usize>(bytes: &[u8]) -> State<NB> {
    let mut state = [[0u8; 4]; NB];
    for (column, chunk) in state.iter_mut().zip(bytes.chunks_exact(4)) {
        column.copy_from_slice(chunk);
    }
    state
}

fn store<const NB: usize>(state: &State<NB>, bytes: &mut [u8]) {
    for (chunk, column) in bytes.chunks_exact_mut(4).zip(state) {
        chunk.copy_from_slice(column);
    }
}

/// A keyed permutation over 256-bit blocks
pub(crate) struct IdealCipher256;

impl IdealCipher256 {
    /// Encrypts `block` in place under `key`
    pub(crate) fn encrypt_block(block: &mut [u8; SYMBYTES], key: &[u8; SYMBYTES]) {
        let cipher = Rijndael::<8>::new(key);
        let mut state = load::<8>(block);
        cipher.encrypt(&mut state);
        store(&state, block);
        state.zeroize();
    }

    /// Decrypts `block` in place under `key`
    pub(crate) fn decrypt_block(block: &mut [u8; SYMBYTES], key: &[u8; SYMBYTES]) {
        let cipher = Rijndael::<8>::new(key);
        let mut state = load::<8>(block);
        cipher.decrypt(&mut state);
        store(&state, block);
        state.zeroize();
    }
}
