//! AES round transformations.
//!
//! Every transformation mutates a column-major [`State`] in place.

use crate::block::{xor_in_place, State};
use crate::tables::Tables;

/// Multiplies `byte` by 2 in GF(2^8) modulo x^8 + x^4 + x^3 + x + 1.
#[inline]
pub fn xtime(byte: u8) -> u8 {
    let shifted = byte << 1;
    if byte & 0x80 != 0 {
        shifted ^ 0x1b
    } else {
        shifted
    }
}

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut State, tables: &Tables) {
    for byte in state.iter_mut().flatten() {
        *byte = tables.sbox[*byte as usize];
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut State, tables: &Tables) {
    for byte in state.iter_mut().flatten() {
        *byte = tables.inv_sbox[*byte as usize];
    }
}

/// Performs ShiftRows in place: row `r` rotates left by `r` across the columns.
#[inline]
pub fn shift_rows(state: &mut State) {
    let old = *state;
    for (col, column) in state.iter_mut().enumerate() {
        for (row, byte) in column.iter_mut().enumerate().skip(1) {
            *byte = old[(col + row) % 4][row];
        }
    }
}

/// Performs the inverse of ShiftRows in place.
#[inline]
pub fn inv_shift_rows(state: &mut State) {
    let old = *state;
    for (col, column) in state.iter_mut().enumerate() {
        for (row, byte) in column.iter_mut().enumerate().skip(1) {
            *byte = old[(col + 4 - row) % 4][row];
        }
    }
}

fn mix_single_column(col: &mut [u8; 4]) {
    let t = col[0] ^ col[1] ^ col[2] ^ col[3];
    let first = col[0];
    col[0] ^= t ^ xtime(col[0] ^ col[1]);
    col[1] ^= t ^ xtime(col[1] ^ col[2]);
    col[2] ^= t ^ xtime(col[2] ^ col[3]);
    col[3] ^= t ^ xtime(col[3] ^ first);
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut State) {
    for column in state.iter_mut() {
        mix_single_column(column);
    }
}

/// Inverse MixColumns over all four columns.
///
/// The inverse matrix factors into a whitening step followed by the forward
/// matrix, so only `xtime` is needed.
#[inline]
pub fn inv_mix_columns(state: &mut State) {
    for column in state.iter_mut() {
        let u = xtime(xtime(column[0] ^ column[2]));
        let v = xtime(xtime(column[1] ^ column[3]));
        column[0] ^= u;
        column[1] ^= v;
        column[2] ^= u;
        column[3] ^= v;
    }
    mix_columns(state);
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut State, round_key: &State) {
    xor_in_place(state, round_key);
}
