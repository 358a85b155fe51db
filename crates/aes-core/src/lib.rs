//! AES-128 block cipher built from its FIPS-197 description.
//!
//! This crate provides:
//! - The block <-> 4x4 state codec.
//! - The round transformations and their inverses.
//! - The Rijndael key schedule for 128-bit keys.
//! - Single-block encryption and decryption.
//!
//! The S-box, inverse S-box and round constants are supplied as static data
//! ([`FIPS197`]) and passed into the transformations by reference.
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; it should not be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod key;
mod round;
mod tables;

pub use crate::block::{block_to_state, from_state, to_state, Block, State};
pub use crate::cipher::{
    decrypt, decrypt_block, decrypt_state, encrypt, encrypt_block, encrypt_state, expand_key,
    expand_key_with, Aes128,
};
pub use crate::error::CipherError;
pub use crate::key::{Aes128Key, RoundKeys, ROUND_KEY_COUNT};
pub use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes, xtime,
};
pub use crate::tables::{inv_sbox, sbox, Tables, FIPS197};
