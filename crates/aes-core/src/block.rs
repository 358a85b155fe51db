//! Block representation and the block <-> state codec.

use crate::error::CipherError;

/// AES block of 16 bytes.
pub type Block = [u8; 16];

/// Working 4x4 matrix, column-major: `state[col][row]`.
pub type State = [[u8; 4]; 4];

/// Splits 16 bytes into four 4-byte columns, in order.
pub fn to_state(bytes: &[u8]) -> Result<State, CipherError> {
    if bytes.len() != 16 {
        return Err(CipherError::InvalidBlockLength(bytes.len()));
    }
    let mut state = [[0u8; 4]; 4];
    for (col, chunk) in state.iter_mut().zip(bytes.chunks_exact(4)) {
        col.copy_from_slice(chunk);
    }
    Ok(state)
}

/// Same as [`to_state`] for an already fixed-size block.
#[inline]
pub fn block_to_state(block: &Block) -> State {
    let mut state = [[0u8; 4]; 4];
    for (col, chunk) in state.iter_mut().zip(block.chunks_exact(4)) {
        col.copy_from_slice(chunk);
    }
    state
}

/// Concatenates the columns back into a block. Inverse of [`to_state`].
#[inline]
pub fn from_state(state: &State) -> Block {
    let mut block = [0u8; 16];
    for (chunk, col) in block.chunks_exact_mut(4).zip(state.iter()) {
        chunk.copy_from_slice(col);
    }
    block
}

/// XORs two states element-wise, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut State, rhs: &State) {
    for (d_col, r_col) in dst.iter_mut().zip(rhs.iter()) {
        for (d, r) in d_col.iter_mut().zip(r_col.iter()) {
            *d ^= *r;
        }
    }
}
