//! Errors surfaced by the block cipher engine.

use thiserror::Error;

/// Failure modes of the engine. Both are malformed-input errors and are never
/// recovered internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CipherError {
    /// A block was not exactly 16 bytes long.
    #[error("AES block must be 16 bytes, got {0}")]
    InvalidBlockLength(usize),
    /// A key was not exactly 16 bytes long.
    #[error("AES-128 key must be 16 bytes, got {0}")]
    InvalidKeyLength(usize),
}
