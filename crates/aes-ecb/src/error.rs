//! Errors surfaced by the text driver.

use std::string::FromUtf8Error;

use thiserror::Error;

/// Failures when turning ciphertext back into text.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The recovered bytes are not valid UTF-8.
    #[error("recovered plaintext is not valid UTF-8")]
    Decode(#[from] FromUtf8Error),
    /// PKCS#7 padding was missing or malformed after decryption.
    #[error("invalid PKCS#7 padding")]
    InvalidPadding,
    /// Ciphertext did not split into whole 16-byte blocks.
    #[error("ciphertext length {0} is not a multiple of 16 bytes")]
    RaggedCiphertext(usize),
    /// Ciphertext text was not valid hexadecimal.
    #[error("invalid hex in ciphertext")]
    Hex(#[from] hex::FromHexError),
}

/// Result alias for driver operations.
pub type Result<T> = std::result::Result<T, DriverError>;
