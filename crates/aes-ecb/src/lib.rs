//! Text front end for the AES-128 engine.
//!
//! A passphrase is normalized to a 16-byte key, the message is UTF-8 encoded,
//! padded to whole blocks and every block is encrypted on its own under that
//! key. This is electronic codebook mode: it has no IV, no authentication and
//! leaks repeated blocks. Use it for interoperability with the legacy text
//! tool, not for protecting data.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod driver;
mod error;
mod key;
mod padding;
mod render;

pub use crate::driver::{decrypt_text, encrypt_text, DriverConfig, EcbCipher};
pub use crate::error::{DriverError, Result};
pub use crate::key::derive_key;
pub use crate::padding::Padding;
pub use crate::render::{blocks_from_bytes, format_blocks, parse_blocks};

pub use aes_core::Block;
