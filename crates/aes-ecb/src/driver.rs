//! Maps the AES-128 engine over padded text, one block at a time.
//!
//! Every block is encrypted independently under the same key (electronic
//! codebook). There is no IV and no feedback between blocks: identical
//! plaintext blocks produce identical ciphertext blocks.

use std::num::NonZeroUsize;
use std::thread;

use aes_core::{Aes128, Aes128Key, Block};
use tracing::debug;

use crate::error::Result;
use crate::key::derive_key;
use crate::padding::Padding;
use crate::render::chunk_blocks;

/// Driver settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriverConfig {
    /// Padding policy applied before encryption and undone after decryption.
    pub padding: Padding,
    /// Spread blocks across scoped worker threads.
    pub parallel: bool,
}

#[derive(Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    fn apply(self, engine: &Aes128<'_>, block: &Block) -> Block {
        match self {
            Direction::Encrypt => engine.encrypt_block(block),
            Direction::Decrypt => engine.decrypt_block(block),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Direction::Encrypt => "encrypted block",
            Direction::Decrypt => "decrypted block",
        }
    }
}

/// Text cipher bound to one passphrase.
#[derive(Clone, Debug)]
pub struct EcbCipher {
    key: Aes128Key,
    engine: Aes128<'static>,
    config: DriverConfig,
}

impl EcbCipher {
    /// Creates a cipher with the default configuration.
    pub fn new(passphrase: &str) -> Self {
        Self::with_config(passphrase, DriverConfig::default())
    }

    /// Creates a cipher with explicit configuration.
    pub fn with_config(passphrase: &str, config: DriverConfig) -> Self {
        Self::from_key(derive_key(passphrase), config)
    }

    /// Creates a cipher from an already normalized key.
    pub fn from_key(key: Aes128Key, config: DriverConfig) -> Self {
        Self {
            key,
            engine: Aes128::new(&key),
            config,
        }
    }

    /// Returns the derived 16-byte key.
    pub fn key(&self) -> &Aes128Key {
        &self.key
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// UTF-8 encodes `text`, pads it and encrypts each block.
    pub fn encrypt_text(&self, text: &str) -> Vec<Block> {
        self.encrypt_bytes(text.as_bytes())
    }

    /// Pads `data` and encrypts each block.
    pub fn encrypt_bytes(&self, data: &[u8]) -> Vec<Block> {
        let padded = self.config.padding.pad(data);
        let blocks = chunk_blocks(&padded);
        self.map_blocks(&blocks, Direction::Encrypt)
    }

    /// Decrypts each block, removes padding and returns the raw bytes.
    pub fn decrypt_bytes(&self, blocks: &[Block]) -> Result<Vec<u8>> {
        let plain = self.map_blocks(blocks, Direction::Decrypt);
        self.config.padding.unpad(plain.concat())
    }

    /// Decrypts each block, removes padding and decodes the result as UTF-8.
    pub fn decrypt_text(&self, blocks: &[Block]) -> Result<String> {
        let bytes = self.decrypt_bytes(blocks)?;
        Ok(String::from_utf8(bytes)?)
    }

    fn map_blocks(&self, blocks: &[Block], direction: Direction) -> Vec<Block> {
        let workers = if self.config.parallel {
            thread::available_parallelism().map_or(1, NonZeroUsize::get)
        } else {
            1
        };
        if workers <= 1 || blocks.len() < 2 {
            return self.map_chunk(blocks, direction);
        }

        let chunk_len = blocks.len().div_ceil(workers);
        thread::scope(|scope| {
            let handles: Vec<_> = blocks
                .chunks(chunk_len)
                .map(|chunk| scope.spawn(move || self.map_chunk(chunk, direction)))
                .collect();
            let mut out = Vec::with_capacity(blocks.len());
            for handle in handles {
                match handle.join() {
                    Ok(part) => out.extend(part),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            out
        })
    }

    fn map_chunk(&self, blocks: &[Block], direction: Direction) -> Vec<Block> {
        blocks
            .iter()
            .map(|block| {
                let out = direction.apply(&self.engine, block);
                debug!(
                    input = %hex::encode_upper(block),
                    key = %hex::encode_upper(self.key.0),
                    output = %hex::encode_upper(out),
                    "{}",
                    direction.label()
                );
                out
            })
            .collect()
    }
}

/// Encrypts `text` under `passphrase` with the default configuration.
pub fn encrypt_text(text: &str, passphrase: &str) -> Vec<Block> {
    EcbCipher::new(passphrase).encrypt_text(text)
}

/// Decrypts `blocks` under `passphrase` with the default configuration.
///
/// With the default zero-strip padding any zero byte in the original
/// plaintext is lost.
pub fn decrypt_text(blocks: &[Block], passphrase: &str) -> Result<String> {
    EcbCipher::new(passphrase).decrypt_text(blocks)
}
