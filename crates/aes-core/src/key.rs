//! Key types for AES-128.

use crate::block::{from_state, State};
use crate::error::CipherError;

/// Number of round keys consumed by AES-128 (initial key plus ten rounds).
pub const ROUND_KEY_COUNT: usize = 11;

/// AES-128 key wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aes128Key(pub [u8; 16]);

impl From<[u8; 16]> for Aes128Key {
    fn from(value: [u8; 16]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Aes128Key {
    type Error = CipherError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; 16] = value
            .try_into()
            .map_err(|_| CipherError::InvalidKeyLength(value.len()))?;
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for Aes128Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Expanded round keys for AES-128, indexed by round number 0..=10.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys(pub [State; ROUND_KEY_COUNT]);

impl RoundKeys {
    /// Returns the round key at the requested index (0..=10).
    #[inline]
    pub fn get(&self, round: usize) -> &State {
        &self.0[round]
    }

    /// Returns the round key at `round` flattened back into 16 bytes.
    pub fn get_bytes(&self, round: usize) -> [u8; 16] {
        from_state(self.get(round))
    }
}
