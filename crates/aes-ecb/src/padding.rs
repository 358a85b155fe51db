//! Block padding policies.

use crate::error::{DriverError, Result};

const BLOCK: usize = 16;

/// How plaintext is brought to a whole number of blocks and recovered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Padding {
    /// Append zero bytes up to the next block boundary; on decryption drop
    /// every zero byte in the stream.
    ///
    /// Lossy: zero bytes that were part of the plaintext are removed too.
    /// Kept as the default for output compatibility with the legacy tool.
    #[default]
    ZeroStrip,
    /// PKCS#7: always append 1..=16 bytes each holding the pad length, and
    /// remove exactly those on decryption. Embedded zero bytes survive.
    Pkcs7,
}

impl Padding {
    /// Pads `data` to a multiple of 16 bytes.
    ///
    /// With [`Padding::ZeroStrip`] aligned input (including empty input) is
    /// returned unchanged.
    pub fn pad(self, data: &[u8]) -> Vec<u8> {
        let mut out = data.to_vec();
        match self {
            Padding::ZeroStrip => {
                let rem = out.len() % BLOCK;
                if rem != 0 {
                    out.resize(out.len() + BLOCK - rem, 0);
                }
            }
            Padding::Pkcs7 => {
                let n = BLOCK - out.len() % BLOCK;
                out.resize(out.len() + n, n as u8);
            }
        }
        out
    }

    /// Removes padding from decrypted bytes.
    pub fn unpad(self, mut data: Vec<u8>) -> Result<Vec<u8>> {
        match self {
            Padding::ZeroStrip => {
                data.retain(|&b| b != 0);
                Ok(data)
            }
            Padding::Pkcs7 => {
                let n = *data.last().ok_or(DriverError::InvalidPadding)? as usize;
                if n == 0 || n > BLOCK || n > data.len() {
                    return Err(DriverError::InvalidPadding);
                }
                let body = data.len() - n;
                if data[body..].iter().any(|&b| b as usize != n) {
                    return Err(DriverError::InvalidPadding);
                }
                data.truncate(body);
                Ok(data)
            }
        }
    }
}
