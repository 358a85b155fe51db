//! Hex rendering of ciphertext block sequences.

use aes_core::Block;

use crate::error::{DriverError, Result};

/// Renders blocks as space-separated uppercase hex pairs, e.g. `69 C4 E0 ...`.
pub fn format_blocks(blocks: &[Block]) -> String {
    blocks
        .iter()
        .flat_map(|block| block.chunks(1))
        .map(hex::encode_upper)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses hex produced by [`format_blocks`]. Whitespace and case are ignored.
pub fn parse_blocks(text: &str) -> Result<Vec<Block>> {
    let compact: String = text.split_whitespace().collect();
    let bytes = hex::decode(compact)?;
    blocks_from_bytes(&bytes)
}

/// Splits raw ciphertext into 16-byte blocks, preserving order.
pub fn blocks_from_bytes(bytes: &[u8]) -> Result<Vec<Block>> {
    if bytes.len() % 16 != 0 {
        return Err(DriverError::RaggedCiphertext(bytes.len()));
    }
    Ok(chunk_blocks(bytes))
}

/// Splits whole 16-byte blocks off `bytes`; a trailing partial block is dropped.
pub(crate) fn chunk_blocks(bytes: &[u8]) -> Vec<Block> {
    bytes
        .chunks_exact(16)
        .map(|chunk| {
            let mut block = [0u8; 16];
            block.copy_from_slice(chunk);
            block
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_uppercase_pairs_across_blocks() {
        let mut first = [0u8; 16];
        first[0] = 0xab;
        first[15] = 0x0f;
        let second = [0xffu8; 16];
        let text = format_blocks(&[first, second]);
        assert!(text.starts_with("AB 00 "));
        assert!(text.contains("0F FF"));
        assert_eq!(text.split(' ').count(), 32);
        assert_eq!(format_blocks(&[]), "");
        assert_eq!(
            format_blocks(&[first]).replace(' ', ""),
            hex::encode_upper(first)
        );
    }

    #[test]
    fn parse_accepts_formatted_and_loose_input() {
        let blocks = vec![[0x5au8; 16], [0xa5u8; 16]];
        assert_eq!(parse_blocks(&format_blocks(&blocks)).unwrap(), blocks);
        let loose = format_blocks(&blocks).to_lowercase().replace(' ', "\n  ");
        assert_eq!(parse_blocks(&loose).unwrap(), blocks);
        assert!(parse_blocks("").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_bad_hex_and_partial_blocks() {
        assert!(matches!(parse_blocks("zz"), Err(DriverError::Hex(_))));
        assert!(matches!(parse_blocks("A"), Err(DriverError::Hex(_))));
        assert!(matches!(
            parse_blocks("00 11 22"),
            Err(DriverError::RaggedCiphertext(3))
        ));
    }
}
