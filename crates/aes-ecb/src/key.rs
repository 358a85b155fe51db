//! Passphrase to fixed-length key derivation.

use aes_core::Aes128Key;

/// Normalizes an arbitrary passphrase into a 16-byte AES-128 key.
///
/// The UTF-8 bytes are right-padded with zeros when shorter than 16 and
/// truncated to the first 16 when longer. This is not a KDF: distinct
/// passphrases sharing a 16-byte prefix yield the same key.
pub fn derive_key(passphrase: &str) -> Aes128Key {
    let mut key = [0u8; 16];
    let bytes = passphrase.as_bytes();
    let len = bytes.len().min(key.len());
    key[..len].copy_from_slice(&bytes[..len]);
    Aes128Key::from(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_lengths_normalize_to_sixteen_bytes() {
        for len in [0usize, 15, 16, 17, 100] {
            let passphrase = "k".repeat(len);
            let key = derive_key(&passphrase);
            let kept = len.min(16);
            assert!(key.0[..kept].iter().all(|&b| b == b'k'), "len {len}");
            assert!(key.0[kept..].iter().all(|&b| b == 0), "len {len}");
        }
    }

    #[test]
    fn truncation_keeps_prefix() {
        assert_eq!(
            derive_key("0123456789abcdefXYZ"),
            Aes128Key::from(*b"0123456789abcdef")
        );
        assert_eq!(derive_key("0123456789abcdef"), derive_key("0123456789abcdefXYZ"));
    }

    #[test]
    fn multibyte_passphrase_counts_bytes_not_chars() {
        // eight two-byte characters fill the key exactly
        let key = derive_key("ключключ");
        assert_eq!(&key.0[..], "ключключ".as_bytes());
        // a truncation may split a character; the key is bytes, not text
        let key = derive_key("ааааааааа");
        assert_eq!(&key.0[..], &"ааааааааа".as_bytes()[..16]);
    }
}
