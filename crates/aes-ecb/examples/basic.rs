//! Encrypts a message, prints the hex ciphertext and decrypts it back.

use aes_ecb::{decrypt_text, encrypt_text, format_blocks};

fn main() -> aes_ecb::Result<()> {
    let message = "Meet me at the usual place at ten";
    let passphrase = "correct horse";

    let blocks = encrypt_text(message, passphrase);
    println!("ciphertext: {}", format_blocks(&blocks));

    let recovered = decrypt_text(&blocks, passphrase)?;
    println!("decrypted: {recovered}");
    assert_eq!(recovered, message);
    Ok(())
}
