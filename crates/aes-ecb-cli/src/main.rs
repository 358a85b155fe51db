//! Command-line interface for the AES-128 text cipher.

#![forbid(unsafe_code)]

use aes_core::{decrypt, encrypt, expand_key, Aes128, Aes128Key};
use aes_ecb::{format_blocks, parse_blocks, DriverConfig, EcbCipher, Padding};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// FIPS-197 appendix C.1
const KAT_KEY: &str = "000102030405060708090a0b0c0d0e0f";
const KAT_PLAIN: &str = "00112233445566778899aabbccddeeff";
const KAT_CIPHER: &str = "69c4e0d86a7b0430d8cdb78070b4c55a";

/// AES-128 text cipher CLI (ECB, no IV; not for protecting real data).
#[derive(Parser)]
#[command(name = "aes-ecb", version, author, about)]
struct Cli {
    #[command(flatten)]
    driver: DriverArgs,
    /// Log every block at debug level.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DriverArgs {
    /// Use PKCS#7 padding instead of zero padding (keeps embedded NUL bytes).
    #[arg(long, global = true, default_value_t = false)]
    pkcs7: bool,
    /// Encrypt or decrypt blocks on worker threads.
    #[arg(long, global = true, default_value_t = false)]
    parallel: bool,
}

impl DriverArgs {
    fn config(&self) -> DriverConfig {
        DriverConfig {
            padding: if self.pkcs7 {
                Padding::Pkcs7
            } else {
                Padding::ZeroStrip
            },
            parallel: self.parallel,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a message and print the ciphertext as uppercase hex pairs.
    Encrypt {
        /// Passphrase; padded or truncated to 16 bytes.
        #[arg(short, long, value_name = "PASSPHRASE")]
        key: String,
        /// Message to encrypt.
        message: String,
    },
    /// Decrypt hex ciphertext and print the recovered text.
    Decrypt {
        /// Passphrase used for encryption.
        #[arg(short, long, value_name = "PASSPHRASE")]
        key: String,
        /// Ciphertext as hex; whitespace is ignored.
        #[arg(value_name = "HEX")]
        ciphertext: String,
    },
    /// Encrypt a message, print the ciphertext, then decrypt it back.
    Roundtrip {
        /// Passphrase; padded or truncated to 16 bytes.
        #[arg(short, long, value_name = "PASSPHRASE")]
        key: String,
        /// Message to encrypt.
        message: String,
    },
    /// Run the FIPS-197 known-answer test and random block round trips.
    Check {
        /// Number of random blocks to round-trip.
        #[arg(long, default_value_t = 64)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = cli.driver.config();
    match cli.command {
        Commands::Encrypt { key, message } => cmd_encrypt(&key, &message, config),
        Commands::Decrypt { key, ciphertext } => cmd_decrypt(&key, &ciphertext, config),
        Commands::Roundtrip { key, message } => cmd_roundtrip(&key, &message, config),
        Commands::Check { samples, seed } => cmd_check(samples, seed),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_encrypt(key: &str, message: &str, config: DriverConfig) -> Result<()> {
    let cipher = EcbCipher::with_config(key, config);
    let blocks = cipher.encrypt_text(message);
    info!(blocks = blocks.len(), "encrypted message");
    println!("{}", format_blocks(&blocks));
    Ok(())
}

fn cmd_decrypt(key: &str, ciphertext: &str, config: DriverConfig) -> Result<()> {
    let blocks = parse_blocks(ciphertext).context("parse ciphertext")?;
    let cipher = EcbCipher::with_config(key, config);
    let text = cipher.decrypt_text(&blocks).context("decrypt ciphertext")?;
    println!("{text}");
    Ok(())
}

fn cmd_roundtrip(key: &str, message: &str, config: DriverConfig) -> Result<()> {
    let cipher = EcbCipher::with_config(key, config);
    let blocks = cipher.encrypt_text(message);
    println!("ciphertext: {}", format_blocks(&blocks));
    let text = cipher.decrypt_text(&blocks).context("decrypt ciphertext")?;
    println!("decrypted: {text}");
    if text != message {
        bail!("roundtrip changed the message (zero padding strips NUL bytes; try --pkcs7)");
    }
    Ok(())
}

fn cmd_check(samples: usize, seed: Option<u64>) -> Result<()> {
    verify_known_answer(KAT_KEY, KAT_PLAIN, KAT_CIPHER)?;
    println!("known-answer test: ok");

    let mut rng = seeded_rng(seed);
    for i in 0..samples {
        let mut key_bytes = [0u8; 16];
        let mut block = [0u8; 16];
        rng.fill_bytes(&mut key_bytes);
        rng.fill_bytes(&mut block);
        let key = Aes128Key::from(key_bytes);
        let engine = Aes128::new(&key);
        if *engine.round_keys() != expand_key(&key) {
            bail!("sample {i}: key schedule is not deterministic");
        }
        let ct = engine.encrypt_block(&block);
        debug!(sample = i, key = %hex::encode(key_bytes), ciphertext = %hex::encode(ct));
        if engine.decrypt_block(&ct) != block {
            bail!("sample {i}: roundtrip failed for key {}", hex::encode(key_bytes));
        }
    }
    println!("random round trips: {samples} ok");
    Ok(())
}

fn verify_known_answer(key_hex: &str, plain_hex: &str, cipher_hex: &str) -> Result<()> {
    let key = hex::decode(key_hex).context("decode known-answer key")?;
    let plain = hex::decode(plain_hex).context("decode known-answer plaintext")?;
    let expected = hex::decode(cipher_hex).context("decode known-answer ciphertext")?;
    let ct = encrypt(&plain, &key)?;
    if ct.as_slice() != expected.as_slice() {
        bail!("known-answer encryption mismatch: got {}", hex::encode(ct));
    }
    if decrypt(&ct, &key)?.as_slice() != plain.as_slice() {
        bail!("known-answer decryption mismatch");
    }
    Ok(())
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => ChaCha20Rng::seed_from_u64(value),
        None => ChaCha20Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_flags_map_to_config_after_subcommand() {
        let cli = Cli::try_parse_from([
            "aes-ecb",
            "encrypt",
            "-k",
            "pw",
            "msg",
            "--pkcs7",
            "--parallel",
        ])
        .unwrap();
        assert_eq!(
            cli.driver.config(),
            DriverConfig {
                padding: Padding::Pkcs7,
                parallel: true,
            }
        );
        assert!(matches!(
            cli.command,
            Commands::Encrypt { ref key, ref message } if key == "pw" && message == "msg"
        ));
    }

    #[test]
    fn defaults_to_zero_strip_sequential() {
        let cli = Cli::try_parse_from(["aes-ecb", "decrypt", "--key", "pw", "00"]).unwrap();
        assert_eq!(cli.driver.config(), DriverConfig::default());
        assert!(!cli.verbose);

        let cli = Cli::try_parse_from(["aes-ecb", "-v", "check", "--samples", "3"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Check {
                samples: 3,
                seed: None
            }
        ));
    }

    #[test]
    fn rejects_missing_key() {
        assert!(Cli::try_parse_from(["aes-ecb", "encrypt", "msg"]).is_err());
    }

    #[test]
    fn roundtrip_fails_when_zero_strip_drops_nul() {
        assert!(cmd_roundtrip("k", "a\0b", DriverConfig::default()).is_err());
        assert!(cmd_roundtrip("k", "plain text", DriverConfig::default()).is_ok());
    }

    #[test]
    fn roundtrip_keeps_nul_under_pkcs7() {
        let config = DriverConfig {
            padding: Padding::Pkcs7,
            parallel: false,
        };
        assert!(cmd_roundtrip("k", "a\0b", config).is_ok());
    }

    #[test]
    fn decrypt_reports_bad_hex() {
        assert!(cmd_decrypt("k", "not hex", DriverConfig::default()).is_err());
        assert!(cmd_decrypt("k", "00 11", DriverConfig::default()).is_err());
    }

    #[test]
    fn check_passes_and_known_answer_mismatch_is_rejected() {
        assert!(cmd_check(4, Some(1)).is_ok());
        assert!(verify_known_answer(KAT_KEY, KAT_PLAIN, KAT_CIPHER).is_ok());
        let err = verify_known_answer(KAT_KEY, KAT_PLAIN, "00112233445566778899aabbccddeeff")
            .unwrap_err();
        assert!(err.to_string().contains("known-answer encryption mismatch"));
        assert!(verify_known_answer("0001", KAT_PLAIN, KAT_CIPHER).is_err());
    }
}
