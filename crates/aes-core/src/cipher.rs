//! AES-128 key schedule and block encryption/decryption.

use tracing::trace;

use crate::block::{block_to_state, from_state, to_state, Block, State};
use crate::error::CipherError;
use crate::key::{Aes128Key, RoundKeys, ROUND_KEY_COUNT};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::tables::{Tables, FIPS197};

const ROUNDS: usize = ROUND_KEY_COUNT - 1;

/// Expands a 128-bit key into 11 round keys using the FIPS-197 tables.
pub fn expand_key(key: &Aes128Key) -> RoundKeys {
    expand_key_with(key, &FIPS197)
}

/// Expands a 128-bit key into 11 round keys using the supplied tables.
///
/// Round key 0 is the master key itself; round key 10 is the last column
/// group derived.
pub fn expand_key_with(key: &Aes128Key, tables: &Tables) -> RoundKeys {
    let mut w = [[0u8; 4]; 4 * ROUND_KEY_COUNT];
    for (word, chunk) in w.iter_mut().zip(key.0.chunks_exact(4)) {
        word.copy_from_slice(chunk);
    }

    let mut rcon_idx = 1;
    for i in 4..w.len() {
        let mut temp = w[i - 1];
        if i % 4 == 0 {
            temp.rotate_left(1);
            for byte in temp.iter_mut() {
                *byte = tables.sbox[*byte as usize];
            }
            temp[0] ^= tables.rcon[rcon_idx];
            rcon_idx += 1;
        }
        for (t, prev) in temp.iter_mut().zip(w[i - 4].iter()) {
            *t ^= *prev;
        }
        w[i] = temp;
    }

    let mut round_keys = [[[0u8; 4]; 4]; ROUND_KEY_COUNT];
    for (round_key, words) in round_keys.iter_mut().zip(w.chunks_exact(4)) {
        round_key.copy_from_slice(words);
    }

    RoundKeys(round_keys)
}

/// Runs the ten encryption rounds over `state` in place.
pub fn encrypt_state(state: &mut State, round_keys: &RoundKeys, tables: &Tables) {
    add_round_key(state, round_keys.get(0));

    for round in 1..ROUNDS {
        sub_bytes(state, tables);
        shift_rows(state);
        mix_columns(state);
        add_round_key(state, round_keys.get(round));
    }

    sub_bytes(state, tables);
    shift_rows(state);
    add_round_key(state, round_keys.get(ROUNDS));
}

/// Runs the ten decryption rounds over `state` in place.
pub fn decrypt_state(state: &mut State, round_keys: &RoundKeys, tables: &Tables) {
    add_round_key(state, round_keys.get(ROUNDS));
    inv_shift_rows(state);
    inv_sub_bytes(state, tables);

    for round in (1..ROUNDS).rev() {
        add_round_key(state, round_keys.get(round));
        inv_mix_columns(state);
        inv_shift_rows(state);
        inv_sub_bytes(state, tables);
    }

    add_round_key(state, round_keys.get(0));
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = block_to_state(block);
    encrypt_state(&mut state, round_keys, &FIPS197);
    from_state(&state)
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let mut state = block_to_state(block);
    decrypt_state(&mut state, round_keys, &FIPS197);
    from_state(&state)
}

/// Encrypts one block given as raw slices, expanding `key` for this call.
///
/// Fails fast when either input is not exactly 16 bytes.
pub fn encrypt(block: &[u8], key: &[u8]) -> Result<Block, CipherError> {
    let mut state = to_state(block)?;
    let round_keys = expand_key(&Aes128Key::try_from(key)?);
    encrypt_state(&mut state, &round_keys, &FIPS197);
    Ok(from_state(&state))
}

/// Decrypts one block given as raw slices, expanding `key` for this call.
pub fn decrypt(block: &[u8], key: &[u8]) -> Result<Block, CipherError> {
    let mut state = to_state(block)?;
    let round_keys = expand_key(&Aes128Key::try_from(key)?);
    decrypt_state(&mut state, &round_keys, &FIPS197);
    Ok(from_state(&state))
}

/// AES-128 engine bound to one key.
///
/// Holds the expanded round keys so callers mapping many blocks under the
/// same key expand it once. Immutable after construction and `Sync`, so one
/// engine can be shared across worker threads.
#[derive(Clone, Debug)]
pub struct Aes128<'t> {
    round_keys: RoundKeys,
    tables: &'t Tables,
}

impl Aes128<'static> {
    /// Creates an engine over the FIPS-197 tables.
    pub fn new(key: &Aes128Key) -> Self {
        Self::with_tables(key, Tables::fips197())
    }
}

impl<'t> Aes128<'t> {
    /// Creates an engine over caller-supplied tables.
    pub fn with_tables(key: &Aes128Key, tables: &'t Tables) -> Self {
        let round_keys = expand_key_with(key, tables);
        trace!(
            last_round_key = ?round_keys.get_bytes(ROUNDS),
            "expanded AES-128 key schedule"
        );
        Self { round_keys, tables }
    }

    /// Returns the expanded round keys.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Returns the tables this engine substitutes through.
    pub fn tables(&self) -> &'t Tables {
        self.tables
    }

    /// Encrypts one block.
    pub fn encrypt_block(&self, block: &Block) -> Block {
        let mut state = block_to_state(block);
        encrypt_state(&mut state, &self.round_keys, self.tables);
        from_state(&state)
    }

    /// Decrypts one block.
    pub fn decrypt_block(&self, block: &Block) -> Block {
        let mut state = block_to_state(block);
        decrypt_state(&mut state, &self.round_keys, self.tables);
        from_state(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Aes128Key;
    use proptest::prelude::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    // FIPS-197 appendix C.1
    const C1_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const C1_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const C1_CIPHER: [u8; 16] = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];

    // FIPS-197 appendix A.1 / B
    const APPENDIX_KEY: [u8; 16] = [
        0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f,
        0x3c,
    ];
    const APPENDIX_PLAIN: [u8; 16] = [
        0x32, 0x43, 0xf6, 0xa8, 0x88, 0x5a, 0x30, 0x8d, 0x31, 0x31, 0x98, 0xa2, 0xe0, 0x37, 0x07,
        0x34,
    ];
    const APPENDIX_CIPHER: [u8; 16] = [
        0x39, 0x25, 0x84, 0x1d, 0x02, 0xdc, 0x09, 0xfb, 0xdc, 0x11, 0x85, 0x97, 0x19, 0x6a, 0x0b,
        0x32,
    ];

    /// (key, plaintext, ciphertext)
    const KNOWN_ANSWERS: [([u8; 16], [u8; 16], [u8; 16]); 2] = [
        (C1_KEY, C1_PLAIN, C1_CIPHER),
        (APPENDIX_KEY, APPENDIX_PLAIN, APPENDIX_CIPHER),
    ];

    fn identity_tables() -> Tables {
        let identity: [u8; 256] = core::array::from_fn(|i| i as u8);
        Tables {
            sbox: identity,
            inv_sbox: identity,
            rcon: FIPS197.rcon,
        }
    }

    #[test]
    fn known_answer_vectors() {
        for (key, plain, cipher) in KNOWN_ANSWERS {
            let rks = expand_key(&Aes128Key::from(key));
            assert_eq!(encrypt_block(&plain, &rks), cipher);
            assert_eq!(decrypt_block(&cipher, &rks), plain);
            assert_eq!(encrypt(&plain, &key), Ok(cipher));
            assert_eq!(decrypt(&cipher, &key), Ok(plain));

            let engine = Aes128::new(&Aes128Key::from(key));
            assert_eq!(engine.encrypt_block(&plain), cipher);
            assert_eq!(engine.decrypt_block(&cipher), plain);
        }
    }

    #[test]
    fn supplied_tables_drive_schedule_and_rounds() {
        let tables = identity_tables();
        let key = Aes128Key::from(APPENDIX_KEY);

        let custom_rks = expand_key_with(&key, &tables);
        let standard_rks = expand_key(&key);
        assert_eq!(custom_rks.get_bytes(0), APPENDIX_KEY);
        assert_ne!(custom_rks.get(1), standard_rks.get(1));
        assert_ne!(custom_rks.get(10), standard_rks.get(10));

        let engine = Aes128::with_tables(&key, &tables);
        assert_eq!(engine.round_keys(), &custom_rks);
        assert_eq!(engine.tables(), &tables);
        let ct = engine.encrypt_block(&APPENDIX_PLAIN);
        assert_ne!(ct, APPENDIX_CIPHER);
        assert_eq!(engine.decrypt_block(&ct), APPENDIX_PLAIN);
    }

    #[test]
    fn supplied_sbox_is_used_by_the_rounds() {
        // same round keys, different substitution: only the rounds can differ
        let tables = identity_tables();
        let rks = expand_key(&Aes128Key::from(C1_KEY));
        let mut standard = block_to_state(&C1_PLAIN);
        let mut custom = standard;
        encrypt_state(&mut standard, &rks, &FIPS197);
        encrypt_state(&mut custom, &rks, &tables);
        assert_eq!(from_state(&standard), C1_CIPHER);
        assert_ne!(from_state(&custom), C1_CIPHER);
        decrypt_state(&mut custom, &rks, &tables);
        assert_eq!(from_state(&custom), C1_PLAIN);
    }

    #[test]
    fn key_expansion_matches_appendix_a1() {
        let rks = expand_key(&Aes128Key::from(APPENDIX_KEY));
        assert_eq!(rks.get_bytes(0), APPENDIX_KEY);
        assert_eq!(
            rks.get_bytes(1),
            [
                0xa0, 0xfa, 0xfe, 0x17, 0x88, 0x54, 0x2c, 0xb1, 0x23, 0xa3, 0x39, 0x39, 0x2a,
                0x6c, 0x76, 0x05
            ]
        );
        assert_eq!(
            rks.get_bytes(10),
            [
                0xd0, 0x14, 0xf9, 0xa8, 0xc9, 0xee, 0x25, 0x89, 0xe1, 0x3f, 0x0c, 0xc8, 0xb6,
                0x63, 0x0c, 0xa6
            ]
        );
    }

    #[test]
    fn last_round_key_matches_appendix_c1() {
        let rks = expand_key(&Aes128Key::from(C1_KEY));
        assert_eq!(
            rks.get_bytes(10),
            [
                0x13, 0x11, 0x1d, 0x7f, 0xe3, 0x94, 0x4a, 0x17, 0xf3, 0x07, 0xa7, 0x8b, 0x4d,
                0x2b, 0x30, 0xc5
            ]
        );
    }

    #[test]
    fn key_schedule_is_deterministic() {
        let key = Aes128Key::from([0x42; 16]);
        assert_eq!(expand_key(&key), expand_key(&key));
        assert_eq!(expand_key(&key), *Aes128::new(&key).round_keys());
    }

    #[test]
    fn slice_api_rejects_malformed_inputs() {
        assert_eq!(
            encrypt(&[0u8; 15], &C1_KEY),
            Err(CipherError::InvalidBlockLength(15))
        );
        assert_eq!(
            decrypt(&[0u8; 17], &C1_KEY),
            Err(CipherError::InvalidBlockLength(17))
        );
        assert_eq!(
            encrypt(&C1_PLAIN, &C1_KEY[..8]),
            Err(CipherError::InvalidKeyLength(8))
        );
    }

    #[test]
    fn identical_blocks_encrypt_identically() {
        let rks = expand_key(&Aes128Key::from(C1_KEY));
        let block = *b"sixteen byte blk";
        assert_eq!(encrypt_block(&block, &rks), encrypt_block(&block, &rks));
    }

    #[test]
    fn single_bit_flip_avalanches() {
        let mut rng = rand::thread_rng();
        let mut total = 0u32;
        let trials = 200;
        for _ in 0..trials {
            let mut key_bytes = [0u8; 16];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let rks = expand_key(&Aes128Key::from(key_bytes));
            let bit = (rng.next_u32() % 128) as usize;
            let mut flipped = block;
            flipped[bit / 8] ^= 1 << (bit % 8);
            let a = encrypt_block(&block, &rks);
            let b = encrypt_block(&flipped, &rks);
            total += a.iter().zip(b.iter()).map(|(x, y)| (x ^ y).count_ones()).sum::<u32>();
        }
        // expected mean is 64 of 128 bits; a broken diffusion layer sits far below
        let mean = total as f64 / trials as f64;
        assert!(mean > 56.0 && mean < 72.0, "mean changed bits {mean}");
    }

    #[test]
    fn engine_round_trips_seeded_samples() {
        let mut rng = ChaCha20Rng::seed_from_u64(0x5eed);
        for _ in 0..100 {
            let mut key_bytes = [0u8; 16];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let engine = Aes128::new(&Aes128Key::from(key_bytes));
            let ct = engine.encrypt_block(&block);
            assert_ne!(ct, block);
            assert_eq!(engine.decrypt_block(&ct), block);
        }
    }

    proptest! {
        #[test]
        fn decrypt_inverts_encrypt(block in any::<[u8; 16]>(), key in any::<[u8; 16]>()) {
            let ct = encrypt(&block, &key).unwrap();
            prop_assert_eq!(decrypt(&ct, &key).unwrap(), block);
        }
    }
}
