//! AES-256 block engine.
//!
//! Self-contained implementation of the Rijndael cipher with a fixed
//! 128-bit block and 256-bit key, as used by the credential envelope
//! format. Only the single-block transforms live here; chaining,
//! padding and framing are the envelope module's job.
//!
//! The 16-byte state is kept in input byte order, so logical row `r`
//! of the 4x4 column-major matrix occupies indices `r`, `r + 4`,
//! `r + 8`, `r + 12`.
//!
//! This implementation favors clarity over speed and makes no
//! constant-time guarantees.

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES-256 key size in bytes.
pub const KEY_SIZE: usize = 32;

/// Number of rounds for a 256-bit key.
const ROUNDS: usize = 14;

/// Expanded key size: one 16-byte round key per round, plus round 0.
const EXPANDED_KEY_SIZE: usize = BLOCK_SIZE * (ROUNDS + 1);

/// Forward S-box.
const SBOX: [u8; 256] = [
    0x63, 0x7c, 0x77, 0x7b, 0xf2, 0x6b, 0x6f, 0xc5, 0x30, 0x01, 0x67, 0x2b, 0xfe, 0xd7, 0xab, 0x76,
    0xca, 0x82, 0xc9, 0x7d, 0xfa, 0x59, 0x47, 0xf0, 0xad, 0xd4, 0xa2, 0xaf, 0x9c, 0xa4, 0x72, 0xc0,
    0xb7, 0xfd, 0x93, 0x26, 0x36, 0x3f, 0xf7, 0xcc, 0x34, 0xa5, 0xe5, 0xf1, 0x71, 0xd8, 0x31, 0x15,
    0x04, 0xc7, 0x23, 0xc3, 0x18, 0x96, 0x05, 0x9a, 0x07, 0x12, 0x80, 0xe2, 0xeb, 0x27, 0xb2, 0x75,
    0x09, 0x83, 0x2c, 0x1a, 0x1b, 0x6e, 0x5a, 0xa0, 0x52, 0x3b, 0xd6, 0xb3, 0x29, 0xe3, 0x2f, 0x84,
    0x53, 0xd1, 0x00, 0xed, 0x20, 0xfc, 0xb1, 0x5b, 0x6a, 0xcb, 0xbe, 0x39, 0x4a, 0x4c, 0x58, 0xcf,
    0xd0, 0xef, 0xaa, 0xfb, 0x43, 0x4d, 0x33, 0x85, 0x45, 0xf9, 0x02, 0x7f, 0x50, 0x3c, 0x9f, 0xa8,
    0x51, 0xa3, 0x40, 0x8f, 0x92, 0x9d, 0x38, 0xf5, 0xbc, 0xb6, 0xda, 0x21, 0x10, 0xff, 0xf3, 0xd2,
    0xcd, 0x0c, 0x13, 0xec, 0x5f, 0x97, 0x44, 0x17, 0xc4, 0xa7, 0x7e, 0x3d, 0x64, 0x5d, 0x19, 0x73,
    0x60, 0x81, 0x4f, 0xdc, 0x22, 0x2a, 0x90, 0x88, 0x46, 0xee, 0xb8, 0x14, 0xde, 0x5e, 0x0b, 0xdb,
    0xe0, 0x32, 0x3a, 0x0a, 0x49, 0x06, 0x24, 0x5c, 0xc2, 0xd3, 0xac, 0x62, 0x91, 0x95, 0xe4, 0x79,
    0xe7, 0xc8, 0x37, 0x6d, 0x8d, 0xd5, 0x4e, 0xa9, 0x6c, 0x56, 0xf4, 0xea, 0x65, 0x7a, 0xae, 0x08,
    0xba, 0x78, 0x25, 0x2e, 0x1c, 0xa6, 0xb4, 0xc6, 0xe8, 0xdd, 0x74, 0x1f, 0x4b, 0xbd, 0x8b, 0x8a,
    0x70, 0x3e, 0xb5, 0x66, 0x48, 0x03, 0xf6, 0x0e, 0x61, 0x35, 0x57, 0xb9, 0x86, 0xc1, 0x1d, 0x9e,
    0xe1, 0xf8, 0x98, 0x11, 0x69, 0xd9, 0x8e, 0x94, 0x9b, 0x1e, 0x87, 0xe9, 0xce, 0x55, 0x28, 0xdf,
    0x8c, 0xa1, 0x89, 0x0d, 0xbf, 0xe6, 0x42, 0x68, 0x41, 0x99, 0x2d, 0x0f, 0xb0, 0x54, 0xbb, 0x16,
];

/// Inverse S-box.
const SBOX_INV: [u8; 256] = [
    0x52, 0x09, 0x6a, 0xd5, 0x30, 0x36, 0xa5, 0x38, 0xbf, 0x40, 0xa3, 0x9e, 0x81, 0xf3, 0xd7, 0xfb,
    0x7c, 0xe3, 0x39, 0x82, 0x9b, 0x2f, 0xff, 0x87, 0x34, 0x8e, 0x43, 0x44, 0xc4, 0xde, 0xe9, 0xcb,
    0x54, 0x7b, 0x94, 0x32, 0xa6, 0xc2, 0x23, 0x3d, 0xee, 0x4c, 0x95, 0x0b, 0x42, 0xfa, 0xc3, 0x4e,
    0x08, 0x2e, 0xa1, 0x66, 0x28, 0xd9, 0x24, 0xb2, 0x76, 0x5b, 0xa2, 0x49, 0x6d, 0x8b, 0xd1, 0x25,
    0x72, 0xf8, 0xf6, 0x64, 0x86, 0x68, 0x98, 0x16, 0xd4, 0xa4, 0x5c, 0xcc, 0x5d, 0x65, 0xb6, 0x92,
    0x6c, 0x70, 0x48, 0x50, 0xfd, 0xed, 0xb9, 0xda, 0x5e, 0x15, 0x46, 0x57, 0xa7, 0x8d, 0x9d, 0x84,
    0x90, 0xd8, 0xab, 0x00, 0x8c, 0xbc, 0xd3, 0x0a, 0xf7, 0xe4, 0x58, 0x05, 0xb8, 0xb3, 0x45, 0x06,
    0xd0, 0x2c, 0x1e, 0x8f, 0xca, 0x3f, 0x0f, 0x02, 0xc1, 0xaf, 0xbd, 0x03, 0x01, 0x13, 0x8a, 0x6b,
    0x3a, 0x91, 0x11, 0x41, 0x4f, 0x67, 0xdc, 0xea, 0x97, 0xf2, 0xcf, 0xce, 0xf0, 0xb4, 0xe6, 0x73,
    0x96, 0xac, 0x74, 0x22, 0xe7, 0xad, 0x35, 0x85, 0xe2, 0xf9, 0x37, 0xe8, 0x1c, 0x75, 0xdf, 0x6e,
    0x47, 0xf1, 0x1a, 0x71, 0x1d, 0x29, 0xc5, 0x89, 0x6f, 0xb7, 0x62, 0x0e, 0xaa, 0x18, 0xbe, 0x1b,
    0xfc, 0x56, 0x3e, 0x4b, 0xc6, 0xd2, 0x79, 0x20, 0x9a, 0xdb, 0xc0, 0xfe, 0x78, 0xcd, 0x5a, 0xf4,
    0x1f, 0xdd, 0xa8, 0x33, 0x88, 0x07, 0xc7, 0x31, 0xb1, 0x12, 0x10, 0x59, 0x27, 0x80, 0xec, 0x5f,
    0x60, 0x51, 0x7f, 0xa9, 0x19, 0xb5, 0x4a, 0x0d, 0x2d, 0xe5, 0x7a, 0x9f, 0x93, 0xc9, 0x9c, 0xef,
    0xa0, 0xe0, 0x3b, 0x4d, 0xae, 0x2a, 0xf5, 0xb0, 0xc8, 0xeb, 0xbb, 0x3c, 0x83, 0x53, 0x99, 0x61,
    0x17, 0x2b, 0x04, 0x7e, 0xba, 0x77, 0xd6, 0x26, 0xe1, 0x69, 0x14, 0x63, 0x55, 0x21, 0x0c, 0x7d,
];

/// Round constants for the key schedule, indexed by round counter.
/// Index 0 is a placeholder; AES-256 only reaches index 7.
const RCON: [u8; 256] = [
    0x8d, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36, 0x6c, 0xd8, 0xab, 0x4d, 0x9a,
    0x2f, 0x5e, 0xbc, 0x63, 0xc6, 0x97, 0x35, 0x6a, 0xd4, 0xb3, 0x7d, 0xfa, 0xef, 0xc5, 0x91, 0x39,
    0x72, 0xe4, 0xd3, 0xbd, 0x61, 0xc2, 0x9f, 0x25, 0x4a, 0x94, 0x33, 0x66, 0xcc, 0x83, 0x1d, 0x3a,
    0x74, 0xe8, 0xcb, 0x8d, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36, 0x6c, 0xd8,
    0xab, 0x4d, 0x9a, 0x2f, 0x5e, 0xbc, 0x63, 0xc6, 0x97, 0x35, 0x6a, 0xd4, 0xb3, 0x7d, 0xfa, 0xef,
    0xc5, 0x91, 0x39, 0x72, 0xe4, 0xd3, 0xbd, 0x61, 0xc2, 0x9f, 0x25, 0x4a, 0x94, 0x33, 0x66, 0xcc,
    0x83, 0x1d, 0x3a, 0x74, 0xe8, 0xcb, 0x8d, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b,
    0x36, 0x6c, 0xd8, 0xab, 0x4d, 0x9a, 0x2f, 0x5e, 0xbc, 0x63, 0xc6, 0x97, 0x35, 0x6a, 0xd4, 0xb3,
    0x7d, 0xfa, 0xef, 0xc5, 0x91, 0x39, 0x72, 0xe4, 0xd3, 0xbd, 0x61, 0xc2, 0x9f, 0x25, 0x4a, 0x94,
    0x33, 0x66, 0xcc, 0x83, 0x1d, 0x3a, 0x74, 0xe8, 0xcb, 0x8d, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20,
    0x40, 0x80, 0x1b, 0x36, 0x6c, 0xd8, 0xab, 0x4d, 0x9a, 0x2f, 0x5e, 0xbc, 0x63, 0xc6, 0x97, 0x35,
    0x6a, 0xd4, 0xb3, 0x7d, 0xfa, 0xef, 0xc5, 0x91, 0x39, 0x72, 0xe4, 0xd3, 0xbd, 0x61, 0xc2, 0x9f,
    0x25, 0x4a, 0x94, 0x33, 0x66, 0xcc, 0x83, 0x1d, 0x3a, 0x74, 0xe8, 0xcb, 0x8d, 0x01, 0x02, 0x04,
    0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36, 0x6c, 0xd8, 0xab, 0x4d, 0x9a, 0x2f, 0x5e, 0xbc, 0x63,
    0xc6, 0x97, 0x35, 0x6a, 0xd4, 0xb3, 0x7d, 0xfa, 0xef, 0xc5, 0x91, 0x39, 0x72, 0xe4, 0xd3, 0xbd,
    0x61, 0xc2, 0x9f, 0x25, 0x4a, 0x94, 0x33, 0x66, 0xcc, 0x83, 0x1d, 0x3a, 0x74, 0xe8, 0xcb, 0x8d,
];

/// Multiplication in GF(2^8) with the AES reduction polynomial 0x1b.
///
/// Standard shift-and-reduce loop; total for all byte pairs.
pub fn galois_mult(mut a: u8, mut b: u8) -> u8 {
    let mut p = 0u8;
    for _ in 0..8 {
        if b & 1 == 1 {
            p ^= a;
        }
        let hi_bit_set = a & 0x80;
        a <<= 1;
        if hi_bit_set == 0x80 {
            a ^= 0x1b;
        }
        b >>= 1;
    }
    p
}

/// An AES-256 key schedule: the 240-byte expansion of a 32-byte key,
/// supplying one 16-byte round key per round.
///
/// Expanding once and reusing across blocks is what makes the
/// keystream loop linear in the input length.
pub struct Aes256 {
    expanded: [u8; EXPANDED_KEY_SIZE],
}

impl Aes256 {
    /// Expand a 32-byte cipher key into the full round-key schedule.
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        Self {
            expanded: expand_key(key),
        }
    }

    /// Encrypt one 16-byte block (14 forward rounds).
    pub fn encrypt_block(&self, block: [u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut state = block;
        add_round_key(&mut state, self.round_key(0));
        for round in 1..ROUNDS {
            sub_bytes(&mut state);
            shift_rows(&mut state);
            mix_columns(&mut state);
            add_round_key(&mut state, self.round_key(round));
        }
        // final round leaves out MixColumns
        sub_bytes(&mut state);
        shift_rows(&mut state);
        add_round_key(&mut state, self.round_key(ROUNDS));
        state
    }

    /// Decrypt one 16-byte block (14 inverse rounds).
    pub fn decrypt_block(&self, block: [u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut state = block;
        // the "last" round comes first when running in reverse
        add_round_key(&mut state, self.round_key(ROUNDS));
        shift_rows_inv(&mut state);
        sub_bytes_inv(&mut state);
        for round in (1..ROUNDS).rev() {
            add_round_key(&mut state, self.round_key(round));
            mix_columns_inv(&mut state);
            shift_rows_inv(&mut state);
            sub_bytes_inv(&mut state);
        }
        add_round_key(&mut state, self.round_key(0));
        state
    }

    fn round_key(&self, round: usize) -> &[u8] {
        &self.expanded[round * BLOCK_SIZE..(round + 1) * BLOCK_SIZE]
    }
}

/// Apply the key schedule core to a 4-byte word: rotate one byte left,
/// substitute through the S-box, XOR the round constant into byte 0.
fn key_schedule_core(word: [u8; 4], iteration: usize) -> [u8; 4] {
    let mut out = [word[1], word[2], word[3], word[0]];
    for byte in &mut out {
        *byte = SBOX[*byte as usize];
    }
    out[0] ^= RCON[iteration];
    out
}

/// Expand a 256-bit cipher key into 240 bytes of round-key material.
///
/// Round 0 is the first half of the raw key. Every 32 bytes the core
/// schedule runs on the previous word; 16 bytes past each of those
/// boundaries the word gets an extra S-box pass (the AES-256-specific
/// step). Each new word is the XOR of the transformed word with the
/// word one cipher-key-length back.
fn expand_key(key: &[u8; KEY_SIZE]) -> [u8; EXPANDED_KEY_SIZE] {
    let mut expanded = [0u8; EXPANDED_KEY_SIZE];
    expanded[..KEY_SIZE].copy_from_slice(key);

    let mut current = KEY_SIZE;
    let mut rcon_iter = 1;
    while current < EXPANDED_KEY_SIZE {
        let mut t = [
            expanded[current - 4],
            expanded[current - 3],
            expanded[current - 2],
            expanded[current - 1],
        ];

        if current % KEY_SIZE == 0 {
            t = key_schedule_core(t, rcon_iter);
            rcon_iter += 1;
        }
        if current % KEY_SIZE == 16 {
            for byte in &mut t {
                *byte = SBOX[*byte as usize];
            }
        }

        for &byte in &t {
            expanded[current] = expanded[current - KEY_SIZE] ^ byte;
            current += 1;
        }
    }

    expanded
}

fn sub_bytes(state: &mut [u8; BLOCK_SIZE]) {
    for byte in state.iter_mut() {
        *byte = SBOX[*byte as usize];
    }
}

fn sub_bytes_inv(state: &mut [u8; BLOCK_SIZE]) {
    for byte in state.iter_mut() {
        *byte = SBOX_INV[*byte as usize];
    }
}

fn add_round_key(state: &mut [u8; BLOCK_SIZE], round_key: &[u8]) {
    for (byte, key_byte) in state.iter_mut().zip(round_key) {
        *byte ^= key_byte;
    }
}

/// Rotate row `r` of the state left by `r` positions. Row `r` occupies
/// indices `r + 4c` for column `c`.
fn shift_rows(state: &mut [u8; BLOCK_SIZE]) {
    for r in 1..4 {
        let row = [state[r], state[r + 4], state[r + 8], state[r + 12]];
        for c in 0..4 {
            state[r + 4 * c] = row[(c + r) % 4];
        }
    }
}

/// Rotate row `r` of the state right by `r` positions.
fn shift_rows_inv(state: &mut [u8; BLOCK_SIZE]) {
    for r in 1..4 {
        let row = [state[r], state[r + 4], state[r + 8], state[r + 12]];
        for c in 0..4 {
            state[r + 4 * c] = row[(c + 4 - r) % 4];
        }
    }
}

/// Replace each column by its product with the MDS matrix
/// [2 3 1 1; 1 2 3 1; 1 1 2 3; 3 1 1 2] over GF(2^8).
fn mix_columns(state: &mut [u8; BLOCK_SIZE]) {
    for c in 0..4 {
        let base = 4 * c;
        let col = [state[base], state[base + 1], state[base + 2], state[base + 3]];
        state[base] = galois_mult(col[0], 2) ^ galois_mult(col[1], 3) ^ col[2] ^ col[3];
        state[base + 1] = col[0] ^ galois_mult(col[1], 2) ^ galois_mult(col[2], 3) ^ col[3];
        state[base + 2] = col[0] ^ col[1] ^ galois_mult(col[2], 2) ^ galois_mult(col[3], 3);
        state[base + 3] = galois_mult(col[0], 3) ^ col[1] ^ col[2] ^ galois_mult(col[3], 2);
    }
}

/// Inverse MixColumns with the matrix
/// [14 11 13 9; 9 14 11 13; 13 9 14 11; 11 13 9 14].
fn mix_columns_inv(state: &mut [u8; BLOCK_SIZE]) {
    for c in 0..4 {
        let base = 4 * c;
        let col = [state[base], state[base + 1], state[base + 2], state[base + 3]];
        state[base] = galois_mult(col[0], 14)
            ^ galois_mult(col[1], 11)
            ^ galois_mult(col[2], 13)
            ^ galois_mult(col[3], 9);
        state[base + 1] = galois_mult(col[0], 9)
            ^ galois_mult(col[1], 14)
            ^ galois_mult(col[2], 11)
            ^ galois_mult(col[3], 13);
        state[base + 2] = galois_mult(col[0], 13)
            ^ galois_mult(col[1], 9)
            ^ galois_mult(col[2], 14)
            ^ galois_mult(col[3], 11);
        state[base + 3] = galois_mult(col[0], 11)
            ^ galois_mult(col[1], 13)
            ^ galois_mult(col[2], 9)
            ^ galois_mult(col[3], 14);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_galois_mult_known_products() {
        // worked example from the Rijndael specification
        assert_eq!(galois_mult(0x57, 0x83), 0xc1);
        assert_eq!(galois_mult(0x57, 0x13), 0xfe);
    }

    #[test]
    fn test_galois_mult_identity_and_zero() {
        for a in 0..=255u8 {
            assert_eq!(galois_mult(a, 1), a);
            assert_eq!(galois_mult(1, a), a);
            assert_eq!(galois_mult(a, 0), 0);
        }
    }

    #[test]
    fn test_sbox_tables_are_inverses() {
        for b in 0..=255u8 {
            assert_eq!(SBOX_INV[SBOX[b as usize] as usize], b);
        }
    }

    #[test]
    fn test_expand_key_starts_with_cipher_key() {
        let key: [u8; 32] = core::array::from_fn(|i| i as u8);
        let expanded = expand_key(&key);
        assert_eq!(&expanded[..32], &key[..]);
    }

    #[test]
    fn test_encrypt_block_matches_published_vector() {
        // AES-256 ECB, all-zero key and all-zero plaintext
        let aes = Aes256::new(&[0u8; 32]);
        let ciphertext = aes.encrypt_block([0u8; 16]);
        assert_eq!(hex::encode(ciphertext), "dc95c078a2408989ad48a21492842087");
    }

    #[test]
    fn test_encrypt_block_golden_iv_vector() {
        // all-zero key, block of 0x01 bytes: the first keystream block
        // of an envelope whose IV is sixteen 0x01 bytes
        let aes = Aes256::new(&[0u8; 32]);
        let first = aes.encrypt_block([0x01; 16]);
        assert_eq!(hex::encode(first), "7bc3026cd737103e62902bcd18fb0163");

        let second = aes.encrypt_block(first);
        assert_eq!(hex::encode(second), "286a0ef4d901068c5bb0826aac80292b");
    }

    #[test]
    fn test_decrypt_block_inverts_encrypt_block() {
        let key: [u8; 32] = core::array::from_fn(|i| (i * 7 + 3) as u8);
        let aes = Aes256::new(&key);
        for seed in 0..8u8 {
            let block: [u8; 16] = core::array::from_fn(|i| (i as u8).wrapping_mul(31) ^ seed);
            let roundtrip = aes.decrypt_block(aes.encrypt_block(block));
            assert_eq!(roundtrip, block);
        }
    }

    #[test]
    fn test_different_keys_produce_different_ciphertext() {
        let a = Aes256::new(&[0u8; 32]);
        let b = Aes256::new(&[1u8; 32]);
        let block = [0x42u8; 16];
        assert_ne!(a.encrypt_block(block), b.encrypt_block(block));
    }
}
