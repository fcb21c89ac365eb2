//! Ciphertext envelopes.
//!
//! Both the current and the legacy scheme share one construction: an
//! output-feedback keystream over the AES-256 engine, seeded by a
//! fresh random 16-byte IV, XORed against the padded plaintext. The
//! envelope is base64(IV || ciphertext blocks) so it can live inside a
//! text configuration file. The two schemes differ only in how the
//! padding is stripped on decrypt.
//!
//! Neither direction ever calls the block engine in decrypt mode; OFB
//! only needs the forward transform.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::crypto::aes::{Aes256, BLOCK_SIZE};
use crate::crypto::key::DerivedKey;
use crate::crypto::padding;
use crate::error::{HostlockError, Result};

/// OFB keystream: each block is the AES encryption of the previous
/// one, starting from the IV. Infinite; callers zip it against their
/// data blocks.
struct Keystream<'a> {
    aes: &'a Aes256,
    state: [u8; BLOCK_SIZE],
}

impl<'a> Keystream<'a> {
    fn new(aes: &'a Aes256, iv: [u8; BLOCK_SIZE]) -> Self {
        Self { aes, state: iv }
    }
}

impl Iterator for Keystream<'_> {
    type Item = [u8; BLOCK_SIZE];

    fn next(&mut self) -> Option<Self::Item> {
        self.state = self.aes.encrypt_block(self.state);
        Some(self.state)
    }
}

/// Draw a fresh IV from the system random source.
///
/// Freshness is the one shared-resource discipline of this mode:
/// reusing an IV under the same key leaks the XOR of the two
/// plaintexts.
fn random_iv() -> Result<[u8; BLOCK_SIZE]> {
    let mut iv = [0u8; BLOCK_SIZE];
    getrandom::getrandom(&mut iv).map_err(|e| HostlockError::Rng(e.to_string()))?;
    Ok(iv)
}

fn apply_keystream(aes: &Aes256, iv: [u8; BLOCK_SIZE], data: &[u8], out: &mut Vec<u8>) {
    for (chunk, key_block) in data.chunks(BLOCK_SIZE).zip(Keystream::new(aes, iv)) {
        out.extend(chunk.iter().zip(key_block.iter()).map(|(b, k)| b ^ k));
    }
}

/// Encrypt plaintext bytes into a base64 envelope.
///
/// Pads, generates a fresh IV, XORs the keystream over the padded
/// blocks and prepends the IV. Both schemes produce this layout.
pub fn seal(key: &DerivedKey, plaintext: &[u8]) -> Result<String> {
    let aes = Aes256::new(key.as_bytes());
    let iv = random_iv()?;
    let padded = padding::pad(plaintext);

    let mut raw = Vec::with_capacity(BLOCK_SIZE + padded.len());
    raw.extend_from_slice(&iv);
    apply_keystream(&aes, iv, &padded, &mut raw);

    Ok(BASE64.encode(raw))
}

/// Decode the envelope text, check its shape, and regenerate the
/// padded plaintext from the recovered IV.
fn open_raw(key: &DerivedKey, envelope: &str) -> Result<Vec<u8>> {
    let raw = BASE64
        .decode(envelope.trim())
        .map_err(|e| HostlockError::MalformedEnvelope(e.to_string()))?;

    // 16-byte IV plus at least one ciphertext block
    if raw.len() < 2 * BLOCK_SIZE || (raw.len() - BLOCK_SIZE) % BLOCK_SIZE != 0 {
        return Err(HostlockError::MalformedEnvelope(format!(
            "decoded length {} is not an IV plus whole blocks",
            raw.len()
        )));
    }

    let mut iv = [0u8; BLOCK_SIZE];
    iv.copy_from_slice(&raw[..BLOCK_SIZE]);

    let aes = Aes256::new(key.as_bytes());
    let mut padded = Vec::with_capacity(raw.len() - BLOCK_SIZE);
    apply_keystream(&aes, iv, &raw[BLOCK_SIZE..], &mut padded);
    Ok(padded)
}

/// Decrypt a current-scheme envelope; the padding check is strict.
pub fn open(key: &DerivedKey, envelope: &str) -> Result<Vec<u8>> {
    let padded = open_raw(key, envelope)?;
    padding::unpad(&padded)
}

/// Decrypt a legacy-scheme envelope; only the last byte of the final
/// block decides how much to discard.
pub fn open_legacy(key: &DerivedKey, envelope: &str) -> Result<Vec<u8>> {
    let padded = open_raw(key, envelope)?;
    padding::unpad_final_block(&padded)
}
