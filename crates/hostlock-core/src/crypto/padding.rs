//! Block-alignment padding.
//!
//! Two conventions are in circulation. The current scheme pads the
//! whole plaintext buffer up front and strips the pad with a strict
//! rule on decrypt. The legacy scheme wrote the same bytes on the
//! encrypt side but its decrypt only ever inspected the last byte of
//! the final block, so its unpad lives here as a separate, looser
//! rule. Both paddings are self-describing; neither carries an outer
//! length field.

use crate::crypto::aes::BLOCK_SIZE;
use crate::error::{HostlockError, Result};

/// Pad `data` to a multiple of the block size by appending N bytes of
/// value N, N in [1, 16]. An already-aligned buffer receives a full
/// pad block, so the output is always strictly longer than the input.
pub fn pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut padded = Vec::with_capacity(data.len() + pad_len);
    padded.extend_from_slice(data);
    padded.extend(std::iter::repeat(pad_len as u8).take(pad_len));
    padded
}

/// Strict unpad for the current scheme: the last byte gives the pad
/// count N, which must be in [1, 16], fit inside the buffer, and every
/// one of the N trailing bytes must equal N.
pub fn unpad(data: &[u8]) -> Result<Vec<u8>> {
    let last = *data.last().ok_or(HostlockError::InvalidPadding)?;
    let pad_len = last as usize;
    if pad_len == 0 || pad_len > BLOCK_SIZE || pad_len > data.len() {
        return Err(HostlockError::InvalidPadding);
    }
    let (body, padding) = data.split_at(data.len() - pad_len);
    if padding.iter().any(|&b| b != last) {
        return Err(HostlockError::InvalidPadding);
    }
    Ok(body.to_vec())
}

/// Legacy unpad: read the last byte of the final decrypted block as
/// the discard count and strip that many bytes from that block only.
/// The count must be in [1, 16]; no check that the pad bytes agree.
pub fn unpad_final_block(data: &[u8]) -> Result<Vec<u8>> {
    let last = *data.last().ok_or(HostlockError::InvalidPadding)?;
    let pad_len = last as usize;
    if pad_len == 0 || pad_len > BLOCK_SIZE || pad_len > data.len() {
        return Err(HostlockError::InvalidPadding);
    }
    Ok(data[..data.len() - pad_len].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_round_trip_all_lengths() {
        for len in 0..48 {
            let data: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let padded = pad(&data);
            assert_eq!(padded.len() % 16, 0);
            assert!(padded.len() > data.len());
            assert_eq!(unpad(&padded).unwrap(), data);
        }
    }

    #[test]
    fn test_aligned_input_gets_full_pad_block() {
        let data = [0u8; 16];
        let padded = pad(&data);
        assert_eq!(padded.len(), 32);
        assert!(padded[16..].iter().all(|&b| b == 16));
    }

    #[test]
    fn test_unpad_rejects_zero_count() {
        let mut buf = pad(b"abc");
        *buf.last_mut().unwrap() = 0;
        assert!(matches!(unpad(&buf), Err(HostlockError::InvalidPadding)));
    }

    #[test]
    fn test_unpad_rejects_count_over_sixteen() {
        let mut buf = pad(b"abc");
        *buf.last_mut().unwrap() = 17;
        assert!(matches!(unpad(&buf), Err(HostlockError::InvalidPadding)));
    }

    #[test]
    fn test_unpad_rejects_inconsistent_pad_bytes() {
        let mut buf = pad(b"abc");
        let len = buf.len();
        buf[len - 2] ^= 0xff;
        assert!(matches!(unpad(&buf), Err(HostlockError::InvalidPadding)));
    }

    #[test]
    fn test_unpad_rejects_empty_buffer() {
        assert!(matches!(unpad(&[]), Err(HostlockError::InvalidPadding)));
    }

    #[test]
    fn test_legacy_unpad_ignores_pad_byte_values() {
        // only the count matters for the legacy rule
        let mut buf = b"secret".to_vec();
        buf.extend_from_slice(&[0xaa; 9]);
        buf.push(10);
        assert_eq!(unpad_final_block(&buf).unwrap(), b"secret");
    }

    #[test]
    fn test_legacy_unpad_rejects_invalid_count() {
        let mut buf = vec![0u8; 16];
        *buf.last_mut().unwrap() = 0;
        assert!(matches!(
            unpad_final_block(&buf),
            Err(HostlockError::InvalidPadding)
        ));
        *buf.last_mut().unwrap() = 17;
        assert!(matches!(
            unpad_final_block(&buf),
            Err(HostlockError::InvalidPadding)
        ));
    }
}
