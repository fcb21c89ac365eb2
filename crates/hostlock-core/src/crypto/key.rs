//! Key derivation.
//!
//! A credential password becomes an AES-256 key by hashing its UTF-8
//! bytes with SHA-256 and using the digest verbatim. Deterministic and
//! total: the same password always yields the same key, and an empty
//! password is permitted (it produces a valid, if weak, key). This is
//! the historic scheme and must not change, or persisted credentials
//! become unreadable.

use sha2::{Digest, Sha256};
use zeroize::ZeroizeOnDrop;

use crate::crypto::aes::KEY_SIZE;

/// A 32-byte cipher key derived from a password.
///
/// Key material is zeroized from memory when dropped and redacted from
/// `Debug` output.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get a reference to the raw key bytes.
    ///
    /// Avoid storing or logging this value; use it only for the
    /// immediate encryption operation.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an AES-256 key from a password: SHA-256 of the password
/// bytes, taken as the key.
pub fn derive_key(password: &str) -> DerivedKey {
    let digest = Sha256::digest(password.as_bytes());
    let mut key = [0u8; KEY_SIZE];
    key.copy_from_slice(&digest);
    DerivedKey { key }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation_deterministic() {
        let key1 = derive_key("secret");
        let key2 = derive_key("secret");
        assert_eq!(key1.as_bytes(), key2.as_bytes());
        assert_eq!(key1.as_bytes().len(), 32);
    }

    #[test]
    fn test_key_is_sha256_of_password() {
        let key = derive_key("password");
        assert_eq!(
            hex::encode(key.as_bytes()),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn test_different_passwords_different_keys() {
        assert_ne!(derive_key("one").as_bytes(), derive_key("two").as_bytes());
    }

    #[test]
    fn test_empty_password_produces_valid_key() {
        let key = derive_key("");
        assert_eq!(
            hex::encode(key.as_bytes()),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let key = derive_key("secret");
        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains(&hex::encode(&key.as_bytes()[..4])));
    }
}
