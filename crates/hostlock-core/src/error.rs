//! Error types for Hostlock core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages. All failures here are deterministic pure
//! computations (aside from the random source), so nothing is retried.

use thiserror::Error;

/// Result type alias for Hostlock operations.
pub type Result<T> = std::result::Result<T, HostlockError>;

/// Core error type for Hostlock operations.
#[derive(Debug, Error)]
pub enum HostlockError {
    /// Ciphertext envelope is not valid base64 or has an impossible length
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Final pad byte outside [1, 16] or exceeding the available data
    #[error("Invalid padding in decrypted data")]
    InvalidPadding,

    /// Decrypted bytes are not valid UTF-8 (wrong password or corrupt data)
    #[error("Decrypted data is not valid text")]
    InvalidPlaintext,

    /// Stored format version has no matching encryption scheme
    #[error("Unsupported credential format version: {0}")]
    UnsupportedVersion(i64),

    /// System random source failed while generating an IV
    #[error("Random source error: {0}")]
    Rng(String),
}
