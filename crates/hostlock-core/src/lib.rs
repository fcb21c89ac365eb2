//! # Hostlock Core
//!
//! Core library for Hostlock - credential protection for host
//! passwords stored in a local configuration file.
//!
//! This crate provides the encryption subsystem independent of the
//! terminal application: a self-contained AES-256 block engine, the
//! OFB envelope formats built on it, the legacy XOR cipher, and the
//! version-gated dispatcher that keeps credentials written by older
//! releases readable.
//!
//! ## Architecture
//!
//! - **crypto::aes**: AES-256 block engine and GF(2^8) arithmetic
//! - **crypto::key**: password to AES key derivation
//! - **crypto::padding**: block-alignment padding, both conventions
//! - **crypto::envelope**: OFB keystream and base64 envelope framing
//! - **crypto::xor**: pre-AES repeating-key obfuscation
//! - **crypto**: public encrypt/decrypt API and scheme dispatch
//!
//! Host and group management, configuration parsing, and the terminal
//! UI are external collaborators; they call in only through
//! [`crypto::encrypt`], [`crypto::decrypt`] and the stored format
//! version.

pub mod crypto;
pub mod error;

pub use crypto::{decrypt, decrypt_old, encrypt, encrypt_old, xor, Scheme};
pub use error::{HostlockError, Result};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
