//! Legacy repeating-key XOR cipher.
//!
//! Obfuscation only, with no cryptographic value; it exists solely to
//! decode credentials persisted before AES support existed. The
//! password cycles over the text and each character is XORed against
//! the matching password character.
//!
//! The historic data is ASCII/Latin-1. To keep the function total and
//! involutive over arbitrary `&str` input, a character whose XOR would
//! not be a valid scalar value (the surrogate gap) passes through
//! unchanged; applying the cipher twice then still restores the
//! original in every position.

/// Apply the repeating-key XOR cipher. Symmetric: applying it twice
/// with the same password returns the original text.
pub fn xor(password: &str, text: &str) -> String {
    if password.is_empty() {
        return text.to_string();
    }
    text.chars()
        .zip(password.chars().cycle())
        .map(|(c, k)| {
            let mixed = (c as u32) ^ (k as u32);
            char::from_u32(mixed).unwrap_or(c)
        })
        .collect()
}
