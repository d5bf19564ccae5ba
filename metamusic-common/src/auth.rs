//! Password hashing and session tokens
//!
//! Passwords are stored as `hex(sha256(salt || password))` next to a random
//! per-user salt. Session tokens are opaque random hex strings.
//!
//! # Pure Functions
//!
//! This module contains ONLY pure functions. Account and session storage
//! live in the web crate's db layer.

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

const SALT_BYTES: usize = 16;
const TOKEN_BYTES: usize = 32;

/// Generate a random salt (hex encoded)
pub fn generate_salt() -> String {
    random_hex(SALT_BYTES)
}

/// Generate an opaque session token (hex encoded)
pub fn generate_session_token() -> String {
    random_hex(TOKEN_BYTES)
}

fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    to_hex(&bytes)
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Hash a password with the given salt
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    to_hex(&hasher.finalize())
}

/// Check a password attempt against a stored hash
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    let calculated = hash_password(password, salt);
    // Equal-length hex strings; compare without early exit
    calculated.len() == expected_hash.len()
        && calculated
            .bytes()
            .zip(expected_hash.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Normalize and validate sign-up credentials
///
/// Returns the trimmed, lowercased email. Error messages are shown to the
/// user verbatim.
pub fn validate_credentials(email: &str, password: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(Error::InvalidInput(
            "Unable to validate email address: invalid format".to_string(),
        ));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::InvalidInput(
            "Password should be at least 6 characters".to_string(),
        ));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic_per_salt() {
        let a = hash_password("secret1", "salt");
        let b = hash_password("secret1", "salt");
        let c = hash_password("secret1", "other");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_hash_algorithm() {
        // sha256("abc")
        assert_eq!(
            hash_password("bc", "a"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_verify_password() {
        let salt = generate_salt();
        let hash = hash_password("hunter22", &salt);
        assert!(verify_password("hunter22", &salt, &hash));
        assert!(!verify_password("hunter23", &salt, &hash));
        assert!(!verify_password("hunter22", &salt, ""));
    }

    #[test]
    fn test_tokens_are_unique_hex() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), TOKEN_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_validate_credentials() {
        assert_eq!(
            validate_credentials("  Fan@Example.com ", "abcdef").unwrap(),
            "fan@example.com"
        );
        assert!(validate_credentials("not-an-email", "abcdef").is_err());

        let err = validate_credentials("a@b.c", "12345").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: Password should be at least 6 characters"
        );
    }
}
