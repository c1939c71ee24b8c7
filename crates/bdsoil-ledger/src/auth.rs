//! Password hashing.
//!
//! Passwords are stored as the lowercase hex SHA-256 of the plaintext,
//! unsalted, so databases written by earlier releases keep verifying.

use sha2::{Digest, Sha256};

/// Hash a plaintext password.
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Whether `password` hashes to `stored_hash`.
pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    hash_password(password) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest() {
        assert_eq!(
            hash_password("secret"),
            "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b"
        );
    }

    #[test]
    fn hashing_is_deterministic() {
        assert_eq!(hash_password("secret"), hash_password("secret"));
    }

    #[test]
    fn verification_is_case_sensitive() {
        let stored = hash_password("secret");
        assert!(verify_password(&stored, "secret"));
        assert!(!verify_password(&stored, "Secret"));
        assert!(!verify_password(&stored, ""));
    }
}
