//! Team secret hashing using Argon2

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Argon2,
};
use std::fmt::Debug;

use crate::domain::DomainError;

/// One-way hashing of team secrets
pub trait SecretHasher: Send + Sync + Debug {
    /// Hash a plain-text secret into a self-describing PHC string
    fn hash(&self, secret: &str) -> Result<String, DomainError>;

    /// Verify a secret against a stored hash; a malformed hash never matches
    fn verify(&self, secret: &str, hash: &str) -> bool;
}

/// Argon2id hasher
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl SecretHasher for Argon2Hasher {
    fn hash(&self, secret: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Failed to hash secret: {}", e)))
    }

    fn verify(&self, secret: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        // verify_password compares digests in constant time
        Argon2::default()
            .verify_password(secret.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2Hasher::new();

        let hash = hasher.hash("ia-secret").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify("ia-secret", &hash));
        assert!(!hasher.verify("wrong", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = Argon2Hasher::new();

        let hash1 = hasher.hash("iot-secret").unwrap();
        let hash2 = hasher.hash("iot-secret").unwrap();

        assert_ne!(hash1, hash2);
        assert!(hasher.verify("iot-secret", &hash1));
        assert!(hasher.verify("iot-secret", &hash2));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = Argon2Hasher::new();

        assert!(!hasher.verify("ia-secret", "ia-secret"));
        assert!(!hasher.verify("ia-secret", ""));
    }
}
